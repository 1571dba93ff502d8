//! Wire types for the screening service HTTP API.
//!
//! The backend has emitted two generations of field spellings for chat
//! replies (`response` vs `message`, `conversation_complete` vs
//! `is_complete`) and transcriptions (`text` vs `transcribed_text`).
//! The response DTOs accept either spelling, preferring the newer one.

use serde::{Deserialize, Serialize};

use mchat_types::error::ServiceError;
use mchat_types::service::{BotReply, SessionStart, Transcription};
use mchat_types::session::IntakeData;

#[derive(Debug, Serialize)]
pub(crate) struct StartSessionRequest<'a> {
    pub parent_name: &'a str,
    pub child_name: &'a str,
    pub child_age: u32,
    pub language: String,
    pub mrn: &'a str,
}

impl<'a> StartSessionRequest<'a> {
    pub fn from_intake(intake: &'a IntakeData) -> Self {
        Self {
            parent_name: &intake.guardian_name,
            child_name: &intake.child_name,
            child_age: intake.child_age_months,
            language: intake.language.to_string(),
            mrn: &intake.medical_record_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartSessionResponse {
    pub session_id: String,
    #[serde(default)]
    pub initial_message: Option<String>,
}

impl StartSessionResponse {
    pub fn into_session_start(self) -> Result<SessionStart, ServiceError> {
        if self.session_id.is_empty() {
            return Err(ServiceError::MalformedResponse(
                "start_session response carried no session identifier".to_string(),
            ));
        }
        Ok(SessionStart {
            session_id: self.session_id,
            initial_message: self.initial_message,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
    pub generate_audio: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatTurnResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub conversation_complete: Option<bool>,
    #[serde(default)]
    pub is_complete: Option<bool>,
}

impl ChatTurnResponse {
    pub fn into_bot_reply(self) -> Result<BotReply, ServiceError> {
        let text = self.response.or(self.message).ok_or_else(|| {
            ServiceError::MalformedResponse(
                "chat response carried neither 'response' nor 'message'".to_string(),
            )
        })?;
        Ok(BotReply {
            text,
            audio_url: self.audio_url,
            conversation_complete: self
                .conversation_complete
                .or(self.is_complete)
                .unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AsrResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub transcribed_text: Option<String>,
}

impl AsrResponse {
    pub fn into_transcription(self) -> Transcription {
        Transcription {
            text: self.text.or(self.transcribed_text),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AmendAnswerRequest<'a> {
    pub question_id: &'a str,
    pub updated_answer: &'a str,
}

/// Error body the service attaches to non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mchat_types::session::Language;

    #[test]
    fn test_start_request_wire_names() {
        let intake = IntakeData {
            guardian_name: "Parent".to_string(),
            child_name: "Sami".to_string(),
            child_age_months: 16,
            language: Language::Arabic,
            medical_record_id: "MRN1234567".to_string(),
        };
        let value = serde_json::to_value(StartSessionRequest::from_intake(&intake)).unwrap();
        assert_eq!(value["parent_name"], "Parent");
        assert_eq!(value["child_name"], "Sami");
        assert_eq!(value["child_age"], 16);
        assert_eq!(value["language"], "arabic");
        assert_eq!(value["mrn"], "MRN1234567");
    }

    #[test]
    fn test_start_response_requires_identifier() {
        let response: StartSessionResponse =
            serde_json::from_str(r#"{"session_id":"abc","initial_message":"Hi there"}"#).unwrap();
        let start = response.into_session_start().unwrap();
        assert_eq!(start.session_id, "abc");
        assert_eq!(start.initial_message.as_deref(), Some("Hi there"));

        let response: StartSessionResponse =
            serde_json::from_str(r#"{"session_id":""}"#).unwrap();
        assert!(matches!(
            response.into_session_start(),
            Err(ServiceError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_chat_reply_prefers_response_field() {
        let turn: ChatTurnResponse = serde_json::from_str(
            r#"{"response":"Thanks","message":"older spelling","conversation_complete":true}"#,
        )
        .unwrap();
        let reply = turn.into_bot_reply().unwrap();
        assert_eq!(reply.text, "Thanks");
        assert!(reply.conversation_complete);
    }

    #[test]
    fn test_chat_reply_accepts_legacy_spellings() {
        let turn: ChatTurnResponse =
            serde_json::from_str(r#"{"message":"Thanks","is_complete":true}"#).unwrap();
        let reply = turn.into_bot_reply().unwrap();
        assert_eq!(reply.text, "Thanks");
        assert!(reply.conversation_complete);
    }

    #[test]
    fn test_chat_reply_defaults_incomplete() {
        let turn: ChatTurnResponse =
            serde_json::from_str(r#"{"response":"Next question","audio_url":"/tts/7.mp3"}"#)
                .unwrap();
        let reply = turn.into_bot_reply().unwrap();
        assert!(!reply.conversation_complete);
        assert_eq!(reply.audio_url.as_deref(), Some("/tts/7.mp3"));
    }

    #[test]
    fn test_chat_reply_without_text_is_malformed() {
        let turn: ChatTurnResponse = serde_json::from_str(r#"{"audio_url":"/x.mp3"}"#).unwrap();
        assert!(matches!(
            turn.into_bot_reply(),
            Err(ServiceError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_asr_accepts_both_spellings() {
        let asr: AsrResponse = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(asr.into_transcription().text.as_deref(), Some("hello"));

        let asr: AsrResponse = serde_json::from_str(r#"{"transcribed_text":"hello"}"#).unwrap();
        assert_eq!(asr.into_transcription().text.as_deref(), Some("hello"));

        let asr: AsrResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(asr.into_transcription().text.is_none());
    }

    #[test]
    fn test_error_body_detail_optional() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Session not found"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("Session not found"));

        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.detail.is_none());
    }
}
