//! HttpScreeningService -- concrete [`ScreeningService`] implementation
//! over the screening backend's HTTP API.
//!
//! Routes follow the backend contract: `POST /start_session`,
//! `POST /chat/{session_id}`, `POST /asr` (multipart),
//! `GET /api/sessions/{session_id}/report`,
//! `GET /api/test-report?mrn=...`, and
//! `PUT /api/test-report/{mrn}/update-answer`.
//!
//! Every request carries the client-wide timeout configured at
//! construction; a hung call fails into the normal service-error path
//! instead of leaving the caller waiting forever.

use std::time::Duration;

use reqwest::multipart;

use mchat_core::session::ScreeningService;
use mchat_types::config::ServiceConfig;
use mchat_types::error::ServiceError;
use mchat_types::message::AudioRecording;
use mchat_types::service::{BotReply, SessionStart, Transcription};
use mchat_types::session::{IntakeData, Language};

use super::types::{
    AmendAnswerRequest, AsrResponse, ChatRequest, ChatTurnResponse, ErrorBody,
    StartSessionRequest, StartSessionResponse,
};

/// Screening service client over reqwest.
pub struct HttpScreeningService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScreeningService {
    /// Create a client for the configured service location.
    pub fn new(config: &ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Override the base URL (useful for tests or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a non-success response into [`ServiceError::Rejected`],
    /// using the service's `detail` string when the body carries one.
    async fn rejection(response: reqwest::Response, fallback: &str) -> ServiceError {
        let status = response.status().as_u16();
        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.detail.unwrap_or_else(|| fallback.to_string()),
            Err(_) => fallback.to_string(),
        };
        ServiceError::Rejected { status, detail }
    }

    fn request_error(err: reqwest::Error) -> ServiceError {
        ServiceError::Request(err.to_string())
    }

    fn decode_error(err: reqwest::Error) -> ServiceError {
        ServiceError::MalformedResponse(err.to_string())
    }
}

impl ScreeningService for HttpScreeningService {
    async fn start_session(&self, intake: &IntakeData) -> Result<SessionStart, ServiceError> {
        let response = self
            .client
            .post(self.url("/start_session"))
            .json(&StartSessionRequest::from_intake(intake))
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "Failed to create session").await);
        }

        let body: StartSessionResponse = response.json().await.map_err(Self::decode_error)?;
        body.into_session_start()
    }

    async fn send_message(
        &self,
        session_id: &str,
        text: &str,
        want_audio: bool,
    ) -> Result<BotReply, ServiceError> {
        let response = self
            .client
            .post(self.url(&format!("/chat/{session_id}")))
            .json(&ChatRequest {
                message: text,
                generate_audio: want_audio,
            })
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "Failed to send message").await);
        }

        let body: ChatTurnResponse = response.json().await.map_err(Self::decode_error)?;
        body.into_bot_reply()
    }

    async fn transcribe_audio(
        &self,
        recording: &AudioRecording,
        language: Language,
    ) -> Result<Transcription, ServiceError> {
        let part = multipart::Part::bytes(recording.data.clone())
            .file_name(recording.file_name.clone())
            .mime_str(&recording.mime_type)
            .map_err(Self::request_error)?;
        let form = multipart::Form::new()
            .part("audio_file", part)
            .text("language", language.to_string());

        let response = self
            .client
            .post(self.url("/asr"))
            .multipart(form)
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "Failed to transcribe audio").await);
        }

        let body: AsrResponse = response.json().await.map_err(Self::decode_error)?;
        Ok(body.into_transcription())
    }

    async fn fetch_report(&self, session_id: &str) -> Result<serde_json::Value, ServiceError> {
        let response = self
            .client
            .get(self.url(&format!("/api/sessions/{session_id}/report")))
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "Report not available yet").await);
        }

        response.json().await.map_err(Self::decode_error)
    }

    async fn fetch_report_by_record(
        &self,
        medical_record_id: &str,
    ) -> Result<serde_json::Value, ServiceError> {
        let response = self
            .client
            .get(self.url("/api/test-report"))
            .query(&[("mrn", medical_record_id)])
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "Report not found").await);
        }

        response.json().await.map_err(Self::decode_error)
    }

    async fn amend_report_answer(
        &self,
        medical_record_id: &str,
        question_id: &str,
        updated_answer: &str,
    ) -> Result<serde_json::Value, ServiceError> {
        let response = self
            .client
            .put(self.url(&format!("/api/test-report/{medical_record_id}/update-answer")))
            .json(&AmendAnswerRequest {
                question_id,
                updated_answer,
            })
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "Failed to update answer").await);
        }

        response.json().await.map_err(Self::decode_error)
    }
}
