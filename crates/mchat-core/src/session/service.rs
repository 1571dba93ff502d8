//! ScreeningService trait definition.
//!
//! The remote screening service contract consumed by the synchronization
//! core. The HTTP implementation lives in mchat-infra
//! (`HttpScreeningService`). Uses native async fn in traits (RPITIT,
//! Rust 2024 edition).

use mchat_types::error::ServiceError;
use mchat_types::message::AudioRecording;
use mchat_types::service::{BotReply, SessionStart, Transcription};
use mchat_types::session::{IntakeData, Language};

/// Contract for the remote screening service.
///
/// The service owns all domain logic: question sequencing, scoring,
/// transcription, speech synthesis, and report generation. The core only
/// exchanges typed shapes with it and never retries on its behalf.
pub trait ScreeningService: Send + Sync {
    /// Create a new screening session from intake parameters.
    fn start_session(
        &self,
        intake: &IntakeData,
    ) -> impl std::future::Future<Output = Result<SessionStart, ServiceError>> + Send;

    /// Exchange one user utterance for the bot's reply.
    fn send_message(
        &self,
        session_id: &str,
        text: &str,
        want_audio: bool,
    ) -> impl std::future::Future<Output = Result<BotReply, ServiceError>> + Send;

    /// Transcribe a recorded audio payload.
    ///
    /// A `Transcription` with no text is a valid response meaning no
    /// speech was recognized.
    fn transcribe_audio(
        &self,
        recording: &AudioRecording,
        language: Language,
    ) -> impl std::future::Future<Output = Result<Transcription, ServiceError>> + Send;

    /// Fetch the final report for a session. Opaque to the core.
    fn fetch_report(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, ServiceError>> + Send;

    /// Fetch the latest report recorded against a medical record id.
    fn fetch_report_by_record(
        &self,
        medical_record_id: &str,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, ServiceError>> + Send;

    /// Amend a single answer on a previously generated report.
    fn amend_report_answer(
        &self,
        medical_record_id: &str,
        question_id: &str,
        updated_answer: &str,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, ServiceError>> + Send;
}
