//! Remote screening service contract shapes.
//!
//! Language-agnostic request/response types for the four service
//! interactions the synchronization core performs. The HTTP wire
//! encoding (field spellings, routes, multipart forms) lives in
//! mchat-infra; these are the shapes the core consumes.

use serde::{Deserialize, Serialize};

/// Result of creating a screening session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStart {
    /// Opaque identifier issued by the screening service.
    pub session_id: String,
    /// Optional opening bot message seeding the conversation.
    pub initial_message: Option<String>,
}

/// The bot's side of one exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotReply {
    pub text: String,
    /// Synthesized speech for this reply, when audio was requested.
    pub audio_url: Option<String>,
    /// Server signal that the questionnaire portion has concluded.
    pub conversation_complete: bool,
}

/// Result of transcribing a recorded audio payload.
///
/// An absent `text` is a valid non-error response meaning no speech was
/// recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: Option<String>,
}
