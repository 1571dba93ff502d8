//! Conversation messages and recorded audio payloads.
//!
//! Messages are append-only; insertion order is the canonical
//! conversation order. The `time` field is a human-readable clock label
//! captured at append time on the client, not a server timestamp.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Speaker::User),
            "bot" => Ok(Speaker::Bot),
            other => Err(format!("invalid speaker: '{other}'")),
        }
    }
}

/// A single entry in the conversation history.
///
/// The wire name of the speaker field is `type`, matching the persisted
/// snapshot layout consumed by the screen views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub text: String,
    pub time: String,
    /// Synthesized speech reference, present on some bot messages.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub audio_url: Option<String>,
}

/// A raw audio recording captured by the chat screen's microphone.
#[derive(Debug, Clone)]
pub struct AudioRecording {
    pub data: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl AudioRecording {
    /// A recording with the capture defaults used by the chat screen.
    pub fn webm(data: Vec<u8>) -> Self {
        Self {
            data,
            file_name: "recording.webm".to_string(),
            mime_type: "audio/webm".to_string(),
        }
    }
}
