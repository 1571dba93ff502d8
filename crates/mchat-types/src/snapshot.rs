//! The persisted session snapshot.

use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;
use crate::session::IntakeData;

/// The tuple written to durable local storage on every committing
/// mutation: `{session_id, session_data, messages}`.
///
/// The conversation-completion flag is deliberately not part of the
/// persisted shape; a restored session starts with it unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub session_data: IntakeData,
    pub messages: Vec<ChatMessage>,
}
