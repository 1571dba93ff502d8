//! The session synchronization core.
//!
//! [`SessionContext`] is the single authoritative in-memory
//! representation of the active screening session. It mediates every
//! call to the remote screening service, appends to the message
//! history, persists snapshots after each committing mutation, and
//! latches the conversation-completion signal.
//!
//! Exchanges follow a two-phase append: the user message is committed
//! (and persisted) before the network round-trip, then reconciled with
//! the bot reply on success. A failed round-trip keeps the user message
//! in history; nothing is rolled back.
//!
//! The context does not serialize concurrent exchanges. Two overlapping
//! calls both append their optimistic user messages and their bot
//! replies land in network completion order; callers wanting strict
//! ordering disable input while [`SessionContext::is_busy`] is set.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Local;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use mchat_types::error::{ServiceError, SessionError};
use mchat_types::message::{AudioRecording, ChatMessage, Speaker};
use mchat_types::service::{BotReply, SessionStart};
use mchat_types::session::IntakeData;
use mchat_types::snapshot::SessionSnapshot;

use crate::session::service::ScreeningService;
use crate::session::snapshot::SnapshotStore;

/// Display text for an audio exchange in which no speech was recognized.
const AUDIO_PLACEHOLDER: &str = "Audio message";

/// Clock label stamped on a message at append time.
fn now_label() -> String {
    Local::now().format("%-I:%M %p").to_string()
}

#[derive(Default)]
struct SessionState {
    session_id: Option<String>,
    session_data: Option<IntakeData>,
    messages: Vec<ChatMessage>,
    conversation_complete: bool,
    last_error: Option<String>,
}

impl SessionState {
    fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            session_id: Some(snapshot.session_id),
            session_data: Some(snapshot.session_data),
            messages: snapshot.messages,
            conversation_complete: false,
            last_error: None,
        }
    }

    /// The persisted shape. None until a session exists.
    fn snapshot(&self) -> Option<SessionSnapshot> {
        match (&self.session_id, &self.session_data) {
            (Some(session_id), Some(session_data)) => Some(SessionSnapshot {
                session_id: session_id.clone(),
                session_data: session_data.clone(),
                messages: self.messages.clone(),
            }),
            _ => None,
        }
    }
}

/// Decrements the in-flight counter when a service call finishes,
/// including on panic or early return.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Authoritative session state, kept consistent with durable storage
/// and the remote screening service.
///
/// Generic over [`ScreeningService`] and [`SnapshotStore`] so the view
/// layer receives an injected context rather than ambient global state.
/// Constructed by [`SessionContext::restore`], torn down by
/// [`SessionContext::clear`].
pub struct SessionContext<S, P> {
    service: S,
    store: P,
    state: RwLock<SessionState>,
    in_flight: AtomicUsize,
}

impl<S: ScreeningService, P: SnapshotStore> SessionContext<S, P> {
    /// Build a context, adopting the persisted snapshot when one is
    /// present and well-formed.
    ///
    /// A missing snapshot starts empty. An unreadable or malformed
    /// snapshot also starts empty; the failure is logged and never
    /// surfaced.
    pub async fn restore(service: S, store: P) -> Self {
        let state = match store.load().await {
            Ok(Some(snapshot)) => {
                debug!(session_id = %snapshot.session_id, "restored persisted session");
                SessionState::from_snapshot(snapshot)
            }
            Ok(None) => SessionState::default(),
            Err(err) => {
                warn!("discarding unreadable session snapshot: {err}");
                SessionState::default()
            }
        };

        Self {
            service,
            store,
            state: RwLock::new(state),
            in_flight: AtomicUsize::new(0),
        }
    }

    // --- Session lifecycle ---

    /// Create a new screening session from intake parameters.
    ///
    /// On success, `{session_id, session_data, messages}` are replaced
    /// atomically from the caller's perspective: the message list is
    /// seeded with the service's initial bot message when one is
    /// returned, and the completion flag resets. On failure nothing is
    /// mutated and the error is surfaced without retry.
    pub async fn create_session(&self, intake: IntakeData) -> Result<SessionStart, SessionError> {
        intake.validate()?;

        let _busy = BusyGuard::enter(&self.in_flight);

        let start = match self.service.start_session(&intake).await {
            Ok(start) => start,
            Err(err) => return Err(self.fail(err).await),
        };
        if start.session_id.is_empty() {
            let err = ServiceError::MalformedResponse(
                "start_session response carried no session identifier".to_string(),
            );
            return Err(self.fail(err).await);
        }

        {
            let mut state = self.state.write().await;
            state.session_id = Some(start.session_id.clone());
            state.session_data = Some(intake);
            state.messages.clear();
            if let Some(text) = &start.initial_message {
                state.messages.push(ChatMessage {
                    speaker: Speaker::Bot,
                    text: text.clone(),
                    time: now_label(),
                    audio_url: None,
                });
            }
            state.conversation_complete = false;
            state.last_error = None;
        }
        self.persist().await;

        info!(session_id = %start.session_id, "screening session created");
        Ok(start)
    }

    /// Reset all state and erase the persisted snapshot.
    ///
    /// Always succeeds; a store failure is logged and swallowed.
    pub async fn clear(&self) {
        {
            let mut state = self.state.write().await;
            *state = SessionState::default();
        }
        if let Err(err) = self.store.clear().await {
            warn!("failed to erase persisted session snapshot: {err}");
        }
        info!("session cleared");
    }

    // --- Exchanges ---

    /// Send a user utterance and append the bot's reply.
    ///
    /// The user message is appended and persisted before the round-trip
    /// (optimistic append). On failure it stays in history and no bot
    /// message is appended.
    pub async fn send_text_message(
        &self,
        text: &str,
        want_audio: bool,
    ) -> Result<BotReply, SessionError> {
        let session_id = self.require_session().await?;
        let _busy = BusyGuard::enter(&self.in_flight);

        self.append_user_message(text.to_string()).await;

        match self.service.send_message(&session_id, text, want_audio).await {
            Ok(reply) => {
                self.commit_reply(&reply).await;
                Ok(reply)
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Transcribe a recording and run the exchange with the result.
    ///
    /// The user message carries the transcribed text, or a placeholder
    /// when no speech was recognized. A transcription failure mutates no
    /// history; an exchange failure behaves exactly like
    /// [`send_text_message`](Self::send_text_message).
    pub async fn send_audio_message(
        &self,
        recording: &AudioRecording,
    ) -> Result<BotReply, SessionError> {
        let session_id = self.require_session().await?;
        let language = {
            let state = self.state.read().await;
            state
                .session_data
                .as_ref()
                .map(|data| data.language)
                .unwrap_or_default()
        };
        let _busy = BusyGuard::enter(&self.in_flight);

        let transcription = match self.service.transcribe_audio(recording, language).await {
            Ok(transcription) => transcription,
            Err(err) => return Err(self.fail(err).await),
        };
        let text = transcription
            .text
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| AUDIO_PLACEHOLDER.to_string());

        self.append_user_message(text.clone()).await;

        match self.service.send_message(&session_id, &text, false).await {
            Ok(reply) => {
                self.commit_reply(&reply).await;
                Ok(reply)
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    // --- Reports ---

    /// Fetch the final report for the active session.
    ///
    /// Passes the report through opaquely; mutates neither the message
    /// history nor the completion flag.
    pub async fn request_report(&self) -> Result<serde_json::Value, SessionError> {
        let session_id = self.require_session().await?;
        let _busy = BusyGuard::enter(&self.in_flight);

        match self.service.fetch_report(&session_id).await {
            Ok(report) => {
                self.succeed().await;
                Ok(report)
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Fetch the latest report recorded against a medical record id.
    ///
    /// Session-independent: the result screen operates on the record id
    /// after the session itself has been cleared.
    pub async fn latest_report_by_record(
        &self,
        medical_record_id: &str,
    ) -> Result<serde_json::Value, SessionError> {
        let _busy = BusyGuard::enter(&self.in_flight);

        match self.service.fetch_report_by_record(medical_record_id).await {
            Ok(report) => {
                self.succeed().await;
                Ok(report)
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Amend a single answer on a previously generated report.
    pub async fn amend_answer(
        &self,
        medical_record_id: &str,
        question_id: &str,
        updated_answer: &str,
    ) -> Result<serde_json::Value, SessionError> {
        let _busy = BusyGuard::enter(&self.in_flight);

        match self
            .service
            .amend_report_answer(medical_record_id, question_id, updated_answer)
            .await
        {
            Ok(result) => {
                self.succeed().await;
                Ok(result)
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    // --- Read accessors ---

    /// The active session's identifier, if any.
    pub async fn session_id(&self) -> Option<String> {
        self.state.read().await.session_id.clone()
    }

    /// The intake parameters captured at session creation.
    pub async fn session_data(&self) -> Option<IntakeData> {
        self.state.read().await.session_data.clone()
    }

    /// The conversation history, in canonical append order.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.read().await.messages.clone()
    }

    /// Whether the service has signalled the questionnaire portion is
    /// done. Monotonic within a session's lifetime.
    pub async fn conversation_complete(&self) -> bool {
        self.state.read().await.conversation_complete
    }

    /// The most recent failed operation's message, cleared by the next
    /// successful operation.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Whether a service call is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    // --- Internals ---

    async fn require_session(&self) -> Result<String, SessionError> {
        let state = self.state.read().await;
        state
            .session_id
            .clone()
            .ok_or(SessionError::NoActiveSession)
    }

    async fn append_user_message(&self, text: String) {
        {
            let mut state = self.state.write().await;
            state.messages.push(ChatMessage {
                speaker: Speaker::User,
                text,
                time: now_label(),
                audio_url: None,
            });
        }
        self.persist().await;
    }

    async fn commit_reply(&self, reply: &BotReply) {
        {
            let mut state = self.state.write().await;
            state.messages.push(ChatMessage {
                speaker: Speaker::Bot,
                text: reply.text.clone(),
                time: now_label(),
                audio_url: reply.audio_url.clone(),
            });
            if reply.conversation_complete && !state.conversation_complete {
                state.conversation_complete = true;
                info!("conversation marked complete");
            }
            state.last_error = None;
        }
        self.persist().await;
    }

    async fn succeed(&self) {
        let mut state = self.state.write().await;
        state.last_error = None;
    }

    async fn fail(&self, err: ServiceError) -> SessionError {
        warn!("screening service call failed: {err}");
        let mut state = self.state.write().await;
        state.last_error = Some(err.to_string());
        SessionError::Service(err)
    }

    /// Write the current committed state to the persistent store.
    ///
    /// No-op until a session exists. A store failure is logged; the
    /// in-memory state stays authoritative.
    async fn persist(&self) {
        let snapshot = {
            let state = self.state.read().await;
            state.snapshot()
        };
        if let Some(snapshot) = snapshot {
            if let Err(err) = self.store.save(&snapshot).await {
                warn!("failed to persist session snapshot: {err}");
            }
        }
    }
}
