use std::time::Instant;

use super::{chat_message::Transcript, connection_status::ConnectionStatus};

/// A demo-mode reply waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFallback {
    pub due: Instant,
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    endpoint: String,
    status: ConnectionStatus,
    transcript: Transcript,
    pending_fallbacks: Vec<PendingFallback>,
}

impl ConversationState {
    pub fn new(endpoint: impl Into<String>, transcript: Transcript) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: ConnectionStatus::default(),
            transcript,
            pending_fallbacks: Vec::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = endpoint.into();
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn schedule_fallback(&mut self, fallback: PendingFallback) {
        self.pending_fallbacks.push(fallback);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pending_fallbacks(&self) -> &[PendingFallback] {
        &self.pending_fallbacks
    }

    /// Removes and returns fallbacks whose deadline has passed, oldest first.
    pub fn take_due_fallbacks(&mut self, now: Instant) -> Vec<PendingFallback> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending_fallbacks
            .drain(..)
            .partition(|fallback| fallback.due <= now);
        self.pending_fallbacks = waiting;
        due.sort_by_key(|fallback| fallback.due);
        due
    }
}
