use super::webhook::{RequestId, WebhookOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// One animation frame is due.
    Tick,
    QuitRequested,
    Resized {
        width: u16,
        height: u16,
    },
    InputKey(KeyInput),
    WebhookCompleted {
        request_id: RequestId,
        outcome: WebhookOutcome,
    },
}

/// A key press normalized for the orchestrator. Named keys use lowercase
/// names (`enter`, `esc`, `backspace`, ...); printable keys carry the char.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }

    /// The printable character this key inserts, if any.
    pub fn printable(&self) -> Option<char> {
        if self.ctrl {
            return None;
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}
