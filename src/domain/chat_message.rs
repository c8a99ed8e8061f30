use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use chrono::Timelike;

use super::webhook::RequestId;

/// Who a rendered line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Bot,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Message(MessageRole),
    /// Transient "bot is typing" line owned by one in-flight request.
    Typing(RequestId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub kind: EntryKind,
    /// Already formatted as `[HH:MM:SS]`.
    pub timestamp: String,
    pub text: String,
    pub glitch_until: Option<Instant>,
}

impl ChatEntry {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn role(&self) -> Option<MessageRole> {
        match self.kind {
            EntryKind::Message(role) => Some(role),
            EntryKind::Typing(_) => None,
        }
    }

    pub fn is_glitching(&self, now: Instant) -> bool {
        self.glitch_until.is_some_and(|until| now < until)
    }
}

/// Formats a wall-clock time as the `[HH:MM:SS]` tag shown before each line.
pub fn format_timestamp<T: Timelike>(time: &T) -> String {
    format!(
        "[{:02}:{:02}:{:02}]",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// The visible message list. Oldest entries fall off once `capacity` is hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    entries: VecDeque<ChatEntry>,
    capacity: usize,
}

impl Transcript {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: ChatEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Removes the typing line for `request_id`. Returns false when it was
    /// already gone.
    pub fn remove_typing(&mut self, request_id: RequestId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.kind != EntryKind::Typing(request_id));
        self.entries.len() != before
    }

    pub fn entries(&self) -> impl Iterator<Item = &ChatEntry> {
        self.entries.iter()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.back()
    }

    /// Entries with a role, skipping typing lines.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn messages(&self) -> impl Iterator<Item = (MessageRole, &str)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.role().map(|role| (role, entry.text.as_str())))
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::with_capacity(500)
    }
}

/// Builds a glitch deadline when `roll` falls under `chance`.
pub fn glitch_deadline(roll: f64, chance: f64, now: Instant, length: Duration) -> Option<Instant> {
    (roll < chance).then(|| now + length)
}
