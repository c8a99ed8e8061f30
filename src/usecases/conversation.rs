//! Conversation flow between the entry field and the webhook.
//!
//! The controller owns request bookkeeping. Everything the user can see
//! (messages, status, endpoint) lives in [`ConversationState`].

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use chrono::{Local, Utc};
use rand::Rng;

use crate::domain::{
    chat_message::{format_timestamp, glitch_deadline, ChatEntry, EntryKind, MessageRole},
    connection_status::ConnectionStatus,
    conversation_state::{ConversationState, PendingFallback},
    webhook::{is_configured, RequestId, WebhookError, WebhookOutcome},
};

use super::send_message::{
    prepare_request, SendMessageCommand, SendMessageError, WebhookDispatcher,
};

pub const CONNECTION_FAILED_MESSAGE: &str =
    "ERROR: Connection to N8N chatbot failed. Check webhook URL.";

pub const HELP_LINES: [&str; 4] = [
    "Available commands:",
    "- Type any message to chat with the N8N bot",
    "- Type /webhook <url> to configure webhook",
    "- Ctrl+/ to show this help",
];

const WEBHOOK_COMMAND: &str = "/webhook";

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub bot_name: String,
    pub user: String,
    pub fallback_delay: Duration,
    pub glitch_chance: f64,
    pub glitch_length: Duration,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            bot_name: "N8N Bot".to_owned(),
            user: "terminal_user".to_owned(),
            fallback_delay: Duration::from_millis(1_000),
            glitch_chance: 0.2,
            glitch_length: Duration::from_millis(300),
        }
    }
}

/// What a submitted line turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Sent(RequestId),
    EndpointUpdated,
    UsageShown,
}

pub struct ConversationController<D>
where
    D: WebhookDispatcher,
{
    dispatcher: D,
    settings: ChatSettings,
    next_request: RequestId,
    in_flight: BTreeMap<RequestId, String>,
}

impl<D> ConversationController<D>
where
    D: WebhookDispatcher,
{
    pub fn new(dispatcher: D, settings: ChatSettings) -> Self {
        Self {
            dispatcher,
            settings,
            next_request: RequestId::new(1),
            in_flight: BTreeMap::new(),
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Routes a submitted line: `/webhook <url>` reconfigures, anything else
    /// is sent.
    pub fn handle_line(
        &mut self,
        state: &mut ConversationState,
        line: &str,
        now: Instant,
    ) -> Result<LineOutcome, SendMessageError> {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix(WEBHOOK_COMMAND) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                let url = rest.trim();
                if url.is_empty() {
                    self.push(
                        state,
                        MessageRole::System,
                        "Usage: /webhook <url>".to_owned(),
                        now,
                    );
                    return Ok(LineOutcome::UsageShown);
                }
                self.set_webhook_url(state, url, now);
                return Ok(LineOutcome::EndpointUpdated);
            }
        }

        self.submit(state, line, now).map(LineOutcome::Sent)
    }

    /// Starts one send. Rejected input leaves `state` untouched.
    pub fn submit(
        &mut self,
        state: &mut ConversationState,
        input: &str,
        now: Instant,
    ) -> Result<RequestId, SendMessageError> {
        let command = SendMessageCommand::new(input);
        let request_id = self.next_request;
        let request = prepare_request(
            request_id,
            state.endpoint(),
            &self.settings.user,
            &command,
            Utc::now(),
        )?;
        self.next_request = request_id.next();

        let text = request.payload.message.clone();
        self.push(state, MessageRole::User, text.clone(), now);
        self.push_typing(state, request_id);
        state.set_status(ConnectionStatus::Sending);
        self.in_flight.insert(request_id, text);

        if !is_configured(&request.endpoint) {
            self.complete(state, request_id, Err(WebhookError::NotConfigured), now);
            return Ok(request_id);
        }

        tracing::debug!(
            request_id = request_id.value(),
            endpoint = %request.endpoint,
            "dispatching webhook request"
        );
        self.dispatcher.dispatch(request);
        Ok(request_id)
    }

    /// Applies the result of a finished request.
    pub fn complete(
        &mut self,
        state: &mut ConversationState,
        request_id: RequestId,
        outcome: WebhookOutcome,
        now: Instant,
    ) {
        let Some(original) = self.in_flight.remove(&request_id) else {
            tracing::debug!(
                request_id = request_id.value(),
                "ignoring completion for unknown request"
            );
            return;
        };

        state.transcript_mut().remove_typing(request_id);

        match outcome {
            Ok(payload) => {
                self.push(state, MessageRole::Bot, payload.reply_text(), now);
                state.set_status(ConnectionStatus::Connected);
            }
            Err(error) => {
                tracing::warn!(
                    request_id = request_id.value(),
                    code = error.code(),
                    error = %error,
                    "error sending message to webhook"
                );
                self.push(
                    state,
                    MessageRole::System,
                    CONNECTION_FAILED_MESSAGE.to_owned(),
                    now,
                );
                state.set_status(ConnectionStatus::Error);
                state.schedule_fallback(PendingFallback {
                    due: now + self.settings.fallback_delay,
                    original,
                });
            }
        }
    }

    /// Emits demo replies whose delay has elapsed.
    pub fn poll_deferred(&mut self, state: &mut ConversationState, now: Instant) {
        for fallback in state.take_due_fallbacks(now) {
            self.push(state, MessageRole::Bot, demo_reply(&fallback.original), now);
            state.set_status(ConnectionStatus::DemoMode);
        }
    }

    pub fn set_webhook_url(&mut self, state: &mut ConversationState, url: &str, now: Instant) {
        state.set_endpoint(url);
        tracing::info!(endpoint = url, "webhook URL updated");
        self.push(
            state,
            MessageRole::System,
            format!("Webhook URL updated: {url}"),
            now,
        );
        state.set_status(ConnectionStatus::Connected);
    }

    pub fn show_help(&mut self, state: &mut ConversationState, now: Instant) {
        for line in HELP_LINES {
            self.push(state, MessageRole::System, line.to_owned(), now);
        }
    }

    /// Appends a system line, e.g. the startup banner.
    pub fn announce(&mut self, state: &mut ConversationState, text: impl Into<String>, now: Instant) {
        self.push(state, MessageRole::System, text.into(), now);
    }

    fn push(&self, state: &mut ConversationState, role: MessageRole, text: String, now: Instant) {
        let roll = rand::thread_rng().gen::<f64>();
        state.transcript_mut().push(ChatEntry {
            kind: EntryKind::Message(role),
            timestamp: format_timestamp(&Local::now()),
            text,
            glitch_until: glitch_deadline(
                roll,
                self.settings.glitch_chance,
                now,
                self.settings.glitch_length,
            ),
        });
    }

    fn push_typing(&self, state: &mut ConversationState, request_id: RequestId) {
        state.transcript_mut().push(ChatEntry {
            kind: EntryKind::Typing(request_id),
            timestamp: format_timestamp(&Local::now()),
            text: format!("{} is typing", self.settings.bot_name),
            glitch_until: None,
        });
    }
}

pub fn demo_reply(original: &str) -> String {
    format!(
        "Demo mode: I received your message \"{original}\". Please configure your N8N webhook URL."
    )
}
