//! Use case for turning typed text into an outbound webhook request.
//!
//! This module provides the `WebhookDispatcher` trait and `prepare_request`
//! for validating input and building the JSON payload the webhook expects.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::webhook::{OutboundRequest, RequestId, WebhookPayload};

/// Command to send one line of user text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub text: String,
}

impl SendMessageCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The trimmed text, or an error when nothing is left after trimming.
    pub fn validated_text(&self) -> Result<&str, SendMessageError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(SendMessageError::EmptyMessage);
        }
        Ok(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// Message text is empty after trimming whitespace.
    #[error("message is empty")]
    EmptyMessage,
}

/// Hands requests to whatever performs the HTTP round trip.
///
/// Dispatch never blocks; the result comes back later as an
/// `AppEvent::WebhookCompleted` carrying the same request id.
pub trait WebhookDispatcher {
    fn dispatch(&self, request: OutboundRequest);
}

impl<T: WebhookDispatcher + ?Sized> WebhookDispatcher for &T {
    fn dispatch(&self, request: OutboundRequest) {
        (*self).dispatch(request)
    }
}

impl<T: WebhookDispatcher + ?Sized> WebhookDispatcher for Box<T> {
    fn dispatch(&self, request: OutboundRequest) {
        (**self).dispatch(request)
    }
}

/// Builds the request for `command`.
///
/// # Errors
/// Returns `SendMessageError::EmptyMessage` if text is empty/whitespace.
pub fn prepare_request(
    id: RequestId,
    endpoint: &str,
    user: &str,
    command: &SendMessageCommand,
    now: DateTime<Utc>,
) -> Result<OutboundRequest, SendMessageError> {
    let text = command.validated_text()?;

    Ok(OutboundRequest {
        id,
        endpoint: endpoint.to_owned(),
        payload: WebhookPayload::new(text, user, now),
    })
}
