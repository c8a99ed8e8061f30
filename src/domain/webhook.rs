use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use super::reply::ReplyPayload;

/// Endpoint value that means "nobody configured a webhook yet".
pub const UNCONFIGURED_WEBHOOK_URL: &str = "YOUR_N8N_WEBHOOK_URL_HERE";

/// Identity of one send, used to pair a completion with its typing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub message: String,
    pub timestamp: String,
    pub user: String,
}

impl WebhookPayload {
    pub fn new(message: impl Into<String>, user: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            user: user.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub id: RequestId,
    pub endpoint: String,
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("N8N webhook URL not configured")]
    NotConfigured,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

impl WebhookError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "WEBHOOK_NOT_CONFIGURED",
            Self::Transport(_) => "WEBHOOK_TRANSPORT",
            Self::Status(_) => "WEBHOOK_HTTP_STATUS",
            Self::MalformedBody(_) => "WEBHOOK_MALFORMED_BODY",
        }
    }
}

pub type WebhookOutcome = Result<ReplyPayload, WebhookError>;

pub fn is_configured(endpoint: &str) -> bool {
    endpoint != UNCONFIGURED_WEBHOOK_URL
}
