//! Webhook reply shapes and reply-text extraction.

use serde_json::{Map, Value};

use super::webhook::WebhookError;

/// Shown when a reply arrives but carries nothing displayable.
pub const GENERIC_ACKNOWLEDGEMENT: &str = "Response received from N8N chatbot.";

/// A parsed webhook response body, classified by its top-level shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyPayload {
    /// `{"text": ...}`, `{"message": ...}` or any other object.
    Object(Map<String, Value>),
    /// `[{"text": ...}, ...]` as n8n returns for multi-item outputs.
    Sequence(Vec<Value>),
    /// A bare JSON string.
    Text(String),
    /// Numbers, booleans and null.
    Other(Value),
}

impl From<Value> for ReplyPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::Object(fields),
            Value::Array(items) => Self::Sequence(items),
            Value::String(text) => Self::Text(text),
            other => Self::Other(other),
        }
    }
}

impl ReplyPayload {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(body).map(Self::from)
    }

    /// Parses a response body and rejects shapes text extraction cannot
    /// read: a sequence whose first item is `null`.
    pub fn from_body(body: &str) -> Result<Self, WebhookError> {
        let reply =
            Self::parse(body).map_err(|error| WebhookError::MalformedBody(error.to_string()))?;

        if let Self::Sequence(items) = &reply {
            if items.first().is_some_and(Value::is_null) {
                return Err(WebhookError::MalformedBody(
                    "first reply item is null".to_owned(),
                ));
            }
        }

        Ok(reply)
    }

    /// Text to render for this reply.
    ///
    /// Precedence: object `text`, first sequence item's `text`, object
    /// `message`, bare string, then [`GENERIC_ACKNOWLEDGEMENT`].
    pub fn reply_text(&self) -> String {
        self.extract_text()
            .unwrap_or_else(|| GENERIC_ACKNOWLEDGEMENT.to_owned())
    }

    fn extract_text(&self) -> Option<String> {
        match self {
            Self::Object(fields) => {
                present_text(fields.get("text")).or_else(|| present_text(fields.get("message")))
            }
            Self::Sequence(items) => items
                .first()
                .and_then(|first| present_text(first.get("text"))),
            Self::Text(text) => (!text.is_empty()).then(|| text.clone()),
            Self::Other(_) => None,
        }
    }
}

/// Treats null, false, zero and empty strings as absent.
fn present_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
