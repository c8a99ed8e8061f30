//! Domain layer: core entities and business rules.

pub mod chat_message;
pub mod connection_status;
pub mod conversation_state;
pub mod events;
pub mod message_input_state;
pub mod rain;
pub mod reply;
pub mod shell_state;
pub mod webhook;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
