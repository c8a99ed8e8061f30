//! Infrastructure layer: adapters for config, logging, HTTP, and OS integrations.

pub mod config;
pub mod contracts;
pub mod error;
pub mod logging;
pub mod panic_hook;
pub mod storage_layout;
#[cfg(test)]
pub mod stubs;
pub mod webhook;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
