//! UI layer: rendering and interaction entry points (TUI).

mod event_source;
mod frame_clock;
mod message_input;
mod message_rendering;
mod rain_view;
pub mod shell;
mod styles;
mod terminal;
mod view;

pub(crate) use event_source::CrosstermEventSource;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
