//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{chat_message::MessageRole, connection_status::ConnectionStatus};

// =============================================================================
// Rain styles
// =============================================================================

/// Green whose brightness follows the cell's remaining intensity.
pub fn rain_glyph_style(intensity: f32) -> Style {
    let green = (intensity.clamp(0.0, 1.0) * 255.0) as u8;
    Style::default().fg(Color::Rgb(0, green, 0)).bg(Color::Black)
}

pub fn rain_background_style() -> Style {
    Style::default().bg(Color::Black)
}

// =============================================================================
// Panel styles
// =============================================================================

pub fn panel_border_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::Black)
}

pub fn panel_title_style() -> Style {
    Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD)
}

pub fn panel_body_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::Black)
}

// =============================================================================
// Message list styles
// =============================================================================

pub fn timestamp_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn role_style(role: MessageRole) -> Style {
    match role {
        MessageRole::User => Style::default().fg(Color::White),
        MessageRole::Bot => Style::default().fg(Color::LightGreen),
        MessageRole::System => Style::default().fg(Color::Yellow),
    }
}

/// Decoration for a freshly added line during its glitch window.
pub fn glitch_style() -> Style {
    Style::default()
        .fg(Color::LightMagenta)
        .add_modifier(Modifier::REVERSED | Modifier::BOLD)
}

pub fn typing_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

// =============================================================================
// Input and status styles
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn status_style(status: ConnectionStatus) -> Style {
    let color = match status {
        ConnectionStatus::Connected => Color::Green,
        ConnectionStatus::Sending | ConnectionStatus::DemoMode => Color::Yellow,
        ConnectionStatus::Error => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn endpoint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
