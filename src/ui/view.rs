use std::time::Instant;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::domain::{conversation_state::ConversationState, shell_state::ShellState};

use super::{
    message_input::render_message_input,
    message_rendering::{transcript_lines, visible_tail},
    rain_view::RainWidget,
    styles,
};

const PANEL_TITLE: &str = " MATRIX TERMINAL ";
const MIN_PANEL_WIDTH: u16 = 30;
const MAX_PANEL_WIDTH: u16 = 100;
const MIN_PANEL_HEIGHT: u16 = 10;

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    let area = frame.area();
    frame.render_widget(RainWidget::new(state.rain()), area);

    let panel = centered_panel(area);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::panel_border_style())
        .style(styles::panel_body_style())
        .title(Line::from(Span::styled(
            PANEL_TITLE,
            styles::panel_title_style(),
        )));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let [messages_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_messages(frame, messages_area, state);
    render_message_input(frame, input_area, state.input());
    frame.render_widget(
        Paragraph::new(status_line(state.conversation())),
        status_area,
    );
}

fn render_messages(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let lines = transcript_lines(
        state.conversation().transcript(),
        usize::from(area.width),
        state.frame(),
        Instant::now(),
    );
    let visible = visible_tail(lines, usize::from(area.height));
    frame.render_widget(Paragraph::new(visible), area);
}

fn status_line(conversation: &ConversationState) -> Line<'static> {
    let status = conversation.status();
    Line::from(vec![
        Span::raw("STATUS: "),
        Span::styled(status.as_label(), styles::status_style(status)),
        Span::raw("  "),
        Span::styled(conversation.endpoint().to_owned(), styles::endpoint_style()),
    ])
}

/// Chat panel rectangle centered over the rain.
fn centered_panel(area: Rect) -> Rect {
    let width = ((u32::from(area.width) * 4 / 5) as u16)
        .max(area.width.min(MIN_PANEL_WIDTH))
        .min(MAX_PANEL_WIDTH.min(area.width));
    let height = ((u32::from(area.height) * 4 / 5) as u16).max(area.height.min(MIN_PANEL_HEIGHT));

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
