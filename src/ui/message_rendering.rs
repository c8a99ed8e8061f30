//! Message list rendering logic.
//!
//! Each entry becomes one or more lines: the `[HH:MM:SS]` tag and text on the
//! first line, wrapped continuation lines indented under the text. Only the
//! tail that fits is shown, which keeps the newest entry in view.

use std::time::Instant;

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::chat_message::{ChatEntry, EntryKind, Transcript};

use super::styles;

/// Frames each ellipsis step stays on screen.
const ELLIPSIS_FRAMES: u64 = 10;
const ELLIPSIS_STEPS: [&str; 4] = ["", ".", "..", "..."];

pub fn transcript_lines(
    transcript: &Transcript,
    width: usize,
    frame: u64,
    now: Instant,
) -> Vec<Line<'static>> {
    transcript
        .entries()
        .flat_map(|entry| entry_lines(entry, width, frame, now))
        .collect()
}

/// The last `height` lines.
pub fn visible_tail(lines: Vec<Line<'static>>, height: usize) -> Vec<Line<'static>> {
    let skip = lines.len().saturating_sub(height);
    lines.into_iter().skip(skip).collect()
}

pub fn typing_ellipsis(frame: u64) -> &'static str {
    ELLIPSIS_STEPS[((frame / ELLIPSIS_FRAMES) % ELLIPSIS_STEPS.len() as u64) as usize]
}

fn entry_lines(entry: &ChatEntry, width: usize, frame: u64, now: Instant) -> Vec<Line<'static>> {
    let (text, style) = match entry.kind {
        EntryKind::Message(role) => {
            let style = if entry.is_glitching(now) {
                styles::glitch_style()
            } else {
                styles::role_style(role)
            };
            (entry.text.clone(), style)
        }
        EntryKind::Typing(_) => (
            format!("{}{}", entry.text, typing_ellipsis(frame)),
            styles::typing_style(),
        ),
    };

    let prefix_width = entry.timestamp.width() + 1;
    let text_width = width.saturating_sub(prefix_width).max(1);
    let indent = " ".repeat(prefix_width);

    wrap_text(&text, text_width)
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            let lead = if index == 0 {
                Span::styled(format!("{} ", entry.timestamp), styles::timestamp_style())
            } else {
                Span::raw(indent.clone())
            };
            Line::from(vec![lead, Span::styled(chunk, style)])
        })
        .collect()
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in raw_line.split(' ') {
            let word_width = word.width();
            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + 1 + word_width
            };

            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                    current_width += 1;
                }
                current.push_str(word);
                current_width += word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{chat_message::MessageRole, webhook::RequestId};

    fn line_to_string(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn entry(kind: EntryKind, text: &str) -> ChatEntry {
        ChatEntry {
            kind,
            timestamp: "[12:00:01]".to_owned(),
            text: text.to_owned(),
            glitch_until: None,
        }
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap_text("hello world", 5), vec!["hello", "world"]);
        assert_eq!(wrap_text("a b c", 10), vec!["a b c"]);
    }

    #[test]
    fn splits_words_longer_than_width() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn keeps_explicit_newlines_and_empty_text() {
        assert_eq!(wrap_text("one\ntwo", 10), vec!["one", "two"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn message_line_starts_with_timestamp() {
        let mut transcript = Transcript::default();
        transcript.push(entry(EntryKind::Message(MessageRole::Bot), "hello"));

        let lines = transcript_lines(&transcript, 40, 0, Instant::now());

        assert_eq!(lines.len(), 1);
        assert_eq!(line_to_string(&lines[0]), "[12:00:01] hello");
    }

    #[test]
    fn continuation_lines_are_indented_under_text() {
        let mut transcript = Transcript::default();
        transcript.push(entry(EntryKind::Message(MessageRole::User), "aaaa bbbb"));

        let lines = transcript_lines(&transcript, 15, 0, Instant::now());

        assert_eq!(lines.len(), 2);
        assert_eq!(line_to_string(&lines[1]), "           bbbb");
    }

    #[test]
    fn typing_line_animates_ellipsis() {
        let mut transcript = Transcript::default();
        transcript.push(entry(EntryKind::Typing(RequestId::new(1)), "N8N Bot is typing"));

        let still = transcript_lines(&transcript, 60, 0, Instant::now());
        let moving = transcript_lines(&transcript, 60, 25, Instant::now());

        assert_eq!(line_to_string(&still[0]), "[12:00:01] N8N Bot is typing");
        assert_eq!(line_to_string(&moving[0]), "[12:00:01] N8N Bot is typing..");
    }

    #[test]
    fn glitching_entry_uses_glitch_style() {
        let now = Instant::now();
        let mut glitched = entry(EntryKind::Message(MessageRole::Bot), "zap");
        glitched.glitch_until = Some(now + Duration::from_millis(300));
        let mut transcript = Transcript::default();
        transcript.push(glitched);

        let lines = transcript_lines(&transcript, 40, 0, now);

        assert_eq!(lines[0].spans[1].style, styles::glitch_style());
    }

    #[test]
    fn tail_keeps_newest_lines() {
        let lines: Vec<Line<'static>> = (0..5).map(|n| Line::from(n.to_string())).collect();

        let tail = visible_tail(lines, 2);

        assert_eq!(
            tail.iter().map(line_to_string).collect::<Vec<_>>(),
            vec!["3", "4"]
        );
    }
}
