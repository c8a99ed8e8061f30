use std::{
    sync::mpsc::Receiver,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput},
    usecases::contracts::AppEventSource,
};

use super::frame_clock::FrameClock;

/// Merges terminal input, frame ticks, and webhook completions into one
/// stream for the shell loop.
pub struct CrosstermEventSource {
    completions: Receiver<AppEvent>,
    frames: FrameClock,
}

impl CrosstermEventSource {
    pub fn new(completions: Receiver<AppEvent>, frame_interval: Duration) -> Self {
        Self {
            completions,
            frames: FrameClock::new(frame_interval, Instant::now()),
        }
    }
}

impl AppEventSource for CrosstermEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if let Ok(event) = self.completions.try_recv() {
            return Ok(Some(event));
        }

        let now = Instant::now();
        if self.frames.is_due(now) {
            self.frames.mark(now);
            return Ok(Some(AppEvent::Tick));
        }

        if !event::poll(self.frames.until_next(now))? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key) => map_key_event(key),
            Event::Resize(width, height) => Some(AppEvent::Resized { width, height }),
            _ => None,
        })
    }
}

pub fn map_key_event(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Windows reports AltGr as Ctrl+Alt; those chars are typed text.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);
    let name = match key.code {
        KeyCode::Char('c') if ctrl => return Some(AppEvent::QuitRequested),
        // Legacy terminals report Ctrl+/ as Ctrl+7 or Ctrl+_.
        KeyCode::Char('7' | '_') if ctrl => "/".to_owned(),
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => "enter".to_owned(),
        KeyCode::Esc => "esc".to_owned(),
        KeyCode::Backspace => "backspace".to_owned(),
        KeyCode::Delete => "delete".to_owned(),
        KeyCode::Left => "left".to_owned(),
        KeyCode::Right => "right".to_owned(),
        KeyCode::Home => "home".to_owned(),
        KeyCode::End => "end".to_owned(),
        KeyCode::F(1) => "f1".to_owned(),
        _ => return None,
    };

    Some(AppEvent::InputKey(KeyInput::new(name, ctrl)))
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}
