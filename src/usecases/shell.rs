use std::time::Instant;

use anyhow::Result;

use crate::domain::{
    events::{AppEvent, KeyInput},
    shell_state::ShellState,
};

use super::{
    contracts::ShellOrchestrator,
    conversation::ConversationController,
    send_message::{SendMessageError, WebhookDispatcher},
};

pub struct DefaultShellOrchestrator<D>
where
    D: WebhookDispatcher,
{
    state: ShellState,
    conversation: ConversationController<D>,
}

impl<D> DefaultShellOrchestrator<D>
where
    D: WebhookDispatcher,
{
    pub fn new(state: ShellState, conversation: ConversationController<D>) -> Self {
        Self {
            state,
            conversation,
        }
    }

    fn on_tick(&mut self, now: Instant) {
        self.state.rain_mut().step(&mut rand::thread_rng());
        self.state.advance_frame();
        self.conversation
            .poll_deferred(self.state.conversation_mut(), now);
    }

    fn on_key(&mut self, key: KeyInput, now: Instant) {
        if (key.ctrl && key.key == "/") || key.key == "f1" {
            self.conversation
                .show_help(self.state.conversation_mut(), now);
            return;
        }

        match key.key.as_str() {
            "enter" => {
                let Some(line) = self.state.input_mut().take_submission() else {
                    return;
                };
                match self
                    .conversation
                    .handle_line(self.state.conversation_mut(), &line, now)
                {
                    Ok(outcome) => tracing::debug!(?outcome, "submitted line handled"),
                    Err(SendMessageError::EmptyMessage) => {}
                }
            }
            "esc" => self.state.input_mut().clear(),
            "backspace" => self.state.input_mut().delete_char_before(),
            "delete" => self.state.input_mut().delete_char_at(),
            "left" => self.state.input_mut().move_cursor_left(),
            "right" => self.state.input_mut().move_cursor_right(),
            "home" => self.state.input_mut().move_cursor_home(),
            "end" => self.state.input_mut().move_cursor_end(),
            _ => {
                if let Some(ch) = key.printable() {
                    self.state.input_mut().insert_char(ch);
                }
            }
        }
    }
}

impl<D> ShellOrchestrator for DefaultShellOrchestrator<D>
where
    D: WebhookDispatcher,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        let now = Instant::now();
        match event {
            AppEvent::Tick => self.on_tick(now),
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::Resized { width, height } => {
                tracing::debug!(width, height, "surface resized");
                self.state
                    .rain_mut()
                    .resize(width, height, &mut rand::thread_rng());
            }
            AppEvent::InputKey(key) => self.on_key(key, now),
            AppEvent::WebhookCompleted {
                request_id,
                outcome,
            } => {
                self.conversation.complete(
                    self.state.conversation_mut(),
                    request_id,
                    outcome,
                    now,
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    use super::*;
    use crate::{
        domain::{
            chat_message::{MessageRole, Transcript},
            connection_status::ConnectionStatus,
            conversation_state::ConversationState,
            rain::{RainField, RainSettings},
            reply::ReplyPayload,
            webhook::{RequestId, WebhookError},
        },
        infra::stubs::RecordingDispatcher,
        usecases::conversation::ChatSettings,
    };

    fn orchestrator(dispatcher: &RecordingDispatcher) -> DefaultShellOrchestrator<&RecordingDispatcher> {
        let rain = RainField::new(
            40,
            10,
            RainSettings::default(),
            &mut StdRng::seed_from_u64(3),
        );
        let conversation = ConversationState::new("http://localhost:8000/webhook", Transcript::default());
        let settings = ChatSettings {
            glitch_chance: 0.0,
            fallback_delay: Duration::ZERO,
            ..ChatSettings::default()
        };
        DefaultShellOrchestrator::new(
            ShellState::new(rain, conversation),
            ConversationController::new(dispatcher, settings),
        )
    }

    fn type_text(orchestrator: &mut DefaultShellOrchestrator<&RecordingDispatcher>, text: &str) {
        for ch in text.chars() {
            orchestrator
                .handle_event(AppEvent::InputKey(KeyInput::new(ch.to_string(), false)))
                .expect("key handled");
        }
    }

    fn press(orchestrator: &mut DefaultShellOrchestrator<&RecordingDispatcher>, key: &str, ctrl: bool) {
        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new(key, ctrl)))
            .expect("key handled");
    }

    #[test]
    fn stops_on_quit_event() {
        let dispatcher = RecordingDispatcher::default();
        let mut orchestrator = orchestrator(&dispatcher);

        orchestrator
            .handle_event(AppEvent::QuitRequested)
            .expect("event must be handled");

        assert!(!orchestrator.state().is_running());
    }

    #[test]
    fn enter_sends_typed_text_and_clears_field() {
        let dispatcher = RecordingDispatcher::default();
        let mut orchestrator = orchestrator(&dispatcher);

        type_text(&mut orchestrator, "hello");
        press(&mut orchestrator, "enter", false);

        assert!(orchestrator.state().input().is_empty());
        assert_eq!(dispatcher.requests().len(), 1);
        assert_eq!(dispatcher.requests()[0].payload.message, "hello");
        assert_eq!(
            orchestrator.state().conversation().status(),
            ConnectionStatus::Sending
        );
    }

    #[test]
    fn enter_on_blank_field_does_nothing() {
        let dispatcher = RecordingDispatcher::default();
        let mut orchestrator = orchestrator(&dispatcher);
        type_text(&mut orchestrator, "   ");
        let before = orchestrator.state().conversation().clone();

        press(&mut orchestrator, "enter", false);

        assert!(dispatcher.requests().is_empty());
        assert_eq!(orchestrator.state().conversation(), &before);
        assert_eq!(orchestrator.state().input().text(), "   ");
    }

    #[test]
    fn escape_clears_the_field() {
        let dispatcher = RecordingDispatcher::default();
        let mut orchestrator = orchestrator(&dispatcher);
        type_text(&mut orchestrator, "draft");

        press(&mut orchestrator, "esc", false);

        assert!(orchestrator.state().input().is_empty());
    }

    #[test]
    fn ctrl_slash_prints_help() {
        let dispatcher = RecordingDispatcher::default();
        let mut orchestrator = orchestrator(&dispatcher);

        press(&mut orchestrator, "/", true);

        assert_eq!(orchestrator.state().conversation().transcript().len(), 4);
        assert!(orchestrator.state().input().is_empty());
    }

    #[test]
    fn failed_completion_turns_into_demo_mode_on_next_tick() {
        let dispatcher = RecordingDispatcher::default();
        let mut orchestrator = orchestrator(&dispatcher);
        type_text(&mut orchestrator, "anyone there");
        press(&mut orchestrator, "enter", false);
        let request_id = dispatcher.requests()[0].id;

        orchestrator
            .handle_event(AppEvent::WebhookCompleted {
                request_id,
                outcome: Err(WebhookError::Transport("connection refused".to_owned())),
            })
            .expect("completion handled");
        assert_eq!(
            orchestrator.state().conversation().status(),
            ConnectionStatus::Error
        );

        orchestrator
            .handle_event(AppEvent::Tick)
            .expect("tick handled");

        let conversation = orchestrator.state().conversation();
        assert_eq!(conversation.status(), ConnectionStatus::DemoMode);
        let (role, text) = conversation
            .transcript()
            .messages()
            .last()
            .expect("demo reply rendered");
        assert_eq!(role, MessageRole::Bot);
        assert!(text.contains("anyone there"));
    }

    #[test]
    fn successful_completion_renders_reply() {
        let dispatcher = RecordingDispatcher::default();
        let mut orchestrator = orchestrator(&dispatcher);
        type_text(&mut orchestrator, "hi");
        press(&mut orchestrator, "enter", false);

        orchestrator
            .handle_event(AppEvent::WebhookCompleted {
                request_id: RequestId::new(1),
                outcome: Ok(ReplyPayload::from(json!({"text": "hello"}))),
            })
            .expect("completion handled");

        let conversation = orchestrator.state().conversation();
        assert_eq!(conversation.status(), ConnectionStatus::Connected);
        assert_eq!(
            conversation.transcript().messages().last(),
            Some((MessageRole::Bot, "hello"))
        );
    }

    #[test]
    fn resize_rebuilds_rain_columns() {
        let dispatcher = RecordingDispatcher::default();
        let mut orchestrator = orchestrator(&dispatcher);

        orchestrator
            .handle_event(AppEvent::Resized {
                width: 101,
                height: 30,
            })
            .expect("resize handled");

        assert_eq!(orchestrator.state().rain().cursors().len(), 50);
        assert_eq!(orchestrator.state().rain().height(), 30);
    }

    #[test]
    fn tick_advances_frame_counter() {
        let dispatcher = RecordingDispatcher::default();
        let mut orchestrator = orchestrator(&dispatcher);

        orchestrator.handle_event(AppEvent::Tick).expect("tick");
        orchestrator.handle_event(AppEvent::Tick).expect("tick");

        assert_eq!(orchestrator.state().frame(), 2);
    }
}
