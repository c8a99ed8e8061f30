use super::{
    conversation_state::ConversationState, message_input_state::MessageInputState,
    rain::RainField,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ShellState {
    running: bool,
    frame: u64,
    rain: RainField,
    input: MessageInputState,
    conversation: ConversationState,
}

impl ShellState {
    pub fn new(rain: RainField, conversation: ConversationState) -> Self {
        Self {
            running: true,
            frame: 0,
            rain,
            input: MessageInputState::default(),
            conversation,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Frames rendered so far; drives the typing ellipsis.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn advance_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn rain(&self) -> &RainField {
        &self.rain
    }

    pub fn rain_mut(&mut self) -> &mut RainField {
        &mut self.rain
    }

    pub fn input(&self) -> &MessageInputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut MessageInputState {
        &mut self.input
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut ConversationState {
        &mut self.conversation
    }
}
