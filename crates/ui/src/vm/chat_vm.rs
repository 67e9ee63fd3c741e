use services::{ChatMessage, ChatRole};

pub const CHAT_GREETING: &str =
    "Hi! I'm here to help with your workplace English. Ask me anything.";

/// Chat widget state, independent of rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatVm {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub busy: bool,
}

impl Default for ChatVm {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(CHAT_GREETING)],
            input: String::new(),
            busy: false,
        }
    }
}

impl ChatVm {
    /// Append the typed message and return the conversation to send.
    ///
    /// Returns `None` for blank input or while a reply is pending.
    pub fn begin_send(&mut self) -> Option<Vec<ChatMessage>> {
        let text = self.input.trim();
        if text.is_empty() || self.busy {
            return None;
        }
        self.messages.push(ChatMessage::user(text));
        self.input.clear();
        self.busy = true;
        Some(self.messages.clone())
    }

    pub fn finish_send(&mut self, reply: Result<ChatMessage, String>) {
        let message = match reply {
            Ok(message) => message,
            Err(err) => ChatMessage::new(ChatRole::System, format!("Could not get a reply: {err}")),
        };
        self.messages.push(message);
        self.busy = false;
    }
}
