//! Presentation layers

use super::{Lifetime, Message, Presentation};

/// Writes messages to the log
#[derive(Debug, Clone, Default)]
pub struct ConsolePresenter;

impl Presentation for ConsolePresenter {
    fn show_message(&mut self, message: Message) {
        match message.lifetime {
            Lifetime::Permanent(id) => {
                tracing::info!("[{} #{}] {}", message.color.name(), id, message.text)
            }
            Lifetime::Ttl(_) => tracing::info!("[{}] {}", message.color.name(), message.text),
        }
    }
}

/// Collects messages in memory
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }
}

impl Presentation for MessageLog {
    fn show_message(&mut self, message: Message) {
        // a permanent message replaces the previous one with the same id
        if let Lifetime::Permanent(id) = message.lifetime {
            self.messages
                .retain(|m| m.lifetime != Lifetime::Permanent(id));
        }
        self.messages.push(message);
    }
}
