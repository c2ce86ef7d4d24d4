//! Chat widget state: open flag plus an append-only transcript.

use std::sync::Arc;

use shared::domain::ChatMessage;

use crate::faq::FaqMatcher;

pub const GREETING: &str =
    "Привет! 👋 Чем могу помочь? Спроси про наши пончики, доставку или акции!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Toggle,
    Open,
    Close,
    Send(String),
}

/// Result of a dispatched `Send`: the bot reply that was appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub question: ChatMessage,
    pub reply: ChatMessage,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    matcher: Arc<FaqMatcher>,
    transcript: Vec<ChatMessage>,
    open: bool,
}

impl ChatSession {
    pub fn new(matcher: Arc<FaqMatcher>) -> Self {
        Self {
            matcher,
            transcript: vec![ChatMessage::bot(GREETING)],
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn dispatch(&mut self, command: ChatCommand) -> Option<ChatExchange> {
        match command {
            ChatCommand::Toggle => {
                self.open = !self.open;
                None
            }
            ChatCommand::Open => {
                self.open = true;
                None
            }
            ChatCommand::Close => {
                self.open = false;
                None
            }
            ChatCommand::Send(text) => self.send(text),
        }
    }

    fn send(&mut self, text: String) -> Option<ChatExchange> {
        if text.trim().is_empty() {
            return None;
        }

        let reply = ChatMessage::bot(self.matcher.answer(&text));
        let question = ChatMessage::user(text);
        self.transcript.push(question.clone());
        self.transcript.push(reply.clone());
        Some(ChatExchange { question, reply })
    }
}

#[cfg(test)]
#[path = "tests/chat_tests.rs"]
mod tests;
