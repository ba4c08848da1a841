use std::fmt;

pub const GREETING: &str = "Hello! Describe the SVG you want to create, or upload an image to start. For example, try \"a simple sun with rays\".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Ai => f.write_str("ai"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// Attached image as a `data:` URI.
    pub image: Option<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, image: Option<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            image,
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            text: text.into(),
            image: None,
        }
    }

    /// Working notices ("Generating SVG from your description...") are the
    /// only AI messages that end up replaced.
    pub fn is_placeholder(&self) -> bool {
        self.role == Role::Ai && self.text.contains("...")
    }
}

/// Append-only transcript of the session.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting() -> Self {
        let mut conversation = Self::new();
        conversation.push(ChatMessage::ai(GREETING));
        conversation
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn push_user(&mut self, text: &str, image: Option<String>) {
        self.push(ChatMessage::user(text, image));
    }

    pub fn push_ai(&mut self, text: &str) {
        self.push(ChatMessage::ai(text));
    }

    /// Swaps out a trailing placeholder for `message`; appends otherwise.
    pub fn settle(&mut self, message: ChatMessage) {
        if self.messages.last().is_some_and(ChatMessage::is_placeholder) {
            self.messages.pop();
        }
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `role: text` lines, oldest first.
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
