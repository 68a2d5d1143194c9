//! UI-agnostic conversation types
//!
//! This module contains the chat transcript shared by every front-end. The
//! transcript is append-only: entries are never edited, reordered or pruned.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Hello! I'm your coding assistant. Describe what you want to build and I'll generate the code for you.";

/// A chat message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    /// Wall-clock time as shown next to the bubble
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "You",
            ChatRole::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationLog {
    messages: Vec<ChatMessage>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that opens with the assistant greeting
    pub fn with_greeting() -> Self {
        let mut log = Self::new();
        log.push(ChatMessage::new(ChatRole::Assistant, GREETING));
        log
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::new(ChatRole::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::new(ChatRole::Assistant, content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Transcript as Markdown, one section per message
    pub fn to_markdown(&self) -> String {
        let mut lines: Vec<String> = vec!["# Conversation".to_string(), String::new()];

        for msg in &self.messages {
            lines.push(format!("## {} ({})", msg.role.label(), msg.time_label()));
            lines.push(String::new());
            lines.push(msg.content.clone());
            lines.push(String::new());
        }

        lines.join("\n")
    }
}
