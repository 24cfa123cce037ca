//! Core types and structures for graphchat
//!
//! This crate provides the message model shared by every graphchat crate.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Identifier of the greeting that opens every session
pub const WELCOME_ID: &str = "welcome";

/// Greeting shown when a session starts
pub const WELCOME_TEXT: &str = "嗨，我是你的 AI 助手。告诉我你想讨论什么吧。";

/// Reply used when the endpoint answered without an `answer` field
pub const NO_REPLY_TEXT: &str = "AI 暂时没有回复，请稍后再试。";

/// Reply used when the request itself failed
pub const ERROR_REPLY_TEXT: &str = "出错了，我现在无法回复。请检查后端是否正在运行或者稍后再试。";

// ============================================================================
// Message Types
// ============================================================================

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Short label shown next to each message
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "你",
            Role::Assistant => "AI",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque message identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a message with a freshly generated id
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// The fixed greeting that opens a session
    pub fn welcome() -> Self {
        Self {
            id: MessageId::from(WELCOME_ID),
            role: Role::Assistant,
            content: WELCOME_TEXT.to_string(),
        }
    }
}
