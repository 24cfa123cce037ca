use graphchat_api::Transport;
use graphchat_types::{Message, MessageId, Role};

use crate::session::ChatSession;

pub const PLACEHOLDER_SENDING: &str = "AI 正在思考...";
pub const PLACEHOLDER_EMPTY: &str = "向 AI 说点什么";
pub const PLACEHOLDER_IDLE: &str = "按 Enter 发送";
pub const SENDING_NOTE: &str = "AI 正在生成回复...";
pub const SUBMIT_LABEL: &str = "发送";
pub const SUBMIT_LABEL_SENDING: &str = "发送中…";

/// One rendered message row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView<'a> {
    pub id: &'a MessageId,
    pub role: Role,
    pub label: &'static str,
    pub content: &'a str,
    /// Shows the typing indicator
    pub pending: bool,
}

/// Everything a front end needs to draw a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView<'a> {
    pub messages: Vec<MessageView<'a>>,
    /// Trailing note standing in for the reply being generated
    pub system_note: Option<&'static str>,
    pub placeholder: &'static str,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
}

impl<'a> ChatView<'a> {
    pub fn project<T: Transport>(session: &'a ChatSession<T>) -> Self {
        Self::from_parts(session.messages(), session.is_sending(), session.input())
    }

    /// Pure projection of a transcript, the in-flight flag and the draft
    pub fn from_parts(messages: &'a [Message], is_sending: bool, input: &str) -> Self {
        let last_index = messages.len().checked_sub(1);
        let messages = messages
            .iter()
            .enumerate()
            .map(|(index, message)| MessageView {
                id: &message.id,
                role: message.role,
                label: message.role.label(),
                content: &message.content,
                pending: is_sending
                    && message.role == Role::Assistant
                    && Some(index) == last_index,
            })
            .collect::<Vec<_>>();

        let placeholder = if is_sending {
            PLACEHOLDER_SENDING
        } else if messages.is_empty() {
            PLACEHOLDER_EMPTY
        } else {
            PLACEHOLDER_IDLE
        };

        Self {
            messages,
            system_note: is_sending.then_some(SENDING_NOTE),
            placeholder,
            submit_label: if is_sending { SUBMIT_LABEL_SENDING } else { SUBMIT_LABEL },
            submit_enabled: !is_sending && !input.trim().is_empty(),
        }
    }

    /// Whether any row or the trailing note shows progress
    pub fn is_pending(&self) -> bool {
        self.system_note.is_some() || self.messages.iter().any(|m| m.pending)
    }
}
