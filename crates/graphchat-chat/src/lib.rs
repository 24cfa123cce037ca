//! Conversation state and submission flow for graphchat
//!
//! `ChatSession` owns the transcript and the single-flight gate; `ChatView`
//! projects a session into what a front end shows.

pub mod session;
pub mod store;
pub mod view;

pub use session::{reply_text, ChatSession, SubmitOutcome};
pub use store::ConversationStore;
pub use view::{ChatView, MessageView};

pub use graphchat_api::QueryRequest as PendingRequest;
