use graphchat_api::{QueryRequest, Reply, Transport, TransportError};
use graphchat_types::{Message, ERROR_REPLY_TEXT, NO_REPLY_TEXT};

use crate::store::ConversationStore;

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input or a call already in flight; nothing was appended
    Rejected,
    /// The assistant message appended when the call resolved
    Replied(Message),
}

/// Text of the assistant message produced by a transport outcome
pub fn reply_text(outcome: &Result<Reply, TransportError>) -> String {
    match outcome {
        Ok(Reply::Answer(answer)) => answer.clone(),
        Ok(Reply::NoAnswer) => NO_REPLY_TEXT.to_string(),
        Err(_) => ERROR_REPLY_TEXT.to_string(),
    }
}

/// One conversation: transcript, draft input and the in-flight gate.
///
/// At most one transport call is outstanding at a time. Submissions made
/// while one is pending are rejected rather than queued.
pub struct ChatSession<T> {
    store: ConversationStore,
    input: String,
    is_sending: bool,
    transport: T,
}

impl<T: Transport> ChatSession<T> {
    /// Start a session seeded with the greeting
    pub fn new(transport: T) -> Self {
        Self::with_store(transport, ConversationStore::with_greeting())
    }

    pub fn with_store(transport: T, store: ConversationStore) -> Self {
        Self {
            store,
            input: String::new(),
            is_sending: false,
            transport,
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    pub fn can_submit(&self) -> bool {
        !self.is_sending && !self.input.trim().is_empty()
    }

    /// Validate `text`, append the user message and raise the in-flight flag.
    ///
    /// Returns the request to hand to the transport, or `None` when the text
    /// is blank or a call is already pending. A `None` leaves the session
    /// untouched.
    pub fn begin_submission(&mut self, text: &str) -> Option<QueryRequest> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.is_sending {
            return None;
        }

        self.store.append(Message::user(trimmed));
        self.input.clear();
        self.is_sending = true;

        Some(QueryRequest {
            input: trimmed.to_string(),
            history: self.store.messages().to_vec(),
        })
    }

    /// Append the assistant message for a finished call and lower the flag.
    pub fn complete_submission(&mut self, outcome: Result<Reply, TransportError>) -> &Message {
        match &outcome {
            Ok(Reply::NoAnswer) => log::warn!("endpoint responded without an answer"),
            Err(e) => log::error!("transport call failed: {}", e),
            Ok(Reply::Answer(_)) => {}
        }

        self.store.append(Message::assistant(reply_text(&outcome)));
        self.is_sending = false;
        // The store cannot be empty right after an append
        &self.store.messages()[self.store.len() - 1]
    }

    /// Run a full submission: user message, transport call, assistant message.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        let Some(request) = self.begin_submission(text) else {
            log::debug!("submission rejected (sending: {})", self.is_sending);
            return SubmitOutcome::Rejected;
        };

        let outcome = self.transport.query(&request).await;
        SubmitOutcome::Replied(self.complete_submission(outcome).clone())
    }

    /// Submit the current draft input
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        let text = self.input.clone();
        self.submit(&text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ChatView;
    use async_trait::async_trait;
    use graphchat_types::Role;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Transport that replays scripted outcomes and records requests
    struct ScriptedTransport {
        replies: Mutex<Vec<Result<Reply, TransportError>>>,
        seen: Mutex<Vec<QueryRequest>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Result<Reply, TransportError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn answering(answer: &str) -> Self {
            Self::new(vec![Ok(Reply::Answer(answer.to_string()))])
        }

        fn seen(&self) -> Vec<QueryRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn query(&self, request: &QueryRequest) -> Result<Reply, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok(Reply::Answer("default".to_string())))
        }
    }

    fn contents<T: Transport>(session: &ChatSession<T>) -> Vec<(Role, String)> {
        session
            .messages()
            .iter()
            .map(|m| (m.role, m.content.clone()))
            .collect()
    }

    #[tokio::test]
    async fn submission_appends_user_then_assistant() {
        let mut session = ChatSession::new(ScriptedTransport::answering("hello"));
        let before = session.messages().len();

        let outcome = session.submit("  hi there  ").await;

        assert_eq!(session.messages().len(), before + 2);
        let added = &session.messages()[before..];
        assert_eq!(added[0].role, Role::User);
        assert_eq!(added[0].content, "hi there");
        assert_eq!(added[1].role, Role::Assistant);
        assert_eq!(added[1].content, "hello");
        assert_eq!(outcome, SubmitOutcome::Replied(added[1].clone()));
        assert!(!session.is_sending());
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        let mut session = ChatSession::new(ScriptedTransport::answering("unused"));
        let before = contents(&session);

        for text in ["", "   ", "\n\t "] {
            assert_eq!(session.submit(text).await, SubmitOutcome::Rejected);
        }

        assert_eq!(contents(&session), before);
        assert!(session.transport().seen().is_empty());
    }

    #[tokio::test]
    async fn submission_while_sending_is_rejected() {
        let mut session = ChatSession::new(ScriptedTransport::answering("unused"));
        let request = session.begin_submission("first").unwrap();
        assert!(session.is_sending());
        let during = contents(&session);

        assert!(session.begin_submission("second").is_none());
        assert_eq!(session.submit("third").await, SubmitOutcome::Rejected);
        assert_eq!(contents(&session), during);
        assert_eq!(request.input, "first");
    }

    #[tokio::test]
    async fn missing_answer_uses_placeholder() {
        let mut session = ChatSession::new(ScriptedTransport::new(vec![Ok(Reply::NoAnswer)]));
        session.submit("hi").await;
        assert_eq!(session.messages().last().unwrap().content, NO_REPLY_TEXT);
    }

    #[tokio::test]
    async fn transport_failure_becomes_error_message() {
        let failure = TransportError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        let mut session = ChatSession::new(ScriptedTransport::new(vec![Err(failure)]));

        let outcome = session.submit("hi").await;

        let last = session.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, ERROR_REPLY_TEXT);
        assert!(matches!(outcome, SubmitOutcome::Replied(_)));
        assert!(!session.is_sending());
    }

    #[tokio::test]
    async fn request_carries_trimmed_input_and_history() {
        let mut session = ChatSession::new(ScriptedTransport::answering("您好！"));
        session.submit(" 你好 ").await;

        let seen = session.transport().seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].input, "你好");
        let roles: Vec<Role> = seen[0].history.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User]);
        assert_eq!(seen[0].history[1].content, "你好");
    }

    #[tokio::test]
    async fn ids_stay_unique_and_order_is_preserved() {
        let replies = (0..20).map(|i| Ok(Reply::Answer(format!("reply {i}")))).collect();
        let mut session = ChatSession::new(ScriptedTransport::new(replies));

        for i in 0..20 {
            session.submit(&format!("question {i}")).await;
        }

        let ids: HashSet<_> = session.messages().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), session.messages().len());
        assert_eq!(session.messages().len(), 41);
        for i in 0..20 {
            assert_eq!(session.messages()[1 + 2 * i].content, format!("question {i}"));
            assert_eq!(session.messages()[2 + 2 * i].content, format!("reply {i}"));
        }
    }

    #[tokio::test]
    async fn draft_is_cleared_on_submit() {
        let mut session = ChatSession::new(ScriptedTransport::answering("ok"));
        session.set_input("  draft  ");
        assert!(session.can_submit());

        session.submit_draft().await;
        assert_eq!(session.input(), "");
        assert!(!session.can_submit());
        assert_eq!(session.messages()[1].content, "draft");
    }

    #[test]
    fn greeting_round_trip_shows_then_clears_pending() {
        let mut session = ChatSession::new(ScriptedTransport::answering("unused"));

        session.begin_submission("你好").unwrap();
        let view = ChatView::project(&session);
        assert!(view.is_pending());
        assert_eq!(view.messages.last().map(|m| (m.role, m.content)), Some((Role::User, "你好")));

        session.complete_submission(Ok(Reply::Answer("您好！".into())));
        let view = ChatView::project(&session);
        assert!(!view.is_pending());
        assert_eq!(view.messages.last().map(|m| (m.role, m.content)), Some((Role::Assistant, "您好！")));
    }

    #[test]
    fn reply_text_maps_every_outcome() {
        assert_eq!(reply_text(&Ok(Reply::Answer("hello".into()))), "hello");
        assert_eq!(reply_text(&Ok(Reply::NoAnswer)), NO_REPLY_TEXT);
        assert_eq!(
            reply_text(&Err(TransportError::Malformed("x".into()))),
            ERROR_REPLY_TEXT
        );
    }
}
