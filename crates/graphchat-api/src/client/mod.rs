use async_trait::async_trait;
use graphchat_types::Message;

use crate::error::TransportError;

pub mod graphql;

/// What a submission hands to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Trimmed text the user submitted
    pub input: String,
    /// Full conversation, ending with the user message for `input`
    pub history: Vec<Message>,
}

/// Decoded outcome of a successful call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    /// The endpoint responded but carried no usable answer
    NoAnswer,
}

/// A remote endpoint that answers one query per submission
#[async_trait]
pub trait Transport: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<Reply, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn query(&self, request: &QueryRequest) -> Result<Reply, TransportError> {
        (**self).query(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn query(&self, request: &QueryRequest) -> Result<Reply, TransportError> {
        (**self).query(request).await
    }
}
