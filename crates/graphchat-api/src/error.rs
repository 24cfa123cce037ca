use thiserror::Error;

/// Failures of a single transport call
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout or body read failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response payload: {0}")]
    Malformed(String),

    /// The endpoint answered with GraphQL errors and no answer
    #[error("query rejected: {}", .0.join("; "))]
    Graphql(Vec<String>),
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Malformed(e.to_string())
    }
}
