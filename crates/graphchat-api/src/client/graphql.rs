use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use graphchat_logging::safe_truncate;

use crate::client::{QueryRequest, Reply, Transport};
use crate::error::TransportError;

/// Default query endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";

/// Default query document; the user input is bound to `$input`
pub const DEFAULT_QUERY: &str = "query getMsg($input: String) { answer(input: $input) }";

/// Longest response body kept in errors and logs
pub const MAX_BODY_CHARS: usize = 500;

/// Settings for `GraphqlClient`
#[derive(Debug, Clone)]
pub struct GraphqlConfig {
    pub endpoint: String,
    pub query: String,
    /// Also send the conversation as the `history` variable
    pub include_history: bool,
    /// No timeout when `None`
    pub timeout: Option<Duration>,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query: DEFAULT_QUERY.to_string(),
            include_history: false,
            timeout: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<HistoryEntry<'a>>>,
}

#[derive(Debug, Serialize)]
struct HistoryEntry<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: Option<String>,
}

/// Read an optional string field; null counts as absent.
fn string_field(value: Option<&Value>, name: &str) -> Result<Option<String>, TransportError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(TransportError::Malformed(format!(
            "expected `{}` to be a string, got {}",
            name,
            kind_of(other)
        ))),
    }
}

fn envelope_answer(body: &Map<String, Value>) -> Result<Option<String>, TransportError> {
    match body.get("data") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(data)) => string_field(data.get("answer"), "data.answer"),
        Some(other) => Err(TransportError::Malformed(format!(
            "expected `data` to be an object, got {}",
            kind_of(other)
        ))),
    }
}

/// Decode a response body into a `Reply`.
///
/// The answer is taken from the GraphQL envelope (`data.answer`) and falls
/// back to a bare top-level `answer`. Fields are only inspected once the
/// ones before them produced nothing, so a usable answer is never lost to
/// an odd field elsewhere in the body. A missing or empty answer is a
/// `Reply::NoAnswer` unless the body reports GraphQL errors.
pub fn decode_reply(body: &str) -> Result<Reply, TransportError> {
    let value: Value = serde_json::from_str(body)?;
    let body = match value {
        Value::Object(body) => body,
        other => {
            return Err(TransportError::Malformed(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            )))
        }
    };

    if let Some(answer) = envelope_answer(&body)?.filter(|a| !a.is_empty()) {
        return Ok(Reply::Answer(answer));
    }
    if let Some(answer) = string_field(body.get("answer"), "answer")?.filter(|a| !a.is_empty()) {
        return Ok(Reply::Answer(answer));
    }

    let errors = match body.get("errors") {
        None | Some(Value::Null) => Vec::new(),
        Some(errors) => serde_json::from_value::<Vec<GraphqlError>>(errors.clone())?,
    };
    if errors.is_empty() {
        return Ok(Reply::NoAnswer);
    }

    Err(TransportError::Graphql(
        errors
            .into_iter()
            .map(|e| e.message.unwrap_or_else(|| "unknown error".to_string()))
            .collect(),
    ))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// GraphQL-over-HTTP client for the query endpoint
pub struct GraphqlClient {
    config: GraphqlConfig,
    client: reqwest::Client,
}

impl GraphqlClient {
    pub fn new(config: GraphqlConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn build_request<'a>(&'a self, request: &'a QueryRequest) -> RequestBody<'a> {
        let history = self.config.include_history.then(|| {
            request
                .history
                .iter()
                .map(|msg| HistoryEntry {
                    role: msg.role.as_str(),
                    content: &msg.content,
                })
                .collect::<Vec<_>>()
        });

        RequestBody {
            query: &self.config.query,
            variables: Variables {
                input: &request.input,
                history,
            },
        }
    }
}

#[async_trait]
impl Transport for GraphqlClient {
    async fn query(&self, request: &QueryRequest) -> Result<Reply, TransportError> {
        let body = self.build_request(request);
        log::debug!(
            "POST {} (input: {} chars, history: {})",
            self.config.endpoint,
            request.input.chars().count(),
            body.variables.history.as_ref().map_or(0, Vec::len)
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: safe_truncate(&error_text, MAX_BODY_CHARS),
            });
        }

        let response_text = response.text().await?;
        log::trace!("response body: {}", safe_truncate(&response_text, MAX_BODY_CHARS));
        decode_reply(&response_text)
    }
}
