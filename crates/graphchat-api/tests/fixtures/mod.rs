use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

use graphchat_api::{GraphqlClient, GraphqlConfig, QueryRequest};
use graphchat_types::Message;

/// Mock GraphQL endpoint for exercising `GraphqlClient`
pub struct QueryMockServer {
    server: MockServer,
}

impl QueryMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/graphql", self.server.uri())
    }

    /// Client pointed at this server with default settings
    pub fn client(&self) -> GraphqlClient {
        self.client_with(|_| {})
    }

    pub fn client_with(&self, configure: impl FnOnce(&mut GraphqlConfig)) -> GraphqlClient {
        let mut config = GraphqlConfig {
            endpoint: self.endpoint(),
            ..GraphqlConfig::default()
        };
        configure(&mut config);
        GraphqlClient::new(config).expect("client should build")
    }

    /// Answer every POST with `body`
    pub async fn mock_json(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer only requests whose variables carry `input`
    pub async fn mock_answer_for(&self, input: &str, answer: &str) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({ "variables": { "input": input } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "answer": answer }
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_status(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_raw(&self, body: &str) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_string(body),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_delayed(&self, delay: std::time::Duration, body: Value) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Bodies of every request the server has seen
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|req| serde_json::from_slice(&req.body).expect("request body should be JSON"))
            .collect()
    }
}

pub fn request(input: &str) -> QueryRequest {
    QueryRequest {
        input: input.to_string(),
        history: vec![Message::welcome(), Message::user(input)],
    }
}
