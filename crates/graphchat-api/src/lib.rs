//! Query endpoint communication for graphchat
//!
//! This crate provides the `Transport` seam and the GraphQL-over-HTTP client
//! that implements it.

pub mod client;
pub mod error;

pub use client::graphql::{decode_reply, GraphqlClient, GraphqlConfig, DEFAULT_ENDPOINT, MAX_BODY_CHARS, DEFAULT_QUERY};
pub use client::{QueryRequest, Reply, Transport};
pub use error::TransportError;
