//! graphchat application library
//!
//! CLI parsing, configuration and the terminal front end.

pub use graphchat_api as api;
pub use graphchat_chat as chat;
pub use graphchat_types::{self as types, Message, Role};

pub mod app;
pub mod cli;
pub mod config;
pub mod render;

pub use app::{default_log_filter, run_repl_mode, run_task_mode, setup_from_cli, AppConfig};
pub use cli::Cli;
pub use config::{normalize_endpoint, ClientConfig};
