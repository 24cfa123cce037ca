use clap::Parser;
use std::path::PathBuf;

use graphchat_api::{DEFAULT_ENDPOINT, DEFAULT_QUERY};

/// CLI arguments for graphchat
#[derive(Parser, Debug)]
#[command(name = "graphchat")]
#[command(about = "Terminal chat client for a GraphQL answer endpoint")]
#[command(version)]
pub struct Cli {
    /// Query endpoint (e.g., http://localhost:4000/graphql)
    #[arg(long, value_name = "URL", env = "GRAPHCHAT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// GraphQL document sent with every message; the input is bound to `$input`
    #[arg(long, value_name = "DOC", env = "GRAPHCHAT_QUERY", default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Also send the conversation so far as the `$history` variable
    #[arg(long)]
    pub include_history: bool,

    /// Give up on a request after this many seconds (0 waits forever)
    #[arg(long, value_name = "SECONDS", env = "GRAPHCHAT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Append the conversation as JSONL under <PATH>/logs
    #[arg(long, value_name = "PATH", env = "GRAPHCHAT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Send a single message, print the reply and exit
    #[arg(short, long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Show debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}
