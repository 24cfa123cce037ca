use anyhow::{Context, Result};
use colored::Colorize;

use graphchat_api::GraphqlClient;
use graphchat_chat::ChatSession;
use graphchat_logging::ConversationLogger;

use crate::cli::Cli;
use crate::config::ClientConfig;

/// Application configuration derived from CLI arguments and environment
pub struct AppConfig {
    pub client_config: ClientConfig,
}

/// env_logger filter used when RUST_LOG is unset
pub fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Set up application configuration from CLI arguments
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let client_config = ClientConfig::from_cli(cli)?;
    log::debug!("resolved configuration: {:?}", client_config);

    Ok(AppConfig { client_config })
}

/// Build a fresh session talking to the configured endpoint
pub fn build_session(config: &ClientConfig) -> Result<ChatSession<GraphqlClient>> {
    let client = GraphqlClient::new(config.graphql_config())
        .context("Failed to build HTTP client")?;
    Ok(ChatSession::new(client))
}

/// Open the transcript logger when a log directory is configured.
///
/// A logger that cannot be opened only disables transcript logging.
pub async fn open_logger(config: &ClientConfig) -> Option<ConversationLogger> {
    let dir = config.log_dir.as_ref()?;
    match ConversationLogger::new(dir).await {
        Ok(logger) => {
            log::info!("writing transcript to {}", logger.file_path().display());
            Some(logger.with_endpoint(config.endpoint.as_str()))
        }
        Err(e) => {
            eprintln!("{} Logging disabled: {}", "⚠️".yellow(), e);
            None
        }
    }
}
