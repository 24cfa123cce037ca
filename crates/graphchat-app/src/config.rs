use anyhow::{bail, Context, Result};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

use graphchat_api::GraphqlConfig;

use crate::cli::Cli;

/// Path appended when the endpoint URL has none
pub const DEFAULT_GRAPHQL_PATH: &str = "/graphql";

/// Client configuration resolved from CLI flags, environment and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub query: String,
    pub include_history: bool,
    pub timeout: Option<Duration>,
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Precedence: CLI flags > GRAPHCHAT_* env (.env included) > defaults.
    /// clap resolves the first two, this only validates.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let endpoint = normalize_endpoint(&cli.endpoint)?;

        let query = cli.query.trim();
        if query.is_empty() {
            bail!("query document must not be empty");
        }

        Ok(Self {
            endpoint,
            query: query.to_string(),
            include_history: cli.include_history,
            timeout: cli.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs),
            log_dir: cli.log_dir.clone(),
        })
    }

    pub fn graphql_config(&self) -> GraphqlConfig {
        GraphqlConfig {
            endpoint: self.endpoint.clone(),
            query: self.query.clone(),
            include_history: self.include_history,
            timeout: self.timeout,
        }
    }
}

/// Normalize an endpoint URL: default the scheme to http, drop a trailing
/// slash and use `/graphql` when no path is given.
pub fn normalize_endpoint(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        bail!("endpoint must not be empty");
    }

    let with_scheme = if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    };

    let mut parsed = Url::parse(&with_scheme)
        .with_context(|| format!("invalid endpoint URL: {}", url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("unsupported endpoint scheme '{}' (use http or https)", parsed.scheme());
    }

    let path = parsed.path().trim_end_matches('/').to_string();
    if path.is_empty() {
        parsed.set_path(DEFAULT_GRAPHQL_PATH);
    } else {
        parsed.set_path(&path);
    }

    Ok(parsed.to_string())
}
