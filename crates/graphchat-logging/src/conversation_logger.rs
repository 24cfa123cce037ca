use anyhow::Result;
use chrono::Local;
use graphchat_types::Message;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO‑8601 Local time
    id: &'a str,
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<&'a str>,
}

/// Appends every message of a session to a JSONL transcript
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
    endpoint: Option<String>,
}

impl ConversationLogger {
    /// Create a new logger; generates the file name based on the current local time.
    pub async fn new(workspace: &Path) -> Result<Self> {
        let logs_dir = workspace.join("logs");
        fs::create_dir_all(&logs_dir).await?;

        let now_local = Local::now();
        let filename = format!(
            "gchat-{}.jsonl",
            now_local.format("%Y-%m-%d-%H%M%S%.3f")
        );
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self { file_path, file: Some(file), endpoint: None })
    }

    /// Record the endpoint the session talks to on every entry
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append a single message.
    ///
    /// Write failures are reported once and then disable the logger; the
    /// conversation itself never depends on the transcript.
    pub async fn log(&mut self, message: &Message) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            id: message.id.as_str(),
            role: message.role.as_str(),
            content: &message.content,
            endpoint: self.endpoint.as_deref(),
        };

        let line = match serde_json::to_string(&entry) {
            Ok(json) => json + "\n",
            Err(e) => {
                log::warn!("failed to serialize log entry: {}", e);
                return;
            }
        };

        if let Some(file) = self.file.as_mut() {
            let result = async {
                file.write_all(line.as_bytes()).await?;
                file.flush().await
            }
            .await;

            if let Err(e) = result {
                log::warn!(
                    "transcript logging disabled, write to {} failed: {}",
                    self.file_path.display(),
                    e
                );
                self.file = None;
            }
        }
    }

    /// Append several messages in order
    pub async fn log_all<'a>(&mut self, messages: impl IntoIterator<Item = &'a Message>) {
        for message in messages {
            self.log(message).await;
        }
    }
}
