use anyhow::{bail, Result};

use graphchat_chat::SubmitOutcome;

use crate::app::setup::{build_session, open_logger, AppConfig};

/// Send one message, print the reply to stdout and return.
pub async fn run_task_mode(config: &AppConfig, text: &str) -> Result<()> {
    let mut session = build_session(&config.client_config)?;
    let mut logger = open_logger(&config.client_config).await;

    let before = session.messages().len();
    match session.submit(text).await {
        SubmitOutcome::Replied(reply) => {
            if let Some(logger) = logger.as_mut() {
                logger.log_all(&session.messages()[before..]).await;
            }
            println!("{}", reply.content);
            Ok(())
        }
        SubmitOutcome::Rejected => bail!("message is empty"),
    }
}
