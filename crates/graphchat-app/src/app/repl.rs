use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::time::Duration;

use graphchat_api::{QueryRequest, Reply, Transport, TransportError};
use graphchat_chat::{ChatSession, ChatView};
use graphchat_logging::ConversationLogger;

use crate::app::setup::{build_session, open_logger, AppConfig};
use crate::render;

const SPINNER_INTERVAL: Duration = Duration::from_millis(300);

/// What a line read at the prompt asks for
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Exit,
    History,
    /// Text to submit; `remember` is the trimmed entry for readline history
    Submit { remember: Option<&'a str> },
}

impl<'a> ReplCommand<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "exit" | "quit" => ReplCommand::Exit,
            "/history" => ReplCommand::History,
            "" => ReplCommand::Submit { remember: None },
            text => ReplCommand::Submit { remember: Some(text) },
        }
    }
}

/// Run interactive REPL mode
pub async fn run_repl_mode(config: &AppConfig) -> Result<()> {
    println!("{}", "💬 graphchat".bright_cyan().bold());
    println!("{}", format!("Endpoint: {}", config.client_config.endpoint).bright_black());
    println!(
        "{}",
        "Type 'exit' or 'quit' to exit, or '/history' to show the conversation\n".bright_black()
    );

    let mut session = build_session(&config.client_config)?;
    let mut logger = open_logger(&config.client_config).await;
    if let Some(logger) = logger.as_mut() {
        logger.log_all(session.messages()).await;
    }

    println!("{}\n", render::render_transcript(&ChatView::project(&session)));

    let mut rl = DefaultEditor::new().context("Failed to initialize line editor")?;

    loop {
        println!("{}", render::render_hint(&ChatView::project(&session)));
        let readline = rl.readline(&format!("{} ", "你:".bright_green().bold()));

        match readline {
            Ok(line) => {
                match ReplCommand::parse(&line) {
                    ReplCommand::Exit => {
                        println!("{}", "再见!".bright_cyan());
                        break;
                    }
                    ReplCommand::History => {
                        println!("{}\n", render::render_transcript(&ChatView::project(&session)));
                        continue;
                    }
                    ReplCommand::Submit { remember: Some(entry) } => {
                        rl.add_history_entry(entry)?;
                    }
                    ReplCommand::Submit { remember: None } => {}
                }

                session.set_input(line);
                handle_submission(&mut session, logger.as_mut()).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "再见!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}

/// Submit the session draft, drawing the pending indicator until the call resolves
async fn handle_submission<T: Transport>(
    session: &mut ChatSession<T>,
    mut logger: Option<&mut ConversationLogger>,
) {
    let draft = session.input().to_string();
    let Some(request) = session.begin_submission(&draft) else {
        log::debug!("ignoring empty input");
        return;
    };

    if let (Some(logger), Some(user_message)) = (logger.as_deref_mut(), session.messages().last()) {
        logger.log(user_message).await;
    }

    let outcome = wait_with_indicator(session, &request).await;
    let reply = session.complete_submission(outcome);

    if let Some(logger) = logger.as_deref_mut() {
        logger.log(reply).await;
    }

    let view = ChatView::project(session);
    if let Some(row) = view.messages.last() {
        println!("{}\n", render::render_message(row));
    }
}

async fn wait_with_indicator<T: Transport>(
    session: &ChatSession<T>,
    request: &QueryRequest,
) -> Result<Reply, TransportError> {
    let view = ChatView::project(session);
    let mut call = session.transport().query(request);
    let mut ticker = tokio::time::interval(SPINNER_INTERVAL);
    let mut frame = 0;

    loop {
        tokio::select! {
            outcome = &mut call => {
                // Clear the indicator line
                print!("\r\x1b[2K");
                let _ = std::io::stdout().flush();
                return outcome;
            }
            _ = ticker.tick() => {
                print!("\r{}", render::render_pending_frame(&view, frame));
                let _ = std::io::stdout().flush();
                frame += 1;
            }
        }
    }
}
