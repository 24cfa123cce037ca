//! Terminal rendering of `ChatView`s

use colored::Colorize;
use graphchat_chat::{ChatView, MessageView};
use graphchat_types::Role;

/// Typing indicator shown next to a pending message
pub const TYPING_INDICATOR: &str = "•••";

const SPINNER_FRAMES: [&str; 3] = ["•  ", "•• ", "•••"];

pub fn render_message(row: &MessageView<'_>) -> String {
    let label = match row.role {
        Role::Assistant => format!("[{}]", row.label).bright_cyan().bold(),
        Role::User => format!("[{}]", row.label).bright_green().bold(),
    };

    let mut header = label.to_string();
    if row.pending {
        header.push(' ');
        header.push_str(&TYPING_INDICATOR.bright_black().to_string());
    }

    // Continuation lines line up under the first one
    let indent = " ".repeat(row.label.chars().count() + 3);
    let body = row.content.lines().collect::<Vec<_>>().join(&format!("\n{}", indent));

    format!("{} {}", header, body)
}

/// The whole transcript, one message per paragraph
pub fn render_transcript(view: &ChatView<'_>) -> String {
    let mut out = view
        .messages
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n\n");

    if let Some(note) = view.system_note {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&note.bright_black().italic().to_string());
    }
    out
}

/// Hint printed above the prompt
pub fn render_hint(view: &ChatView<'_>) -> String {
    let action = if view.is_pending() {
        format!("{} · {}", view.placeholder, view.submit_label)
    } else {
        view.placeholder.to_string()
    };
    format!("{} · exit 退出", action).bright_black().to_string()
}

/// One frame of the in-flight indicator, redrawn in place
pub fn render_pending_frame(view: &ChatView<'_>, frame: usize) -> String {
    let dots = SPINNER_FRAMES[frame % SPINNER_FRAMES.len()];
    format!(
        "{} {} {}",
        "[AI]".bright_cyan().bold(),
        dots.bright_black(),
        view.system_note.unwrap_or(view.placeholder).bright_black()
    )
}
