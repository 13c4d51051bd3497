use std::fmt::Write;

use crate::sync::SessionState;

/// The open conversation followed by the compose line.
pub fn render_conversation(state: &SessionState) -> String {
    let Some(chat_id) = state.selected_chat_id() else {
        return String::new();
    };
    let mut out = String::new();
    match state.selected_chat() {
        Some(chat) => {
            let _ = writeln!(out, "── {} ──", chat.contact.name);
        }
        None => {
            let _ = writeln!(out, "── chat {} ──", chat_id);
        }
    }
    if state.messages.is_empty() {
        let _ = writeln!(out, "  (no messages)");
    }
    for msg in &state.messages {
        if msg.sent {
            let _ = writeln!(out, "{:>40} [{}]", msg.text, msg.time);
        } else {
            let _ = writeln!(out, "[{}] {}", msg.time, msg.text);
        }
    }
    let status = if state.pending { " (sending…)" } else { "" };
    let _ = writeln!(out, "> {}{}", state.draft, status);
    out
}
