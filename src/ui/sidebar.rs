use std::fmt::Write;

use crate::api::ContactStatus;
use crate::sync::SessionState;

fn presence(status: ContactStatus) -> &'static str {
    match status {
        ContactStatus::Online => "●",
        ContactStatus::Offline => "○",
    }
}

/// Chat list with unread badges. Chats without unread messages get no badge.
pub fn render_chat_list(state: &SessionState) -> String {
    if state.chats.is_empty() {
        return "No chats yet.\n".into();
    }
    let mut out = String::new();
    for chat in &state.chats {
        let marker = if state.selected_chat_id() == Some(chat.id) { ">" } else { " " };
        let _ = write!(
            out,
            "{} [{}] {} {} {}",
            marker,
            chat.id,
            presence(chat.contact.status),
            chat.contact.name,
            chat.time
        );
        if chat.unread > 0 {
            let _ = write!(out, " ({})", chat.unread);
        }
        let _ = writeln!(out);
        if !chat.last_message.is_empty() {
            let _ = writeln!(out, "      {}", chat.last_message);
        }
    }
    out
}

pub fn render_contacts(state: &SessionState) -> String {
    if state.contacts.is_empty() {
        return "No contacts.\n".into();
    }
    let mut out = String::new();
    for contact in &state.contacts {
        let status = match contact.status {
            ContactStatus::Online => "online",
            ContactStatus::Offline => "offline",
        };
        let _ = writeln!(
            out,
            "  {} ({}) {} {}",
            contact.name,
            contact.initials,
            presence(contact.status),
            status
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Contact;
    use crate::test_utils::{chat, contact};

    #[test]
    fn badge_only_for_unread() {
        let mut state = SessionState::default();
        let mut mom = chat(1, contact(10, "Mom"), 3);
        mom.last_message = "Call me".into();
        state.chats = vec![mom, chat(2, contact(11, "Dad"), 0)];

        let out = render_chat_list(&state);
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].ends_with("(3)"));
        assert_eq!(lines[1].trim(), "Call me");
        assert!(!lines[2].contains('('));
    }

    #[test]
    fn offline_contacts_are_marked() {
        let mut state = SessionState::default();
        state.contacts = vec![Contact { status: ContactStatus::Offline, ..contact(5, "Grandma") }];
        assert!(render_contacts(&state).contains("○ offline"));
    }
}
