use std::fmt::Write;

use crate::config::Settings;
use crate::sync::{SessionState, Tab};
use crate::ui::{chat_view, sidebar};

pub struct GalleryItem {
    pub id: u32,
    pub kind: &'static str,
    pub date: &'static str,
}

pub const GALLERY: &[GalleryItem] = &[
    GalleryItem { id: 1, kind: "image", date: "Dec 15" },
    GalleryItem { id: 2, kind: "image", date: "Dec 10" },
    GalleryItem { id: 3, kind: "video", date: "Dec 5" },
    GalleryItem { id: 4, kind: "image", date: "Dec 1" },
    GalleryItem { id: 5, kind: "image", date: "Nov 28" },
    GalleryItem { id: 6, kind: "video", date: "Nov 20" },
];

fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| if tab == active { format!("[{}]", tab.id()) } else { tab.id().to_string() })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Renders the whole window: title, tab bar, sync error banner and the active tab.
pub fn render(state: &SessionState, settings: &Settings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Family chat");
    let _ = writeln!(out, "{}", tab_bar(state.active_tab));
    if let Some(failure) = &state.last_sync_error {
        let _ = writeln!(out, "! {} failed: {}", failure.operation, failure.message);
    }
    let _ = writeln!(out);

    match state.active_tab {
        Tab::Chats if state.selected_chat_id().is_some() => out.push_str(&chat_view::render_conversation(state)),
        Tab::Chats => out.push_str(&sidebar::render_chat_list(state)),
        Tab::Contacts => out.push_str(&sidebar::render_contacts(state)),
        Tab::Gallery => {
            for item in GALLERY {
                let _ = writeln!(out, "  #{} {} {}", item.id, item.kind, item.date);
            }
        }
        Tab::Profile => {
            let profile = &settings.profile;
            let _ = writeln!(out, "  ({}) {}", profile.initials, profile.name);
            let _ = writeln!(out, "  {}", profile.email);
        }
        Tab::Settings => {
            let _ = writeln!(out, "  server: {}", settings.base_url);
            let _ = writeln!(out, "  refresh every {}s", settings.poll_interval().as_secs());
        }
    }
    out
}
