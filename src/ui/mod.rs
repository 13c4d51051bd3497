//! Plain-text rendering of a session snapshot. Nothing here mutates state.

pub mod chat_view;
pub mod main_window;
pub mod sidebar;
