use std::fmt;
use std::str::FromStr;

use crate::api::{ApiError, Chat, Contact, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Chats,
    Contacts,
    Gallery,
    Profile,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Chats, Tab::Contacts, Tab::Gallery, Tab::Profile, Tab::Settings];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Chats => "chats",
            Tab::Contacts => "contacts",
            Tab::Gallery => "gallery",
            Tab::Profile => "profile",
            Tab::Settings => "settings",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tab: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOperation {
    Chats,
    Contacts,
    Messages,
    Send,
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncOperation::Chats => "get_chats",
            SyncOperation::Contacts => "get_contacts",
            SyncOperation::Messages => "get_messages",
            SyncOperation::Send => "send_message",
        };
        f.write_str(name)
    }
}

/// The most recent failed exchange with the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub operation: SyncOperation,
    pub kind: &'static str,
    pub message: String,
}

impl SyncFailure {
    pub fn new(operation: SyncOperation, err: &ApiError) -> Self {
        Self { operation, kind: err.kind(), message: err.to_string() }
    }
}

/// A chat selection. The epoch changes on every `select_chat`, so a message
/// fetch can tell whether the selection it was issued for is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub chat_id: i64,
    epoch: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub active_tab: Tab,
    pub draft: String,
    pub chats: Vec<Chat>,
    pub contacts: Vec<Contact>,
    /// Messages of the selected chat only.
    pub messages: Vec<Message>,
    pub pending: bool,
    pub last_sync_error: Option<SyncFailure>,
    selection: Option<Selection>,
    epoch: u64,
}

impl SessionState {
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn selected_chat_id(&self) -> Option<i64> {
        self.selection.map(|s| s.chat_id)
    }

    pub fn selected_chat(&self) -> Option<&Chat> {
        let id = self.selected_chat_id()?;
        self.chats.iter().find(|c| c.id == id)
    }

    pub fn is_current(&self, selection: Selection) -> bool {
        self.selection == Some(selection)
    }

    pub(crate) fn open(&mut self, chat_id: i64) -> Selection {
        self.epoch += 1;
        let selection = Selection { chat_id, epoch: self.epoch };
        self.selection = Some(selection);
        self.messages.clear();
        self.clear_error(SyncOperation::Messages);
        selection
    }

    pub(crate) fn close(&mut self) {
        self.selection = None;
        self.messages.clear();
        self.clear_error(SyncOperation::Messages);
    }

    pub(crate) fn clear_error(&mut self, operation: SyncOperation) {
        if self.last_sync_error.as_ref().is_some_and(|f| f.operation == operation) {
            self.last_sync_error = None;
        }
    }
}
