use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Online,
    #[default]
    #[serde(other)]
    Offline,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    #[serde(rename = "avatar", default)]
    pub avatar_url: String,
    #[serde(default)]
    pub status: ContactStatus,
    pub initials: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: i64,
    pub contact: Contact,
    #[serde(default)]
    pub last_message: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub unread: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub sent: bool,
    #[serde(default)]
    pub time: String,
}

/// Body of a `send_message` request.
#[derive(Debug, Serialize, Clone)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatsEnvelope {
    pub chats: Vec<Chat>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactsEnvelope {
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesEnvelope {
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SentEnvelope {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: String,
}
