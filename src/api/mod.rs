pub mod client;
pub mod error;
pub mod models;

use async_trait::async_trait;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use models::{Chat, Contact, ContactStatus, Message};

/// The four operations of the remote chat service.
///
/// None of them touch local session state; applying results is the sync
/// controller's job.
#[async_trait]
pub trait ChatApi: Send + Sync + 'static {
    async fn list_chats(&self) -> Result<Vec<Chat>>;
    async fn list_contacts(&self) -> Result<Vec<Contact>>;
    async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>>;
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message>;
}
