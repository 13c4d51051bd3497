use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::error::{ApiError, Result};
use crate::api::models::{
    Chat, ChatsEnvelope, Contact, ContactsEnvelope, ErrorEnvelope, Message, MessagesEnvelope,
    OutgoingMessage, SentEnvelope,
};
use crate::api::ChatApi;
use crate::config::Settings;

pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(&crate::utils::normalize_url(base_url))?;
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.base_url, settings.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Every call goes to the same endpoint, distinguished by the `action` query parameter.
    fn endpoint(&self, action: &str, chat_id: Option<i64>) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", action);
            if let Some(id) = chat_id {
                query.append_pair("chat_id", &id.to_string());
            }
        }
        url
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            // The service reports failures as {"error": "..."}; fall back to the reason phrase.
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unexpected status").to_string());
            return Err(ApiError::Status { status: status.as_u16(), message });
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, action: &str, chat_id: Option<i64>) -> Result<T> {
        let url = self.endpoint(action, chat_id);
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::decode(resp).await
    }
}

#[async_trait]
impl ChatApi for ApiClient {
    async fn list_chats(&self) -> Result<Vec<Chat>> {
        let envelope: ChatsEnvelope = self.get("get_chats", None).await?;
        Ok(envelope.chats)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let envelope: ContactsEnvelope = self.get("get_contacts", None).await?;
        Ok(envelope.contacts)
    }

    async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>> {
        let envelope: MessagesEnvelope = self.get("get_messages", Some(chat_id)).await?;
        Ok(envelope.messages)
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        let url = self.endpoint("send_message", None);
        let body = OutgoingMessage { chat_id, text: text.to_string() };
        debug!("POST {} (chat {})", url, chat_id);
        let resp = self.http.post(url).json(&body).send().await?;
        let envelope: SentEnvelope = Self::decode(resp).await?;
        Ok(envelope.message)
    }
}
