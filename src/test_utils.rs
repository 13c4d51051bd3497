use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::api::{ApiError, Chat, ChatApi, Contact, ContactStatus, Message, Result};

pub fn contact(id: i64, name: &str) -> Contact {
    Contact {
        id,
        name: name.into(),
        avatar_url: String::new(),
        status: ContactStatus::Online,
        initials: name.chars().next().map(String::from).unwrap_or_default(),
    }
}

pub fn chat(id: i64, contact: Contact, unread: u32) -> Chat {
    Chat { id, contact, last_message: String::new(), time: "12:00".into(), unread }
}

pub fn message(id: i64, text: &str, sent: bool) -> Message {
    Message { id, text: text.into(), sent, time: "12:00".into() }
}

/// Holds a fake service call until the test releases it.
pub struct Gate {
    started: Semaphore,
    release: Semaphore,
}

impl Default for Gate {
    fn default() -> Self {
        Self { started: Semaphore::new(0), release: Semaphore::new(0) }
    }
}

impl Gate {
    pub async fn wait_started(&self) {
        self.started.acquire().await.unwrap().forget();
    }

    pub fn open(&self) {
        self.release.add_permits(1);
    }
}

/// In-memory stand-in for the remote chat service.
#[derive(Default)]
pub struct FakeChatApi {
    pub chats: Mutex<Vec<Chat>>,
    pub contacts: Mutex<Vec<Contact>>,
    pub messages: Mutex<HashMap<i64, Vec<Message>>>,
    pub failing: AtomicBool,
    pub chat_calls: AtomicUsize,
    pub contact_calls: AtomicUsize,
    pub message_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    gates: Mutex<HashMap<i64, Arc<Gate>>>,
    send_gate: Mutex<Option<Arc<Gate>>>,
    next_id: AtomicI64,
}

impl FakeChatApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { next_id: AtomicI64::new(100), ..Default::default() })
    }

    pub fn set_chats(&self, chats: Vec<Chat>) {
        *self.chats.lock().unwrap() = chats;
    }

    pub fn set_messages(&self, chat_id: i64, messages: Vec<Message>) {
        self.messages.lock().unwrap().insert(chat_id, messages);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The next `list_messages(chat_id)` blocks until the returned gate is opened.
    pub fn gate(&self, chat_id: i64) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.lock().unwrap().insert(chat_id, gate.clone());
        gate
    }

    /// The next `send_message` stores the message, then blocks until the gate is opened.
    pub fn gate_send(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.send_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ApiError::Status { status: 500, message: "service unavailable".into() })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChatApi for FakeChatApi {
    async fn list_chats(&self) -> Result<Vec<Chat>> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.chats.lock().unwrap().clone())
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.contact_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.contacts.lock().unwrap().clone())
    }

    async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>> {
        self.message_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().remove(&chat_id);
        if let Some(gate) = gate {
            gate.started.add_permits(1);
            gate.release.acquire().await.unwrap().forget();
        }
        self.check()?;
        Ok(self.messages.lock().unwrap().get(&chat_id).cloned().unwrap_or_default())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let sent = message(self.next_id.fetch_add(1, Ordering::SeqCst), text, true);
        self.messages.lock().unwrap().entry(chat_id).or_default().push(sent.clone());
        if let Some(chat) = self.chats.lock().unwrap().iter_mut().find(|c| c.id == chat_id) {
            chat.last_message = text.to_string();
        }
        let gate = self.send_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.started.add_permits(1);
            gate.release.acquire().await.unwrap().forget();
        }
        Ok(sent)
    }
}
