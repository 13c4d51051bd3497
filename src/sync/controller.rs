use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::{oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::interval;

use crate::api::{ChatApi, Message, Result};
use crate::sync::state::{Selection, SessionState, SyncFailure, SyncOperation, Tab};
use crate::utils::non_blank;

/// Something the user asked for from the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetTab(Tab),
    SelectChat(i64),
    CloseChat,
    EditDraft(String),
    Send,
}

struct Inner {
    api: Arc<dyn ChatApi>,
    state: watch::Sender<SessionState>,
    poll_interval: Duration,
}

/// Keeps the session state in step with the remote service.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct SyncController {
    inner: Arc<Inner>,
}

impl SyncController {
    pub fn new(api: Arc<dyn ChatApi>, poll_interval: Duration) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { inner: Arc::new(Inner { api, state, poll_interval }) }
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub async fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::SetTab(tab) => self.set_tab(tab),
            Intent::SelectChat(id) => self.select_chat(id).await,
            Intent::CloseChat => self.close_chat(),
            Intent::EditDraft(text) => self.set_draft(text),
            Intent::Send => {
                self.send_draft().await;
            }
        }
    }

    pub fn set_tab(&self, tab: Tab) {
        self.inner.state.send_if_modified(|s| {
            let changed = s.active_tab != tab;
            s.active_tab = tab;
            changed
        });
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.state.send_modify(|s| s.draft = text);
    }

    /// Opens a chat: the previous conversation is dropped at once and the new
    /// one is fetched before this returns.
    pub async fn select_chat(&self, chat_id: i64) {
        let mut selection = None;
        self.inner.state.send_modify(|s| selection = Some(s.open(chat_id)));
        debug!("opened chat {}", chat_id);
        if let Some(selection) = selection {
            self.fetch_messages(selection).await;
        }
    }

    pub fn close_chat(&self) {
        self.inner.state.send_if_modified(|s| {
            let open = s.selection().is_some();
            s.close();
            open
        });
    }

    pub async fn load_contacts(&self) {
        let result = self.inner.api.list_contacts().await;
        if let Some(contacts) = self.check(SyncOperation::Contacts, result) {
            self.inner.state.send_modify(|s| {
                s.contacts = contacts;
                s.clear_error(SyncOperation::Contacts);
            });
        }
    }

    pub async fn refresh_chats(&self) {
        let result = self.inner.api.list_chats().await;
        if let Some(chats) = self.check(SyncOperation::Chats, result) {
            self.inner.state.send_modify(|s| {
                s.chats = chats;
                s.clear_error(SyncOperation::Chats);
            });
        }
    }

    /// Fetches messages for `selection`. Replies and failures alike are
    /// dropped once the selection is no longer current.
    async fn fetch_messages(&self, selection: Selection) {
        let result = self.inner.api.list_messages(selection.chat_id).await;
        let mut failure = None;
        let applied = self.inner.state.send_if_modified(|s| {
            if !s.is_current(selection) {
                return false;
            }
            match result {
                Ok(messages) => {
                    s.messages = messages;
                    s.clear_error(SyncOperation::Messages);
                }
                Err(e) => {
                    s.last_sync_error = Some(SyncFailure::new(SyncOperation::Messages, &e));
                    failure = Some(e);
                }
            }
            true
        });
        if !applied {
            debug!("dropping stale messages reply for chat {}", selection.chat_id);
        } else if let Some(e) = failure {
            warn!("{} for chat {} failed ({}): {}", SyncOperation::Messages, selection.chat_id, e.kind(), e);
        }
    }

    /// One poll tick: the chat list always, plus the open chat's messages.
    /// Both requests run concurrently and write disjoint parts of the state.
    pub async fn tick(&self) {
        let selection = self.inner.state.borrow().selection();
        match selection {
            Some(selection) => {
                tokio::join!(self.refresh_chats(), self.fetch_messages(selection));
            }
            None => self.refresh_chats().await,
        }
    }

    pub async fn send_draft(&self) -> Option<Message> {
        let draft = self.inner.state.borrow().draft.clone();
        self.send(&draft).await
    }

    /// Sends `text` to the open chat.
    ///
    /// Blank text, no open chat, or a send already in flight make this a no-op.
    /// On success the returned message is appended right away, the draft is
    /// cleared if it still holds the sent text, and the chat list is
    /// refreshed. On failure only the error signal changes.
    pub async fn send(&self, text: &str) -> Option<Message> {
        let text = non_blank(text)?;
        let mut target = None;
        self.inner.state.send_if_modified(|s| match s.selected_chat_id() {
            Some(chat_id) if !s.pending => {
                s.pending = true;
                target = Some(chat_id);
                true
            }
            _ => false,
        });
        let Some(chat_id) = target else {
            debug!("send ignored: no open chat or a send is in flight");
            return None;
        };

        match self.inner.api.send_message(chat_id, text).await {
            Ok(message) => {
                let echo = message.clone();
                self.inner.state.send_modify(|s| {
                    s.pending = false;
                    // Keep anything typed while the send was in flight.
                    if s.draft.trim() == text {
                        s.draft.clear();
                    }
                    s.clear_error(SyncOperation::Send);
                    let known = s.messages.iter().any(|m| m.id == echo.id);
                    if s.selected_chat_id() == Some(chat_id) && !known {
                        s.messages.push(echo);
                    }
                });
                self.refresh_chats().await;
                Some(message)
            }
            Err(e) => {
                warn!("{} for chat {} failed ({}): {}", SyncOperation::Send, chat_id, e.kind(), e);
                self.inner.state.send_modify(|s| {
                    s.pending = false;
                    s.last_sync_error = Some(SyncFailure::new(SyncOperation::Send, &e));
                });
                None
            }
        }
    }

    /// Logs a failed fetch and records it as the last sync error.
    fn check<T>(&self, operation: SyncOperation, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{} failed ({}): {}", operation, e.kind(), e);
                self.inner
                    .state
                    .send_modify(|s| s.last_sync_error = Some(SyncFailure::new(operation, &e)));
                None
            }
        }
    }

    /// Starts the session: contacts are loaded once, then a tick fires every
    /// poll interval until the returned handle is shut down or dropped.
    pub fn start(&self) -> PollerHandle {
        let controller = self.clone();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            info!("sync started, polling every {:?}", controller.inner.poll_interval);
            let mut inflight = JoinSet::new();
            {
                let c = controller.clone();
                inflight.spawn(async move { c.load_contacts().await });
            }
            let mut ticker = interval(controller.inner.poll_interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // Ticks never wait for the previous one; the latest response wins.
                        let c = controller.clone();
                        inflight.spawn(async move { c.tick().await });
                    }
                    Some(_) = inflight.join_next(), if !inflight.is_empty() => {}
                    _ = &mut shutdown_rx => break,
                }
            }
            inflight.abort_all();
            info!("sync stopped");
        });
        PollerHandle { shutdown: Some(shutdown_tx), task }
    }
}

/// Owns the polling task. Dropping it stops polling too.
pub struct PollerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            if !e.is_cancelled() {
                warn!("poller task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
