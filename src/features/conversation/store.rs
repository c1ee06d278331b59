//! Conversation store: one independently locked `Model` per chat.
//!
//! Uses DashMap for the chat index and a tokio mutex per chat, so the
//! inbound event path and the reminder sweep serialize on the same chat
//! while different chats never wait on each other.

use chrono::{DateTime, FixedOffset, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::model::{ChatId, Model};
use crate::features::catalog::SharedCatalog;

/// Exclusive handle on one chat's model
pub type ChatSlot = Arc<Mutex<Model>>;

#[derive(Clone)]
pub struct ConversationStore {
    chats: Arc<DashMap<ChatId, ChatSlot>>,
    catalog: SharedCatalog,
    time_zone: FixedOffset,
}

impl ConversationStore {
    pub fn new(catalog: SharedCatalog, time_zone: FixedOffset) -> Self {
        Self {
            chats: Arc::new(DashMap::new()),
            catalog,
            time_zone,
        }
    }

    /// The slot for `chat`, inserting a fresh model stamped with `now` on
    /// first contact.
    pub fn slot(&self, chat: ChatId, now: DateTime<Utc>) -> ChatSlot {
        self.chats
            .entry(chat)
            .or_insert_with(|| {
                Arc::new(Mutex::new(Model::new(
                    Arc::clone(&self.catalog),
                    now,
                    self.time_zone,
                )))
            })
            .value()
            .clone()
    }

    /// Snapshot of the chat's model, creating it if needed
    pub async fn get_or_create(&self, chat: ChatId, now: DateTime<Utc>) -> Model {
        let slot = self.slot(chat, now);
        let model = slot.lock().await;
        model.clone()
    }

    /// Replace the chat's model
    pub async fn put(&self, chat: ChatId, model: Model) {
        let slot = self.slot(chat, model.current_time);
        *slot.lock().await = model;
    }

    /// Every chat seen so far
    pub fn chat_ids(&self) -> Vec<ChatId> {
        self.chats.iter().map(|entry| *entry.key()).collect()
    }

    pub fn contains(&self, chat: ChatId) -> bool {
        self.chats.contains_key(&chat)
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }
}
