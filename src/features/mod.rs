//! # Features
//!
//! - **catalog**: the immutable course list shared by every chat
//! - **conversation**: per-chat state, reducer, store and dispatcher
//! - **reminders**: the periodic reminder sweep

pub mod catalog;
pub mod conversation;
pub mod reminders;

pub use catalog::{load_catalog, Catalog, CatalogSource, Course, Lecture, SharedCatalog};
pub use conversation::{
    Action, ChatId, ConversationStore, DispatchReport, Dispatcher, Effect, Model, Outbox, Reply,
};
pub use reminders::{ReminderScheduler, SweepReport};
