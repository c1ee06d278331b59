// Core layer - shared types and configuration
pub mod core;

// Features layer - catalog, conversations and reminders
pub mod features;

// Inbound decoding
pub mod commands;

// Discord rendering and delivery
pub mod message_components;

pub use core::Config;

pub use features::{
    // Catalog
    load_catalog, Catalog, CatalogSource, Course, Lecture,
    // Conversations
    Action, ChatId, ConversationStore, Dispatcher, Effect, Model, Outbox, Reply,
    // Reminders
    ReminderScheduler,
};
