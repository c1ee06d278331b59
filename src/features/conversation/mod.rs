//! # Feature: Conversations
//!
//! Per-chat course selection, reminders and to-do notes driven by a pure
//! action reducer. Each chat's model lives in the conversation store; the
//! dispatcher is the only writer on the inbound path.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Ad-hoc reminders with optional due time
//! - 1.1.0: Per-chat locking shared with the reminder sweep
//! - 1.0.0: Initial reducer, store and dispatcher

pub mod action;
pub mod dispatcher;
pub mod model;
pub mod reducer;
pub mod store;

pub use action::{Action, Button, Effect, Reply, ReplyMode};
pub use dispatcher::{DispatchReport, Dispatcher, Outbox};
pub use model::{ChatId, Model, ReminderEntry};
pub use reducer::reduce;
pub use store::{ChatSlot, ConversationStore};
