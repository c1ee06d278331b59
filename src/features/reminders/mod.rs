//! # Reminders Feature
//!
//! Lecture and ad-hoc reminders, fired by a periodic sweep over every chat.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Sweep shares the per-chat lock with inbound events
//! - 1.0.0: Initial per-chat sweep

pub mod scheduler;
pub mod sweep;

pub use scheduler::{ReminderScheduler, SweepReport};
pub use sweep::{sweep, REMINDER_PREFIX};
