//! Per-chat conversation state

use chrono::{DateTime, FixedOffset, Utc};

use crate::features::catalog::{Course, SharedCatalog};

/// Discord channel id; one conversation per channel
pub type ChatId = u64;

/// A reminder in a chat's list.
///
/// `due_at = Some(t)` is pending. The sweep clears it to `None` when it
/// fires, and ad-hoc reminders may be created without a time at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEntry {
    pub label: String,
    pub due_at: Option<DateTime<Utc>>,
}

impl ReminderEntry {
    pub fn new(label: impl Into<String>, due_at: Option<DateTime<Utc>>) -> Self {
        Self {
            label: label.into(),
            due_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        matches!(self.due_at, Some(t) if t <= now)
    }
}

/// Everything the bot remembers about one chat
#[derive(Debug, Clone)]
pub struct Model {
    /// Shared with every other chat, never mutated
    pub all_courses: SharedCatalog,
    /// Unique by name, most recently added first
    pub my_courses: Vec<Course>,
    pub current_time: DateTime<Utc>,
    pub time_zone: FixedOffset,
    pub reminders: Vec<ReminderEntry>,
    /// Most recently added first
    pub todos: Vec<String>,
}

impl Model {
    pub fn new(all_courses: SharedCatalog, now: DateTime<Utc>, time_zone: FixedOffset) -> Self {
        Self {
            all_courses,
            my_courses: Vec::new(),
            current_time: now,
            time_zone,
            reminders: Vec::new(),
            todos: Vec::new(),
        }
    }

    pub fn has_course(&self, name: &str) -> bool {
        self.my_courses.iter().any(|c| c.name == name)
    }

    pub fn my_course(&self, name: &str) -> Option<&Course> {
        self.my_courses.iter().find(|c| c.name == name)
    }

    pub fn pending_reminders(&self) -> usize {
        self.reminders.iter().filter(|r| r.is_pending()).count()
    }
}
