//! # Feature: Course Catalog
//!
//! Immutable list of elective courses and their lecture schedules, loaded
//! once at start-up and shared by reference with every chat.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Remote (http) catalog sources
//! - 1.0.0: YAML catalog with per-entry validation

pub mod loader;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use loader::{load_catalog, parse_catalog_entries, CatalogSource};

/// A single lecture occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    /// Lecture, seminar, lab...
    #[serde(default)]
    pub kind: Option<String>,
}

/// A course and its ordered lectures.
///
/// Courses are identified by name alone (case-sensitive), so equality
/// ignores the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    #[serde(default)]
    pub lectures: Vec<Lecture>,
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Course {}

impl Course {
    pub fn new(name: impl Into<String>, lectures: Vec<Lecture>) -> Self {
        Self {
            name: name.into(),
            lectures,
        }
    }

    /// Multi-line description used by the course detail message
    pub fn describe(&self, tz: chrono::FixedOffset) -> String {
        let mut out = format!("**{}**", self.name);
        if self.lectures.is_empty() {
            out.push_str("\nNo lectures scheduled");
            return out;
        }
        for (idx, lecture) in self.lectures.iter().enumerate() {
            out.push_str(&format!(
                "\n{}. {} - {}",
                idx + 1,
                crate::core::time::render(lecture.start, tz),
                lecture.end.with_timezone(&tz).format("%H:%M")
            ));
            if let Some(kind) = &lecture.kind {
                out.push_str(&format!(" ({kind})"));
            }
            if let Some(location) = &lecture.location {
                out.push_str(&format!(", {location}"));
            }
        }
        out
    }
}

/// The loaded catalog. Never mutated after construction.
#[derive(Debug, Default)]
pub struct Catalog {
    courses: Vec<Course>,
}

/// Shared handle every chat model holds
pub type SharedCatalog = Arc<Catalog>;

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Build from independently decoded entries, dropping the `None`s
    pub fn from_entries(entries: Vec<Option<Course>>) -> Self {
        Self {
            courses: entries.into_iter().flatten().collect(),
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn find(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn into_shared(self) -> SharedCatalog {
        Arc::new(self)
    }
}
