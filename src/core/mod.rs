//! # Core Module
//!
//! Configuration, time rendering and Discord size limits shared by every feature.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add time module (local week window, lecture time format)
//! - 1.0.0: Initial creation with config and response modules

pub mod config;
pub mod response;
pub mod time;

// Re-export commonly used items
pub use config::Config;
pub use response::{
    split_for_message, split_message, truncate_label, BUTTON_LABEL_LIMIT, CUSTOM_ID_LIMIT,
    MESSAGE_LIMIT, ROWS_PER_MESSAGE,
};
