//! Inbound decoder implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add FreeTextDecoder (plain text becomes a to-do)
//! - 1.0.0: CallbackDecoder and CommandDecoder

pub mod callback;
pub mod command;
pub mod free_text;

use std::sync::Arc;

use super::handler::ActionDecoder;
use super::registry::DecoderChain;

/// Create all decoders in the order they must be tried
pub fn create_all_decoders() -> Vec<Arc<dyn ActionDecoder>> {
    vec![
        Arc::new(callback::CallbackDecoder),
        Arc::new(command::CommandDecoder),
        Arc::new(free_text::FreeTextDecoder),
    ]
}

/// The chain used by the bot
pub fn default_chain() -> DecoderChain {
    let mut chain = DecoderChain::new();
    for decoder in create_all_decoders() {
        chain.register(decoder);
    }
    chain
}
