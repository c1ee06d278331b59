//! # Inbound Decoding
//!
//! Turns chat messages and button presses into conversation actions.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Plain text falls through to a to-do note
//! - 1.0.0: Decoder trait and ordered chain

pub mod handler;
pub mod handlers;
pub mod registry;

pub use handler::{ActionDecoder, Inbound, InboundSource};
pub use handlers::{create_all_decoders, default_chain};
pub use registry::DecoderChain;
