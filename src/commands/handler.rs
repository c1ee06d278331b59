//! Inbound decoder trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::{DateTime, Utc};

use crate::features::conversation::Action;

/// Where an inbound body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundSource {
    /// A typed chat message
    Message,
    /// A button press; the body is the button's custom_id
    Button,
}

/// A platform event reduced to what decoders need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub source: InboundSource,
    pub body: String,
    /// Captured when the event arrived, injected into time-bearing actions
    pub now: DateTime<Utc>,
}

impl Inbound {
    pub fn message(body: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            source: InboundSource::Message,
            body: body.into(),
            now,
        }
    }

    pub fn button(custom_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            source: InboundSource::Button,
            body: custom_id.into(),
            now,
        }
    }
}

/// Turns an inbound event into an action, or declines it.
///
/// Decoders are tried in registration order by the [`DecoderChain`] and
/// the first `Some` wins, so a decoder only claims what it recognizes.
///
/// # Example
///
/// ```ignore
/// pub struct PingDecoder;
///
/// impl ActionDecoder for PingDecoder {
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     fn decode(&self, inbound: &Inbound) -> Option<Action> {
///         (inbound.body == "/ping").then_some(Action::Help)
///     }
/// }
/// ```
///
/// [`DecoderChain`]: super::registry::DecoderChain
pub trait ActionDecoder: Send + Sync {
    fn name(&self) -> &'static str;

    fn decode(&self, inbound: &Inbound) -> Option<Action>;
}
