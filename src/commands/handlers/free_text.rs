//! Fallback: any plain text becomes a to-do note

use crate::commands::handler::{ActionDecoder, Inbound, InboundSource};
use crate::features::conversation::Action;

/// Catch-all decoder; register it last.
pub struct FreeTextDecoder;

impl ActionDecoder for FreeTextDecoder {
    fn name(&self) -> &'static str {
        "free_text"
    }

    fn decode(&self, inbound: &Inbound) -> Option<Action> {
        if inbound.source != InboundSource::Message {
            return None;
        }
        let text = inbound.body.trim();
        // Unrecognized commands are dropped rather than saved as notes.
        if text.is_empty() || text.starts_with('/') {
            return None;
        }
        Some(Action::AddToDo(text.to_string()))
    }
}
