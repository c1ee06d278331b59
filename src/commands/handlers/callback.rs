//! Button payload decoding

use crate::commands::handler::{ActionDecoder, Inbound, InboundSource};
use crate::features::conversation::Action;

/// Decoder for button presses whose custom_id is an encoded [`Action`]
pub struct CallbackDecoder;

impl ActionDecoder for CallbackDecoder {
    fn name(&self) -> &'static str {
        "callback"
    }

    fn decode(&self, inbound: &Inbound) -> Option<Action> {
        if inbound.source != InboundSource::Button {
            return None;
        }
        Action::decode(&inbound.body)
    }
}
