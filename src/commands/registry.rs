//! Ordered decoder chain
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::sync::Arc;

use super::handler::{ActionDecoder, Inbound};
use crate::features::conversation::Action;

/// Decoders tried in registration order; the first match wins.
///
/// # Example
///
/// ```ignore
/// let mut chain = DecoderChain::new();
/// chain.register(Arc::new(CommandDecoder));
/// chain.register(Arc::new(FreeTextDecoder));
///
/// if let Some((decoder, action)) = chain.decode(&inbound) {
///     dispatcher.dispatch(chat, action, inbound.now, &outbox).await;
/// }
/// ```
#[derive(Clone, Default)]
pub struct DecoderChain {
    decoders: Vec<Arc<dyn ActionDecoder>>,
}

impl DecoderChain {
    pub fn new() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// Append a decoder after every already registered one
    pub fn register(&mut self, decoder: Arc<dyn ActionDecoder>) {
        self.decoders.push(decoder);
    }

    /// The first decoder's action, with that decoder's name
    pub fn decode(&self, inbound: &Inbound) -> Option<(&'static str, Action)> {
        self.decoders
            .iter()
            .find_map(|d| d.decode(inbound).map(|action| (d.name(), action)))
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Decoder names in the order they are tried
    pub fn names(&self) -> Vec<&'static str> {
        self.decoders.iter().map(|d| d.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    struct Fixed {
        name: &'static str,
        action: Option<Action>,
    }

    impl ActionDecoder for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn decode(&self, _inbound: &Inbound) -> Option<Action> {
            self.action.clone()
        }
    }

    #[test]
    fn test_chain_new_is_empty() {
        let chain = DecoderChain::new();
        assert!(chain.is_empty());
        assert!(chain.decode(&Inbound::message("x", Utc::now())).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let mut chain = DecoderChain::new();
        chain.register(Arc::new(Fixed {
            name: "declines",
            action: None,
        }));
        chain.register(Arc::new(Fixed {
            name: "first",
            action: Some(Action::ShowItems),
        }));
        chain.register(Arc::new(Fixed {
            name: "second",
            action: Some(Action::Help),
        }));

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.names(), vec!["declines", "first", "second"]);
        assert_eq!(
            chain.decode(&Inbound::message("x", Utc::now())),
            Some(("first", Action::ShowItems))
        );
    }
}
