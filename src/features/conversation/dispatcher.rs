//! Runs actions for a chat: reduce, commit, then execute the effects.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::VecDeque;

use super::action::{Action, Effect, Reply};
use super::model::ChatId;
use super::reducer::reduce;
use super::store::ConversationStore;

/// Upper bound on reducer steps for one inbound event
pub const MAX_STEPS: usize = 64;

/// Where replies go. Implemented by the Discord transport and by test doubles.
#[async_trait]
pub trait Outbox: Send + Sync {
    async fn deliver(&self, chat: ChatId, reply: &Reply) -> Result<()>;
}

/// What happened while handling one event
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub steps: usize,
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct Dispatcher {
    store: ConversationStore,
}

impl Dispatcher {
    pub fn new(store: ConversationStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Handle `action` and every follow-up it enqueues, in emission order.
    ///
    /// The chat stays locked for the whole event. Each step's model is
    /// committed before its replies are delivered, and a failed delivery
    /// is logged and skipped.
    pub async fn dispatch(
        &self,
        chat: ChatId,
        action: Action,
        now: DateTime<Utc>,
        outbox: &dyn Outbox,
    ) -> DispatchReport {
        let slot = self.store.slot(chat, now);
        let mut model = slot.lock().await;
        let mut report = DispatchReport::default();
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            if report.steps >= MAX_STEPS {
                warn!(
                    "Chat {chat}: dropping {} queued actions after {MAX_STEPS} steps",
                    queue.len() + 1
                );
                break;
            }
            report.steps += 1;
            debug!("Chat {chat}: reducing {}", action.name());

            let (next, effects) = reduce(action, model.clone());
            *model = next;

            for effect in effects {
                match effect {
                    Effect::Reply(reply) => match outbox.deliver(chat, &reply).await {
                        Ok(()) => report.delivered += 1,
                        Err(e) => {
                            report.failed += 1;
                            warn!("Chat {chat}: failed to deliver reply: {e}");
                        }
                    },
                    Effect::Dispatch(follow_up) => queue.push_back(follow_up),
                }
            }
        }

        report
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tokio::sync::Mutex;

    /// Records every reply; chats listed in `failing` reject delivery.
    #[derive(Default)]
    pub struct RecordingOutbox {
        pub sent: Mutex<Vec<(ChatId, Reply)>>,
        pub failing: Vec<ChatId>,
    }

    impl RecordingOutbox {
        pub fn failing_for(chats: Vec<ChatId>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                failing: chats,
            }
        }

        pub async fn texts(&self) -> Vec<String> {
            self.sent
                .lock()
                .await
                .iter()
                .map(|(_, reply)| reply.text.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Outbox for RecordingOutbox {
        async fn deliver(&self, chat: ChatId, reply: &Reply) -> Result<()> {
            if self.failing.contains(&chat) {
                return Err(anyhow::anyhow!("channel {chat} unavailable"));
            }
            self.sent.lock().await.push((chat, reply.clone()));
            Ok(())
        }
    }
}
