//! Periodic reminder delivery across every chat

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::sweep::sweep;
use crate::features::conversation::{
    reduce, Action, ChatId, ConversationStore, Effect, Outbox,
};

/// Outcome of one sweep pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub chats: usize,
    pub fired: usize,
    pub failed: usize,
}

pub struct ReminderScheduler {
    store: ConversationStore,
    interval: Duration,
}

impl ReminderScheduler {
    pub fn new(store: ConversationStore, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Sweep forever. The first pass runs one full interval after start.
    pub async fn run(self, outbox: Arc<dyn Outbox>) {
        info!(
            "⏰ Starting reminder scheduler (interval: {:?})",
            self.interval
        );

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let report = self.sweep_once(Utc::now(), outbox.as_ref()).await;
            if report.fired > 0 || report.failed > 0 {
                info!(
                    "Reminder sweep: {} fired, {} failed across {} chats",
                    report.fired, report.failed, report.chats
                );
            }
        }
    }

    /// One pass over every chat: refresh the clock, fire due reminders,
    /// commit, then deliver. Runs to completion even when deliveries fail.
    pub async fn sweep_once(&self, now: DateTime<Utc>, outbox: &dyn Outbox) -> SweepReport {
        let mut report = SweepReport::default();

        for chat in self.store.chat_ids() {
            report.chats += 1;
            let (fired, failed) = self.sweep_chat(chat, now, outbox).await;
            report.fired += fired;
            report.failed += failed;
        }

        debug!(
            "Reminder sweep at {now}: {} chats, {} fired",
            report.chats, report.fired
        );
        report
    }

    async fn sweep_chat(
        &self,
        chat: ChatId,
        now: DateTime<Utc>,
        outbox: &dyn Outbox,
    ) -> (usize, usize) {
        let slot = self.store.slot(chat, now);
        let mut model = slot.lock().await;

        let (refreshed, _) = reduce(Action::SetTime(now), model.clone());
        let (swept, effects) = sweep(refreshed);
        *model = swept;

        let mut fired = 0;
        let mut failed = 0;
        for effect in effects {
            let Effect::Reply(reply) = effect else {
                continue;
            };
            fired += 1;
            if let Err(e) = outbox.deliver(chat, &reply).await {
                failed += 1;
                warn!("Chat {chat}: failed to deliver reminder: {e}");
            }
        }
        (fired, failed)
    }
}
