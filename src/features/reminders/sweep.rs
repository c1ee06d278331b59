//! The per-chat reminder sweep

use crate::features::conversation::{Effect, Model};

pub const REMINDER_PREFIX: &str = "Reminder: ";

/// Fire every pending entry whose due time is at or before the model's
/// `current_time`.
///
/// A fired entry has `due_at` cleared and yields exactly one notification.
/// Future and already-fired entries are left as they are.
pub fn sweep(model: Model) -> (Model, Vec<Effect>) {
    let mut model = model;
    let now = model.current_time;
    let mut effects = Vec::new();

    for entry in model.reminders.iter_mut().filter(|e| e.is_due(now)) {
        entry.due_at = None;
        effects.push(Effect::text(format!("{REMINDER_PREFIX}{}", entry.label)));
    }

    (model, effects)
}
