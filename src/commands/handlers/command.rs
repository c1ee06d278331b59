//! Typed `/command` decoding
//!
//! Handles: start, show, courses, remove_course, remove_todo, show_todo,
//! show_week, reminders, remind, help
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: /remind with durations like `30m`, `2h`, `1h30m`
//! - 1.0.0: Initial command set

use chrono::Duration;
use regex::Regex;
use std::sync::OnceLock;

use crate::commands::handler::{ActionDecoder, Inbound, InboundSource};
use crate::features::conversation::Action;

/// `/name`, an optional `@bot` suffix, then the argument text
fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/([A-Za-z_]+)(?:@\S+)?(?:\s+([\s\S]*))?$")
            .expect("command pattern is a valid regex")
    })
}

/// Decoder for text messages starting with `/`
pub struct CommandDecoder;

impl ActionDecoder for CommandDecoder {
    fn name(&self) -> &'static str {
        "command"
    }

    fn decode(&self, inbound: &Inbound) -> Option<Action> {
        if inbound.source != InboundSource::Message {
            return None;
        }
        let captures = command_pattern().captures(inbound.body.trim())?;
        let command = captures.get(1)?.as_str().to_lowercase();
        let args = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");

        match command.as_str() {
            "start" => Some(Action::Start(inbound.now)),
            "help" => Some(Action::Help),
            "show" => Some(Action::ShowItems),
            "courses" => Some(Action::ShowAllCourses),
            "show_week" => Some(Action::WeekCourses),
            "reminders" => Some(Action::ShowReminder(args.to_string())),
            "show_todo" if args.is_empty() => Some(Action::ShowAllToDo),
            "show_todo" => Some(Action::ShowToDo(args.to_string())),
            "remove_course" => non_empty(args).map(Action::RemoveItem),
            "remove_todo" => non_empty(args).map(Action::RemoveToDo),
            "remind" => Self::decode_remind(args, inbound),
            _ => None,
        }
    }
}

impl CommandDecoder {
    /// `/remind [duration] <text>`; without a duration the reminder is a
    /// note with no due time.
    fn decode_remind(args: &str, inbound: &Inbound) -> Option<Action> {
        let (first, rest) = match args.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, rest.trim()),
            None => (args, ""),
        };

        match Self::parse_duration(first) {
            Some(seconds) => {
                let label = non_empty(rest)?;
                let due_at = inbound
                    .now
                    .checked_add_signed(Duration::try_seconds(seconds)?)?;
                Some(Action::AddReminder {
                    label,
                    due_at: Some(due_at),
                })
            }
            None => non_empty(args).map(|label| Action::AddReminder {
                label,
                due_at: None,
            }),
        }
    }

    /// Parse a duration like "30m", "2h", "1d", "1h30m" into seconds.
    ///
    /// Every character must belong to a `<number><unit>` pair.
    pub fn parse_duration(text: &str) -> Option<i64> {
        let text = text.trim().to_lowercase();
        let mut total_seconds: i64 = 0;
        let mut current_number = String::new();

        for c in text.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            if current_number.is_empty() {
                return None;
            }
            let value: i64 = current_number.parse().ok()?;
            current_number.clear();

            let unit = match c {
                's' => 1,
                'm' => 60,
                'h' => 60 * 60,
                'd' => 60 * 60 * 24,
                'w' => 60 * 60 * 24 * 7,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(value.checked_mul(unit)?)?;
        }

        if !current_number.is_empty() || total_seconds == 0 {
            return None;
        }
        Some(total_seconds)
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
