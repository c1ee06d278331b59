//! Actions that drive a chat's state and the effects a transition produces

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One discrete intent for a single chat.
///
/// Serialized into button `custom_id`s, so the tags are kept short.
/// Anything time-dependent is carried inside the action; the reducer
/// never reads the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "st")]
    Start(DateTime<Utc>),
    #[serde(rename = "sa")]
    ShowAllCourses,
    #[serde(rename = "si")]
    ShowItems,
    #[serde(rename = "a")]
    AddItem(String),
    #[serde(rename = "rm")]
    RemoveItem(String),
    #[serde(rename = "r")]
    RevealItemActions(String),
    #[serde(rename = "sr")]
    SetReminderIn(String),
    #[serde(rename = "shr")]
    ShowReminder(String),
    #[serde(rename = "ar")]
    AddReminder {
        label: String,
        due_at: Option<DateTime<Utc>>,
    },
    #[serde(rename = "w")]
    WeekCourses,
    #[serde(rename = "t")]
    ShowTime(String, String),
    #[serde(rename = "td")]
    AddToDo(String),
    #[serde(rename = "std")]
    ShowToDo(String),
    #[serde(rename = "sat")]
    ShowAllToDo,
    #[serde(rename = "rtd")]
    RemoveToDo(String),
    #[serde(rename = "now")]
    SetTime(DateTime<Utc>),
    #[serde(rename = "h")]
    Help,
    #[serde(rename = "n")]
    NoAction,
}

impl Action {
    /// Button payload form of this action
    pub fn encode(&self) -> String {
        // Every field is a string or timestamp, so serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Inverse of [`Action::encode`]; `None` for anything else
    pub fn decode(payload: &str) -> Option<Action> {
        serde_json::from_str(payload).ok()
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start(_) => "start",
            Action::ShowAllCourses => "show_all_courses",
            Action::ShowItems => "show_items",
            Action::AddItem(_) => "add_item",
            Action::RemoveItem(_) => "remove_item",
            Action::RevealItemActions(_) => "reveal_item_actions",
            Action::SetReminderIn(_) => "set_reminder_in",
            Action::ShowReminder(_) => "show_reminder",
            Action::AddReminder { .. } => "add_reminder",
            Action::WeekCourses => "week_courses",
            Action::ShowTime(_, _) => "show_time",
            Action::AddToDo(_) => "add_todo",
            Action::ShowToDo(_) => "show_todo",
            Action::ShowAllToDo => "show_all_todo",
            Action::RemoveToDo(_) => "remove_todo",
            Action::SetTime(_) => "set_time",
            Action::Help => "help",
            Action::NoAction => "no_action",
        }
    }
}

/// A button bound to the action it triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Whether a rich reply replaces the message that triggered it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    Send,
    /// Edit the pressed message when there is one, otherwise send
    Update,
}

/// Outgoing message: plain text when `buttons` is empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Button>,
    pub mode: ReplyMode,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
            mode: ReplyMode::Send,
        }
    }

    pub fn keyboard(text: impl Into<String>, buttons: Vec<Button>) -> Self {
        Self {
            text: text.into(),
            buttons,
            mode: ReplyMode::Send,
        }
    }

    pub fn updating(mut self) -> Self {
        self.mode = ReplyMode::Update;
        self
    }
}

/// Side effect requested by a transition, run after the model is committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reply(Reply),
    /// Feed another action back into the reducer for the same chat
    Dispatch(Action),
}

impl Effect {
    pub fn text(text: impl Into<String>) -> Self {
        Effect::Reply(Reply::text(text))
    }

    pub fn dispatch(action: Action) -> Self {
        Effect::Dispatch(action)
    }
}
