//! The per-chat state machine.
//!
//! `reduce` is pure: the same `(Action, Model)` always yields the same
//! `(Model, Vec<Effect>)`. Time arrives inside `Start`, `SetTime` and
//! `AddReminder`; nothing here touches the clock, the network or the store.

use crate::core::time::{render, week_window};

use super::action::{Action, Button, Effect, Reply};
use super::model::{Model, ReminderEntry};

pub const WELCOME_TEXT: &str = "👋 Hi! Pick your elective courses below. \
Anything you type that is not a command is saved as a to-do note. Send /help for the full list of commands.";

pub const HELP_TEXT: &str = "**Commands**\n\
/start - welcome message and the course catalog\n\
/courses - the course catalog\n\
/show - your courses\n\
/show_week - your lectures this week\n\
/remove_course <name> - drop a course from your list\n\
/reminders - your reminders\n\
/remind [30m|2h|1d] <text> - set a reminder\n\
/show_todo [course] - your to-do notes\n\
/remove_todo <text> - delete a to-do note\n\
Any other text is saved as a to-do note.";

pub const CATALOG_UNAVAILABLE: &str = "Course list is not yet available";
pub const NO_COURSES_SELECTED: &str = "You have not picked any courses yet";
pub const NO_REMINDERS: &str = "You have no reminders";
pub const NO_LECTURES_THIS_WEEK: &str = "None of your courses has lectures this week";
pub const NOTHING_TODO: &str = "There is nothing todo";

/// Compute the next model and the effects to run for one action
pub fn reduce(action: Action, model: Model) -> (Model, Vec<Effect>) {
    let mut model = model;
    let effects = match action {
        Action::Start(now) => vec![
            Effect::text(WELCOME_TEXT),
            Effect::dispatch(Action::ShowAllCourses),
            Effect::dispatch(Action::SetTime(now)),
        ],

        Action::ShowAllCourses => vec![show_all_courses(&model)],

        Action::ShowItems => vec![show_items(&model)],

        Action::AddItem(title) => match model.all_courses.find(&title) {
            Some(course) => {
                if !model.has_course(&title) {
                    let course = course.clone();
                    model.my_courses.insert(0, course);
                }
                vec![Effect::text(format!("✅ {title} added to your courses"))]
            }
            None => Vec::new(),
        },

        Action::RemoveItem(title) => {
            let before = model.my_courses.len();
            model.my_courses.retain(|c| c.name != title);
            if model.my_courses.len() == before {
                Vec::new()
            } else {
                vec![
                    Effect::text(format!("🗑️ {title} removed from your courses")),
                    Effect::dispatch(Action::ShowItems),
                ]
            }
        }

        Action::RevealItemActions(title) => vec![reveal_item_actions(&model, &title)],

        Action::SetReminderIn(title) => set_reminders_for_course(&mut model, &title),

        // The title is carried by the button but the whole list is shown.
        Action::ShowReminder(_title) => vec![show_reminders(&model)],

        Action::AddReminder { label, due_at } => {
            let confirmation = match due_at {
                Some(at) => format!(
                    "⏰ I'll remind you about \"{label}\" at {}",
                    render(at, model.time_zone)
                ),
                None => format!("📝 Saved reminder note \"{label}\""),
            };
            model.reminders.push(ReminderEntry::new(label, due_at));
            vec![Effect::text(confirmation)]
        }

        Action::WeekCourses => vec![week_courses(&model)],

        Action::ShowTime(title, time) => vec![Effect::text(format!("{title} - {time}"))],

        Action::AddToDo(text) => {
            let confirmation = format!("📝 Added to-do: {text}");
            model.todos.insert(0, text);
            vec![Effect::text(confirmation)]
        }

        Action::ShowToDo(title) => {
            let matching: Vec<&str> = model
                .todos
                .iter()
                .filter(|todo| todo.contains(title.as_str()))
                .map(String::as_str)
                .collect();
            if matching.is_empty() {
                vec![Effect::text(format!("{NOTHING_TODO} in {title}"))]
            } else {
                vec![Effect::text(matching.join("\n"))]
            }
        }

        Action::ShowAllToDo => {
            if model.todos.is_empty() {
                vec![Effect::text(NOTHING_TODO)]
            } else {
                vec![Effect::text(model.todos.join("\n"))]
            }
        }

        Action::RemoveToDo(title) => {
            let before = model.todos.len();
            model.todos.retain(|todo| *todo != title);
            if model.todos.len() == before {
                Vec::new()
            } else {
                vec![Effect::text(format!("🗑️ Removed to-do: {title}"))]
            }
        }

        Action::SetTime(now) => {
            model.current_time = now;
            Vec::new()
        }

        Action::Help => vec![Effect::text(HELP_TEXT)],

        Action::NoAction => Vec::new(),
    };

    (model, effects)
}

fn show_all_courses(model: &Model) -> Effect {
    if model.all_courses.is_empty() {
        return Effect::text(CATALOG_UNAVAILABLE);
    }
    let buttons = model
        .all_courses
        .courses()
        .iter()
        .map(|c| Button::new(c.name.clone(), Action::RevealItemActions(c.name.clone())))
        .collect();
    Effect::Reply(Reply::keyboard("📚 All courses:", buttons))
}

fn show_items(model: &Model) -> Effect {
    if model.my_courses.is_empty() {
        return Effect::Reply(Reply::text(NO_COURSES_SELECTED).updating());
    }
    let buttons = model
        .my_courses
        .iter()
        .map(|c| Button::new(c.name.clone(), Action::RevealItemActions(c.name.clone())))
        .collect();
    Effect::Reply(Reply::keyboard("🎓 Your courses:", buttons).updating())
}

fn reveal_item_actions(model: &Model, title: &str) -> Effect {
    let Some(course) = model.all_courses.find(title) else {
        return Effect::text(format!("Nothing to show for {title}"));
    };

    let name = course.name.clone();
    let mut buttons = Vec::new();
    if model.has_course(&name) {
        buttons.push(Button::new(
            "Remove from my courses",
            Action::RemoveItem(name.clone()),
        ));
        buttons.push(Button::new(
            "Remind me about lectures",
            Action::SetReminderIn(name.clone()),
        ));
    } else {
        buttons.push(Button::new("Add to my courses", Action::AddItem(name.clone())));
    }
    buttons.push(Button::new("Show reminders", Action::ShowReminder(name.clone())));
    buttons.push(Button::new("Show to-do", Action::ShowToDo(name)));

    Effect::Reply(Reply::keyboard(course.describe(model.time_zone), buttons))
}

fn set_reminders_for_course(model: &mut Model, title: &str) -> Vec<Effect> {
    let Some(course) = model.my_course(title) else {
        return vec![Effect::text(format!(
            "Add {title} to your courses to set reminders"
        ))];
    };

    let entries: Vec<ReminderEntry> = course
        .lectures
        .iter()
        .enumerate()
        .map(|(idx, lecture)| {
            let label = format!(
                "{}, lecture {}: {}",
                course.name,
                idx + 1,
                render(lecture.start, model.time_zone)
            );
            ReminderEntry::new(label, Some(lecture.start))
        })
        .collect();

    let count = entries.len();
    model.reminders.extend(entries);

    if count == 0 {
        vec![Effect::text(format!("{title} has no lectures to remind you about"))]
    } else {
        vec![Effect::text(format!(
            "⏰ Set {count} reminder{} for {title}",
            if count == 1 { "" } else { "s" }
        ))]
    }
}

fn show_reminders(model: &Model) -> Effect {
    if model.reminders.is_empty() {
        return Effect::text(NO_REMINDERS);
    }
    let lines: Vec<String> = model
        .reminders
        .iter()
        .map(|entry| match entry.due_at {
            Some(_) => format!("⏰ {}", entry.label),
            None => format!("✔️ {}", entry.label),
        })
        .collect();
    Effect::text(format!(
        "**Reminders** ({} pending)\n{}",
        model.pending_reminders(),
        lines.join("\n")
    ))
}

/// Only the first lecture of each course inside the week is offered.
///
/// The window is the whole local week, so a lecture earlier this week
/// that has already started is still the one shown.
fn week_courses(model: &Model) -> Effect {
    let (week_start, week_end) = week_window(model.current_time, model.time_zone);

    let buttons: Vec<Button> = model
        .my_courses
        .iter()
        .filter_map(|course| {
            course
                .lectures
                .iter()
                .find(|l| l.start >= week_start && l.start < week_end)
                .map(|lecture| {
                    let time = render(lecture.start, model.time_zone);
                    Button::new(
                        format!("{} - {}", course.name, time),
                        Action::ShowTime(course.name.clone(), time),
                    )
                })
        })
        .collect();

    if buttons.is_empty() {
        Effect::text(NO_LECTURES_THIS_WEEK)
    } else {
        Effect::Reply(Reply::keyboard("🗓️ This week:", buttons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::{Catalog, Course, Lecture};
    use crate::features::conversation::action::ReplyMode;
    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, day, hour, 0, 0).unwrap()
    }

    fn lecture(start: DateTime<Utc>) -> Lecture {
        Lecture {
            start,
            end: start + Duration::minutes(90),
            location: None,
            kind: None,
        }
    }

    fn model() -> Model {
        let catalog = Catalog::new(vec![
            Course::new("Algebra", vec![lecture(at(3, 9)), lecture(at(5, 9))]),
            Course::new("Physics", vec![lecture(at(12, 11))]),
            Course::new("Logic", vec![]),
        ]);
        // Wednesday 2024-09-04
        Model::new(catalog.into_shared(), at(4, 12), FixedOffset::east_opt(0).unwrap())
    }

    fn texts(effects: &[Effect]) -> Vec<String> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Reply(r) => Some(r.text.clone()),
                Effect::Dispatch(_) => None,
            })
            .collect()
    }

    fn names(model: &Model) -> Vec<&str> {
        model.my_courses.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_start_enqueues_catalog_and_clock() {
        let now = at(6, 8);
        let (next, effects) = reduce(Action::Start(now), model());
        assert_eq!(
            effects,
            vec![
                Effect::text(WELCOME_TEXT),
                Effect::dispatch(Action::ShowAllCourses),
                Effect::dispatch(Action::SetTime(now)),
            ]
        );
        assert_eq!(next.current_time, at(4, 12), "Start itself does not move the clock");
    }

    #[test]
    fn test_show_all_courses_buttons_reveal() {
        let (_, effects) = reduce(Action::ShowAllCourses, model());
        let Effect::Reply(reply) = &effects[0] else {
            panic!("expected reply");
        };
        assert_eq!(reply.buttons.len(), 3);
        assert_eq!(
            reply.buttons[1].action,
            Action::RevealItemActions("Physics".into())
        );
    }

    #[test]
    fn test_show_all_courses_empty_catalog() {
        let empty = Model::new(
            Catalog::default().into_shared(),
            at(4, 12),
            FixedOffset::east_opt(0).unwrap(),
        );
        let (_, effects) = reduce(Action::ShowAllCourses, empty);
        assert_eq!(effects, vec![Effect::text(CATALOG_UNAVAILABLE)]);
    }

    #[test]
    fn test_add_item_prepends_and_is_idempotent() {
        let (m, effects) = reduce(Action::AddItem("Algebra".into()), model());
        assert_eq!(names(&m), vec!["Algebra"]);
        assert_eq!(texts(&effects), vec!["✅ Algebra added to your courses"]);

        let (m, _) = reduce(Action::AddItem("Physics".into()), m);
        assert_eq!(names(&m), vec!["Physics", "Algebra"]);

        let (m, effects) = reduce(Action::AddItem("Algebra".into()), m);
        assert_eq!(names(&m), vec!["Physics", "Algebra"]);
        assert_eq!(effects.len(), 1, "repeat add still confirms");
    }

    #[test]
    fn test_add_item_unknown_course_is_silent() {
        let (m, effects) = reduce(Action::AddItem("Alchemy".into()), model());
        assert!(m.my_courses.is_empty());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_add_item_sequences_never_duplicate() {
        let titles = ["Algebra", "Logic", "Algebra", "Physics", "Logic", "Algebra"];
        let mut m = model();
        for title in titles {
            m = reduce(Action::AddItem(title.into()), m).0;
            let mut seen = names(&m);
            let total = seen.len();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), total);
        }
        assert_eq!(names(&m), vec!["Physics", "Logic", "Algebra"]);
    }

    #[test]
    fn test_remove_item_then_show_items() {
        let m = reduce(Action::AddItem("Algebra".into()), model()).0;
        let m = reduce(Action::AddItem("Physics".into()), m).0;

        let (m, effects) = reduce(Action::RemoveItem("Algebra".into()), m);
        assert_eq!(names(&m), vec!["Physics"]);
        assert_eq!(effects[1], Effect::dispatch(Action::ShowItems));

        let (_, effects) = reduce(Action::ShowItems, m);
        let Effect::Reply(reply) = &effects[0] else {
            panic!("expected reply");
        };
        assert_eq!(reply.mode, ReplyMode::Update);
        assert!(reply.buttons.iter().all(|b| b.label != "Algebra"));
        assert_eq!(reply.buttons.len(), 1);
    }

    #[test]
    fn test_remove_missing_item_is_silent() {
        let (m, effects) = reduce(Action::RemoveItem("Algebra".into()), model());
        assert!(m.my_courses.is_empty());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_show_items_placeholder() {
        let (_, effects) = reduce(Action::ShowItems, model());
        assert_eq!(
            effects,
            vec![Effect::Reply(Reply::text(NO_COURSES_SELECTED).updating())]
        );
    }

    #[test]
    fn test_reveal_item_actions() {
        let (_, effects) = reduce(Action::RevealItemActions("Algebra".into()), model());
        let Effect::Reply(reply) = &effects[0] else {
            panic!("expected reply");
        };
        assert!(reply.text.contains("**Algebra**"));
        assert_eq!(reply.buttons[0].action, Action::AddItem("Algebra".into()));

        let m = reduce(Action::AddItem("Algebra".into()), model()).0;
        let (_, effects) = reduce(Action::RevealItemActions("Algebra".into()), m);
        let Effect::Reply(reply) = &effects[0] else {
            panic!("expected reply");
        };
        assert_eq!(reply.buttons[0].action, Action::RemoveItem("Algebra".into()));
        assert_eq!(reply.buttons[1].action, Action::SetReminderIn("Algebra".into()));

        let (_, effects) = reduce(Action::RevealItemActions("Alchemy".into()), model());
        assert_eq!(texts(&effects), vec!["Nothing to show for Alchemy"]);
    }

    #[test]
    fn test_set_reminder_in_adds_one_entry_per_lecture() {
        let m = reduce(Action::AddItem("Algebra".into()), model()).0;
        let (m, effects) = reduce(Action::SetReminderIn("Algebra".into()), m);

        assert_eq!(m.reminders.len(), 2);
        assert_eq!(m.reminders[0].due_at, Some(at(3, 9)));
        assert_eq!(m.reminders[1].due_at, Some(at(5, 9)));
        assert_eq!(m.reminders[0].label, "Algebra, lecture 1: Tue 03.09 09:00");
        assert_eq!(texts(&effects), vec!["⏰ Set 2 reminders for Algebra"]);

        // Appends, never replaces.
        let (m, _) = reduce(Action::SetReminderIn("Algebra".into()), m);
        assert_eq!(m.reminders.len(), 4);
    }

    #[test]
    fn test_set_reminder_in_requires_selected_course() {
        let (m, effects) = reduce(Action::SetReminderIn("Algebra".into()), model());
        assert!(m.reminders.is_empty());
        assert_eq!(
            texts(&effects),
            vec!["Add Algebra to your courses to set reminders"]
        );

        let m = reduce(Action::AddItem("Logic".into()), model()).0;
        let (m, effects) = reduce(Action::SetReminderIn("Logic".into()), m);
        assert!(m.reminders.is_empty());
        assert_eq!(texts(&effects), vec!["Logic has no lectures to remind you about"]);
    }

    #[test]
    fn test_show_reminder_lists_everything() {
        let (_, effects) = reduce(Action::ShowReminder("Algebra".into()), model());
        assert_eq!(texts(&effects), vec![NO_REMINDERS]);

        let mut m = model();
        m.reminders.push(ReminderEntry::new("Algebra, lecture 1", Some(at(3, 9))));
        m.reminders.push(ReminderEntry::new("Buy notebook", None));
        let (_, effects) = reduce(Action::ShowReminder("Physics".into()), m);
        let text = &texts(&effects)[0];
        assert!(text.starts_with("**Reminders** (1 pending)\n"));
        assert!(text.contains("⏰ Algebra, lecture 1"));
        assert!(text.contains("✔️ Buy notebook"));
    }

    #[test]
    fn test_add_reminder() {
        let (m, effects) = reduce(
            Action::AddReminder {
                label: "Exam".into(),
                due_at: Some(at(4, 14)),
            },
            model(),
        );
        assert_eq!(m.reminders, vec![ReminderEntry::new("Exam", Some(at(4, 14)))]);
        assert!(texts(&effects)[0].contains("Wed 04.09 14:00"));

        let (m, _) = reduce(
            Action::AddReminder {
                label: "Read chapter 2".into(),
                due_at: None,
            },
            m,
        );
        assert_eq!(m.reminders.len(), 2);
        assert!(!m.reminders[1].is_pending());
    }

    #[test]
    fn test_week_courses_first_lecture_only() {
        let m = reduce(Action::AddItem("Algebra".into()), model()).0;
        let m = reduce(Action::AddItem("Physics".into()), m).0;
        let (_, effects) = reduce(Action::WeekCourses, m);

        let Effect::Reply(reply) = &effects[0] else {
            panic!("expected reply");
        };
        // Physics is next week; Algebra has two lectures this week, and
        // Tuesday's is offered even though it is already Wednesday.
        assert_eq!(reply.buttons.len(), 1);
        assert_eq!(reply.buttons[0].label, "Algebra - Tue 03.09 09:00");
        assert_eq!(
            reply.buttons[0].action,
            Action::ShowTime("Algebra".into(), "Tue 03.09 09:00".into())
        );
    }

    #[test]
    fn test_week_courses_placeholder() {
        let (_, effects) = reduce(Action::WeekCourses, model());
        assert_eq!(texts(&effects), vec![NO_LECTURES_THIS_WEEK]);
    }

    #[test]
    fn test_show_time() {
        let (_, effects) = reduce(
            Action::ShowTime("Algebra".into(), "Tue 03.09 09:00".into()),
            model(),
        );
        assert_eq!(texts(&effects), vec!["Algebra - Tue 03.09 09:00"]);
    }

    #[test]
    fn test_todos() {
        let (m, _) = reduce(Action::AddToDo("Physics HW".into()), model());
        let (m, _) = reduce(Action::AddToDo("Algebra quiz".into()), m);
        let (m, _) = reduce(Action::AddToDo("Physics HW".into()), m);
        assert_eq!(m.todos, vec!["Physics HW", "Algebra quiz", "Physics HW"]);

        let (_, effects) = reduce(Action::ShowToDo("Physics".into()), m.clone());
        assert_eq!(texts(&effects), vec!["Physics HW\nPhysics HW"]);

        let (_, effects) = reduce(Action::ShowToDo("Chemistry".into()), m.clone());
        assert_eq!(texts(&effects), vec!["There is nothing todo in Chemistry"]);

        let (_, effects) = reduce(Action::ShowToDo("physics".into()), m.clone());
        assert_eq!(texts(&effects), vec!["There is nothing todo in physics"]);

        let (m, effects) = reduce(Action::RemoveToDo("Physics HW".into()), m);
        assert_eq!(m.todos, vec!["Algebra quiz"]);
        assert_eq!(effects.len(), 1);

        let (m, effects) = reduce(Action::RemoveToDo("Physics".into()), m);
        assert_eq!(m.todos, vec!["Algebra quiz"]);
        assert!(effects.is_empty());

        let (_, effects) = reduce(Action::ShowAllToDo, m);
        assert_eq!(texts(&effects), vec!["Algebra quiz"]);
    }

    #[test]
    fn test_show_all_todo_empty() {
        let (_, effects) = reduce(Action::ShowAllToDo, model());
        assert_eq!(texts(&effects), vec![NOTHING_TODO]);
    }

    #[test]
    fn test_set_time_and_no_action() {
        let (m, effects) = reduce(Action::SetTime(at(10, 0)), model());
        assert_eq!(m.current_time, at(10, 0));
        assert!(effects.is_empty());

        let (m, effects) = reduce(Action::NoAction, m);
        assert_eq!(m.current_time, at(10, 0));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_reduce_is_deterministic() {
        let actions = vec![
            Action::AddItem("Algebra".into()),
            Action::SetReminderIn("Algebra".into()),
            Action::AddToDo("Algebra HW".into()),
            Action::WeekCourses,
        ];
        let run = || {
            let mut m = model();
            let mut all = Vec::new();
            for action in actions.clone() {
                let (next, effects) = reduce(action, m);
                m = next;
                all.extend(effects);
            }
            (names(&m).join(","), m.reminders.clone(), m.todos.clone(), all)
        };
        assert_eq!(run(), run());
    }
}
