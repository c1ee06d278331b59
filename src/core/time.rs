//! Rendering instants in a chat's offset and computing the local week window

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

/// Format used for every lecture and reminder time shown to users
pub const TIME_FORMAT: &str = "%a %d.%m %H:%M";

/// Render an instant in the given offset
pub fn render(at: DateTime<Utc>, tz: FixedOffset) -> String {
    at.with_timezone(&tz).format(TIME_FORMAT).to_string()
}

/// Half-open `[monday 00:00, next monday 00:00)` window, in local time,
/// of the week containing `now`.
pub fn week_window(now: DateTime<Utc>, tz: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let local = now.with_timezone(&tz);
    let days_from_monday = i64::from(local.weekday().num_days_from_monday());
    let monday = local.date_naive() - Duration::days(days_from_monday);
    let start_naive = monday.and_time(NaiveTime::default());

    // A fixed offset has no gaps or folds, so the mapping is always single.
    let start = tz
        .from_local_datetime(&start_naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now);

    (start, start + Duration::days(7))
}
