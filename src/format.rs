use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Human-readable "Updated ... ago" text relative to `now`
///
/// A unit is used once strictly more than one whole unit has elapsed, so
/// exactly one day reads as hours. Future instants read as "just now".
pub fn format_updated_ago(updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(updated) = updated else {
        return "Updated date unknown".to_string();
    };

    let seconds = (now - updated).num_seconds();

    let units = [
        (YEAR, "years"),
        (MONTH, "months"),
        (DAY, "days"),
        (HOUR, "hours"),
        (MINUTE, "minutes"),
    ];

    for (unit, name) in units {
        if seconds > unit {
            return format!("Updated {} {} ago", seconds / unit, name);
        }
    }

    "Updated just now".to_string()
}

/// Shorten a title to at most `max_chars` characters, ending in "..." when cut
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        title.to_string()
    } else {
        let kept: String = title.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
