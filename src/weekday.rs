//! Weekday codes (`mon`..`sun`) and the helpers that derive them.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Day codes in Monday-first order.
pub const DAY_CODES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

const FULL_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Three-letter lowercase code for a weekday.
pub fn day_code(day: Weekday) -> &'static str {
    DAY_CODES[day.num_days_from_monday() as usize]
}

/// Parse one of the seven day codes back into a weekday.
pub fn parse_day_code(code: &str) -> Option<Weekday> {
    DAY_CODES
        .iter()
        .position(|c| c.eq_ignore_ascii_case(code.trim()))
        .map(|i| WEEKDAYS[i])
}

/// Parse a weekday name: full ("Tuesday"), three-letter ("Tue") or the
/// common long abbreviations ("Tues", "Thurs"). Trailing `,` and `.` are ignored.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let lower = name
        .trim()
        .trim_end_matches([',', '.'])
        .to_lowercase();
    if lower.len() < 3 || !lower.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    FULL_NAMES
        .iter()
        .position(|full| full.starts_with(lower.as_str()))
        .map(|i| WEEKDAYS[i])
}

/// Weekday that opens a date string: "Tuesday, Jan 27", "Sat Jan 10", "Sunday".
pub fn leading_weekday(text: &str) -> Option<Weekday> {
    text.split_whitespace().next().and_then(weekday_from_name)
}

/// Weekday word embedded in a show title, e.g. "FRIDAY LATE SHOW".
/// Only full names count; "Sunday Service" is Sunday, "Sun Tzu" is not.
pub fn day_from_show_name(name: &str) -> Option<Weekday> {
    let lower = name.to_lowercase();
    FULL_NAMES
        .iter()
        .position(|full| lower.contains(full))
        .map(|i| WEEKDAYS[i])
}

/// Recurrence phrases in free text: "every tuesday", "tuesday night", "tuesdays".
pub fn day_from_description(text: &str) -> Option<Weekday> {
    let lower = text.to_lowercase();
    FULL_NAMES
        .iter()
        .position(|full| {
            lower.contains(&format!("every {full}"))
                || lower.contains(&format!("{full} night"))
                || lower.contains(&format!("{full}s"))
        })
        .map(|i| WEEKDAYS[i])
}

/// Day code for an occurrence.
///
/// A concrete date always decides; otherwise a known weekday is used as-is;
/// with neither the code is empty.
pub fn derive_day_code(
    resolved_date: Option<NaiveDate>,
    known_day: Option<Weekday>,
    _reference: NaiveDate,
) -> String {
    if let Some(date) = resolved_date {
        return day_code(date.weekday()).to_string();
    }
    known_day.map(day_code).unwrap_or_default().to_string()
}

/// Next date on or after `reference` falling on `day_code`.
///
/// Returns `reference` itself when it already matches. Only meant for display
/// and ordering of undated recurring shows.
pub fn next_occurrence_of(day_code: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let target = parse_day_code(day_code)?;
    let ahead = (7 + target.num_days_from_monday() as i64
        - reference.weekday().num_days_from_monday() as i64)
        % 7;
    Some(reference + Duration::days(ahead))
}
