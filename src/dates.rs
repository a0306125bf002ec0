//! Free-text show dates as venues print them.
//!
//! Handles "Tuesday, Jan 27", "Jan 27", "January 27, 2026", "12/21/2025 7:00 PM"
//! and friends. Dates without a year are placed in the reference year and rolled
//! forward when that would put them more than a month in the past.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, Month, NaiveDate};
use regex::Regex;

use crate::weekday::weekday_from_name;

/// How far behind the reference date a year-less date may fall before it is
/// taken to mean next year.
pub const ROLL_FORWARD_DAYS: i64 = 30;

static RE_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap());

static RE_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?(?:\s|$)").unwrap());

static RE_TEXTUAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]+)\s+(\d{1,2})\b(?:,?\s+(\d{4})\b)?").unwrap()
});

/// Month, day and (when printed) year pulled out of a date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateParts {
    month: u32,
    day: u32,
    year: Option<i32>,
}

/// Parse a venue date string relative to `reference` (normally today).
///
/// A bare weekday ("Tuesday") carries no absolute date and yields `None`, as
/// does anything unrecognised.
pub fn parse_date(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let tidy = tidy(text);
    let rest = strip_weekday(&tidy);
    if rest.is_empty() {
        return None;
    }

    // Each pattern captures a printed year before falling back to month/day only.
    let parts = numeric_parts(rest).or_else(|| textual_parts(rest))?;

    match parts.year {
        Some(year) => NaiveDate::from_ymd_opt(year, parts.month, parts.day),
        None => in_reference_year(parts.month, parts.day, reference),
    }
}

/// Collapse whitespace, drop ordinal suffixes ("27th") and periods ("Dec.").
fn tidy(text: &str) -> String {
    let collapsed = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('.', "");
    RE_ORDINAL.replace_all(&collapsed, "$1").into_owned()
}

/// Remove a leading weekday token ("Tuesday," / "Tue") if there is one.
fn strip_weekday(text: &str) -> &str {
    let text = text.trim();
    match text.split_once(' ') {
        Some((first, rest)) if weekday_from_name(first).is_some() => {
            rest.trim_start_matches(',').trim()
        }
        None if weekday_from_name(text).is_some() => "",
        _ => text,
    }
}

fn numeric_parts(text: &str) -> Option<DateParts> {
    let caps = RE_NUMERIC.captures(text)?;
    let month = caps[1].parse().ok()?;
    let day = caps[2].parse().ok()?;
    let year = match caps.get(3) {
        Some(y) if y.as_str().len() == 2 => Some(2000 + y.as_str().parse::<i32>().ok()?),
        Some(y) => Some(y.as_str().parse().ok()?),
        None => None,
    };
    Some(DateParts { month, day, year })
}

fn textual_parts(text: &str) -> Option<DateParts> {
    let caps = RE_TEXTUAL.captures(text)?;
    let month = month_number(&caps[1])?;
    let day = caps[2].parse().ok()?;
    let year = match caps.get(3) {
        Some(y) => Some(y.as_str().parse().ok()?),
        None => None,
    };
    Some(DateParts { month, day, year })
}

/// "Jan", "January", "sept" -> month number.
fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let name = if lower == "sept" { "sep" } else { lower.as_str() };
    name.parse::<Month>().ok().map(|m| m.number_from_month())
}

fn in_reference_year(month: u32, day: u32, reference: NaiveDate) -> Option<NaiveDate> {
    let year = reference.year();
    // Feb 29 outside a leap year can only mean the next leap year we would roll into.
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year + 1, month, day))?;
    if date < reference - Duration::days(ROLL_FORWARD_DAYS) {
        NaiveDate::from_ymd_opt(date.year() + 1, month, day)
    } else {
        Some(date)
    }
}
