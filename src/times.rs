//! Show times: "8PM", "8:00 pm", "20:00", "8 & 10 PM" -> canonical "H:MM AM/PM".

use std::sync::LazyLock;

use chrono::Month;
use regex::Regex;

/// Sort value for shows without a usable time; after every real hour.
pub const NO_TIME: u32 = 24;

// An optional second time joined with "&", "and", "/", "-" or "," shares the
// meridiem of the last one, e.g. "8 & 10 PM", "8-10pm".
static RE_MERIDIEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*(?:(?:&|and|/|-|–|,)\s*\d{1,2}(?::\d{2})?\s*)?([ap])\.?\s*m\b",
    )
    .unwrap()
});

static RE_TRAILING_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b([a-z]{3,9})\.?\s*$").unwrap());

static RE_24H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").unwrap());

/// Normalize the first time in `text` to "H:MM AM" / "H:MM PM".
///
/// A bare "20:00" is read as a 24-hour clock, but only for hours that cannot be
/// mistaken for an afternoon time missing its meridiem ("7:00" stays unknown).
pub fn normalize_time(text: &str) -> Option<String> {
    // Rejected candidates restart the search one byte in, so a joined match
    // like "27, 8pm" cannot swallow the real time behind it.
    let mut from = 0;
    while let Some(caps) = RE_MERIDIEM.captures_at(text, from) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        from = whole.start() + 1;

        let Ok(hour) = caps[1].parse::<u32>() else {
            continue;
        };
        let minute = match caps.get(2) {
            Some(m) => m.as_str().parse::<u32>().unwrap_or(60),
            None => 0,
        };
        if !(1..=12).contains(&hour) || minute > 59 {
            continue;
        }
        // "Jan 7, 9pm" is a day of the month followed by a time, not two times.
        if whole.as_str().contains(',') && follows_month(&text[..whole.start()]) {
            continue;
        }
        let meridiem = if caps[3].eq_ignore_ascii_case("a") { "AM" } else { "PM" };
        return Some(format!("{hour}:{minute:02} {meridiem}"));
    }

    let caps = RE_24H.captures(text)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    match hour {
        0 => Some(format!("12:{minute:02} AM")),
        12 => Some(format!("12:{minute:02} PM")),
        13..=23 => Some(format!("{}:{minute:02} PM", hour - 12)),
        _ => None,
    }
}

fn follows_month(before: &str) -> bool {
    RE_TRAILING_MONTH
        .captures(before)
        .is_some_and(|caps| {
            let word = caps[1].to_lowercase();
            word == "sept" || word.parse::<Month>().is_ok()
        })
}

/// Hour of day (0-23) for ordering; [`NO_TIME`] when missing or unparseable.
pub fn time_sort_value(time: Option<&str>) -> u32 {
    let Some(canonical) = time.and_then(normalize_time) else {
        return NO_TIME;
    };
    let Some((hour, rest)) = canonical.split_once(':') else {
        return NO_TIME;
    };
    let Ok(hour) = hour.parse::<u32>() else {
        return NO_TIME;
    };
    match (rest.ends_with("AM"), hour) {
        (true, 12) => 0,
        (true, h) => h,
        (false, 12) => 12,
        (false, h) => h + 12,
    }
}
