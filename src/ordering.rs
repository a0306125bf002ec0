//! Chronological ordering of the final show list.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::ShowOccurrence;
use crate::times::time_sort_value;
use crate::weekday::next_occurrence_of;

/// Date a show sorts under: its own date, else the next occurrence of its
/// weekday, else [`NaiveDate::MAX`] so undated shows go last.
pub fn sort_date(show: &ShowOccurrence, today: NaiveDate) -> NaiveDate {
    show.resolved_date
        .or_else(|| next_occurrence_of(&show.resolved_day_code, today))
        .unwrap_or(NaiveDate::MAX)
}

/// Order by date, hour of day, name; venue and identity key break the
/// remaining ties so the result never depends on input order.
pub fn compare(a: &ShowOccurrence, b: &ShowOccurrence, today: NaiveDate) -> Ordering {
    sort_date(a, today)
        .cmp(&sort_date(b, today))
        .then_with(|| {
            time_sort_value(a.resolved_time.as_deref())
                .cmp(&time_sort_value(b.resolved_time.as_deref()))
        })
        .then_with(|| a.clean_name.cmp(&b.clean_name))
        .then_with(|| a.venue.cmp(&b.venue))
        .then_with(|| a.identity_key.cmp(&b.identity_key))
}

pub fn sort_shows(shows: &mut [ShowOccurrence], today: NaiveDate) {
    shows.sort_by(|a, b| compare(a, b, today));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn show(name: &str, date: Option<NaiveDate>, day: &str, time: Option<&str>) -> ShowOccurrence {
        ShowOccurrence {
            raw_name: name.to_string(),
            clean_name: name.to_string(),
            venue: "Creek and the Cave".to_string(),
            resolved_date: date,
            resolved_day_code: day.to_string(),
            resolved_time: time.map(str::to_string),
            identity_key: name.to_lowercase(),
            ..ShowOccurrence::default()
        }
    }

    #[test]
    fn undated_goes_last() {
        // 2026-01-05 is a Monday
        let today = date(2026, 1, 5);
        let tonight = show("Clocked Out Comedy", Some(today), "mon", Some("10:00 PM"));
        let unknown = show("Mystery Show", None, "", None);

        let mut a = vec![unknown.clone(), tonight.clone()];
        let mut b = vec![tonight.clone(), unknown.clone()];
        sort_shows(&mut a, today);
        sort_shows(&mut b, today);
        assert_eq!(a, vec![tonight.clone(), unknown.clone()]);
        assert_eq!(a, b);
    }

    #[test]
    fn recurring_shows_sort_by_next_occurrence() {
        let today = date(2026, 1, 5);
        let sunday = show("Banana Phone", None, "sun", Some("10:00 PM"));
        let tuesday = show("Dunk Tank", None, "tue", Some("8:00 PM"));
        let wednesday_dated = show("Off the Cuff", Some(date(2026, 1, 7)), "wed", None);

        let mut shows = vec![sunday.clone(), wednesday_dated.clone(), tuesday.clone()];
        sort_shows(&mut shows, today);
        assert_eq!(shows, vec![tuesday, wednesday_dated, sunday]);
    }

    #[test]
    fn time_then_name_within_a_day() {
        let today = date(2026, 1, 5);
        let day = Some(date(2026, 1, 9));
        let late = show("Roast Battle", day, "fri", Some("11:00 PM"));
        let early_b = show("Big Naturals", day, "fri", Some("8:00 PM"));
        let early_a = show("Alpha Show", day, "fri", Some("8:30 PM"));
        let untimed = show("Aardvark", day, "fri", None);

        let mut shows = vec![untimed.clone(), late.clone(), early_b.clone(), early_a.clone()];
        sort_shows(&mut shows, today);
        assert_eq!(shows, vec![early_a, early_b, late, untimed]);
    }

    #[test]
    fn sorting_is_idempotent_and_total() {
        let today = date(2026, 1, 5);
        let shows = vec![
            show("B", None, "fri", Some("8:00 PM")),
            show("A", None, "fri", Some("8:00 PM")),
            show("C", Some(date(2026, 1, 6)), "tue", None),
            show("D", None, "", None),
            show("E", None, "", Some("7:00 PM")),
        ];
        for a in &shows {
            for b in &shows {
                assert_eq!(compare(a, b, today), compare(b, a, today).reverse());
            }
        }
        let mut once = shows.clone();
        sort_shows(&mut once, today);
        let mut twice = once.clone();
        sort_shows(&mut twice, today);
        assert_eq!(once, twice);
    }
}
