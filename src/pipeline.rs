//! Scrape output -> normalized, filtered, de-duplicated, sorted shows.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::dates::parse_date;
use crate::identity::{build_identity_key, dedup};
use crate::names::clean_name;
use crate::ordering::sort_shows;
use crate::times::normalize_time;
use crate::weekday::{day_from_description, day_from_show_name, derive_day_code, leading_weekday};
use crate::{RawShow, ShowOccurrence};

/// Shows dated further out than this many days are left out of a listing.
pub const DEFAULT_WINDOW_DAYS: u32 = 10;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub today: NaiveDate,
    /// Keep dated shows up to this many days ahead; `None` keeps every future date.
    pub window_days: Option<u32>,
    /// Lower-case venue substrings to drop entirely.
    pub excluded_venues: Vec<String>,
}

impl PipelineOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            window_days: Some(DEFAULT_WINDOW_DAYS),
            excluded_venues: Vec::new(),
        }
    }

    fn excludes_venue(&self, venue: &str) -> bool {
        let venue = venue.to_lowercase();
        self.excluded_venues
            .iter()
            .any(|v| venue.contains(v.to_lowercase().as_str()))
    }

    /// Undated shows are always kept; dated ones must not be past or beyond the window.
    fn in_window(&self, show: &ShowOccurrence) -> bool {
        let Some(date) = show.resolved_date else {
            return true;
        };
        if date < self.today {
            return false;
        }
        // A window reaching past the calendar's end has no upper bound.
        let last = self
            .window_days
            .and_then(|days| Duration::try_days(i64::from(days)))
            .and_then(|days| self.today.checked_add_signed(days));
        match last {
            Some(last) => date <= last,
            None => true,
        }
    }
}

/// Normalize one scraped show.
///
/// Never fails: whatever cannot be resolved is left empty and the show is
/// still returned.
pub fn normalize(raw: &RawShow, catalog: &Catalog, today: NaiveDate) -> ShowOccurrence {
    let clean_name = clean_name(&raw.name, &raw.venue);
    let raw_date = non_empty(raw.date_text.as_deref());
    let raw_time = non_empty(raw.time_text.as_deref());
    let known = catalog.known_shows.resolve(&clean_name, &raw.venue);

    let mut resolved_date = raw_date.and_then(|text| parse_date(text, today));

    let day = match known {
        Some(entry) => {
            // The table owns the day of a recurring show; a contradicting
            // scraped date is dropped rather than allowed to disagree.
            if let Some(date) = resolved_date
                && date.weekday() != entry.day
            {
                debug!(
                    show = %clean_name,
                    venue = %raw.venue,
                    scraped = %date,
                    known = %entry.day,
                    "scraped date disagrees with recurring day, ignoring it"
                );
                resolved_date = None;
            }
            Some(entry.day)
        }
        None => resolved_date
            .map(|date| date.weekday())
            .or_else(|| raw_date.and_then(leading_weekday))
            .or_else(|| day_from_show_name(&raw.name))
            .or_else(|| raw.description.as_deref().and_then(day_from_description)),
    };
    let resolved_day_code = derive_day_code(resolved_date, day, today);

    let scraped_time = raw_time
        .and_then(normalize_time)
        .or_else(|| raw_date.and_then(normalize_time))
        .or_else(|| normalize_time(&raw.name));
    let resolved_time = known
        .and_then(|entry| entry.time.clone())
        .or_else(|| scraped_time.clone());

    let date_field = resolved_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .or_else(|| raw_date.map(str::to_string))
        .unwrap_or_default();
    let keyed_time = if catalog.is_showtime_keyed(&raw.venue) {
        scraped_time.or_else(|| resolved_time.clone())
    } else {
        resolved_time.clone()
    };
    let time_field = keyed_time
        .or_else(|| raw_time.map(str::to_string))
        .unwrap_or_default();
    let identity_key = build_identity_key(&clean_name, &raw.venue, &date_field, &time_field);

    ShowOccurrence {
        raw_name: raw.name.clone(),
        is_free: catalog.free_shows.is_free(&clean_name, &raw.venue),
        is_sold_out: catalog.is_sold_out(&clean_name),
        clean_name,
        venue: raw.venue.clone(),
        raw_date: raw.date_text.clone(),
        raw_time: raw.time_text.clone(),
        resolved_date,
        resolved_day_code,
        resolved_time,
        image_url: raw.image_url.clone(),
        source_url: raw.source_url.clone(),
        identity_key,
    }
}

/// Normalize every scraped show, drop excluded venues and out-of-window
/// dates, de-duplicate and sort.
pub fn process(raws: &[RawShow], catalog: &Catalog, options: &PipelineOptions) -> Vec<ShowOccurrence> {
    let shows: Vec<ShowOccurrence> = raws
        .iter()
        .filter(|raw| !options.excludes_venue(&raw.venue))
        .map(|raw| normalize(raw, catalog, options.today))
        .filter(|show| options.in_window(show))
        .collect();
    let in_window = shows.len();

    let mut shows = dedup(shows);
    sort_shows(&mut shows, options.today);

    info!(
        scraped = raws.len(),
        in_window,
        kept = shows.len(),
        "processed shows"
    );
    shows
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREEK: &str = "Creek and the Cave";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw(name: &str, venue: &str, date: Option<&str>, time: Option<&str>) -> RawShow {
        RawShow {
            name: name.to_string(),
            venue: venue.to_string(),
            date_text: date.map(str::to_string),
            time_text: time.map(str::to_string),
            ..RawShow::default()
        }
    }

    #[test]
    fn banana_phone_from_poster_alt() {
        let catalog = Catalog::austin();
        let show = normalize(
            &raw("Poster for Banana Phone, Creek and the Cave", CREEK, None, None),
            &catalog,
            date(2026, 1, 5),
        );
        assert_eq!(show.clean_name, "Banana Phone");
        assert_eq!(show.resolved_day_code, "sun");
        assert_eq!(show.resolved_time.as_deref(), Some("10:00 PM"));
        assert!(show.is_free);
        assert_eq!(show.resolved_date, None);
    }

    #[test]
    fn known_day_beats_scraped_date() {
        let catalog = Catalog::austin();
        // Jan 13 2026 is a Tuesday; the Monday Gamble runs Mondays.
        let show = normalize(
            &raw("The Monday Gamble Mic", CREEK, Some("Tuesday, Jan 13"), Some("9pm")),
            &catalog,
            date(2026, 1, 5),
        );
        assert_eq!(show.resolved_day_code, "mon");
        assert_eq!(show.resolved_date, None);
        assert_eq!(show.resolved_time.as_deref(), Some("8:00 PM"));
    }

    #[test]
    fn agreeing_date_is_kept() {
        let catalog = Catalog::austin();
        let show = normalize(
            &raw("The Monday Gamble Mic", CREEK, Some("Monday, Jan 12"), None),
            &catalog,
            date(2026, 1, 5),
        );
        assert_eq!(show.resolved_date, Some(date(2026, 1, 12)));
        assert_eq!(show.resolved_day_code, "mon");
    }

    #[test]
    fn scraped_time_fills_open_table_time() {
        let catalog = Catalog::austin();
        let show = normalize(
            &raw("Friday Night Laughs", "Rozco's Comedy", None, Some("7pm")),
            &catalog,
            date(2026, 1, 5),
        );
        assert_eq!(show.resolved_day_code, "fri");
        assert_eq!(show.resolved_time.as_deref(), Some("7:00 PM"));
    }

    #[test]
    fn fallbacks_without_table_entry() {
        let catalog = Catalog::austin();
        let today = date(2026, 1, 5);

        let dated = normalize(
            &raw("Headliner", "Cap City Comedy", Some("12/21/2026 7:00 PM"), None),
            &catalog,
            today,
        );
        assert_eq!(dated.resolved_date, Some(date(2026, 12, 21)));
        assert_eq!(dated.resolved_day_code, "mon");
        assert_eq!(dated.resolved_time.as_deref(), Some("7:00 PM"));

        let day_only = normalize(&raw("Late Set", "Vulcan Gas Company", Some("Thursday"), None), &catalog, today);
        assert_eq!(day_only.resolved_day_code, "thu");
        assert_eq!(day_only.resolved_date, None);

        let from_title = normalize(&raw("SATURDAY LATE SHOW", "Comedy Mothership", None, None), &catalog, today);
        assert_eq!(from_title.resolved_day_code, "sat");

        let mut described = raw("Open Floor", "Vulcan Gas Company", None, None);
        described.description = Some("Every Wednesday night at 9".to_string());
        assert_eq!(normalize(&described, &catalog, today).resolved_day_code, "wed");

        let unknown = normalize(&raw("Mystery", "Vulcan Gas Company", Some("TBA"), None), &catalog, today);
        assert_eq!(unknown.resolved_day_code, "");
        assert_eq!(unknown.resolved_time, None);
        assert_eq!(unknown.identity_key, "mystery|Vulcan Gas Company|TBA|");
    }

    #[test]
    fn showtime_keyed_venue_keeps_sittings_apart() {
        let mut catalog = Catalog::austin();
        catalog.known_shows = crate::known_shows::KnownShowTable::new(vec![
            crate::known_shows::VenueShows {
                venue_match: "cap city".into(),
                shows: vec![crate::known_shows::KnownShow {
                    pattern: "headliner".into(),
                    day: chrono::Weekday::Fri,
                    time: Some("8:00 PM".into()),
                }],
            },
        ]);
        let today = date(2026, 1, 5);
        let early = normalize(&raw("Headliner", "Cap City Comedy", Some("Jan 9"), Some("7pm")), &catalog, today);
        let late = normalize(&raw("Headliner", "Cap City Comedy", Some("Jan 9"), Some("9:30pm")), &catalog, today);
        assert_eq!(early.resolved_time, late.resolved_time);
        assert_ne!(early.identity_key, late.identity_key);
    }

    #[test]
    fn process_filters_dedups_and_sorts() {
        let catalog = Catalog::austin();
        let mut options = PipelineOptions::new(date(2026, 1, 5));
        options.excluded_venues.push("paramount".to_string());

        let raws = vec![
            raw("Mystery", "Vulcan Gas Company", Some("TBA"), None),
            raw("Poster for Banana Phone, Creek and the Cave", CREEK, None, None),
            raw("Banana Phone", CREEK, None, None),
            raw("Old Show", "Vulcan Gas Company", Some("Jan 1"), Some("8pm")),
            raw("Far Show", "Vulcan Gas Company", Some("Feb 20"), Some("8pm")),
            raw("Big Night", "Paramount Theatre", Some("Jan 6"), Some("8pm")),
            raw("Tonight", "Vulcan Gas Company", Some("Jan 5"), Some("9pm")),
        ];
        let shows = process(&raws, &catalog, &options);
        let names: Vec<&str> = shows.iter().map(|s| s.clean_name.as_str()).collect();
        assert_eq!(names, vec!["Tonight", "Banana Phone", "Mystery"]);
    }

    #[test]
    fn huge_window_keeps_every_future_date() {
        let catalog = Catalog::austin();
        let mut options = PipelineOptions::new(date(2026, 1, 5));
        options.window_days = Some(u32::MAX);

        let raws = vec![
            raw("Far Show", "Vulcan Gas Company", Some("Feb 20"), Some("8pm")),
            raw("Old Show", "Vulcan Gas Company", Some("Jan 1"), Some("8pm")),
        ];
        let names: Vec<String> = process(&raws, &catalog, &options)
            .into_iter()
            .map(|s| s.clean_name)
            .collect();
        assert_eq!(names, vec!["Far Show".to_string()]);

        options.window_days = Some(0);
        assert!(process(&raws, &catalog, &options).is_empty());
    }
}
