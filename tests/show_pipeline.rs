use atx_comedy_shows::dates::parse_date;
use atx_comedy_shows::identity::{build_identity_key, dedup};
use atx_comedy_shows::ordering::{compare, sort_shows};
use atx_comedy_shows::times::normalize_time;
use atx_comedy_shows::{Catalog, PipelineOptions, RawShow, ShowOccurrence, normalize, process};
use chrono::{NaiveDate, Weekday};

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
fn poster_alt_text_resolves_from_recurring_table() {
    let show = normalize(
        &raw("Poster for Banana Phone, Creek and the Cave", CREEK, None, None),
        &Catalog::austin(),
        date(2026, 1, 5),
    );
    assert_eq!(show.clean_name, "Banana Phone");
    assert_eq!(show.resolved_day_code, "sun");
    assert_eq!(show.resolved_time.as_deref(), Some("10:00 PM"));
    assert!(show.is_free);
}

#[test]
fn recurring_day_wins_over_scraped_date() {
    let catalog = Catalog::austin();
    assert_eq!(
        catalog
            .known_shows
            .resolve_known("The Monday Gamble Mic", CREEK),
        (Some(Weekday::Mon), Some("8:00 PM"))
    );
    let show = normalize(
        &raw("The Monday Gamble Mic", CREEK, Some("Tuesday, Jan 13"), None),
        &catalog,
        date(2026, 1, 5),
    );
    assert_eq!(show.resolved_day_code, "mon");
}

#[test]
fn year_roll_forward() {
    assert_eq!(parse_date("Jan 27", date(2025, 12, 20)), Some(date(2026, 1, 27)));
    assert_eq!(parse_date("Dec 16", date(2026, 1, 5)), Some(date(2026, 12, 16)));
}

#[test]
fn canonical_times() {
    assert_eq!(normalize_time("8pm").as_deref(), Some("8:00 PM"));
    assert_eq!(normalize_time("10:30 PM").as_deref(), Some("10:30 PM"));
    assert_eq!(normalize_time("8 & 10 PM").as_deref(), Some("8:00 PM"));
    assert_eq!(normalize_time(""), None);
}

#[test]
fn identity_key_is_pure() {
    let catalog = Catalog::austin();
    let input = raw("Dunk Tank Mic", CREEK, Some("Jan 6"), Some("8pm"));
    let a = normalize(&input, &catalog, date(2026, 1, 5));
    let b = normalize(&input, &catalog, date(2026, 1, 5));
    assert_eq!(a.identity_key, b.identity_key);
    assert_eq!(
        build_identity_key("Dunk Tank Mic", CREEK, "2026-01-06", "8:00 PM"),
        build_identity_key("Dunk Tank Mic", CREEK, "2026-01-06", "8:00 PM")
    );
}

#[test]
fn dedup_keeps_the_more_complete_record_in_any_order() {
    let complete = ShowOccurrence {
        clean_name: "Roast Battle".to_string(),
        venue: CREEK.to_string(),
        resolved_date: Some(date(2026, 1, 9)),
        resolved_time: Some("9:00 PM".to_string()),
        identity_key: "roast battle|Creek and the Cave|fri|".to_string(),
        ..ShowOccurrence::default()
    };
    let sparse = ShowOccurrence {
        resolved_date: None,
        resolved_time: None,
        ..complete.clone()
    };

    let ab = dedup(vec![complete.clone(), sparse.clone()]);
    let ba = dedup(vec![sparse, complete.clone()]);
    assert_eq!(ab, vec![complete.clone()]);
    assert_eq!(ba, vec![complete]);
}

#[test]
fn unparseable_shows_sort_last_and_sorting_is_stable() {
    let today = date(2026, 1, 5);
    let catalog = Catalog::austin();
    let tonight = normalize(
        &raw("Open Mic", "Vulcan Gas Company", Some("Jan 5"), Some("7pm")),
        &catalog,
        today,
    );
    let junk = normalize(
        &raw("Mystery", "Vulcan Gas Company", Some("someday"), Some("late")),
        &catalog,
        today,
    );
    assert_eq!(tonight.resolved_date, Some(today));
    assert_eq!(junk.resolved_date, None);

    for mut shows in [
        vec![junk.clone(), tonight.clone()],
        vec![tonight.clone(), junk.clone()],
    ] {
        sort_shows(&mut shows, today);
        assert_eq!(shows, vec![tonight.clone(), junk.clone()]);
        let again = {
            let mut copy = shows.clone();
            sort_shows(&mut copy, today);
            copy
        };
        assert_eq!(shows, again);
    }
    assert_eq!(compare(&tonight, &junk, today), compare(&junk, &tonight, today).reverse());
}

#[test]
fn full_run_over_mixed_sources() {
    let today = date(2026, 1, 5);
    let raws = vec![
        raw("Poster for Banana Phone, Creek and the Cave", CREEK, None, None),
        // calendar card, then the ShowClix page for the same night
        raw("Banana Phone", CREEK, Some("Sunday, Jan 11"), None),
        raw("Banana Phone", CREEK, Some("1/11/2026"), Some("10:00 PM")),
        raw("Dunk Tank Mic", CREEK, Some("Tuesday, Jan 6"), None),
        raw("Mystery", "Vulcan Gas Company", None, None),
    ];
    let shows = process(&raws, &Catalog::austin(), &PipelineOptions::new(today));
    let keys: Vec<&str> = shows.iter().map(|s| s.identity_key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "dunk tank mic|Creek and the Cave|2026-01-06|8:00 PM",
            "banana phone|Creek and the Cave|2026-01-11|10:00 PM",
            "banana phone|Creek and the Cave||10:00 PM",
            "mystery|Vulcan Gas Company||",
        ]
    );
    // equally complete duplicates keep the first one seen
    assert_eq!(shows[1].raw_date.as_deref(), Some("Sunday, Jan 11"));
    assert_eq!(shows[2].resolved_date, None);
    assert_eq!(shows[2].resolved_day_code, "sun");
}

#[test]
fn leap_day_without_year() {
    assert_eq!(parse_date("Feb 29", date(2027, 12, 20)), Some(date(2028, 2, 29)));
    assert_eq!(parse_date("Feb 29", date(2028, 3, 10)), Some(date(2028, 2, 29)));
    assert_eq!(parse_date("Feb 29", date(2026, 1, 10)), None);
}
