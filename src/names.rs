//! Show-name cleanup: poster alt text, venue suffixes, date prefixes.

use std::sync::LazyLock;

use regex::Regex;

static RE_POSTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)poster for\s+([^,\n]+)").unwrap());

static RE_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}\s+").unwrap());

static RE_TIME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+\d{1,2}(?::\d{2})?\s*[ap]m\s*$").unwrap());

/// Display name for a scraped show.
///
/// The result is never empty for a non-empty `raw`.
pub fn clean_name(raw: &str, venue: &str) -> String {
    let mut name = second_line(raw);

    if let Some(caps) = RE_POSTER.captures(&name) {
        name = caps[1].trim().to_string();
    }

    name = strip_venue_suffix(&name, venue).to_string();
    name = name
        .trim_end_matches('…')
        .trim_end_matches("...")
        .trim()
        .to_string();
    name = normalize_show_name(&name);

    if !name.is_empty() {
        name
    } else if !raw.trim().is_empty() {
        raw.trim().to_string()
    } else {
        raw.to_string()
    }
}

/// Drop "12/17 " date prefixes and " 7pm" time suffixes, collapse whitespace.
pub fn normalize_show_name(name: &str) -> String {
    let name = RE_DATE_PREFIX.replace(name.trim(), "");
    let name = RE_TIME_SUFFIX.replace(&name, "");
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Card titles sometimes come as "Venue\nShow"; the show is on the second line.
fn second_line(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    match lines.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [_, second, ..] => second.to_string(),
    }
}

/// Remove ", Venue" / " at Venue" when the suffix really names the venue.
/// "Christmas at the Creek" keeps its text.
fn strip_venue_suffix<'a>(name: &'a str, venue: &str) -> &'a str {
    let lower = name.to_ascii_lowercase();
    let cut = [", ", " at "]
        .iter()
        .filter_map(|sep| lower.rfind(sep).map(|i| (i, sep.len())))
        .max_by_key(|(i, _)| *i);

    match cut {
        Some((i, len)) if names_venue(&name[i + len..], venue) => name[..i].trim(),
        _ => name,
    }
}

fn names_venue(suffix: &str, venue: &str) -> bool {
    let suffix = without_article(suffix);
    let venue = without_article(venue);
    !venue.is_empty() && (suffix == venue || suffix.starts_with(&venue))
}

fn without_article(s: &str) -> String {
    let lower = s.trim().to_lowercase();
    lower
        .strip_prefix("the ")
        .map(str::to_string)
        .unwrap_or(lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREEK: &str = "Creek and the Cave";

    #[test]
    fn poster_alt_text() {
        assert_eq!(
            clean_name("Poster for Banana Phone, Creek and the Cave", CREEK),
            "Banana Phone"
        );
        assert_eq!(
            clean_name("Poster for Power Bomb! at The Velveeta Room", "The Velveeta Room"),
            "Power Bomb!"
        );
    }

    #[test]
    fn venue_suffix_only_when_it_is_the_venue() {
        assert_eq!(clean_name("Dunk Tank, Creek and the Cave", CREEK), "Dunk Tank");
        assert_eq!(
            clean_name("Christmas at the Creek", CREEK),
            "Christmas at the Creek"
        );
        assert_eq!(
            clean_name("Roast Battle: Austin, Texas", CREEK),
            "Roast Battle: Austin, Texas"
        );
    }

    #[test]
    fn newline_separated_card_title() {
        assert_eq!(clean_name("Creek and the Cave\nGator Tales\n", CREEK), "Gator Tales");
        assert_eq!(clean_name("  Gator Tales  ", CREEK), "Gator Tales");
    }

    #[test]
    fn truncation_and_prefixes() {
        assert_eq!(clean_name("Comedians on the Ri...", CREEK), "Comedians on the Ri");
        assert_eq!(clean_name("The Hump…", "The Velveeta Room"), "The Hump");
        assert_eq!(normalize_show_name("12/17 Eastside Open Mic 9Pm"), "Eastside Open Mic");
        assert_eq!(normalize_show_name("Friday  Night   Laughs 7pm"), "Friday Night Laughs");
    }

    #[test]
    fn never_empty_for_non_empty_input() {
        assert_eq!(clean_name("...", CREEK), "...");
        assert_eq!(clean_name("Poster for , Creek", CREEK), "Poster for , Creek");
        assert_eq!(clean_name("", CREEK), "");
    }
}
