//! Identity keys and deduplication of show occurrences.

use std::collections::HashMap;

use crate::ShowOccurrence;

/// Stable key for one real-world occurrence:
/// `lowercase(name)|venue|date|time`.
///
/// `date_field` is the resolved ISO date when known, else the raw scraped
/// text, so two identical unresolved strings still collapse together.
/// `time_field` follows the same rule for times.
pub fn build_identity_key(
    clean_name: &str,
    venue: &str,
    date_field: &str,
    time_field: &str,
) -> String {
    format!(
        "{}|{}|{}|{}",
        clean_name.trim().to_lowercase(),
        venue.trim(),
        date_field.trim(),
        time_field.trim()
    )
}

/// Number of resolved fields; the more complete record survives dedup.
fn completeness(show: &ShowOccurrence) -> u8 {
    u8::from(show.resolved_date.is_some()) + u8::from(show.resolved_time.is_some())
}

/// Keep one occurrence per identity key.
///
/// The record with more resolved fields wins; on a tie the first one seen is
/// kept. Output follows the order in which keys were first seen.
pub fn dedup(shows: Vec<ShowOccurrence>) -> Vec<ShowOccurrence> {
    let mut slot_by_key: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<ShowOccurrence> = Vec::with_capacity(shows.len());

    for show in shows {
        match slot_by_key.get(&show.identity_key) {
            Some(&slot) => {
                if completeness(&show) > completeness(&kept[slot]) {
                    tracing::debug!(key = %show.identity_key, "replacing less complete duplicate");
                    kept[slot] = show;
                }
            }
            None => {
                slot_by_key.insert(show.identity_key.clone(), kept.len());
                kept.push(show);
            }
        }
    }
    kept
}
