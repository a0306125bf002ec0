//! Display strings and the RSS feed built from the sorted show list.

use std::collections::HashSet;

use chrono::NaiveDate;
use rss::{ChannelBuilder, ItemBuilder};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::ordering::sort_date;
use crate::ShowOccurrence;

pub const TBA: &str = "TBA";

/// Date as stored alongside the show, e.g. "Tuesday, Jan 27"; "TBA" when unknown.
pub fn display_date(show: &ShowOccurrence) -> String {
    match show.resolved_date {
        Some(date) => date.format("%A, %b %-d").to_string(),
        None => TBA.to_string(),
    }
}

/// Short card label: the show's date, or the next date it runs, e.g. "Jan 27".
pub fn date_label(show: &ShowOccurrence, today: NaiveDate) -> String {
    let date = sort_date(show, today);
    if date == NaiveDate::MAX {
        TBA.to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// "Rozco's Comedy" -> "rozcos-comedy"
pub fn venue_to_id(venue: &str) -> String {
    venue
        .to_lowercase()
        .replace(' ', "-")
        .replace('\'', "")
        .replace('&', "and")
}

/// Venue id used by the listing filters; pop-up bars share "pop-up".
pub fn filter_venue_id(venue: &str, catalog: &Catalog) -> String {
    if catalog.is_popup(venue) {
        "pop-up".to_string()
    } else {
        venue_to_id(venue)
    }
}

/// Ticket link for a show: trusted scraped link, curated table, slug, venue page.
pub fn event_url(show: &ShowOccurrence, catalog: &Catalog) -> Option<String> {
    catalog
        .ticket_urls
        .event_url(&show.clean_name, &show.venue, show.source_url.as_deref())
}

/// One line per show for terminal output.
pub fn listing_line(show: &ShowOccurrence, today: NaiveDate) -> String {
    let day = if show.resolved_day_code.is_empty() {
        "---".to_string()
    } else {
        show.resolved_day_code.to_uppercase()
    };
    let mut line = format!(
        "{day} {:<7} {:>8}  {} @ {}",
        date_label(show, today),
        show.resolved_time.as_deref().unwrap_or(""),
        show.clean_name,
        show.venue
    );
    if show.is_free {
        line.push_str("  [FREE]");
    }
    if show.is_sold_out {
        line.push_str("  [SOLD OUT]");
    }
    line
}

/// Generate an RSS feed from a sorted list of shows
pub fn generate_rss(
    shows: &[ShowOccurrence],
    catalog: &Catalog,
    today: NaiveDate,
    channel_title: &str,
    channel_link: &str,
    channel_description: &str,
) -> Result<String> {
    let mut items = Vec::new();
    let mut used_guids = HashSet::new();

    for show in shows {
        // Build description from available fields
        let mut description_parts = vec![format!("Venue: {}", show.venue)];

        description_parts.push(format!("Date: {}", display_date(show)));
        if show.resolved_date.is_none() && !show.resolved_day_code.is_empty() {
            description_parts.push(format!("Next: {}", date_label(show, today)));
        }

        if let Some(ref time) = show.resolved_time {
            description_parts.push(format!("Time: {}", time));
        }

        if show.is_free {
            description_parts.push("Free show".to_string());
        }
        if show.is_sold_out {
            description_parts.push("Sold out".to_string());
        }

        if let Some(ref image) = show.image_url {
            description_parts.push(format!("<img src=\"{}\" alt=\"Flyer\" />", image));
        }

        // A scraped page shared by several shows is only a permalink for the
        // first; the rest fall back to their identity keys.
        let guid = match show.source_url {
            Some(ref url) if used_guids.insert(url.clone()) => rss::Guid {
                value: url.clone(),
                permalink: true,
            },
            _ => rss::Guid {
                value: show.identity_key.clone(),
                permalink: false,
            },
        };

        let mut item_builder = ItemBuilder::default();
        item_builder.title(format!("{} @ {}", show.clean_name, show.venue));
        if let Some(url) = event_url(show, catalog) {
            item_builder.link(url);
        }
        item_builder.categories(vec![rss::Category {
            name: filter_venue_id(&show.venue, catalog),
            domain: None,
        }]);
        item_builder.description(description_parts.join("<br/>\n"));
        item_builder.guid(guid);
        if let Some(date) = show.resolved_date {
            item_builder.pub_date(
                date.and_hms_opt(0, 0, 0)
                    .map(|dt| dt.and_utc().to_rfc2822())
                    .unwrap_or_default(),
            );
        }

        items.push(item_builder.build());
    }

    let channel = ChannelBuilder::default()
        .title(channel_title)
        .link(channel_link)
        .description(channel_description)
        .items(items)
        .build();

    let mut buf = Vec::new();
    channel.write_to(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}
