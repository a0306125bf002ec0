//! ShowClix ticket pages.
//! A venue listing page links to `showclix.com/event/<slug>` pages; each of
//! those embeds a schema.org `Event` as JSON-LD with the exact start time.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};
use reqwest::Client;
use scraper::Html;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::{RawShow, VenueScraper, absolute_url, fetch_page, selector};

const CREEK_LISTING_URL: &str = "https://www.creekandcave.com/calendar";

pub struct ShowClixScraper {
    venue: String,
    listing_url: String,
}

impl ShowClixScraper {
    pub fn new(venue: impl Into<String>, listing_url: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            listing_url: listing_url.into(),
        }
    }

    /// Creek and the Cave sells through ShowClix.
    pub fn creek_and_cave() -> Self {
        Self::new(crate::creek_cave::VENUE, CREEK_LISTING_URL)
    }
}

#[async_trait::async_trait]
impl VenueScraper for ShowClixScraper {
    fn venue_name(&self) -> &str {
        &self.venue
    }

    async fn fetch_shows(&self, client: &Client) -> Result<Vec<RawShow>> {
        let listing = fetch_page(client, &self.listing_url).await?;
        let links = parse_event_links(&listing, &self.listing_url)?;
        info!(venue = %self.venue, count = links.len(), "found ShowClix events");

        let mut shows = Vec::with_capacity(links.len());
        for url in links {
            let page = match fetch_page(client, &url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %url, error = %e, "skipping event page");
                    continue;
                }
            };
            match parse_event_page(&page, &self.venue, &url) {
                Ok(Some(show)) => shows.push(show),
                Ok(None) => warn!(url = %url, "no Event data on page"),
                Err(e) => warn!(url = %url, error = %e, "skipping event page"),
            }
        }
        Ok(shows)
    }
}

/// ShowClix event links on a listing page, one per event slug, in slug order.
pub fn parse_event_links(html: &str, base: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let link_sel = selector(r#"a[href*="showclix.com/event/"]"#)?;

    let mut by_slug = BTreeMap::new();
    for a in doc.select(&link_sel) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        let url = absolute_url(base, href);
        let Some(slug) = url
            .split("/event/")
            .nth(1)
            .and_then(|rest| rest.split(['?', '#']).next())
            .map(|slug| slug.trim_end_matches('/'))
            .filter(|slug| !slug.is_empty())
        else {
            continue;
        };
        by_slug.entry(slug.to_string()).or_insert(url);
    }
    Ok(by_slug.into_values().collect())
}

/// Show from the first JSON-LD `Event` on an event page, falling back to the
/// page's `<h1>` when the event has no name. `None` when neither names it.
pub fn parse_event_page(html: &str, venue: &str, url: &str) -> Result<Option<RawShow>> {
    let doc = Html::parse_document(html);
    let script_sel = selector(r#"script[type="application/ld+json"]"#)?;
    let h1_sel = selector("h1")?;

    let event = doc
        .select(&script_sel)
        .filter_map(|script| serde_json::from_str::<Value>(&script.text().collect::<String>()).ok())
        .flat_map(flatten_ld)
        .find(|item| is_event(item));

    let mut show = RawShow {
        venue: venue.to_string(),
        source_url: Some(url.to_string()),
        ..RawShow::default()
    };

    if let Some(event) = event {
        show.name = string_field(&event, "name").unwrap_or_default();
        show.description = string_field(&event, "description");
        show.image_url = image_field(&event);
        if let Some(start) = string_field(&event, "startDate")
            && let Some(start) = parse_start_date(&start)
        {
            show.date_text = Some(start.format("%-m/%-d/%Y").to_string());
            show.time_text = Some(start.format("%-I:%M %p").to_string());
        }
    }

    if show.name.trim().is_empty() {
        show.name = doc
            .select(&h1_sel)
            .next()
            .map(|h| h.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .unwrap_or_default();
    }

    Ok((!show.name.trim().is_empty()).then_some(show))
}

/// Local wall-clock time of a schema.org start date; the offset is ignored.
pub fn parse_start_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

/// JSON-LD blocks come as one object, an array, or an `@graph`.
fn flatten_ld(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.into_iter().flat_map(flatten_ld).collect(),
        Value::Object(mut map) => match map.remove("@graph") {
            Some(graph) => flatten_ld(graph),
            None => vec![Value::Object(map)],
        },
        _ => Vec::new(),
    }
}

fn is_event(item: &Value) -> bool {
    match item.get("@type") {
        Some(Value::String(t)) => t.ends_with("Event"),
        Some(Value::Array(types)) => types
            .iter()
            .any(|t| t.as_str().is_some_and(|t| t.ends_with("Event"))),
        _ => false,
    }
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn image_field(item: &Value) -> Option<String> {
    match item.get("image")? {
        Value::String(url) => Some(url.clone()),
        Value::Array(images) => images.iter().find_map(|img| match img {
            Value::String(url) => Some(url.clone()),
            other => other.get("url").and_then(Value::as_str).map(str::to_string),
        }),
        other => other.get("url").and_then(Value::as_str).map(str::to_string),
    }
}
