//! Scraper for Creek and the Cave.
//! Calendar: https://www.creekandcave.com/calendar
//! Each `.events-list-day` block carries the date; the events inside it carry
//! a title and a flyer set as a CSS background image.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use scraper::Html;
use tracing::info;

use crate::error::Result;
use crate::{RawShow, VenueScraper, absolute_url, fetch_page, is_valid_image_url, selector};

const BASE: &str = "https://www.creekandcave.com";
const CALENDAR_URL: &str = "https://www.creekandcave.com/calendar";
pub const VENUE: &str = "Creek and the Cave";

static RE_STYLE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url\(\s*['"]?([^'")]+)['"]?\s*\)"#).unwrap());

pub struct CreekCaveScraper {
    calendar_url: String,
}

impl CreekCaveScraper {
    pub fn new() -> Self {
        Self {
            calendar_url: CALENDAR_URL.to_string(),
        }
    }
}

impl Default for CreekCaveScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl VenueScraper for CreekCaveScraper {
    fn venue_name(&self) -> &str {
        VENUE
    }

    async fn fetch_shows(&self, client: &Client) -> Result<Vec<RawShow>> {
        let body = fetch_page(client, &self.calendar_url).await?;
        let shows = parse_calendar(&body)?;
        info!(venue = VENUE, count = shows.len(), "parsed calendar");
        Ok(shows)
    }
}

/// Pull every event out of the calendar page.
///
/// Events without a title are skipped. The same flyer repeated on one day is
/// listed once.
pub fn parse_calendar(html: &str) -> Result<Vec<RawShow>> {
    let doc = Html::parse_document(html);
    let day_sel = selector(".events-list-day")?;
    let date_sel = selector(".event-list-detail-date-day")?;
    let detail_sel = selector(".events-list-detail")?;
    let title_sel = selector(".events-list-detail-title")?;
    let image_sel = selector(".event-list-detail-image")?;
    let link_sel = selector("a[href]")?;

    let mut seen = HashSet::new();
    let mut shows = Vec::new();
    for day in doc.select(&day_sel) {
        let date_text = day
            .select(&date_sel)
            .next()
            .map(|el| collapse(el.text()))
            .filter(|t| !t.is_empty());

        for detail in day.select(&detail_sel) {
            let Some(name) = detail
                .select(&title_sel)
                .next()
                .map(|el| collapse(el.text()))
                .filter(|t| !t.is_empty())
            else {
                continue;
            };

            let image_url = detail
                .select(&image_sel)
                .next()
                .and_then(|el| el.value().attr("style"))
                .and_then(|style| RE_STYLE_URL.captures(style))
                .map(|caps| absolute_url(BASE, &caps[1]))
                .filter(|url| is_valid_image_url(url));

            let source_url = detail
                .select(&link_sel)
                .filter_map(|a| a.value().attr("href"))
                .find(|href| href.contains("/events/") || href.contains("showclix.com"))
                .map(|href| absolute_url(BASE, href));

            let key = (name.to_lowercase(), date_text.clone(), image_url.clone());
            if !seen.insert(key) {
                continue;
            }

            shows.push(RawShow {
                name,
                venue: VENUE.to_string(),
                date_text: date_text.clone(),
                image_url,
                source_url,
                ..RawShow::default()
            });
        }
    }
    Ok(shows)
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
