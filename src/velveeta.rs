//! Scraper for The Velveeta Room (Wix site).
//! Shows are only published as poster images; the alt text names the show,
//! e.g. "Poster for Banana Phone, The Velveeta Room".

use std::collections::HashSet;

use reqwest::Client;
use scraper::Html;
use tracing::info;

use crate::error::Result;
use crate::{RawShow, VenueScraper, absolute_url, fetch_page, is_valid_image_url, selector};

const SITE_URL: &str = "https://www.thevelveetaroom.com";
pub const VENUE: &str = "The Velveeta Room";

/// Alt text words that mark site chrome rather than a show poster.
const SKIP_ALT: [&str; 6] = ["logo", "icon", "instagram", "background", "sky", "stars"];

pub struct VelveetaScraper {
    url: String,
}

impl VelveetaScraper {
    pub fn new() -> Self {
        Self {
            url: SITE_URL.to_string(),
        }
    }
}

impl Default for VelveetaScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl VenueScraper for VelveetaScraper {
    fn venue_name(&self) -> &str {
        VENUE
    }

    async fn fetch_shows(&self, client: &Client) -> Result<Vec<RawShow>> {
        let body = fetch_page(client, &self.url).await?;
        let shows = parse_posters(&body)?;
        info!(venue = VENUE, count = shows.len(), "parsed posters");
        Ok(shows)
    }
}

/// One show per distinct poster whose alt text says "poster".
pub fn parse_posters(html: &str) -> Result<Vec<RawShow>> {
    let doc = Html::parse_document(html);
    let img_sel = selector("img[src*='wixstatic']")?;

    let mut seen = HashSet::new();
    let mut shows = Vec::new();
    for img in doc.select(&img_sel) {
        let Some(src) = img.value().attr("src").map(str::trim).filter(|s| !s.is_empty()) else {
            continue;
        };
        if !is_valid_image_url(src) {
            continue;
        }
        let alt = img.value().attr("alt").unwrap_or("").trim();
        let alt_lower = alt.to_lowercase();
        if SKIP_ALT.iter().any(|word| alt_lower.contains(word)) || !alt_lower.contains("poster") {
            continue;
        }
        if !seen.insert(src.to_string()) {
            continue;
        }
        shows.push(RawShow {
            name: alt.to_string(),
            venue: VENUE.to_string(),
            image_url: Some(absolute_url(SITE_URL, src)),
            // The site has no per-show pages to scrape; ticket links come
            // from the catalog.
            source_url: None,
            ..RawShow::default()
        });
    }
    Ok(shows)
}
