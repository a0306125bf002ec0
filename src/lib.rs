//! Austin comedy show listings: venue scrapers feeding a date/time
//! normalization engine that produces one de-duplicated, chronologically
//! sorted show list.

use chrono::NaiveDate;
use reqwest::{Client, header};
use scraper::Selector;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod creek_cave;
pub mod dates;
pub mod error;
pub mod free_shows;
pub mod identity;
pub mod known_shows;
pub mod names;
pub mod ordering;
pub mod pipeline;
pub mod render;
pub mod showclix;
pub mod ticket_links;
pub mod times;
pub mod velveeta;
pub mod weekday;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use pipeline::{PipelineOptions, normalize, process};

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// One show as a venue page presents it, before any normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShow {
    pub name: String,
    pub venue: String,
    pub date_text: Option<String>,
    pub time_text: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    /// Free-text blurb; may say "every Tuesday" when nothing else does.
    pub description: Option<String>,
}

/// A normalized show occurrence, ready for dedup, sorting and rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShowOccurrence {
    pub raw_name: String,
    pub clean_name: String,
    pub venue: String,
    pub raw_date: Option<String>,
    pub raw_time: Option<String>,
    pub resolved_date: Option<NaiveDate>,
    /// `mon`..`sun`, or empty when the day is unknown.
    pub resolved_day_code: String,
    /// Canonical "H:MM AM/PM".
    pub resolved_time: Option<String>,
    pub is_free: bool,
    pub is_sold_out: bool,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub identity_key: String,
}

/// Trait that all venue scrapers implement
#[async_trait::async_trait]
pub trait VenueScraper: Send + Sync {
    /// Display name of the venue, as the rest of the pipeline expects it
    fn venue_name(&self) -> &str;

    /// Fetch raw shows from the venue website
    async fn fetch_shows(&self, client: &Client) -> Result<Vec<RawShow>>;

    /// Optional: warm-up request to get cookies/auth (default: no-op)
    async fn warm_up(&self, _client: &Client) -> Result<()> {
        Ok(())
    }
}

/// Build the shared HTTP client. Cookies persist across requests so venues
/// that set a session on the landing page keep working.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .cookie_store(true)
        .timeout(std::time::Duration::from_secs(30))
        .build()?)
}

/// GET a page with the browser user agent and return its body.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    tracing::debug!(url, "fetching");
    let resp = client
        .get(url)
        .header(header::USER_AGENT, USER_AGENT)
        .send()
        .await?
        .error_for_status()?;
    Ok(resp.text().await?)
}

const IMAGE_SKIP: [&str; 19] = [
    "logo", "icon", "favicon", "avatar", "profile", "button", "arrow", "social", "facebook",
    "twitter", "instagram", "youtube", "sprite", "placeholder", "1x1", "pixel", "tracking",
    "analytics", "spacer",
];
const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];
const IMAGE_HOSTS: [&str; 8] = [
    "cdn.", "cloudinary", "imgix", "cloudfront", "squarespace", "website-files", "eventbrite",
    "wixstatic",
];

/// Whether an image URL looks like a show flyer rather than site chrome or a
/// tracking pixel.
pub fn is_valid_image_url(url: &str) -> bool {
    let url = url.to_lowercase();
    if url.is_empty() || IMAGE_SKIP.iter().any(|p| url.contains(p)) {
        return false;
    }
    IMAGE_EXTENSIONS.iter().any(|ext| url.contains(ext)) || IMAGE_HOSTS.iter().any(|h| url.contains(h))
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{css}: {e}")))
}

/// Resolve `href` against `base` the way venue pages use links: absolute,
/// protocol-relative, root-relative or bare.
pub fn absolute_url(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else if href.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", base.trim_end_matches('/'), href)
    }
}
