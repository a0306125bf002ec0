//! The fact tables the engine runs on, bundled so they can be injected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::free_shows::FreeShowRegistry;
use crate::known_shows::KnownShowTable;
use crate::ticket_links::TicketLinks;
use crate::times::normalize_time;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub known_shows: KnownShowTable,
    #[serde(default)]
    pub free_shows: FreeShowRegistry,
    /// Show-name patterns currently sold out.
    #[serde(default)]
    pub sold_out: Vec<String>,
    /// Venues that run the same show at several times; their identity keys
    /// use the scraped time so sittings stay distinct.
    #[serde(default)]
    pub showtime_keyed_venues: Vec<String>,
    /// Bars that host occasional shows, grouped under one "Pop Up" filter.
    #[serde(default)]
    pub popup_venues: Vec<String>,
    /// Per-venue rules for the ticket link shown with each show.
    #[serde(default)]
    pub ticket_urls: TicketLinks,
}

impl Catalog {
    pub fn austin() -> Self {
        Self {
            known_shows: KnownShowTable::austin(),
            free_shows: FreeShowRegistry::austin(),
            sold_out: Vec::new(),
            showtime_keyed_venues: ["bull", "gnar", "cap city", "secret level"]
                .map(String::from)
                .to_vec(),
            popup_venues: ["bull's pub", "gnar bar", "speakeasy", "secret level"]
                .map(String::from)
                .to_vec(),
            ticket_urls: TicketLinks::austin(),
        }
    }

    /// Load a catalog from a JSON file and check it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&body)?;
        catalog.validate()?;
        tracing::info!(
            path = %path.display(),
            sections = catalog.known_shows.sections().len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Patterns must be lower-case and non-empty (lookups lower-case the
    /// show name, so anything else can never match) and known times must
    /// already be canonical.
    pub fn validate(&self) -> Result<()> {
        for section in self.known_shows.sections() {
            check_pattern("venue_match", &section.venue_match)?;
            for show in &section.shows {
                check_pattern("pattern", &show.pattern)?;
                if let Some(time) = &show.time
                    && normalize_time(time).as_deref() != Some(time.as_str())
                {
                    return Err(Error::Catalog(format!(
                        "time {time:?} for {:?} is not in H:MM AM/PM form",
                        show.pattern
                    )));
                }
            }
        }
        let free = &self.free_shows;
        for pattern in free
            .free_venues
            .iter()
            .chain(&free.patterns)
            .chain(free.venue_patterns.iter().map(|v| &v.venue_match))
            .chain(free.venue_patterns.iter().flat_map(|v| &v.patterns))
            .chain(&self.sold_out)
            .chain(&self.showtime_keyed_venues)
            .chain(&self.popup_venues)
            .chain(self.ticket_urls.venues().iter().map(|v| &v.venue_match))
            .chain(
                self.ticket_urls
                    .venues()
                    .iter()
                    .flat_map(|v| v.shows.iter().map(|s| &s.pattern)),
            )
        {
            check_pattern("pattern", pattern)?;
        }
        Ok(())
    }

    pub fn is_sold_out(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.sold_out.iter().any(|p| name.contains(p.as_str()))
    }

    pub fn is_showtime_keyed(&self, venue: &str) -> bool {
        let venue = venue.to_lowercase();
        self.showtime_keyed_venues
            .iter()
            .any(|v| venue.contains(v.as_str()))
    }

    pub fn is_popup(&self, venue: &str) -> bool {
        let venue = venue.to_lowercase();
        self.popup_venues.iter().any(|v| venue.contains(v.as_str()))
    }
}

fn check_pattern(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Catalog(format!("empty {field}")));
    }
    if value != value.to_lowercase() {
        return Err(Error::Catalog(format!("{field} {value:?} must be lower-case")));
    }
    Ok(())
}
