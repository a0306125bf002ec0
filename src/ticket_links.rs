//! Where a show's "tickets" link should point.
//!
//! A scraped link wins when it is on a host the venue actually sells through.
//! Otherwise the curated per-show table is tried, then a slug built from the
//! show name, then the venue's general page.

use serde::{Deserialize, Serialize};

/// Curated link for shows whose lower-cased name contains, or is contained
/// in, `pattern`. Relative `url`s are joined to the venue's `base_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowLink {
    pub pattern: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueLinks {
    pub venue_match: String,
    #[serde(default)]
    pub base_url: String,
    /// Substrings a scraped link must contain to be used as-is.
    #[serde(default)]
    pub trusted_links: Vec<String>,
    #[serde(default)]
    pub shows: Vec<ShowLink>,
    /// `base_url` + this + slug of the show name, e.g. "/events/".
    #[serde(default)]
    pub slug_path: Option<String>,
    /// Joins the words of a slug; "-" gives "banana-phone", "" gives "bananaphone".
    #[serde(default)]
    pub slug_separator: String,
    /// Last resort when nothing else applies.
    #[serde(default)]
    pub fallback_url: Option<String>,
}

impl VenueLinks {
    fn resolve(&self, name: &str, source_url: Option<&str>) -> Option<String> {
        if let Some(url) = source_url
            && self.trusted_links.iter().any(|t| url.contains(t.as_str()))
        {
            return Some(strip_fragment(url));
        }

        let name = name.trim().to_lowercase();
        if !name.is_empty() {
            let exact = self.shows.iter().find(|s| s.pattern == name);
            let partial = || {
                self.shows
                    .iter()
                    .find(|s| name.contains(&s.pattern) || s.pattern.contains(&name))
            };
            if let Some(link) = exact.or_else(partial) {
                return Some(self.join(&link.url));
            }
            if let Some(path) = &self.slug_path {
                let slug = slugify(&name, &self.slug_separator);
                if !slug.is_empty() {
                    return Some(self.join(&format!("{path}{slug}")));
                }
            }
        }

        self.fallback_url.clone()
    }

    fn join(&self, url: &str) -> String {
        if url.starts_with("http") {
            url.to_string()
        } else {
            crate::absolute_url(&self.base_url, url)
        }
    }
}

/// Ticket-link rules for every venue that has them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketLinks {
    venues: Vec<VenueLinks>,
}

impl TicketLinks {
    pub fn new(venues: Vec<VenueLinks>) -> Self {
        Self { venues }
    }

    pub fn venues(&self) -> &[VenueLinks] {
        &self.venues
    }

    /// Link for a show, falling back to the scraped one (minus any `#fragment`)
    /// for venues without rules.
    pub fn event_url(&self, name: &str, venue: &str, source_url: Option<&str>) -> Option<String> {
        let venue = venue.to_lowercase();
        match self.venues.iter().find(|v| venue.contains(&v.venue_match)) {
            Some(rules) => rules.resolve(name, source_url),
            None => source_url.map(strip_fragment),
        }
    }

    pub fn austin() -> Self {
        fn links(items: &[(&str, &str)]) -> Vec<ShowLink> {
            items
                .iter()
                .map(|(pattern, url)| ShowLink {
                    pattern: pattern.to_string(),
                    url: url.to_string(),
                })
                .collect()
        }
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self::new(vec![
            VenueLinks {
                venue_match: "creek".into(),
                base_url: "https://www.creekandcave.com".into(),
                trusted_links: strings(&["creekandcave.com/events/", "showclix.com/event/"]),
                shows: links(&[
                    ("the monday gamble mic", "/events/the-monday-gamble-mic"),
                    ("clocked out comedy", "/events/clocked-out-comedy"),
                    ("new joke monday", "/events/new-joke-monday"),
                    ("monday night gimmick mic", "/events/monday-night-gimmick-mic"),
                    ("dunk tank", "/events/dunk-tank-mic"),
                    ("optimum noctis", "/events/optimumnoctis"),
                    ("hood therapy tuesdays", "/events/hood-therapy-tuesdays"),
                    ("off the cuff", "/events/off-the-cuff"),
                    ("absolute show", "/events/absolute-show-"),
                    ("the forge", "/events/the-forge"),
                    ("wild west wednesdays", "/events/wild-west-wednesdays"),
                    ("bear arms open mic", "/events/bear-arms-open-mic"),
                    ("bear arms: open mic", "/events/bear-arms-open-mic"),
                    ("gator tales", "/events/gator-tales"),
                    ("unscripted", "/events/unscripted-comedy"),
                    ("word up open mic", "/events/word-up-open-mic"),
                    ("word up! open mic", "/events/word-up-open-mic"),
                    ("creek featured", "/events/creekfeat"),
                    ("show us the big naturals", "/events/show-us-the-big-naturals"),
                    ("new joke saturday", "/events/new-joke-saturday"),
                    ("christmas at the creek", "/events/christmas-at-the-creek"),
                    ("main course comedy", "/events/main-course-comedy"),
                    ("freaky", "/events/freaky-comedy"),
                    ("writers' room", "/events/writersroom"),
                    ("writers room", "/events/writersroom"),
                    ("the creek and the cave open mic", "/events/creek-mic"),
                    ("banana phone", "/events/banana-phone"),
                    ("laughs with the staff", "/events/laughs-with-the-staff"),
                    ("algonauts", "/events/algonauts"),
                    ("the roast of santa", "/events/the-roast-of-santa"),
                    ("king of the creek", "/events/king-of-the-creek"),
                    ("roast battle austin", "/events/roast-battle-austin"),
                    ("roast battle: austin", "/events/roast-battle-austin"),
                    ("comedians on the rise", "/events/comedians-on-the-rise"),
                    ("comedy powered by bilt", "/events/bilt-comedy"),
                    ("the roast of 2025", "/events/the-roast-of-2025"),
                    ("lukas mccrary's nye comedy spectacular", "/events/lukas-mccrary-nye"),
                ]),
                slug_path: Some("/events/".into()),
                slug_separator: "-".into(),
                fallback_url: Some("https://www.creekandcave.com/calendar".into()),
            },
            VenueLinks {
                venue_match: "velveeta".into(),
                base_url: "https://www.thevelveetaroom.com".into(),
                trusted_links: strings(&["seatengine.com"]),
                shows: links(&[
                    ("cocktails and comedy", "/velv/cocktails-and-comedy7"),
                    ("the hump", "/velv/the-hump5"),
                    ("the joke of painting", "/velv/the-joke-of-painting"),
                    ("velveeta room wrestling", "/velv/vrw-comedy-championship"),
                    ("the christmas hangover comedy show", "/velv/the-christmas-hangover2"),
                    ("christmas hangover", "/velv/the-christmas-hangover2"),
                    ("timeless comedy", "/velv/timeless-comedy1"),
                    ("powerbomb", "/velv/powerbomb7"),
                    ("power bomb", "/velv/power-bombd29"),
                    ("austin all stars", "/velv/austin-all-stars345g"),
                    ("austin all-stars", "/velv/austin-all-stars345g"),
                ]),
                slug_path: Some("/velv/".into()),
                slug_separator: String::new(),
                fallback_url: Some("https://www.thevelveetaroom.com".into()),
            },
            VenueLinks {
                venue_match: "rozco".into(),
                base_url: "https://rozcoscomedyclub.simpletix.com".into(),
                trusted_links: strings(&["simpletix.com/e/"]),
                shows: links(&[
                    ("austin all-star comedy", "https://www.simpletix.com/e/austin-all-star-comedy-tickets-249886"),
                    ("eastside open mic", "https://www.simpletix.com/e/12-17-eastside-open-mic-tickets-245381"),
                    ("best of austin comedy", "https://www.simpletix.com/e/12-18-best-of-austin-comedy-tickets-245375"),
                    ("candlelight comedy", "https://www.simpletix.com/e/12-18-candlelight-comedy-tickets-245384"),
                    ("friday night laughs", "https://www.simpletix.com/e/12-19-friday-night-laughs-7pm-tickets-249044"),
                    ("new faces of austin comedy", "https://www.simpletix.com/e/new-faces-of-austin-comedy-tickets-248564"),
                    ("tuesday gigante", "https://www.simpletix.com/e/tuesday-gigante-tickets-248656"),
                    ("kill or spill", "https://www.simpletix.com/e/12-9-kill-or-spill-tickets-240508"),
                    ("lez be friends", "https://www.simpletix.com/e/12-2-lez-be-friends-comedy-blind-dating-sh-tickets-244863"),
                    ("dressed to kill", "https://www.simpletix.com/e/dressed-to-kill-halloween-party-tickets-238205"),
                    ("your new favorite comic", "https://www.simpletix.com/e/10-16-your-new-favorite-comic-tickets-237530"),
                    ("the filthy show", "https://www.simpletix.com/e/the-filthy-show-tickets-246504"),
                    ("circus fire", "https://www.simpletix.com/e/11-1-circus-fire-stand-up-comedy-show-tickets-240102"),
                    ("sweet sunday comedy", "https://www.simpletix.com/e/sweet-sunday-comedy-tickets-241384"),
                ]),
                fallback_url: Some("https://rozcoscomedyclub.simpletix.com/".into()),
                ..VenueLinks::default()
            },
            VenueLinks {
                venue_match: "speakeasy".into(),
                shows: links(&[
                    ("the thursday special", "https://www.eventbrite.com/e/the-thursday-special-tickets-1042163919337"),
                    ("sunday service", "https://www.eventbrite.com/e/sunday-service-stand-up-comedy-show-tickets-1308986797749"),
                ]),
                fallback_url: Some("https://www.eventbrite.com".into()),
                ..VenueLinks::default()
            },
            VenueLinks {
                venue_match: "mothership".into(),
                fallback_url: Some("https://comedymothership.com/shows".into()),
                ..VenueLinks::default()
            },
            VenueLinks {
                venue_match: "bull".into(),
                fallback_url: Some(
                    "https://www.eventbrite.com/e/stand-up-comedy-show-bulls-pub-wedsthursat-at-830pm-tickets-1039732296287"
                        .into(),
                ),
                ..VenueLinks::default()
            },
            VenueLinks {
                venue_match: "gnar".into(),
                fallback_url: Some("https://gnarbaratx.com/events".into()),
                ..VenueLinks::default()
            },
            VenueLinks {
                venue_match: "cap city".into(),
                trusted_links: strings(&["http"]),
                fallback_url: Some("https://www.capcitycomedy.com/calendar".into()),
                ..VenueLinks::default()
            },
            VenueLinks {
                venue_match: "east austin".into(),
                fallback_url: Some("https://eastaustincomedy.com/".into()),
                ..VenueLinks::default()
            },
            VenueLinks {
                venue_match: "vulcan".into(),
                trusted_links: strings(&["http"]),
                fallback_url: Some("https://www.vulcanatx.com/".into()),
                ..VenueLinks::default()
            },
            VenueLinks {
                venue_match: "black rabbit".into(),
                fallback_url: Some(
                    "https://www.eventbrite.com/e/black-rabbit-underground-comedy-tickets-1442073413399".into(),
                ),
                ..VenueLinks::default()
            },
            VenueLinks {
                venue_match: "secret level".into(),
                trusted_links: strings(&["eventbrite.com"]),
                fallback_url: Some("https://www.eventbrite.com/o/secret-level-productions-45772952383".into()),
                ..VenueLinks::default()
            },
        ])
    }
}

/// Lower-case words of `name` joined by `separator`; punctuation dropped.
pub fn slugify(name: &str, separator: &str) -> String {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn strip_fragment(url: &str) -> String {
    url.split('#').next().unwrap_or(url).to_string()
}
