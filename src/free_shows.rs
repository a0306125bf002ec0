use serde::{Deserialize, Serialize};

/// Free patterns that only apply at venues whose name contains `venue_match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueFreeShows {
    pub venue_match: String,
    pub patterns: Vec<String>,
}

/// Which shows are free to attend.
///
/// All matching is lower-case substring containment against the show name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeShowRegistry {
    /// Venues where every show is free.
    #[serde(default)]
    pub free_venues: Vec<String>,
    /// Patterns that mark a show free at any venue.
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub venue_patterns: Vec<VenueFreeShows>,
}

impl FreeShowRegistry {
    pub fn is_free(&self, name: &str, venue: &str) -> bool {
        let name = name.to_lowercase();
        let venue = venue.to_lowercase();

        if self.free_venues.iter().any(|v| venue.contains(v.as_str())) {
            return true;
        }
        if self.patterns.iter().any(|p| name.contains(p.as_str())) {
            return true;
        }
        self.venue_patterns
            .iter()
            .filter(|scoped| venue.contains(&scoped.venue_match))
            .flat_map(|scoped| scoped.patterns.iter())
            .any(|p| name.contains(p.as_str()))
    }

    pub fn austin() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            free_venues: strings(&["bull", "speakeasy"]),
            // Cap City's open mic costs $5, so no generic "open mic" here.
            patterns: strings(&[
                "the monday gamble mic",
                "monday gamble",
                "monday night gimmick mic",
                "gimmick mic",
                "dunk tank",
                "hood therapy",
                "off the cuff",
                "wild west wednesdays",
                "bear arms",
                "word up",
                "new joke saturday",
                "new joke monday",
                "the creek and the cave open mic",
                "creek open mic",
                "banana phone",
                "writers room",
                "crowd control",
            ]),
            venue_patterns: vec![VenueFreeShows {
                venue_match: "rozco".to_string(),
                patterns: strings(&["eastside open mic"]),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn austin_registry() {
        let free = FreeShowRegistry::austin();
        assert!(free.is_free("Banana Phone", "Creek and the Cave"));
        assert!(free.is_free("Anything Goes", "Bull's Pub"));
        assert!(free.is_free("Eastside Open Mic", "Rozco's Comedy"));
        assert!(!free.is_free("Eastside Open Mic", "Cap City Comedy"));
        assert!(!free.is_free("Open Mic", "Cap City Comedy"));
        assert!(!free.is_free("Roast Battle: Austin", "Creek and the Cave"));
    }

    #[test]
    fn empty_registry_frees_nothing() {
        assert!(!FreeShowRegistry::default().is_free("Banana Phone", "Creek and the Cave"));
    }
}
