//! Physical locations within the site.
//!
//! A location is addressed by region, insula, property (doorway) and room.
//! The workflow tracker encodes it as `r{region}-i{insula}-p{property}-space-{room}`;
//! the PPM table stores regions as Roman numerals and the other parts
//! without leading zeros.

use serde::{Deserialize, Serialize};

const ROMAN_REGIONS: [&str; 9] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

/// A location filter. Empty insula, property or room mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub insula: String,
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub room: String,
}

impl Location {
    pub fn new(region: &str, insula: &str, property: &str, room: &str) -> Self {
        Self {
            region: region.trim().to_string(),
            insula: insula.trim().to_string(),
            property: property.trim().to_string(),
            room: room.trim().to_string(),
        }
    }

    /// Whether any part of the location was filled in.
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
            && self.insula.is_empty()
            && self.property.is_empty()
            && self.room.is_empty()
    }

    /// Test a tracker location key against this filter.
    ///
    /// The region must match exactly. Insula and property match their own
    /// segment; the room compares everything after the third `-`, so keys
    /// like `r1-i2-p3-space-a-b` carry a room of `a-b`.
    pub fn matches_key(&self, key: &str) -> bool {
        let places: Vec<&str> = key.split('-').collect();
        if places.len() < 3 {
            return false;
        }
        if places[0] != format!("r{}", self.region) {
            return false;
        }
        if !self.insula.is_empty() && places[1] != format!("i{}", self.insula) {
            return false;
        }
        if !self.property.is_empty() && places[2] != format!("p{}", self.property) {
            return false;
        }
        self.room.is_empty() || places[3..].join("-") == format!("space-{}", self.room)
    }

    /// LIKE patterns for the PPM table's `region`, `insula`, `doorway` and
    /// `room` columns, or `None` when nothing was entered.
    pub fn ppm_search_patterns(&self) -> Option<[String; 4]> {
        if self.is_empty() {
            return None;
        }
        let region = if self.region.is_empty() {
            String::new()
        } else {
            to_roman(&self.region)
        };
        Some([
            like_pattern(&region),
            like_pattern(&strip_leading_zeros(&self.insula)),
            like_pattern(&strip_leading_zeros(&self.property)),
            like_pattern(&strip_leading_zeros(&self.room)),
        ])
    }
}

/// Convert a region number `1..=9` to its Roman numeral. Anything else,
/// including non-numeric text such as an already Roman `"VI"`, is returned
/// trimmed but otherwise unchanged rather than defaulting to `"I"`.
pub fn to_roman(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.parse::<usize>() {
        Ok(n) if (1..=ROMAN_REGIONS.len()).contains(&n) => ROMAN_REGIONS[n - 1].to_string(),
        _ => trimmed.to_string(),
    }
}

/// Drop leading zeros only (`"07"` becomes `"7"`); zeros inside the value
/// are kept, so `"105"` stays `"105"`. An all-zero value keeps a single `0`.
pub fn strip_leading_zeros(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let stripped = trimmed.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Empty values match anything.
pub fn like_pattern(value: &str) -> String {
    if value.is_empty() {
        "%".to_string()
    } else {
        value.to_string()
    }
}
