//! Tri-state art / plaster classification flags.
//!
//! Every PinP and PPM image row carries an `is_art` and an `is_plaster`
//! flag holding `"no"`, `"maybe"` or `"yes"`. An ARC's classification is
//! the strongest flag seen across all of its image rows.

use serde::Serialize;

/// A single classification flag. Ordering is `No < Maybe < Yes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    No,
    Maybe,
    Yes,
}

impl Flag {
    /// Parse a stored flag value. Unknown or empty values yield `None` and
    /// are skipped during reconciliation.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "no" => Some(Flag::No),
            "maybe" => Some(Flag::Maybe),
            "yes" => Some(Flag::Yes),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::No => "no",
            Flag::Maybe => "maybe",
            Flag::Yes => "yes",
        }
    }
}

/// Classification of an ARC before and after its image rows were read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Classification {
    /// The image tables have not been consulted yet.
    #[default]
    NotDefined,
    Known(Flag),
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::NotDefined => "Not defined",
            Classification::Known(flag) => flag.as_str(),
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Running fold over the image rows linked to one ARC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSummary {
    pub is_art: Flag,
    pub is_plaster: Flag,
    pub notes: String,
}

impl Default for FlagSummary {
    fn default() -> Self {
        Self {
            is_art: Flag::No,
            is_plaster: Flag::No,
            notes: String::new(),
        }
    }
}

impl FlagSummary {
    /// Fold one image row into the summary. Flags only ever move upwards;
    /// notes are appended verbatim.
    pub fn absorb(&mut self, is_art: Option<&str>, is_plaster: Option<&str>, notes: Option<&str>) {
        if let Some(flag) = is_art.and_then(Flag::parse) {
            self.is_art = self.is_art.max(flag);
        }
        if let Some(flag) = is_plaster.and_then(Flag::parse) {
            self.is_plaster = self.is_plaster.max(flag);
        }
        if let Some(notes) = notes {
            self.notes.push_str(notes);
        }
    }
}
