//! Workflow tracker spreadsheet layout.
//!
//! The tracker is read column-major. Row `n` of every column describes one
//! ARC at one location; the row's position in the sheet is needed to write
//! status cells back.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::location::Location;

/// Art-status value written when the workspace found no art.
pub const NO_ART_MARKER: &str = "No from DW";
/// Art-status value written when the workspace could not decide.
pub const UNKNOWN_ART_MARKER: &str = "Unknown from DW";

const LOCATION_COLUMN: usize = 1;
const ARC_COLUMN: usize = 7;
const LINK_COLUMN: usize = 11;
const ART_COLUMN: usize = 12;
const DONE_COLUMN: usize = 18;

/// Writable tracker columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerColumn {
    /// Column L: URL of the ARC's description spreadsheet.
    Link,
    /// Column M: art status.
    ArtStatus,
    /// Column S: completion date.
    Done,
}

impl TrackerColumn {
    pub fn letter(self) -> char {
        match self {
            TrackerColumn::Link => 'L',
            TrackerColumn::ArtStatus => 'M',
            TrackerColumn::Done => 'S',
        }
    }
}

/// Where the tracker data lives: sheet name and first data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerLayout {
    pub sheet: String,
    pub first_row: usize,
}

impl TrackerLayout {
    /// Derive the layout from an A1 range such as `Workflow_Tracking!A3:S87078`.
    pub fn from_range(range: &str) -> Option<Self> {
        let (sheet, cells) = range.split_once('!')?;
        let start = cells.split(':').next()?;
        let digits: String = start.chars().skip_while(|c| c.is_ascii_alphabetic()).collect();
        let first_row = digits.parse().ok()?;
        Some(Self {
            sheet: sheet.to_string(),
            first_row,
        })
    }

    /// A1 reference of one cell for the entry at `row_index`.
    pub fn cell(&self, column: TrackerColumn, row_index: usize) -> String {
        format!(
            "{}!{}{}",
            self.sheet,
            column.letter(),
            row_index + self.first_row
        )
    }
}

/// One tracker row relevant to the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerEntry {
    pub arc: String,
    /// Zero-based position within the tracker range.
    pub row_index: usize,
    /// Description spreadsheet link, if one was recorded.
    pub link: Option<String>,
    pub done: bool,
    pub no_art: bool,
    pub unknown_art: bool,
}

impl TrackerEntry {
    /// Whether a description spreadsheet has already been created.
    pub fn has_description_sheet(&self) -> bool {
        self.link.as_deref().is_some_and(|l| l.contains("http"))
    }
}

/// The tracker columns the workspace reads.
#[derive(Debug, Clone, Default)]
pub struct TrackerColumns {
    locations: Vec<String>,
    arcs: Vec<String>,
    links: Vec<String>,
    art: Vec<String>,
    done: Vec<String>,
}

impl TrackerColumns {
    /// Build from the column-major values returned by the sheets API.
    /// Columns may be shorter than the location column when trailing
    /// cells are blank.
    pub fn from_columns(mut values: Vec<Vec<String>>) -> Self {
        let mut take = |idx: usize| {
            values
                .get_mut(idx)
                .map(std::mem::take)
                .unwrap_or_default()
        };
        Self {
            locations: take(LOCATION_COLUMN),
            arcs: take(ARC_COLUMN),
            links: take(LINK_COLUMN),
            art: take(ART_COLUMN),
            done: take(DONE_COLUMN),
        }
    }

    fn cell(column: &[String], idx: usize) -> &str {
        column.get(idx).map(String::as_str).unwrap_or("")
    }

    fn entry(&self, row_index: usize) -> TrackerEntry {
        let link = Self::cell(&self.links, row_index);
        let art = Self::cell(&self.art, row_index);
        TrackerEntry {
            arc: Self::cell(&self.arcs, row_index).to_string(),
            row_index,
            link: (!link.is_empty()).then(|| link.to_string()),
            done: !Self::cell(&self.done, row_index).is_empty(),
            no_art: art.contains(NO_ART_MARKER),
            unknown_art: art.contains(UNKNOWN_ART_MARKER),
        }
    }

    /// Entries whose location matches, in sheet order.
    ///
    /// An ARC listed more than once keeps the position of its first row but
    /// takes the values of its last one. Rows without an ARC are skipped.
    pub fn entries_at(&self, location: &Location) -> Vec<TrackerEntry> {
        let mut entries: Vec<TrackerEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (row_index, key) in self.locations.iter().enumerate() {
            if !location.matches_key(key) {
                continue;
            }
            let entry = self.entry(row_index);
            if entry.arc.is_empty() {
                continue;
            }
            match positions.get(&entry.arc) {
                Some(&pos) => entries[pos] = entry,
                None => {
                    positions.insert(entry.arc.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }
        entries
    }

    /// Look up one ARC among the entries at a location.
    pub fn find(&self, location: &Location, arc: &str) -> Option<TrackerEntry> {
        self.entries_at(location).into_iter().find(|e| e.arc == arc)
    }
}

/// Completion date as written to the tracker (`MM/DD/YYYY`).
pub fn done_stamp(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    /// Build a 19-column tracker with the given rows of
    /// (location, arc, link, art, done).
    fn tracker(rows: &[(&str, &str, &str, &str, &str)]) -> TrackerColumns {
        let mut values = vec![Vec::new(); 19];
        for (loc, arc, link, art, done) in rows {
            values[LOCATION_COLUMN].push(loc.to_string());
            values[ARC_COLUMN].push(arc.to_string());
            values[LINK_COLUMN].push(link.to_string());
            values[ART_COLUMN].push(art.to_string());
            values[DONE_COLUMN].push(done.to_string());
        }
        TrackerColumns::from_columns(values)
    }

    #[test]
    fn layout_from_range() {
        let layout = TrackerLayout::from_range("Workflow_Tracking!A3:S87078").unwrap();
        assert_eq!(layout.sheet, "Workflow_Tracking");
        assert_eq!(layout.first_row, 3);
        assert_eq!(layout.cell(TrackerColumn::Link, 0), "Workflow_Tracking!L3");
        assert_eq!(layout.cell(TrackerColumn::ArtStatus, 10), "Workflow_Tracking!M13");
        assert_eq!(layout.cell(TrackerColumn::Done, 4), "Workflow_Tracking!S7");
        assert!(TrackerLayout::from_range("no-sheet").is_none());
    }

    #[test]
    fn entries_carry_status_columns() {
        let t = tracker(&[
            ("r1-i1-p1-space-1", "ARC1", "https://docs.google.com/x", "No from DW", "01/02/2023"),
            ("r1-i1-p1-space-2", "ARC2", "", "Unknown from DW", ""),
            ("r2-i1-p1-space-1", "ARC3", "", "", ""),
        ]);
        let entries = t.entries_at(&Location::new("1", "1", "1", ""));
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].arc, "ARC1");
        assert_eq!(entries[0].row_index, 0);
        assert!(entries[0].has_description_sheet());
        assert!(entries[0].done);
        assert!(entries[0].no_art);
        assert!(!entries[0].unknown_art);

        assert_eq!(entries[1].arc, "ARC2");
        assert_eq!(entries[1].row_index, 1);
        assert_eq!(entries[1].link, None);
        assert!(!entries[1].done);
        assert!(entries[1].unknown_art);
    }

    #[test]
    fn short_columns_read_as_blank() {
        let mut values = vec![Vec::new(); 12];
        values[LOCATION_COLUMN] = column(&["r3-i1-p1-space-1", "r3-i1-p1-space-2"]);
        values[ARC_COLUMN] = column(&["A", "B"]);
        values[LINK_COLUMN] = column(&["http://sheet"]);
        let t = TrackerColumns::from_columns(values);

        let entries = t.entries_at(&Location::new("3", "", "", ""));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].link.as_deref(), Some("http://sheet"));
        assert_eq!(entries[1].link, None);
        assert!(!entries[1].done);
    }

    #[test]
    fn duplicate_arcs_keep_first_position_last_values() {
        let t = tracker(&[
            ("r1-i1-p1-space-1", "A", "", "", ""),
            ("r1-i1-p1-space-1", "B", "", "", ""),
            ("r1-i1-p1-space-2", "A", "http://late", "", ""),
        ]);
        let entries = t.entries_at(&Location::new("1", "", "", ""));
        let arcs: Vec<_> = entries.iter().map(|e| e.arc.as_str()).collect();
        assert_eq!(arcs, ["A", "B"]);
        assert_eq!(entries[0].row_index, 2);
        assert_eq!(entries[0].link.as_deref(), Some("http://late"));
    }

    #[test]
    fn rows_without_arc_are_skipped() {
        let t = tracker(&[("r1-i1-p1-space-1", "", "", "", "")]);
        assert!(t.entries_at(&Location::new("1", "", "", "")).is_empty());
    }

    #[test]
    fn find_by_arc() {
        let t = tracker(&[
            ("r1-i1-p1-space-1", "A", "", "", ""),
            ("r1-i1-p1-space-1", "B", "", "", ""),
        ]);
        let loc = Location::new("1", "1", "1", "1");
        assert_eq!(t.find(&loc, "B").map(|e| e.row_index), Some(1));
        assert!(t.find(&loc, "C").is_none());
    }

    #[test]
    fn done_stamp_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(done_stamp(date), "03/07/2024");
    }
}
