//! Controlled vocabulary of descriptive terms.
//!
//! The vocabulary sheet holds one term per row with links to Wikidata and
//! the Getty AAT, free-text fallbacks, a comma-separated synonym list and a
//! category. `"-"` in an identifier column means the term has no entry.

use serde::Serialize;

/// Placeholder for a missing Wikidata or Getty identifier.
pub const NO_IDENTIFIER: &str = "-";

/// One row of the vocabulary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyTerm {
    pub term: String,
    pub wiki: String,
    pub getty: String,
    pub other_desc: String,
    pub other_image_url: String,
    pub other_url: String,
    pub synonyms: Vec<String>,
    pub category: String,
}

impl VocabularyTerm {
    /// Parse a sheet row `[term, wiki, getty, other_desc, other_image_url,
    /// other_url, synonyms, category]`. Missing trailing cells are blank.
    /// Returns `None` for rows without a term.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let cell = |idx: usize| row.get(idx).map(|s| s.trim().to_string()).unwrap_or_default();
        let term = cell(0);
        if term.is_empty() {
            return None;
        }
        Some(Self {
            term,
            wiki: cell(1),
            getty: cell(2).replace('"', ""),
            other_desc: cell(3),
            other_image_url: cell(4),
            other_url: cell(5),
            synonyms: split_synonyms(&cell(6)),
            category: cell(7),
        })
    }

    pub fn wiki_id(&self) -> Option<&str> {
        identifier(&self.wiki)
    }

    pub fn getty_url(&self) -> Option<&str> {
        identifier(&self.getty)
    }
}

fn identifier(value: &str) -> Option<&str> {
    if value.is_empty() || value == NO_IDENTIFIER {
        None
    } else {
        Some(value)
    }
}

/// Split a comma-separated synonym cell. Entries are kept verbatim apart
/// from surrounding whitespace; an empty cell has no synonyms.
pub fn split_synonyms(cell: &str) -> Vec<String> {
    if cell.trim().is_empty() {
        return Vec::new();
    }
    cell.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// The whole vocabulary in sheet order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<VocabularyTerm>,
}

impl Vocabulary {
    /// Build from sheet rows. A term appearing twice keeps its last row.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let mut terms: Vec<VocabularyTerm> = Vec::new();
        for term in rows.iter().filter_map(|r| VocabularyTerm::from_row(r)) {
            match terms.iter_mut().find(|t| t.term == term.term) {
                Some(existing) => *existing = term,
                None => terms.push(term),
            }
        }
        Self { terms }
    }

    pub fn terms(&self) -> &[VocabularyTerm] {
        &self.terms
    }

    pub fn get(&self, term: &str) -> Option<&VocabularyTerm> {
        self.terms.iter().find(|t| t.term == term)
    }

    /// Resolve a query to a term, either directly or through a synonym.
    pub fn resolve(&self, query: &str) -> Option<&VocabularyTerm> {
        let query = query.trim();
        self.get(query)
            .or_else(|| self.terms.iter().find(|t| t.synonyms.iter().any(|s| s == query)))
    }

    /// Every term followed by its synonyms, for autocomplete.
    pub fn all_terms(&self) -> Vec<String> {
        let mut all = Vec::new();
        for term in &self.terms {
            all.push(term.term.clone());
            all.extend(term.synonyms.iter().cloned());
        }
        all
    }

    pub fn all_synonyms(&self) -> Vec<String> {
        self.terms.iter().flat_map(|t| t.synonyms.iter().cloned()).collect()
    }

    /// Distinct non-empty categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for term in &self.terms {
            if !term.category.is_empty() && !categories.contains(&term.category) {
                categories.push(term.category.clone());
            }
        }
        categories
    }

    pub fn terms_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a VocabularyTerm> + 'a {
        self.terms.iter().filter(move |t| t.category == category)
    }
}
