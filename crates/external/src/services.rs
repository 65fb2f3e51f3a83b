//! Service traits and the data they exchange.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ExternalError;

/// How the sheets API should interpret a written value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInput {
    /// Stored exactly as given.
    Raw,
    /// Parsed as if typed into the sheet (formulas, links, dates).
    UserEntered,
}

impl ValueInput {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueInput::Raw => "RAW",
            ValueInput::UserEntered => "USER_ENTERED",
        }
    }
}

/// Read and write access to spreadsheet ranges.
#[async_trait]
pub trait Spreadsheets: Send + Sync {
    /// Values of `range`, one inner vector per column.
    async fn get_columns(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, ExternalError>;

    /// Values of `range`, one inner vector per row.
    async fn get_rows(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, ExternalError>;

    /// Overwrite a single cell.
    async fn update_cell(
        &self,
        spreadsheet_id: &str,
        cell: &str,
        value: &str,
        input: ValueInput,
    ) -> Result<(), ExternalError>;
}

/// File operations on shared drives.
#[async_trait]
pub trait Drive: Send + Sync {
    /// Copy `file_id` into `parent_id` under a new name and return the
    /// copy's id.
    async fn copy_file(
        &self,
        file_id: &str,
        name: &str,
        parent_id: &str,
    ) -> Result<String, ExternalError>;

    /// Grant write access without notifying the user.
    async fn add_writer(&self, file_id: &str, email: &str) -> Result<(), ExternalError>;

    async fn transfer_ownership(&self, file_id: &str, email: &str) -> Result<(), ExternalError>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ExternalError>;
}

/// A file located in remote storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
}

/// Remote file storage holding the PPM scans.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Find the file named exactly `name` below `folder_id`.
    async fn find_file(
        &self,
        name: &str,
        folder_id: &str,
    ) -> Result<Option<StoredFile>, ExternalError>;

    /// JPEG thumbnail bytes, or `None` while the thumbnail is still being
    /// generated.
    async fn thumbnail(
        &self,
        file_id: &str,
        min_width: u32,
    ) -> Result<Option<Vec<u8>>, ExternalError>;

    /// Browser link to a stored file.
    fn file_url(&self, file_id: &str) -> String;
}

/// One search hit from the image catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogImage {
    pub id: String,
    /// Small rendition.
    pub url_size1: Option<String>,
    /// Medium rendition.
    pub url_size2: Option<String>,
}

#[async_trait]
pub trait ImageCatalog: Send + Sync {
    /// Search the catalog by image file name.
    async fn search_filename(&self, filename: &str) -> Result<Vec<CatalogImage>, ExternalError>;
}

/// Description and image of a Wikidata item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WikidataEntity {
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Linked-data lookups for vocabulary terms.
#[async_trait]
pub trait LinkedData: Send + Sync {
    /// English scope note for a Getty AAT concept page URL.
    async fn getty_scope_note(&self, page_url: &str) -> Result<Option<String>, ExternalError>;

    async fn wikidata_entity(&self, id: &str) -> Result<WikidataEntity, ExternalError>;
}
