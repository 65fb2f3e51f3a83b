//! Clients for the external systems the workspace synchronises with.
//!
//! - Google Sheets (workflow tracker, vocabulary), Drive (description
//!   sheets) and Translate (Italian PPP text), authenticated with a service
//!   account ([`google`]).
//! - Box file storage for PPM scans ([`box_files`]).
//! - The Luna image catalog for PinP and PPM thumbnails ([`luna`]).
//! - Getty AAT and Wikidata for vocabulary terms ([`linked_data`]).
//!
//! Each system sits behind a trait in [`services`] so the API layer can be
//! exercised with in-memory fakes.

pub mod box_files;
pub mod error;
pub mod google;
mod http;
pub mod linked_data;
pub mod luna;
pub mod services;
mod token;

pub use error::ExternalError;
pub use services::{
    CatalogImage, Drive, FileStore, ImageCatalog, LinkedData, Spreadsheets, StoredFile,
    Translator, ValueInput, WikidataEntity,
};
