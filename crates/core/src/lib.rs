//! Domain logic for the PALP workspace.
//!
//! Everything here is pure: parsing of tracker and vocabulary sheets,
//! reconciliation of image classification flags, location keys and the
//! form-field vocabulary shared by the API and database layers.

pub mod carryover;
pub mod error;
pub mod flags;
pub mod forms;
pub mod ids;
pub mod location;
pub mod roles;
pub mod tracker;
pub mod types;
pub mod vocabulary;
