use std::sync::Arc;

use palp_external::{Drive, FileStore, ImageCatalog, LinkedData, Spreadsheets, Translator};

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Handles to the external systems. Production wires in the HTTP clients;
/// tests substitute in-memory fakes.
#[derive(Clone)]
pub struct Services {
    pub sheets: Arc<dyn Spreadsheets>,
    pub drive: Arc<dyn Drive>,
    pub translator: Arc<dyn Translator>,
    pub files: Arc<dyn FileStore>,
    pub catalog: Arc<dyn ImageCatalog>,
    pub linked_data: Arc<dyn LinkedData>,
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: palp_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Workspace sessions keyed by the id carried in access tokens.
    pub sessions: Arc<SessionStore>,
    pub services: Services,
}
