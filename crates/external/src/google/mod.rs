//! Google Workspace APIs authenticated with a service account.
//!
//! One [`GoogleClient`] serves the sheets, drive and translate traits and
//! shares a single cached access token between them.

mod auth;
mod drive;
mod sheets;
mod translate;

use std::path::Path;
use std::time::Duration;

pub use auth::ServiceAccountKey;

use crate::error::ExternalError;
use crate::token::TokenCache;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OAuth scopes requested for the service account.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/cloud-translation",
];

/// Base URLs of the Google APIs used by the workspace.
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub sheets: String,
    pub drive: String,
    pub translate: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            sheets: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
            drive: "https://www.googleapis.com/drive/v3/files".to_string(),
            translate: "https://translation.googleapis.com/language/translate/v2".to_string(),
        }
    }
}

pub struct GoogleClient {
    http: reqwest::Client,
    key: ServiceAccountKey,
    endpoints: GoogleEndpoints,
    token: TokenCache,
}

impl GoogleClient {
    pub fn new(key: ServiceAccountKey) -> Result<Self, ExternalError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            key,
            endpoints: GoogleEndpoints::default(),
            token: TokenCache::default(),
        })
    }

    /// Load the service-account key file and build a client.
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self, ExternalError> {
        Self::new(ServiceAccountKey::from_file(path)?)
    }

    pub fn with_endpoints(mut self, endpoints: GoogleEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn service_account_email(&self) -> &str {
        &self.key.client_email
    }

    async fn access_token(&self) -> Result<String, ExternalError> {
        self.token
            .get_or_refresh(|| auth::fetch_token(&self.http, &self.key, SCOPES))
            .await
    }
}
