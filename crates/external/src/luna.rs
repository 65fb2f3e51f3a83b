//! Luna image catalog search.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ExternalError;
use crate::http::parse_json;
use crate::services::{CatalogImage, ImageCatalog};

const SERVICE: &str = "Luna";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub const DEFAULT_BASE_URL: &str = "http://umassamherst.lunaimaging.com/luna/servlet/as/search";
/// The PALP media collection.
pub const COLLECTION: &str = "umass~14~14";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    url_size1: Option<String>,
    url_size2: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl From<SearchResult> for CatalogImage {
    fn from(r: SearchResult) -> Self {
        CatalogImage {
            id: r.id,
            url_size1: r.url_size1,
            url_size2: r.url_size2,
        }
    }
}

pub struct LunaClient {
    http: reqwest::Client,
    base_url: String,
}

impl LunaClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ExternalError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Search URL for a file name. The query syntax is Luna's own
    /// `field=value` form and is passed through unencoded.
    fn search_url(&self, filename: &str) -> String {
        format!("{}?q=filename={filename}&lc={COLLECTION}", self.base_url)
    }
}

#[async_trait]
impl ImageCatalog for LunaClient {
    async fn search_filename(&self, filename: &str) -> Result<Vec<CatalogImage>, ExternalError> {
        let response = self.http.get(self.search_url(filename)).send().await?;
        let results: SearchResponse = parse_json(SERVICE, response).await?;
        tracing::debug!(filename, hits = results.results.len(), "Luna search");
        Ok(results.results.into_iter().map(CatalogImage::from).collect())
    }
}
