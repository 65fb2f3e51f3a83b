//! Box file storage, authenticated with a server JWT app.
//!
//! The app configuration file is the JSON downloaded from the Box developer
//! console. Only unencrypted RSA private keys are supported: set
//! `privateKey` to a PEM without a passphrase.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ExternalError;
use crate::http::{ensure_success, parse_json};
use crate::services::{FileStore, StoredFile};
use crate::token::{IssuedToken, TokenCache};

const SERVICE: &str = "Box";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 45;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxConfig {
    pub box_app_settings: BoxAppSettings,
    #[serde(rename = "enterpriseID")]
    pub enterprise_id: String,
}

#[derive(Clone, Deserialize)]
pub struct BoxAppSettings {
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    #[serde(rename = "appAuth")]
    pub app_auth: BoxAppAuth,
}

#[derive(Clone, Deserialize)]
pub struct BoxAppAuth {
    #[serde(rename = "publicKeyID")]
    pub public_key_id: String,
    #[serde(rename = "privateKey")]
    pub private_key: String,
}

impl BoxConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExternalError> {
        let path = path.as_ref();
        let credentials_error = |message: String| ExternalError::Credentials {
            path: path.display().to_string(),
            message,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| credentials_error(e.to_string()))?;
        Self::from_json(&raw).map_err(credentials_error)
    }

    pub fn from_json(raw: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        let pem = &config.box_app_settings.app_auth.private_key;
        if pem.contains("ENCRYPTED") {
            return Err("encrypted private keys are not supported".to_string());
        }
        EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| e.to_string())?;
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    sub: &'a str,
    box_sub_type: &'static str,
    aud: &'a str,
    jti: String,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(default)]
    entries: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    id: String,
    name: String,
}

/// The entry whose name matches exactly; full-text search also returns
/// near matches.
fn exact_match(results: SearchResults, name: &str) -> Option<StoredFile> {
    results
        .entries
        .into_iter()
        .find(|e| e.name == name)
        .map(|e| StoredFile {
            id: e.id,
            name: e.name,
        })
}

pub struct BoxClient {
    http: reqwest::Client,
    config: BoxConfig,
    api_base: String,
    token_url: String,
    token: TokenCache,
}

impl BoxClient {
    pub fn new(config: BoxConfig) -> Result<Self, ExternalError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            config,
            api_base: "https://api.box.com/2.0".to_string(),
            token_url: "https://api.box.com/oauth2/token".to_string(),
            token: TokenCache::default(),
        })
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ExternalError> {
        Self::new(BoxConfig::from_file(path)?)
    }

    fn signed_assertion(&self) -> Result<String, ExternalError> {
        let settings = &self.config.box_app_settings;
        let claims = Claims {
            iss: &settings.client_id,
            sub: &self.config.enterprise_id,
            box_sub_type: "enterprise",
            aud: &self.token_url,
            jti: uuid::Uuid::new_v4().to_string(),
            exp: chrono::Utc::now().timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(settings.app_auth.public_key_id.clone());

        let auth_error = |e: jsonwebtoken::errors::Error| ExternalError::Auth {
            service: SERVICE,
            message: e.to_string(),
        };
        let key = EncodingKey::from_rsa_pem(settings.app_auth.private_key.as_bytes())
            .map_err(auth_error)?;
        encode(&header, &claims, &key).map_err(auth_error)
    }

    async fn fetch_token(&self) -> Result<IssuedToken, ExternalError> {
        let assertion = self.signed_assertion()?;
        let settings = &self.config.box_app_settings;
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
                ("client_id", settings.client_id.as_str()),
                ("client_secret", settings.client_secret.as_str()),
            ])
            .send()
            .await?;
        let token: TokenResponse = parse_json(SERVICE, response).await?;
        tracing::debug!("Obtained Box access token");
        Ok(IssuedToken {
            access_token: token.access_token,
            expires_in: Duration::from_secs(token.expires_in),
        })
    }

    async fn access_token(&self) -> Result<String, ExternalError> {
        self.token.get_or_refresh(|| self.fetch_token()).await
    }
}

#[async_trait]
impl FileStore for BoxClient {
    async fn find_file(
        &self,
        name: &str,
        folder_id: &str,
    ) -> Result<Option<StoredFile>, ExternalError> {
        let token = self.access_token().await?;
        let quoted = format!("\"{name}\"");
        let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("jpg");
        let response = self
            .http
            .get(format!("{}/search", self.api_base))
            .bearer_auth(token)
            .query(&[
                ("query", quoted.as_str()),
                ("file_extensions", extension),
                ("ancestor_folder_ids", folder_id),
                ("content_types", "name"),
                ("fields", "id,name"),
            ])
            .send()
            .await?;
        let results: SearchResults = parse_json(SERVICE, response).await?;
        Ok(exact_match(results, name))
    }

    async fn thumbnail(
        &self,
        file_id: &str,
        min_width: u32,
    ) -> Result<Option<Vec<u8>>, ExternalError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(format!("{}/files/{file_id}/thumbnail.jpg", self.api_base))
            .bearer_auth(token)
            .query(&[("min_width", min_width)])
            .send()
            .await?;
        // 202 means the thumbnail is still being generated.
        if response.status() == StatusCode::ACCEPTED {
            return Ok(None);
        }
        let response = ensure_success(SERVICE, response).await?;
        Ok(Some(response.bytes().await?.to_vec()))
    }

    fn file_url(&self, file_id: &str) -> String {
        format!("https://app.box.com/file/{file_id}")
    }
}
