//! Service-account JWT bearer grant.

use std::path::Path;
use std::time::Duration;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::ExternalError;
use crate::http::parse_json;
use crate::token::IssuedToken;

const SERVICE: &str = "Google";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// The fields of a service-account key file the client needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
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
        let key: Self = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| e.to_string())?;
        Ok(key)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

fn signed_assertion(
    key: &ServiceAccountKey,
    scopes: &[&str],
    now: i64,
) -> Result<String, ExternalError> {
    let claims = Claims {
        iss: &key.client_email,
        scope: scopes.join(" "),
        aud: &key.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };
    let encoding_key =
        EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| ExternalError::Auth {
            service: SERVICE,
            message: e.to_string(),
        })?;
    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key).map_err(|e| {
        ExternalError::Auth {
            service: SERVICE,
            message: e.to_string(),
        }
    })
}

pub(super) async fn fetch_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
    scopes: &[&str],
) -> Result<IssuedToken, ExternalError> {
    let assertion = signed_assertion(key, scopes, chrono::Utc::now().timestamp())?;
    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;
    let token: TokenResponse = parse_json(SERVICE, response).await?;
    tracing::debug!(client = %key.client_email, "Obtained Google access token");
    Ok(IssuedToken {
        access_token: token.access_token,
        expires_in: Duration::from_secs(token.expires_in),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_uri_defaults() {
        let raw = r#"{"client_email":"svc@example.iam.gserviceaccount.com","private_key":"x"}"#;
        let key: ServiceAccountKey = serde_json::from_str(raw).unwrap();
        assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn invalid_private_key_is_rejected() {
        let raw = r#"{"client_email":"svc@example.com","private_key":"not a pem"}"#;
        assert!(ServiceAccountKey::from_json(raw).is_err());
    }

    #[test]
    fn missing_file_is_a_credentials_error() {
        let err = ServiceAccountKey::from_file("/nonexistent/service-account.json").unwrap_err();
        assert!(matches!(err, ExternalError::Credentials { .. }));
    }

    #[test]
    fn debug_hides_private_key() {
        let key = ServiceAccountKey {
            client_email: "svc@example.com".into(),
            private_key: "SECRET".into(),
            token_uri: default_token_uri(),
        };
        assert!(!format!("{key:?}").contains("SECRET"));
    }
}
