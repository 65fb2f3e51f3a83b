//! Cached OAuth access tokens.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::error::ExternalError;

/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// A freshly issued access token.
pub(crate) struct IssuedToken {
    pub access_token: String,
    pub expires_in: Duration,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Holds the current access token and refreshes it when it is about to
/// expire. Concurrent callers wait on the same refresh.
#[derive(Default)]
pub(crate) struct TokenCache {
    inner: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<String, ExternalError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<IssuedToken, ExternalError>>,
    {
        let mut guard = self.inner.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() + REFRESH_MARGIN {
                return Ok(cached.value.clone());
            }
        }

        let issued = refresh().await?;
        let value = issued.access_token.clone();
        *guard = Some(CachedToken {
            value: issued.access_token,
            expires_at: Instant::now() + issued.expires_in,
        });
        Ok(value)
    }
}
