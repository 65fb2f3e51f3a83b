//! Response helpers shared by the HTTP clients.

use crate::error::ExternalError;

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or [`ExternalError::Api`] carrying the status and
/// body text on failure.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ExternalError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ExternalError::Api {
            service,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T, ExternalError> {
    let response = ensure_success(service, response).await?;
    Ok(response.json::<T>().await?)
}

/// Assert the response has a success status code, discarding the body.
pub(crate) async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<(), ExternalError> {
    ensure_success(service, response).await?;
    Ok(())
}

/// Append percent-encoded path segments to a base URL.
pub(crate) fn endpoint_url(
    service: &'static str,
    base: &str,
    segments: &[&str],
) -> Result<reqwest::Url, ExternalError> {
    let invalid = || ExternalError::Decode {
        service,
        message: format!("invalid endpoint base URL '{base}'"),
    };
    let mut url = reqwest::Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn segments_are_percent_encoded() {
        let url = endpoint_url(
            "Google",
            "https://sheets.googleapis.com/v4/spreadsheets",
            &["abc", "values", "Old Vocabulary (v4) with links!A2:H"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/Old%20Vocabulary%20(v4)%20with%20links!A2:H"
        );
    }

    #[test]
    fn trailing_slash_base() {
        let url = endpoint_url("Google", "https://example.test/files/", &["id1", "copy"]).unwrap();
        assert_eq!(url.as_str(), "https://example.test/files/id1/copy");
    }

    #[test]
    fn segments_cannot_escape_the_base_path() {
        let url = endpoint_url("Google", "https://example.test/files", &["a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "https://example.test/files/a%2Fb%3Fc%23d");
    }

    #[test]
    fn base_must_be_absolute() {
        assert_matches!(
            endpoint_url("Google", "not a url", &["x"]),
            Err(ExternalError::Decode { service: "Google", .. })
        );
    }
}
