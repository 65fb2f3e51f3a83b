/// Errors from the external-service layer.
#[derive(Debug, thiserror::Error)]
pub enum ExternalError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("{service} API error ({status}): {body}")]
    Api {
        service: &'static str,
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Obtaining an access token failed.
    #[error("{service} authentication failed: {message}")]
    Auth {
        service: &'static str,
        message: String,
    },

    /// The response did not have the expected shape.
    #[error("Unexpected {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    /// A credentials file could not be read or parsed.
    #[error("Invalid credentials file {path}: {message}")]
    Credentials { path: String, message: String },
}
