use shifter_core::SourceError;
use thiserror::Error;

/// Error code Stripe returns for ids that do not exist.
pub const RESOURCE_MISSING: &str = "resource_missing";

/// Errors returned by the Stripe API client.
#[derive(Debug, Error)]
pub enum StripeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe reported that the requested resource does not exist.
    #[error("Stripe resource not found: {message}")]
    NotFound { message: String },

    /// Stripe returned an error envelope other than `resource_missing`.
    #[error("Stripe API error (HTTP {status}, {error_type}): {message}")]
    Api {
        status: u16,
        error_type: String,
        code: Option<String>,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl SourceError for StripeError {
    fn is_not_found(&self) -> bool {
        matches!(self, StripeError::NotFound { .. })
    }
}
