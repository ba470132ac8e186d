//! HTTP client for the Stripe REST API.
//!
//! Wraps `reqwest` with Stripe authentication, API version pinning, and typed
//! error envelopes. Only the two read endpoints the catalog needs are
//! exposed: product retrieval and the active-plan listing.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use shifter_core::{CatalogSource, RawPlan, RawProduct};

use crate::error::{StripeError, RESOURCE_MISSING};
use crate::types::{ErrorResponse, ListResponse};

const DEFAULT_BASE_URL: &str = "https://api.stripe.com/";

/// Client for the Stripe REST API.
///
/// Use [`StripeClient::new`] for production or [`StripeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct StripeClient {
    client: Client,
    api_secret: String,
    api_version: String,
    base_url: Url,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_secret", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Creates a new client pointed at the production Stripe API.
    ///
    /// # Errors
    ///
    /// Returns [`StripeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_secret: &str, api_version: &str, timeout_secs: u64) -> Result<Self, StripeError> {
        Self::with_base_url(api_secret, api_version, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`StripeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StripeError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(
        api_secret: &str,
        api_version: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, StripeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("shifter-catalog/0.1")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| StripeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(StripeError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_string(),
            });
        }

        Ok(Self {
            client,
            api_secret: api_secret.to_owned(),
            api_version: api_version.to_owned(),
            base_url: parsed,
        })
    }

    /// Retrieves a product by id (`GET /v1/products/{id}`).
    ///
    /// # Errors
    ///
    /// - [`StripeError::NotFound`] if Stripe reports `resource_missing`.
    /// - [`StripeError::Api`] for any other Stripe error envelope.
    /// - [`StripeError::Http`] on network failure.
    /// - [`StripeError::Deserialize`] if the body is not a product.
    pub async fn retrieve_product(&self, id: &str) -> Result<RawProduct, StripeError> {
        let url = self.build_url(&["v1", "products", id], &[])?;
        tracing::debug!(product_id = id, "retrieving Stripe product");
        self.request_json(&url).await
    }

    /// Lists the active plans of a product
    /// (`GET /v1/plans?product={id}&active=true`).
    ///
    /// Only the first page is read. Inactive plans in the response, if any,
    /// are filtered out.
    ///
    /// # Errors
    ///
    /// Same as [`StripeClient::retrieve_product`].
    pub async fn list_active_plans(&self, product_id: &str) -> Result<Vec<RawPlan>, StripeError> {
        let url = self.build_url(
            &["v1", "plans"],
            &[("product", product_id), ("active", "true")],
        )?;
        tracing::debug!(product_id, "listing active Stripe plans");
        let list: ListResponse<RawPlan> = self.request_json(&url).await?;
        if list.has_more {
            tracing::debug!(
                product_id,
                returned = list.data.len(),
                "plan list has more pages; only the first page is used"
            );
        }
        Ok(list.data.into_iter().filter(|plan| plan.active).collect())
    }

    /// Builds a request URL from path segments and query pairs, percent-encoding
    /// both.
    fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, StripeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StripeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends an authenticated GET request and decodes a successful body as `T`.
    ///
    /// Non-2xx responses are decoded as Stripe error envelopes.
    async fn request_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, StripeError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_secret)
            .header("Stripe-Version", &self.api_version)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| StripeError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    /// Maps a non-2xx response to a typed error.
    fn api_error(status: StatusCode, body: &str) -> StripeError {
        let Ok(envelope) = serde_json::from_str::<ErrorResponse>(body) else {
            return StripeError::Api {
                status: status.as_u16(),
                error_type: "unknown".to_string(),
                code: None,
                message: body.chars().take(200).collect(),
            };
        };

        let error = envelope.error;
        let message = error
            .message
            .unwrap_or_else(|| "unknown error".to_string());
        if error.code.as_deref() == Some(RESOURCE_MISSING) {
            return StripeError::NotFound { message };
        }
        StripeError::Api {
            status: status.as_u16(),
            error_type: error.error_type.unwrap_or_else(|| "unknown".to_string()),
            code: error.code,
            message,
        }
    }
}

impl CatalogSource for StripeClient {
    type Error = StripeError;

    async fn retrieve_product(&self, id: &str) -> Result<RawProduct, StripeError> {
        StripeClient::retrieve_product(self, id).await
    }

    async fn list_active_plans(&self, product_id: &str) -> Result<Vec<RawPlan>, StripeError> {
        StripeClient::list_active_plans(self, product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> StripeClient {
        StripeClient::with_base_url("sk_test", "2020-08-27", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_path_segments() {
        let client = test_client("https://api.stripe.com");
        let url = client.build_url(&["v1", "products", "tier_01"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.stripe.com/v1/products/tier_01");
    }

    #[test]
    fn build_url_keeps_base_path_prefix() {
        let client = test_client("http://localhost:1234/stripe/");
        let url = client
            .build_url(&["v1", "plans"], &[("product", "hl_tier_01"), ("active", "true")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1234/stripe/v1/plans?product=hl_tier_01&active=true"
        );
    }

    #[test]
    fn build_url_encodes_path_segment() {
        let client = test_client("https://api.stripe.com");
        let url = client
            .build_url(&["v1", "products", "prod/../x y"], &[])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.stripe.com/v1/products/prod%2F..%2Fx%20y"
        );
    }

    #[test]
    fn with_base_url_rejects_non_http_url() {
        let err = StripeClient::with_base_url("sk", "v", 30, "mailto:ops@example.com").unwrap_err();
        assert!(matches!(err, StripeError::InvalidBaseUrl { .. }), "{err:?}");
    }

    #[test]
    fn api_error_maps_resource_missing_to_not_found() {
        let body = r#"{"error":{"type":"invalid_request_error","code":"resource_missing","message":"No such product: 'prod_x'"}}"#;
        let err = StripeClient::api_error(StatusCode::NOT_FOUND, body);
        assert!(matches!(err, StripeError::NotFound { ref message } if message.contains("prod_x")));
    }

    #[test]
    fn api_error_keeps_other_codes() {
        let body = r#"{"error":{"type":"invalid_request_error","message":"Invalid API Key provided"}}"#;
        let err = StripeClient::api_error(StatusCode::UNAUTHORIZED, body);
        assert!(
            matches!(err, StripeError::Api { status: 401, ref error_type, code: None, .. } if error_type == "invalid_request_error")
        );
    }

    #[test]
    fn api_error_tolerates_non_json_body() {
        let err = StripeClient::api_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(err, StripeError::Api { status: 502, .. }));
    }

    #[test]
    fn debug_redacts_secret() {
        let client = test_client("https://api.stripe.com");
        assert!(!format!("{client:?}").contains("sk_test"));
    }
}
