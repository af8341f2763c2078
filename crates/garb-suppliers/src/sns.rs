//! HTTP client for the S&S Activewear products endpoint.
//!
//! The REST vendor is the easy one: stable JSON, one query parameter,
//! Basic auth. Rows come back as raw `serde_json::Value` — their schema
//! is trusted enough that the unify step reads them directly, without a
//! detour through the tree engine.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use garb_core::SnsCredentials;

use crate::error::{snippet_of, SupplierError};

/// Client for the S&S Activewear REST API.
///
/// The endpoint comes from the supplier settings file, so the same
/// constructor serves production and wiremock-backed tests. Cloning is
/// cheap: `reqwest::Client` is a shared handle.
#[derive(Clone)]
pub struct SnsClient {
    client: Client,
    base_url: String,
    credentials: Option<SnsCredentials>,
}

impl SnsClient {
    /// Creates a client for the given endpoint. Credentials are optional;
    /// without them requests go out unauthenticated (useful against mock
    /// servers, rejected by the real vendor).
    ///
    /// # Errors
    ///
    /// Returns [`SupplierError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoint: &str,
        credentials: Option<SnsCredentials>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SupplierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_owned(),
            credentials,
        })
    }

    /// Fetches all product rows for a style number.
    ///
    /// An unknown style is an empty row set, not an error.
    ///
    /// # Errors
    ///
    /// - [`SupplierError::Http`] — network, TLS, or timeout failure.
    /// - [`SupplierError::UnexpectedStatus`] — any non-2xx status.
    /// - [`SupplierError::Deserialize`] — body is not valid JSON.
    /// - [`SupplierError::Malformed`] — valid JSON in neither of the two
    ///   shapes the vendor ships (bare array, or `{"products": [...]}`).
    pub async fn fetch_products(&self, style: &str) -> Result<Vec<Value>, SupplierError> {
        let url = format!("{}/v2/products/", self.base_url);
        let mut request = self.client.get(&url).query(&[("style", style)]);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.account_number, Some(&credentials.api_key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SupplierError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| SupplierError::Deserialize {
                context: format!("products for style {style}"),
                source: e,
            })?;

        let rows = extract_rows(value).ok_or_else(|| SupplierError::Malformed {
            context: format!("products for style {style}"),
            snippet: snippet_of(&body),
        })?;

        tracing::debug!(style, count = rows.len(), "fetched sns product rows");
        Ok(rows)
    }
}

/// The vendor has shipped both a bare top-level array and a `products`
/// envelope; accept either.
fn extract_rows(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(rows) => Some(rows),
        Value::Object(mut map) => match map.remove("products") {
            Some(Value::Array(rows)) => Some(rows),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rows_extract_from_a_bare_array() {
        let rows = extract_rows(json!([{"sku": "A"}, {"sku": "B"}]));
        assert_eq!(rows.map(|r| r.len()), Some(2));
    }

    #[test]
    fn rows_extract_from_a_products_envelope() {
        let rows = extract_rows(json!({"products": [{"sku": "A"}], "page": 1}));
        assert_eq!(rows.map(|r| r.len()), Some(1));
    }

    #[test]
    fn scalar_and_wrong_shapes_are_rejected() {
        assert!(extract_rows(json!("nope")).is_none());
        assert!(extract_rows(json!({"products": "nope"})).is_none());
        assert!(extract_rows(json!({"items": []})).is_none());
    }

    #[test]
    fn empty_array_is_a_valid_empty_result() {
        let rows = extract_rows(json!([]));
        assert_eq!(rows.map(|r| r.len()), Some(0));
    }
}
