//! SOAP client for the SanMar product information service.
//!
//! The legacy vendor speaks SOAP 1.1 with credentials in the request
//! body and a response schema that has never held still. The client
//! builds the envelope by hand, decodes whatever comes back into a
//! [`RawNode`] tree, and hands the tree to the locate → map → dedup
//! engine rather than binding any response type.

use std::borrow::Cow;
use std::time::Duration;

use quick_xml::escape::escape;
use reqwest::Client;

use garb_core::{CanonicalProduct, SanmarCredentials};
use garb_normalize::{dedup_products, locate_products, map_record, walk, RawNode, SANMAR_ALIASES};

use crate::error::{snippet_of, SupplierError};

/// Client for the SanMar product info SOAP service. Cloning is cheap:
/// `reqwest::Client` is a shared handle.
#[derive(Clone)]
pub struct SanmarClient {
    client: Client,
    endpoint: String,
    products_path: Option<String>,
    credentials: Option<SanmarCredentials>,
}

impl SanmarClient {
    /// Creates a client for the given endpoint. `products_path` is the
    /// operator pin from the supplier settings, passed through to the
    /// locator on every response.
    ///
    /// # Errors
    ///
    /// Returns [`SupplierError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoint: &str,
        products_path: Option<String>,
        credentials: Option<SanmarCredentials>,
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
            endpoint: endpoint.to_owned(),
            products_path,
            credentials,
        })
    }

    /// Fetches and normalizes all product records for a style number.
    ///
    /// The response tree is searched heuristically (or via the configured
    /// path pin), mapped through the SanMar alias tables, and deduplicated
    /// on `(sku, sizeName)`. Records that map to an empty sku — usually
    /// envelope wrappers swept up by the recall-biased bucket search — are
    /// dropped, so an answer holding no real products comes back as an
    /// empty vector (a valid outcome, and the one that arms the caller's
    /// vendor fallback), not an error.
    ///
    /// # Errors
    ///
    /// - [`SupplierError::Http`] — network, TLS, or timeout failure.
    /// - [`SupplierError::Fault`] — the body carries a SOAP fault (the
    ///   vendor sends these with HTTP 500, so the fault is checked before
    ///   the status).
    /// - [`SupplierError::UnexpectedStatus`] — non-2xx without a fault.
    /// - [`SupplierError::Malformed`] — 2xx body that does not decode as
    ///   XML.
    pub async fn fetch_products(&self, style: &str) -> Result<Vec<CanonicalProduct>, SupplierError> {
        let envelope = self.build_envelope(style);
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", "\"\"")
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let tree = RawNode::from_xml_str(&body).ok();
        if let Some(fault) = tree.as_ref().and_then(extract_fault) {
            return Err(fault);
        }
        if !status.is_success() {
            return Err(SupplierError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }
        let Some(tree) = tree else {
            return Err(SupplierError::Malformed {
                context: format!("products for style {style}"),
                snippet: snippet_of(&body),
            });
        };

        let records = locate_products(&tree, self.products_path.as_deref());
        let mapped = records
            .into_iter()
            .map(|record| {
                let mut product = map_record(record, &SANMAR_ALIASES);
                product.provider = "sanmar".to_string();
                product
            })
            .collect();
        let mut products = dedup_products(mapped);
        let found = products.len();
        products.retain(|product| !product.sku.is_empty());
        if products.len() < found {
            tracing::debug!(
                dropped = found - products.len(),
                "dropped located records without a sku"
            );
        }

        tracing::debug!(style, count = products.len(), "fetched sanmar products");
        Ok(products)
    }

    /// Builds the `getProductInfoByStyleColorSize` request envelope.
    ///
    /// Color and size are left empty to request every variant of the
    /// style. Credentials ride in the body per the vendor's WSDL; without
    /// configured credentials the elements go out empty, which the real
    /// service rejects with a fault but mock servers accept.
    fn build_envelope(&self, style: &str) -> String {
        let style = escape(style);
        let (customer_number, username, password) = match &self.credentials {
            Some(c) => (
                escape(&c.customer_number),
                escape(&c.username),
                escape(&c.password),
            ),
            None => (Cow::Borrowed(""), Cow::Borrowed(""), Cow::Borrowed("")),
        };
        format!(
            concat!(
                r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/""#,
                r#" xmlns:impl="http://impl.webservice.integration.sanmar.com/">"#,
                "<soapenv:Header/>",
                "<soapenv:Body>",
                "<impl:getProductInfoByStyleColorSize>",
                "<arg0><style>{style}</style><color/><size/></arg0>",
                "<arg1>",
                "<sanMarCustomerNumber>{customer_number}</sanMarCustomerNumber>",
                "<sanMarUserName>{username}</sanMarUserName>",
                "<sanMarUserPassword>{password}</sanMarUserPassword>",
                "</arg1>",
                "</impl:getProductInfoByStyleColorSize>",
                "</soapenv:Body>",
                "</soapenv:Envelope>",
            ),
            style = style,
            customer_number = customer_number,
            username = username,
            password = password,
        )
    }
}

/// First `Fault` mapping anywhere in the tree, as a typed error. SOAP 1.1
/// spells the members `faultcode`/`faultstring`.
fn extract_fault(tree: &RawNode) -> Option<SupplierError> {
    let mut fault: Option<SupplierError> = None;
    walk(tree, "", &mut |node, key| {
        if fault.is_some() || key != "Fault" {
            return;
        }
        let code = node.get("faultcode").and_then(RawNode::as_text);
        let detail = node.get("faultstring").and_then(RawNode::as_text);
        if code.is_none() && detail.is_none() {
            return;
        }
        fault = Some(SupplierError::Fault {
            code: code.unwrap_or("unknown").to_string(),
            detail: detail.unwrap_or("").to_string(),
        });
    });
    fault
}
