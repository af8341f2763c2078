//! Vendor clients and the cross-vendor fetch facade.
//!
//! One client per supplier (`sns` REST, `sanmar` SOAP), each reducing
//! its vendor's response to rows the unify step accepts, plus
//! [`Suppliers`] — the handle the server and CLI share for "give me
//! unified products for this style, falling back across vendors when
//! the first one comes up empty".

pub mod error;
pub mod sanmar;
pub mod sns;

use serde_json::Value;

use garb_core::{AppConfig, Supplier, SuppliersFile, UnifiedProduct};
use garb_normalize::unify_records;

pub use error::SupplierError;
pub use sanmar::SanmarClient;
pub use sns::SnsClient;

/// Both vendor clients behind one fetch surface. Clones share the
/// underlying `reqwest` connection pools.
#[derive(Clone)]
pub struct Suppliers {
    sns: SnsClient,
    sanmar: SanmarClient,
    sns_enabled: bool,
    sanmar_enabled: bool,
}

/// Result of a fetch: the unified rows plus the supplier that actually
/// served them (fallback may answer with the secondary).
#[derive(Debug)]
pub struct FetchOutcome {
    pub products: Vec<UnifiedProduct>,
    pub supplier: Supplier,
}

impl Suppliers {
    /// Builds both clients from the app config and supplier settings.
    ///
    /// # Errors
    ///
    /// Returns [`SupplierError::Http`] if either underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn from_config(
        config: &AppConfig,
        settings: &SuppliersFile,
    ) -> Result<Self, SupplierError> {
        let sns_settings = settings.get(Supplier::Sns);
        let sns = SnsClient::new(
            &sns_settings.endpoint,
            config.sns_credentials.clone(),
            config.request_timeout_secs,
            &config.user_agent,
        )?;

        let sanmar_settings = settings.get(Supplier::Sanmar);
        let sanmar = SanmarClient::new(
            &sanmar_settings.endpoint,
            sanmar_settings.products_path.clone(),
            config.sanmar_credentials.clone(),
            config.request_timeout_secs,
            &config.user_agent,
        )?;

        Ok(Self {
            sns,
            sanmar,
            sns_enabled: sns_settings.enabled,
            sanmar_enabled: sanmar_settings.enabled,
        })
    }

    /// Fetches from one supplier and unifies its rows.
    ///
    /// # Errors
    ///
    /// Propagates the vendor client's [`SupplierError`].
    pub async fn fetch_unified(
        &self,
        supplier: Supplier,
        style: &str,
    ) -> Result<Vec<UnifiedProduct>, SupplierError> {
        match supplier {
            Supplier::Sns => {
                let rows = self.sns.fetch_products(style).await?;
                Ok(unify_records(&rows))
            }
            Supplier::Sanmar => {
                let products = self.sanmar.fetch_products(style).await?;
                let rows: Vec<Value> = products
                    .iter()
                    .filter_map(|product| serde_json::to_value(product).ok())
                    .collect();
                Ok(unify_records(&rows))
            }
        }
    }

    /// Fetches from `primary`, falling back to the other supplier once
    /// when the primary answers with zero products.
    ///
    /// The fallback is best-effort: a secondary *failure* after a clean
    /// empty primary answer is logged and the empty result served —
    /// absence of products is a valid outcome. The secondary is skipped
    /// entirely when the settings file disables it. A primary failure is
    /// surfaced immediately, with no fallback.
    ///
    /// # Errors
    ///
    /// Propagates the primary supplier's [`SupplierError`] only.
    pub async fn fetch_unified_with_fallback(
        &self,
        primary: Supplier,
        style: &str,
    ) -> Result<FetchOutcome, SupplierError> {
        let products = self.fetch_unified(primary, style).await?;
        if !products.is_empty() {
            return Ok(FetchOutcome {
                products,
                supplier: primary,
            });
        }

        let secondary = primary.other();
        if !self.is_enabled(secondary) {
            tracing::debug!(%primary, %secondary, style, "no fallback: secondary disabled");
            return Ok(FetchOutcome {
                products,
                supplier: primary,
            });
        }

        tracing::info!(%primary, %secondary, style, "primary returned no products, trying secondary");
        match self.fetch_unified(secondary, style).await {
            Ok(fallback) if !fallback.is_empty() => Ok(FetchOutcome {
                products: fallback,
                supplier: secondary,
            }),
            Ok(_) => Ok(FetchOutcome {
                products,
                supplier: primary,
            }),
            Err(error) => {
                tracing::warn!(
                    %error,
                    %secondary,
                    style,
                    "secondary supplier failed after empty primary result, serving empty"
                );
                Ok(FetchOutcome {
                    products,
                    supplier: primary,
                })
            }
        }
    }

    /// Whether the settings file left this supplier eligible for
    /// automatic fallback. Pinned requests ignore the flag.
    #[must_use]
    pub fn is_enabled(&self, supplier: Supplier) -> bool {
        match supplier {
            Supplier::Sns => self.sns_enabled,
            Supplier::Sanmar => self.sanmar_enabled,
        }
    }
}
