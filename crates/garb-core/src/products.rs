use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upstream vendor discriminator. The string forms (`"sns"`, `"sanmar"`)
/// are wire values: they appear in query params, config, and the
/// `provider` field of every product record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Supplier {
    Sns,
    Sanmar,
}

impl Supplier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Supplier::Sns => "sns",
            Supplier::Sanmar => "sanmar",
        }
    }

    /// The counterpart vendor, used for the sequential fallback query.
    #[must_use]
    pub fn other(self) -> Supplier {
        match self {
            Supplier::Sns => Supplier::Sanmar,
            Supplier::Sanmar => Supplier::Sns,
        }
    }
}

impl std::fmt::Display for Supplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown supplier '{0}' (expected \"sns\" or \"sanmar\")")]
pub struct UnknownSupplier(pub String);

impl std::str::FromStr for Supplier {
    type Err = UnknownSupplier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sns" => Ok(Supplier::Sns),
            "sanmar" => Ok(Supplier::Sanmar),
            other => Err(UnknownSupplier(other.to_string())),
        }
    }
}

/// One product row extracted from a supplier response, after field mapping
/// and deduplication but before the cross-vendor unify pass.
///
/// Every field is best-effort: a record whose upstream spelling matched no
/// alias keeps the empty string (or `0.0` for price) rather than failing
/// the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProduct {
    pub sku: String,
    pub brand_name: String,
    pub style_name: String,
    pub color_name: String,
    pub size_name: String,
    pub title: String,
    pub price: f64,
    pub image_front: String,
    pub image_back: String,
    /// Id of the vendor the record came from (`"sns"` or `"sanmar"`).
    pub provider: String,
}

impl CanonicalProduct {
    /// The dedup identity: exact `(sku, size)` string pair. Empty strings
    /// are legitimate, matchable values here.
    #[must_use]
    pub fn identity(&self) -> (&str, &str) {
        (&self.sku, &self.size_name)
    }
}

/// The public product shape served to catalog consumers, produced only by
/// the unify pass. Field names are fixed wire format (camelCase).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedProduct {
    pub sku: String,
    pub brand: String,
    pub style: String,
    pub color: String,
    pub size: String,
    pub price: f64,
    pub image_front: String,
    pub image_back: String,
    pub provider: String,
}
