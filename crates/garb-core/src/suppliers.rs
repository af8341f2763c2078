use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::products::Supplier;
use crate::ConfigError;

/// Per-vendor settings from `suppliers.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierSettings {
    /// Base URL (S&S) or full service URL (SanMar SOAP port).
    pub endpoint: String,
    /// Optional dot-separated path pinning the product records inside the
    /// response tree (e.g. `"Envelope.Body.listResponse.items"`). When set
    /// it is tried before the locator heuristics; when it resolves to
    /// nothing the heuristics still run, so a stale path degrades instead
    /// of blanking the feed.
    #[serde(default)]
    pub products_path: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuppliersFile {
    pub sns: SupplierSettings,
    pub sanmar: SupplierSettings,
}

impl SuppliersFile {
    #[must_use]
    pub fn get(&self, supplier: Supplier) -> &SupplierSettings {
        match supplier {
            Supplier::Sns => &self.sns,
            Supplier::Sanmar => &self.sanmar,
        }
    }
}

/// Load and validate supplier settings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_suppliers(path: &Path) -> Result<SuppliersFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SuppliersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let suppliers: SuppliersFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SuppliersFileParse)?;

    validate_suppliers(&suppliers)?;

    Ok(suppliers)
}

fn validate_suppliers(suppliers: &SuppliersFile) -> Result<(), ConfigError> {
    for (name, settings) in [("sns", &suppliers.sns), ("sanmar", &suppliers.sanmar)] {
        if settings.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "supplier '{name}' has an empty endpoint"
            )));
        }

        if !settings.endpoint.starts_with("http://") && !settings.endpoint.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "supplier '{name}' endpoint must start with http:// or https://, got '{}'",
                settings.endpoint
            )));
        }

        if let Some(path) = &settings.products_path {
            if path.trim().is_empty() || path.split('.').any(|segment| segment.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "supplier '{name}' products_path '{path}' contains an empty segment"
                )));
            }
        }
    }

    Ok(())
}
