use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod products;
pub mod suppliers;

pub use app_config::{AppConfig, Environment, SanmarCredentials, SnsCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{CanonicalProduct, Supplier, UnifiedProduct, UnknownSupplier};
pub use suppliers::{load_suppliers, SupplierSettings, SuppliersFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value in {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read suppliers file at {path}")]
    SuppliersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse suppliers file")]
    SuppliersFileParse(#[source] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
