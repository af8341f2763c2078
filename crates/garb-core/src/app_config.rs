use std::net::SocketAddr;
use std::path::PathBuf;

use crate::products::Supplier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// S&S Activewear REST credentials (HTTP basic auth: account number + key).
#[derive(Clone)]
pub struct SnsCredentials {
    pub account_number: String,
    pub api_key: String,
}

/// SanMar web-service credentials, sent inside the SOAP request body.
#[derive(Clone)]
pub struct SanmarCredentials {
    pub customer_number: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub suppliers_path: PathBuf,
    pub primary_supplier: Supplier,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub sns_credentials: Option<SnsCredentials>,
    pub sanmar_credentials: Option<SanmarCredentials>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("suppliers_path", &self.suppliers_path)
            .field("primary_supplier", &self.primary_supplier)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "sns_credentials",
                &self.sns_credentials.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "sanmar_credentials",
                &self.sanmar_credentials.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
