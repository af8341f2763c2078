use crate::app_config::{AppConfig, Environment, SanmarCredentials, SnsCredentials};
use crate::products::Supplier;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid or credentials are
/// only partially configured.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid or credentials are
/// only partially configured.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("GARB_ENV", "development"))?;

    let bind_addr = parse_addr("GARB_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("GARB_LOG_LEVEL", "info");
    let suppliers_path = PathBuf::from(or_default("GARB_SUPPLIERS_PATH", "./config/suppliers.yaml"));

    let primary_supplier = or_default("GARB_PRIMARY_SUPPLIER", "sns")
        .parse::<Supplier>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "GARB_PRIMARY_SUPPLIER".to_string(),
            reason: e.to_string(),
        })?;

    let request_timeout_secs = parse_u64("GARB_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GARB_USER_AGENT", "garb/0.1 (catalog-sync)");

    // Vendor credentials are optional as a pair/trio, never in part: a half-set
    // credential block is a deployment mistake, not a choice.
    let sns_credentials = match (lookup("SNS_ACCOUNT_NUMBER").ok(), lookup("SNS_API_KEY").ok()) {
        (Some(account_number), Some(api_key)) => Some(SnsCredentials {
            account_number,
            api_key,
        }),
        (None, None) => None,
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("SNS_API_KEY".to_string())),
        (None, Some(_)) => {
            return Err(ConfigError::MissingEnvVar("SNS_ACCOUNT_NUMBER".to_string()))
        }
    };

    let sanmar_credentials = match (
        lookup("SANMAR_CUSTOMER_NUMBER").ok(),
        lookup("SANMAR_USERNAME").ok(),
        lookup("SANMAR_PASSWORD").ok(),
    ) {
        (Some(customer_number), Some(username), Some(password)) => Some(SanmarCredentials {
            customer_number,
            username,
            password,
        }),
        (None, None, None) => None,
        (customer_number, username, _) => {
            let missing = if customer_number.is_none() {
                "SANMAR_CUSTOMER_NUMBER"
            } else if username.is_none() {
                "SANMAR_USERNAME"
            } else {
                "SANMAR_PASSWORD"
            };
            return Err(ConfigError::MissingEnvVar(missing.to_string()));
        }
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        suppliers_path,
        primary_supplier,
        request_timeout_secs,
        user_agent,
        sns_credentials,
        sanmar_credentials,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GARB_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}
