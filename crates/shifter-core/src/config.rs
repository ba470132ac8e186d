use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Stripe API version pinned when none is configured.
pub const DEFAULT_STRIPE_API_VERSION: &str = "2020-08-27";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let stripe_api_secret = require("STRIPE_API_SECRET")?;

    let env = parse_environment(&or_default("SHIFTER_ENV", "development"))?;
    let log_level = or_default("SHIFTER_LOG_LEVEL", "info");
    let stripe_base_url = or_default("SHIFTER_STRIPE_BASE_URL", "https://api.stripe.com");
    let stripe_api_version = or_default("SHIFTER_STRIPE_API_VERSION", DEFAULT_STRIPE_API_VERSION);
    let catalog_path = lookup("SHIFTER_CATALOG_PATH").ok().map(PathBuf::from);

    let request_timeout_secs = parse_u64("SHIFTER_REQUEST_TIMEOUT_SECS", "30")?;
    let fetch_concurrency = parse_usize("SHIFTER_FETCH_CONCURRENCY", "8")?;
    if fetch_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHIFTER_FETCH_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        stripe_api_secret,
        stripe_base_url,
        stripe_api_version,
        catalog_path,
        request_timeout_secs,
        fetch_concurrency,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHIFTER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}
