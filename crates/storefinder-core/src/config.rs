use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_radius = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(invalid(
                var,
                format!("radius must be a finite, non-negative number of km, got {value}"),
            ))
        }
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("STOREFINDER_ENV", "development"));

    let bind_addr = parse_addr("STOREFINDER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("STOREFINDER_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("STOREFINDER_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("STOREFINDER_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("STOREFINDER_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let postal_lookup_url = or_default("STOREFINDER_POSTAL_LOOKUP_URL", "https://viacep.com.br");
    let geocoder_url = or_default(
        "STOREFINDER_GEOCODER_URL",
        "https://nominatim.openstreetmap.org",
    );
    let http_user_agent = or_default(
        "STOREFINDER_HTTP_USER_AGENT",
        "storefinder/0.1 (store-locator)",
    );
    let upstream_timeout_secs = parse_u64("STOREFINDER_UPSTREAM_TIMEOUT_SECS", "10")?;
    let default_radius_km = parse_radius("STOREFINDER_DEFAULT_RADIUS_KM", "100")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        postal_lookup_url,
        geocoder_url,
        http_user_agent,
        upstream_timeout_secs,
        default_radius_km,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
