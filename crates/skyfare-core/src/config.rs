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
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let amadeus_api_key = require("AMAD_API_KEY")?;
    let amadeus_api_secret = require("AMAD_API_SECRET")?;

    let env = parse_environment(&or_default("SKYFARE_ENV", "development"))?;

    let bind_addr = parse_addr("SKYFARE_BIND_ADDR", "127.0.0.1:8080")?;
    let log_level = or_default("SKYFARE_LOG_LEVEL", "info");
    let amadeus_base_url = or_default("AMADEUS_BASE_URL", "https://test.api.amadeus.com");
    let upstream_timeout_secs = parse_u64("SKYFARE_UPSTREAM_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SKYFARE_USER_AGENT", "skyfare/0.1 (flight-search)");

    let search_max_results = parse_u32("SKYFARE_SEARCH_MAX_RESULTS", "50")?;
    if search_max_results == 0 || search_max_results > 250 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SKYFARE_SEARCH_MAX_RESULTS".to_string(),
            reason: format!("must be between 1 and 250, got {search_max_results}"),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        amadeus_api_key,
        amadeus_api_secret,
        amadeus_base_url,
        upstream_timeout_secs,
        user_agent,
        search_max_results,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SKYFARE_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
