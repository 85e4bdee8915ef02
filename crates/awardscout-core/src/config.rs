use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Nothing is strictly required: a missing `GEMINI_API_KEY` is reported per
/// AI operation rather than at startup, so matching still works offline.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("AWARDSCOUT_ENV", "development"))?;

    let bind_addr = or_default("AWARDSCOUT_BIND_ADDR", "0.0.0.0:3001")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("AWARDSCOUT_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("AWARDSCOUT_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "AWARDSCOUT_CATALOG_PATH",
        "./config/awards.yaml",
    ));

    let gemini_api_key = lookup("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let gemini_model = or_default("AWARDSCOUT_GEMINI_MODEL", "gemini-2.0-flash");
    let gemini_base_url = or_default(
        "AWARDSCOUT_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com/",
    );

    let request_timeout_secs = parse_u64("AWARDSCOUT_REQUEST_TIMEOUT_SECS", "60")?;
    let batch_size = or_default("AWARDSCOUT_BATCH_SIZE", "5")
        .parse::<usize>()
        .map_err(|e| invalid("AWARDSCOUT_BATCH_SIZE", e.to_string()))?;
    let batch_delay_ms = parse_u64("AWARDSCOUT_BATCH_DELAY_MS", "0")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        request_timeout_secs,
        batch_size,
        batch_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AWARDSCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
