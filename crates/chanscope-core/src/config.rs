use crate::app_config::AppConfig;
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
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let neynar_api_key = require("NEYNAR_API_KEY")?;

    let neynar_base_url = or_default(
        "CHANSCOPE_NEYNAR_BASE_URL",
        "https://api.neynar.com/v2/farcaster/",
    );
    let log_level = or_default("CHANSCOPE_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("CHANSCOPE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CHANSCOPE_USER_AGENT", "chanscope/0.1 (channel-analytics)");

    let page_size = parse_u32("CHANSCOPE_PAGE_SIZE", "100")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CHANSCOPE_PAGE_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let max_requests = parse_u32("CHANSCOPE_MAX_REQUESTS", "150")?;
    let inter_request_delay_ms = parse_u64("CHANSCOPE_INTER_REQUEST_DELAY_MS", "200")?;
    let output_dir = PathBuf::from(or_default("CHANSCOPE_OUTPUT_DIR", "output"));

    Ok(AppConfig {
        neynar_api_key,
        neynar_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        page_size,
        max_requests,
        inter_request_delay_ms,
        output_dir,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
