use crate::app_config::{
    TrendsConfig, DEFAULT_API_BASE_URL, DEFAULT_BATCH_EXECUTE_URL, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_config() -> Result<TrendsConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_config_from_env() -> Result<TrendsConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to
/// [`TrendsConfig::default`] values.
fn build_config<F>(lookup: F) -> Result<TrendsConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(raw.trim_end_matches('/').to_string())
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected an http(s) URL, got '{raw}'"),
            })
        }
    };

    let api_base_url = parse_url("GTRENDS_API_BASE_URL", DEFAULT_API_BASE_URL)?;
    let batch_execute_url = parse_url("GTRENDS_BATCH_EXECUTE_URL", DEFAULT_BATCH_EXECUTE_URL)?;
    let language = or_default("GTRENDS_LANGUAGE", "EN");
    let user_agent = or_default("GTRENDS_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = match lookup("GTRENDS_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "GTRENDS_REQUEST_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })?,
        ),
        Err(_) => None,
    };

    let debug = parse_bool(&or_default("GTRENDS_DEBUG", "false"))?;

    Ok(TrendsConfig {
        api_base_url,
        batch_execute_url,
        language,
        user_agent,
        request_timeout_secs,
        debug,
    })
}

fn parse_bool(s: &str) -> Result<bool, ConfigError> {
    match s {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GTRENDS_DEBUG".to_string(),
            reason: format!("expected true/false/1/0, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
