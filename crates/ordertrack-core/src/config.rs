use chrono::FixedOffset;

use crate::app_config::{AppConfig, CredentialPolicy, Environment};
use crate::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_USER_AGENT: &str = "ordertrack/0.1 (order-tracking)";
/// Shown when a lookup fails without a backend-supplied message.
pub const DEFAULT_FALLBACK_ERROR: &str = "Error al buscar el pedido";

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("ORDERTRACK_ENV", "development"))?;

    let api_base_url = or_default("ORDERTRACK_API_URL", DEFAULT_API_URL);
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(invalid(
            "ORDERTRACK_API_URL",
            format!("expected an http(s) URL, got '{api_base_url}'"),
        ));
    }

    let log_level = or_default("ORDERTRACK_LOG_LEVEL", "info");
    let user_agent = or_default("ORDERTRACK_USER_AGENT", DEFAULT_USER_AGENT);

    let credentials = match or_default("ORDERTRACK_CREDENTIALS", "omit").as_str() {
        "omit" => CredentialPolicy::Omit,
        "forward" => CredentialPolicy::Forward {
            csrf_cookie: or_default("ORDERTRACK_CSRF_COOKIE", "csrftoken"),
            csrf_header: or_default("ORDERTRACK_CSRF_HEADER", "X-CSRFToken"),
        },
        other => {
            return Err(invalid(
                "ORDERTRACK_CREDENTIALS",
                format!("expected 'omit' or 'forward', got '{other}'"),
            ))
        }
    };

    let fallback_error = or_default("ORDERTRACK_FALLBACK_ERROR", DEFAULT_FALLBACK_ERROR);

    let raw_offset = or_default("ORDERTRACK_DISPLAY_OFFSET", "+00:00");
    let display_offset = parse_utc_offset(&raw_offset).ok_or_else(|| {
        invalid(
            "ORDERTRACK_DISPLAY_OFFSET",
            format!("expected '+HH:MM' or '-HH:MM', got '{raw_offset}'"),
        )
    })?;

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        user_agent,
        credentials,
        fallback_error,
        display_offset,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ORDERTRACK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parse `Z`, `+HH:MM` or `-HH:MM` into a fixed offset.
fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
