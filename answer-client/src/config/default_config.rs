//! Default service config loaded from environment variables.
//!
//! Every variable is optional; unset values fall back to local-development
//! defaults so the client works against a backend started on the same host.
//!
//! # Environment variables
//!
//! - `POLICY_API_BASE`            = service root URL (default `http://127.0.0.1:8000`)
//! - `POLICY_API_KEY`             = optional `X-API-Key` value
//! - `POLICY_TOP_K`               = citations per answer (default `5`, `1..=50`)
//! - `POLICY_API_TIMEOUT_SECS`    = optional `/ask` timeout (default: none)
//! - `POLICY_HEALTH_TIMEOUT_SECS` = health probe timeout (default `10`)

use crate::{
    config::service_config::AnswerServiceConfig,
    error_handler::{
        ConfigError, Result, env_opt, env_opt_u32, env_opt_u64, validate_http_endpoint,
    },
};

/// Base URL used when `POLICY_API_BASE` is not set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Number of citations requested when `POLICY_TOP_K` is not set.
pub const DEFAULT_TOP_K: u32 = 5;

/// Health probe timeout used when `POLICY_HEALTH_TIMEOUT_SECS` is not set.
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 10;

const MAX_TOP_K: u32 = 50;

/// Builds the config from the process environment.
///
/// # Errors
/// - [`ConfigError::InvalidFormat`] if `POLICY_API_BASE` is not an http(s) URL
/// - [`ConfigError::InvalidNumber`] if a numeric variable does not parse
/// - [`ConfigError::OutOfRange`] if `POLICY_TOP_K` is `0` or above the limit
pub fn config_from_env() -> Result<AnswerServiceConfig> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Same as [`config_from_env`], but reads variables through `lookup`.
pub fn config_from_lookup<F>(lookup: F) -> Result<AnswerServiceConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = env_opt(&lookup, "POLICY_API_BASE").unwrap_or_else(|| DEFAULT_BASE_URL.into());
    validate_http_endpoint("POLICY_API_BASE", &base_url)?;

    let top_k = env_opt_u32(&lookup, "POLICY_TOP_K")?.unwrap_or(DEFAULT_TOP_K);
    if top_k == 0 || top_k > MAX_TOP_K {
        return Err(ConfigError::OutOfRange {
            field: "top_k",
            detail: "expected 1..=50",
        }
        .into());
    }

    Ok(AnswerServiceConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        api_key: env_opt(&lookup, "POLICY_API_KEY"),
        top_k,
        timeout_secs: env_opt_u64(&lookup, "POLICY_API_TIMEOUT_SECS")?,
        health_timeout_secs: Some(
            env_opt_u64(&lookup, "POLICY_HEALTH_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_HEALTH_TIMEOUT_SECS),
        ),
    })
}
