//! Unified error handling for `answer-client`.
//!
//! This module exposes a single top-level error type [`AnswerError`] for the
//! whole library, and groups domain-specific errors in nested types
//! ([`ConfigError`], [`ServiceError`]). Small helpers for reading/validating
//! environment variables are provided and return the unified [`Result<T>`].
//!
//! Log-facing messages include the tag `[Answer Client]`; the text shown to a
//! user comes from [`AnswerError::user_message`] and carries no tag.

use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AnswerError>;

/// Message used when the service fails without a usable `detail` field.
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `answer-client` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AnswerError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The service answered with a non-success HTTP status.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Underlying HTTP transport error (connection refused, reset, ...).
    #[error("[Answer Client] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// A success response whose body could not be decoded.
    #[error("[Answer Client] decode error: {0}")]
    Decode(String),
}

impl AnswerError {
    /// Message suitable for an error banner.
    ///
    /// Service failures yield the server's `detail` verbatim (or
    /// [`GENERIC_SERVER_ERROR`]); every other failure yields the message of
    /// the underlying error.
    pub fn user_message(&self) -> String {
        match self {
            AnswerError::Service(e) => e.user_message().to_string(),
            AnswerError::HttpTransport(e) => e.to_string(),
            AnswerError::Decode(msg) => msg.clone(),
            AnswerError::Config(e) => e.to_string(),
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Service errors                                                            */
/* ------------------------------------------------------------------------- */

/// Non-successful HTTP status returned by the answering service.
#[derive(Debug, Clone, Error)]
#[error("[Answer Client] HTTP {status} from {url}: {}", .detail.as_deref().unwrap_or(GENERIC_SERVER_ERROR))]
pub struct ServiceError {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Request URL.
    pub url: String,
    /// `detail` field of the JSON body, when the body carried one.
    pub detail: Option<String>,
}

impl ServiceError {
    /// Builds the error from a raw failure body.
    ///
    /// `{"detail": "X"}` yields `Some("X")`. A non-string `detail` (e.g. a
    /// validation error list) is kept as its JSON text. A missing, null or
    /// empty `detail`, or a body that is not JSON at all, yields `None`.
    pub fn from_body(status: u16, url: impl Into<String>, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").cloned())
            .and_then(|d| match d {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) if s.is_empty() => None,
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            });

        Self {
            status,
            url: url.into(),
            detail,
        }
    }

    /// The server-provided detail, or the generic fallback.
    pub fn user_message(&self) -> &str {
        self.detail.as_deref().unwrap_or(GENERIC_SERVER_ERROR)
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (like `top_k` or timeouts).
    #[error("[Answer Client] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `POLICY_TOP_K`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Answer Client] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `POLICY_API_BASE`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[Answer Client] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `top_k`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Reads an optional, non-empty variable through `lookup`.
pub fn env_opt<F>(lookup: &F, name: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional `u32` (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u32`.
pub fn env_opt_u32<F>(lookup: &F, name: &'static str) -> Result<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    match env_opt(lookup, name) {
        Some(v) => v.parse::<u32>().map(Some).map_err(|_| {
            AnswerError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        None => Ok(None),
    }
}

/// Parses an optional `u64` (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u64`.
pub fn env_opt_u64<F>(lookup: &F, name: &'static str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match env_opt(lookup, name) {
        Some(v) => v.parse::<u64>().map(Some).map_err(|_| {
            AnswerError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start
/// with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Short, single-line excerpt of a response body for logs.
pub fn make_snippet(text: &str) -> String {
    text.chars()
        .take(240)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
