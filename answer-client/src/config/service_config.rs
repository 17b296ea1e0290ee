/// Connection settings for the answering service.
///
/// Resolved once at startup (see [`crate::config::default_config`]) and
/// then treated as read-only.
///
/// # Fields
///
/// - `base_url`: Service root, e.g. `http://127.0.0.1:8000` (no trailing slash needed).
/// - `api_key`: Optional key sent as `X-API-Key` on every request.
/// - `top_k`: How many supporting citations the service may return per answer.
/// - `timeout_secs`: Optional per-request timeout for `/ask`; `None` waits indefinitely.
/// - `health_timeout_secs`: Timeout used by the health probe.
///
/// # Examples
///
/// ```
/// use answer_client::config::service_config::AnswerServiceConfig;
///
/// let cfg = AnswerServiceConfig {
///     base_url: "http://127.0.0.1:8000".to_string(),
///     api_key: None,
///     top_k: 5,
///     timeout_secs: None,
///     health_timeout_secs: Some(10),
/// };
/// assert_eq!(cfg.url("/ask"), "http://127.0.0.1:8000/ask");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerServiceConfig {
    /// Service root URL.
    pub base_url: String,

    /// Optional API key for the `X-API-Key` header.
    pub api_key: Option<String>,

    /// Upper bound on returned citations.
    pub top_k: u32,

    /// Optional request timeout (in seconds) for question submission.
    pub timeout_secs: Option<u64>,

    /// Optional timeout (in seconds) for the health probe.
    pub health_timeout_secs: Option<u64>,
}

impl AnswerServiceConfig {
    /// Joins `path` onto the base URL, tolerating a trailing slash on the base.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
