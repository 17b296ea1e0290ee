use answer_client::{
    Result,
    config::{default_config::config_from_lookup, service_config::AnswerServiceConfig},
};
use ask_session::EscalationConfig;

/// Settings shared by the console loop.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    /// Answer service endpoint, credentials and `top_k`.
    pub answer: AnswerServiceConfig,
    /// Human fallback contacts shown next to answers.
    pub escalation: EscalationConfig,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            answer: config_from_lookup(&lookup)?,
            escalation: EscalationConfig::from_lookup(&lookup),
        })
    }
}
