//! Human escalation contacts, loaded from environment variables.

/// Where users are sent when the assistant cannot help.
///
/// Static configuration: the session never computes these addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscalationConfig {
    pub email: String,
    pub email_subject: String,
    pub chat_url: String,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            email: "hr@company.com".into(),
            email_subject: "Policy Assistance".into(),
            chat_url: "https://teams.microsoft.com/l/chat/0/0?users=hr@company.com".into(),
        }
    }
}

impl EscalationConfig {
    /// Build from environment variables with defaults.
    ///
    /// - `ESCALATION_EMAIL`
    /// - `ESCALATION_EMAIL_SUBJECT`
    /// - `ESCALATION_CHAT_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`EscalationConfig::from_env`], reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let dflt = Self::default();
        Self {
            email: env(&lookup, "ESCALATION_EMAIL", dflt.email),
            email_subject: env(&lookup, "ESCALATION_EMAIL_SUBJECT", dflt.email_subject),
            chat_url: env(&lookup, "ESCALATION_CHAT_URL", dflt.chat_url),
        }
    }

    /// `mailto:` link with the subject percent-encoded.
    ///
    /// ```
    /// # use ask_session::escalation::EscalationConfig;
    /// let cfg = EscalationConfig::default();
    /// assert_eq!(cfg.mailto_link(), "mailto:hr@company.com?subject=Policy%20Assistance");
    /// ```
    pub fn mailto_link(&self) -> String {
        format!(
            "mailto:{}?subject={}",
            self.email,
            urlencoding::encode(&self.email_subject)
        )
    }
}

fn env<F>(lookup: &F, k: &str, dflt: String) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(k)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults() {
        let cfg = EscalationConfig::from_lookup(|k| match k {
            "ESCALATION_EMAIL" => Some("people-ops@corp.example".into()),
            "ESCALATION_EMAIL_SUBJECT" => Some("Leave & travel".into()),
            _ => None,
        });
        assert_eq!(cfg.email, "people-ops@corp.example");
        assert_eq!(cfg.chat_url, EscalationConfig::default().chat_url);
        assert_eq!(
            cfg.mailto_link(),
            "mailto:people-ops@corp.example?subject=Leave%20%26%20travel"
        );
    }
}
