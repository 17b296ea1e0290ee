//! What the user sees for a given session state.
//!
//! [`present`] is a pure function from [`AskSession`] to a [`View`];
//! frontends only decide how to draw the panels it turns on.
//!
//! Escalation policy: every resolved answer carries exactly one escalation
//! panel. When the service found no answer it takes the answer's place
//! ([`EscalationReason::NoAnswerFound`]); otherwise it follows the
//! citations as a standing human fallback ([`EscalationReason::HumanFallback`]).

use answer_client::{Answer, Citation};

use crate::{
    clipboard::Clipboard,
    error::ActionError,
    escalation::EscalationConfig,
    session::{AskSession, AskStatus},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub loading: bool,
    /// Error banner text.
    pub error: Option<String>,
    /// Answer text, verbatim.
    pub answer: Option<String>,
    pub citations: Option<CitationsPanel>,
    pub escalation: Option<EscalationPanel>,
    /// Whether the "copy answer" action is enabled.
    pub copy_enabled: bool,
}

/// Ranked citations plus the confidence/disclaimer footer.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationsPanel {
    pub items: Vec<Citation>,
    pub confidence: Option<String>,
    pub disclaimer: Option<String>,
    pub policy_matches: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationReason {
    /// Shown in place of the answer.
    NoAnswerFound,
    /// Shown after a real answer.
    HumanFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPanel {
    pub reason: EscalationReason,
    pub email_link: String,
    pub chat_link: String,
}

/// Maps the session to its view.
pub fn present(session: &AskSession, escalation: &EscalationConfig) -> View {
    match session.status() {
        AskStatus::Idle => View::default(),
        AskStatus::Loading => View {
            loading: true,
            ..View::default()
        },
        AskStatus::Failed(message) => View {
            error: Some(message.clone()),
            ..View::default()
        },
        AskStatus::Resolved(answer) => resolved(answer, escalation),
    }
}

fn resolved(answer: &Answer, escalation: &EscalationConfig) -> View {
    let panel = CitationsPanel {
        items: answer.citations().to_vec(),
        confidence: answer.confidence.as_ref().map(ToString::to_string),
        disclaimer: answer.disclaimer().map(str::to_string),
        policy_matches: answer.policy_matches().to_vec(),
    };

    match answer.text() {
        Some(text) => View {
            answer: Some(text.to_string()),
            citations: Some(panel),
            escalation: Some(escalation_panel(EscalationReason::HumanFallback, escalation)),
            copy_enabled: true,
            ..View::default()
        },
        None => {
            let has_content = !panel.items.is_empty()
                || panel.confidence.is_some()
                || panel.disclaimer.is_some()
                || !panel.policy_matches.is_empty();
            View {
                citations: has_content.then_some(panel),
                escalation: Some(escalation_panel(EscalationReason::NoAnswerFound, escalation)),
                ..View::default()
            }
        }
    }
}

fn escalation_panel(reason: EscalationReason, cfg: &EscalationConfig) -> EscalationPanel {
    EscalationPanel {
        reason,
        email_link: cfg.mailto_link(),
        chat_link: cfg.chat_url.clone(),
    }
}

/// Copies the shown answer text to `clipboard`.
///
/// One-shot effect; the session is not modified. Returns the number of
/// characters copied.
///
/// # Errors
/// - [`ActionError::NothingToCopy`] unless the session is resolved with answer text
/// - [`ActionError::Clipboard`] if the clipboard rejects the text
pub fn copy_answer(session: &AskSession, clipboard: &dyn Clipboard) -> Result<usize, ActionError> {
    let text = match session.status() {
        AskStatus::Resolved(answer) => answer.text().ok_or(ActionError::NothingToCopy)?,
        _ => return Err(ActionError::NothingToCopy),
    };
    clipboard.copy(text)?;
    Ok(text.chars().count())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use answer_client::Confidence;

    use super::*;
    use crate::error::ClipboardError;
    use crate::session::Completion;

    #[derive(Default)]
    struct MemoryClipboard {
        copied: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn copy(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("memory".into()));
            }
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn resolve(answer: Answer) -> AskSession {
        let mut s = AskSession::new();
        s.edit("How many casual leaves do I get per year");
        let pending = s.begin_ask().unwrap();
        assert!(s.complete(Completion {
            id: pending.id,
            outcome: Ok(answer),
        }));
        s
    }

    fn leave_answer() -> Answer {
        Answer {
            answer: Some("12 per calendar year".into()),
            citations: Some(vec![Citation {
                doc_id: "HR-04".into(),
                snippet: "Employees accrue 12 casual leave days...".into(),
                section: None,
                page: None,
            }]),
            confidence: Some(Confidence::Score(0.91)),
            disclaimer: Some("Consult HR for exceptions.".into()),
            ..Answer::default()
        }
    }

    #[test]
    fn idle_and_loading_views() {
        let cfg = EscalationConfig::default();
        let mut s = AskSession::new();
        assert_eq!(present(&s, &cfg), View::default());

        s.edit("q");
        s.begin_ask().unwrap();
        let view = present(&s, &cfg);
        assert!(view.loading);
        assert_eq!(view.answer, None);
        assert_eq!(view.citations, None);
        assert_eq!(view.escalation, None);
        assert!(!view.copy_enabled);
    }

    #[test]
    fn failure_shows_only_the_banner() {
        let mut s = AskSession::new();
        s.edit("q");
        let p = s.begin_ask().unwrap();
        s.complete(Completion {
            id: p.id,
            outcome: Err("index unavailable".into()),
        });
        let view = present(&s, &EscalationConfig::default());
        assert_eq!(
            view,
            View {
                error: Some("index unavailable".into()),
                ..View::default()
            }
        );
    }

    #[test]
    fn answer_is_shown_verbatim_with_citations_and_fallback() {
        let view = present(&resolve(leave_answer()), &EscalationConfig::default());

        assert_eq!(view.answer.as_deref(), Some("12 per calendar year"));
        let panel = view.citations.unwrap();
        assert_eq!(panel.items.len(), 1);
        assert_eq!(panel.items[0].doc_id, "HR-04");
        assert_eq!(panel.confidence.as_deref(), Some("0.91"));
        assert_eq!(panel.disclaimer.as_deref(), Some("Consult HR for exceptions."));
        assert_eq!(
            view.escalation.map(|e| e.reason),
            Some(EscalationReason::HumanFallback)
        );
        assert!(view.copy_enabled);
        assert_eq!(view.error, None);
    }

    #[test]
    fn whitespace_and_order_are_preserved() {
        let mut a = leave_answer();
        a.answer = Some("  Line one\n\n  - item  ".into());
        a.citations = Some(
            ["C-3", "A-1", "B-2"]
                .iter()
                .map(|id| Citation {
                    doc_id: id.to_string(),
                    snippet: format!("snippet {id}"),
                    section: None,
                    page: None,
                })
                .collect(),
        );
        let view = present(&resolve(a), &EscalationConfig::default());
        assert_eq!(view.answer.as_deref(), Some("  Line one\n\n  - item  "));
        let ids: Vec<String> = view
            .citations
            .unwrap()
            .items
            .into_iter()
            .map(|c| c.doc_id)
            .collect();
        assert_eq!(ids, ["C-3", "A-1", "B-2"]);
    }

    #[test]
    fn empty_answer_escalates_in_place_of_text() {
        let empty = Answer {
            answer: Some(String::new()),
            citations: Some(vec![]),
            confidence: Some(Confidence::Score(0.0)),
            disclaimer: Some(String::new()),
            ..Answer::default()
        };
        let view = present(&resolve(empty), &EscalationConfig::default());

        assert_eq!(view.answer, None);
        assert!(!view.copy_enabled);
        let esc = view.escalation.unwrap();
        assert_eq!(esc.reason, EscalationReason::NoAnswerFound);
        assert_eq!(esc.email_link, "mailto:hr@company.com?subject=Policy%20Assistance");
        assert_eq!(
            esc.chat_link,
            "https://teams.microsoft.com/l/chat/0/0?users=hr@company.com"
        );
        let footer = view.citations.unwrap();
        assert!(footer.items.is_empty());
        assert_eq!(footer.confidence.as_deref(), Some("0"));
    }

    #[test]
    fn empty_answer_escalates_regardless_of_citations() {
        let mut a = leave_answer();
        a.answer = None;
        let view = present(&resolve(a), &EscalationConfig::default());
        assert_eq!(view.answer, None);
        assert_eq!(
            view.escalation.map(|e| e.reason),
            Some(EscalationReason::NoAnswerFound)
        );
        assert_eq!(view.citations.unwrap().items[0].doc_id, "HR-04");

        let bare = Answer::default();
        let view = present(&resolve(bare), &EscalationConfig::default());
        assert_eq!(view.citations, None);
        assert!(view.escalation.is_some());
    }

    #[test]
    fn copy_is_only_enabled_for_answer_text() {
        let cb = MemoryClipboard::default();
        assert!(matches!(
            copy_answer(&AskSession::new(), &cb),
            Err(ActionError::NothingToCopy)
        ));

        let mut no_answer = leave_answer();
        no_answer.answer = Some(String::new());
        assert!(matches!(
            copy_answer(&resolve(no_answer), &cb),
            Err(ActionError::NothingToCopy)
        ));

        let session = resolve(leave_answer());
        assert_eq!(copy_answer(&session, &cb).unwrap(), 20);
        assert_eq!(cb.copied.lock().unwrap().as_slice(), ["12 per calendar year"]);
        assert!(matches!(session.status(), AskStatus::Resolved(_)));
    }

    #[test]
    fn clipboard_failure_is_reported() {
        let cb = MemoryClipboard {
            fail: true,
            ..MemoryClipboard::default()
        };
        assert!(matches!(
            copy_answer(&resolve(leave_answer()), &cb),
            Err(ActionError::Clipboard(_))
        ));
    }
}
