//! Wire types for the answering service.
//!
//! Response types are lenient: every field the service may omit is optional,
//! and unknown fields are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for `POST /ask`.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
    pub top_k: u32,
}

/// A source document reference supporting an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Opaque identifier of the source document (e.g. `HR-04`).
    pub doc_id: String,
    /// Excerpt justifying the answer.
    #[serde(default)]
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Answer reliability as reported by the service.
///
/// Either a numeric score or a categorical label; the client never
/// interprets it beyond display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Score(f64),
    Label(String),
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Score(v) => write!(f, "{v}"),
            Confidence::Label(s) => f.write_str(s),
        }
    }
}

/// Response body of `POST /ask`.
///
/// An empty or missing `answer` means "no answer found"; it is a valid
/// result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub answer: Option<String>,
    /// Ranked citations, most relevant first. `None` when the field was absent.
    #[serde(default)]
    pub citations: Option<Vec<Citation>>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_matches: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Answer {
    /// The answer text, or `None` when the service found no answer.
    pub fn text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|s| !s.is_empty())
    }

    /// Citations in service order; empty when the field was absent.
    pub fn citations(&self) -> &[Citation] {
        self.citations.as_deref().unwrap_or_default()
    }

    /// Non-empty disclaimer, if any.
    pub fn disclaimer(&self) -> Option<&str> {
        self.disclaimer.as_deref().filter(|s| !s.is_empty())
    }

    /// Policy names the service matched, if it reported any.
    pub fn policy_matches(&self) -> &[String] {
        self.policy_matches.as_deref().unwrap_or_default()
    }

    /// Server-assigned answer id (`metadata.answer_id`), used for feedback.
    pub fn answer_id(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("answer_id"))
            .and_then(Value::as_str)
    }
}

/// Response body of `GET /docs`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocList {
    #[serde(default)]
    pub docs: Vec<String>,
}

/// Response body of `GET /docs/{doc_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentInfo {
    pub doc_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Request body for `POST /feedback`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub answer_id: String,
    pub helpful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
