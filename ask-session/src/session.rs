//! The ask lifecycle: `Idle → Loading → Resolved | Failed`.
//!
//! [`AskSession`] is the pure state machine. [`SessionController`] drives it
//! against an [`AnswerBackend`]: every accepted ask spawns exactly one
//! service call whose [`Completion`] comes back over a channel and is applied
//! by the owner's event loop, one event at a time.
//!
//! Each ask gets a fresh request id. A completion is applied only if its id
//! is still the outstanding one, so a response that arrives after `clear`
//! (or after a newer ask) is dropped instead of overwriting the session.

use std::sync::Arc;

use answer_client::{Answer, AnswerBackend};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Monotonically increasing identity of one ask.
pub type RequestId = u64;

/// Where the session is in the ask lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AskStatus {
    #[default]
    Idle,
    Loading,
    Resolved(Answer),
    Failed(String),
}

/// An accepted ask that still needs to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAsk {
    pub id: RequestId,
    pub question: String,
}

/// Outcome of one service call, tagged with the ask that started it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub id: RequestId,
    /// The answer, or the message to show in the error banner.
    pub outcome: Result<Answer, String>,
}

/// Client-side state of one question/answer interaction.
#[derive(Debug, Default)]
pub struct AskSession {
    question: String,
    status: AskStatus,
    outstanding: Option<RequestId>,
    last_id: RequestId,
}

impl AskSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn status(&self) -> &AskStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, AskStatus::Loading)
    }

    /// Id of the in-flight ask, if any.
    pub fn outstanding(&self) -> Option<RequestId> {
        self.outstanding
    }

    /// Whether an ask would be accepted right now.
    pub fn can_ask(&self) -> bool {
        !self.is_loading() && !self.question.trim().is_empty()
    }

    /// Replaces the question text. Allowed in every state, including `Loading`.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.question = text.into();
    }

    /// Accepts an ask and moves to `Loading`.
    ///
    /// Returns `None` (and changes nothing) while a call is in flight or the
    /// question is blank.
    pub fn begin_ask(&mut self) -> Option<PendingAsk> {
        if !self.can_ask() {
            return None;
        }
        self.last_id += 1;
        self.outstanding = Some(self.last_id);
        self.status = AskStatus::Loading;
        Some(PendingAsk {
            id: self.last_id,
            question: self.question.clone(),
        })
    }

    /// Applies a service outcome.
    ///
    /// Returns `false` when the completion does not belong to the outstanding
    /// ask; the session is left untouched in that case.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if self.outstanding != Some(completion.id) {
            return false;
        }
        self.outstanding = None;
        self.status = match completion.outcome {
            Ok(answer) => AskStatus::Resolved(answer),
            Err(message) => AskStatus::Failed(message),
        };
        true
    }

    /// Back to `Idle` with an empty question, from any state.
    ///
    /// An in-flight ask is not cancelled; its completion will be ignored.
    pub fn clear(&mut self) {
        self.question.clear();
        self.status = AskStatus::Idle;
        self.outstanding = None;
    }
}

/// Owns an [`AskSession`] and performs the service calls it requests.
pub struct SessionController {
    session: AskSession,
    backend: Arc<dyn AnswerBackend>,
    top_k: u32,
    completions: mpsc::UnboundedSender<Completion>,
}

impl SessionController {
    /// Creates the controller and the receiver its completions arrive on.
    ///
    /// The caller's event loop must feed every received [`Completion`] back
    /// through [`SessionController::apply`].
    pub fn new(
        backend: Arc<dyn AnswerBackend>,
        top_k: u32,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            session: AskSession::new(),
            backend,
            top_k,
            completions: tx,
        };
        (controller, rx)
    }

    pub fn session(&self) -> &AskSession {
        &self.session
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.session.edit(text);
    }

    /// Starts an ask if the session accepts one.
    ///
    /// Returns the id of the spawned request, or `None` when the ask was a
    /// no-op (blank question or already loading). Must be called inside a
    /// Tokio runtime.
    pub fn ask(&mut self) -> Option<RequestId> {
        let pending = self.session.begin_ask()?;
        let id = pending.id;
        let backend = Arc::clone(&self.backend);
        let tx = self.completions.clone();
        let top_k = self.top_k;

        info!(request_id = id, top_k, "submitting question");
        tokio::spawn(async move {
            let outcome = backend
                .submit(&pending.question, top_k)
                .await
                .map_err(|e| {
                    warn!(request_id = pending.id, error = %e, "question failed");
                    e.user_message()
                });
            if tx
                .send(Completion {
                    id: pending.id,
                    outcome,
                })
                .is_err()
            {
                debug!(request_id = pending.id, "completion dropped: session closed");
            }
        });
        Some(id)
    }

    /// Feeds a completion into the session. Returns `true` if it was applied.
    pub fn apply(&mut self, completion: Completion) -> bool {
        let id = completion.id;
        let applied = self.session.complete(completion);
        if applied {
            debug!(request_id = id, status = ?status_name(self.session.status()), "completion applied");
        } else {
            debug!(request_id = id, outstanding = ?self.session.outstanding(), "stale completion ignored");
        }
        applied
    }

    pub fn clear(&mut self) {
        if let Some(id) = self.session.outstanding() {
            debug!(request_id = id, "clearing session with request in flight");
        }
        self.session.clear();
    }
}

fn status_name(status: &AskStatus) -> &'static str {
    match status {
        AskStatus::Idle => "idle",
        AskStatus::Loading => "loading",
        AskStatus::Resolved(_) => "resolved",
        AskStatus::Failed(_) => "failed",
    }
}
