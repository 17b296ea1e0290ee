//! Client-side ask flow for the policy assistant.
//!
//! - [`session`]: the Idle/Loading/Resolved/Failed state machine and the
//!   controller that drives asks against an [`answer_client::AnswerBackend`].
//! - [`presentation`]: pure mapping from session state to a [`View`].
//! - [`escalation`]: static human contact points.
//! - [`clipboard`]: the "copy answer" effect.

pub mod clipboard;
pub mod error;
pub mod escalation;
pub mod presentation;
pub mod session;

pub use clipboard::{Clipboard, SystemClipboard};
pub use error::{ActionError, ClipboardError};
pub use escalation::EscalationConfig;
pub use presentation::{
    CitationsPanel, EscalationPanel, EscalationReason, View, copy_answer, present,
};
pub use session::{AskSession, AskStatus, Completion, PendingAsk, RequestId, SessionController};
