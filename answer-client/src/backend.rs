//! Answer backend abstraction.

use std::{future::Future, pin::Pin};

use crate::{error_handler::AnswerError, models::Answer};

/// Boxed future returned by [`AnswerBackend::submit`].
pub type SubmitFuture<'a> = Pin<Box<dyn Future<Output = Result<Answer, AnswerError>> + Send + 'a>>;

/// Provider interface for question answering.
///
/// [`crate::services::answer_service::AnswerService`] is the HTTP
/// implementation; tests plug in their own.
pub trait AnswerBackend: Send + Sync {
    /// Submits one question and resolves with the service's answer.
    ///
    /// Exactly one outbound request per call; no retry.
    fn submit<'a>(&'a self, question: &'a str, top_k: u32) -> SubmitFuture<'a>;
}
