use answer_client::AnswerError;
use thiserror::Error;

/// Fatal console errors.
///
/// Everything a user can trigger from the prompt (failed asks, clipboard
/// problems, bad commands) is reported inline and never surfaces here.
#[derive(Debug, Error)]
pub enum ConsoleError {
    // --- Boot / config ---
    #[error(transparent)]
    Answer(#[from] AnswerError),

    // --- Terminal IO ---
    #[error("[Console] failed to read input")]
    Input(#[source] std::io::Error),

    #[error("[Console] failed to write output")]
    Output(#[source] std::io::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Prompt-level problems with what the user typed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `:{0}` (try :help)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}
