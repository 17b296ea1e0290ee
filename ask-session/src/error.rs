//! Typed errors for the ask-session crate.
//!
//! The state machine itself never fails; these cover the side-effecting
//! actions offered next to it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    /// None of the known clipboard tools could be started.
    #[error("clipboard unavailable: none of [{0}] is installed")]
    Unavailable(String),

    /// The tool started but exited unsuccessfully.
    #[error("clipboard tool `{tool}` failed: {status}")]
    ToolFailed { tool: String, status: String },

    /// Writing to the tool's stdin failed.
    #[error("clipboard IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ActionError {
    /// Copy was requested while no answer text is shown.
    #[error("nothing to copy: no answer is shown")]
    NothingToCopy,

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}
