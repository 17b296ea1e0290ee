//! Clipboard effect used by the "copy answer" action.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::ClipboardError;

/// Destination for copied answer text.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard reached through the platform's command-line tools.
///
/// Tries each tool in order and uses the first one that is installed:
/// `wl-copy`, `xclip`, `xsel`, `pbcopy`, `clip.exe`.
pub struct SystemClipboard {
    tools: &'static [ClipboardTool],
}

type ClipboardTool = (&'static str, &'static [&'static str]);

const SYSTEM_TOOLS: &[ClipboardTool] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

impl Default for SystemClipboard {
    fn default() -> Self {
        Self {
            tools: SYSTEM_TOOLS,
        }
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        for (tool, args) in self.tools {
            let mut child = match Command::new(tool)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => child,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes())?;
            }
            let status = child.wait()?;
            if !status.success() {
                return Err(ClipboardError::ToolFailed {
                    tool: tool.to_string(),
                    status: status.to_string(),
                });
            }
            debug!(tool, bytes = text.len(), "copied to clipboard");
            return Ok(());
        }

        let tried: Vec<&str> = self.tools.iter().map(|(t, _)| *t).collect();
        Err(ClipboardError::Unavailable(tried.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tools_report_unavailable() {
        const MISSING: &[ClipboardTool] = &[("definitely-not-a-clipboard-tool-1", &[])];
        let cb = SystemClipboard { tools: MISSING };
        match cb.copy("text") {
            Err(ClipboardError::Unavailable(tried)) => {
                assert_eq!(tried, "definitely-not-a-clipboard-tool-1")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
