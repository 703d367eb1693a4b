//! Best-effort clipboard access through platform copy tools.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("No clipboard tool found (tried pbcopy, wl-copy, xclip, xsel, clip.exe)")]
    Unavailable,

    #[error("{tool} failed: {message}")]
    Failed { tool: String, message: String },
}

/// Something that can take text.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copy tools in order of preference, with the arguments that make them read
/// stdin into the clipboard.
const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// Clipboard backed by the first copy tool found on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard {
    tool: Option<(PathBuf, &'static [&'static str])>,
}

impl SystemClipboard {
    pub fn detect() -> Self {
        let tool = TOOLS.iter().find_map(|(name, args)| {
            which::which(name).ok().map(|path| {
                debug!("Using {} for clipboard", path.display());
                (path, *args)
            })
        });
        Self { tool }
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let (path, args) = self.tool.as_ref().ok_or(ClipboardError::Unavailable)?;
        let tool = path.display().to_string();
        let failed = |message: String| ClipboardError::Failed {
            tool: tool.clone(),
            message,
        };

        // xclip and xsel fork a child that keeps serving the selection; it must
        // not inherit any pipe we read from, and only the direct child is awaited
        let mut child = Command::new(path)
            .args(args.iter())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| failed(e.to_string()))?;
        }

        let status = child.wait().map_err(|e| failed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("exited with {}", status)))
        }
    }
}
