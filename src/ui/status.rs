//! Status line values.

use crate::config::MIN_CONTENT_CHARS;

/// The single status shown to the user. Every action overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiStatus {
    #[default]
    Ready,
    Analyzing,
    ReadingFile,
    Done,
    FreeLimitReached,
    ContentTooShort,
    /// Non-2xx (other than 402) status from the backend.
    ServerError(u16),
    NetworkError,
    /// Anything else that stopped an analysis, with a message.
    Failed(String),
    FileLoaded {
        name: String,
        chars: usize,
    },
    FileUnsupported(String),
    FileUnreadable(String),
    FileFailed(String),
    Copied,
    CopyFailed,
}

impl UiStatus {
    /// Text for the status line.
    pub fn message(&self) -> String {
        match self {
            Self::Ready => "Ready".to_string(),
            Self::Analyzing => "Analyzing...".to_string(),
            Self::ReadingFile => "Reading file...".to_string(),
            Self::Done => "Done".to_string(),
            Self::FreeLimitReached => "Free limit reached".to_string(),
            Self::ContentTooShort => {
                format!("Please paste at least {} characters.", MIN_CONTENT_CHARS)
            }
            Self::ServerError(status) => format!("Error: {}", status),
            Self::NetworkError => "Network error. Check backend is live.".to_string(),
            Self::Failed(msg) => format!("Error: {}", msg),
            Self::FileLoaded { name, chars } => {
                format!("Loaded {} ({} characters)", name, chars)
            }
            Self::FileUnsupported(name) => {
                format!("Unsupported file type: {}. Use .txt, .docx or .pdf", name)
            }
            Self::FileUnreadable(name) => format!(
                "No readable text extracted from {} (scanned or image-only?)",
                name
            ),
            Self::FileFailed(msg) => format!("Could not read file: {}", msg),
            Self::Copied => "Copied reply".to_string(),
            Self::CopyFailed => {
                "Copy failed (no clipboard available). Select the text and copy manually."
                    .to_string()
            }
        }
    }

    /// An operation is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Analyzing | Self::ReadingFile)
    }

    /// The status reports a problem.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::ContentTooShort
                | Self::ServerError(_)
                | Self::NetworkError
                | Self::Failed(_)
                | Self::FileUnsupported(_)
                | Self::FileUnreadable(_)
                | Self::FileFailed(_)
                | Self::CopyFailed
        )
    }
}

impl std::fmt::Display for UiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
