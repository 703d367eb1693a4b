//! Text extraction from user-supplied documents.
//!
//! Dispatches on file extension:
//! - `.txt` is read as UTF-8 (lossy)
//! - `.docx` is unzipped and its main document part flattened to paragraphs
//! - `.pdf` is opened with lopdf and read page by page
//!
//! Anything else is rejected before the file is touched.

mod docx;
mod pdf;
mod text;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::MIN_CONTENT_CHARS;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("No readable text extracted from {0}")]
    NoReadableText(String),

    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Docx,
    Pdf,
}

impl DocumentKind {
    /// Determine the kind from a file name, ignoring extension case.
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(Self::Text),
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ExtractionError::UnsupportedType(display_name(path))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

/// Text pulled out of a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// File name as shown to the user.
    pub name: String,
    pub kind: DocumentKind,
    /// Trimmed plain text.
    pub text: String,
    /// Number of pages read (PDF only).
    pub page_count: Option<usize>,
}

/// Reads documents into plain text.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    min_chars: usize,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self {
            min_chars: MIN_CONTENT_CHARS,
        }
    }
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and extract a file.
    ///
    /// The file is read asynchronously; parsing runs on the blocking pool.
    pub async fn extract_text(&self, path: &Path) -> Result<ExtractedDocument, ExtractionError> {
        let kind = DocumentKind::from_path(path)?;
        let name = display_name(path);
        debug!("Extracting {} as {}", path.display(), kind.as_str());

        let bytes = tokio::fs::read(path).await?;
        let (text, page_count) = tokio::task::spawn_blocking(move || extract_bytes(kind, &bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))??;

        let text = text.trim().to_string();
        if text.chars().count() < self.min_chars {
            return Err(ExtractionError::NoReadableText(name));
        }

        info!("Extracted {} chars from {}", text.chars().count(), name);
        Ok(ExtractedDocument {
            name,
            kind,
            text,
            page_count,
        })
    }
}

/// Extract raw text from in-memory bytes.
pub fn extract_bytes(
    kind: DocumentKind,
    bytes: &[u8],
) -> Result<(String, Option<usize>), ExtractionError> {
    match kind {
        DocumentKind::Text => Ok((text::extract_txt(bytes), None)),
        DocumentKind::Docx => Ok((docx::extract_docx(bytes)?, None)),
        DocumentKind::Pdf => {
            let pages = pdf::extract_pdf_pages(bytes)?;
            let count = pages.len();
            Ok((pdf::join_pages(&pages), Some(count)))
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
