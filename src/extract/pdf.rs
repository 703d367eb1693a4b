//! PDF text extraction with lopdf.
//!
//! Image-only PDFs produce no text here; there is no OCR fallback.

use lopdf::Document;
use tracing::debug;

use super::ExtractionError;

/// Extract the text of every page, in page order.
///
/// Each page's text items are joined with single spaces.
pub fn extract_pdf_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    // BTreeMap keyed by 1-based page number, so iteration is in page order
    let pages = doc.get_pages();
    debug!("PDF has {} pages", pages.len());

    let mut texts = Vec::with_capacity(pages.len());
    for page_num in pages.keys() {
        let raw = doc
            .extract_text(&[*page_num])
            .map_err(|e| ExtractionError::Pdf(format!("page {}: {}", page_num, e)))?;
        texts.push(normalize_page(&raw));
    }
    Ok(texts)
}

/// Join page texts with a blank line between pages.
pub fn join_pages(pages: &[String]) -> String {
    pages.join("\n\n").trim().to_string()
}

fn normalize_page(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
