//! DOCX text extraction.
//!
//! A DOCX file is a zip container; the body lives in `word/document.xml`.
//! Only the text runs are kept, one output paragraph per `w:p`.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>|</w:p>|<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab\s*/>|<w:(?:br|cr)(?:\s[^>]*)?/>",
        )
        .expect("static regex")
    })
}

fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("static regex"))
}

/// Extract plain text from DOCX bytes.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    Ok(document_xml_to_text(&xml))
}

/// Flatten WordprocessingML to paragraphs separated by blank lines.
pub fn document_xml_to_text(xml: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    for caps in token_regex().captures_iter(xml) {
        let token = caps.get(0).map(|m| m.as_str()).unwrap_or_default();

        if let Some(run) = caps.get(1) {
            current.push_str(&decode_entities(run.as_str()));
        } else if token.starts_with("<w:tab") {
            current.push('\t');
        } else if token.starts_with("<w:br") || token.starts_with("<w:cr") {
            current.push('\n');
        } else {
            // Paragraph boundary (open, close or empty)
            flush(&mut paragraphs, &mut current);
        }
    }
    flush(&mut paragraphs, &mut current);

    paragraphs.join("\n\n")
}

fn flush(paragraphs: &mut Vec<String>, current: &mut String) {
    let text = std::mem::take(current);
    if !text.trim().is_empty() {
        paragraphs.push(text.trim_end().to_string());
    }
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    entity_regex()
        .replace_all(s, |caps: &regex::Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if name.starts_with("#x") => u32::from_str_radix(&name[2..], 16)
                    .ok()
                    .and_then(char::from_u32),
                _ => name[1..].parse().ok().and_then(char::from_u32),
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
