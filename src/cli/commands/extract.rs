//! Document text extraction command.

use std::path::Path;

use trustfilter::extract::DocumentLoader;

use super::helpers::spinner;
use crate::cli::icons;

/// Print the text a document would contribute, without contacting the backend.
pub async fn cmd_extract(file: &Path) -> anyhow::Result<i32> {
    let pb = spinner(&format!("Reading {}...", file.display()));
    let result = DocumentLoader::new().extract_text(file).await;
    pb.finish_and_clear();

    match result {
        Ok(doc) => {
            let pages = doc
                .page_count
                .map(|n| format!(", {} pages", n))
                .unwrap_or_default();
            eprintln!(
                "{} {} ({}, {} characters{})",
                icons::success(),
                doc.name,
                doc.kind.as_str(),
                doc.text.chars().count(),
                pages
            );
            println!("{}", doc.text);
            Ok(0)
        }
        Err(e) => {
            eprintln!("{} {}", icons::error(), e);
            Ok(1)
        }
    }
}
