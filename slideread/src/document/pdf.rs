//! PDF text extraction.

use super::TextSource;
use crate::error::ConvertError;
use std::path::PathBuf;

/// Text source for flowed-page PDF documents.
pub struct PdfSource {
    path: PathBuf,
}

impl PdfSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for PdfSource {
    fn extract(&self) -> Result<String, ConvertError> {
        let doc = lopdf::Document::load(&self.path)
            .map_err(|e| ConvertError::Document(format!("{}: {}", self.path.display(), e)))?;

        let mut pages = Vec::new();
        for (number, _object_id) in doc.get_pages() {
            // A page without extractable text (e.g. image-only) contributes
            // nothing, and a failed page never aborts the rest.
            match doc.extract_text(&[number]) {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        pages.push(text.to_string());
                    }
                }
                Err(e) => log::debug!("page {}: no text extracted: {}", number, e),
            }
        }

        Ok(pages.join("\n"))
    }
}
