//! Document text extraction.
//!
//! Each supported format implements [`TextSource`]; the format is chosen
//! once from the file extension, and new formats are added by implementing
//! the trait rather than by branching.

mod pdf;
mod pptx;

use crate::error::ConvertError;
use std::path::Path;

pub use pdf::PdfSource;
pub use pptx::SlideDeckSource;

#[cfg(test)]
pub(crate) use pptx::write_test_deck;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Flowed-page document (PDF)
    Pdf,
    /// Slide-deck document (PPTX)
    SlideDeck,
}

/// Detect the document format from the file extension.
pub fn detect_format(path: &Path) -> Result<DocumentFormat, ConvertError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => Ok(DocumentFormat::Pdf),
        "pptx" => Ok(DocumentFormat::SlideDeck),
        _ => Err(ConvertError::UnsupportedFormat(if ext.is_empty() {
            path.display().to_string()
        } else {
            format!(".{}", ext)
        })),
    }
}

/// A source of extractable document text.
pub trait TextSource {
    /// Concatenated text content, page/slide boundaries collapsed to
    /// newlines.
    fn extract(&self) -> Result<String, ConvertError>;
}

/// Select the extractor for a document path.
pub fn source_for(path: &Path) -> Result<Box<dyn TextSource>, ConvertError> {
    match detect_format(path)? {
        DocumentFormat::Pdf => Ok(Box::new(PdfSource::new(path))),
        DocumentFormat::SlideDeck => Ok(Box::new(SlideDeckSource::new(path))),
    }
}

/// Extract a document's text, failing when there is nothing to read aloud.
pub fn extract_document_text(path: &Path) -> Result<String, ConvertError> {
    let text = source_for(path)?.extract()?;
    if text.trim().is_empty() {
        return Err(ConvertError::NoExtractableText(path.to_path_buf()));
    }
    Ok(text)
}
