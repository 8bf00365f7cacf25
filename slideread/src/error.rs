//! Error types for the conversion pipeline and the audio library.

use speech_client::SpeechError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single document conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("No text found in {}", .0.display())]
    NoExtractableText(PathBuf),

    #[error("Failed to read document: {0}")]
    Document(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] SpeechError),

    #[error("Audio assembly failed: {0}")]
    Assembly(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of library store operations.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("No such audio file: {0}")]
    NotFound(String),

    #[error("Invalid audio file name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
