//! Document-to-audio conversion pipeline.
//!
//! One conversion runs extract → chunk → synthesize → assemble and either
//! returns the finished artifact path or a typed failure, leaving neither a
//! partial artifact nor per-chunk temp files behind.

use crate::audio;
use crate::document;
use crate::error::ConvertError;
use crate::text;
use speech_client::{SpeechModel, SpeechProvider, SpeechRequest, Voice};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Pipeline configuration, passed in explicitly at construction.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Directory receiving finished audio files
    pub library_root: PathBuf,
    /// Voice preset for synthesis
    pub voice: Voice,
    /// Model tier for synthesis
    pub model: SpeechModel,
    /// Maximum characters per synthesis request
    pub max_chunk_chars: usize,
}

pub struct Pipeline {
    provider: Arc<dyn SpeechProvider>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn SpeechProvider>, settings: PipelineSettings) -> Self {
        Self { provider, settings }
    }

    /// Convert a document into one audio file in the library directory.
    pub async fn convert(&self, document_path: &Path) -> Result<PathBuf, ConvertError> {
        self.convert_with_progress(document_path, None, |_, _| {})
            .await
    }

    /// Convert with an optional output stem and a per-chunk progress
    /// callback receiving (completed, total).
    pub async fn convert_with_progress(
        &self,
        document_path: &Path,
        output_stem: Option<&str>,
        progress: impl Fn(usize, usize),
    ) -> Result<PathBuf, ConvertError> {
        let extracted = document::extract_document_text(document_path)?;

        let chunks = text::chunk_document(&extracted, self.settings.max_chunk_chars);
        log::info!(
            "{}: {} characters, {} chunks",
            document_path.display(),
            extracted.len(),
            chunks.len()
        );

        let stem = match output_stem {
            Some(stem) => stem.to_string(),
            None => document_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "audio".to_string()),
        };

        std::fs::create_dir_all(&self.settings.library_root)?;
        let output_path = self.resolve_output_path(&stem);

        // Scoped work directory: every per-chunk artifact lives here and is
        // removed with it on success and on every failure path.
        let work_dir = tempfile::Builder::new()
            .prefix(".slideread-")
            .tempdir_in(&self.settings.library_root)?;

        let total = chunks.len();
        progress(0, total);

        let mut segments = Vec::with_capacity(total);
        for chunk in &chunks {
            let request = SpeechRequest::new(
                self.settings.model,
                self.settings.voice,
                chunk.text.clone(),
            );
            let audio_bytes = self.provider.synthesize(&request).await?;

            let segment_path = work_dir.path().join(format!("{}_{}.mp3", stem, chunk.index));
            std::fs::write(&segment_path, &audio_bytes)?;
            segments.push(segment_path);

            progress(chunk.index + 1, total);
        }

        // Stage the finished file inside the work dir, then move it into
        // the library so it only ever appears complete.
        let staged = work_dir.path().join(format!("{}.mp3", stem));
        audio::assemble(&segments, &staged)?;
        std::fs::rename(&staged, &output_path)?;

        log::info!("wrote {}", output_path.display());
        Ok(output_path)
    }

    /// Pick `<stem>.mp3`, or a uniquely suffixed name when it is taken.
    fn resolve_output_path(&self, stem: &str) -> PathBuf {
        let first = self.settings.library_root.join(format!("{}.mp3", stem));
        if !first.exists() {
            return first;
        }
        let mut n = 2;
        loop {
            let candidate = self
                .settings
                .library_root
                .join(format!("{}-{}.mp3", stem, n));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}
