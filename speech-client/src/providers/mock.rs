//! Mock speech provider for testing
//!
//! Provides a configurable mock provider that can simulate successful
//! synthesis, hard failures, and failures at a specific call.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, SpeechError};
use crate::provider::{SpeechProvider, SpeechRequest};

/// A mock provider for testing pipeline failure and ordering behavior
pub struct MockSpeech {
    /// Call index at which failures begin (usize::MAX = never fail)
    fail_from: usize,
    /// Current call count
    call_count: AtomicUsize,
    /// Error to return on failure
    fail_with: Mutex<Option<SpeechError>>,
    /// Audio bytes to return on success
    audio: Vec<u8>,
    /// Input payloads seen, in call order
    inputs: Mutex<Vec<String>>,
}

impl MockSpeech {
    /// Create a provider that always succeeds with the given audio bytes
    pub fn always_succeeds(audio: &[u8]) -> Self {
        Self {
            fail_from: usize::MAX,
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(None),
            audio: audio.to_vec(),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that always fails with the given error
    pub fn always_fails(error: SpeechError) -> Self {
        Self {
            fail_from: 0,
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(Some(error)),
            audio: Vec::new(),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that succeeds for calls before `n`, then fails
    pub fn fails_at_call(n: usize, error: SpeechError, audio: &[u8]) -> Self {
        Self {
            fail_from: n,
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(Some(error)),
            audio: audio.to_vec(),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Get the number of times synthesize() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get the input payloads seen so far, in call order
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechProvider for MockSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        self.inputs.lock().unwrap().push(request.input.clone());
        let call_num = self.call_count.fetch_add(1, Ordering::SeqCst);

        if call_num >= self.fail_from {
            let error = self.fail_with.lock().unwrap();
            if let Some(err) = error.as_ref() {
                return Err(clone_error(err));
            }
        }

        Ok(self.audio.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Clone a SpeechError (needed because SpeechError doesn't implement Clone)
fn clone_error(err: &SpeechError) -> SpeechError {
    match err {
        SpeechError::MissingApiKey { env_var } => SpeechError::MissingApiKey {
            env_var: env_var.clone(),
        },
        SpeechError::RateLimited { retry_after } => SpeechError::RateLimited {
            retry_after: *retry_after,
        },
        SpeechError::ApiError {
            message,
            status_code,
        } => SpeechError::ApiError {
            message: message.clone(),
            status_code: *status_code,
        },
        SpeechError::UnknownVoice(s) => SpeechError::UnknownVoice(s.clone()),
        SpeechError::UnknownModel(s) => SpeechError::UnknownModel(s.clone()),
        // IO errors can't be cloned; a generic API error stands in
        SpeechError::Io(_) => SpeechError::ApiError {
            message: "IO error (mock)".to_string(),
            status_code: None,
        },
    }
}
