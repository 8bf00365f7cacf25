//! OpenAI speech synthesis API provider
//!
//! One POST to `/v1/audio/speech` per chunk; the response body is the raw
//! audio for that chunk.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpeechError};
use crate::provider::{SpeechProvider, SpeechRequest};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Provider for the OpenAI text-to-speech API
pub struct OpenAiSpeech {
    base_url: String,
    api_key: String,
    client: Client,
}

impl OpenAiSpeech {
    /// Create a provider with an explicit API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a provider against a non-default endpoint.
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    /// Create a provider from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| SpeechError::MissingApiKey {
            env_var: API_KEY_ENV.to_string(),
        })?;
        Ok(Self::new(api_key))
    }
}

// OpenAI API request/response types

#[derive(Debug, Serialize)]
struct SpeechApiRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[async_trait]
impl SpeechProvider for OpenAiSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        let api_request = SpeechApiRequest {
            model: request.model.wire_id(),
            voice: request.voice.wire_id(),
            input: &request.input,
            response_format: "mp3",
        };

        let url = format!("{}/audio/speech", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| SpeechError::ApiError {
                message: format!("Request failed: {}", e),
                status_code: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());

            if status.as_u16() == 429 {
                return Err(SpeechError::RateLimited { retry_after });
            }

            let error_text = response.text().await.unwrap_or_default();
            let message =
                if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                    error_response.error.message
                } else {
                    error_text
                };

            return Err(SpeechError::ApiError {
                message,
                status_code: Some(status.as_u16()),
            });
        }

        let audio = response.bytes().await.map_err(|e| SpeechError::ApiError {
            message: format!("Failed to read audio response: {}", e),
            status_code: None,
        })?;

        if audio.is_empty() {
            return Err(SpeechError::ApiError {
                message: "Empty audio response".to_string(),
                status_code: None,
            });
        }

        Ok(audio.to_vec())
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = OpenAiSpeech::with_base_url("key".to_string(), "http://localhost:8080/v1/");
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_error_body_parse() {
        let body = r#"{"error": {"message": "quota exceeded", "type": "insufficient_quota"}}"#;
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "quota exceeded");
    }
}
