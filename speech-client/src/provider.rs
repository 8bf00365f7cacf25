use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SpeechError};

/// Quality tier of the synthesis backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechModel {
    Standard,
    HighDefinition,
}

impl SpeechModel {
    /// Model identifier sent on the wire.
    pub fn wire_id(&self) -> &'static str {
        match self {
            Self::Standard => "tts-1",
            Self::HighDefinition => "tts-1-hd",
        }
    }
}

impl FromStr for SpeechModel {
    type Err = SpeechError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tts-1" | "standard" => Ok(Self::Standard),
            "tts-1-hd" | "hd" | "high-definition" => Ok(Self::HighDefinition),
            _ => Err(SpeechError::UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for SpeechModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_id())
    }
}

/// Named voice presets offered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub const ALL: [Voice; 6] = [
        Self::Alloy,
        Self::Echo,
        Self::Fable,
        Self::Onyx,
        Self::Nova,
        Self::Shimmer,
    ];

    /// Voice identifier sent on the wire.
    pub fn wire_id(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Shimmer => "shimmer",
        }
    }
}

impl FromStr for Voice {
    type Err = SpeechError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "alloy" => Ok(Self::Alloy),
            "echo" => Ok(Self::Echo),
            "fable" => Ok(Self::Fable),
            "onyx" => Ok(Self::Onyx),
            "nova" => Ok(Self::Nova),
            "shimmer" => Ok(Self::Shimmer),
            _ => Err(SpeechError::UnknownVoice(s.to_string())),
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_id())
    }
}

/// One synthesis request: the exact text payload for a single chunk.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub model: SpeechModel,
    pub voice: Voice,
    pub input: String,
}

impl SpeechRequest {
    pub fn new(model: SpeechModel, voice: Voice, input: impl Into<String>) -> Self {
        Self {
            model,
            voice,
            input: input.into(),
        }
    }
}

/// Trait for speech synthesis providers.
///
/// Each call is independent and stateless; segment ordering is the caller's
/// concern.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize one request, returning raw audio bytes.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>>;

    /// Get the provider name for display
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parse() {
        assert_eq!("tts-1".parse::<SpeechModel>().unwrap(), SpeechModel::Standard);
        assert_eq!(
            "standard".parse::<SpeechModel>().unwrap(),
            SpeechModel::Standard
        );
        assert_eq!(
            "tts-1-hd".parse::<SpeechModel>().unwrap(),
            SpeechModel::HighDefinition
        );
        assert_eq!(
            "HIGH-DEFINITION".parse::<SpeechModel>().unwrap(),
            SpeechModel::HighDefinition
        );
        assert!("tts-9".parse::<SpeechModel>().is_err());
    }

    #[test]
    fn test_voice_parse() {
        assert_eq!("alloy".parse::<Voice>().unwrap(), Voice::Alloy);
        assert_eq!("Nova".parse::<Voice>().unwrap(), Voice::Nova);
        assert!("hal9000".parse::<Voice>().is_err());
    }

    #[test]
    fn test_wire_ids_round_trip() {
        for voice in Voice::ALL {
            assert_eq!(voice.wire_id().parse::<Voice>().unwrap(), voice);
        }
    }

    #[test]
    fn test_request_new() {
        let request = SpeechRequest::new(SpeechModel::HighDefinition, Voice::Alloy, "hello");
        assert_eq!(request.input, "hello");
        assert_eq!(request.model.wire_id(), "tts-1-hd");
        assert_eq!(request.voice.wire_id(), "alloy");
    }
}
