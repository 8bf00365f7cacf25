//! slideread configuration management.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_VOICE: &str = "alloy";
const DEFAULT_MODEL: &str = "tts-1-hd";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Library directory for produced audio files. None means
    /// ~/slideread_audio.
    #[serde(default)]
    pub library_dir: Option<PathBuf>,

    /// Default voice preset
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Default model tier
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum characters per synthesis request
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_chunk_chars() -> usize {
    crate::text::DEFAULT_MAX_CHUNK_CHARS
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            library_dir: None,
            voice: default_voice(),
            model: default_model(),
            chunk_chars: default_chunk_chars(),
        }
    }
}

impl ReaderConfig {
    /// Get the config file path: ~/.config/slideread/config.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("slideread")
            .join("config.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: ReaderConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// The effective library directory.
    pub fn library_dir(&self) -> PathBuf {
        self.library_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("slideread_audio")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.voice, "alloy");
        assert_eq!(config.model, "tts-1-hd");
        assert_eq!(config.chunk_chars, 4096);
        assert!(config.library_dir.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = ReaderConfig::config_path().unwrap();
        assert!(path.ends_with("slideread/config.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
library_dir = "/srv/audio"
voice = "nova"
model = "tts-1"
chunk_chars = 2048
"#;
        let config: ReaderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.library_dir, Some(PathBuf::from("/srv/audio")));
        assert_eq!(config.voice, "nova");
        assert_eq!(config.model, "tts-1");
        assert_eq!(config.chunk_chars, 2048);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: ReaderConfig = toml::from_str("").unwrap();
        assert_eq!(config.voice, "alloy");
        assert_eq!(config.model, "tts-1-hd");
        assert_eq!(config.chunk_chars, 4096);
    }

    #[test]
    fn test_explicit_library_dir_wins() {
        let config = ReaderConfig {
            library_dir: Some(PathBuf::from("/srv/audio")),
            ..Default::default()
        };
        assert_eq!(config.library_dir(), PathBuf::from("/srv/audio"));
    }
}
