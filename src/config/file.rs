//! TOML configuration file loading
//!
//! Supports `~/.config/ultron/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct UltronConfigFile {
    /// Voice/audio configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,

    /// Encyclopedia lookup configuration
    #[serde(default)]
    pub encyclopedia: EncyclopediaFileConfig,

    /// Browser launcher configuration
    #[serde(default)]
    pub browser: BrowserFileConfig,
}

/// Voice processing configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// STT provider ("whisper" or "deepgram")
    pub stt_provider: Option<String>,

    /// STT model (e.g. "whisper-1")
    pub stt_model: Option<String>,

    /// TTS provider ("openai" or "elevenlabs")
    pub tts_provider: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    /// TTS voice identifier (e.g. "onyx")
    pub tts_voice: Option<String>,

    /// TTS speed multiplier
    pub tts_speed: Option<f32>,

    /// Playback volume (0.0 to 1.0)
    pub volume: Option<f32>,

    /// Seconds to wait for speech to start
    pub listen_timeout_secs: Option<u64>,

    /// Seconds of silence that end an utterance
    pub pause_threshold_secs: Option<f32>,

    /// Recognition language (e.g. "en-US")
    pub language: Option<String>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub elevenlabs: Option<String>,
    pub deepgram: Option<String>,
}

/// Encyclopedia configuration
#[derive(Debug, Default, Deserialize)]
pub struct EncyclopediaFileConfig {
    /// Wikipedia base URL
    pub base_url: Option<String>,

    /// Number of summary sentences to speak
    pub sentences: Option<usize>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Browser configuration
#[derive(Debug, Default, Deserialize)]
pub struct BrowserFileConfig {
    /// Explicit launcher command (e.g. "firefox")
    pub command: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `UltronConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> UltronConfigFile {
    config_file_path().map_or_else(UltronConfigFile::default, |path| load_config_file_from(&path))
}

/// Load a TOML config file from an explicit path
///
/// Returns `UltronConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file_from(path: &Path) -> UltronConfigFile {
    if !path.exists() {
        return UltronConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                UltronConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            UltronConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/ultron/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("ultron").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let fc = load_config_file_from(&dir.path().join("nope.toml"));
        assert!(fc.voice.stt_model.is_none());
        assert!(fc.api_keys.openai.is_none());
    }

    #[test]
    fn partial_file_overlays_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[voice]
tts_voice = "onyx"
volume = 0.5

[encyclopedia]
sentences = 3
"#,
        )
        .unwrap();

        let fc = load_config_file_from(&path);
        assert_eq!(fc.voice.tts_voice.as_deref(), Some("onyx"));
        assert_eq!(fc.voice.volume, Some(0.5));
        assert_eq!(fc.encyclopedia.sentences, Some(3));
        assert!(fc.browser.command.is_none());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[voice\nthis is not toml").unwrap();

        let fc = load_config_file_from(&path);
        assert!(fc.voice.tts_voice.is_none());
    }
}
