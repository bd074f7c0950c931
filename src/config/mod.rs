//! Configuration management for Ultron
//!
//! Values are resolved env > TOML file > default.

pub mod file;

use std::time::Duration;

use crate::{Error, Result};

pub use file::{UltronConfigFile, config_file_path, load_config_file, load_config_file_from};

/// Ultron configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Voice configuration
    pub voice: VoiceConfig,

    /// API keys
    pub api_keys: ApiKeys,

    /// Encyclopedia configuration
    pub encyclopedia: EncyclopediaConfig,

    /// Browser launcher configuration
    pub browser: BrowserConfig,
}

/// Speech-to-text backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SttProvider {
    /// `OpenAI` Whisper
    #[default]
    Whisper,
    /// Deepgram
    Deepgram,
}

impl std::str::FromStr for SttProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "whisper" | "openai" => Ok(Self::Whisper),
            "deepgram" => Ok(Self::Deepgram),
            other => Err(Error::Config(format!("unknown STT provider: {other}"))),
        }
    }
}

/// Text-to-speech backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TtsProvider {
    /// `OpenAI` TTS
    #[default]
    OpenAI,
    /// `ElevenLabs`
    ElevenLabs,
}

impl std::str::FromStr for TtsProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "elevenlabs" => Ok(Self::ElevenLabs),
            other => Err(Error::Config(format!("unknown TTS provider: {other}"))),
        }
    }
}

/// Voice processing configuration
///
/// Set once at startup and handed to the input and output components.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// STT backend
    pub stt_provider: SttProvider,

    /// STT model (e.g. "whisper-1", "nova-2")
    pub stt_model: String,

    /// TTS backend
    pub tts_provider: TtsProvider,

    /// TTS model (e.g. "tts-1")
    pub tts_model: String,

    /// TTS voice identifier
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f32,

    /// Playback volume (0.0 to 1.0)
    pub volume: f32,

    /// How long to wait for speech to begin
    pub listen_timeout: Duration,

    /// Silence that ends an utterance
    pub pause_threshold: Duration,

    /// Recognition language
    pub language: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            stt_provider: SttProvider::Whisper,
            stt_model: "whisper-1".to_string(),
            tts_provider: TtsProvider::OpenAI,
            tts_model: "tts-1".to_string(),
            tts_voice: "onyx".to_string(),
            tts_speed: 0.9,
            volume: 1.0,
            listen_timeout: Duration::from_secs(5),
            pause_threshold: Duration::from_secs(1),
            language: "en-US".to_string(),
        }
    }
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (for Whisper and TTS)
    pub openai: Option<String>,

    /// `ElevenLabs` API key (optional TTS)
    pub elevenlabs: Option<String>,

    /// `Deepgram` API key (optional STT)
    pub deepgram: Option<String>,
}

/// Encyclopedia lookup configuration
#[derive(Debug, Clone)]
pub struct EncyclopediaConfig {
    /// Wikipedia base URL
    pub base_url: String,

    /// Number of summary sentences to return
    pub sentences: usize,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for EncyclopediaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            sentences: 2,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Browser launcher configuration
#[derive(Debug, Clone, Default)]
pub struct BrowserConfig {
    /// Explicit launcher command; platform default when unset
    pub command: Option<String>,
}

impl Config {
    /// Load configuration from the environment and the standard config file
    ///
    /// # Errors
    ///
    /// Returns error if a provider name is not recognized
    pub fn load() -> Result<Self> {
        Self::from_file(load_config_file())
    }

    /// Build configuration from an already-parsed config file, applying env overrides
    ///
    /// # Errors
    ///
    /// Returns error if a provider name is not recognized
    pub fn from_file(fc: UltronConfigFile) -> Result<Self> {
        // API keys (env > toml > None)
        let api_keys = ApiKeys {
            openai: std::env::var("OPENAI_API_KEY").ok().or(fc.api_keys.openai),
            elevenlabs: std::env::var("ELEVENLABS_API_KEY")
                .ok()
                .or(fc.api_keys.elevenlabs),
            deepgram: std::env::var("DEEPGRAM_API_KEY")
                .ok()
                .or(fc.api_keys.deepgram),
        };

        // Voice config (env > toml > default)
        let defaults = VoiceConfig::default();
        let stt_provider = fc
            .voice
            .stt_provider
            .as_deref()
            .map(str::parse::<SttProvider>)
            .transpose()?
            .unwrap_or(defaults.stt_provider);
        let tts_provider = fc
            .voice
            .tts_provider
            .as_deref()
            .map(str::parse::<TtsProvider>)
            .transpose()?
            .unwrap_or(defaults.tts_provider);

        let voice = VoiceConfig {
            stt_provider,
            stt_model: std::env::var("ULTRON_STT_MODEL")
                .ok()
                .or(fc.voice.stt_model)
                .unwrap_or_else(|| default_stt_model(stt_provider).to_string()),
            tts_provider,
            tts_model: std::env::var("ULTRON_TTS_MODEL")
                .ok()
                .or(fc.voice.tts_model)
                .unwrap_or_else(|| default_tts_model(tts_provider).to_string()),
            tts_voice: std::env::var("ULTRON_TTS_VOICE")
                .ok()
                .or(fc.voice.tts_voice)
                .unwrap_or(defaults.tts_voice),
            tts_speed: fc.voice.tts_speed.unwrap_or(defaults.tts_speed).clamp(0.25, 4.0),
            volume: fc.voice.volume.unwrap_or(defaults.volume).clamp(0.0, 1.0),
            listen_timeout: fc
                .voice
                .listen_timeout_secs
                .map_or(defaults.listen_timeout, Duration::from_secs),
            pause_threshold: fc
                .voice
                .pause_threshold_secs
                .filter(|s| s.is_finite() && *s > 0.0)
                .map_or(defaults.pause_threshold, Duration::from_secs_f32),
            language: fc.voice.language.unwrap_or(defaults.language),
        };

        let encyclopedia_defaults = EncyclopediaConfig::default();
        let encyclopedia = EncyclopediaConfig {
            base_url: std::env::var("ULTRON_WIKIPEDIA_URL")
                .ok()
                .or(fc.encyclopedia.base_url)
                .unwrap_or(encyclopedia_defaults.base_url),
            sentences: fc
                .encyclopedia
                .sentences
                .filter(|n| *n > 0)
                .unwrap_or(encyclopedia_defaults.sentences),
            timeout: fc
                .encyclopedia
                .timeout_secs
                .map_or(encyclopedia_defaults.timeout, Duration::from_secs),
        };

        let browser = BrowserConfig {
            command: std::env::var("ULTRON_BROWSER").ok().or(fc.browser.command),
        };

        Ok(Self {
            voice,
            api_keys,
            encyclopedia,
            browser,
        })
    }
}

const fn default_stt_model(provider: SttProvider) -> &'static str {
    match provider {
        SttProvider::Whisper => "whisper-1",
        SttProvider::Deepgram => "nova-2",
    }
}

const fn default_tts_model(provider: TtsProvider) -> &'static str {
    match provider {
        TtsProvider::OpenAI => "tts-1",
        TtsProvider::ElevenLabs => "eleven_monolingual_v1",
    }
}
