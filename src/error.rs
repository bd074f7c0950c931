//! Error types for Ultron

use thiserror::Error;

/// Result type alias for Ultron operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Ultron
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Encyclopedia lookup error
    #[error("encyclopedia error: {0}")]
    Encyclopedia(String),

    /// Browser launch error
    #[error("browser error: {0}")]
    Browser(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
