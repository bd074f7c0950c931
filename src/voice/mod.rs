//! Voice input and output
//!
//! The session talks to speech through two narrow traits. [`SpeechInput`]
//! yields one lowercase transcript per listen cycle; [`SpeechOutput`] renders
//! one line of text and returns once it has been heard.
//!
//! Hardware-backed implementations live in [`MicrophoneInput`] and
//! [`SpeakerOutput`]. [`ConsoleInput`] and [`ConsoleOutput`] run the same
//! session over stdin/stdout.

mod capture;
mod console;
mod microphone;
mod playback;
mod segmenter;
mod speaker;
mod stt;
mod tts;

use async_trait::async_trait;

use crate::Result;

pub use capture::{AudioCapture, SAMPLE_RATE, rms, samples_to_wav};
pub use console::{ConsoleInput, ConsoleOutput};
pub use microphone::MicrophoneInput;
pub use playback::AudioPlayback;
pub use segmenter::{SegmenterState, UtteranceSegmenter};
pub use speaker::SpeakerOutput;
pub use stt::SpeechToText;
pub use tts::TextToSpeech;

/// Why a listen cycle produced no transcript
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListenError {
    /// Nobody started speaking before the listen timeout
    #[error("listen timed out")]
    Timeout,

    /// Speech was captured but the recognizer returned nothing usable
    #[error("speech was unintelligible")]
    Unintelligible,

    /// The recognizer or audio device failed
    #[error("speech service error: {0}")]
    Service(String),
}

/// Source of transcripts, one per listen cycle
#[async_trait(?Send)]
pub trait SpeechInput {
    /// Block until one utterance has been captured and recognized
    ///
    /// The returned transcript is lowercased. An empty string means the input
    /// had nothing to say this cycle.
    ///
    /// # Errors
    ///
    /// Returns a [`ListenError`] describing why no transcript is available
    async fn listen(&mut self) -> std::result::Result<String, ListenError>;
}

/// Sink for spoken lines
#[async_trait(?Send)]
pub trait SpeechOutput {
    /// Render one line of text, returning once playback has finished
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    async fn speak(&mut self, text: &str) -> Result<()>;
}
