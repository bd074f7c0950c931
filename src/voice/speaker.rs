//! Speaker-backed speech output

use async_trait::async_trait;

use super::SpeechOutput;
use super::playback::AudioPlayback;
use super::tts::TextToSpeech;
use crate::Result;
use crate::config::{ApiKeys, VoiceConfig};

/// Synthesizes each line over HTTP and plays it on the default speaker
pub struct SpeakerOutput {
    tts: TextToSpeech,
    playback: AudioPlayback,
}

impl SpeakerOutput {
    /// Build the TTS client and open the speaker with the configured volume
    ///
    /// # Errors
    ///
    /// Returns error if the TTS key is missing or no output device is usable
    pub fn new(voice: &VoiceConfig, keys: &ApiKeys) -> Result<Self> {
        Ok(Self {
            tts: TextToSpeech::from_config(voice, keys)?,
            playback: AudioPlayback::new(voice.volume)?,
        })
    }
}

#[async_trait(?Send)]
impl SpeechOutput for SpeakerOutput {
    async fn speak(&mut self, text: &str) -> Result<()> {
        println!("[ULTRON SPEAKING]: {text}");
        tracing::debug!(text, "speaking");

        let audio = self.tts.synthesize(text).await?;
        self.playback.play_mp3(&audio)
    }
}
