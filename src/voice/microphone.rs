//! Microphone-backed speech input

use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::capture::{AudioCapture, SAMPLE_RATE, samples_to_wav};
use super::segmenter::{SegmenterState, UtteranceSegmenter};
use super::stt::SpeechToText;
use super::{ListenError, SpeechInput};
use crate::Result;
use crate::config::{ApiKeys, VoiceConfig};

/// How often the capture buffer is drained
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Ambient noise sample taken before the first listen
const CALIBRATION: Duration = Duration::from_millis(500);

/// Listens on the default microphone and transcribes over HTTP
pub struct MicrophoneInput {
    capture: AudioCapture,
    segmenter: UtteranceSegmenter,
    stt: SpeechToText,
    listen_timeout: Duration,
    calibrated: bool,
}

impl MicrophoneInput {
    /// Open the microphone and build the STT client
    ///
    /// # Errors
    ///
    /// Returns error if the STT key is missing or no input device is usable
    pub fn new(voice: &VoiceConfig, keys: &ApiKeys) -> Result<Self> {
        let stt = SpeechToText::from_config(voice, keys)?;
        let mut capture = AudioCapture::new()?;
        capture.start()?;

        Ok(Self {
            capture,
            segmenter: UtteranceSegmenter::new(voice.pause_threshold),
            stt,
            listen_timeout: voice.listen_timeout,
            calibrated: false,
        })
    }

    /// Sample the room for [`CALIBRATION`] and adjust the speech threshold
    async fn calibrate(&mut self) {
        self.capture.clear_buffer();
        tokio::time::sleep(CALIBRATION).await;
        let ambient = self.capture.take_buffer();
        let threshold = self.segmenter.calibrate(&ambient);
        tracing::info!(threshold, "adjusted for ambient noise");
        self.calibrated = true;
    }

    /// Wait for one utterance or the listen timeout
    async fn capture_utterance(&mut self) -> std::result::Result<Vec<f32>, ListenError> {
        self.segmenter.reset();
        // drop anything recorded while we were speaking
        self.capture.clear_buffer();

        let started = Instant::now();
        loop {
            tokio::time::sleep(POLL_INTERVAL).await;

            let samples = self.capture.take_buffer();
            let state = if samples.is_empty() {
                self.segmenter.state()
            } else {
                self.segmenter.process(&samples)
            };

            match state {
                SegmenterState::Complete => return Ok(self.segmenter.take_utterance()),
                SegmenterState::Waiting if started.elapsed() >= self.listen_timeout => {
                    tracing::debug!("no speech before timeout");
                    return Err(ListenError::Timeout);
                }
                SegmenterState::Waiting | SegmenterState::Speaking => {}
            }
        }
    }
}

#[async_trait(?Send)]
impl SpeechInput for MicrophoneInput {
    async fn listen(&mut self) -> std::result::Result<String, ListenError> {
        if !self.calibrated {
            self.calibrate().await;
        }

        tracing::info!("listening");
        let utterance = self.capture_utterance().await?;

        tracing::info!(samples = utterance.len(), "processing");
        let wav = samples_to_wav(&utterance, SAMPLE_RATE)
            .map_err(|e| ListenError::Service(e.to_string()))?;

        let text = self.stt.transcribe(&wav).await.map_err(|e| {
            tracing::warn!(error = %e, "STT failed");
            ListenError::Service(e.to_string())
        })?;

        let transcript = to_transcript(&text)?;
        tracing::info!(transcript = %transcript, "heard");
        Ok(transcript)
    }
}

/// Normalize STT output; nothing recognizable counts as unintelligible
fn to_transcript(text: &str) -> std::result::Result<String, ListenError> {
    let transcript = text.trim().to_lowercase();
    if transcript.is_empty() {
        return Err(ListenError::Unintelligible);
    }
    Ok(transcript)
}
