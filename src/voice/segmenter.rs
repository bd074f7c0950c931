//! Energy-based utterance segmentation
//!
//! Splits the microphone stream into single utterances: speech starts when
//! block energy rises above the threshold and ends after a configurable pause.
//! The threshold can be raised to the room's noise floor with
//! [`UtteranceSegmenter::calibrate`].

use std::time::Duration;

use super::capture::{SAMPLE_RATE, rms};

/// Lowest energy considered speech, regardless of calibration
const BASE_THRESHOLD: f32 = 0.03;

/// Calibrated threshold is this multiple of the ambient noise floor
const AMBIENT_RATIO: f32 = 1.5;

/// Voiced audio needed before a pause counts as the end of an utterance
const MIN_SPEECH_SAMPLES: usize = 4800; // 0.3 seconds

/// Hard cap on a single utterance
const MAX_UTTERANCE_SAMPLES: usize = SAMPLE_RATE as usize * 15;

/// Segmenter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmenterState {
    /// No speech yet
    Waiting,
    /// Speech in progress, accumulating samples
    Speaking,
    /// A full utterance is buffered and ready to take
    Complete,
}

/// Detects the start and end of one spoken utterance
pub struct UtteranceSegmenter {
    threshold: f32,
    pause_samples: usize,
    state: SegmenterState,
    buffer: Vec<f32>,
    silence_counter: usize,
}

impl UtteranceSegmenter {
    /// Create a segmenter that ends an utterance after `pause` of silence
    #[must_use]
    pub fn new(pause: Duration) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pause_samples = (pause.as_secs_f32() * SAMPLE_RATE as f32) as usize;

        Self {
            threshold: BASE_THRESHOLD,
            pause_samples: pause_samples.max(1),
            state: SegmenterState::Waiting,
            buffer: Vec::new(),
            silence_counter: 0,
        }
    }

    /// Raise the speech threshold above the ambient noise in `ambient`
    ///
    /// Returns the threshold now in effect.
    pub fn calibrate(&mut self, ambient: &[f32]) -> f32 {
        self.threshold = (rms(ambient) * AMBIENT_RATIO).max(BASE_THRESHOLD);
        tracing::debug!(threshold = self.threshold, "calibrated for ambient noise");
        self.threshold
    }

    /// Feed a block of samples and return the resulting state
    pub fn process(&mut self, samples: &[f32]) -> SegmenterState {
        let energy = rms(samples);
        let is_speech = energy > self.threshold;

        match self.state {
            SegmenterState::Waiting => {
                if is_speech {
                    self.state = SegmenterState::Speaking;
                    self.buffer.clear();
                    self.buffer.extend_from_slice(samples);
                    self.silence_counter = 0;
                    tracing::trace!(energy, "speech started");
                }
            }
            SegmenterState::Speaking => {
                self.buffer.extend_from_slice(samples);

                if is_speech {
                    self.silence_counter = 0;
                } else {
                    self.silence_counter += samples.len();
                }

                if self.buffer.len() >= MAX_UTTERANCE_SAMPLES {
                    tracing::debug!(samples = self.buffer.len(), "utterance hit length cap");
                    self.state = SegmenterState::Complete;
                } else if self.silence_counter >= self.pause_samples {
                    let voiced = self.buffer.len().saturating_sub(self.silence_counter);
                    if voiced >= MIN_SPEECH_SAMPLES {
                        tracing::debug!(samples = self.buffer.len(), voiced, "utterance complete");
                        self.state = SegmenterState::Complete;
                    } else {
                        tracing::trace!(voiced, "too short, discarding");
                        self.reset();
                    }
                }
            }
            SegmenterState::Complete => {}
        }

        self.state
    }

    /// Take the buffered utterance and go back to waiting
    pub fn take_utterance(&mut self) -> Vec<f32> {
        let utterance = std::mem::take(&mut self.buffer);
        self.reset();
        utterance
    }

    /// Drop any buffered audio and go back to waiting
    pub fn reset(&mut self) {
        self.state = SegmenterState::Waiting;
        self.buffer.clear();
        self.silence_counter = 0;
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> SegmenterState {
        self.state
    }

    /// Speech energy threshold in effect
    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }
}
