//! Voice pipeline integration tests
//!
//! Tests voice components without requiring audio hardware

use std::io::Cursor;
use std::time::Duration;

use ultron::voice::{SAMPLE_RATE, SegmenterState, UtteranceSegmenter, samples_to_wav};

mod common;

/// Samples per 100ms block, the size the microphone loop polls at
const BLOCK: usize = SAMPLE_RATE as usize / 10;

/// Generate sine wave audio samples
fn generate_sine_samples(frequency: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Generate silence
fn generate_silence(duration_secs: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    vec![0.0; num_samples]
}

/// Feed audio in polling-sized blocks, returning the last state
fn feed(segmenter: &mut UtteranceSegmenter, samples: &[f32]) -> SegmenterState {
    let mut state = segmenter.state();
    for block in samples.chunks(BLOCK) {
        state = segmenter.process(block);
    }
    state
}

#[test]
fn test_segmenter_starts_waiting() {
    let segmenter = UtteranceSegmenter::new(Duration::from_secs(1));

    assert_eq!(segmenter.state(), SegmenterState::Waiting);
    assert!((segmenter.threshold() - 0.03).abs() < f32::EPSILON);
}

#[test]
fn test_silence_keeps_waiting() {
    let mut segmenter = UtteranceSegmenter::new(Duration::from_secs(1));

    let state = feed(&mut segmenter, &generate_silence(3.0));

    assert_eq!(state, SegmenterState::Waiting);
}

#[test]
fn test_speech_then_pause_completes_utterance() {
    let mut segmenter = UtteranceSegmenter::new(Duration::from_secs(1));

    assert_eq!(
        feed(&mut segmenter, &generate_sine_samples(440.0, 0.5, 0.5)),
        SegmenterState::Speaking
    );
    assert_eq!(
        feed(&mut segmenter, &generate_silence(0.5)),
        SegmenterState::Speaking
    );
    assert_eq!(
        feed(&mut segmenter, &generate_silence(0.5)),
        SegmenterState::Complete
    );

    let utterance = segmenter.take_utterance();
    assert_eq!(utterance.len(), SAMPLE_RATE as usize * 3 / 2);
    assert_eq!(segmenter.state(), SegmenterState::Waiting);
}

#[test]
fn test_short_blip_is_discarded() {
    let mut segmenter = UtteranceSegmenter::new(Duration::from_secs(1));

    feed(&mut segmenter, &generate_sine_samples(440.0, 0.1, 0.5));
    let state = feed(&mut segmenter, &generate_silence(1.0));

    assert_eq!(state, SegmenterState::Waiting);
    assert!(segmenter.take_utterance().is_empty());
}

#[test]
fn test_shorter_pause_ends_sooner() {
    let mut segmenter = UtteranceSegmenter::new(Duration::from_millis(300));

    feed(&mut segmenter, &generate_sine_samples(440.0, 0.5, 0.5));
    let state = feed(&mut segmenter, &generate_silence(0.3));

    assert_eq!(state, SegmenterState::Complete);
}

#[test]
fn test_long_speech_is_capped() {
    let mut segmenter = UtteranceSegmenter::new(Duration::from_secs(1));

    let state = feed(&mut segmenter, &generate_sine_samples(440.0, 16.0, 0.5));

    assert_eq!(state, SegmenterState::Complete);
    assert_eq!(segmenter.take_utterance().len(), SAMPLE_RATE as usize * 15);
}

#[test]
fn test_calibration_raises_threshold_over_noise() {
    let mut segmenter = UtteranceSegmenter::new(Duration::from_secs(1));
    let hum = generate_sine_samples(60.0, 0.5, 0.1);

    let threshold = segmenter.calibrate(&hum);
    assert!(threshold > 0.1, "threshold {threshold} should exceed hum energy");

    // the same hum no longer counts as speech
    assert_eq!(feed(&mut segmenter, &hum), SegmenterState::Waiting);

    // but a voice over it does
    assert_eq!(
        feed(&mut segmenter, &generate_sine_samples(440.0, 0.5, 0.5)),
        SegmenterState::Speaking
    );
}

#[test]
fn test_calibration_never_drops_below_base() {
    let mut segmenter = UtteranceSegmenter::new(Duration::from_secs(1));

    let threshold = segmenter.calibrate(&generate_silence(0.5));

    assert!((threshold - 0.03).abs() < f32::EPSILON);
}

#[test]
fn test_reset_drops_buffered_speech() {
    let mut segmenter = UtteranceSegmenter::new(Duration::from_secs(1));
    feed(&mut segmenter, &generate_sine_samples(440.0, 0.5, 0.5));

    segmenter.reset();

    assert_eq!(segmenter.state(), SegmenterState::Waiting);
    assert!(segmenter.take_utterance().is_empty());
}

#[test]
fn test_samples_to_wav_header() {
    let samples = generate_sine_samples(440.0, 1.0, 0.5);

    let wav = samples_to_wav(&samples, SAMPLE_RATE).unwrap();

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    // 44-byte header + 16-bit mono PCM
    assert_eq!(wav.len(), 44 + samples.len() * 2);
}

#[test]
fn test_samples_to_wav_reads_back() {
    let samples = vec![0.0, 0.5, -0.5, 1.0, -1.0, 2.0];

    let wav = samples_to_wav(&samples, SAMPLE_RATE).unwrap();
    let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();

    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.bits_per_sample, 16);

    let pcm: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    // out-of-range input is clamped
    assert_eq!(pcm, vec![0, 16383, -16383, 32767, -32767, 32767]);
}
