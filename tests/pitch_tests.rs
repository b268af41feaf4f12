// Host-side tests for the autocorrelation pitch tracker.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod note {
        include!("../src/core/note.rs");
    }
    pub mod pitch {
        include!("../src/core/pitch.rs");
    }
}

use crate::core::constants::*;
use crate::core::note::*;
use crate::core::pitch::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

const FRAME_LEN: usize = ANALYSER_FFT_SIZE as usize;

fn sine(freq_hz: f64, sample_rate: f64, amplitude: f64, phase: f64) -> Vec<f32> {
    (0..FRAME_LEN)
        .map(|i| (amplitude * (2.0 * PI * freq_hz * i as f64 / sample_rate + phase).sin()) as f32)
        .collect()
}

fn exact_cents(freq_hz: f64) -> f64 {
    let semis = 12.0 * (freq_hz / 440.0).log2() + 69.0;
    (semis - semis.round()) * 100.0
}

#[test]
fn lag_range_covers_e1_to_c7() {
    let cfg = TrackerConfig::default();
    assert_eq!(cfg.lag_range(44_100.0, FRAME_LEN), Some((21, 1024)));
    assert_eq!(cfg.lag_range(48_000.0, FRAME_LEN), Some((22, 1024)));
    // Short frames clamp the upper bound
    assert_eq!(cfg.lag_range(44_100.0, 512), Some((21, 256)));
    // Nothing fits
    assert_eq!(cfg.lag_range(44_100.0, 20), None);
    assert_eq!(cfg.lag_range(0.0, FRAME_LEN), None);
}

#[test]
fn rms_of_full_scale_sine_is_one_over_root_two() {
    let frame = sine(441.0, 44_100.0, 1.0, 0.0);
    assert!((rms(&frame) - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
    assert_eq!(rms(&[]), 0.0);
}

#[test]
fn integer_period_sines_resolve_to_their_lag() {
    for &sample_rate in &[44_100.0_f64, 48_000.0] {
        for &lag in &[22usize, 23, 37, 50, 64, 99, 100, 128, 150, 190, 200, 256, 300, 401, 512, 700, 900] {
            let freq = sample_rate / lag as f64;
            for &phase in &[0.0, 0.7] {
                let frame = sine(freq, sample_rate, 0.8, phase);
                let mut tracker = PitchTracker::default();
                let (found, corr) = tracker
                    .detect_period(&frame, sample_rate as f32)
                    .unwrap_or_else(|| panic!("no period for lag {lag} at {sample_rate}"));
                assert_eq!(found, lag, "sr={sample_rate} phase={phase}");
                assert!(corr > 0.99);

                // First reading is unsmoothed and lands within a cent
                let p = *tracker
                    .estimate_pitch(&frame, sample_rate as f32)
                    .estimate()
                    .expect("pitch");
                let expected = freq_to_note(freq as f32);
                assert_eq!(p.note, expected.note);
                assert_eq!(p.octave, expected.octave);
                assert!(
                    (p.cents as f64 - exact_cents(freq)).abs() <= 1.0,
                    "lag={lag} cents={} exact={}",
                    p.cents,
                    exact_cents(freq)
                );
            }
        }
    }
}

#[test]
fn concert_a_reads_as_a4() {
    let frame = sine(440.0, 44_100.0, 0.5, 0.0);
    let mut tracker = PitchTracker::default();
    let reading = tracker.estimate_pitch(&frame, 44_100.0);
    let p = reading.estimate().expect("pitch");
    assert_eq!(p.note, NoteName::A);
    assert_eq!(p.octave, 4);
    // 44100 / 100 = 441 Hz
    assert!(p.cents.abs() <= 5, "cents={}", p.cents);
}

#[test]
fn harmonic_rich_tone_reads_its_fundamental() {
    let sr = 44_100.0;
    let frame: Vec<f32> = (0..FRAME_LEN)
        .map(|i| {
            let t = i as f64 / sr;
            let s = (2.0 * PI * 110.0 * t).sin()
                + 0.8 * (2.0 * PI * 220.0 * t + 0.3).sin()
                + 0.5 * (2.0 * PI * 330.0 * t + 1.1).sin();
            (0.5 * s) as f32
        })
        .collect();
    let mut tracker = PitchTracker::default();
    let p = *tracker.estimate_pitch(&frame, sr as f32).estimate().expect("pitch");
    assert_eq!((p.note, p.octave), (NoteName::A, 2));
}

#[test]
fn guitar_strings_at_48k() {
    let mut tracker = PitchTracker::default();
    for (freq, note, octave) in [
        (82.41, NoteName::E, 2),
        (196.0, NoteName::G, 3),
        (329.63, NoteName::E, 4),
    ] {
        tracker.reset();
        let frame = sine(freq, 48_000.0, 0.5, 0.0);
        let p = *tracker.estimate_pitch(&frame, 48_000.0).estimate().expect("pitch");
        assert_eq!((p.note, p.octave), (note, octave), "freq={freq}");
    }
}

#[test]
fn silence_is_no_signal() {
    let mut tracker = PitchTracker::default();
    let zeros = vec![0.0f32; FRAME_LEN];
    assert!(matches!(
        tracker.estimate_pitch(&zeros, 44_100.0),
        PitchReading::NoSignal(NoSignal::Silence { .. })
    ));

    // Audible tone but below the gate
    let quiet = sine(440.0, 44_100.0, 0.01, 0.0);
    assert!(rms(&quiet) < SILENCE_RMS_THRESHOLD);
    assert!(matches!(
        tracker.estimate_pitch(&quiet, 44_100.0),
        PitchReading::NoSignal(NoSignal::Silence { .. })
    ));
    assert_eq!(tracker.smoothed_hz(), None);
}

#[test]
fn white_noise_has_no_periodicity() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut tracker = PitchTracker::default();
    for _ in 0..4 {
        let frame: Vec<f32> = (0..FRAME_LEN).map(|_| rng.gen_range(-0.5..0.5)).collect();
        assert_eq!(
            tracker.estimate_pitch(&frame, 44_100.0),
            PitchReading::NoSignal(NoSignal::NoPeriodicity)
        );
    }
}

#[test]
fn frames_too_short_for_any_lag_report_no_periodicity() {
    let frame = sine(2000.0, 44_100.0, 0.5, 0.0)[..16].to_vec();
    let mut tracker = PitchTracker::default();
    assert_eq!(
        tracker.estimate_pitch(&frame, 44_100.0),
        PitchReading::NoSignal(NoSignal::NoPeriodicity)
    );
}

#[test]
fn smoothing_converges_on_a_held_note() {
    let mut tracker = PitchTracker::default();
    let low = sine(44_100.0 / 200.0, 44_100.0, 0.5, 0.0);
    let high = sine(44_100.0 / 100.0, 44_100.0, 0.5, 0.0);

    tracker.estimate_pitch(&low, 44_100.0);
    assert!((tracker.smoothed_hz().unwrap() - 220.5).abs() < 1e-3);

    // One step moves a fifth of the way
    tracker.estimate_pitch(&high, 44_100.0);
    let after_one = tracker.smoothed_hz().unwrap();
    assert!((after_one - (220.5 + 0.2 * 220.5)).abs() < 1e-2, "{after_one}");

    for _ in 0..60 {
        tracker.estimate_pitch(&high, 44_100.0);
    }
    assert!((tracker.smoothed_hz().unwrap() - 441.0).abs() < 0.01);
}

#[test]
fn smoothing_history_survives_silence_until_reset() {
    let mut tracker = PitchTracker::default();
    let tone = sine(441.0, 44_100.0, 0.5, 0.0);
    tracker.estimate_pitch(&tone, 44_100.0);
    tracker.estimate_pitch(&vec![0.0; FRAME_LEN], 44_100.0);
    assert!(tracker.smoothed_hz().is_some());
    tracker.reset();
    assert_eq!(tracker.smoothed_hz(), None);
}

#[test]
fn smoother_first_value_passes_through() {
    let mut s = FrequencySmoother::new(0.2);
    assert_eq!(s.value(), None);
    assert_eq!(s.push(330.0, 1.0), 330.0);
    let next = s.push(340.0, 1.0);
    assert!((next - 332.0).abs() < 1e-4);
}

#[test]
fn smoother_is_frame_rate_independent() {
    let mut whole = FrequencySmoother::new(0.2);
    let mut halves = FrequencySmoother::new(0.2);
    whole.push(100.0, 1.0);
    halves.push(100.0, 1.0);

    let a = whole.push(200.0, 2.0);
    halves.push(200.0, 1.0);
    let b = halves.push(200.0, 1.0);
    assert!((a - b).abs() < 1e-3, "{a} vs {b}");

    // Zero elapsed time leaves the value untouched
    assert!((whole.push(500.0, 0.0) - a).abs() < 1e-5);
}

#[test]
fn key_maxima_skip_the_zero_lag_lobe() {
    // lags 1..=9
    let corr = [0.9, 0.4, -0.2, 0.3, 0.7, 0.6, -0.1, 0.8, 0.5];
    let peaks = key_maxima(&corr, 1);
    assert_eq!(peaks.as_slice(), &[(5, 0.7), (8, 0.8)]);
}

#[test]
fn key_maxima_keep_open_lobe_with_interior_peak() {
    let corr = [0.9, -0.2, 0.3, 0.8, 0.5];
    assert_eq!(key_maxima(&corr, 10).as_slice(), &[(13, 0.8)]);

    // Peak on the last sample might still be rising
    let rising = [0.9, -0.2, 0.3, 0.8];
    assert!(key_maxima(&rising, 10).is_empty());
}

#[test]
fn pick_period_prefers_first_peak_near_the_highest() {
    // lags 1..=12: lobes peak at 4 (0.88), 8 (0.95), 11 (0.6)
    let corr = [
        0.9, -0.1, 0.5, 0.88, 0.2, -0.3, 0.7, 0.95, 0.1, -0.2, 0.6, 0.3,
    ];
    assert_eq!(pick_period(&corr, 1, (2, 12), 0.5, 0.9), Some((4, 0.88)));
    // A stricter ratio skips the first peak
    assert_eq!(pick_period(&corr, 1, (2, 12), 0.5, 0.95), Some((8, 0.95)));
    // Out of range peaks are ignored
    assert_eq!(pick_period(&corr, 1, (6, 12), 0.5, 0.9), Some((8, 0.95)));
    // Nothing clears the floor
    assert_eq!(pick_period(&corr, 1, (2, 12), 0.97, 0.9), None);
}

#[test]
fn normalized_correlation_bounds() {
    let frame = sine(441.0, 44_100.0, 0.5, 0.0);
    assert!((normalized_correlation(&frame, 100) - 1.0).abs() < 1e-6);
    assert!(normalized_correlation(&frame, 50) < -0.99);
    assert_eq!(normalized_correlation(&frame, FRAME_LEN), 0.0);
    assert_eq!(normalized_correlation(&[0.0; 64], 4), 0.0);
}
