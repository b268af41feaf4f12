// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Thresholds and rates should be positive
    assert!(SILENCE_RMS_THRESHOLD > 0.0);
    assert!(REFERENCE_FRAME_RATE > 0.0);
    assert!(MAX_FRAME_DELTA >= 1.0);
    assert!(DIAL_MIN_SPIN_PER_FRAME > 0.0);
    assert!(DIAL_DRAG_GAIN > 0.0);

    // Blend weights and ratios should be between 0 and 1
    assert!(PITCH_SMOOTHING_ALPHA > 0.0 && PITCH_SMOOTHING_ALPHA <= 1.0);
    assert!(CORRELATION_FLOOR > 0.0 && CORRELATION_FLOOR < 1.0);
    assert!(CORRELATION_PEAK_RATIO > 0.0 && CORRELATION_PEAK_RATIO <= 1.0);

    // Friction must decay without reversing
    assert!(DIAL_FRICTION_PER_FRAME > 0.0 && DIAL_FRICTION_PER_FRAME < 1.0);

    // Tolerance below half the spacing of four targets so at most one matches
    assert!(DIAL_TARGET_TOLERANCE_DEG > 0.0 && DIAL_TARGET_TOLERANCE_DEG < 45.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frequency_window_fits_analyser_frame() {
    assert!(MIN_FREQUENCY_HZ < MAX_FREQUENCY_HZ);
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());

    // The longest period at common rates still fits inside one frame
    for sample_rate in [44_100.0_f32, 48_000.0] {
        let longest = (sample_rate / MIN_FREQUENCY_HZ).ceil() as u32;
        let shortest = (sample_rate / MAX_FREQUENCY_HZ).floor() as u32;
        assert!(longest < ANALYSER_FFT_SIZE, "longest={longest}");
        assert!(shortest >= MIN_LAG_SAMPLES as u32);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tuner_markers_are_symmetric() {
    assert_eq!(TUNER_MARKER_COUNT % 2, 1);
    assert_eq!(TUNER_CENTER_MARKER, TUNER_MARKER_COUNT / 2);
    assert_eq!(MAX_MARKER_STEPS, TUNER_CENTER_MARKER);
    assert!(NEAR_MARKER_STEPS < MAX_MARKER_STEPS);
    // The in-tune window ends before the first marker step
    assert!(IN_TUNE_CENTS <= CENTS_PER_MARKER_STEP);
    // Saturation is reached inside the ±50 cents range
    assert!(CENTS_PER_MARKER_STEP * MAX_MARKER_STEPS as i32 <= 50);
}

#[test]
fn equal_temperament_reference_is_concert_a() {
    assert_eq!(A4_MIDI, 69);
    assert!((A4_HZ - 440.0).abs() < f32::EPSILON);
}

#[test]
fn dom_hooks_are_well_formed() {
    assert!(TARGET_SELECTOR.starts_with('.'));
    assert!(TONEARM_SELECTOR.starts_with('.'));
    assert!(TAB_BUTTON_SELECTOR.starts_with('.'));
    assert!(TAB_PAGE_SELECTOR.starts_with('.'));
    assert!(ROTATION_PROPERTY.starts_with("--"));
    assert!(HIGHLIGHT_COLOR.starts_with('#'));
    assert_ne!(MIC_ON_ICON, MIC_OFF_ICON);
    for id in [DISC_ID, TUNER_ARC_ID, TUNER_NOTE_ID, TUNER_CENTS_ID, MIC_TOGGLE_ID, MIC_ICON_ID] {
        assert!(!id.is_empty() && !id.contains(' '));
    }
}
