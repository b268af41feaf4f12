// Tuning constants for the pitch tracker and the rotary selector.
//
// Every per-frame quantity is expressed against a 60 Hz reference frame; the
// runtime rescales them by the measured frame delta.

/// Display refresh rate the per-frame constants were tuned at.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

// ---------------- Pitch tracking ----------------

/// Frame length requested from the analyser (power of two).
pub const ANALYSER_FFT_SIZE: u32 = 2048;

/// Frames below this RMS level are treated as silence.
pub const SILENCE_RMS_THRESHOLD: f32 = 0.01;

// Musically useful search window: E1 .. C7
pub const MIN_FREQUENCY_HZ: f32 = 41.2;
pub const MAX_FREQUENCY_HZ: f32 = 2093.0;

/// Smallest lag ever searched, whatever the sample rate.
pub const MIN_LAG_SAMPLES: usize = 2;

/// Normalised correlation a lag must reach to count as a period.
pub const CORRELATION_FLOOR: f64 = 0.5;

/// The period is the first correlation peak reaching this share of the highest peak.
pub const CORRELATION_PEAK_RATIO: f64 = 0.9;

/// One-pole smoothing weight of a new reading, per reference frame.
pub const PITCH_SMOOTHING_ALPHA: f32 = 0.2;

// Equal temperament reference
pub const A4_HZ: f32 = 440.0;
pub const A4_MIDI: i32 = 69;

// ---------------- Tuner display ----------------

pub const TUNER_MARKER_COUNT: usize = 11;
pub const TUNER_CENTER_MARKER: usize = 5;
pub const IN_TUNE_CENTS: i32 = 5; // |cents| below this lights the centre marker
pub const CENTS_PER_MARKER_STEP: i32 = 10;
pub const MAX_MARKER_STEPS: usize = 5;
pub const NEAR_MARKER_STEPS: usize = 2; // first steps drawn in the brighter shade

// ---------------- Rotary selector ----------------

/// Velocity multiplier applied each reference frame while spinning freely.
pub const DIAL_FRICTION_PER_FRAME: f32 = 0.985;

/// Slowest the dial ever turns (degrees per reference frame).
pub const DIAL_MIN_SPIN_PER_FRAME: f32 = 0.25;

/// Dial degrees per degree of pointer travel while dragging.
pub const DIAL_DRAG_GAIN: f32 = 1.5;

/// Maximum angle between the pointer and a target for it to count as aligned.
pub const DIAL_TARGET_TOLERANCE_DEG: f32 = 15.0;

/// The needle points "up" at rotation zero.
pub const DIAL_POINTER_REST_OFFSET_DEG: f32 = 90.0;

/// Viewports at or below this CSS width bypass dragging entirely.
pub const NARROW_VIEWPORT_MAX_PX: f64 = 768.0;

/// Upper bound on a single frame delta, in reference frames (tab stalls).
pub const MAX_FRAME_DELTA: f32 = 4.0;
