// Display model for the chromatic tuner: a note label, a cents readout and a
// row of graduated markers centred on "in tune".

use super::constants::{
    CENTS_PER_MARKER_STEP, IN_TUNE_CENTS, MAX_MARKER_STEPS, NEAR_MARKER_STEPS,
    TUNER_CENTER_MARKER, TUNER_MARKER_COUNT,
};
use super::pitch::PitchReading;

/// How a single marker should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShade {
    /// No signal at all.
    Idle,
    /// Signal present, marker not lit.
    Off,
    /// Centre marker while within the in-tune window.
    InTune,
    /// Lit, close to the centre.
    Near,
    /// Lit, far from the centre.
    Far,
}

impl MarkerShade {
    /// CSS background used by the page for this shade.
    pub fn css_color(self) -> &'static str {
        match self {
            MarkerShade::Idle => "#555",
            MarkerShade::Off => "#2b2b2b",
            MarkerShade::InTune => "#ffffff",
            MarkerShade::Near => "#999",
            MarkerShade::Far => "#666",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TunerDisplay {
    pub label: String,
    pub cents_text: Option<String>,
    pub markers: [MarkerShade; TUNER_MARKER_COUNT],
}

impl TunerDisplay {
    /// The reset state shown when there is no usable signal.
    pub fn idle() -> Self {
        Self {
            label: "--".to_string(),
            cents_text: None,
            markers: [MarkerShade::Idle; TUNER_MARKER_COUNT],
        }
    }

    pub fn from_reading(reading: &PitchReading) -> Self {
        match reading.estimate() {
            Some(p) => Self {
                label: p.note.to_string(),
                cents_text: Some(format_cents(p.cents)),
                markers: marker_shades(p.cents),
            },
            None => Self::idle(),
        }
    }
}

/// "+12 cents", "-7 cents", "0 cents".
pub fn format_cents(cents: i32) -> String {
    let sign = if cents > 0 { "+" } else { "" };
    format!("{}{} cents", sign, cents)
}

/// Marker row for a deviation. Within the in-tune window only the centre is
/// lit; otherwise one marker per ten cents is lit towards the deviation,
/// saturating at five.
pub fn marker_shades(cents: i32) -> [MarkerShade; TUNER_MARKER_COUNT] {
    let mut markers = [MarkerShade::Off; TUNER_MARKER_COUNT];
    let magnitude = cents.abs();
    if magnitude < IN_TUNE_CENTS {
        markers[TUNER_CENTER_MARKER] = MarkerShade::InTune;
        return markers;
    }
    let steps = ((magnitude / CENTS_PER_MARKER_STEP) as usize).min(MAX_MARKER_STEPS);
    for step in 1..=steps {
        let idx = if cents < 0 {
            TUNER_CENTER_MARKER - step
        } else {
            TUNER_CENTER_MARKER + step
        };
        markers[idx] = if step <= NEAR_MARKER_STEPS {
            MarkerShade::Near
        } else {
            MarkerShade::Far
        };
    }
    markers
}
