use super::constants::{A4_HZ, A4_MIDI};
use std::fmt;

/// The twelve equal-tempered pitch classes, sharps only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteName {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl NoteName {
    pub const ALL: [NoteName; 12] = [
        NoteName::C,
        NoteName::CSharp,
        NoteName::D,
        NoteName::DSharp,
        NoteName::E,
        NoteName::F,
        NoteName::FSharp,
        NoteName::G,
        NoteName::GSharp,
        NoteName::A,
        NoteName::ASharp,
        NoteName::B,
    ];

    /// Pitch class of a MIDI note number. Negative numbers wrap like positive ones.
    pub fn from_midi(midi: i32) -> Self {
        Self::ALL[midi.rem_euclid(12) as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::CSharp => "C#",
            NoteName::D => "D",
            NoteName::DSharp => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::FSharp => "F#",
            NoteName::G => "G",
            NoteName::GSharp => "G#",
            NoteName::A => "A",
            NoteName::ASharp => "A#",
            NoteName::B => "B",
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nearest equal-tempered note to a frequency, with the signed deviation from it.
///
/// Fields:
/// - `frequency_hz`: the (smoothed) frequency the note was derived from
/// - `note`: pitch class of the nearest semitone
/// - `octave`: scientific octave number (A4 = 440 Hz, middle C = C4)
/// - `cents`: rounded deviation from the nearest semitone, within ±50
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchEstimate {
    pub frequency_hz: f32,
    pub note: NoteName,
    pub octave: i32,
    pub cents: i32,
}

/// Convert a MIDI note number to Hertz (A4=440 Hz).
pub fn midi_to_hz(midi: f32) -> f32 {
    A4_HZ * (2.0_f32).powf((midi - A4_MIDI as f32) / 12.0)
}

/// Map a frequency to the nearest semitone of the A4 = 440 Hz grid.
///
/// `frequency_hz` must be positive and finite; callers only ever pass
/// `sample_rate / lag`.
pub fn freq_to_note(frequency_hz: f32) -> PitchEstimate {
    let semitones = 12.0 * (frequency_hz / A4_HZ).log2() + A4_MIDI as f32;
    let midi = semitones.round() as i32;
    let exact = midi_to_hz(midi as f32);
    let cents = (1200.0 * (frequency_hz / exact).log2()).round() as i32;
    PitchEstimate {
        frequency_hz,
        note: NoteName::from_midi(midi),
        octave: midi.div_euclid(12) - 1,
        cents,
    }
}
