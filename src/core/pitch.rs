// Time-domain autocorrelation pitch tracking.
//
// One `PitchTracker` is fed one analyser frame per display frame. Each pass:
// 1. rejects quiet frames by RMS,
// 2. correlates the frame with itself over a bounded lag range,
// 3. takes the first strong correlation lobe maximum as the period,
// 4. converts the lag to Hertz and smooths it against history,
// 5. snaps the result to the nearest equal-tempered note.
//
// The search is O(lags × frame length). Like every plain autocorrelation
// detector it can still lock onto a subharmonic when the fundamental is much
// weaker than an overtone.

use super::constants::{
    CORRELATION_FLOOR, CORRELATION_PEAK_RATIO, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ,
    MIN_LAG_SAMPLES, PITCH_SMOOTHING_ALPHA, SILENCE_RMS_THRESHOLD,
};
use super::note::{freq_to_note, PitchEstimate};
use smallvec::SmallVec;

/// Why a frame produced no pitch. Never an error: the display just resets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoSignal {
    /// Frame energy below the silence threshold.
    Silence { rms: f32 },
    /// Loud enough, but no lag in range correlated above the floor.
    NoPeriodicity,
}

/// Outcome of one estimation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PitchReading {
    Pitch(PitchEstimate),
    NoSignal(NoSignal),
}

impl PitchReading {
    pub fn estimate(&self) -> Option<&PitchEstimate> {
        match self {
            PitchReading::Pitch(p) => Some(p),
            PitchReading::NoSignal(_) => None,
        }
    }
}

/// Tracker parameters; `Default` gives the values the tuner ships with.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub silence_rms: f32,
    pub min_frequency_hz: f32,
    pub max_frequency_hz: f32,
    pub correlation_floor: f64,
    pub peak_ratio: f64,
    pub smoothing_alpha: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            silence_rms: SILENCE_RMS_THRESHOLD,
            min_frequency_hz: MIN_FREQUENCY_HZ,
            max_frequency_hz: MAX_FREQUENCY_HZ,
            correlation_floor: CORRELATION_FLOOR,
            peak_ratio: CORRELATION_PEAK_RATIO,
            smoothing_alpha: PITCH_SMOOTHING_ALPHA,
        }
    }
}

impl TrackerConfig {
    /// Inclusive lag range covering the configured frequency window.
    ///
    /// The upper bound is clamped to half the frame so every candidate period
    /// overlaps itself at least once. `None` when no lag fits.
    pub fn lag_range(&self, sample_rate_hz: f32, frame_len: usize) -> Option<(usize, usize)> {
        if sample_rate_hz.is_nan() || sample_rate_hz <= 0.0 {
            return None;
        }
        let min_lag =
            ((sample_rate_hz / self.max_frequency_hz).floor() as usize).max(MIN_LAG_SAMPLES);
        let max_lag =
            ((sample_rate_hz / self.min_frequency_hz).ceil() as usize).min(frame_len / 2);
        (min_lag <= max_lag).then_some((min_lag, max_lag))
    }
}

/// Root-mean-square level of a frame. Empty frames are silent.
pub fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / frame.len() as f64).sqrt() as f32
}

/// Dot product of the frame with itself shifted by `lag`, normalised by the
/// energy of both overlapping segments. 1.0 means the two segments are equal.
pub fn normalized_correlation(frame: &[f32], lag: usize) -> f64 {
    if lag >= frame.len() {
        return 0.0;
    }
    let head = &frame[..frame.len() - lag];
    let tail = &frame[lag..];
    let mut cross = 0.0f64;
    let mut energy = 0.0f64;
    for (&a, &b) in head.iter().zip(tail) {
        let (a, b) = (a as f64, b as f64);
        cross += a * b;
        energy += a * a + b * b;
    }
    if energy <= f64::EPSILON {
        0.0
    } else {
        2.0 * cross / energy
    }
}

/// Fill `out` with the normalised correlation for every lag in `first_lag..=last_lag`.
pub fn correlate_into(frame: &[f32], first_lag: usize, last_lag: usize, out: &mut Vec<f64>) {
    out.clear();
    out.extend((first_lag..=last_lag).map(|lag| normalized_correlation(frame, lag)));
}

/// Highest point of every positive lobe after the first negative excursion,
/// as `(lag, correlation)`, where `correlations[i]` belongs to lag `first_lag + i`.
///
/// The lobe around lag zero is skipped. A lobe still open at the end of the
/// run only counts when its maximum is not the final sample.
pub fn key_maxima(correlations: &[f64], first_lag: usize) -> SmallVec<[(usize, f64); 16]> {
    let mut out = SmallVec::new();
    let mut seen_negative = false;
    let mut lobe: Option<(usize, f64)> = None;
    for (i, &c) in correlations.iter().enumerate() {
        if c <= 0.0 {
            seen_negative = true;
            if let Some(peak) = lobe.take() {
                out.push(peak);
            }
        } else if seen_negative {
            match lobe {
                Some((_, best)) if c <= best => {}
                _ => lobe = Some((first_lag + i, c)),
            }
        }
    }
    if let Some((lag, c)) = lobe {
        if lag + 1 < first_lag + correlations.len() {
            out.push((lag, c));
        }
    }
    out
}

/// Choose the period among the key maxima that fall inside `lag_range` and
/// clear `floor`: the first one reaching `peak_ratio` of the highest wins.
pub fn pick_period(
    correlations: &[f64],
    first_lag: usize,
    lag_range: (usize, usize),
    floor: f64,
    peak_ratio: f64,
) -> Option<(usize, f64)> {
    let (min_lag, max_lag) = lag_range;
    let candidates: SmallVec<[(usize, f64); 16]> = key_maxima(correlations, first_lag)
        .into_iter()
        .filter(|&(lag, c)| (min_lag..=max_lag).contains(&lag) && c > floor)
        .collect();
    let highest = candidates
        .iter()
        .map(|&(_, c)| c)
        .fold(f64::NEG_INFINITY, f64::max);
    candidates
        .into_iter()
        .find(|&(_, c)| c >= highest * peak_ratio)
}

/// One-pole exponential smoother with a per-reference-frame weight.
///
/// The weight is rescaled by the elapsed time so two half-length frames smooth
/// exactly as much as one full frame.
#[derive(Clone, Debug)]
pub struct FrequencySmoother {
    alpha_per_frame: f32,
    last: Option<f32>,
}

impl FrequencySmoother {
    pub fn new(alpha_per_frame: f32) -> Self {
        Self {
            alpha_per_frame: alpha_per_frame.clamp(0.0, 1.0),
            last: None,
        }
    }

    /// Fold in a value observed `delta_frames` reference frames after the
    /// previous one. The first value initialises the filter unchanged.
    pub fn push(&mut self, value: f32, delta_frames: f32) -> f32 {
        let next = match self.last {
            None => value,
            Some(prev) => {
                let alpha = 1.0 - (1.0 - self.alpha_per_frame).powf(delta_frames.max(0.0));
                alpha * value + (1.0 - alpha) * prev
            }
        };
        self.last = Some(next);
        next
    }

    pub fn value(&self) -> Option<f32> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Stateful pitch tracker: detection plus smoothing history.
///
/// Typical usage, once per display frame:
/// - read the analyser's time-domain buffer into a reusable `Vec<f32>`
/// - call `estimate_pitch_dt(&buf, sample_rate, delta_frames)`
/// - render the `PitchReading`, resetting the display on `NoSignal`
#[derive(Clone, Debug)]
pub struct PitchTracker {
    pub config: TrackerConfig,
    smoother: FrequencySmoother,
    correlations: Vec<f64>,
}

impl Default for PitchTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl PitchTracker {
    pub fn new(config: TrackerConfig) -> Self {
        let smoother = FrequencySmoother::new(config.smoothing_alpha);
        Self {
            config,
            smoother,
            correlations: Vec::new(),
        }
    }

    /// Estimate the pitch of a frame arriving one reference frame after the previous one.
    pub fn estimate_pitch(&mut self, frame: &[f32], sample_rate_hz: f32) -> PitchReading {
        self.estimate_pitch_dt(frame, sample_rate_hz, 1.0)
    }

    /// Estimate the pitch of a frame arriving `delta_frames` reference frames
    /// after the previous one.
    pub fn estimate_pitch_dt(
        &mut self,
        frame: &[f32],
        sample_rate_hz: f32,
        delta_frames: f32,
    ) -> PitchReading {
        let level = rms(frame);
        if level.is_nan() || level < self.config.silence_rms {
            return PitchReading::NoSignal(NoSignal::Silence { rms: level });
        }
        let Some((lag, corr)) = self.detect_period(frame, sample_rate_hz) else {
            return PitchReading::NoSignal(NoSignal::NoPeriodicity);
        };
        let raw_hz = sample_rate_hz / lag as f32;
        let smoothed = self.smoother.push(raw_hz, delta_frames);
        log::trace!(
            "[tuner] lag={} corr={:.4} raw={:.2}Hz smoothed={:.2}Hz",
            lag,
            corr,
            raw_hz,
            smoothed
        );
        PitchReading::Pitch(freq_to_note(smoothed))
    }

    /// Winning lag and its correlation, without touching the smoothing state.
    pub fn detect_period(&mut self, frame: &[f32], sample_rate_hz: f32) -> Option<(usize, f64)> {
        let range = self.config.lag_range(sample_rate_hz, frame.len())?;
        // start at lag 1 so the zero-lag lobe can be recognised and skipped
        let last = (range.1 + 1).min(frame.len() - 1);
        correlate_into(frame, 1, last, &mut self.correlations);
        pick_period(
            &self.correlations,
            1,
            range,
            self.config.correlation_floor,
            self.config.peak_ratio,
        )
    }

    /// Forget smoothing history, e.g. when the input stream is stopped.
    pub fn reset(&mut self) {
        self.smoother.reset();
    }

    pub fn smoothed_hz(&self) -> Option<f32> {
        self.smoother.value()
    }
}
