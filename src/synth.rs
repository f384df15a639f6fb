use crate::samples::{SampleKind, SampleSeries};

pub const WAVEFORM_DEPTH: f64 = 0.3;
pub const WAVEFORM_RATE: f64 = 0.01;
pub const SPECTRUM_FLOOR: f64 = 0.7;
pub const SPECTRUM_DEPTH: f64 = 0.3;
pub const SPECTRUM_RATE: f64 = 0.02;
pub const SPECTRUM_IDLE_DAMPING: f64 = 0.3;
pub const INDEX_PHASE: f64 = 0.1;
pub const PLAYHEAD_SPEED: f64 = 0.5;

/// Per-frame display values for `series` at `tick`.
///
/// Pure: the same `(series, tick, active)` always yields bit-identical output.
/// Ticks are exact in `f64` up to 2^53, so the phase never drifts in practice.
pub fn synthesize(series: &SampleSeries, tick: u64, active: bool) -> Vec<f64> {
    let t = tick as f64;
    let samples = series.as_slice();
    match (series.kind(), active) {
        (SampleKind::Waveform, false) => samples.to_vec(),
        (SampleKind::Waveform, true) => samples
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                s * (1.0 + WAVEFORM_DEPTH * (t * WAVEFORM_RATE + i as f64 * INDEX_PHASE).sin())
            })
            .collect(),
        (SampleKind::Spectrum, false) => {
            samples.iter().map(|&s| s * SPECTRUM_IDLE_DAMPING).collect()
        }
        (SampleKind::Spectrum, true) => samples
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                s * (SPECTRUM_FLOOR
                    + SPECTRUM_DEPTH * (t * SPECTRUM_RATE + i as f64 * INDEX_PHASE).sin())
            })
            .collect(),
    }
}

/// Horizontal playhead position, always in `[0, width)`.
pub fn playhead_x(tick: u64, width: f64) -> f64 {
    (tick as f64 * PLAYHEAD_SPEED).rem_euclid(width)
}
