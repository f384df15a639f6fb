use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use std::fmt;

/// Which display a series feeds. Decides both the length and the shape of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    Waveform,
    Spectrum,
}

impl SampleKind {
    pub fn default_len(self) -> usize {
        match self {
            SampleKind::Waveform => 100,
            SampleKind::Spectrum => 64,
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleKind::Waveform => write!(f, "waveform"),
            SampleKind::Spectrum => write!(f, "spectrum"),
        }
    }
}

/// Fixed-length magnitudes generated once per mount.
///
/// The values live in a boxed slice, so a series can only be replaced as a
/// whole and never observed at a partial length.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    kind: SampleKind,
    values: Box<[f64]>,
}

impl SampleSeries {
    pub fn new(kind: SampleKind, values: Vec<f64>) -> Self {
        Self {
            kind,
            values: values.into_boxed_slice(),
        }
    }

    pub fn kind(&self) -> SampleKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Provider seam for sample series. Swap in a real analysis backend here.
pub trait SampleSource {
    fn generate(&mut self, n: usize, kind: SampleKind) -> SampleSeries;
}

/// Placeholder texture: a sine with a random envelope for waveforms, and a
/// random magnitude falling off toward high bins for spectra.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn unit(&mut self) -> f64 {
        StandardUniform.sample(&mut self.rng)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for RandomSource {
    fn generate(&mut self, n: usize, kind: SampleKind) -> SampleSeries {
        let values = (0..n)
            .map(|i| {
                let r = self.unit();
                match kind {
                    SampleKind::Waveform => (i as f64 * 0.1).sin() * r * 0.8,
                    SampleKind::Spectrum => r * 100.0 * (1.0 - i as f64 / n as f64),
                }
            })
            .collect();
        SampleSeries::new(kind, values)
    }
}

/// Same payload shapes as the mock analysis endpoints: a signed waveform
/// bounded by `0.5 + 0.5 * |sin|` and a linearly decaying spectrum.
pub struct BackendSource {
    rng: StdRng,
}

impl BackendSource {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for BackendSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for BackendSource {
    fn generate(&mut self, n: usize, kind: SampleKind) -> SampleSeries {
        let values = (0..n)
            .map(|i| {
                let r: f64 = StandardUniform.sample(&mut self.rng);
                match kind {
                    SampleKind::Waveform => {
                        (r * 2.0 - 1.0) * (0.5 + 0.5 * (i as f64 * 0.1).sin().abs())
                    }
                    SampleKind::Spectrum => r * 100.0 * (1.0 - i as f64 / n as f64),
                }
            })
            .collect();
        SampleSeries::new(kind, values)
    }
}

/// Replays the same values on every call, truncated or zero-padded to `n`.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    values: Vec<f64>,
}

impl FixedSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl SampleSource for FixedSource {
    fn generate(&mut self, n: usize, kind: SampleKind) -> SampleSeries {
        let mut values: Vec<f64> = self.values.iter().copied().take(n).collect();
        values.resize(n, 0.0);
        SampleSeries::new(kind, values)
    }
}
