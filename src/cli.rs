use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use studio_viz::{BackendSource, RandomSource, SampleSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Both,
    Waveform,
    Spectrum,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Both => View::Waveform,
            View::Waveform => View::Spectrum,
            View::Spectrum => View::Both,
        }
    }

    pub fn shows_waveform(self) -> bool {
        matches!(self, View::Both | View::Waveform)
    }

    pub fn shows_spectrum(self) -> bool {
        matches!(self, View::Both | View::Spectrum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// Sine texture with a random envelope, falling spectrum
    Random,
    /// Payload shapes of the mock analysis endpoints
    Backend,
}

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "studio-viz")]
#[command(about = "Animated waveform and spectrum panels for the composer", long_about = None)]
pub struct Args {
    /// Panels to show
    #[arg(long, value_enum, default_value_t = View::Both)]
    pub view: View,

    /// Start with the transport playing
    #[arg(long, default_value_t = false)]
    pub play: bool,

    /// Seed for the sample generator (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sample generator
    #[arg(long, value_enum, default_value_t = Source::Random)]
    pub source: Source,

    /// Refresh interval in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 16)]
    pub frame_ms: u64,

    /// Write logs here (RUST_LOG filters, default info)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn sample_source(&self) -> Box<dyn SampleSource> {
        match (self.source, self.seed) {
            (Source::Random, Some(seed)) => Box::new(RandomSource::seeded(seed)),
            (Source::Random, None) => Box::new(RandomSource::new()),
            (Source::Backend, Some(seed)) => Box::new(BackendSource::seeded(seed)),
            (Source::Backend, None) => Box::new(BackendSource::new()),
        }
    }
}
