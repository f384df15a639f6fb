use crate::samples::SampleKind;
use crate::surface::{Rgb, Surface, SurfaceError};

pub mod bars;
pub mod waveform;

pub use bars::SpectrumBars;
pub use waveform::WaveformVisualizer;

pub const VIOLET: Rgb = Rgb::hex(0x8B5CF6);
pub const BLUE: Rgb = Rgb::hex(0x3B82F6);
pub const GREEN: Rgb = Rgb::hex(0x10B981);
pub const GRID: Rgb = Rgb::hex(0x374151);
pub const CENTER_LINE: Rgb = Rgb::hex(0x6B7280);
pub const PLAYHEAD: Rgb = Rgb::hex(0xEF4444);

/// Turns one frame of display values into draw calls. Painting always starts
/// from a cleared surface and never touches the sample series or the clock.
pub trait Visualizer: Send + Sync {
    fn name(&self) -> &str;
    fn kind(&self) -> SampleKind;
    fn paint(
        &self,
        surface: &mut dyn Surface,
        display: &[f64],
        active: bool,
        tick: u64,
    ) -> Result<(), SurfaceError>;
}

pub fn for_kind(kind: SampleKind) -> Box<dyn Visualizer> {
    match kind {
        SampleKind::Waveform => Box::new(WaveformVisualizer),
        SampleKind::Spectrum => Box::new(SpectrumBars),
    }
}
