//! Animated waveform and spectrum displays driven by a cooperative frame loop.
//!
//! Each [`VisualizationEngine`] owns its sample series, animation clock and
//! drawing surface. A host [`FrameScheduler`] decides when frames run; the
//! engine only reacts to the active flag handed to it by its parent view.

pub mod engine;
pub mod samples;
pub mod scheduler;
pub mod surface;
pub mod synth;
pub mod tui;
pub mod visualizers;

pub use engine::{AnimationClock, FrameStats, LoopState, VisualizationEngine};
pub use samples::{
    BackendSource, FixedSource, RandomSource, SampleKind, SampleSeries, SampleSource,
};
pub use scheduler::{FrameHandle, FrameScheduler, RefreshLoop};
pub use surface::{DisplayList, Extent, Surface, SurfaceError};
pub use synth::{playhead_x, synthesize};
pub use visualizers::{SpectrumBars, Visualizer, WaveformVisualizer};
