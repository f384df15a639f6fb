//! Mount/run/teardown lifecycle for one visualization instance.
//!
//! The engine is `Idle` when nothing is scheduled and `Running` while exactly
//! one frame request is outstanding with its [`FrameScheduler`]. Dropping the
//! engine revokes that request, so no frame can run against a torn-down
//! surface.

use crate::samples::{SampleKind, SampleSeries, SampleSource};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::Surface;
use crate::synth::synthesize;
use crate::visualizers::{self, Visualizer};
use log::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Frames run since mount. Only the engine advances it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationClock(u64);

impl AnimationClock {
    pub fn tick(self) -> u64 {
        self.0
    }

    fn advance(&mut self) {
        self.0 += 1;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub painted: u64,
    pub skipped: u64,
}

pub struct VisualizationEngine<S: Surface, F: FrameScheduler> {
    visualizer: Box<dyn Visualizer>,
    series: SampleSeries,
    clock: AnimationClock,
    active: bool,
    pending: Option<FrameHandle>,
    surface: S,
    scheduler: F,
    stats: FrameStats,
}

impl<S: Surface, F: FrameScheduler> VisualizationEngine<S, F> {
    /// Generates the series, paints the static frame at tick 0 and starts
    /// the loop when `active` is set.
    pub fn mount(
        kind: SampleKind,
        source: &mut dyn SampleSource,
        surface: S,
        active: bool,
        scheduler: F,
    ) -> Self {
        let series = source.generate(kind.default_len(), kind);
        Self::with_series(series, surface, active, scheduler)
    }

    pub fn with_series(series: SampleSeries, surface: S, active: bool, scheduler: F) -> Self {
        let mut engine = Self {
            visualizer: visualizers::for_kind(series.kind()),
            series,
            clock: AnimationClock::default(),
            active,
            pending: None,
            surface,
            scheduler,
            stats: FrameStats::default(),
        };
        debug_assert_eq!(engine.visualizer.kind(), engine.series.kind());
        info!(
            "{} mounted with {} samples (active={})",
            engine.visualizer.name(),
            engine.series.len(),
            active
        );
        engine.paint();
        if active {
            engine.schedule();
        }
        engine
    }

    /// Reacts to the parent's active flag. Turning it off lets the pending
    /// frame run and paint the inactive look before the loop goes idle.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        if active && self.pending.is_none() {
            info!(
                "{} running from tick {}",
                self.visualizer.name(),
                self.clock.tick()
            );
            self.schedule();
        }
    }

    /// Runs the frame for `handle` if it is this engine's outstanding
    /// request. Returns whether a frame ran.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        self.clock.advance();
        self.paint();
        if self.active {
            self.schedule();
        } else {
            info!(
                "{} idle at tick {}",
                self.visualizer.name(),
                self.clock.tick()
            );
        }
        true
    }

    /// Tears the instance down, revoking any pending frame.
    pub fn unmount(self) {
        drop(self);
    }

    pub fn kind(&self) -> SampleKind {
        self.series.kind()
    }

    pub fn state(&self) -> LoopState {
        if self.pending.is_some() {
            LoopState::Running
        } else {
            LoopState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn clock(&self) -> AnimationClock {
        self.clock
    }

    pub fn series(&self) -> &SampleSeries {
        &self.series
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    fn schedule(&mut self) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(self.scheduler.request_frame());
    }

    fn paint(&mut self) {
        let tick = self.clock.tick();
        let display = synthesize(&self.series, tick, self.active);
        match self
            .visualizer
            .paint(&mut self.surface, &display, self.active, tick)
        {
            Ok(()) => {
                self.stats.painted += 1;
                trace!("{} painted tick {}", self.visualizer.name(), tick);
            }
            Err(e) => {
                self.stats.skipped += 1;
                debug!("{} skipped tick {}: {}", self.visualizer.name(), tick, e);
            }
        }
    }
}

impl<S: Surface, F: FrameScheduler> Drop for VisualizationEngine<S, F> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        info!(
            "{} unmounted at tick {}",
            self.visualizer.name(),
            self.clock.tick()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::FixedSource;
    use crate::scheduler::RefreshLoop;
    use crate::surface::{DisplayList, Extent};

    type TestEngine = VisualizationEngine<DisplayList, RefreshLoop>;

    fn spectrum_engine(active: bool) -> (TestEngine, RefreshLoop) {
        let host = RefreshLoop::new();
        let mut source = FixedSource::new(vec![60.0; 64]);
        let engine = VisualizationEngine::mount(
            SampleKind::Spectrum,
            &mut source,
            DisplayList::default(),
            active,
            host.clone(),
        );
        (engine, host)
    }

    fn run(engine: &mut TestEngine, host: &RefreshLoop) -> usize {
        let fired = host.advance();
        fired.into_iter().filter(|h| engine.on_frame(*h)).count()
    }

    #[test]
    fn mount_active_schedules_one_frame() {
        let (engine, host) = spectrum_engine(true);
        assert_eq!(engine.state(), LoopState::Running);
        assert_eq!(engine.stats().painted, 1);
        assert_eq!(engine.clock().tick(), 0);
        assert_eq!(host.pending_len(), 1);
    }

    #[test]
    fn reactivating_continues_the_clock() {
        let (mut engine, host) = spectrum_engine(true);
        run(&mut engine, &host);
        run(&mut engine, &host);
        engine.set_active(false);
        run(&mut engine, &host);
        assert_eq!(engine.state(), LoopState::Idle);
        assert_eq!(engine.clock().tick(), 3);

        engine.set_active(true);
        assert_eq!(engine.state(), LoopState::Running);
        run(&mut engine, &host);
        assert_eq!(engine.clock().tick(), 4);
    }

    #[test]
    fn toggling_while_pending_never_double_schedules() {
        let (mut engine, host) = spectrum_engine(true);
        engine.set_active(false);
        engine.set_active(true);
        engine.set_active(true);
        assert_eq!(host.pending_len(), 1);
        assert_eq!(run(&mut engine, &host), 1);
        assert_eq!(host.pending_len(), 1);
    }

    #[test]
    fn stale_handles_are_ignored() {
        let (mut engine, host) = spectrum_engine(true);
        let fired = host.advance();
        assert!(engine.on_frame(fired[0]));
        assert!(!engine.on_frame(fired[0]));
        assert_eq!(engine.clock().tick(), 1);
    }

    #[test]
    fn detached_surface_skips_but_keeps_running() {
        let host = RefreshLoop::new();
        let mut source = FixedSource::new(vec![0.5; 100]);
        let mut engine = VisualizationEngine::mount(
            SampleKind::Waveform,
            &mut source,
            DisplayList::detached(Extent::LOGICAL),
            true,
            host.clone(),
        );
        run(&mut engine, &host);
        assert_eq!(engine.stats().painted, 0);
        assert_eq!(engine.stats().skipped, 2);
        assert_eq!(engine.state(), LoopState::Running);

        engine.surface_mut().attach();
        run(&mut engine, &host);
        assert_eq!(engine.stats().painted, 1);
        assert_eq!(engine.stats().skipped, 2);
        assert!(!engine.surface().ops().is_empty());
    }

    #[test]
    fn drop_revokes_pending_frame() {
        let (engine, host) = spectrum_engine(true);
        engine.unmount();
        assert_eq!(host.pending_len(), 0);
        assert!(host.advance().is_empty());
    }
}
