use super::{BLUE, CENTER_LINE, GREEN, GRID, PLAYHEAD, VIOLET, Visualizer};
use crate::samples::SampleKind;
use crate::surface::{Extent, LinearGradient, Paint, Point, Stroke, Surface, SurfaceError};
use crate::synth::playhead_x;

const GRID_COLUMN: f64 = 50.0;
const GRID_ROW: f64 = 25.0;
const AMPLITUDE_SCALE: f64 = 0.4;

pub struct WaveformVisualizer;

impl WaveformVisualizer {
    fn paint_grid(&self, surface: &mut dyn Surface, Extent { width, height }: Extent) {
        let grid = Stroke {
            paint: Paint::Solid(GRID),
            width: 1.0,
        };
        for x in steps(GRID_COLUMN, width) {
            surface.stroke_path(&[Point::new(x, 0.0), Point::new(x, height)], &grid);
        }
        for y in steps(GRID_ROW, height) {
            surface.stroke_path(&[Point::new(0.0, y), Point::new(width, y)], &grid);
        }

        let center = Stroke {
            paint: Paint::Solid(CENTER_LINE),
            width: 1.0,
        };
        let mid_y = height / 2.0;
        surface.stroke_path(&[Point::new(0.0, mid_y), Point::new(width, mid_y)], &center);
    }
}

impl Visualizer for WaveformVisualizer {
    fn name(&self) -> &str {
        "Waveform"
    }

    fn kind(&self) -> SampleKind {
        SampleKind::Waveform
    }

    fn paint(
        &self,
        surface: &mut dyn Surface,
        display: &[f64],
        active: bool,
        tick: u64,
    ) -> Result<(), SurfaceError> {
        let extent = surface.extent()?;
        let Extent { width, height } = extent;
        surface.clear_rect(extent.rect());
        self.paint_grid(surface, extent);

        if display.is_empty() {
            return Ok(());
        }

        let step_x = width / display.len() as f64;
        let mid_y = height / 2.0;
        let points: Vec<Point> = display
            .iter()
            .enumerate()
            .map(|(i, &amp)| Point::new(i as f64 * step_x, mid_y + amp * height * AMPLITUDE_SCALE))
            .collect();
        let stroke = Stroke {
            paint: Paint::Linear(LinearGradient::new(
                Point::new(0.0, 0.0),
                Point::new(0.0, height),
                [VIOLET, BLUE, GREEN],
            )),
            width: 2.0,
        };
        surface.stroke_path(&points, &stroke);

        if active {
            let x = playhead_x(tick, width);
            let playhead = Stroke {
                paint: Paint::Solid(PLAYHEAD),
                width: 3.0,
            };
            surface.stroke_path(&[Point::new(x, 0.0), Point::new(x, height)], &playhead);
        }
        Ok(())
    }
}

/// `0, step, 2*step, ...` strictly below `limit`.
fn steps(step: f64, limit: f64) -> impl Iterator<Item = f64> {
    (0..)
        .map(move |k| k as f64 * step)
        .take_while(move |&v| v < limit)
}
