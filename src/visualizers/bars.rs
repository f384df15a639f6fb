use super::{BLUE, GREEN, VIOLET, Visualizer};
use crate::samples::SampleKind;
use crate::surface::{
    Extent, Fill, Glow, LinearGradient, Paint, Point, Rect, Surface, SurfaceError,
};

/// Display values are magnitudes on a 0..100 scale.
const MAGNITUDE_RANGE: f64 = 100.0;
const GLOW_THRESHOLD: f64 = 50.0;
const GLOW_BLUR: f64 = 10.0;
const BAR_GUTTER: f64 = 1.0;

pub struct SpectrumBars;

impl Visualizer for SpectrumBars {
    fn name(&self) -> &str {
        "Spectrum"
    }

    fn kind(&self) -> SampleKind {
        SampleKind::Spectrum
    }

    fn paint(
        &self,
        surface: &mut dyn Surface,
        display: &[f64],
        active: bool,
        _tick: u64,
    ) -> Result<(), SurfaceError> {
        let extent = surface.extent()?;
        let Extent { width, height } = extent;
        surface.clear_rect(extent.rect());

        if display.is_empty() {
            return Ok(());
        }

        let bar_width = width / display.len() as f64;
        let paint = Paint::Linear(LinearGradient::new(
            Point::new(0.0, height),
            Point::new(0.0, 0.0),
            [GREEN, BLUE, VIOLET],
        ));
        let fill = Fill {
            paint: paint.clone(),
            glow: None,
        };
        let glow = Fill {
            paint,
            glow: Some(Glow {
                color: VIOLET,
                blur: GLOW_BLUR,
            }),
        };

        for (i, &magnitude) in display.iter().enumerate() {
            let bar_height = magnitude / MAGNITUDE_RANGE * height;
            let rect = Rect {
                x: i as f64 * bar_width,
                y: height - bar_height,
                width: (bar_width - BAR_GUTTER).max(0.0),
                height: bar_height,
            };
            surface.fill_rect(rect, &fill);
            if active && magnitude > GLOW_THRESHOLD {
                surface.fill_rect(rect, &glow);
            }
        }
        Ok(())
    }
}
