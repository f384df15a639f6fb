//! The 2D drawing target the visualizers paint onto.
//!
//! Coordinates are logical units with the origin at the top-left and `y`
//! growing downward. [`DisplayList`] is the in-memory implementation: it keeps
//! the operations of the last painted frame so a front-end can rasterize them.

use thiserror::Error;

pub const LOGICAL_WIDTH: f64 = 800.0;
pub const LOGICAL_HEIGHT: f64 = 200.0;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("surface is not attached")]
    Detached,
    #[error("surface has zero extent")]
    ZeroExtent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const LOGICAL: Extent = Extent {
        width: LOGICAL_WIDTH,
        height: LOGICAL_HEIGHT,
    };

    pub fn rect(self) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Self {
        Rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgb,
}

/// Three-stop gradient along the axis `start -> end`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: [ColorStop; 3],
}

impl LinearGradient {
    pub fn new(start: Point, end: Point, colors: [Rgb; 3]) -> Self {
        Self {
            start,
            end,
            stops: [
                ColorStop {
                    offset: 0.0,
                    color: colors[0],
                },
                ColorStop {
                    offset: 0.5,
                    color: colors[1],
                },
                ColorStop {
                    offset: 1.0,
                    color: colors[2],
                },
            ],
        }
    }

    /// Colour at position `t` along the axis, clamped to `[0, 1]`.
    pub fn color_at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let [a, b, c] = &self.stops;
        if t <= a.offset {
            a.color
        } else if t <= b.offset {
            a.color.lerp(b.color, (t - a.offset) / (b.offset - a.offset))
        } else if t <= c.offset {
            b.color.lerp(c.color, (t - b.offset) / (c.offset - b.offset))
        } else {
            c.color
        }
    }

    /// Colour at `p`, projected onto the gradient axis.
    pub fn color_at_point(&self, p: Point) -> Rgb {
        let (dx, dy) = (self.end.x - self.start.x, self.end.y - self.start.y);
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return self.stops[0].color;
        }
        let t = ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len2;
        self.color_at(t)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgb),
    Linear(LinearGradient),
}

impl Paint {
    pub fn color_at_point(&self, p: Point) -> Rgb {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear(g) => g.color_at_point(p),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
}

/// Shadow pass drawn around a filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgb,
    pub blur: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub paint: Paint,
    pub glow: Option<Glow>,
}

pub trait Surface {
    /// Fails when there is nothing to draw onto; the caller skips the frame.
    fn extent(&self) -> Result<Extent, SurfaceError>;
    fn clear_rect(&mut self, rect: Rect);
    fn stroke_path(&mut self, points: &[Point], stroke: &Stroke);
    fn fill_rect(&mut self, rect: Rect, fill: &Fill);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rect),
    StrokePath { points: Vec<Point>, stroke: Stroke },
    FillRect { rect: Rect, fill: Fill },
}

/// Retained surface: holds the draw operations since the last full clear.
#[derive(Debug, Clone)]
pub struct DisplayList {
    extent: Extent,
    attached: bool,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            attached: true,
            ops: Vec::new(),
        }
    }

    /// A surface with no target yet; every frame is skipped until [`attach`](Self::attach).
    pub fn detached(extent: Extent) -> Self {
        Self {
            attached: false,
            ..Self::new(extent)
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn logical_extent(&self) -> Extent {
        self.extent
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new(Extent::LOGICAL)
    }
}

impl Surface for DisplayList {
    fn extent(&self) -> Result<Extent, SurfaceError> {
        if !self.attached {
            return Err(SurfaceError::Detached);
        }
        if self.extent.width <= 0.0 || self.extent.height <= 0.0 {
            return Err(SurfaceError::ZeroExtent);
        }
        Ok(self.extent)
    }

    fn clear_rect(&mut self, rect: Rect) {
        if rect.contains_rect(&self.extent.rect()) {
            self.ops.clear();
        } else {
            self.ops.push(DrawOp::Clear(rect));
        }
    }

    fn stroke_path(&mut self, points: &[Point], stroke: &Stroke) {
        if points.is_empty() {
            return;
        }
        self.ops.push(DrawOp::StrokePath {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        self.ops.push(DrawOp::FillRect {
            rect,
            fill: fill.clone(),
        });
    }
}
