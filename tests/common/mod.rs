#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use studio_viz::surface::{DrawOp, Fill, Point, Rect, Stroke};
use studio_viz::{Extent, Surface, SurfaceError};

pub type SharedLog = Rc<RefCell<Recording>>;

#[derive(Debug, Default)]
pub struct Recording {
    pub frames: Vec<Vec<DrawOp>>,
    pub detached: bool,
}

/// Surface that keeps every painted frame. The log outlives the surface, so
/// tests can still inspect it after the engine has been unmounted.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    log: SharedLog,
}

impl RecordingSurface {
    pub fn new() -> (Self, SharedLog) {
        let surface = Self::default();
        let log = surface.log.clone();
        (surface, log)
    }
}

impl Surface for RecordingSurface {
    fn extent(&self) -> Result<Extent, SurfaceError> {
        if self.log.borrow().detached {
            Err(SurfaceError::Detached)
        } else {
            Ok(Extent::LOGICAL)
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        let mut log = self.log.borrow_mut();
        if rect == Extent::LOGICAL.rect() {
            log.frames.push(Vec::new());
        } else if let Some(frame) = log.frames.last_mut() {
            frame.push(DrawOp::Clear(rect));
        }
    }

    fn stroke_path(&mut self, points: &[Point], stroke: &Stroke) {
        if let Some(frame) = self.log.borrow_mut().frames.last_mut() {
            frame.push(DrawOp::StrokePath {
                points: points.to_vec(),
                stroke: stroke.clone(),
            });
        }
    }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        if let Some(frame) = self.log.borrow_mut().frames.last_mut() {
            frame.push(DrawOp::FillRect {
                rect,
                fill: fill.clone(),
            });
        }
    }
}

/// Unglowed bar rectangles of one frame, in draw order.
pub fn bars(frame: &[DrawOp]) -> Vec<Rect> {
    frame
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillRect { rect, fill } if fill.glow.is_none() => Some(*rect),
            _ => None,
        })
        .collect()
}

pub fn glow_count(frame: &[DrawOp]) -> usize {
    frame
        .iter()
        .filter(|op| matches!(op, DrawOp::FillRect { fill, .. } if fill.glow.is_some()))
        .count()
}

/// The last stroked path of a frame: the playhead when playing, else the waveform.
pub fn last_path(frame: &[DrawOp]) -> Vec<Point> {
    frame
        .iter()
        .rev()
        .find_map(|op| match op {
            DrawOp::StrokePath { points, .. } => Some(points.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

pub fn stroke_count(frame: &[DrawOp]) -> usize {
    frame
        .iter()
        .filter(|op| matches!(op, DrawOp::StrokePath { .. }))
        .count()
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
