//! Rasterizes a [`DisplayList`] onto a ratatui canvas.
//!
//! Surface coordinates grow downward while the canvas grows upward, so every
//! `y` is flipped against the logical height. Stroke widths are not
//! representable in a terminal and are dropped.

use crate::surface::{DisplayList, DrawOp, Extent, Fill, Point, Rect, Rgb, Stroke};
use ratatui::{
    Frame,
    layout::Rect as Area,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Context, Line, Rectangle},
    },
};

/// Horizontal spacing of the vertical lines that fill a bar.
const FILL_STEP: f64 = 4.0;
/// Height of one gradient band inside a bar.
const FILL_BAND: f64 = 25.0;

pub fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

pub fn draw_panel(f: &mut Frame, area: Area, title: &str, list: &DisplayList, active: bool) {
    let Extent { width, height } = list.logical_extent();
    let border = if active { Color::Magenta } else { Color::DarkGray };

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for op in list.ops() {
                match op {
                    // Painters only issue full clears, which the list has already applied.
                    DrawOp::Clear(_) => {}
                    DrawOp::StrokePath { points, stroke } => {
                        stroke_path(ctx, points, stroke, height)
                    }
                    DrawOp::FillRect { rect, fill } => fill_rect(ctx, rect, fill, height),
                }
            }
        });

    f.render_widget(canvas, area);
}

fn stroke_path(ctx: &mut Context, points: &[Point], stroke: &Stroke, height: f64) {
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        ctx.draw(&Line {
            x1: a.x,
            y1: height - a.y,
            x2: b.x,
            y2: height - b.y,
            color: to_color(stroke.paint.color_at_point(mid)),
        });
    }
}

fn fill_rect(ctx: &mut Context, rect: &Rect, fill: &Fill, height: f64) {
    let bottom = height - (rect.y + rect.height);
    let top = height - rect.y;

    if let Some(glow) = fill.glow {
        let spread = glow.blur / 5.0;
        ctx.draw(&Rectangle {
            x: rect.x - spread,
            y: bottom,
            width: rect.width + spread * 2.0,
            height: rect.height + spread,
            color: to_color(glow.color),
        });
        return;
    }

    let mut x = rect.x;
    while x < rect.x + rect.width {
        let mut y0 = bottom;
        while y0 < top {
            let y1 = (y0 + FILL_BAND).min(top);
            let sample = Point::new(x, height - (y0 + y1) / 2.0);
            ctx.draw(&Line {
                x1: x,
                y1: y0,
                x2: x,
                y2: y1,
                color: to_color(fill.paint.color_at_point(sample)),
            });
            y0 = y1;
        }
        x += FILL_STEP;
    }
}
