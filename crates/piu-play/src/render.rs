//! Draw requests handed to an external renderer.
//!
//! The engine only computes where arrows go. Fonts, colors and the surface itself
//! belong to the renderer.

use crate::arrow::ArrowColor;

/// One arrow glyph to draw. `y` is measured down from the judge line at the top of the lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest {
    pub symbol: char,
    pub color: ArrowColor,
    pub x: i32,
    pub y: i32,
}

/// A sample time of an on-screen note and its vertical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSample {
    pub time_ms: i64,
    pub y: i32,
}

pub trait Renderer {
    fn draw(&mut self, request: DrawRequest);
}

/// Discards every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _request: DrawRequest) {}
}

/// Keeps every request, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub requests: Vec<DrawRequest>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, request: DrawRequest) {
        self.requests.push(request);
    }
}

/// Vertical position of a sample: 0 at the judge line, `height` one full scroll span later.
pub fn scroll_position(sample_ms: i64, elapsed_ms: i64, height: i32, scroll_span_ms: i64) -> i32 {
    let span = scroll_span_ms.max(1);
    (i64::from(height) * (sample_ms - elapsed_ms) / span) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_scales_with_height() {
        assert_eq!(scroll_position(1000, 1000, 1000, 2000), 0);
        assert_eq!(scroll_position(3000, 1000, 1000, 2000), 1000);
        assert_eq!(scroll_position(2000, 1000, 1000, 2000), 500);
        assert_eq!(scroll_position(2000, 1000, 500, 2000), 250);
    }

    #[test]
    fn position_goes_negative_past_judge_line() {
        assert_eq!(scroll_position(1000, 1200, 1000, 2000), -100);
    }

    #[test]
    fn zero_span_does_not_divide_by_zero() {
        assert_eq!(scroll_position(10, 0, 100, 0), 1000);
    }

    #[test]
    fn recording_renderer_keeps_order() {
        let mut r = RecordingRenderer::new();
        for y in [3, 1, 2] {
            r.draw(DrawRequest {
                symbol: 'x',
                color: ArrowColor::Red,
                x: 0,
                y,
            });
        }
        let ys: Vec<i32> = r.requests.iter().map(|d| d.y).collect();
        assert_eq!(ys, vec![3, 1, 2]);
        r.clear();
        assert!(r.requests.is_empty());
    }
}
