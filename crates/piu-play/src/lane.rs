//! Per-lane judge.
//!
//! A lane owns one column's timeline and a window `[start_index, end_index)` over it
//! holding the notes currently on screen. Every tick runs three phases in order:
//!
//! 1. Window advance: admit notes that scrolled into view, retire notes that scrolled
//!    past the top margin. Both indices only ever move forward.
//! 2. Hit resolution (only while the key is held): the earliest note in the window
//!    whose sub-slot at the current time can be marked is marked, and the scan stops.
//! 3. Miss resolution: the earliest note whose sub-slot at `elapsed - discrepancy` is
//!    still open is closed and reported missed, and the scan stops.
//!
//! Each phase reports at most one event per tick.

use log::{debug, trace};
use piu_config::JudgeConfig;
use piu_model::NoteTimeline;

use crate::arrow::ArrowKind;
use crate::render::{DrawRequest, RenderSample, Renderer, scroll_position};

/// Outcome of one lane tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneTick {
    pub hit: bool,
    pub missed: bool,
}

#[derive(Debug, Clone)]
pub struct Lane {
    key: char,
    kind: ArrowKind,
    timeline: NoteTimeline,
    /// First note still on screen
    start_index: usize,
    /// One past the last note admitted to the screen
    end_index: usize,
    /// Input latch, sampled once per tick
    pressed: bool,

    discrepancy_ms: i64,
    scroll_span_ms: i64,
    top_margin_ms: i64,

    // Geometry
    x: i32,
    height: i32,
}

impl Lane {
    pub fn new(key: char, kind: ArrowKind, timeline: NoteTimeline, judge: &JudgeConfig) -> Self {
        Self {
            key,
            kind,
            timeline,
            start_index: 0,
            end_index: 0,
            pressed: false,
            discrepancy_ms: judge.discrepancy_ms,
            scroll_span_ms: judge.scroll_span_ms.max(1),
            // Never retire a note before its last slot can be reported missed
            top_margin_ms: judge.top_margin_ms.min(judge.top_margin_limit()),
            x: 0,
            height: 0,
        }
    }

    /// Input identifier this lane responds to.
    pub fn key(&self) -> char {
        self.key
    }

    pub fn kind(&self) -> ArrowKind {
        self.kind
    }

    pub fn timeline(&self) -> &NoteTimeline {
        &self.timeline
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether every note has been retired from the window.
    pub fn is_finished(&self) -> bool {
        self.start_index >= self.timeline.len()
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Move the lane's draw origin and viewport height. Does not affect judgment.
    pub fn set_geometry(&mut self, x: i32, height: i32) {
        self.x = x;
        self.height = height;
    }

    /// Run all three judgment phases for `elapsed_ms`, then draw the window.
    pub fn advance(&mut self, elapsed_ms: i64, renderer: &mut dyn Renderer) -> LaneTick {
        let tick = self.update(elapsed_ms);
        self.draw(elapsed_ms, renderer);
        tick
    }

    /// Run the judgment phases without drawing.
    ///
    /// `elapsed_ms` must not decrease between calls; an earlier time is judged but the
    /// window never moves backwards.
    pub fn update(&mut self, elapsed_ms: i64) -> LaneTick {
        self.advance_window(elapsed_ms);
        let hit = self.pressed && self.resolve_hit(elapsed_ms);
        let missed = self.resolve_miss(elapsed_ms);
        LaneTick { hit, missed }
    }

    fn advance_window(&mut self, elapsed_ms: i64) {
        let (prev_start, prev_end) = (self.start_index, self.end_index);

        let horizon = elapsed_ms + self.scroll_span_ms;
        while self
            .timeline
            .start_ms(self.end_index)
            .is_some_and(|start| start < horizon)
        {
            self.end_index += 1;
        }

        let retire_before = elapsed_ms + self.top_margin_ms;
        while self.start_index < self.end_index
            && self
                .timeline
                .end_ms(self.start_index)
                .is_some_and(|end| end < retire_before)
        {
            self.start_index += 1;
        }

        if (prev_start, prev_end) != (self.start_index, self.end_index) {
            trace!(
                "lane '{}' window [{}, {}) -> [{}, {}) at {}ms",
                self.key, prev_start, prev_end, self.start_index, self.end_index, elapsed_ms
            );
        }
    }

    fn resolve_hit(&mut self, elapsed_ms: i64) -> bool {
        for index in self.start_index..self.end_index {
            if self
                .timeline
                .mark_hit(index, elapsed_ms, self.discrepancy_ms)
            {
                debug!("lane '{}' hit note {} at {}ms", self.key, index, elapsed_ms);
                return true;
            }
        }
        false
    }

    fn resolve_miss(&mut self, elapsed_ms: i64) -> bool {
        let judge_time = elapsed_ms - self.discrepancy_ms;
        for index in self.start_index..self.end_index {
            let Some(interval) = self.timeline.get(index) else {
                break;
            };
            if interval.start_ms() >= judge_time {
                break;
            }
            // A slot that no longer exists means the note is fully judged
            if interval.slot_index(judge_time).is_some() && !interval.is_hit(judge_time) {
                self.timeline.force_mark(index, judge_time);
                debug!("lane '{}' missed note {} at {}ms", self.key, index, elapsed_ms);
                return true;
            }
        }
        false
    }

    /// Sample times and positions of every note in the window, lazily.
    pub fn render_samples(&self, elapsed_ms: i64) -> impl Iterator<Item = RenderSample> + '_ {
        let height = self.height;
        let span = self.scroll_span_ms;
        self.timeline
            .window(self.start_index, self.end_index)
            .iter()
            .flat_map(move |interval| {
                interval.samples().map(move |time_ms| RenderSample {
                    time_ms,
                    y: scroll_position(time_ms, elapsed_ms, height, span),
                })
            })
    }

    pub fn draw(&self, elapsed_ms: i64, renderer: &mut dyn Renderer) {
        let symbol = self.kind.symbol();
        let color = self.kind.color();
        for sample in self.render_samples(elapsed_ms) {
            renderer.draw(DrawRequest {
                symbol,
                color,
                x: self.x,
                y: sample.y,
            });
        }
    }
}
