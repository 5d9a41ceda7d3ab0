use log::debug;
use piu_config::{JudgeConfig, LayoutConfig};
use piu_model::NoteTimeline;

use crate::arrow::ArrowKind;
use crate::event::JudgeEvent;
use crate::lane::Lane;
use crate::render::Renderer;

/// All lanes of one player.
///
/// Routes key input to the lane bound to that key and runs every lane once per tick.
/// Lanes never interact, so the order they run in does not matter.
#[derive(Debug, Clone)]
pub struct Session {
    lanes: Vec<Lane>,
    layout: LayoutConfig,
}

impl Session {
    pub fn new(lanes: Vec<Lane>, layout: &LayoutConfig) -> Self {
        Self {
            lanes,
            layout: layout.clone(),
        }
    }

    /// One lane per timeline, bound to `keys` in column order. Extra timelines or
    /// keys beyond the shorter of the two are ignored.
    pub fn from_timelines(
        timelines: Vec<NoteTimeline>,
        keys: &[char],
        judge: &JudgeConfig,
        layout: &LayoutConfig,
    ) -> Self {
        let lanes = timelines
            .into_iter()
            .zip(keys)
            .enumerate()
            .map(|(column, (timeline, &key))| {
                Lane::new(key, ArrowKind::for_column(column), timeline, judge)
            })
            .collect();
        Self::new(lanes, layout)
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Whether every lane has retired all of its notes.
    pub fn is_finished(&self) -> bool {
        self.lanes.iter().all(Lane::is_finished)
    }

    /// Latch the lane bound to `key`. Returns `false` if no lane uses that key.
    pub fn key_down(&mut self, key: char) -> bool {
        match self.lanes.iter_mut().find(|l| l.key() == key) {
            Some(lane) => {
                lane.press();
                true
            }
            None => false,
        }
    }

    /// Release the lane bound to `key`. Returns `false` if no lane uses that key.
    pub fn key_up(&mut self, key: char) -> bool {
        match self.lanes.iter_mut().find(|l| l.key() == key) {
            Some(lane) => {
                lane.release();
                true
            }
            None => false,
        }
    }

    /// Judge and draw every lane at `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: i64, renderer: &mut dyn Renderer) -> Vec<JudgeEvent> {
        let events = self.update(elapsed_ms);
        self.draw(elapsed_ms, renderer);
        events
    }

    /// Judge every lane at `elapsed_ms` without drawing.
    pub fn update(&mut self, elapsed_ms: i64) -> Vec<JudgeEvent> {
        let mut events = Vec::new();
        for (lane, l) in self.lanes.iter_mut().enumerate() {
            let tick = l.update(elapsed_ms);
            if tick.hit {
                events.push(JudgeEvent::Hit { lane });
            }
            if tick.missed {
                events.push(JudgeEvent::Missed { lane });
            }
        }
        events
    }

    pub fn draw(&self, elapsed_ms: i64, renderer: &mut dyn Renderer) {
        for lane in &self.lanes {
            lane.draw(elapsed_ms, renderer);
        }
    }

    /// Lay the lanes out left to right inside `width`, starting at `origin_x`.
    ///
    /// The block of columns is centered in `width` when it fits and left-aligned
    /// otherwise. Every lane gets the full `height` as its viewport.
    pub fn resize(&mut self, width: i32, height: i32, origin_x: i32) {
        let block = self.layout.block_width(self.lanes.len());
        let stride = self.layout.column_stride();
        let mut x = origin_x + ((width - block) / 2).max(0);
        for lane in &mut self.lanes {
            lane.set_geometry(x, height);
            x += stride;
        }
        debug!(
            "session resized: {} lanes from x={} height={}",
            self.lanes.len(),
            origin_x,
            height
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    fn session(columns: &[&[(i64, i64)]]) -> Session {
        let judge = JudgeConfig::default();
        let timelines = columns
            .iter()
            .map(|pairs| NoteTimeline::new(pairs, judge.hold_quantum_ms))
            .collect();
        Session::from_timelines(
            timelines,
            &['a', 'b', 'c', 'd', 'e'],
            &judge,
            &LayoutConfig::default(),
        )
    }

    #[test]
    fn lanes_follow_pad_order() {
        let s = session(&[&[], &[], &[]]);
        assert_eq!(s.lane_count(), 3);
        assert_eq!(s.lanes()[0].kind(), ArrowKind::DownLeft);
        assert_eq!(s.lanes()[2].kind(), ArrowKind::Center);
        assert_eq!(s.lanes()[1].key(), 'b');
    }

    #[test]
    fn key_routing() {
        let mut s = session(&[&[], &[]]);
        assert!(s.key_down('b'));
        assert!(!s.lanes()[0].is_pressed());
        assert!(s.lanes()[1].is_pressed());
        assert!(s.key_up('b'));
        assert!(!s.lanes()[1].is_pressed());
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut s = session(&[&[]]);
        assert!(!s.key_down('z'));
        assert!(!s.key_up('z'));
        assert!(!s.lanes()[0].is_pressed());
    }

    #[test]
    fn events_are_tagged_with_lane() {
        let mut s = session(&[&[(1000, 1001)], &[(1000, 1001)]]);
        s.update(0);
        s.key_down('b');
        assert_eq!(s.update(1000), vec![JudgeEvent::Hit { lane: 1 }]);
        // lane 1 already hit slot 0, so only lane 0 reports a miss here
        let events = s.update(1160);
        assert_eq!(events, vec![JudgeEvent::Missed { lane: 0 }]);
    }

    #[test]
    fn lanes_are_judged_independently() {
        let mut s = session(&[&[(1000, 1001)], &[(1000, 1001)]]);
        s.update(0);
        s.key_down('a');
        s.key_down('b');
        let events = s.update(1000);
        assert_eq!(
            events,
            vec![JudgeEvent::Hit { lane: 0 }, JudgeEvent::Hit { lane: 1 }]
        );
    }

    #[test]
    fn resize_centers_columns() {
        let mut s = session(&[&[], &[], &[], &[], &[]]);
        // 5 * 100 + 4 * 20 = 580 wide, centered in 780 starting at 100
        s.resize(780, 900, 100);
        let xs: Vec<i32> = s.lanes().iter().map(Lane::x).collect();
        assert_eq!(xs, vec![200, 320, 440, 560, 680]);
        assert!(s.lanes().iter().all(|l| l.height() == 900));
    }

    #[test]
    fn resize_left_aligns_when_too_narrow() {
        let mut s = session(&[&[], &[]]);
        s.resize(50, 400, 10);
        let xs: Vec<i32> = s.lanes().iter().map(Lane::x).collect();
        assert_eq!(xs, vec![10, 130]);
    }

    #[test]
    fn advance_draws_every_lane() {
        let mut s = session(&[&[(1000, 1001)], &[(1000, 1100)]]);
        s.resize(220, 1000, 0);
        let mut r = RecordingRenderer::new();
        s.advance(0, &mut r);
        // 1 tap sample + 5 hold samples
        assert_eq!(r.requests.len(), 6);
        assert_eq!(r.requests[0].x, 0);
        assert!(r.requests[1..].iter().all(|d| d.x == 120));
    }

    #[test]
    fn finished_once_all_notes_retire() {
        let mut s = session(&[&[(1000, 1001)], &[]]);
        s.update(0);
        assert!(!s.is_finished());
        s.update(5000);
        assert!(s.is_finished());
    }
}
