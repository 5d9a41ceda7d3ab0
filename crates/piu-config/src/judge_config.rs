use log::warn;
use serde::{Deserialize, Serialize};

pub const HOLD_QUANTUM_MIN: i64 = 1;
pub const HOLD_QUANTUM_MAX: i64 = 1000;
pub const DISCREPANCY_MIN: i64 = 0;
pub const DISCREPANCY_MAX: i64 = 1000;
pub const SCROLL_SPAN_MIN: i64 = 100;
pub const SCROLL_SPAN_MAX: i64 = 20000;
pub const TICK_PERIOD_MIN: i64 = 1;
pub const TICK_PERIOD_MAX: i64 = 1000;

/// Timing constants shared by every lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct JudgeConfig {
    /// Length of one hold sub-slot, ms. Also the spacing of drawn hold samples.
    pub hold_quantum_ms: i64,
    /// Maximum distance from a note's span that still counts as a hit, ms.
    pub discrepancy_ms: i64,
    /// Time a note takes to scroll the full viewport height, ms.
    pub scroll_span_ms: i64,
    /// Offset added to the clock when retiring notes off the top of the lane, ms.
    /// Negative values keep a note judgeable after its end passes the judge line.
    pub top_margin_ms: i64,
    /// Clock driver period, ms.
    pub tick_period_ms: i64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            hold_quantum_ms: 20,
            discrepancy_ms: 150,
            scroll_span_ms: 2000,
            top_margin_ms: -200,
            tick_period_ms: 20,
        }
    }
}

impl JudgeConfig {
    /// Latest allowed top margin.
    ///
    /// A note's last sub-slot can extend up to two quanta past its end and is only
    /// reported missed `discrepancy_ms` after that, so retirement must wait at least as long.
    pub fn top_margin_limit(&self) -> i64 {
        -(self.discrepancy_ms + 2 * self.hold_quantum_ms)
    }

    /// Whether every hold sub-slot contains at least one tick.
    pub fn ticks_cover_every_slot(&self) -> bool {
        self.tick_period_ms > 0 && self.hold_quantum_ms % self.tick_period_ms == 0
    }

    pub fn validate(&mut self) {
        self.hold_quantum_ms = self.hold_quantum_ms.clamp(HOLD_QUANTUM_MIN, HOLD_QUANTUM_MAX);
        self.discrepancy_ms = self.discrepancy_ms.clamp(DISCREPANCY_MIN, DISCREPANCY_MAX);
        self.scroll_span_ms = self.scroll_span_ms.clamp(SCROLL_SPAN_MIN, SCROLL_SPAN_MAX);
        self.tick_period_ms = self.tick_period_ms.clamp(TICK_PERIOD_MIN, TICK_PERIOD_MAX);
        let limit = self.top_margin_limit();
        if self.top_margin_ms > limit {
            warn!(
                "topMarginMs {} would retire notes before their miss is reported, using {}",
                self.top_margin_ms, limit
            );
            self.top_margin_ms = limit;
        }
        if !self.ticks_cover_every_slot() {
            warn!(
                "tickPeriodMs {} does not divide holdQuantumMs {}, some hold slots will never be judged",
                self.tick_period_ms, self.hold_quantum_ms
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let c = JudgeConfig::default();
        assert_eq!(c.hold_quantum_ms, 20);
        assert_eq!(c.discrepancy_ms, 150);
        assert_eq!(c.scroll_span_ms, 2000);
        assert_eq!(c.top_margin_ms, -200);
        assert_eq!(c.tick_period_ms, 20);
    }

    #[test]
    fn test_defaults_already_valid() {
        let mut c = JudgeConfig::default();
        c.validate();
        assert_eq!(c, JudgeConfig::default());
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut c = JudgeConfig {
            hold_quantum_ms: 0,
            discrepancy_ms: 5000,
            scroll_span_ms: 10,
            top_margin_ms: 0,
            tick_period_ms: -3,
        };
        c.validate();
        assert_eq!(c.hold_quantum_ms, HOLD_QUANTUM_MIN);
        assert_eq!(c.discrepancy_ms, DISCREPANCY_MAX);
        assert_eq!(c.scroll_span_ms, SCROLL_SPAN_MIN);
        assert_eq!(c.tick_period_ms, TICK_PERIOD_MIN);
        assert_eq!(c.top_margin_ms, -(DISCREPANCY_MAX + 2 * HOLD_QUANTUM_MIN));
    }

    #[test]
    fn test_positive_margin_pulled_back() {
        let mut c = JudgeConfig {
            top_margin_ms: 100,
            ..Default::default()
        };
        c.validate();
        assert_eq!(c.top_margin_ms, -190);
    }

    #[test]
    fn test_tick_period_must_divide_quantum() {
        let mut c = JudgeConfig::default();
        assert!(c.ticks_cover_every_slot());
        c.tick_period_ms = 10;
        assert!(c.ticks_cover_every_slot());
        c.tick_period_ms = 30;
        c.validate();
        // only warned about, left as configured
        assert_eq!(c.tick_period_ms, 30);
        assert!(!c.ticks_cover_every_slot());
    }

    #[test]
    fn test_serde_camel_case() {
        let json = serde_json::to_string(&JudgeConfig::default()).unwrap();
        assert!(json.contains("\"holdQuantumMs\":20"));
        assert!(json.contains("\"topMarginMs\":-200"));
        let partial: JudgeConfig = serde_json::from_str(r#"{"discrepancyMs":90}"#).unwrap();
        assert_eq!(partial.discrepancy_ms, 90);
        assert_eq!(partial.scroll_span_ms, 2000);
    }
}
