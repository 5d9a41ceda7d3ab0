use std::iter::StepBy;
use std::ops::Range;

/// A single note: the span of time a lane must be held, in milliseconds from song start.
///
/// `end == start + 1` marks a tap; anything else is a hold. The span is divided into
/// sub-slots of `quantum_ms` and each sub-slot is judged on its own, so a hold is hit
/// (or missed) once per slot rather than once per note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInterval {
    start_ms: i64,
    end_ms: i64,
    quantum_ms: i64,
    /// One flag per sub-slot. Never resized after construction.
    hit: Vec<bool>,
}

/// Lazy sample times of an interval: `start, start + quantum, ...` up to (excluding) `end`.
pub type Samples = StepBy<Range<i64>>;

impl NoteInterval {
    /// Create an interval with `ceil((end - start) / quantum) + 1` unhit sub-slots.
    ///
    /// A non-positive quantum is treated as 1ms.
    pub fn new(start_ms: i64, end_ms: i64, quantum_ms: i64) -> Self {
        let quantum_ms = quantum_ms.max(1);
        let span = (end_ms - start_ms).max(0);
        let slots = (span + quantum_ms - 1) / quantum_ms + 1;
        Self {
            start_ms,
            end_ms,
            quantum_ms,
            hit: vec![false; slots as usize],
        }
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    pub fn quantum_ms(&self) -> i64 {
        self.quantum_ms
    }

    /// Whether this interval is a hold rather than a single tap.
    pub fn is_hold(&self) -> bool {
        self.end_ms != self.start_ms + 1
    }

    /// Number of judged sub-slots.
    pub fn slot_count(&self) -> usize {
        self.hit.len()
    }

    /// Time just past the last sub-slot. Input held until here covers every slot.
    pub fn slots_end_ms(&self) -> i64 {
        self.start_ms + self.hit.len() as i64 * self.quantum_ms
    }

    /// Sub-slot containing `time_ms`, or `None` when it falls outside the record.
    ///
    /// Division truncates toward zero, so times less than one quantum before `start`
    /// still land in slot 0.
    pub fn slot_index(&self, time_ms: i64) -> Option<usize> {
        let index = (time_ms - self.start_ms) / self.quantum_ms;
        if index < 0 || index as usize >= self.hit.len() {
            return None;
        }
        Some(index as usize)
    }

    /// Tolerance check: `time_ms` lies within `discrepancy_ms` of `[start, end]`.
    pub fn accepts(&self, time_ms: i64, discrepancy_ms: i64) -> bool {
        time_ms >= self.start_ms - discrepancy_ms && time_ms <= self.end_ms + discrepancy_ms
    }

    /// Whether the sub-slot containing `time_ms` has been hit. Out-of-range times report `false`.
    pub fn is_hit(&self, time_ms: i64) -> bool {
        self.slot_index(time_ms).is_some_and(|i| self.hit[i])
    }

    /// Mark the sub-slot containing `time_ms` as hit.
    ///
    /// Returns `true` only when the slot exists, `time_ms` passes the tolerance check and
    /// the slot was not already hit. A repeated call for the same slot returns `false`
    /// and changes nothing.
    pub fn hit(&mut self, time_ms: i64, discrepancy_ms: i64) -> bool {
        let Some(index) = self.slot_index(time_ms) else {
            return false;
        };
        if !self.accepts(time_ms, discrepancy_ms) || self.hit[index] {
            return false;
        }
        self.hit[index] = true;
        true
    }

    /// Close the sub-slot containing `time_ms` without a tolerance check, so it can
    /// never be judged again. Returns `false` if the slot does not exist or was already closed.
    pub fn force_hit(&mut self, time_ms: i64) -> bool {
        match self.slot_index(time_ms) {
            Some(index) if !self.hit[index] => {
                self.hit[index] = true;
                true
            }
            _ => false,
        }
    }

    /// Number of sub-slots hit so far.
    pub fn hit_count(&self) -> usize {
        self.hit.iter().filter(|&&h| h).count()
    }

    /// Sample times used to draw this interval, regenerated on every call.
    pub fn samples(&self) -> Samples {
        (self.start_ms..self.end_ms).step_by(self.quantum_ms as usize)
    }

    /// Clear every sub-slot.
    pub fn reset(&mut self) {
        self.hit.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q: i64 = 20;
    const D: i64 = 150;

    #[test]
    fn tap_and_hold_classification() {
        assert!(!NoteInterval::new(1000, 1001, Q).is_hold());
        assert!(NoteInterval::new(1000, 1100, Q).is_hold());
        assert!(NoteInterval::new(1000, 1000, Q).is_hold());
    }

    #[test]
    fn slot_count_rounds_span_up() {
        assert_eq!(NoteInterval::new(1000, 1001, Q).slot_count(), 2);
        assert_eq!(NoteInterval::new(1000, 1100, Q).slot_count(), 6);
        assert_eq!(NoteInterval::new(1000, 1110, Q).slot_count(), 7);
        assert_eq!(NoteInterval::new(1000, 1000, Q).slot_count(), 1);
    }

    #[test]
    fn non_positive_quantum_is_clamped() {
        let iv = NoteInterval::new(0, 5, 0);
        assert_eq!(iv.quantum_ms(), 1);
        assert_eq!(iv.slot_count(), 6);
    }

    #[test]
    fn tap_hit_succeeds_once() {
        let mut tap = NoteInterval::new(1000, 1001, Q);
        assert!(tap.hit(1000, D));
        assert!(!tap.hit(1000, D));
        assert!(tap.is_hit(1000));
        assert_eq!(tap.hit_count(), 1);
    }

    #[test]
    fn repeated_hit_in_same_slot_is_a_no_op() {
        let mut hold = NoteInterval::new(1000, 1100, Q);
        assert!(hold.hit(1045, D));
        assert!(!hold.hit(1059, D));
        assert!(!hold.hit(1040, D));
        assert_eq!(hold.hit_count(), 1);
    }

    #[test]
    fn hold_slots_are_judged_independently() {
        let mut hold = NoteInterval::new(1000, 1100, Q);
        for t in (1000..=1100).step_by(Q as usize) {
            assert!(hold.hit(t, D), "slot at {t} should accept");
        }
        assert_eq!(hold.hit_count(), 6);
    }

    #[test]
    fn slot_index_truncates_toward_zero() {
        let iv = NoteInterval::new(1000, 1100, Q);
        assert_eq!(iv.slot_index(981), Some(0));
        assert_eq!(iv.slot_index(980), None);
        assert_eq!(iv.slot_index(1119), Some(5));
        assert_eq!(iv.slot_index(1120), None);
    }

    #[test]
    fn out_of_range_queries_report_false() {
        let mut iv = NoteInterval::new(1000, 1001, Q);
        assert!(!iv.is_hit(-5000));
        assert!(!iv.is_hit(i64::MAX / 2));
        assert!(!iv.hit(900, D));
        assert!(!iv.hit(1200, D));
        assert_eq!(iv.hit_count(), 0);
    }

    #[test]
    fn tolerance_requires_both_bounds() {
        let iv = NoteInterval::new(1000, 1100, Q);
        assert!(iv.accepts(850, D));
        assert!(iv.accepts(1250, D));
        assert!(!iv.accepts(849, D));
        assert!(!iv.accepts(1251, D));
    }

    #[test]
    fn tolerance_rejects_slot_outside_window() {
        // The slot exists but the time is too early for a zero tolerance.
        let mut iv = NoteInterval::new(1000, 1100, Q);
        assert!(!iv.hit(990, 0));
        assert!(iv.hit(990, 10));
    }

    #[test]
    fn force_hit_ignores_tolerance() {
        let mut iv = NoteInterval::new(1000, 1001, Q);
        assert!(!iv.hit(1030, 0));
        assert!(iv.force_hit(1030));
        assert!(!iv.force_hit(1030));
        assert!(!iv.force_hit(1040));
        assert!(iv.is_hit(1030));
    }

    #[test]
    fn hold_samples_exclude_end() {
        let iv = NoteInterval::new(1000, 1100, Q);
        let samples: Vec<i64> = iv.samples().collect();
        assert_eq!(samples, vec![1000, 1020, 1040, 1060, 1080]);
        // restartable
        assert_eq!(iv.samples().count(), 5);
    }

    #[test]
    fn tap_yields_single_sample() {
        let iv = NoteInterval::new(1000, 1001, Q);
        assert_eq!(iv.samples().collect::<Vec<_>>(), vec![1000]);
    }

    #[test]
    fn slots_end_covers_every_slot() {
        let iv = NoteInterval::new(1000, 1001, Q);
        assert_eq!(iv.slots_end_ms(), 1040);
        assert_eq!(iv.slot_index(iv.slots_end_ms() - 1), Some(1));
        assert_eq!(iv.slot_index(iv.slots_end_ms()), None);
    }

    #[test]
    fn reset_clears_hits() {
        let mut iv = NoteInterval::new(1000, 1100, Q);
        iv.hit(1000, D);
        iv.hit(1020, D);
        iv.reset();
        assert_eq!(iv.hit_count(), 0);
        assert!(iv.hit(1000, D));
    }
}
