use crate::interval::NoteInterval;

/// The notes of one lane, ordered by start time.
///
/// Shape is fixed at construction; only each interval's hit record changes afterwards.
/// Callers must supply intervals sorted by `start` and non-overlapping
/// (`interval[i].end <= interval[i + 1].start`). This is not checked here: the chart
/// decoder rejects malformed data, and judging an unsorted timeline is undefined
/// (it will not panic, but window movement may skip notes).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteTimeline {
    intervals: Vec<NoteInterval>,
}

impl NoteTimeline {
    /// Build a timeline from `(start, end)` pairs in milliseconds.
    pub fn new(pairs: &[(i64, i64)], quantum_ms: i64) -> Self {
        let intervals = pairs
            .iter()
            .map(|&(start, end)| NoteInterval::new(start, end, quantum_ms))
            .collect();
        Self { intervals }
    }

    pub fn from_intervals(intervals: Vec<NoteInterval>) -> Self {
        Self { intervals }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NoteInterval> {
        self.intervals.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut NoteInterval> {
        self.intervals.get_mut(index)
    }

    pub fn start_ms(&self, index: usize) -> Option<i64> {
        self.get(index).map(NoteInterval::start_ms)
    }

    pub fn end_ms(&self, index: usize) -> Option<i64> {
        self.get(index).map(NoteInterval::end_ms)
    }

    pub fn duration_ms(&self, index: usize) -> Option<i64> {
        self.get(index).map(NoteInterval::duration_ms)
    }

    pub fn is_hold(&self, index: usize) -> bool {
        self.get(index).is_some_and(NoteInterval::is_hold)
    }

    /// Whether the sub-slot of interval `index` containing `time_ms` was hit.
    /// Returns `false` for an unknown index.
    pub fn query_hit(&self, index: usize, time_ms: i64) -> bool {
        self.get(index).is_some_and(|iv| iv.is_hit(time_ms))
    }

    /// Mark the sub-slot of interval `index` containing `time_ms` as hit.
    /// Returns `false` for an unknown index, see [`NoteInterval::hit`] otherwise.
    pub fn mark_hit(&mut self, index: usize, time_ms: i64, discrepancy_ms: i64) -> bool {
        self.get_mut(index)
            .is_some_and(|iv| iv.hit(time_ms, discrepancy_ms))
    }

    /// Close the sub-slot of interval `index` containing `time_ms` regardless of tolerance.
    pub fn force_mark(&mut self, index: usize, time_ms: i64) -> bool {
        self.get_mut(index).is_some_and(|iv| iv.force_hit(time_ms))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NoteInterval> {
        self.intervals.iter()
    }

    /// Intervals in `[start, end)`, clamped to the timeline length.
    pub fn window(&self, start: usize, end: usize) -> &[NoteInterval] {
        let end = end.min(self.intervals.len());
        let start = start.min(end);
        &self.intervals[start..end]
    }

    /// Total sub-slots across all intervals.
    pub fn slot_count(&self) -> usize {
        self.intervals.iter().map(NoteInterval::slot_count).sum()
    }

    /// End time of the last interval, or 0 for an empty timeline.
    pub fn last_end_ms(&self) -> i64 {
        self.intervals.last().map_or(0, NoteInterval::end_ms)
    }

    /// Clear every hit record.
    pub fn reset(&mut self) {
        for iv in &mut self.intervals {
            iv.reset();
        }
    }
}

impl<'a> IntoIterator for &'a NoteTimeline {
    type Item = &'a NoteInterval;
    type IntoIter = std::slice::Iter<'a, NoteInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
