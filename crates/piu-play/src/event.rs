/// Judgment produced by a lane during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JudgeEvent {
    /// A sub-slot of a note in `lane` was hit.
    Hit { lane: usize },
    /// A sub-slot of a note in `lane` passed its tolerance without being hit.
    Missed { lane: usize },
}

impl JudgeEvent {
    pub fn lane(self) -> usize {
        match self {
            Self::Hit { lane } | Self::Missed { lane } => lane,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Receives judgments from a [`Stage`](crate::Stage). Scoring and combo live behind this.
pub trait JudgeListener {
    fn note_hit(&mut self, player: usize, lane: usize);
    fn note_missed(&mut self, player: usize, lane: usize);
}

/// Collects `(player, event)` pairs in the order they were reported.
impl JudgeListener for Vec<(usize, JudgeEvent)> {
    fn note_hit(&mut self, player: usize, lane: usize) {
        self.push((player, JudgeEvent::Hit { lane }));
    }

    fn note_missed(&mut self, player: usize, lane: usize) {
        self.push((player, JudgeEvent::Missed { lane }));
    }
}
