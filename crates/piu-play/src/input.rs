//! Key input: live events, recorded scripts and a cross-thread queue.

use std::path::Path;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// A key going down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: char,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(key: char) -> Self {
        Self { key, pressed: true }
    }

    pub fn up(key: char) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// A key event scheduled at a song time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedKeyEvent {
    pub time_ms: i64,
    pub key: char,
    pub pressed: bool,
}

impl TimedKeyEvent {
    pub fn event(&self) -> KeyEvent {
        KeyEvent {
            key: self.key,
            pressed: self.pressed,
        }
    }
}

/// Load a JSON array of timed key events, sorted by time. Events at the same time keep
/// their file order.
pub fn read_input_script(path: &Path) -> Result<Vec<TimedKeyEvent>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input script {}", path.display()))?;
    let mut events: Vec<TimedKeyEvent> = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse input script {}", path.display()))?;
    events.sort_by_key(|e| e.time_ms);
    debug!("loaded {} input events from {}", events.len(), path.display());
    Ok(events)
}

pub fn write_input_script(path: &Path, events: &[TimedKeyEvent]) -> Result<()> {
    let json = serde_json::to_string_pretty(events)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Replays a time-sorted event list against the tick clock.
#[derive(Debug, Clone)]
pub struct InputScript {
    events: Vec<TimedKeyEvent>,
    next: usize,
}

impl InputScript {
    pub fn new(events: Vec<TimedKeyEvent>) -> Self {
        Self { events, next: 0 }
    }

    /// Events with `time_ms <= elapsed_ms` not yet handed out.
    pub fn due(&mut self, elapsed_ms: i64) -> &[TimedKeyEvent] {
        let from = self.next;
        while self
            .events
            .get(self.next)
            .is_some_and(|e| e.time_ms <= elapsed_ms)
        {
            self.next += 1;
        }
        &self.events[from..self.next]
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.events.len()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Key events from another thread, applied to a stage between ticks.
pub struct InputQueue {
    tx: Sender<KeyEvent>,
    rx: Receiver<KeyEvent>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Apply every pending event to `stage`. Returns how many were applied.
    pub fn drain_into(&self, stage: &mut Stage) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if !stage.handle(event) {
                        debug!("ignoring unbound key {:?}", event.key);
                    }
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                // Unreachable while `self.tx` is alive
                Err(TryRecvError::Disconnected) => {
                    warn!("input channel disconnected");
                    break;
                }
            }
        }
        applied
    }
}

/// Sending half of an [`InputQueue`]. Cheap to clone and move to an input thread.
#[derive(Clone)]
pub struct InputSender {
    tx: Sender<KeyEvent>,
}

impl InputSender {
    /// Returns `false` once the queue has been dropped.
    pub fn send(&self, event: KeyEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn key_down(&self, key: char) -> bool {
        self.send(KeyEvent::down(key))
    }

    pub fn key_up(&self, key: char) -> bool {
        self.send(KeyEvent::up(key))
    }
}
