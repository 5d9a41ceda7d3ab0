// Offline and real-time play loops driving a Stage from a tick clock.

use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use log::{debug, info, warn};
use piu_play::{
    DrawRequest, InputQueue, InputScript, JudgeListener, Pacer, Renderer, Stage, TickClock,
    TimedKeyEvent,
};

/// Per-player hit and miss counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub hits: Vec<usize>,
    pub misses: Vec<usize>,
}

impl Tally {
    pub fn new(players: usize) -> Self {
        Self {
            hits: vec![0; players],
            misses: vec![0; players],
        }
    }

    pub fn log_summary(&self) {
        for (player, (hits, misses)) in self.hits.iter().zip(&self.misses).enumerate() {
            let total = hits + misses;
            let rate = if total == 0 {
                0.0
            } else {
                *hits as f64 * 100.0 / total as f64
            };
            info!(
                "player {}: {} hit, {} missed ({:.1}%)",
                player + 1,
                hits,
                misses,
                rate
            );
        }
    }
}

impl JudgeListener for Tally {
    fn note_hit(&mut self, player: usize, lane: usize) {
        debug!("player {} lane {}: hit", player + 1, lane);
        if let Some(n) = self.hits.get_mut(player) {
            *n += 1;
        }
    }

    fn note_missed(&mut self, player: usize, lane: usize) {
        debug!("player {} lane {}: miss", player + 1, lane);
        if let Some(n) = self.misses.get_mut(player) {
            *n += 1;
        }
    }
}

/// Headless renderer that only counts requests.
#[derive(Debug, Default)]
pub struct CountingRenderer {
    pub requests: u64,
}

impl Renderer for CountingRenderer {
    fn draw(&mut self, _request: DrawRequest) {
        self.requests += 1;
    }
}

/// Run `stage` to completion as fast as possible, replaying `script` against game time.
pub fn run_offline(stage: &mut Stage, mut script: InputScript, tick_period_ms: i64) -> Tally {
    let mut tally = Tally::new(stage.player_count());
    let mut renderer = CountingRenderer::default();
    let mut ticks = 0u64;
    for elapsed in TickClock::new(tick_period_ms) {
        for event in script.due(elapsed) {
            stage.handle(event.event());
        }
        stage.tick(elapsed, &mut renderer, &mut tally);
        ticks += 1;
        if stage.is_finished() {
            info!("finished at {}ms after {} ticks", elapsed, ticks);
            break;
        }
    }
    debug!("{} draw requests", renderer.requests);
    tally
}

/// Run `stage` at wall-clock speed. Scripted input is fed from a separate thread
/// through an [`InputQueue`], the way a keyboard handler would deliver it.
pub fn run_realtime(stage: &mut Stage, events: Vec<TimedKeyEvent>, tick_period_ms: i64) -> Tally {
    let queue = InputQueue::new();
    let sender = queue.sender();
    // Dropping `stop_tx` wakes the feeder out of its wait
    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
    let start = Instant::now();
    let feeder = std::thread::spawn(move || {
        for e in events {
            let due = start + Duration::from_millis(e.time_ms.max(0) as u64);
            let wait = due.saturating_duration_since(Instant::now());
            match stop_rx.recv_timeout(wait) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
            if !sender.send(e.event()) {
                break;
            }
        }
    });

    let mut tally = Tally::new(stage.player_count());
    let mut renderer = CountingRenderer::default();
    let mut clock = TickClock::new(tick_period_ms);
    let mut pacer = Pacer::new(tick_period_ms);
    let mut late = 0u64;
    loop {
        queue.drain_into(stage);
        let elapsed = clock.next_tick();
        stage.tick(elapsed, &mut renderer, &mut tally);
        if stage.is_finished() {
            info!("finished at {}ms, {} late ticks", elapsed, late);
            break;
        }
        if pacer.wait() {
            late += 1;
        }
    }

    // Stop the feeder if the chart ended before its last event
    drop(stop_tx);
    drop(queue);
    if feeder.join().is_err() {
        warn!("input thread panicked");
    }
    tally
}
