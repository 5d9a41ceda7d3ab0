//! Autoplay log generation.
//!
//! Produces the key presses and releases that play a chart perfectly: every note is
//! pressed at its start and held until just past its last sub-slot.

use log::warn;
use piu_config::InputConfig;
use piu_model::{Chart, NoteInterval};

use crate::input::TimedKeyEvent;

/// Build a time-sorted autoplay log for `players` players of `chart`.
///
/// Notes in the same column whose press would land before the previous release are
/// merged into one continuous hold. Players without enough key characters are skipped.
pub fn create_autoplay_log(
    chart: &Chart,
    input: &InputConfig,
    players: usize,
    quantum_ms: i64,
) -> Vec<TimedKeyEvent> {
    let columns = chart.column_count();
    let mut log = Vec::new();

    for player in 0..players {
        let Some(keys) = input.player_keys(player, columns) else {
            warn!("autoplay: no keys for player {}, skipping", player);
            continue;
        };
        for (notes, &key) in chart.columns.iter().zip(&keys) {
            push_column(&mut log, notes, key, quantum_ms);
        }
    }

    log.sort_by_key(|e| e.time_ms);
    log
}

fn push_column(log: &mut Vec<TimedKeyEvent>, notes: &[(i64, i64)], key: char, quantum_ms: i64) {
    let mut held: Option<(i64, i64)> = None;
    for &(start, end) in notes {
        let release = NoteInterval::new(start, end, quantum_ms).slots_end_ms();
        held = match held {
            Some((press, until)) if start <= until => Some((press, until.max(release))),
            Some((press, until)) => {
                push_hold(log, key, press, until);
                Some((start, release))
            }
            None => Some((start, release)),
        };
    }
    if let Some((press, until)) = held {
        push_hold(log, key, press, until);
    }
}

fn push_hold(log: &mut Vec<TimedKeyEvent>, key: char, press: i64, release: i64) {
    log.push(TimedKeyEvent {
        time_ms: press,
        key,
        pressed: true,
    });
    log.push(TimedKeyEvent {
        time_ms: release,
        key,
        pressed: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_for(columns: Vec<Vec<(i64, i64)>>, players: usize) -> Vec<TimedKeyEvent> {
        create_autoplay_log(&Chart::new(columns), &InputConfig::default(), players, 20)
    }

    #[test]
    fn test_tap_is_held_through_both_slots() {
        let log = log_for(vec![vec![(1000, 1001)]], 1);
        let pairs: Vec<(i64, bool)> = log.iter().map(|e| (e.time_ms, e.pressed)).collect();
        assert_eq!(pairs, vec![(1000, true), (1040, false)]);
        assert!(log.iter().all(|e| e.key == 'a'));
    }

    #[test]
    fn test_hold_released_after_last_slot() {
        let log = log_for(vec![vec![(1000, 1100)]], 1);
        assert_eq!(log[1].time_ms, 1120);
        assert!(!log[1].pressed);
    }

    #[test]
    fn test_close_notes_merge_into_one_hold() {
        let log = log_for(vec![vec![(1000, 1001), (1030, 1031), (2000, 2001)]], 1);
        let pairs: Vec<(i64, bool)> = log.iter().map(|e| (e.time_ms, e.pressed)).collect();
        assert_eq!(
            pairs,
            vec![(1000, true), (1070, false), (2000, true), (2040, false)]
        );
    }

    #[test]
    fn test_events_are_sorted_across_columns_and_players() {
        let log = log_for(vec![vec![(2000, 2001)], vec![(1000, 1001)]], 2);
        assert!(log.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
        // player 1 owns 'c' and 'd'
        assert!(log.iter().any(|e| e.key == 'd' && e.time_ms == 1000));
        assert_eq!(log.len(), 8);
    }

    #[test]
    fn test_players_without_keys_are_skipped() {
        let input = InputConfig {
            key_chars: "ab".to_string(),
        };
        let chart = Chart::new(vec![vec![(1000, 1001)], vec![(1000, 1001)]]);
        let log = create_autoplay_log(&chart, &input, 3, 20);
        assert_eq!(log.len(), 4);
    }
}
