use anyhow::{Result, bail};
use log::{debug, info};
use piu_config::{Config, InputConfig};
use piu_model::Chart;

use crate::event::{JudgeEvent, JudgeListener};
use crate::input::KeyEvent;
use crate::render::Renderer;
use crate::session::Session;

/// Every player on screen, side by side, all playing the same chart.
#[derive(Debug, Clone)]
pub struct Stage {
    sessions: Vec<Session>,
    input: InputConfig,
    columns: usize,
}

impl Stage {
    /// Build one session per player. Each player judges an independent copy of the
    /// chart and owns the next `column_count` characters of the key string.
    pub fn new(chart: &Chart, players: usize, config: &Config) -> Result<Self> {
        let columns = chart.column_count();
        if players == 0 {
            bail!("a stage needs at least one player");
        }
        if columns == 0 {
            bail!("chart has no columns");
        }
        let max_players = config.input.max_players(columns);
        if players > max_players {
            bail!(
                "{} players with {} columns need {} key characters, only {} configured",
                players,
                columns,
                players * columns,
                config.input.key_chars.chars().count()
            );
        }

        let mut sessions = Vec::with_capacity(players);
        for player in 0..players {
            let Some(keys) = config.input.player_keys(player, columns) else {
                bail!("no keys left for player {}", player);
            };
            debug!("player {} keys: {}", player, keys.iter().collect::<String>());
            let timelines = chart.build_timelines(config.judge.hold_quantum_ms);
            sessions.push(Session::from_timelines(
                timelines,
                &keys,
                &config.judge,
                &config.layout,
            ));
        }
        info!(
            "stage ready: {} players, {} columns, {} notes each",
            players,
            columns,
            chart.note_count()
        );

        let mut stage = Self {
            sessions,
            input: config.input.clone(),
            columns,
        };
        stage.resize(config.layout.window_width, config.layout.window_height);
        Ok(stage)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, player: usize) -> Option<&Session> {
        self.sessions.get(player)
    }

    pub fn player_count(&self) -> usize {
        self.sessions.len()
    }

    /// Columns per player.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn is_finished(&self) -> bool {
        self.sessions.iter().all(Session::is_finished)
    }

    /// Press `key` for whichever player owns it. Returns `false` for unbound keys.
    pub fn key_down(&mut self, key: char) -> bool {
        match self.owner(key) {
            Some(session) => session.key_down(key),
            None => false,
        }
    }

    /// Release `key` for whichever player owns it. Returns `false` for unbound keys.
    pub fn key_up(&mut self, key: char) -> bool {
        match self.owner(key) {
            Some(session) => session.key_up(key),
            None => false,
        }
    }

    pub fn handle(&mut self, event: KeyEvent) -> bool {
        if event.pressed {
            self.key_down(event.key)
        } else {
            self.key_up(event.key)
        }
    }

    fn owner(&mut self, key: char) -> Option<&mut Session> {
        let player = self.input.player_for_key(key, self.columns)?;
        self.sessions.get_mut(player)
    }

    /// Split `width` evenly between players and lay each one out in its share.
    pub fn resize(&mut self, width: i32, height: i32) {
        let players = self.sessions.len().max(1) as i32;
        let share = width / players;
        for (i, session) in self.sessions.iter_mut().enumerate() {
            session.resize(share, height, share * i as i32);
        }
    }

    /// Judge and draw every player at `elapsed_ms`, reporting judgments to `listener`.
    pub fn tick(
        &mut self,
        elapsed_ms: i64,
        renderer: &mut dyn Renderer,
        listener: &mut dyn JudgeListener,
    ) {
        for (player, session) in self.sessions.iter_mut().enumerate() {
            for event in session.advance(elapsed_ms, renderer) {
                match event {
                    JudgeEvent::Hit { lane } => listener.note_hit(player, lane),
                    JudgeEvent::Missed { lane } => listener.note_missed(player, lane),
                }
            }
        }
    }
}
