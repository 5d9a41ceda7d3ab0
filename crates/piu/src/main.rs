// piu: headless step chart player.
//
// Loads a chart, builds a multi-player stage and plays it with autoplay, a
// recorded input script or no input at all, then logs a per-player summary.

mod simulation;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use log::{info, warn};
use piu_config::Config;
use piu_model::ChartDecoder;
use piu_play::{InputScript, Stage, TimedKeyEvent, create_autoplay_log, input};

#[derive(Parser, Debug)]
#[command(name = "piu", about = "Headless step chart judge")]
struct Args {
    /// Path to a chart file.
    #[arg(long, conflicts_with = "song")]
    chart: Option<PathBuf>,

    /// Song name, resolved to <songs-dir>/<song>/<song>NoteData.txt.
    #[arg(long)]
    song: Option<String>,

    /// Directory holding one folder per song.
    #[arg(long, default_value = "songs", env = "PIU_SONGS_DIR")]
    songs_dir: PathBuf,

    /// Path to config JSON file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Number of players sharing the chart.
    #[arg(long, default_value_t = 1)]
    players: usize,

    /// Play every note perfectly.
    #[arg(long, conflicts_with = "input")]
    autoplay: bool,

    /// JSON input script of timed key events.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Pace ticks at wall-clock speed and feed input from a separate thread.
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("piu starting");

    // Load config from file, falling back to defaults if not found
    let config = match Config::read(&args.config) {
        Ok(c) => {
            info!("Loaded config from {}", args.config.display());
            c
        }
        Err(e) => {
            info!(
                "Config {} not loaded ({}), using defaults",
                args.config.display(),
                e
            );
            Config::default()
        }
    };

    let chart_path = match (&args.chart, &args.song) {
        (Some(path), _) => path.clone(),
        (None, Some(song)) => ChartDecoder::song_path(&args.songs_dir, song),
        (None, None) => bail!("either --chart or --song is required"),
    };
    info!("Loading chart {}", chart_path.display());
    let chart = ChartDecoder::decode(&chart_path)?;

    let mut stage = Stage::new(&chart, args.players, &config)?;

    let events: Vec<TimedKeyEvent> = if args.autoplay {
        create_autoplay_log(
            &chart,
            &config.input,
            args.players,
            config.judge.hold_quantum_ms,
        )
    } else if let Some(path) = &args.input {
        input::read_input_script(path)?
    } else {
        warn!("no input source given, every note will be missed");
        Vec::new()
    };

    let period = config.judge.tick_period_ms;
    let tally = if args.realtime {
        simulation::run_realtime(&mut stage, events, period)
    } else {
        simulation::run_offline(&mut stage, InputScript::new(events), period)
    };
    tally.log_summary();
    Ok(())
}
