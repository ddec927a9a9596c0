//! Puzzle engine binary for Timetile.
//!
//! Wires the reveal puzzle to a raster canvas, the hourly images, and a
//! line-based operator console on stdin, then renders frames until the
//! operator quits or the frame limit is reached.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `timetile-config.yaml` (or `TIMETILE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Shuffle the tile order for the configured grid
//! 4. Start the clock in live mode against the system time
//! 5. Preload all 24 hourly images
//! 6. Allocate the canvas
//! 7. Start the operator console on stdin
//! 8. Run the frame loop, writing periodic snapshots
//! 9. Log the result

mod console;
mod error;
mod skia;
mod snapshot;

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use timetile_core::clock::{ClockSource, SystemClock};
use timetile_core::config::{LoggingConfig, PuzzleConfig};
use timetile_core::fields::MemoryTimeFields;
use timetile_core::frame::PuzzleSession;
use timetile_core::images::HourlyImages;
use timetile_core::runner::{self, FrameSchedule};
use timetile_core::tile_order::TileOrder;
use timetile_types::LineStyle;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::skia::{PixmapCanvas, FileImageProvider};
use crate::snapshot::SnapshotWriter;

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "TIMETILE_CONFIG";

/// Configuration file used when `TIMETILE_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "timetile-config.yaml";

/// Queued operator commands before the console waits for the runner.
const COMMAND_QUEUE_DEPTH: usize = 32;

/// Application entry point for the puzzle engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the frame loop fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_path, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("timetile-engine starting");
    if from_file {
        info!(
            path = %config_path.display(),
            canvas_width = config.canvas.width,
            canvas_height = config.canvas.height,
            columns = config.grid.columns,
            rows = config.grid.rows,
            frames_per_second = config.render.frames_per_second,
            "Configuration loaded"
        );
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Shuffle the tile order.
    let (columns, rows) = (config.grid.columns, config.grid.rows);
    let order = match config.shuffle.seed {
        Some(seed) => TileOrder::generate(columns, rows, &mut SmallRng::seed_from_u64(seed)),
        None => TileOrder::generate(columns, rows, &mut rand::rng()),
    }
    .map_err(EngineError::from)?;
    info!(
        cells = order.len(),
        seeded = config.shuffle.seed.is_some(),
        "Tile order shuffled"
    );

    // 4. Start the clock.
    let clock = ClockSource::new(MemoryTimeFields::new(), SystemClock);
    info!(mode = %clock.mode(), time = ?clock.time_of_day(), "Clock started");

    // 5. Preload hourly images.
    let provider = FileImageProvider::new(config.images.clone());
    let images = HourlyImages::preload(&provider).map_err(EngineError::from)?;

    let mut session = PuzzleSession::new(
        order,
        clock,
        images,
        LineStyle::hairline(config.render.grid_line_width),
    );

    // 6. Allocate the canvas.
    let mut canvas = PixmapCanvas::new(config.canvas.width, config.canvas.height)?;

    // 7. Start the operator console.
    let (command_tx, mut command_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
    let _console = console::spawn_stdin(command_tx).map_err(EngineError::from)?;
    info!("Operator console ready (pause, resume, set <field> <value>, quit)");

    // 8. Run the frame loop.
    let schedule =
        FrameSchedule::from_rate(config.render.frames_per_second, config.run.max_frames);
    let mut snapshots = SnapshotWriter::new(
        config.output.snapshot_path.clone(),
        config.output.snapshot_every_frames,
    );
    let result = runner::run_puzzle(
        &mut session,
        &mut canvas,
        &mut command_rx,
        schedule,
        &mut snapshots,
    )
    .await
    .map_err(EngineError::from)?;

    // 9. Log results.
    runner::log_run_end(&result);

    info!(
        end_reason = ?result.end_reason,
        total_frames = result.total_frames,
        snapshots_written = snapshots.written(),
        "timetile-engine shutdown complete"
    );

    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load the puzzle configuration.
///
/// Reads `TIMETILE_CONFIG` if set, otherwise `timetile-config.yaml` in the
/// working directory. A missing file yields the defaults. Returns the
/// config, the path that was consulted, and whether the file existed.
fn load_config() -> Result<(PuzzleConfig, PathBuf, bool), EngineError> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        let config = PuzzleConfig::from_file(&config_path)?;
        Ok((config, config_path, true))
    } else {
        let config = PuzzleConfig::parse("")?;
        Ok((config, config_path, false))
    }
}
