//! Frame loop runner with operator controls.
//!
//! [`run_puzzle`] drives [`render_frame`] on a fixed interval until a
//! termination condition is met:
//!
//! - **Operator quit**: a `quit` command arrives on the command channel
//! - **Bounded run**: `max_frames` frames have been rendered
//!
//! Operator commands are drained from the channel before each frame, so
//! edits and mode changes always land between frames. A closed channel
//! simply means no further commands; the puzzle keeps running.
//!
//! [`render_frame`]: crate::frame::render_frame

use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::canvas::Canvas;
use crate::clock::WallClock;
use crate::fields::TimeFieldPort;
use crate::frame::{self, FrameSummary, PuzzleSession};
use crate::operator::{CommandOutcome, OperatorCommand};

/// Errors that can occur while setting up a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The frame interval was zero.
    #[error("frame interval must be greater than zero")]
    ZeroInterval,
}

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndReason {
    /// An operator issued a quit command.
    OperatorQuit,
    /// Reached the configured `max_frames` limit.
    MaxFramesReached,
}

/// Pacing and bounds for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSchedule {
    /// Time between two frames.
    pub interval: Duration,
    /// Stop after this many frames (0 = unlimited).
    pub max_frames: u64,
}

impl FrameSchedule {
    /// Schedule for `frames_per_second` with an optional frame limit.
    pub fn from_rate(frames_per_second: u32, max_frames: u64) -> Self {
        let fps = u64::from(frames_per_second.max(1));
        Self {
            interval: Duration::from_millis(1000_u64.checked_div(fps).unwrap_or(1000).max(1)),
            max_frames,
        }
    }

    /// Whether `frames` rendered frames exhausts the limit.
    pub const fn limit_reached(&self, frames: u64) -> bool {
        self.max_frames > 0 && frames >= self.max_frames
    }
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// The reason the run ended.
    pub end_reason: RunEndReason,
    /// The last frame summary, if any frame was rendered.
    pub final_summary: Option<FrameSummary>,
    /// Total number of frames rendered.
    pub total_frames: u64,
}

/// Callback invoked after each frame is drawn.
///
/// Implementations can use this to present or persist the canvas. The
/// callback receives the frame summary and the freshly drawn canvas.
pub trait FrameCallback<C> {
    /// Called after a frame completes.
    fn on_frame(&mut self, summary: &FrameSummary, canvas: &C);
}

/// A no-op frame callback for testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl<C> FrameCallback<C> for NoOpCallback {
    fn on_frame(&mut self, _summary: &FrameSummary, _canvas: &C) {}
}

/// Run the frame loop until a termination condition is met.
///
/// # Arguments
///
/// * `session` - Puzzle state (tile order, clock, images)
/// * `canvas` - Surface every frame is drawn onto
/// * `commands` - Operator commands, applied between frames
/// * `schedule` - Frame interval and frame limit
/// * `callback` - Called after each frame with the drawn canvas
///
/// # Errors
///
/// Returns [`RunnerError::ZeroInterval`] if the schedule has no interval.
pub async fn run_puzzle<F, W, C>(
    session: &mut PuzzleSession<F, W, C::Image>,
    canvas: &mut C,
    commands: &mut mpsc::Receiver<OperatorCommand>,
    schedule: FrameSchedule,
    callback: &mut dyn FrameCallback<C>,
) -> Result<RunResult, RunnerError>
where
    F: TimeFieldPort,
    W: WallClock,
    C: Canvas,
{
    if schedule.interval.is_zero() {
        return Err(RunnerError::ZeroInterval);
    }

    let mut ticker = tokio::time::interval(schedule.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last_summary: Option<FrameSummary> = None;
    let mut total_frames: u64 = 0;
    let mut commands_open = true;

    info!(
        interval_ms = schedule.interval.as_millis(),
        max_frames = schedule.max_frames,
        cells = session.order().len(),
        "puzzle starting"
    );

    loop {
        ticker.tick().await;

        // --- Apply pending operator commands ---
        if commands_open
            && drain_commands(session, commands, &mut commands_open) == CommandOutcome::Quit
        {
            info!(total_frames, "operator quit");
            return Ok(RunResult {
                end_reason: RunEndReason::OperatorQuit,
                final_summary: last_summary,
                total_frames,
            });
        }

        // --- Draw ---
        let summary = frame::render_frame(session, canvas);
        total_frames = total_frames.saturating_add(1);
        callback.on_frame(&summary, canvas);
        last_summary = Some(summary);

        // --- Check frame limit ---
        if schedule.limit_reached(total_frames) {
            info!(
                total_frames,
                max_frames = schedule.max_frames,
                "frame limit reached"
            );
            return Ok(RunResult {
                end_reason: RunEndReason::MaxFramesReached,
                final_summary: last_summary,
                total_frames,
            });
        }
    }
}

/// Apply every queued command. Stops early on quit.
fn drain_commands<F, W, I>(
    session: &mut PuzzleSession<F, W, I>,
    commands: &mut mpsc::Receiver<OperatorCommand>,
    commands_open: &mut bool,
) -> CommandOutcome
where
    F: TimeFieldPort,
    W: WallClock,
{
    loop {
        match commands.try_recv() {
            Ok(command) => match command.apply(session) {
                Ok(CommandOutcome::Quit) => return CommandOutcome::Quit,
                Ok(CommandOutcome::Continue) => {}
                Err(e) => warn!(%command, error = %e, "operator command rejected"),
            },
            Err(TryRecvError::Empty) => return CommandOutcome::Continue,
            Err(TryRecvError::Disconnected) => {
                info!("operator channel closed, continuing without commands");
                *commands_open = false;
                return CommandOutcome::Continue;
            }
        }
    }
}

/// Log the end of a run.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_frames = result.total_frames,
        final_hour = result.final_summary.as_ref().map(|s| s.time.hour),
        final_instant = result.final_summary.as_ref().map(|s| s.instant),
        final_covered = result.final_summary.as_ref().map(|s| s.covered),
        "puzzle run ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn schedule_from_rate() {
        let schedule = FrameSchedule::from_rate(5, 0);
        assert_eq!(schedule.interval, Duration::from_millis(200));
        assert!(!schedule.limit_reached(1_000_000));

        let bounded = FrameSchedule::from_rate(0, 3);
        assert_eq!(bounded.interval, Duration::from_millis(1000));
        assert!(!bounded.limit_reached(2));
        assert!(bounded.limit_reached(3));
    }

    #[test]
    fn very_high_rates_keep_a_nonzero_interval() {
        let schedule = FrameSchedule::from_rate(5000, 0);
        assert_eq!(schedule.interval, Duration::from_millis(1));
    }
}
