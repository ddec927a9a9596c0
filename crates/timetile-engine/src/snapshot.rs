//! Frame callback that persists the drawn canvas as a PNG.
//!
//! The engine has no window; the latest frame is written to
//! `output.snapshot_path` every `output.snapshot_every_frames` frames so it
//! can be watched from an image viewer.

use std::path::PathBuf;

use timetile_core::frame::FrameSummary;
use timetile_core::runner::FrameCallback;
use tracing::{debug, warn};

use crate::skia::PixmapCanvas;

/// Writes the canvas to disk on a fixed frame cadence.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
    every_frames: u64,
    written: u64,
}

impl SnapshotWriter {
    /// Write to `path` every `every_frames` frames (0 disables writing).
    pub const fn new(path: PathBuf, every_frames: u64) -> Self {
        Self {
            path,
            every_frames,
            written: 0,
        }
    }

    /// Whether frame number `frame` is due for a snapshot.
    pub const fn is_due(&self, frame: u64) -> bool {
        match frame.checked_rem(self.every_frames) {
            Some(rest) => rest == 0,
            None => false,
        }
    }

    /// Snapshots written so far.
    pub const fn written(&self) -> u64 {
        self.written
    }
}

impl FrameCallback<PixmapCanvas> for SnapshotWriter {
    fn on_frame(&mut self, summary: &FrameSummary, canvas: &PixmapCanvas) {
        if !self.is_due(summary.frame) {
            return;
        }
        match canvas.pixmap().save_png(&self.path) {
            Ok(()) => {
                self.written = self.written.saturating_add(1);
                debug!(
                    frame = summary.frame,
                    path = %self.path.display(),
                    "snapshot written"
                );
            }
            Err(e) => warn!(
                frame = summary.frame,
                path = %self.path.display(),
                error = %e,
                "failed to write snapshot"
            ),
        }
    }
}
