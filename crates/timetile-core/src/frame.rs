//! Puzzle session state and single-frame rendering.
//!
//! A [`PuzzleSession`] bundles everything that lives for the whole run:
//! the shuffled tile order, the dual-mode clock, and the hourly images.
//! The runner owns it and passes it to [`render_frame`] once per frame.
//!
//! Each frame draws, in order:
//!
//! 1. a cleared surface,
//! 2. the current hour's image, cover-fitted,
//! 3. the grid lines,
//! 4. an overlay rectangle over every still-covered cell,
//!
//! and finally re-synchronizes the time fields.
//!
//! # Cell placement
//!
//! Cells are looked up by `(column, row)` with the row as the minute slot,
//! but drawn with the minute slot along the x axis and the second slot
//! along the y axis. The canvas is therefore split into `rows` vertical
//! strips and `columns` horizontal bands.

use timetile_types::{ClockMode, LineStyle, Point, Rect, TimeOfDay};
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::clock::{ClockSource, WallClock};
use crate::fields::TimeFieldPort;
use crate::images::HourlyImages;
use crate::reveal;
use crate::tile_order::TileOrder;

/// Convert a grid count to canvas units.
///
/// Grid dimensions are far below f32's exact integer range.
#[allow(clippy::cast_precision_loss)]
fn grid_units(count: u32) -> f32 {
    count as f32
}

/// Geometry of the grid on a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    width: f32,
    height: f32,
    columns: u32,
    rows: u32,
    cell_width: f32,
    cell_height: f32,
}

impl GridLayout {
    /// Lay a `columns` x `rows` grid over a `width` x `height` canvas.
    pub fn new(width: f32, height: f32, columns: u32, rows: u32) -> Self {
        let cell_width = if rows == 0 { 0.0 } else { width / grid_units(rows) };
        let cell_height = if columns == 0 {
            0.0
        } else {
            height / grid_units(columns)
        };
        Self {
            width,
            height,
            columns,
            rows,
            cell_width,
            cell_height,
        }
    }

    /// Width of one cell.
    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of one cell.
    pub const fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Canvas area of the cell at `(column, row)`.
    pub fn cell_rect(&self, column: u32, row: u32) -> Rect {
        Rect::new(
            self.cell_width * grid_units(row),
            self.cell_height * grid_units(column),
            self.cell_width,
            self.cell_height,
        )
    }

    /// Full-width lines separating the second bands, top to bottom.
    pub fn horizontal_lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..=self.columns).map(move |i| {
            let y = self.cell_height * grid_units(i);
            (Point::new(0.0, y), Point::new(self.width, y))
        })
    }

    /// Full-height lines separating the minute strips, left to right.
    pub fn vertical_lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..=self.rows).map(move |i| {
            let x = self.cell_width * grid_units(i);
            (Point::new(x, 0.0), Point::new(x, self.height))
        })
    }
}

/// Everything a running puzzle keeps between frames.
#[derive(Debug)]
pub struct PuzzleSession<F, W, I> {
    /// Reveal thresholds, fixed for the session.
    order: TileOrder,
    /// Live or overridden time source.
    clock: ClockSource<F, W>,
    /// Background image per hour.
    images: HourlyImages<I>,
    /// Stroke used for the grid lines.
    grid_style: LineStyle,
    /// Frames rendered so far.
    frames_rendered: u64,
}

impl<F: TimeFieldPort, W: WallClock, I> PuzzleSession<F, W, I> {
    /// Assemble a session from its parts.
    pub const fn new(
        order: TileOrder,
        clock: ClockSource<F, W>,
        images: HourlyImages<I>,
        grid_style: LineStyle,
    ) -> Self {
        Self {
            order,
            clock,
            images,
            grid_style,
            frames_rendered: 0,
        }
    }

    /// The tile order.
    pub const fn order(&self) -> &TileOrder {
        &self.order
    }

    /// The clock.
    pub const fn clock(&self) -> &ClockSource<F, W> {
        &self.clock
    }

    /// Mutable access to the clock, for pause/resume and field edits.
    pub const fn clock_mut(&mut self) -> &mut ClockSource<F, W> {
        &mut self.clock
    }

    /// The hourly images.
    pub const fn images(&self) -> &HourlyImages<I> {
        &self.images
    }

    /// Frames rendered so far.
    pub const fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

/// What a rendered frame showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummary {
    /// 1-based frame number.
    pub frame: u64,
    /// Clock reading used for the frame.
    pub time: TimeOfDay,
    /// Clock mode during the frame.
    pub mode: ClockMode,
    /// Instant counter compared against the thresholds.
    pub instant: u32,
    /// Cells drawn with an overlay.
    pub covered: usize,
}

/// Draw one frame of the puzzle and re-synchronize the time fields.
pub fn render_frame<F, W, C>(
    session: &mut PuzzleSession<F, W, C::Image>,
    canvas: &mut C,
) -> FrameSummary
where
    F: TimeFieldPort,
    W: WallClock,
    C: Canvas,
{
    let time = session.clock.time_of_day();
    let mode = session.clock.mode();
    let instant = reveal::instant_of(time);

    canvas.clear();

    match session.images.get(time.hour) {
        Some(image) => canvas.draw_image_cover(image),
        None => warn!(hour = time.hour, "no background image for hour"),
    }

    let layout = GridLayout::new(
        canvas.width(),
        canvas.height(),
        session.order.width(),
        session.order.height(),
    );
    for (from, to) in layout.horizontal_lines() {
        canvas.draw_line(from, to, session.grid_style);
    }
    for (from, to) in layout.vertical_lines() {
        canvas.draw_line(from, to, session.grid_style);
    }

    let color = reveal::overlay_color(time.hour);
    let mut covered: usize = 0;
    for (column, row) in reveal::covered_cells(&session.order, instant) {
        canvas.fill_rect(layout.cell_rect(column, row), color);
        covered = covered.saturating_add(1);
    }

    session.clock.normalize();
    session.frames_rendered = session.frames_rendered.saturating_add(1);

    let summary = FrameSummary {
        frame: session.frames_rendered,
        time,
        mode,
        instant,
        covered,
    };
    debug!(
        frame = summary.frame,
        hour = time.hour,
        minute = time.minute,
        second = time.second,
        %mode,
        instant,
        covered,
        "frame rendered"
    );
    summary
}
