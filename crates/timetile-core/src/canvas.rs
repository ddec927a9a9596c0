//! Drawing surface trait and a recording implementation.
//!
//! The frame renderer only needs four primitives. The engine binary backs
//! them with a raster pixmap; [`RecordingCanvas`] keeps a log of the calls
//! so frame output can be asserted on without rasterizing anything.

use timetile_types::{LineStyle, Point, Rect, Rgba};

/// A surface the puzzle can be drawn onto.
pub trait Canvas {
    /// Background image type accepted by [`draw_image_cover`](Canvas::draw_image_cover).
    type Image;

    /// Logical width in canvas units.
    fn width(&self) -> f32;

    /// Logical height in canvas units.
    fn height(&self) -> f32;

    /// Erase everything to transparent.
    fn clear(&mut self);

    /// Draw `image` scaled to cover the whole surface, cropping the
    /// overflowing axis and keeping it centered.
    fn draw_image_cover(&mut self, image: &Self::Image);

    /// Stroke a straight line.
    fn draw_line(&mut self, from: Point, to: Point, style: LineStyle);

    /// Fill a rectangle with no outline.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<I> {
    /// [`Canvas::clear`].
    Clear,
    /// [`Canvas::draw_image_cover`] with a copy of the image handle.
    Image(I),
    /// [`Canvas::draw_line`].
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke used.
        style: LineStyle,
    },
    /// [`Canvas::fill_rect`].
    Rect {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Rgba,
    },
}

/// Canvas that records every call instead of drawing.
///
/// [`clear`](Canvas::clear) wipes the log, so after a frame it holds
/// exactly that frame's calls.
#[derive(Debug, Clone)]
pub struct RecordingCanvas<I> {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand<I>>,
}

impl<I> RecordingCanvas<I> {
    /// Create an empty recording surface of the given size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Calls recorded since the last clear (including that clear).
    pub fn commands(&self) -> &[DrawCommand<I>] {
        &self.commands
    }

    /// Number of recorded lines.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count()
    }

    /// Recorded rectangles in drawing order.
    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Rgba)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Rect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }
}

impl<I: Clone> Canvas for RecordingCanvas<I> {
    type Image = I;

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_image_cover(&mut self, image: &I) {
        self.commands.push(DrawCommand::Image(image.clone()));
    }

    fn draw_line(&mut self, from: Point, to: Point, style: LineStyle) {
        self.commands.push(DrawCommand::Line { from, to, style });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }
}
