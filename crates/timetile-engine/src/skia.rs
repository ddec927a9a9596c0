//! Raster canvas and hourly image loading backed by `tiny-skia`.
//!
//! [`PixmapCanvas`] implements the core [`Canvas`] trait on an RGBA pixmap
//! the size of the configured surface. [`FileImageProvider`] decodes the
//! hourly images from `<directory>/<hour>.<extension>` with the `image`
//! crate, which picks the format (PNG, JPEG, ...) from the extension.

use timetile_core::canvas::Canvas;
use timetile_core::config::ImagesConfig;
use timetile_core::images::{HOURS_PER_DAY, ImageError, ImageProvider};
use timetile_types::{LineStyle, Point, Rect, Rgba};
use image::RgbaImage;
use tiny_skia::{
    Color, ColorU8, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::error::EngineError;

/// Convert a core color to a `tiny-skia` color.
fn skia_color(color: Rgba) -> Color {
    let [red, green, blue, alpha] = color.normalized();
    Color::from_rgba(red, green, blue, alpha).unwrap_or(Color::BLACK)
}

/// Pixel count as canvas units.
#[allow(clippy::cast_precision_loss)]
fn pixels(count: u32) -> f32 {
    count as f32
}

/// Scale and offset that make an `image_w` x `image_h` image cover a
/// `surface_w` x `surface_h` surface, centered, cropping the overflow.
fn cover_transform(image_w: f32, image_h: f32, surface_w: f32, surface_h: f32) -> Transform {
    if image_w <= 0.0 || image_h <= 0.0 {
        return Transform::identity();
    }
    let scale = (surface_w / image_w).max(surface_h / image_h);
    let dx = (image_w.mul_add(-scale, surface_w)) / 2.0;
    let dy = (image_h.mul_add(-scale, surface_h)) / 2.0;
    Transform::from_row(scale, 0.0, 0.0, scale, dx, dy)
}

/// Canvas drawing into an in-memory RGBA pixmap.
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

impl PixmapCanvas {
    /// Allocate a transparent surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        let pixmap = Pixmap::new(width, height).ok_or(EngineError::Canvas { width, height })?;
        Ok(Self { pixmap })
    }

    /// The drawn pixels.
    pub const fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl Canvas for PixmapCanvas {
    type Image = Pixmap;

    fn width(&self) -> f32 {
        pixels(self.pixmap.width())
    }

    fn height(&self) -> f32 {
        pixels(self.pixmap.height())
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn draw_image_cover(&mut self, image: &Pixmap) {
        let transform = cover_transform(
            pixels(image.width()),
            pixels(image.height()),
            self.width(),
            self.height(),
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
    }

    fn draw_line(&mut self, from: Point, to: Point, style: LineStyle) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        let Some(path) = builder.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(skia_color(style.color));
        paint.anti_alias = true;
        let stroke = Stroke {
            width: style.width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(area) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
        else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(area, &paint, Transform::identity(), None);
    }
}

/// Copy straight-alpha RGBA pixels into a premultiplied pixmap.
///
/// Returns `None` for an image with a zero dimension.
fn pixmap_from_rgba(rgba: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(rgba.width(), rgba.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [red, green, blue, alpha] = src.0;
        *dst = ColorU8::from_rgba(red, green, blue, alpha).premultiply();
    }
    Some(pixmap)
}

/// Loads `<directory>/<hour>.<extension>`, format chosen by extension.
#[derive(Debug, Clone)]
pub struct FileImageProvider {
    images: ImagesConfig,
}

impl FileImageProvider {
    /// Provider reading from the configured image directory.
    pub const fn new(images: ImagesConfig) -> Self {
        Self { images }
    }
}

impl ImageProvider for FileImageProvider {
    type Image = Pixmap;

    fn load_image(&self, hour: u8) -> Result<Pixmap, ImageError> {
        if hour >= HOURS_PER_DAY {
            return Err(ImageError::HourOutOfRange { hour });
        }
        let path = self.images.path_for(hour);
        let decoded = match image::open(&path) {
            Ok(decoded) => decoded,
            Err(e) => {
                return Err(ImageError::Load {
                    hour,
                    message: e.to_string(),
                    path,
                });
            }
        };
        pixmap_from_rgba(&decoded.to_rgba8()).ok_or_else(|| ImageError::Load {
            hour,
            message: "image has no pixels".to_owned(),
            path,
        })
    }
}
