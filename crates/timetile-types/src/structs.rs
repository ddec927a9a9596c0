//! Plain data structs shared by the clock, the renderer, and drawing surfaces.

use serde::{Deserialize, Serialize};

/// A single hour/minute/second reading.
///
/// Live readings stay within `0..=23` / `0..=59` / `0..=59`. Overridden
/// readings may carry `60` for minute or second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Hour of the day.
    pub hour: u8,
    /// Minute of the hour.
    pub minute: u8,
    /// Second of the minute.
    pub second: u8,
}

impl TimeOfDay {
    /// Bundle three clock components.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Midnight, the value every rejected override collapses to.
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);
}

/// An RGBA color with floating point color channels in `0.0..=255.0`.
///
/// Channels are kept unrounded so that hour-derived shades such as `62.5`
/// survive until a drawing surface quantizes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub red: f32,
    /// Green channel.
    pub green: f32,
    /// Blue channel.
    pub blue: f32,
    /// Opacity, 255 being fully opaque.
    pub alpha: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 255);

    /// Build a color from its channels.
    pub const fn new(red: f32, green: f32, blue: f32, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Channels scaled to `0.0..=1.0`, clamped, in RGBA order.
    pub fn normalized(&self) -> [f32; 4] {
        let unit = |channel: f32| (channel / 255.0).clamp(0.0, 1.0);
        [
            unit(self.red),
            unit(self.green),
            unit(self.blue),
            unit(f32::from(self.alpha)),
        ]
    }
}

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: f32,
    /// Vertical offset from the top edge.
    pub y: f32,
}

impl Point {
    /// Build a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Build a rectangle from its origin and size.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Stroke settings for a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Rgba,
    /// Stroke width in canvas units.
    pub width: f32,
}

impl LineStyle {
    /// A black hairline of the given width.
    pub const fn hairline(width: f32) -> Self {
        Self {
            color: Rgba::BLACK,
            width,
        }
    }
}
