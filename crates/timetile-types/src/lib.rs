//! Shared value types for the Timetile reveal puzzle.
//!
//! Everything here is plain data: the clock modes and field names used by
//! the time source, and the small geometry and color values exchanged
//! between the frame renderer and a drawing surface.
//!
//! # Modules
//!
//! - [`enums`] -- Clock modes, editable time fields, and on-screen controls
//! - [`structs`] -- Time-of-day readings, colors, points, rectangles, strokes

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ClockMode, ControlButton, TimeField};
pub use structs::{LineStyle, Point, Rect, Rgba, TimeOfDay};
