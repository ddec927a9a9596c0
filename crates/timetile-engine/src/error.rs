//! Error types for the puzzle engine binary.
//!
//! [`EngineError`] wraps every failure mode of engine startup and the
//! frame loop so `main` can propagate with `?`.

/// Top-level error for the puzzle engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: timetile_core::config::ConfigError,
    },

    /// The tile order could not be built for the configured grid.
    #[error("tile order error: {source}")]
    TileOrder {
        /// The underlying tile order error.
        #[from]
        source: timetile_core::tile_order::TileOrderError,
    },

    /// An hourly background image failed to load.
    #[error("image error: {source}")]
    Image {
        /// The underlying image error.
        #[from]
        source: timetile_core::images::ImageError,
    },

    /// The frame loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: timetile_core::runner::RunnerError,
    },

    /// The raster surface could not be allocated.
    #[error("canvas error: cannot allocate a {width}x{height} surface")]
    Canvas {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The operator console thread could not be started.
    #[error("console error: {source}")]
    Console {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
