//! Configuration loading and typed config structures for the puzzle.
//!
//! The configuration lives in `timetile-config.yaml`. Every section and
//! field has a default matching the reference puzzle (a 700x360 canvas, a
//! 60x60 grid, five frames per second), so an empty or missing file is a
//! valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding [`ImagesConfig::directory`].
pub const IMAGE_DIR_ENV: &str = "TIMETILE_IMAGE_DIR";

/// Environment variable overriding [`OutputConfig::snapshot_path`].
pub const SNAPSHOT_PATH_ENV: &str = "TIMETILE_SNAPSHOT_PATH";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is syntactically fine but unusable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level puzzle configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PuzzleConfig {
    /// Drawing surface size.
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Tile grid dimensions.
    #[serde(default)]
    pub grid: GridConfig,

    /// Frame rate and stroke settings.
    #[serde(default)]
    pub render: RenderConfig,

    /// Where the hourly images are read from.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Tile shuffle settings.
    #[serde(default)]
    pub shuffle: ShuffleConfig,

    /// Rendered frame output.
    #[serde(default)]
    pub output: OutputConfig,

    /// Run boundaries.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PuzzleConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `TIMETILE_IMAGE_DIR` overrides `images.directory`
    /// - `TIMETILE_SNAPSHOT_PATH` overrides `output.snapshot_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides and validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is unusable.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides looked up by environment variable name.
    ///
    /// `lookup` returns the value for a variable name, or `None` when the
    /// variable is unset.
    pub fn apply_overrides_from<L>(&mut self, lookup: L)
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(IMAGE_DIR_ENV) {
            self.images.directory = PathBuf::from(dir);
        }
        if let Some(path) = lookup(SNAPSHOT_PATH_ENV) {
            self.output.snapshot_path = PathBuf::from(path);
        }
    }

    /// Check that every value can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first unusable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| {
            Err(ConfigError::Invalid {
                reason: reason.to_owned(),
            })
        };
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return invalid("canvas width and height must be at least 1");
        }
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return invalid("grid columns and rows must be at least 1");
        }
        if self.grid.columns.checked_mul(self.grid.rows).is_none() {
            return invalid("grid has more cells than fit in a u32");
        }
        if self.render.frames_per_second == 0 {
            return invalid("render.frames_per_second must be at least 1");
        }
        if !(self.render.grid_line_width.is_finite() && self.render.grid_line_width > 0.0) {
            return invalid("render.grid_line_width must be a positive number");
        }
        if self.images.extension.is_empty() {
            return invalid("images.extension must not be empty");
        }
        Ok(())
    }
}

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CanvasConfig {
    /// Surface width.
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Surface height.
    #[serde(default = "default_canvas_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

const fn default_canvas_width() -> u32 {
    700
}

const fn default_canvas_height() -> u32 {
    360
}

/// Tile grid dimensions.
///
/// Columns are the second slots and rows the minute slots of a cell's
/// threshold index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Cells per row (second slots).
    #[serde(default = "default_grid_side")]
    pub columns: u32,

    /// Rows of cells (minute slots).
    #[serde(default = "default_grid_side")]
    pub rows: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: default_grid_side(),
            rows: default_grid_side(),
        }
    }
}

const fn default_grid_side() -> u32 {
    60
}

/// Frame rate and stroke settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RenderConfig {
    /// Frames drawn per second.
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,

    /// Stroke width of the grid lines.
    #[serde(default = "default_grid_line_width")]
    pub grid_line_width: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frames_per_second: default_frames_per_second(),
            grid_line_width: default_grid_line_width(),
        }
    }
}

const fn default_frames_per_second() -> u32 {
    5
}

const fn default_grid_line_width() -> f32 {
    0.1
}

/// Location of the hourly background images.
///
/// Hour `h` is read from `<directory>/<h>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImagesConfig {
    /// Directory holding `0.<ext>` through `23.<ext>`.
    #[serde(default = "default_image_directory")]
    pub directory: PathBuf,

    /// File extension, without the dot.
    #[serde(default = "default_image_extension")]
    pub extension: String,
}

impl ImagesConfig {
    /// Path of the image for `hour`.
    pub fn path_for(&self, hour: u8) -> PathBuf {
        self.directory.join(format!("{hour}.{}", self.extension))
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            directory: default_image_directory(),
            extension: default_image_extension(),
        }
    }
}

fn default_image_directory() -> PathBuf {
    PathBuf::from("assets/images/puzle")
}

fn default_image_extension() -> String {
    "png".to_owned()
}

/// Tile shuffle settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ShuffleConfig {
    /// Fixed seed for a reproducible tile order. Unset means a fresh
    /// random order every run.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Rendered frame output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// File the latest frame is written to.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Write the snapshot every N frames. 0 disables snapshots.
    #[serde(default = "default_snapshot_every_frames")]
    pub snapshot_every_frames: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            snapshot_every_frames: default_snapshot_every_frames(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("timetile-frame.png")
}

const fn default_snapshot_every_frames() -> u64 {
    5
}

/// Run boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Stop after this many frames (0 = run until told to quit).
    #[serde(default)]
    pub max_frames: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG`
    /// is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_puzzle() {
        let config = PuzzleConfig::default();
        assert_eq!(config.canvas.width, 700);
        assert_eq!(config.canvas.height, 360);
        assert_eq!(config.grid.columns, 60);
        assert_eq!(config.grid.rows, 60);
        assert_eq!(config.render.frames_per_second, 5);
        assert_eq!(config.render.grid_line_width, 0.1);
        assert_eq!(config.shuffle.seed, None);
        assert_eq!(config.run.max_frames, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = PuzzleConfig::parse("").unwrap();
        assert_eq!(config.grid, GridConfig::default());
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
canvas:
  width: 1400
  height: 720

grid:
  columns: 30
  rows: 20

render:
  frames_per_second: 10
  grid_line_width: 0.5

images:
  directory: "/srv/puzzle"
  extension: "jpg"

shuffle:
  seed: 1234

output:
  snapshot_path: "out/frame.png"
  snapshot_every_frames: 1

run:
  max_frames: 50

logging:
  level: "debug"
  json: true
"#;
        let config: PuzzleConfig = serde_yml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas.width, 1400);
        assert_eq!(config.grid.columns, 30);
        assert_eq!(config.grid.rows, 20);
        assert_eq!(config.render.frames_per_second, 10);
        assert_eq!(
            config.images.path_for(7),
            PathBuf::from("/srv/puzzle/7.jpg")
        );
        assert_eq!(config.shuffle.seed, Some(1234));
        assert_eq!(config.output.snapshot_every_frames, 1);
        assert_eq!(config.run.max_frames, 50);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn shipped_config_is_the_default() {
        let yaml = include_str!("../../../timetile-config.yaml");
        let config: PuzzleConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config, PuzzleConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: PuzzleConfig = serde_yml::from_str("grid:\n  columns: 12\n").unwrap();
        assert_eq!(config.grid.columns, 12);
        assert_eq!(config.grid.rows, 60);
        assert_eq!(config.canvas, CanvasConfig::default());
    }

    #[test]
    fn default_image_paths() {
        let images = ImagesConfig::default();
        assert_eq!(
            images.path_for(0),
            PathBuf::from("assets/images/puzle/0.png")
        );
        assert_eq!(
            images.path_for(23),
            PathBuf::from("assets/images/puzle/23.png")
        );
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let mut config = PuzzleConfig::default();
        config.render.frames_per_second = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));

        let mut config = PuzzleConfig::default();
        config.grid.rows = 0;
        assert!(config.validate().is_err());

        let mut config = PuzzleConfig::default();
        config.grid.columns = u32::MAX;
        config.grid.rows = 2;
        assert!(config.validate().is_err());

        let mut config = PuzzleConfig::default();
        config.render.grid_line_width = -1.0;
        assert!(config.validate().is_err());

        let mut config = PuzzleConfig::default();
        config.canvas.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_overrides_replace_paths() {
        let mut config = PuzzleConfig::default();
        config.apply_overrides_from(|key| match key {
            IMAGE_DIR_ENV => Some("/srv/hours".to_owned()),
            SNAPSHOT_PATH_ENV => Some("/tmp/puzzle.png".to_owned()),
            _ => None,
        });
        assert_eq!(
            config.images.path_for(3),
            PathBuf::from("/srv/hours/3.png")
        );
        assert_eq!(
            config.output.snapshot_path,
            PathBuf::from("/tmp/puzzle.png")
        );
    }

    #[test]
    fn unset_env_keeps_yaml_paths() {
        let mut config: PuzzleConfig =
            serde_yml::from_str("images:\n  directory: \"pics\"\n").unwrap();
        config.apply_overrides_from(|_| None);
        assert_eq!(config.images.directory, PathBuf::from("pics"));
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let err = PuzzleConfig::parse("grid: [not, a, map").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }
}
