//! Tile order, dual-mode clock, reveal predicate, and frame loop for the
//! Timetile reveal puzzle.
//!
//! A background picture for the current hour is hidden under a grid of
//! opaque tiles. Every tile carries a shuffled threshold, and one tile
//! disappears per elapsed second of the hour until the whole picture shows
//! at the top of the next hour.
//!
//! # Modules
//!
//! - [`tile_order`] -- Shuffled permutation of reveal thresholds.
//! - [`clock`] -- Live or user-overridden clock with input validation.
//! - [`fields`] -- [`TimeFieldPort`] trait over the editable time fields.
//! - [`reveal`] -- Reveal predicate, instant counter, and overlay color.
//! - [`canvas`] -- [`Canvas`] drawing trait and a recording implementation.
//! - [`images`] -- Hourly background image loading.
//! - [`frame`] -- [`PuzzleSession`] state and single-frame rendering.
//! - [`operator`] -- Text commands for pause, resume, field edits, quit.
//! - [`runner`] -- Interval-driven frame loop.
//! - [`config`] -- Configuration loading from `timetile-config.yaml`.
//!
//! [`TimeFieldPort`]: fields::TimeFieldPort
//! [`Canvas`]: canvas::Canvas
//! [`PuzzleSession`]: frame::PuzzleSession

pub mod canvas;
pub mod clock;
pub mod config;
pub mod fields;
pub mod frame;
pub mod images;
pub mod operator;
pub mod reveal;
pub mod runner;
pub mod tile_order;
