//! Dual-mode puzzle clock.
//!
//! The clock is the single source of hour, minute, and second for the
//! puzzle. It runs in one of two modes:
//!
//! - [`ClockMode::Live`] -- values come from a [`WallClock`] and are copied
//!   into the time fields every frame as two-digit strings.
//! - [`ClockMode::Overridden`] -- values come from the user-editable time
//!   fields. Every read re-validates the raw text; anything that is not a
//!   short non-negative integer within range reads as `0`, and
//!   [`ClockSource::normalize`] rewrites it to `"00"`.
//!
//! Rejected override text is not an error the caller ever sees. It is
//! absorbed here and only traced.

use chrono::{Local, Timelike};
use timetile_types::{ClockMode, TimeField, TimeOfDay};
use tracing::{info, trace};

use crate::fields::TimeFieldPort;
use crate::reveal;

/// Longest override text accepted, in characters.
const MAX_OVERRIDE_LEN: usize = 2;

/// Text written back over a rejected override.
const RESET_VALUE: &str = "00";

/// Reasons an override field's text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverrideInputError {
    /// More than two characters were entered.
    #[error("override text has {len} characters, at most 2 allowed")]
    TooLong {
        /// Character count of the rejected text.
        len: usize,
    },

    /// The text is blank, signed negative, or not a decimal integer.
    #[error("override text {text:?} is not a non-negative integer")]
    NotNumeric {
        /// The rejected text.
        text: String,
    },

    /// The number exceeds the field's upper bound.
    #[error("override value {value} exceeds maximum {max}")]
    OutOfRange {
        /// Parsed value.
        value: u8,
        /// Largest accepted value.
        max: u8,
    },
}

/// Validate one override field's raw text.
///
/// # Errors
///
/// Returns [`OverrideInputError`] describing why the text was rejected.
pub fn parse_override(raw: &str, max: u8) -> Result<u8, OverrideInputError> {
    let len = raw.chars().count();
    if len > MAX_OVERRIDE_LEN {
        return Err(OverrideInputError::TooLong { len });
    }
    // Surrounding blanks, a leading `+`, and a trailing `.` still read as
    // a plain integer ("+5", " 5", "5.").
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = unsigned.strip_suffix('.').unwrap_or(unsigned);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OverrideInputError::NotNumeric {
            text: raw.to_owned(),
        });
    }
    let value: u8 = digits
        .parse()
        .map_err(|_parse_err| OverrideInputError::NotNumeric {
            text: raw.to_owned(),
        })?;
    if value > max {
        return Err(OverrideInputError::OutOfRange { value, max });
    }
    Ok(value)
}

/// Format a clock component as a zero-padded two-digit string.
pub fn two_digit(value: u8) -> String {
    format!("{value:02}")
}

// ---------------------------------------------------------------------------
// Wall clocks
// ---------------------------------------------------------------------------

/// A source of the real time of day.
pub trait WallClock {
    /// The current local time of day.
    fn now(&self) -> TimeOfDay;
}

/// Wall clock backed by the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> TimeOfDay {
        let now = Local::now();
        TimeOfDay::new(
            u8::try_from(now.hour()).unwrap_or(0),
            u8::try_from(now.minute()).unwrap_or(0),
            u8::try_from(now.second()).unwrap_or(0),
        )
    }
}

/// A wall clock that reports whatever time it was last set to.
///
/// Used by tests and replays to drive the puzzle deterministically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock {
    time: TimeOfDay,
}

impl FixedClock {
    /// Create a clock stopped at `time`.
    pub const fn new(time: TimeOfDay) -> Self {
        Self { time }
    }

    /// Move the clock to `time`.
    pub const fn set(&mut self, time: TimeOfDay) {
        self.time = time;
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> TimeOfDay {
        self.time
    }
}

// ---------------------------------------------------------------------------
// Clock source
// ---------------------------------------------------------------------------

/// The puzzle clock: live wall-clock time or a user override.
#[derive(Debug)]
pub struct ClockSource<F, W> {
    mode: ClockMode,
    fields: F,
    wall: W,
}

impl<F: TimeFieldPort, W: WallClock> ClockSource<F, W> {
    /// Create a live clock.
    ///
    /// The fields are locked, the stop control is shown, and the fields are
    /// filled with the current wall-clock time.
    pub fn new(mut fields: F, wall: W) -> Self {
        for field in TimeField::ALL {
            fields.set_editable(field, false);
        }
        fields.show_control(ClockMode::Live);
        let mut clock = Self {
            mode: ClockMode::Live,
            fields,
            wall,
        };
        clock.sync_live_fields();
        clock
    }

    /// Current mode.
    pub const fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Whether the clock reads from the time fields.
    pub const fn is_overridden(&self) -> bool {
        matches!(self.mode, ClockMode::Overridden)
    }

    /// Freeze the clock and hand the fields to the user.
    ///
    /// The fields are seeded with the live time before being unlocked.
    /// Calling this while already overridden does nothing.
    pub fn pause(&mut self) {
        if self.is_overridden() {
            return;
        }
        let seeded = self.sync_live_fields();
        for field in TimeField::ALL {
            self.fields.set_editable(field, true);
        }
        self.fields.show_control(ClockMode::Overridden);
        self.mode = ClockMode::Overridden;
        info!(
            hour = seeded.hour,
            minute = seeded.minute,
            second = seeded.second,
            "clock paused, time fields unlocked"
        );
    }

    /// Return to the live clock and lock the fields.
    ///
    /// The fields are immediately re-synchronized with the wall clock.
    /// Calling this while already live does nothing.
    pub fn resume(&mut self) {
        if !self.is_overridden() {
            return;
        }
        for field in TimeField::ALL {
            self.fields.set_editable(field, false);
        }
        self.fields.show_control(ClockMode::Live);
        self.mode = ClockMode::Live;
        let now = self.sync_live_fields();
        info!(
            hour = now.hour,
            minute = now.minute,
            second = now.second,
            "clock resumed, following wall clock"
        );
    }

    /// Current hour.
    pub fn hour(&self) -> u8 {
        self.read(TimeField::Hour)
    }

    /// Current minute.
    pub fn minute(&self) -> u8 {
        self.read(TimeField::Minute)
    }

    /// Current second.
    pub fn second(&self) -> u8 {
        self.read(TimeField::Second)
    }

    /// Hour, minute, and second from a single reading.
    ///
    /// In live mode the wall clock is sampled once, so the three components
    /// cannot straddle a second boundary.
    pub fn time_of_day(&self) -> TimeOfDay {
        match self.mode {
            ClockMode::Live => self.wall.now(),
            ClockMode::Overridden => TimeOfDay::new(
                self.read_override(TimeField::Hour),
                self.read_override(TimeField::Minute),
                self.read_override(TimeField::Second),
            ),
        }
    }

    /// Elapsed seconds in the hour from a single reading.
    pub fn instant(&self) -> u32 {
        reveal::instant_of(self.time_of_day())
    }

    /// Re-synchronize the fields with the clock state. Call once per frame.
    ///
    /// Live: writes the wall-clock time as two-digit strings. Overridden:
    /// rewrites rejected fields to `"00"` and leaves valid ones untouched.
    pub fn normalize(&mut self) {
        match self.mode {
            ClockMode::Live => {
                self.sync_live_fields();
            }
            ClockMode::Overridden => {
                for field in TimeField::ALL {
                    let raw = self.fields.value(field);
                    if let Err(reason) = parse_override(&raw, field.max_override()) {
                        trace!(%field, %reason, "resetting rejected override");
                        self.fields.set_value(field, RESET_VALUE);
                    }
                }
            }
        }
    }

    /// The time-field port.
    pub const fn fields(&self) -> &F {
        &self.fields
    }

    /// Mutable access to the time-field port, for applying user edits.
    pub const fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    /// The wall clock.
    pub const fn wall(&self) -> &W {
        &self.wall
    }

    /// Mutable access to the wall clock.
    pub const fn wall_mut(&mut self) -> &mut W {
        &mut self.wall
    }

    fn read(&self, field: TimeField) -> u8 {
        match self.mode {
            ClockMode::Live => {
                let now = self.wall.now();
                match field {
                    TimeField::Hour => now.hour,
                    TimeField::Minute => now.minute,
                    TimeField::Second => now.second,
                }
            }
            ClockMode::Overridden => self.read_override(field),
        }
    }

    fn read_override(&self, field: TimeField) -> u8 {
        let raw = self.fields.value(field);
        parse_override(&raw, field.max_override()).unwrap_or_else(|reason| {
            trace!(%field, %reason, "override rejected, reading 0");
            0
        })
    }

    /// Write the wall-clock time into the fields and return it.
    fn sync_live_fields(&mut self) -> TimeOfDay {
        let now = self.wall.now();
        self.fields.set_value(TimeField::Hour, &two_digit(now.hour));
        self.fields.set_value(TimeField::Minute, &two_digit(now.minute));
        self.fields.set_value(TimeField::Second, &two_digit(now.second));
        now
    }
}
