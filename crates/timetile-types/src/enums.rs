//! Enumeration types for the reveal puzzle.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Clock mode
// ---------------------------------------------------------------------------

/// Where the puzzle clock takes its hour, minute, and second from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    /// Values follow the system wall clock.
    #[default]
    Live,
    /// Values are read from the user-editable time fields.
    Overridden,
}

impl ClockMode {
    /// Whether the time fields accept user edits in this mode.
    pub const fn fields_editable(self) -> bool {
        matches!(self, Self::Overridden)
    }
}

impl fmt::Display for ClockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => f.write_str("live"),
            Self::Overridden => f.write_str("overridden"),
        }
    }
}

// ---------------------------------------------------------------------------
// Time fields
// ---------------------------------------------------------------------------

/// One of the three editable time fields shown next to the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeField {
    /// Hour of the day, `0..=23`.
    Hour,
    /// Minute of the hour.
    Minute,
    /// Second of the minute.
    Second,
}

impl TimeField {
    /// All fields in display order.
    pub const ALL: [Self; 3] = [Self::Hour, Self::Minute, Self::Second];

    /// Identifier of the input element backing this field.
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Hour => "hora",
            Self::Minute => "minuto",
            Self::Second => "segundo",
        }
    }

    /// Largest value accepted from an overridden field.
    ///
    /// Minutes and seconds accept `60`, one past the last real value. Entering
    /// `60` is therefore allowed and yields an instant slightly past the hour.
    pub const fn max_override(self) -> u8 {
        match self {
            Self::Hour => 23,
            Self::Minute | Self::Second => 60,
        }
    }

    /// Look a field up by element id or English name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "hora" | "hour" | "h" => Some(Self::Hour),
            "minuto" | "minute" | "m" => Some(Self::Minute),
            "segundo" | "second" | "s" => Some(Self::Second),
            _ => None,
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// The pair of mutually exclusive buttons next to the time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlButton {
    /// "Detener": freezes the clock and unlocks the fields.
    Stop,
    /// "Reanudar": returns to the live clock.
    Resume,
}

impl ControlButton {
    /// The button that should be visible while the clock is in `mode`.
    pub const fn visible_in(mode: ClockMode) -> Self {
        match mode {
            ClockMode::Live => Self::Stop,
            ClockMode::Overridden => Self::Resume,
        }
    }

    /// Identifier of the button element.
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Stop => "detener",
            Self::Resume => "reanudar",
        }
    }
}
