//! Operator commands for a running puzzle.
//!
//! The operator can freeze the clock, type into the time fields while it is
//! frozen, return to the live clock, and stop the run. Commands are plain
//! text lines so they can come from a terminal, a pipe, or a test:
//!
//! ```text
//! pause
//! set hora 07
//! set minute 5
//! resume
//! quit
//! ```
//!
//! Commands are queued on a channel and applied by the runner between
//! frames, never while a frame is being drawn.

use std::fmt;
use std::str::FromStr;

use timetile_types::TimeField;
use tracing::info;

use crate::clock::WallClock;
use crate::fields::{self, FieldError, TimeFieldPort};
use crate::frame::PuzzleSession;

/// Errors produced when parsing an operator command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    /// The line was blank.
    #[error("empty command")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command {word:?}")]
    UnknownCommand {
        /// The unrecognized word.
        word: String,
    },

    /// `set` named a field that does not exist.
    #[error("unknown time field {name:?} (expected hora, minuto, or segundo)")]
    UnknownField {
        /// The unrecognized field name.
        name: String,
    },

    /// The command is missing an argument or has extra ones.
    #[error("usage: {usage}")]
    Usage {
        /// Expected form of the command.
        usage: &'static str,
    },
}

/// A single operator instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorCommand {
    /// Freeze the clock and unlock the time fields.
    Pause,
    /// Return to the live clock.
    Resume,
    /// Type `value` into a time field. The text is stored as-is; the clock
    /// validates it on the next read.
    Set {
        /// Target field.
        field: TimeField,
        /// Raw text to store.
        value: String,
    },
    /// End the run.
    Quit,
}

impl FromStr for OperatorCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandParseError::Empty);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "pause" | "stop" | "detener" => Self::Pause,
            "resume" | "reanudar" => Self::Resume,
            "quit" | "exit" => Self::Quit,
            "set" => {
                const USAGE: &str = "set <hora|minuto|segundo> <value>";
                let (Some(name), Some(value)) = (words.next(), words.next()) else {
                    return Err(CommandParseError::Usage { usage: USAGE });
                };
                let field =
                    TimeField::from_name(name).ok_or_else(|| CommandParseError::UnknownField {
                        name: name.to_owned(),
                    })?;
                Self::Set {
                    field,
                    value: value.to_owned(),
                }
            }
            other => {
                return Err(CommandParseError::UnknownCommand {
                    word: other.to_owned(),
                });
            }
        };

        if words.next().is_some() {
            return Err(CommandParseError::Usage {
                usage: command.usage(),
            });
        }
        Ok(command)
    }
}

impl OperatorCommand {
    /// Expected syntax of this command.
    pub const fn usage(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Set { .. } => "set <hora|minuto|segundo> <value>",
            Self::Quit => "quit",
        }
    }

    /// Apply the command to a session.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Locked`] when setting a field while the clock
    /// is live.
    pub fn apply<F, W, I>(
        &self,
        session: &mut PuzzleSession<F, W, I>,
    ) -> Result<CommandOutcome, FieldError>
    where
        F: TimeFieldPort,
        W: WallClock,
    {
        match self {
            Self::Pause => session.clock_mut().pause(),
            Self::Resume => session.clock_mut().resume(),
            Self::Set { field, value } => {
                fields::edit_field(session.clock_mut().fields_mut(), *field, value)?;
                info!(%field, value = %value, "time field edited");
            }
            Self::Quit => return Ok(CommandOutcome::Quit),
        }
        Ok(CommandOutcome::Continue)
    }
}

impl fmt::Display for OperatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pause => f.write_str("pause"),
            Self::Resume => f.write_str("resume"),
            Self::Set { field, value } => write!(f, "set {field} {value}"),
            Self::Quit => f.write_str("quit"),
        }
    }
}

/// What the runner should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Keep rendering frames.
    Continue,
    /// Stop the run.
    Quit,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::{ClockSource, FixedClock};
    use crate::fields::MemoryTimeFields;
    use crate::images::{HourlyImages, ImageError, ImageProvider};
    use crate::tile_order::TileOrder;
    use timetile_types::{ClockMode, LineStyle, TimeOfDay};

    struct UnitImages;

    impl ImageProvider for UnitImages {
        type Image = ();

        fn load_image(&self, _hour: u8) -> Result<(), ImageError> {
            Ok(())
        }
    }

    fn session() -> PuzzleSession<MemoryTimeFields, FixedClock, ()> {
        let order = TileOrder::from_thresholds(2, 1, vec![1, 0]).unwrap();
        let clock = ClockSource::new(
            MemoryTimeFields::new(),
            FixedClock::new(TimeOfDay::new(8, 20, 40)),
        );
        let images = HourlyImages::preload(&UnitImages).unwrap();
        PuzzleSession::new(order, clock, images, LineStyle::hairline(0.1))
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!("pause".parse(), Ok(OperatorCommand::Pause));
        assert_eq!("  Detener ".parse(), Ok(OperatorCommand::Pause));
        assert_eq!("resume".parse(), Ok(OperatorCommand::Resume));
        assert_eq!("quit".parse(), Ok(OperatorCommand::Quit));
    }

    #[test]
    fn parses_set() {
        assert_eq!(
            "set hora 07".parse(),
            Ok(OperatorCommand::Set {
                field: TimeField::Hour,
                value: "07".to_owned()
            })
        );
        assert_eq!(
            "set second abc".parse(),
            Ok(OperatorCommand::Set {
                field: TimeField::Second,
                value: "abc".to_owned()
            })
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<OperatorCommand>(), Err(CommandParseError::Empty));
        assert!(matches!(
            "jump".parse::<OperatorCommand>(),
            Err(CommandParseError::UnknownCommand { .. })
        ));
        assert!(matches!(
            "set day 3".parse::<OperatorCommand>(),
            Err(CommandParseError::UnknownField { .. })
        ));
        assert!(matches!(
            "set hora".parse::<OperatorCommand>(),
            Err(CommandParseError::Usage { .. })
        ));
        assert!(matches!(
            "pause now".parse::<OperatorCommand>(),
            Err(CommandParseError::Usage { usage: "pause" })
        ));
    }

    #[test]
    fn display_round_trips_set() {
        let cmd = OperatorCommand::Set {
            field: TimeField::Minute,
            value: "5".to_owned(),
        };
        assert_eq!(cmd.to_string(), "set minuto 5");
        assert_eq!(cmd.to_string().parse(), Ok(cmd));
    }

    #[test]
    fn set_is_rejected_while_live() {
        let mut session = session();
        let cmd = OperatorCommand::Set {
            field: TimeField::Hour,
            value: "3".to_owned(),
        };
        let err = cmd.apply(&mut session).unwrap_err();
        assert_eq!(
            err,
            FieldError::Locked {
                field: TimeField::Hour
            }
        );
        assert_eq!(session.clock().hour(), 8);
    }

    #[test]
    fn pause_then_set_overrides_clock() {
        let mut session = session();
        assert_eq!(
            OperatorCommand::Pause.apply(&mut session),
            Ok(CommandOutcome::Continue)
        );
        assert_eq!(session.clock().mode(), ClockMode::Overridden);

        let cmd: OperatorCommand = "set hora 3".parse().unwrap();
        cmd.apply(&mut session).unwrap();
        assert_eq!(session.clock().hour(), 3);

        OperatorCommand::Resume.apply(&mut session).unwrap();
        assert_eq!(session.clock().hour(), 8);
    }

    #[test]
    fn quit_requests_stop() {
        let mut session = session();
        assert_eq!(
            OperatorCommand::Quit.apply(&mut session),
            Ok(CommandOutcome::Quit)
        );
    }
}
