//! Operator console: reads command lines and forwards them to the runner.
//!
//! Runs on its own OS thread with a blocking reader so a pending stdin read
//! never holds up runtime shutdown. Lines that do not parse are logged and
//! skipped. Forwarding ends when the input reaches EOF or the runner drops
//! its receiver.

use std::io::BufRead;
use std::thread::JoinHandle;

use timetile_core::operator::{CommandParseError, OperatorCommand};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Spawn a detached thread forwarding stdin to `commands`.
pub fn spawn_stdin(commands: mpsc::Sender<OperatorCommand>) -> std::io::Result<JoinHandle<u64>> {
    std::thread::Builder::new()
        .name("timetile-console".to_owned())
        .spawn(move || forward_commands(std::io::stdin().lock(), &commands))
}

/// Forward every valid command line from `reader` to `commands`.
///
/// Blocks on both the reader and the channel; must not be called from
/// inside the async runtime. Returns the number of commands forwarded.
pub fn forward_commands<R: BufRead>(reader: R, commands: &mpsc::Sender<OperatorCommand>) -> u64 {
    let mut forwarded: u64 = 0;

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to read operator input");
                return forwarded;
            }
        };

        let command = match line.parse::<OperatorCommand>() {
            Ok(command) => command,
            Err(CommandParseError::Empty) => continue,
            Err(e) => {
                warn!(line = %line.trim(), error = %e, "ignoring operator input");
                continue;
            }
        };

        if commands.blocking_send(command).is_err() {
            debug!(forwarded, "runner stopped accepting commands");
            return forwarded;
        }
        forwarded = forwarded.saturating_add(1);
    }

    debug!(forwarded, "operator input closed");
    forwarded
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use timetile_types::TimeField;

    #[test]
    fn forwards_valid_lines_in_order() {
        let input: &[u8] = b"pause\n\nset minuto 42\nfly away\nresume\n";
        let (tx, mut rx) = mpsc::channel(8);

        assert_eq!(forward_commands(input, &tx), 3);
        drop(tx);

        assert_eq!(rx.try_recv().unwrap(), OperatorCommand::Pause);
        assert_eq!(
            rx.try_recv().unwrap(),
            OperatorCommand::Set {
                field: TimeField::Minute,
                value: "42".to_owned(),
            }
        );
        assert_eq!(rx.try_recv().unwrap(), OperatorCommand::Resume);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn stops_when_receiver_is_gone() {
        let input: &[u8] = b"pause\nresume\n";
        let (tx, rx) = mpsc::channel(8);
        drop(rx);

        assert_eq!(forward_commands(input, &tx), 0);
    }
}
