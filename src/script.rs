//! Line-oriented event scripts for replaying input sessions
//!
//! ```text
//! # comments and blank lines are skipped
//! rect 0 0 256 256
//! pointer 200 40
//! tilt-on granted
//! tilt 45 -3
//! touch 10 10
//! tilt-off
//! ```

use std::io::BufRead;

use gaze_grid_input::{Capability, InputEvent, Rect, TiltReading};

use crate::tracker::{GazeFrame, GazeTracker};

/// Why a single script line was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("{command} expects {expected} arguments, got {got}")]
    ArgumentCount {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{command}: `{value}` is not a number")]
    NotANumber { command: &'static str, value: String },

    #[error("tilt-on expects granted, denied or unsupported, got `{0}`")]
    UnknownCapability(String),
}

/// Errors raised while parsing a script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Syntax {
        line: usize,
        #[source]
        source: LineError,
    },

    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// One script instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptCommand {
    Event(InputEvent),
    SetRect(Rect),
    TiltOn(Capability),
    TiltOff,
}

/// Parse a single line. Blank lines and `#` comments yield `None`
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, LineError> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match keyword {
        "pointer" => {
            let [x, y] = numbers::<2>("pointer", &args)?;
            ScriptCommand::Event(InputEvent::PointerMove { x, y })
        }
        "touch" => {
            let [x, y] = numbers::<2>("touch", &args)?;
            ScriptCommand::Event(InputEvent::TouchMove { x, y })
        }
        "tilt" => ScriptCommand::Event(InputEvent::Orientation(tilt_reading(&args)?)),
        "rect" => {
            let [left, top, width, height] = numbers::<4>("rect", &args)?;
            ScriptCommand::SetRect(Rect::new(left, top, width, height))
        }
        "tilt-on" => {
            let capability = match args.as_slice() {
                [] | ["granted"] => Capability::Granted,
                ["denied"] => Capability::Denied,
                ["unsupported"] => Capability::Unsupported,
                [other] => return Err(LineError::UnknownCapability(other.to_string())),
                _ => {
                    return Err(LineError::ArgumentCount {
                        command: "tilt-on",
                        expected: 1,
                        got: args.len(),
                    })
                }
            };
            ScriptCommand::TiltOn(capability)
        }
        "tilt-off" if args.is_empty() => ScriptCommand::TiltOff,
        "tilt-off" => {
            return Err(LineError::ArgumentCount {
                command: "tilt-off",
                expected: 0,
                got: args.len(),
            })
        }
        other => return Err(LineError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Parse a whole script, reporting the first bad line
pub fn parse_script<R: BufRead>(reader: R) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(source) => {
                return Err(ScriptError::Syntax {
                    line: index + 1,
                    source,
                })
            }
        }
    }
    Ok(commands)
}

/// What running one command produced
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayStep {
    /// The display was updated
    Frame(GazeFrame),
    /// Message for the user, e.g. a refused tilt request
    Notice(String),
    /// State changed without redrawing
    Quiet,
}

/// Run one command against a tracker
pub fn run_command(tracker: &mut GazeTracker, command: &ScriptCommand) -> ReplayStep {
    match command {
        ScriptCommand::Event(event) => match tracker.handle(event) {
            Some(frame) => ReplayStep::Frame(frame),
            None => ReplayStep::Quiet,
        },
        ScriptCommand::SetRect(rect) => {
            tracker.set_rect(*rect);
            ReplayStep::Quiet
        }
        ScriptCommand::TiltOn(capability) => match tracker.enable_tilt(*capability) {
            Ok(()) => ReplayStep::Quiet,
            Err(refused) => ReplayStep::Notice(refused.to_string()),
        },
        ScriptCommand::TiltOff => {
            tracker.disable_tilt();
            ReplayStep::Quiet
        }
    }
}

fn numbers<const N: usize>(command: &'static str, args: &[&str]) -> Result<[f64; N], LineError> {
    if args.len() != N {
        return Err(LineError::ArgumentCount {
            command,
            expected: N,
            got: args.len(),
        });
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|_| LineError::NotANumber {
            command,
            value: arg.to_string(),
        })?;
    }
    Ok(out)
}

/// `tilt BETA GAMMA`, where `-` marks an angle the device did not report
fn tilt_reading(args: &[&str]) -> Result<TiltReading, LineError> {
    let angle = |arg: &str| -> Result<Option<f64>, LineError> {
        if arg == "-" {
            return Ok(None);
        }
        arg.parse().map(Some).map_err(|_| LineError::NotANumber {
            command: "tilt",
            value: arg.to_string(),
        })
    };
    match args {
        [beta, gamma] => Ok(TiltReading {
            beta: angle(*beta)?,
            gamma: angle(*gamma)?,
        }),
        _ => Err(LineError::ArgumentCount {
            command: "tilt",
            expected: 2,
            got: args.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("pointer 12.5 -3").unwrap(),
            Some(ScriptCommand::Event(InputEvent::PointerMove { x: 12.5, y: -3.0 }))
        );
        assert_eq!(
            parse_line("  rect 0 0 256 128  # image").unwrap(),
            Some(ScriptCommand::SetRect(Rect::new(0.0, 0.0, 256.0, 128.0)))
        );
        assert_eq!(
            parse_line("tilt-on").unwrap(),
            Some(ScriptCommand::TiltOn(Capability::Granted))
        );
        assert_eq!(
            parse_line("tilt-on denied").unwrap(),
            Some(ScriptCommand::TiltOn(Capability::Denied))
        );
        assert_eq!(parse_line("tilt-off").unwrap(), Some(ScriptCommand::TiltOff));
    }

    #[test]
    fn test_missing_tilt_angle() {
        assert_eq!(
            parse_line("tilt - 12").unwrap(),
            Some(ScriptCommand::Event(InputEvent::Orientation(TiltReading {
                beta: None,
                gamma: Some(12.0),
            })))
        );
    }

    #[test]
    fn test_skips_blank_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # just a note").unwrap(), None);
    }

    #[test]
    fn test_rejects_bad_lines() {
        assert_eq!(
            parse_line("pointer 1"),
            Err(LineError::ArgumentCount {
                command: "pointer",
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            parse_line("touch a b"),
            Err(LineError::NotANumber {
                command: "touch",
                value: "a".to_string()
            })
        );
        assert_eq!(
            parse_line("tilt 4 up"),
            Err(LineError::NotANumber {
                command: "tilt",
                value: "up".to_string()
            })
        );
        assert_eq!(
            parse_line("tilt-on maybe"),
            Err(LineError::UnknownCapability("maybe".to_string()))
        );
        assert!(matches!(
            parse_line("tilt-off now"),
            Err(LineError::ArgumentCount { command: "tilt-off", .. })
        ));
        assert_eq!(
            parse_line("wink"),
            Err(LineError::UnknownCommand("wink".to_string()))
        );
    }

    #[test]
    fn test_parse_script_reports_line() {
        let script = "pointer 0 0\n\nbogus\n";
        match parse_script(script.as_bytes()) {
            Err(err @ ScriptError::Syntax { .. }) => {
                assert_eq!(err.to_string(), "line 3: unknown command `bogus`");
                assert!(matches!(
                    err,
                    ScriptError::Syntax {
                        line: 3,
                        source: LineError::UnknownCommand(_)
                    }
                ));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
