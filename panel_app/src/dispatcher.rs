//! Turns user interactions into commands for the server.

use std::error::Error;
use std::fmt;

use panel_common::Command;
use serde_json::Number;

/// A user interaction with one of the panel controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    Resume,
    Pause,
    Stop,
    /// The speed control changed; carries the control's raw value.
    SpeedChanged(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SendError {
    NotConnected,
    Serialization(String),
    Transport(String),
}

impl Error for SendError {}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::NotConnected => write!(f, "WebSocket is not connected"),
            SendError::Serialization(msg) => write!(f, "Failed to serialize command: {}", msg),
            SendError::Transport(msg) => write!(f, "Failed to send command: {}", msg),
        }
    }
}

/// Anything that can carry a command to the server.
pub trait CommandSink {
    fn send(&self, command: &Command) -> Result<(), SendError>;
}

/// Read a speed control value as a JSON number.
///
/// Integer text stays an integer; no range checks happen here, the server
/// owns the valid speed range.
pub fn parse_speed(raw: &str) -> Option<Number> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(Number::from(value));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// The command an action produces, if it can be expressed as one.
pub fn command_for(action: &ControlAction) -> Option<Command> {
    match action {
        ControlAction::Resume => Some(Command::Resume),
        ControlAction::Pause => Some(Command::Pause),
        ControlAction::Stop => Some(Command::Stop),
        ControlAction::SpeedChanged(raw) => parse_speed(raw).map(|value| Command::Speed { value }),
    }
}

/// Send the command for `action` through `sink`.
///
/// Failures are logged and swallowed: a dropped connection must not take the
/// page down with it.
pub fn dispatch<S: CommandSink + ?Sized>(sink: &S, action: ControlAction) -> Option<Command> {
    let Some(command) = command_for(&action) else {
        log::warn!("Ignoring non-numeric speed value: {:?}", action);
        return None;
    };

    match sink.send(&command) {
        Ok(()) => {
            log::debug!("Sent command: {}", command.name());
            Some(command)
        }
        Err(e) => {
            log::warn!("Command '{}' not sent: {}", command.name(), e);
            None
        }
    }
}
