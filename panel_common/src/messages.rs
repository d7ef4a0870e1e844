//! Message types exchanged over the WebSocket channel.
//!
//! Every frame is a JSON object `{"type": <event name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Wire name of the server's periodic status snapshot.
pub const EVENT_STATE_UPDATE: &str = "state_update";
/// Wire name of an urgent fault notice.
pub const EVENT_ERROR: &str = "error";
/// Wire name of a command acknowledgment.
pub const EVENT_CONFIRMATION: &str = "confirmation";

/// Position reading reported while the machine is homing.
pub const POSITION_UNKNOWN: i64 = 0;
/// Position reading reported when the carriage hit the end of the tape.
pub const POSITION_END_OF_TRAVEL: i64 = -2;

/// Snapshot of the machine status, pushed by the server.
///
/// `errors` is the full list the machine has collected so far, not a delta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateUpdate {
    pub program_name: String,
    pub state: String,
    pub step: u64,
    /// `0` while homing, `-2` at end of travel, otherwise a literal reading.
    pub position: i64,
    pub speed: f64,
    pub run: bool,
    pub pause: bool,
    pub should_stop: bool,
    pub errors: Vec<String>,
}

/// Payload of `error` and `confirmation` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
}

/// Instruction sent by the client to change run state or speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Command {
    Resume,
    Pause,
    Stop,
    /// New speed setting, forwarded exactly as the control produced it.
    Speed { value: Number },
}

impl Command {
    /// Wire name of the command, as found in its `command` field.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Resume => "resume",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::Speed { .. } => "speed",
        }
    }
}

/// Messages pushed from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "state_update")]
    StateUpdate(StateUpdate),

    #[serde(rename = "error")]
    Error(Notice),

    #[serde(rename = "confirmation")]
    Confirmation(Notice),
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error(Notice { message: message.into() })
    }

    pub fn confirmation(message: impl Into<String>) -> Self {
        ServerMessage::Confirmation(Notice { message: message.into() })
    }
}

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "command")]
    Command(Command),
}
