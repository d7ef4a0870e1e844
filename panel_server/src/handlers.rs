//! Handling of client frames against the simulated machine.

use panel_common::{ClientMessage, ServerMessage};
use tracing::{info, warn};

use crate::machine::SimulatedMachine;

/// Result of handling one client frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReply {
    /// Sent back to the client that issued the frame.
    pub reply: ServerMessage,
    /// Whether the machine changed and a fresh snapshot should be broadcast.
    pub state_changed: bool,
}

/// Parse and apply one text frame.
pub fn handle_client_text(machine: &mut SimulatedMachine, text: &str) -> CommandReply {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            warn!("Failed to parse client message: {} - {}", e, text);
            return CommandReply {
                reply: ServerMessage::error(format!("Invalid request: {}", e)),
                state_changed: false,
            };
        }
    };

    match message {
        ClientMessage::Command(command) => {
            info!("Received command: {:?}", command);
            match machine.apply(&command) {
                Ok(confirmation) => CommandReply {
                    reply: ServerMessage::confirmation(confirmation),
                    state_changed: true,
                },
                Err(e) => {
                    warn!("Rejected command '{}': {}", command.name(), e);
                    CommandReply {
                        reply: ServerMessage::error(e.to_string()),
                        state_changed: false,
                    }
                }
            }
        }
    }
}
