//! Shared wire types for the machine status panel.
//!
//! This crate provides the types used for WebSocket communication between
//! the panel server and the browser client. All types are WASM-compatible.
//!
//! # Usage
//!
//! ```rust
//! use panel_common::{decode_server_message, Command, InboundEvent};
//!
//! let event = decode_server_message(r#"{"type":"confirmation","data":{"message":"ok"}}"#).unwrap();
//! assert_eq!(event, InboundEvent::Confirmation { message: "ok".to_string() });
//! assert_eq!(Command::Pause.name(), "pause");
//! ```

mod decode;
mod messages;

pub use decode::*;
pub use messages::*;
