//! Decoding of inbound server frames into a closed set of events.

use std::error::Error;
use std::fmt;

use serde_json::Value;

use crate::messages::{Notice, StateUpdate, EVENT_CONFIRMATION, EVENT_ERROR, EVENT_STATE_UPDATE};

/// Everything a client can receive, including event types it does not know.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    StateUpdate(StateUpdate),
    ErrorNotice { message: String },
    Confirmation { message: String },
    /// A well-formed envelope carrying an event name this client does not handle.
    Unknown { kind: String },
}

impl InboundEvent {
    /// Wire name of the event. For `Unknown` this is the raw `type` field.
    pub fn name(&self) -> &str {
        match self {
            InboundEvent::StateUpdate(_) => EVENT_STATE_UPDATE,
            InboundEvent::ErrorNotice { .. } => EVENT_ERROR,
            InboundEvent::Confirmation { .. } => EVENT_CONFIRMATION,
            InboundEvent::Unknown { kind } => kind.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Not JSON, not an object, or missing a string `type` field.
    InvalidEnvelope(String),
    /// A known event whose `data` does not have the expected shape.
    MalformedPayload { kind: String, reason: String },
}

impl Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidEnvelope(reason) => write!(f, "Invalid message envelope: {}", reason),
            DecodeError::MalformedPayload { kind, reason } => {
                write!(f, "Malformed '{}' payload: {}", kind, reason)
            }
        }
    }
}

/// Decode one text frame from the server.
///
/// Unknown event names are not an error: they come back as
/// [`InboundEvent::Unknown`] so the caller decides how loudly to complain.
pub fn decode_server_message(text: &str) -> Result<InboundEvent, DecodeError> {
    let mut envelope: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::InvalidEnvelope(e.to_string()))?;

    let object = envelope
        .as_object_mut()
        .ok_or_else(|| DecodeError::InvalidEnvelope("expected a JSON object".to_string()))?;

    let kind = match object.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        Some(_) => return Err(DecodeError::InvalidEnvelope("'type' must be a string".to_string())),
        None => return Err(DecodeError::InvalidEnvelope("missing 'type' field".to_string())),
    };
    let data = object.remove("data").unwrap_or(Value::Null);

    let malformed = |e: serde_json::Error| DecodeError::MalformedPayload {
        kind: kind.clone(),
        reason: e.to_string(),
    };

    match kind.as_str() {
        EVENT_STATE_UPDATE => {
            let update: StateUpdate = serde_json::from_value(data).map_err(malformed)?;
            Ok(InboundEvent::StateUpdate(update))
        }
        EVENT_ERROR => {
            let notice: Notice = serde_json::from_value(data).map_err(malformed)?;
            Ok(InboundEvent::ErrorNotice { message: notice.message })
        }
        EVENT_CONFIRMATION => {
            let notice: Notice = serde_json::from_value(data).map_err(malformed)?;
            Ok(InboundEvent::Confirmation { message: notice.message })
        }
        _ => Ok(InboundEvent::Unknown { kind }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_state_update() {
        let text = r#"{"type":"state_update","data":{
            "program_name":"binary_increment","state":"running","step":7,
            "position":12,"speed":5,"run":true,"pause":false,"should_stop":false,
            "errors":["A"]}}"#;
        let event = decode_server_message(text).unwrap();
        match event {
            InboundEvent::StateUpdate(update) => {
                assert_eq!(update.program_name, "binary_increment");
                assert_eq!(update.step, 7);
                assert_eq!(update.position, 12);
                assert_eq!(update.speed, 5.0);
                assert!(update.run);
                assert_eq!(update.errors, vec!["A".to_string()]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_partial_state_update_uses_defaults() {
        let event = decode_server_message(r#"{"type":"state_update","data":{"state":"paused"}}"#).unwrap();
        let InboundEvent::StateUpdate(update) = event else {
            panic!("expected a state update");
        };
        assert_eq!(update.state, "paused");
        assert_eq!(update.position, 0);
        assert!(update.errors.is_empty());
    }

    #[test]
    fn test_decode_notices() {
        let error = decode_server_message(r#"{"type":"error","data":{"message":"X"}}"#).unwrap();
        assert_eq!(error, InboundEvent::ErrorNotice { message: "X".to_string() });

        let confirmation =
            decode_server_message(r#"{"type":"confirmation","data":{"message":"ok"}}"#).unwrap();
        assert_eq!(confirmation, InboundEvent::Confirmation { message: "ok".to_string() });
        assert_eq!(confirmation.name(), "confirmation");
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let event = decode_server_message(r#"{"type":"foobar","data":{"hihi":1}}"#).unwrap();
        assert_eq!(event, InboundEvent::Unknown { kind: "foobar".to_string() });
        assert_eq!(event.name(), "foobar");
    }

    #[test]
    fn test_invalid_envelopes() {
        assert!(matches!(decode_server_message("not json"), Err(DecodeError::InvalidEnvelope(_))));
        assert!(matches!(decode_server_message("[1,2]"), Err(DecodeError::InvalidEnvelope(_))));
        assert!(matches!(decode_server_message(r#"{"data":{}}"#), Err(DecodeError::InvalidEnvelope(_))));
        assert!(matches!(decode_server_message(r#"{"type":5}"#), Err(DecodeError::InvalidEnvelope(_))));
    }

    #[test]
    fn test_malformed_known_payload() {
        let result = decode_server_message(r#"{"type":"error","data":{"msg":"X"}}"#);
        assert!(matches!(result, Err(DecodeError::MalformedPayload { ref kind, .. }) if kind == "error"));

        let result = decode_server_message(r#"{"type":"state_update","data":{"position":"far"}}"#);
        assert!(matches!(result, Err(DecodeError::MalformedPayload { ref kind, .. }) if kind == "state_update"));
    }
}
