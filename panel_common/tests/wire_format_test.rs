/// Checks the exact JSON shapes that cross the WebSocket boundary.
use panel_common::{ClientMessage, Command, ServerMessage, StateUpdate};
use serde_json::{json, Number};

#[test]
fn test_run_state_commands_have_no_extra_fields() {
    for (command, name) in [
        (Command::Resume, "resume"),
        (Command::Pause, "pause"),
        (Command::Stop, "stop"),
    ] {
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value, json!({ "command": name }));
        assert_eq!(command.name(), name);
    }
}

#[test]
fn test_speed_command_keeps_integer_value() {
    let command = Command::Speed { value: Number::from(42) };
    let text = serde_json::to_string(&command).unwrap();
    assert_eq!(text, r#"{"command":"speed","value":42}"#);
}

#[test]
fn test_speed_command_with_fractional_value() {
    let command = Command::Speed { value: Number::from_f64(2.5).unwrap() };
    let value = serde_json::to_value(&command).unwrap();
    assert_eq!(value, json!({ "command": "speed", "value": 2.5 }));
}

#[test]
fn test_command_envelope() {
    let message = ClientMessage::Command(Command::Stop);
    let value = serde_json::to_value(&message).unwrap();
    assert_eq!(value, json!({ "type": "command", "data": { "command": "stop" } }));

    let parsed: ClientMessage =
        serde_json::from_str(r#"{"type":"command","data":{"command":"speed","value":7}}"#).unwrap();
    assert_eq!(parsed, ClientMessage::Command(Command::Speed { value: Number::from(7) }));
}

#[test]
fn test_unknown_command_is_rejected() {
    let parsed = serde_json::from_str::<ClientMessage>(r#"{"type":"command","data":{"command":"jump"}}"#);
    assert!(parsed.is_err());
}

#[test]
fn test_server_message_envelopes() {
    let update = StateUpdate {
        program_name: "add_one".to_string(),
        state: "running".to_string(),
        step: 3,
        position: -2,
        speed: 5.0,
        run: true,
        pause: false,
        should_stop: false,
        errors: vec!["Band".to_string()],
    };
    let value = serde_json::to_value(ServerMessage::StateUpdate(update)).unwrap();
    assert_eq!(value["type"], "state_update");
    assert_eq!(value["data"]["position"], -2);
    assert_eq!(value["data"]["errors"], json!(["Band"]));

    let value = serde_json::to_value(ServerMessage::error("X")).unwrap();
    assert_eq!(value, json!({ "type": "error", "data": { "message": "X" } }));

    let value = serde_json::to_value(ServerMessage::confirmation("done")).unwrap();
    assert_eq!(value, json!({ "type": "confirmation", "data": { "message": "done" } }));
}
