//! In-memory fakes shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Once;

use panel_common::Command;

use crate::dispatcher::{CommandSink, SendError};
use crate::notifications::Notifier;
use crate::view::{ButtonId, ViewBinding};

/// Records every write so tests can compare the visible state.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FakeView {
    pub program_name: String,
    pub state: String,
    pub steps: String,
    pub position: String,
    pub speed: String,
    pub buttons: HashMap<ButtonId, bool>,
    pub errors: Vec<String>,
    pub writes: usize,
}

impl FakeView {
    pub fn is_active(&self, button: ButtonId) -> bool {
        self.buttons.get(&button).copied().unwrap_or(false)
    }
}

impl ViewBinding for FakeView {
    fn set_program_name(&mut self, name: &str) {
        self.program_name = name.to_string();
        self.writes += 1;
    }

    fn set_state(&mut self, state: &str) {
        self.state = state.to_string();
        self.writes += 1;
    }

    fn set_step_count(&mut self, step: u64) {
        self.steps = step.to_string();
        self.writes += 1;
    }

    fn set_position(&mut self, text: &str) {
        self.position = text.to_string();
        self.writes += 1;
    }

    fn set_speed(&mut self, speed: f64) {
        self.speed = speed.to_string();
        self.writes += 1;
    }

    fn set_button_active(&mut self, button: ButtonId, active: bool) {
        self.buttons.insert(button, active);
        self.writes += 1;
    }

    fn append_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
        self.writes += 1;
    }

    fn has_error(&self, text: &str) -> bool {
        self.errors.iter().any(|e| e == text)
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub alerts: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Command sink that keeps what it was given, or refuses everything when offline.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: RefCell<Vec<Command>>,
    pub offline: bool,
}

impl CommandSink for RecordingSink {
    fn send(&self, command: &Command) -> Result<(), SendError> {
        if self.offline {
            return Err(SendError::NotConnected);
        }
        self.sent.borrow_mut().push(command.clone());
        Ok(())
    }
}

// ========== Log capture ==========

thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = RefCell::new(Vec::new());
}

/// Logger that keeps records on the thread that emitted them, so tests
/// running in parallel each see only their own output.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        CAPTURED.with(|captured| {
            captured.borrow_mut().push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Run `f` and return what it logged on this thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(log::Level, String)>) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
    });

    CAPTURED.with(|captured| captured.borrow_mut().clear());
    let result = f();
    let records = CAPTURED.with(|captured| captured.borrow_mut().drain(..).collect());
    (result, records)
}

/// Records at `level`.
pub fn at_level(records: &[(log::Level, String)], level: log::Level) -> Vec<&str> {
    records
        .iter()
        .filter(|(record_level, _)| *record_level == level)
        .map(|(_, message)| message.as_str())
        .collect()
}
