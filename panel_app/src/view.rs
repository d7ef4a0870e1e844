//! The display surface the renderer writes into.

use leptos::prelude::*;

/// The three run-state buttons whose highlighting mirrors the command latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Resume,
    Pause,
    Stop,
}

impl ButtonId {
    pub const ALL: [ButtonId; 3] = [ButtonId::Resume, ButtonId::Pause, ButtonId::Stop];

    /// Element id of the button in the page markup.
    pub fn element_id(self) -> &'static str {
        match self {
            ButtonId::Resume => "resume_button",
            ButtonId::Pause => "pause_button",
            ButtonId::Stop => "stop_button",
        }
    }
}

/// Named setters over the panel's display nodes.
///
/// The renderer only talks to this trait, so tests can swap the page for an
/// in-memory fake.
pub trait ViewBinding {
    fn set_program_name(&mut self, name: &str);
    fn set_state(&mut self, state: &str);
    fn set_step_count(&mut self, step: u64);
    fn set_position(&mut self, text: &str);
    fn set_speed(&mut self, speed: f64);
    fn set_button_active(&mut self, button: ButtonId, active: bool);
    fn append_error(&mut self, text: &str);
    fn has_error(&self, text: &str) -> bool;
}

/// [`ViewBinding`] backed by Leptos signals; the page components read them.
#[derive(Clone, Copy)]
pub struct SignalView {
    pub program_name: RwSignal<String>,
    pub state: RwSignal<String>,
    pub steps: RwSignal<u64>,
    pub position: RwSignal<String>,
    pub speed: RwSignal<f64>,
    pub resume_active: RwSignal<bool>,
    pub pause_active: RwSignal<bool>,
    pub stop_active: RwSignal<bool>,
    /// Accumulated error log, in arrival order.
    pub errors: RwSignal<Vec<String>>,
}

impl SignalView {
    pub fn new() -> Self {
        Self {
            program_name: RwSignal::new(String::new()),
            state: RwSignal::new(String::new()),
            steps: RwSignal::new(0),
            position: RwSignal::new(String::new()),
            speed: RwSignal::new(0.0),
            resume_active: RwSignal::new(false),
            pause_active: RwSignal::new(false),
            stop_active: RwSignal::new(false),
            errors: RwSignal::new(Vec::new()),
        }
    }

    pub fn button_active(&self, button: ButtonId) -> RwSignal<bool> {
        match button {
            ButtonId::Resume => self.resume_active,
            ButtonId::Pause => self.pause_active,
            ButtonId::Stop => self.stop_active,
        }
    }
}

impl Default for SignalView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewBinding for SignalView {
    fn set_program_name(&mut self, name: &str) {
        self.program_name.set(name.to_string());
    }

    fn set_state(&mut self, state: &str) {
        self.state.set(state.to_string());
    }

    fn set_step_count(&mut self, step: u64) {
        self.steps.set(step);
    }

    fn set_position(&mut self, text: &str) {
        self.position.set(text.to_string());
    }

    fn set_speed(&mut self, speed: f64) {
        self.speed.set(speed);
    }

    fn set_button_active(&mut self, button: ButtonId, active: bool) {
        self.button_active(button).set(active);
    }

    fn append_error(&mut self, text: &str) {
        self.errors.update(|errors| errors.push(text.to_string()));
    }

    fn has_error(&self, text: &str) -> bool {
        self.errors.with_untracked(|errors| errors.iter().any(|e| e == text))
    }
}
