//! Simulated tape machine standing in for the real controller.
//!
//! The server is the source of truth for run state; clients only ever see
//! snapshots of it.

use std::fmt;

use panel_common::{Command, StateUpdate, POSITION_END_OF_TRAVEL, POSITION_UNKNOWN};
use tracing::info;

pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;
pub const DEFAULT_SPEED: u8 = 5;

pub const STOP_REQUESTED: &str = "Dein Turing Programm wird bei nächster Gelegenheit gestoppt.";
pub const STOPPED_BY_USER: &str = "Dein Turing Programm wurde vom Benutzer gestoppt.";
pub const TAPE_TOO_SHORT: &str = "Dein Turing Programm ist zu groß für das IO-Band.";

/// Why a command was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Pause and stop need a running program.
    NotRunning(&'static str),
    /// Speed outside 1..=10 or not a whole number.
    InvalidSpeed(String),
}

impl std::error::Error for CommandError {}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NotRunning(command) => {
                write!(f, "Cannot {}: no program is running", command)
            }
            CommandError::InvalidSpeed(value) => write!(
                f,
                "Invalid speed {}: must be a whole number from {} to {}",
                value, MIN_SPEED, MAX_SPEED
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Homing,
    Running,
    Stopped,
    Finished,
}

impl Phase {
    fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Homing => "homing",
            Phase::Running => "running",
            Phase::Stopped => "stopped",
            Phase::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedMachine {
    program_name: String,
    phase: Phase,
    step: u64,
    position: i64,
    speed: u8,
    run: bool,
    pause: bool,
    should_stop: bool,
    errors: Vec<String>,
    tape_length: i64,
}

impl SimulatedMachine {
    pub fn new(program_name: impl Into<String>, tape_length: i64) -> Self {
        Self {
            program_name: program_name.into(),
            phase: Phase::Idle,
            step: 0,
            position: POSITION_UNKNOWN,
            speed: DEFAULT_SPEED,
            run: false,
            pause: false,
            should_stop: false,
            errors: Vec::new(),
            tape_length: tape_length.max(1),
        }
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Apply a client command. On success returns the confirmation text.
    pub fn apply(&mut self, command: &Command) -> Result<String, CommandError> {
        match command {
            Command::Resume => {
                if !self.run {
                    self.start();
                    Ok(format!("Programm '{}' gestartet", self.program_name))
                } else {
                    self.pause = false;
                    info!("Machine resumed");
                    Ok("Programm fortgesetzt".to_string())
                }
            }
            Command::Pause => {
                if !self.run {
                    return Err(CommandError::NotRunning("pause"));
                }
                self.pause = true;
                info!("Machine paused");
                Ok("Programm pausiert".to_string())
            }
            Command::Stop => {
                if !self.run {
                    return Err(CommandError::NotRunning("stop"));
                }
                self.should_stop = true;
                self.errors.push(STOP_REQUESTED.to_string());
                info!("should_stop flag set, machine will stop soon");
                Ok("Stopp angefordert".to_string())
            }
            Command::Speed { value } => {
                let speed = value
                    .as_u64()
                    .filter(|v| (MIN_SPEED as u64..=MAX_SPEED as u64).contains(v))
                    .ok_or_else(|| CommandError::InvalidSpeed(value.to_string()))?;
                self.speed = speed as u8;
                info!("Speed set to {}", self.speed);
                Ok(format!("Geschwindigkeit auf {} gesetzt", self.speed))
            }
        }
    }

    fn start(&mut self) {
        self.phase = Phase::Homing;
        self.run = true;
        self.pause = false;
        self.should_stop = false;
        self.step = 0;
        self.position = POSITION_UNKNOWN;
        info!("Machine started, homing");
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) {
        if !self.run {
            return;
        }
        if self.should_stop {
            self.halt(Phase::Stopped);
            self.errors.push(STOPPED_BY_USER.to_string());
            info!("Machine stopped by should_stop flag");
            return;
        }
        if self.pause {
            return;
        }

        match self.phase {
            Phase::Homing => {
                self.phase = Phase::Running;
                self.position = 1;
                info!("Machine homed");
            }
            Phase::Running => {
                self.step += 1;
                self.position += 1;
                if self.position >= self.tape_length {
                    self.position = POSITION_END_OF_TRAVEL;
                    self.halt(Phase::Finished);
                    self.errors.push(TAPE_TOO_SHORT.to_string());
                    info!("Band ended after {} steps", self.step);
                }
            }
            Phase::Idle | Phase::Stopped | Phase::Finished => {}
        }
    }

    fn halt(&mut self, phase: Phase) {
        self.phase = phase;
        self.run = false;
        self.pause = false;
        self.should_stop = false;
    }

    pub fn snapshot(&self) -> StateUpdate {
        let state = if self.run && self.pause { "paused" } else { self.phase.label() };
        StateUpdate {
            program_name: self.program_name.clone(),
            state: state.to_string(),
            step: self.step,
            position: self.position,
            speed: self.speed as f64,
            run: self.run,
            pause: self.pause,
            should_stop: self.should_stop,
            errors: self.errors.clone(),
        }
    }
}
