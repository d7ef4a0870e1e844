//! Server configuration read from environment variables.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub http_port: u16,
    pub ws_port: u16,
    pub static_dir: PathBuf,
    pub tick: Duration,
    pub program_name: String,
    pub tape_length: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            ws_port: 9000,
            static_dir: PathBuf::from("panel_app/dist"),
            tick: Duration::from_millis(500),
            program_name: "Demo".to_string(),
            tape_length: 20,
        }
    }
}

impl ServerConfig {
    /// Read `PANEL_*` variables, keeping the default for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            http_port: parsed(&lookup, "PANEL_HTTP_PORT").unwrap_or(defaults.http_port),
            ws_port: parsed(&lookup, "PANEL_WS_PORT").unwrap_or(defaults.ws_port),
            static_dir: lookup("PANEL_STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            tick: lookup("PANEL_TICK_MS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick),
            program_name: lookup("PANEL_PROGRAM_NAME").unwrap_or(defaults.program_name),
            tape_length: parsed(&lookup, "PANEL_TAPE_LENGTH").unwrap_or(defaults.tape_length),
        }
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
