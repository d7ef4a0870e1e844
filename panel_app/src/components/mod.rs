mod connection_indicator;
mod error_log;
mod not_found;
mod status_panel;

pub use connection_indicator::ConnectionIndicator;
pub use error_log::ErrorLog;
pub use not_found::NotFound;
pub use status_panel::StatusPanel;
