//! Out-of-band notices: server faults and acknowledgments.

/// Surfaces a message to the user in a way they must acknowledge.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Uses the browser's blocking `window.alert`.
///
/// The alert holds up the event loop until dismissed; queued frames wait
/// behind it but are not lost.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&mut self, message: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("No window available to show alert: {}", message);
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            log::error!("Failed to show alert: {:?}", e);
        }
    }
}

/// An `error` event: log it and interrupt the user.
pub fn notify_error<N: Notifier + ?Sized>(notifier: &mut N, message: &str) {
    log::error!("Error: {}", message);
    notifier.alert(message);
}

/// A `confirmation` event: log only.
pub fn notify_confirmation(message: &str) {
    log::info!("Confirmation: {}", message);
}

pub fn notify_unrecognized(kind: &str) {
    log::warn!("Unknown message type: {}", kind);
}
