//! Routes decoded server events to the renderer and the notifier.

use panel_common::InboundEvent;

use crate::notifications::{notify_confirmation, notify_error, notify_unrecognized, Notifier};
use crate::renderer::render_state;
use crate::view::ViewBinding;

/// What handling an event did, for callers that want to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    Rendered { new_errors: usize },
    Alerted,
    Confirmed,
    Unrecognized(String),
}

pub struct PanelController<V, N> {
    view: V,
    notifier: N,
}

impl<V: ViewBinding, N: Notifier> PanelController<V, N> {
    pub fn new(view: V, notifier: N) -> Self {
        Self { view, notifier }
    }

    pub fn handle(&mut self, event: &InboundEvent) -> HandleOutcome {
        match event {
            InboundEvent::StateUpdate(update) => {
                let new_errors = render_state(&mut self.view, update);
                if new_errors > 0 {
                    log::debug!("{} new error(s) shown", new_errors);
                }
                HandleOutcome::Rendered { new_errors }
            }
            InboundEvent::ErrorNotice { message } => {
                notify_error(&mut self.notifier, message);
                HandleOutcome::Alerted
            }
            InboundEvent::Confirmation { message } => {
                notify_confirmation(message);
                HandleOutcome::Confirmed
            }
            InboundEvent::Unknown { kind } => {
                notify_unrecognized(kind);
                HandleOutcome::Unrecognized(kind.clone())
            }
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
