//! Synchronizes the display with a state snapshot.

use panel_common::{StateUpdate, POSITION_END_OF_TRAVEL, POSITION_UNKNOWN};

use crate::view::{ButtonId, ViewBinding};

/// Display text for a position reading.
pub fn format_position(position: i64) -> String {
    match position {
        POSITION_UNKNOWN => "0 unbekannte Position, Homing".to_string(),
        POSITION_END_OF_TRAVEL => "Band-ende erreicht".to_string(),
        other => other.to_string(),
    }
}

/// Which buttons should be highlighted for the latch state in `update`.
pub fn button_states(update: &StateUpdate) -> [(ButtonId, bool); 3] {
    [
        (ButtonId::Resume, update.run && !update.pause),
        (ButtonId::Pause, update.pause),
        (ButtonId::Stop, update.should_stop),
    ]
}

/// Render `update` into `view`. Returns how many error messages were new.
///
/// Every field is rewritten on each call; the error log only ever grows.
pub fn render_state<V: ViewBinding + ?Sized>(view: &mut V, update: &StateUpdate) -> usize {
    view.set_program_name(&update.program_name);
    view.set_state(&update.state);
    view.set_step_count(update.step);
    view.set_position(&format_position(update.position));
    view.set_speed(update.speed);

    for (button, active) in button_states(update) {
        view.set_button_active(button, active);
    }

    merge_errors(view, &update.errors)
}

/// Append each message not already shown, keeping arrival order.
pub fn merge_errors<V: ViewBinding + ?Sized>(view: &mut V, errors: &[String]) -> usize {
    let mut appended = 0;
    for error in errors {
        if view.has_error(error) {
            continue;
        }
        view.append_error(error);
        appended += 1;
    }
    appended
}
