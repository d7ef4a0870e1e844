//! The machine status display and its run controls.

use leptos::prelude::*;
use crate::connection::ConnectionManager;
use crate::dispatcher::{dispatch, ControlAction};
use crate::view::{ButtonId, SignalView};
use super::{ConnectionIndicator, ErrorLog};

const ACTIVE_BUTTON: &str = "active bg-[#00d9ff] text-black";
const INACTIVE_BUTTON: &str = "inactive bg-[#1a1a1a] text-[#cccccc] hover:bg-[#222222]";

#[component]
pub fn StatusPanel() -> impl IntoView {
    let view = use_context::<SignalView>().expect("SignalView not found");

    view! {
        <div class="min-h-screen bg-[#050505] text-white p-4 flex flex-col gap-3 max-w-xl mx-auto">
            <header class="flex items-center justify-between">
                <h1 class="text-sm font-semibold">"Turingmaschine"</h1>
                <ConnectionIndicator/>
            </header>

            <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] p-2 grid grid-cols-2 gap-1">
                <StatusField label="Programm" id="program_name" value=Signal::derive(move || view.program_name.get())/>
                <StatusField label="Zustand" id="state" value=Signal::derive(move || view.state.get())/>
                <StatusField label="Schritte" id="steps" value=Signal::derive(move || view.steps.get().to_string())/>
                <StatusField label="Position" id="position" value=Signal::derive(move || view.position.get())/>
            </div>

            <RunControls/>
            <ErrorLog/>
        </div>
    }
}

#[component]
fn StatusField(
    label: &'static str,
    /// Element id the value is rendered under
    id: &'static str,
    #[prop(into)] value: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="bg-[#111111] rounded px-2 py-1">
            <div class="text-[#666666] text-[9px]">{label}</div>
            <div id=id class="text-[11px] font-mono">{move || value.get()}</div>
        </div>
    }
}

/// Resume/pause/stop buttons and the speed control.
#[component]
fn RunControls() -> impl IntoView {
    let view = use_context::<SignalView>().expect("SignalView not found");
    let connection = use_context::<ConnectionManager>().expect("ConnectionManager not found");

    let button_class = move |button: ButtonId| {
        let active = view.button_active(button);
        move || {
            let style = if active.get() { ACTIVE_BUTTON } else { INACTIVE_BUTTON };
            format!("px-3 py-1.5 rounded text-[11px] font-medium transition-colors {}", style)
        }
    };

    view! {
        <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] p-2 flex items-center gap-2">
            <button
                id=ButtonId::Resume.element_id()
                class=button_class(ButtonId::Resume)
                on:click=move |_| { dispatch(&connection, ControlAction::Resume); }
            >
                "Fortsetzen"
            </button>
            <button
                id=ButtonId::Pause.element_id()
                class=button_class(ButtonId::Pause)
                on:click=move |_| { dispatch(&connection, ControlAction::Pause); }
            >
                "Pause"
            </button>
            <button
                id=ButtonId::Stop.element_id()
                class=button_class(ButtonId::Stop)
                on:click=move |_| { dispatch(&connection, ControlAction::Stop); }
            >
                "Stopp"
            </button>

            <label class="ml-auto flex items-center gap-1 text-[10px] text-[#888888]">
                "Geschwindigkeit"
                <input
                    id="speed"
                    type="number"
                    class="w-14 bg-[#111111] border border-[#ffffff10] rounded px-1 py-0.5 text-white text-[11px]"
                    min="1"
                    max="10"
                    step="1"
                    prop:value=move || view.speed.get().to_string()
                    on:change=move |ev| {
                        dispatch(&connection, ControlAction::SpeedChanged(event_target_value(&ev)));
                    }
                />
            </label>
        </div>
    }
}
