use leptos::prelude::*;
use crate::view::SignalView;

/// Accumulated machine errors, oldest first. Entries are never removed.
#[component]
pub fn ErrorLog() -> impl IntoView {
    let view = use_context::<SignalView>().expect("SignalView not found");
    let errors = view.errors;

    let error_count = move || errors.with(|errors| errors.len());

    view! {
        <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] p-2">
            <h2 class="text-[10px] font-semibold text-[#ff4444] flex items-center uppercase tracking-wide mb-1">
                <svg class="w-3 h-3 mr-1" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z"/>
                </svg>
                "Fehler"
                {move || {
                    let count = error_count();
                    (count > 0).then(|| view! {
                        <span class="ml-1.5 bg-[#ff4444] text-black text-[9px] px-1 py-0.5 rounded-full font-bold">
                            {count}
                        </span>
                    })
                }}
            </h2>
            <div id="errors" class="space-y-0.5 max-h-48 overflow-y-auto">
                <For
                    each=move || errors.get()
                    key=|error| error.clone()
                    children=|error| view! {
                        <p class="text-red-500 text-[11px] font-mono">{error}</p>
                    }
                />
            </div>
        </div>
    }
}
