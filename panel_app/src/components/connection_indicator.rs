use leptos::prelude::*;
use crate::connection::ConnectionManager;

#[component]
pub fn ConnectionIndicator() -> impl IntoView {
    let connection = use_context::<ConnectionManager>().expect("ConnectionManager not found");
    let connected = connection.connected;
    let url = connection.url();

    view! {
        <div class="flex items-center space-x-1.5" title=url>
            <div class={move || if connected.get() {
                "w-1.5 h-1.5 bg-[#00d9ff] rounded-full animate-pulse"
            } else {
                "w-1.5 h-1.5 bg-[#ff4444] rounded-full"
            }}></div>
            <span class="text-[10px] text-[#888888]">
                {move || if connected.get() { "Verbunden" } else { "Nicht verbunden" }}
            </span>
        </div>
    }
}
