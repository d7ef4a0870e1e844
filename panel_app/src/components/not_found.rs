use leptos::prelude::*;

/// Shown for every path except `/`.
///
/// The dev server answers unknown paths with `index.html` and status 404, so
/// the response code is already right when the client renders this page.
#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-[#0a0a0a] flex flex-col items-center justify-center text-white">
            <h1 class="text-2xl font-semibold mb-2">"404"</h1>
            <p class="text-[#888888] text-sm mb-4">"Diese Seite existiert nicht."</p>
            <a href="/" class="text-[#00d9ff] text-sm hover:underline">"Zur Steuerung"</a>
        </div>
    }
}
