use leptos::prelude::*;
use leptos::mount::mount_to_body;
use leptos_router::components::{Router, Routes, Route};
use leptos_router::path;
use panel_common::{EVENT_CONFIRMATION, EVENT_ERROR, EVENT_STATE_UPDATE};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod components;
pub mod config;
pub mod connection;
pub mod controller;
pub mod dispatcher;
pub mod notifications;
pub mod renderer;
pub mod view;

#[cfg(test)]
mod test_support;

use components::{NotFound, StatusPanel};
use config::PanelConfig;
use connection::ConnectionManager;
use controller::PanelController;
use notifications::BrowserNotifier;
use view::SignalView;

#[wasm_bindgen(start)]
pub fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    let config = PanelConfig::from_window();
    let view = SignalView::new();
    let connection = ConnectionManager::new(config.ws_url);

    // One controller for the page; every handler below runs on the event loop thread.
    let controller = Rc::new(RefCell::new(PanelController::new(view, BrowserNotifier)));
    for name in [EVENT_STATE_UPDATE, EVENT_ERROR, EVENT_CONFIRMATION] {
        let controller = Rc::clone(&controller);
        connection.on_event(name, move |event| {
            controller.borrow_mut().handle(event);
        });
    }
    connection.on_unrecognized(move |event| {
        controller.borrow_mut().handle(event);
    });

    log::info!("Connecting to {}", connection.url());
    connection.connect();

    provide_context(view);
    provide_context(connection);

    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=path!("/") view=StatusPanel />
            </Routes>
        </Router>
    }
}
