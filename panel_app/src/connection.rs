use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use panel_common::{decode_server_message, ClientMessage, Command, InboundEvent};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, MessageEvent, WebSocket};

use crate::dispatcher::{CommandSink, SendError};

type Handler = Box<dyn FnMut(&InboundEvent)>;

// ========== Event Registry ==========

/// Handlers keyed by event name, invoked once per message in receipt order.
#[derive(Default)]
pub struct EventRegistry {
    handlers: HashMap<String, Vec<Handler>>,
    fallback: Option<Handler>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events named `name`. Handlers for the same name
    /// run in registration order.
    pub fn on(&mut self, name: impl Into<String>, handler: impl FnMut(&InboundEvent) + 'static) {
        self.handlers.entry(name.into()).or_default().push(Box::new(handler));
    }

    /// Handler for events nobody registered for.
    pub fn on_unrecognized(&mut self, handler: impl FnMut(&InboundEvent) + 'static) {
        self.fallback = Some(Box::new(handler));
    }

    /// Deliver one event. Returns the number of handlers that ran.
    pub fn dispatch(&mut self, event: &InboundEvent) -> usize {
        if let Some(handlers) = self.handlers.get_mut(event.name()) {
            if !handlers.is_empty() {
                for handler in handlers.iter_mut() {
                    handler(event);
                }
                return handlers.len();
            }
        }

        match self.fallback.as_mut() {
            Some(fallback) => {
                fallback(event);
                1
            }
            None => {
                log::warn!("No handler for message type: {}", event.name());
                0
            }
        }
    }
}

// ========== Connection Manager ==========

/// The page's single WebSocket connection to the panel server.
#[derive(Clone, Copy)]
pub struct ConnectionManager {
    pub connected: ReadSignal<bool>,
    set_connected: WriteSignal<bool>,
    ws: StoredValue<Option<WebSocket>, LocalStorage>,
    ws_url: StoredValue<String>,
    registry: StoredValue<EventRegistry, LocalStorage>,
}

impl ConnectionManager {
    /// Create the manager without opening the socket; register handlers, then
    /// call [`ConnectionManager::connect`].
    pub fn new(url: impl Into<String>) -> Self {
        let (connected, set_connected) = signal(false);
        Self {
            connected,
            set_connected,
            ws: StoredValue::new_local(None),
            ws_url: StoredValue::new(url.into()),
            registry: StoredValue::new_local(EventRegistry::new()),
        }
    }

    pub fn on_event(&self, name: &str, handler: impl FnMut(&InboundEvent) + 'static) {
        self.registry.update_value(|registry| registry.on(name, handler));
    }

    pub fn on_unrecognized(&self, handler: impl FnMut(&InboundEvent) + 'static) {
        self.registry.update_value(|registry| registry.on_unrecognized(handler));
    }

    pub fn url(&self) -> String {
        self.ws_url.get_value()
    }

    pub fn connect(&self) {
        let url = self.ws_url.get_value();
        let ws = match WebSocket::new(&url) {
            Ok(ws) => ws,
            Err(e) => {
                log::error!("Failed to create WebSocket for {}: {:?}", url, e);
                return;
            }
        };

        // On open
        let set_connected = self.set_connected;
        let onopen_callback = Closure::wrap(Box::new(move |_| {
            set_connected.set(true);
            log::info!("Connected to WebSocket");
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));
        onopen_callback.forget();

        // On message - text frames only, one JSON envelope each
        let registry = self.registry;
        let onmessage_callback = Closure::wrap(Box::new(move |e: MessageEvent| {
            let Ok(text) = e.data().dyn_into::<js_sys::JsString>() else {
                log::warn!("Ignoring non-text WebSocket frame");
                return;
            };
            let text: String = text.into();
            log::debug!("Message from WebSocket: {}", text);

            match decode_server_message(&text) {
                Ok(event) => {
                    registry.update_value(|registry| {
                        registry.dispatch(&event);
                    });
                }
                Err(e) => log::warn!("Dropping message: {}", e),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));
        onmessage_callback.forget();

        // On error
        let set_connected_err = self.set_connected;
        let onerror_callback = Closure::wrap(Box::new(move |e: ErrorEvent| {
            log::error!("WebSocket error: {:?}", e);
            set_connected_err.set(false);
        }) as Box<dyn FnMut(ErrorEvent)>);
        ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));
        onerror_callback.forget();

        // On close
        let set_connected_close = self.set_connected;
        let onclose_callback = Closure::wrap(Box::new(move |e: web_sys::CloseEvent| {
            log::warn!("WebSocket closed: code={}, reason={}", e.code(), e.reason());
            set_connected_close.set(false);
        }) as Box<dyn FnMut(web_sys::CloseEvent)>);
        ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
        onclose_callback.forget();

        self.ws.set_value(Some(ws));
    }

    /// Send a command as a JSON text frame. Nothing is queued while offline.
    pub fn send(&self, command: &Command) -> Result<(), SendError> {
        let ws = self
            .ws
            .get_value()
            .filter(|ws| ws.ready_state() == WebSocket::OPEN)
            .ok_or(SendError::NotConnected)?;

        let json = serde_json::to_string(&ClientMessage::Command(command.clone()))
            .map_err(|e| SendError::Serialization(e.to_string()))?;
        ws.send_with_str(&json)
            .map_err(|e| SendError::Transport(format!("{:?}", e)))
    }
}

impl CommandSink for ConnectionManager {
    fn send(&self, command: &Command) -> Result<(), SendError> {
        ConnectionManager::send(self, command)
    }
}
