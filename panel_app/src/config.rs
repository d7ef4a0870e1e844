//! Where the panel finds its WebSocket server.

/// Port the panel server listens on for WebSocket clients.
pub const DEFAULT_WS_PORT: u16 = 9000;
const FALLBACK_HOST: &str = "127.0.0.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub ws_url: String,
}

impl PanelConfig {
    /// Build the config from the current page location.
    pub fn from_window() -> Self {
        let (hostname, search) = web_sys::window()
            .map(|window| {
                let location = window.location();
                (
                    location.hostname().unwrap_or_default(),
                    location.search().unwrap_or_default(),
                )
            })
            .unwrap_or_default();

        Self { ws_url: resolve_ws_url(&hostname, &search) }
    }
}

/// Pick the WebSocket URL: a `ws=` query parameter wins, otherwise the page's
/// host on [`DEFAULT_WS_PORT`].
pub fn resolve_ws_url(hostname: &str, search: &str) -> String {
    let explicit = search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.strip_prefix("ws="))
        .find(|url| !url.is_empty());
    if let Some(url) = explicit {
        return url.to_string();
    }

    let host = if hostname.is_empty() { FALLBACK_HOST } else { hostname };
    format!("ws://{}:{}", host, DEFAULT_WS_PORT)
}
