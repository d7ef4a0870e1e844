// Development server for the machine status panel: serves the built client
// and drives a simulated machine over WebSocket.
// Run with: cargo run -p panel_server

mod config;
mod handlers;
mod http;
mod machine;
mod server;
mod session;

use config::ServerConfig;
use machine::SimulatedMachine;
use server::Panel;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let machine = SimulatedMachine::new(config.program_name.clone(), config.tape_length);
    info!("Simulated machine '{}' ready (speed {})", config.program_name, machine.speed());
    let panel = Panel::new(machine);

    // Static file server for the WASM client
    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let http_listener = match tokio::net::TcpListener::bind(&http_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind HTTP server on {}: {}", http_addr, e);
            return;
        }
    };
    info!("Serving {} on http://{}", config.static_dir.display(), http_addr);
    let app = http::router(&config.static_dir);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            error!("HTTP server stopped: {}", e);
        }
    });

    tokio::spawn(server::run_ticker(panel.clone(), config.tick));

    // Start WebSocket server
    let websocket_addr = format!("0.0.0.0:{}", config.ws_port);
    let ws_listener = match tokio::net::TcpListener::bind(&websocket_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind WebSocket server on {}: {}", websocket_addr, e);
            return;
        }
    };
    info!("WebSocket server listening on ws://{}", websocket_addr);
    info!("   Environment: PANEL_WS_PORT={}, PANEL_TICK_MS={}", config.ws_port, config.tick.as_millis());

    server::serve(ws_listener, panel).await;
}
