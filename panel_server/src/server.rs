//! WebSocket side of the dev server: accept loop, per-client loop and the
//! tick broadcaster.
//!
//! Every snapshot is sent while the machine lock is held, so clients see
//! snapshots in the order the machine produced them.

use futures_util::StreamExt;
use panel_common::ServerMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};

use crate::handlers::handle_client_text;
use crate::machine::SimulatedMachine;
use crate::session::ClientManager;

pub const BINARY_NOT_SUPPORTED: &str = "Binary frames are not supported";

/// Shared state of the running server.
#[derive(Clone)]
pub struct Panel {
    pub machine: Arc<Mutex<SimulatedMachine>>,
    pub clients: Arc<ClientManager>,
}

impl Panel {
    pub fn new(machine: SimulatedMachine) -> Self {
        Self {
            machine: Arc::new(Mutex::new(machine)),
            clients: Arc::new(ClientManager::new()),
        }
    }
}

/// Accept WebSocket clients until the listener fails.
pub async fn serve(listener: TcpListener, panel: Panel) {
    while let Ok((stream, addr)) = listener.accept().await {
        info!("New WebSocket connection from {}", addr);
        tokio::spawn(handle_connection(stream, panel.clone()));
    }
}

/// Advance the machine every `period` and push the snapshot to all clients.
pub async fn run_ticker(panel: Panel, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        let mut machine = panel.machine.lock().await;
        machine.tick();
        if panel.clients.client_count().await > 0 {
            panel
                .clients
                .broadcast_all(&ServerMessage::StateUpdate(machine.snapshot()))
                .await;
        }
    }
}

pub async fn handle_connection(stream: TcpStream, panel: Panel) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            error!("WebSocket handshake failed: {}", e);
            return;
        }
    };

    let (ws_sender, mut ws_receiver) = ws_stream.split();

    // Register and send the first snapshot in one step so no tick broadcast
    // can overtake it.
    let client_id = {
        let machine = panel.machine.lock().await;
        let id = panel.clients.register(Arc::new(Mutex::new(ws_sender))).await;
        panel
            .clients
            .send_to_client(id, &ServerMessage::StateUpdate(machine.snapshot()))
            .await;
        id
    };

    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let mut machine = panel.machine.lock().await;
                let result = handle_client_text(&mut machine, &text);
                panel.clients.send_to_client(client_id, &result.reply).await;
                if result.state_changed {
                    panel
                        .clients
                        .broadcast_all(&ServerMessage::StateUpdate(machine.snapshot()))
                        .await;
                }
            }
            Ok(Message::Binary(_)) => {
                warn!("Client {} sent a binary frame", client_id);
                panel
                    .clients
                    .send_to_client(client_id, &ServerMessage::error(BINARY_NOT_SUPPORTED))
                    .await;
            }
            Ok(Message::Close(_)) => break,
            Err(e) => {
                error!("WebSocket error from client {}: {}", client_id, e);
                break;
            }
            _ => {}
        }
    }

    panel.clients.unregister(client_id).await;
    info!("WebSocket connection closed for client {}", client_id);
}
