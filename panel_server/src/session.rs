//! Connected panel clients.
//!
//! A message is serialized once per call and the same frame is written to
//! every target socket. A client whose socket refuses a write is dropped from
//! the table; its connection task still unregisters it on close.

use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use panel_common::ServerMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{Mutex, RwLock};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Write half of a client's WebSocket.
pub type WsSender = Arc<Mutex<SplitSink<WebSocketStream<TcpStream>, Message>>>;

/// Every connected client, keyed by the id handed out at registration.
pub struct ClientManager {
    clients: RwLock<HashMap<Uuid, WsSender>>,
}

impl ClientManager {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, sender: WsSender) -> Uuid {
        let id = Uuid::new_v4();
        let mut clients = self.clients.write().await;
        clients.insert(id, sender);
        info!("Client {} registered ({} total)", id, clients.len());
        id
    }

    /// Returns false if the client was already gone.
    pub async fn unregister(&self, client_id: Uuid) -> bool {
        let mut clients = self.clients.write().await;
        let removed = clients.remove(&client_id).is_some();
        if removed {
            info!("Client {} unregistered ({} remaining)", client_id, clients.len());
        }
        removed
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Send to one client. Returns whether the frame was written.
    pub async fn send_to_client(&self, client_id: Uuid, message: &ServerMessage) -> bool {
        let Some(frame) = encode(message) else {
            return false;
        };
        let Some(sender) = self.clients.read().await.get(&client_id).cloned() else {
            debug!("Client {} is not registered, dropping frame", client_id);
            return false;
        };

        if write_frame(client_id, &sender, frame).await {
            true
        } else {
            self.drop_clients(&[client_id]).await;
            false
        }
    }

    /// Send to every client. Returns how many were reached.
    pub async fn broadcast_all(&self, message: &ServerMessage) -> usize {
        let Some(frame) = encode(message) else {
            return 0;
        };
        // Copy the senders out so a slow socket does not hold the table lock.
        let targets: Vec<(Uuid, WsSender)> = self
            .clients
            .read()
            .await
            .iter()
            .map(|(id, sender)| (*id, Arc::clone(sender)))
            .collect();

        let mut failed = Vec::new();
        for (id, sender) in &targets {
            if !write_frame(*id, sender, frame.clone()).await {
                failed.push(*id);
            }
        }
        self.drop_clients(&failed).await;
        targets.len() - failed.len()
    }

    async fn drop_clients(&self, ids: &[Uuid]) {
        if ids.is_empty() {
            return;
        }
        let mut clients = self.clients.write().await;
        for id in ids {
            if clients.remove(id).is_some() {
                warn!("Dropped client {} after a failed write", id);
            }
        }
    }
}

impl Default for ClientManager {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(json) => Some(Message::Text(json)),
        Err(e) => {
            warn!("Failed to serialize server message: {}", e);
            None
        }
    }
}

async fn write_frame(client_id: Uuid, sender: &WsSender, frame: Message) -> bool {
    match sender.lock().await.send(frame).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to send to client {}: {}", client_id, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tokio::net::TcpListener;
    use tokio_tungstenite::{accept_async, connect_async, MaybeTlsStream};

    type ClientSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

    /// Server-side write half plus the browser-side socket it talks to.
    async fn socket_pair() -> (WsSender, ClientSocket) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = tokio::spawn(async move { connect_async(format!("ws://{}", addr)).await.unwrap().0 });

        let (stream, _) = listener.accept().await.unwrap();
        let (sink, _stream) = accept_async(stream).await.unwrap().split();
        (Arc::new(Mutex::new(sink)), client.await.unwrap())
    }

    async fn read_text(client: &mut ClientSocket) -> String {
        match client.next().await {
            Some(Ok(Message::Text(text))) => text,
            other => panic!("expected a text frame, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_client() {
        let manager = ClientManager::new();
        let (sender_a, mut client_a) = socket_pair().await;
        let (sender_b, mut client_b) = socket_pair().await;
        manager.register(sender_a).await;
        manager.register(sender_b).await;

        let message = ServerMessage::confirmation("Programm fortgesetzt");
        assert_eq!(manager.broadcast_all(&message).await, 2);

        let expected = serde_json::to_string(&message).unwrap();
        assert_eq!(read_text(&mut client_a).await, expected);
        assert_eq!(read_text(&mut client_b).await, expected);
    }

    #[tokio::test]
    async fn test_send_to_client_targets_one_socket() {
        let manager = ClientManager::new();
        let (sender, mut client) = socket_pair().await;
        let id = manager.register(sender).await;

        assert!(manager.send_to_client(id, &ServerMessage::error("X")).await);
        assert!(read_text(&mut client).await.contains("\"X\""));
        assert!(!manager.send_to_client(Uuid::new_v4(), &ServerMessage::error("Y")).await);
    }

    #[tokio::test]
    async fn test_failed_write_drops_the_client() {
        let manager = ClientManager::new();
        let (closed, _client) = socket_pair().await;
        let (open, mut live_client) = socket_pair().await;
        closed.lock().await.close().await.unwrap();
        manager.register(closed).await;
        manager.register(open).await;

        assert_eq!(manager.broadcast_all(&ServerMessage::confirmation("ok")).await, 1);
        assert_eq!(manager.client_count().await, 1);
        assert!(read_text(&mut live_client).await.contains("confirmation"));
    }

    #[tokio::test]
    async fn test_unregister_is_reported_once() {
        let manager = ClientManager::new();
        let (sender, _client) = socket_pair().await;
        let id = manager.register(sender).await;

        assert!(manager.unregister(id).await);
        assert!(!manager.unregister(id).await);
        assert_eq!(manager.client_count().await, 0);
    }
}
