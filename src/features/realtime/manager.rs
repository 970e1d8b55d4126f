use std::collections::HashMap;

use axum::extract::ws::Message;
use serde::Serialize;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Channel sender half for pushing messages to a WebSocket connection
pub type WsSender = mpsc::UnboundedSender<Message>;

/// The two independent broadcast groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// officer/dept_head/admin dashboard sessions
    Staff,
    /// citizen sessions (best-effort side channel)
    Citizen,
}

/// Tracks all live dashboard sessions, in memory only.
///
/// A restart loses every subscriber; clients are expected to reconnect.
/// There is no durability, ordering guarantee, or replay: late joiners miss
/// prior events.
///
/// Thread-safe via interior `RwLock`; wrapped in `Arc` and shared across the
/// application.
pub struct ConnectionManager {
    staff: RwLock<HashMap<Uuid, WsSender>>,
    citizen: RwLock<HashMap<Uuid, WsSender>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            staff: RwLock::new(HashMap::new()),
            citizen: RwLock::new(HashMap::new()),
        }
    }

    fn group(&self, channel: Channel) -> &RwLock<HashMap<Uuid, WsSender>> {
        match channel {
            Channel::Staff => &self.staff,
            Channel::Citizen => &self.citizen,
        }
    }

    /// Register a new session.
    ///
    /// Returns the connection id and the receiver half of the message
    /// channel so the caller can forward messages to the WebSocket sink.
    pub async fn add(&self, channel: Channel) -> (Uuid, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn_id = Uuid::new_v4();
        self.group(channel).write().await.insert(conn_id, tx);
        (conn_id, rx)
    }

    /// Remove a session by its connection id
    pub async fn remove(&self, channel: Channel, conn_id: Uuid) {
        self.group(channel).write().await.remove(&conn_id);
    }

    /// Return the current number of live sessions in a group
    pub async fn connection_count(&self, channel: Channel) -> usize {
        self.group(channel).read().await.len()
    }

    /// Send a message to a single session. Returns false if it is gone.
    pub async fn send_to(&self, channel: Channel, conn_id: Uuid, message: Message) -> bool {
        self.group(channel)
            .read()
            .await
            .get(&conn_id)
            .map(|tx| tx.send(message).is_ok())
            .unwrap_or(false)
    }

    /// Broadcast a JSON-serialized event to every session in a group.
    ///
    /// A failed send drops only that session from the group; delivery to the
    /// remaining sessions continues. Returns the number of live sessions
    /// after the broadcast.
    pub async fn broadcast<T: Serialize>(&self, channel: Channel, event: &T) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize realtime event: {}", e);
                return self.connection_count(channel).await;
            }
        };

        let mut conns = self.group(channel).write().await;
        let before = conns.len();

        conns.retain(|conn_id, tx| {
            let delivered = tx.send(Message::Text(payload.clone().into())).is_ok();
            if !delivered {
                tracing::debug!(conn_id = %conn_id, "Dropping dead realtime session");
            }
            delivered
        });

        let dropped = before - conns.len();
        if dropped > 0 {
            tracing::info!(dropped, "Removed dead sessions during broadcast");
        }

        conns.len()
    }

    /// Broadcast a lifecycle event to the staff channel
    pub async fn broadcast_to_staff<T: Serialize>(&self, event: &T) -> usize {
        self.broadcast(Channel::Staff, event).await
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_manager_has_zero_connections() {
        let manager = ConnectionManager::new();

        assert_eq!(manager.connection_count(Channel::Staff).await, 0);
        assert_eq!(manager.connection_count(Channel::Citizen).await, 0);
    }

    #[tokio::test]
    async fn test_add_and_remove_track_counts() {
        let manager = ConnectionManager::new();

        let (conn_id, _rx) = manager.add(Channel::Staff).await;
        assert_eq!(manager.connection_count(Channel::Staff).await, 1);
        // Groups are independent
        assert_eq!(manager.connection_count(Channel::Citizen).await, 0);

        manager.remove(Channel::Staff, conn_id).await;
        assert_eq!(manager.connection_count(Channel::Staff).await, 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        let manager = ConnectionManager::new();

        let (_conn_id, _rx) = manager.add(Channel::Staff).await;
        manager.remove(Channel::Staff, Uuid::new_v4()).await;

        assert_eq!(manager.connection_count(Channel::Staff).await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_all_live_sessions() {
        let manager = ConnectionManager::new();

        let (_id1, mut rx1) = manager.add(Channel::Staff).await;
        let (_id2, mut rx2) = manager.add(Channel::Staff).await;

        let remaining = manager
            .broadcast(Channel::Staff, &serde_json::json!({"type": "ping"}))
            .await;
        assert_eq!(remaining, 2);

        assert!(matches!(rx1.recv().await, Some(Message::Text(_))));
        assert!(matches!(rx2.recv().await, Some(Message::Text(_))));
    }

    #[tokio::test]
    async fn test_broadcast_drops_only_dead_sessions() {
        let manager = ConnectionManager::new();

        let (_id1, mut rx1) = manager.add(Channel::Staff).await;
        let (_id2, rx2) = manager.add(Channel::Staff).await;
        let (_id3, mut rx3) = manager.add(Channel::Staff).await;

        // Second session dies before the broadcast
        drop(rx2);

        let remaining = manager
            .broadcast(Channel::Staff, &serde_json::json!({"type": "ping"}))
            .await;

        assert_eq!(remaining, 2);
        assert_eq!(manager.connection_count(Channel::Staff).await, 2);

        // First and third sessions still got the event
        assert!(matches!(rx1.recv().await, Some(Message::Text(_))));
        assert!(matches!(rx3.recv().await, Some(Message::Text(_))));
    }

    #[tokio::test]
    async fn test_broadcast_to_staff_does_not_reach_citizens() {
        let manager = ConnectionManager::new();

        let (_staff_id, mut staff_rx) = manager.add(Channel::Staff).await;
        let (_citizen_id, mut citizen_rx) = manager.add(Channel::Citizen).await;

        manager
            .broadcast_to_staff(&serde_json::json!({"type": "new_feedback"}))
            .await;

        assert!(matches!(staff_rx.recv().await, Some(Message::Text(_))));
        // Citizen channel saw nothing
        assert!(citizen_rx.try_recv().is_err());
    }
}
