use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::features::realtime::manager::{Channel, ConnectionManager};

/// Upgrade handler for the staff dashboard channel
pub async fn ws_admin(
    ws: WebSocketUpgrade,
    State(manager): State<Arc<ConnectionManager>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, manager, Channel::Staff))
}

/// Upgrade handler for the citizen channel
pub async fn ws_citizen(
    ws: WebSocketUpgrade,
    State(manager): State<Arc<ConnectionManager>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, manager, Channel::Citizen))
}

/// Manage a single WebSocket session after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the session with `ConnectionManager`.
///   2. Spawns a sender task that forwards broadcast messages to the sink.
///   3. Echoes inbound text frames on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, manager: Arc<ConnectionManager>, channel: Channel) {
    let (conn_id, mut rx) = manager.add(channel).await;
    tracing::info!(conn_id = %conn_id, ?channel, "Realtime session connected");

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id;
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: inbound frames beyond connect are just echoed.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let reply = match channel {
                    Channel::Staff => format!("Admin message received: {}", text),
                    Channel::Citizen => format!("Message received: {}", text),
                };
                manager
                    .send_to(channel, conn_id, Message::Text(reply.into()))
                    .await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    manager.remove(channel, conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Realtime session disconnected");
}
