// SPDX-License-Identifier: MIT

//! WebSocket endpoint for the buyer↔admin chat.
//!
//! Per-connection lifecycle: connected (no room) → joined(room) →
//! disconnected. The transport drops the room subscription on disconnect;
//! there is no application-level cleanup beyond pruning empty rooms.

use crate::chat::{ClientEvent, ServerEvent};
use crate::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Mutable per-connection state.
#[derive(Default)]
struct ConnectionState {
    username: Option<String>,
    room: Option<String>,
    user_id: Option<String>,
}

pub async fn chat_ws(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Single writer task; room subscriptions feed it through this channel
    // so a re-join can swap subscriptions without touching the sink.
    let (out_tx, mut out_rx) = mpsc::channel::<ServerEvent>(32);
    let writer = tokio::spawn(async move {
        while let Some(event) = out_rx.recv().await {
            let Ok(text) = serde_json::to_string(&event) else {
                continue;
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut conn = ConnectionState::default();
    let mut subscription: Option<JoinHandle<()>> = None;

    while let Some(Ok(message)) = ws_receiver.next().await {
        let Ok(event) = serde_json::from_slice::<ClientEvent>(&message.into_data()) else {
            continue;
        };
        handle_event(event, &mut conn, &mut subscription, &state.rooms, &out_tx).await;
    }

    // Disconnected: drop the subscription, then prune the room.
    if let Some(task) = subscription.take() {
        task.abort();
        let _ = task.await;
    }
    if let Some(room) = conn.room.take() {
        state.rooms.leave(&room);
    }
    writer.abort();

    tracing::debug!("Chat connection closed");
}

/// Apply one client event to the connection's state.
async fn handle_event(
    event: ClientEvent,
    conn: &mut ConnectionState,
    subscription: &mut Option<JoinHandle<()>>,
    rooms: &crate::chat::RoomRegistry,
    out: &mpsc::Sender<ServerEvent>,
) {
    match event {
        ClientEvent::SetUsername { username } => {
            tracing::debug!(username, "Chat username set");
            conn.username = Some(username);
        }
        ClientEvent::JoinRoom { room_id, user_id } => {
            // At most one room per connection: joining again moves the
            // connection to the new room.
            if let Some(task) = subscription.take() {
                task.abort();
                let _ = task.await;
            }
            if let Some(previous) = conn.room.take() {
                rooms.leave(&previous);
            }

            let rx = rooms.join(&room_id);
            *subscription = Some(spawn_room_forwarder(rx, out.clone()));

            tracing::info!(room_id, user_id, "Connection joined chat room");
            conn.room = Some(room_id);
            conn.user_id = Some(user_id);
        }
        ClientEvent::SendMessage {
            room_id,
            message,
            sender_id,
        } => {
            let sender_username = conn
                .username
                .clone()
                .unwrap_or_else(|| "Anonymous".to_string());

            // Fire and forget: an empty room drops the message and the
            // sender is not told either way.
            rooms.send(
                &room_id,
                ServerEvent::ReceivedMessage {
                    sender_id,
                    message,
                    sender_username,
                },
            );
        }
    }
}

/// Forward room broadcasts to the connection's writer until either side
/// goes away. A lagged receiver skips what it missed and keeps going.
fn spawn_room_forwarder(
    mut rx: broadcast::Receiver<ServerEvent>,
    out: mpsc::Sender<ServerEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if out.send(event).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Chat subscriber lagged, messages dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
