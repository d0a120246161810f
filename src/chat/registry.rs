//! In-memory room registry for the realtime chat.
//!
//! Rooms are ephemeral broadcast groups keyed by a client-supplied id. A
//! room exists from the moment the first participant subscribes until the
//! last subscriber drops; nothing is persisted and there is no history.
//!
//! If this ever runs as more than one process, room membership has to move
//! into an external broker; this registry is deliberately per-process.

use crate::chat::events::ServerEvent;
use dashmap::DashMap;
use tokio::sync::broadcast;

/// Per-room broadcast capacity. A slow consumer past this many queued
/// messages starts losing the oldest ones (fire-and-forget semantics).
const ROOM_CHANNEL_CAPACITY: usize = 64;

/// Registry of live chat rooms.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, broadcast::Sender<ServerEvent>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a room, creating it if this is the first participant.
    pub fn join(&self, room_id: &str) -> broadcast::Receiver<ServerEvent> {
        let receiver = self
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .subscribe();

        tracing::debug!(room_id, "Connection joined room");
        receiver
    }

    /// Broadcast an event to every current subscriber of the room,
    /// including the sender's own subscription.
    ///
    /// Returns the number of subscribers reached; an unknown or empty room
    /// is a silent no-op.
    pub fn send(&self, room_id: &str, event: ServerEvent) -> usize {
        match self.rooms.get(room_id) {
            Some(tx) => tx.send(event).unwrap_or(0),
            None => 0,
        }
    }

    /// Drop a room once its last subscriber is gone.
    ///
    /// Callers must drop their receiver before calling this, otherwise the
    /// room is still occupied and stays.
    pub fn leave(&self, room_id: &str) {
        self.rooms
            .remove_if(room_id, |_, tx| tx.receiver_count() == 0);
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of subscribers currently in a room.
    pub fn participant_count(&self, room_id: &str) -> usize {
        self.rooms
            .get(room_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}
