// SPDX-License-Identifier: MIT

//! Realtime chat: room registry and wire events.

pub mod events;
pub mod registry;

pub use events::{ClientEvent, ServerEvent};
pub use registry::RoomRegistry;
