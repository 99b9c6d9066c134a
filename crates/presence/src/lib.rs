//! Optional multiplayer presence feed.
//!
//! Connects to a line-delimited JSON endpoint and tracks who else is online
//! plus a log of notifications. The game never depends on it; the host only
//! reads [`PresenceState`] for display.

pub mod client;
pub mod error;
pub mod event;

pub use client::{parse_endpoint, PresenceClient};
pub use error::PresenceError;
pub use event::{PresenceEvent, PresenceState, MAX_NOTIFICATIONS};
