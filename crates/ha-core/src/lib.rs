//! Core types for Home Assistant
//!
//! This crate provides the fundamental types shared by the state store, the
//! entity framework and integrations: EntityId, State, and the well-known
//! state values.

mod entity_id;
mod state;

pub use entity_id::{slugify, EntityId, EntityIdError};
pub use state::State;

/// Well-known state values
pub mod states {
    pub const STATE_ON: &str = "on";
    pub const STATE_OFF: &str = "off";
    pub const STATE_PLAYING: &str = "playing";
    pub const STATE_PAUSED: &str = "paused";

    /// Rendered when an entity reports no state
    pub const STATE_UNKNOWN: &str = "unknown";
}
