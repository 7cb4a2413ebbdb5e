//! Home Assistant entity framework
//!
//! Integrations expose devices as entities. This crate defines what an
//! entity looks like to the host (the `Entity` trait plus one trait per
//! domain), the vocabulary each domain uses (device classes, feature
//! flags, player states), and the `EntityPlatform` that registers entities
//! and renders their state into the state machine whenever they ask for it.

mod entity;
mod platform;

pub mod binary_sensor;
pub mod fan;
pub mod media_player;
pub mod sensor;

pub use entity::{Entity, UpdateRequester};
pub use platform::EntityPlatform;
