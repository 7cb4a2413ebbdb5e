//! SmartThings integration
//!
//! Projects the capabilities of SmartThings devices onto Home Assistant
//! entities. The broker assigns each device's capabilities to platforms,
//! each platform builds its entities from those assignments, and every
//! entity action goes through the optimistic update protocol: send the
//! command, and on acknowledgement write the presumed result into the
//! device snapshot and re-render.

pub mod binary_sensor;
pub mod broker;
pub mod config;
mod entity;
pub mod error;
pub mod fan;
pub mod media_player;
pub mod optimistic;
pub mod sensor;
pub mod setup;

#[cfg(test)]
mod test_util;

pub use binary_sensor::SmartThingsBinarySensor;
pub use broker::{DeviceBroker, DeviceEvent, Platform};
pub use config::SmartThingsConfig;
pub use entity::SmartThingsEntity;
pub use error::{ConfigError, ConfigResult, SetupError};
pub use fan::SmartThingsFan;
pub use media_player::SmartThingsMediaPlayer;
pub use sensor::SmartThingsSensor;
pub use setup::{
    dispatch_event, setup_binary_sensors, setup_entry, setup_fans, setup_media_players,
    setup_platform, setup_sensors,
};
