//! Binary sensor domain

use std::collections::HashMap;
use std::fmt;

use ha_core::states::{STATE_OFF, STATE_ON};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::Entity;

pub const DOMAIN: &str = "binary_sensor";

/// What a binary sensor's on/off state means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinarySensorDeviceClass {
    /// On means wet
    Moisture,
    /// On means motion detected
    Motion,
    /// On means moving
    Moving,
    /// On means open
    Opening,
    /// On means home
    Presence,
    /// On means a problem was detected
    Problem,
    /// On means sound detected
    Sound,
}

impl BinarySensorDeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moisture => "moisture",
            Self::Motion => "motion",
            Self::Moving => "moving",
            Self::Opening => "opening",
            Self::Presence => "presence",
            Self::Problem => "problem",
            Self::Sound => "sound",
        }
    }
}

impl fmt::Display for BinarySensorDeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read-only on/off entity
pub trait BinarySensorEntity: Entity {
    /// `None` when the underlying value is not known yet
    fn is_on(&self) -> Option<bool>;

    fn device_class(&self) -> Option<BinarySensorDeviceClass> {
        None
    }
}

/// Render a binary sensor's state value
pub fn state_of<E: BinarySensorEntity + ?Sized>(entity: &E) -> Option<String> {
    entity
        .is_on()
        .map(|on| if on { STATE_ON } else { STATE_OFF }.to_string())
}

/// Render a binary sensor's state attributes
pub fn attributes_of<E: BinarySensorEntity + ?Sized>(entity: &E) -> HashMap<String, Value> {
    let mut attributes = HashMap::new();
    if let Some(class) = entity.device_class() {
        attributes.insert("device_class".to_string(), json!(class.as_str()));
    }
    attributes
}
