//! Fan domain

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bitflags::bitflags;
use ha_core::states::{STATE_OFF, STATE_ON};
use serde_json::{json, Value};
use thiserror::Error;

use crate::Entity;

pub const DOMAIN: &str = "fan";

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FanEntityFeature: u32 {
        const SET_SPEED = 1;
    }
}

/// Named fan speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FanSpeed {
    Off,
    Low,
    Medium,
    High,
}

impl FanSpeed {
    pub const ALL: [FanSpeed; 4] = [Self::Off, Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A speed name that is not one of the named fan speeds
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown fan speed '{0}'")]
pub struct UnknownFanSpeed(pub String);

impl FromStr for FanSpeed {
    type Err = UnknownFanSpeed;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.as_str() == s)
            .ok_or_else(|| UnknownFanSpeed(s.to_string()))
    }
}

/// A fan with on/off and named speeds
#[async_trait]
pub trait FanEntity: Entity {
    fn supported_features(&self) -> FanEntityFeature;

    fn is_on(&self) -> Option<bool>;

    fn speed(&self) -> Option<FanSpeed> {
        None
    }

    fn speed_list(&self) -> Vec<FanSpeed> {
        Vec::new()
    }

    async fn set_speed(&self, speed: FanSpeed) -> bool;

    /// Turn on, optionally at a given speed
    async fn turn_on(&self, speed: Option<FanSpeed>) -> bool;

    async fn turn_off(&self) -> bool;
}

/// Render a fan's state value
pub fn state_of<E: FanEntity + ?Sized>(entity: &E) -> Option<String> {
    entity
        .is_on()
        .map(|on| if on { STATE_ON } else { STATE_OFF }.to_string())
}

/// Render a fan's state attributes
pub fn attributes_of<E: FanEntity + ?Sized>(entity: &E) -> HashMap<String, Value> {
    let speed_list: Vec<&str> = entity.speed_list().iter().map(FanSpeed::as_str).collect();
    let mut attributes = HashMap::from([
        (
            "supported_features".to_string(),
            json!(entity.supported_features().bits()),
        ),
        ("speed_list".to_string(), json!(speed_list)),
    ]);
    if let Some(speed) = entity.speed() {
        attributes.insert("speed".to_string(), json!(speed.as_str()));
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_speed() {
        assert_eq!("medium".parse::<FanSpeed>().unwrap(), FanSpeed::Medium);
    }

    #[test]
    fn test_parse_unknown_speed() {
        let err = "turbo".parse::<FanSpeed>().unwrap_err();
        assert_eq!(err, UnknownFanSpeed("turbo".to_string()));
        assert_eq!(err.to_string(), "unknown fan speed 'turbo'");
    }
}
