//! Fans through the SmartThings cloud API

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ha_entity::fan::{self, FanEntity, FanEntityFeature, FanSpeed};
use ha_entity::{Entity, UpdateRequester};
use serde_json::Value;
use smartthings_api::{capability, Device};

use crate::config::SmartThingsConfig;
use crate::entity::SmartThingsEntity;
use crate::optimistic;

/// A device needs all of these to become a fan
pub const REQUIRED: [&str; 2] = [capability::SWITCH, capability::FAN_SPEED];

/// Both required capabilities if the device has them
pub fn get_capabilities<S: AsRef<str>>(capabilities: &[S]) -> Option<Vec<&'static str>> {
    let qualifies = REQUIRED
        .iter()
        .all(|required| capabilities.iter().any(|c| c.as_ref() == *required));
    qualifies.then(|| REQUIRED.to_vec())
}

/// Raw speed level reported by the device to a named speed
pub fn value_to_speed(value: i64) -> Option<FanSpeed> {
    match value {
        0 => Some(FanSpeed::Off),
        1 => Some(FanSpeed::Low),
        2 => Some(FanSpeed::Medium),
        3 => Some(FanSpeed::High),
        _ => None,
    }
}

pub fn speed_to_value(speed: FanSpeed) -> i64 {
    match speed {
        FanSpeed::Off => 0,
        FanSpeed::Low => 1,
        FanSpeed::Medium => 2,
        FanSpeed::High => 3,
    }
}

pub struct SmartThingsFan {
    base: SmartThingsEntity,
}

impl SmartThingsFan {
    pub fn new(
        device: Arc<Device>,
        config: Arc<SmartThingsConfig>,
        updates: UpdateRequester,
    ) -> Self {
        Self {
            base: SmartThingsEntity::new(device, config, updates),
        }
    }
}

impl Entity for SmartThingsFan {
    fn domain(&self) -> &'static str {
        fan::DOMAIN
    }

    fn unique_id(&self) -> String {
        self.base.device().device_id().to_string()
    }

    fn name(&self) -> String {
        self.base.device().label().to_string()
    }

    fn state(&self) -> Option<String> {
        fan::state_of(self)
    }

    fn attributes(&self) -> HashMap<String, Value> {
        fan::attributes_of(self)
    }
}

#[async_trait]
impl FanEntity for SmartThingsFan {
    fn supported_features(&self) -> FanEntityFeature {
        FanEntityFeature::SET_SPEED
    }

    fn is_on(&self) -> Option<bool> {
        Some(self.base.device().status().switch())
    }

    fn speed(&self) -> Option<FanSpeed> {
        self.base
            .device()
            .status()
            .fan_speed()
            .and_then(value_to_speed)
    }

    fn speed_list(&self) -> Vec<FanSpeed> {
        FanSpeed::ALL.to_vec()
    }

    async fn set_speed(&self, speed: FanSpeed) -> bool {
        let device = self.base.device();
        let request = device.set_fan_speed(speed_to_value(speed), self.base.config().optimistic);
        optimistic::execute(&self.base, device.device_id(), "setFanSpeed", request, |_| {}).await
    }

    async fn turn_on(&self, speed: Option<FanSpeed>) -> bool {
        if let Some(speed) = speed {
            return self.set_speed(speed).await;
        }
        let device = self.base.device();
        let request = device.switch_on(self.base.config().optimistic);
        optimistic::execute(&self.base, device.device_id(), "on", request, |_| {}).await
    }

    async fn turn_off(&self) -> bool {
        let device = self.base.device();
        let request = device.switch_off(self.base.config().optimistic);
        optimistic::execute(&self.base, device.device_id(), "off", request, |_| {}).await
    }
}
