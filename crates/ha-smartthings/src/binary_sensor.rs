//! Binary sensors through the SmartThings cloud API
//!
//! Every supported capability on a device becomes its own binary sensor
//! entity, so one multi-sensor can yield several entities.

use std::collections::HashMap;
use std::sync::Arc;

use ha_entity::binary_sensor::{self, BinarySensorDeviceClass, BinarySensorEntity};
use ha_entity::{Entity, UpdateRequester};
use serde_json::Value;
use smartthings_api::{attribute, capability, Device};
use tracing::trace;

use crate::config::SmartThingsConfig;
use crate::entity::SmartThingsEntity;

/// Capability -> (reported attribute, device class)
///
/// Order matters: matched capabilities are returned in this order.
pub const CAPABILITY_TO_ATTRIB: [(&str, &str, BinarySensorDeviceClass); 9] = [
    (
        capability::ACCELERATION_SENSOR,
        attribute::ACCELERATION,
        BinarySensorDeviceClass::Moving,
    ),
    (
        capability::CONTACT_SENSOR,
        attribute::CONTACT,
        BinarySensorDeviceClass::Opening,
    ),
    (
        capability::FILTER_STATUS,
        attribute::FILTER_STATUS,
        BinarySensorDeviceClass::Problem,
    ),
    (
        capability::MOTION_SENSOR,
        attribute::MOTION,
        BinarySensorDeviceClass::Motion,
    ),
    (
        capability::PRESENCE_SENSOR,
        attribute::PRESENCE,
        BinarySensorDeviceClass::Presence,
    ),
    (
        capability::SOUND_SENSOR,
        attribute::SOUND,
        BinarySensorDeviceClass::Sound,
    ),
    (
        capability::TAMPER_ALERT,
        attribute::TAMPER,
        BinarySensorDeviceClass::Problem,
    ),
    (capability::VALVE, attribute::VALVE, BinarySensorDeviceClass::Opening),
    (
        capability::WATER_SENSOR,
        attribute::WATER,
        BinarySensorDeviceClass::Moisture,
    ),
];

/// Supported capabilities of a device, in catalog order
///
/// An empty result means the device gets no binary sensors.
pub fn get_capabilities<S: AsRef<str>>(capabilities: &[S]) -> Vec<&'static str> {
    CAPABILITY_TO_ATTRIB
        .iter()
        .map(|(capability, _, _)| *capability)
        .filter(|capability| capabilities.iter().any(|c| c.as_ref() == *capability))
        .collect()
}

/// Attribute reported under a supported capability
pub fn attribute_for(capability: &str) -> Option<&'static str> {
    CAPABILITY_TO_ATTRIB
        .iter()
        .find(|(c, _, _)| *c == capability)
        .map(|(_, attribute, _)| *attribute)
}

/// Device class of a supported attribute
pub fn device_class_for(attribute: &str) -> Option<BinarySensorDeviceClass> {
    CAPABILITY_TO_ATTRIB
        .iter()
        .find(|(_, a, _)| *a == attribute)
        .map(|(_, _, class)| *class)
}

/// Unique id of the binary sensor for one attribute of a device
pub fn unique_id(device_id: &str, attribute: &str) -> String {
    format!("{device_id}.{attribute}")
}

/// One attribute of a SmartThings device as a binary sensor
pub struct SmartThingsBinarySensor {
    base: SmartThingsEntity,
    attribute: &'static str,
}

impl SmartThingsBinarySensor {
    pub fn new(
        device: Arc<Device>,
        attribute: &'static str,
        config: Arc<SmartThingsConfig>,
        updates: UpdateRequester,
    ) -> Self {
        Self {
            base: SmartThingsEntity::new(device, config, updates),
            attribute,
        }
    }

    pub fn attribute(&self) -> &'static str {
        self.attribute
    }
}

impl Entity for SmartThingsBinarySensor {
    fn domain(&self) -> &'static str {
        binary_sensor::DOMAIN
    }

    fn unique_id(&self) -> String {
        unique_id(self.base.device().device_id(), self.attribute)
    }

    fn name(&self) -> String {
        format!("{} {}", self.base.device().label(), self.attribute)
    }

    fn state(&self) -> Option<String> {
        binary_sensor::state_of(self)
    }

    fn attributes(&self) -> HashMap<String, Value> {
        binary_sensor::attributes_of(self)
    }
}

impl BinarySensorEntity for SmartThingsBinarySensor {
    fn is_on(&self) -> Option<bool> {
        let status = self.base.device().status();
        if status.value(self.attribute).is_none() {
            trace!(attribute = self.attribute, "No value reported yet");
            return None;
        }
        Some(status.is_on(self.attribute))
    }

    fn device_class(&self) -> Option<BinarySensorDeviceClass> {
        device_class_for(self.attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{device, device_with_status, RecordingApi};
    use smartthings_api::DeviceStatus;
    use std::collections::HashSet;

    fn sensor(device: Arc<Device>, attribute: &'static str) -> SmartThingsBinarySensor {
        let (updates, _) = UpdateRequester::channel();
        SmartThingsBinarySensor::new(
            device,
            attribute,
            Arc::new(SmartThingsConfig::default()),
            updates,
        )
    }

    #[test]
    fn test_get_capabilities_is_catalog_ordered() {
        let capabilities = [
            capability::WATER_SENSOR,
            capability::SWITCH,
            capability::CONTACT_SENSOR,
            capability::ACCELERATION_SENSOR,
        ];
        assert_eq!(
            get_capabilities(&capabilities),
            vec![
                capability::ACCELERATION_SENSOR,
                capability::CONTACT_SENSOR,
                capability::WATER_SENSOR
            ]
        );
    }

    #[test]
    fn test_get_capabilities_is_idempotent() {
        let capabilities = [
            capability::TAMPER_ALERT,
            capability::AUDIO_VOLUME,
            capability::MOTION_SENSOR,
            capability::VALVE,
        ];
        let first = get_capabilities(&capabilities);
        let as_set: HashSet<&str> = first.iter().copied().collect();
        let as_set: Vec<&str> = as_set.into_iter().collect();
        assert_eq!(get_capabilities(&as_set), first);
    }

    #[test]
    fn test_get_capabilities_empty_without_sensors() {
        assert!(get_capabilities(&[capability::SWITCH, capability::AUDIO_MUTE]).is_empty());
        assert!(get_capabilities::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_catalog_lookups() {
        assert_eq!(attribute_for(capability::VALVE), Some(attribute::VALVE));
        assert_eq!(attribute_for(capability::SWITCH), None);
        assert_eq!(
            device_class_for(attribute::WATER),
            Some(BinarySensorDeviceClass::Moisture)
        );
        assert_eq!(
            device_class_for(attribute::TAMPER),
            Some(BinarySensorDeviceClass::Problem)
        );
        assert_eq!(
            device_class_for(attribute::ACCELERATION),
            Some(BinarySensorDeviceClass::Moving)
        );
    }

    #[test]
    fn test_name_and_unique_id() {
        let device = device(RecordingApi::acknowledging(), &[capability::CONTACT_SENSOR]);
        let sensor = sensor(device, attribute::CONTACT);

        assert_eq!(sensor.name(), "Living Room contact");
        assert_eq!(sensor.unique_id(), "dev-1.contact");
        assert_eq!(sensor.domain(), "binary_sensor");
    }

    #[test]
    fn test_is_on_follows_snapshot() {
        let status = DeviceStatus::new("dev-1")
            .with_value(attribute::WATER, "wet")
            .with_value(attribute::CONTACT, "closed");
        let device = device_with_status(
            RecordingApi::acknowledging(),
            &[capability::WATER_SENSOR, capability::CONTACT_SENSOR],
            status,
        );

        let water = sensor(device.clone(), attribute::WATER);
        let contact = sensor(device.clone(), attribute::CONTACT);
        assert_eq!(water.is_on(), Some(true));
        assert_eq!(contact.is_on(), Some(false));
        assert_eq!(contact.state().as_deref(), Some("off"));

        device
            .status_mut()
            .update_attribute_value(attribute::CONTACT, "open");
        assert_eq!(contact.is_on(), Some(true));
    }

    #[test]
    fn test_missing_attribute_is_unknown() {
        let device = device(RecordingApi::acknowledging(), &[capability::MOTION_SENSOR]);
        let motion = sensor(device, attribute::MOTION);

        assert_eq!(motion.is_on(), None);
        assert_eq!(motion.state(), None);
        assert_eq!(motion.device_class(), Some(BinarySensorDeviceClass::Motion));
    }

    #[test]
    fn test_attributes_carry_device_class() {
        let device = device(RecordingApi::acknowledging(), &[capability::SOUND_SENSOR]);
        let sound = sensor(device, attribute::SOUND);

        assert_eq!(
            sound.attributes().get("device_class"),
            Some(&serde_json::json!("sound"))
        );
    }
}
