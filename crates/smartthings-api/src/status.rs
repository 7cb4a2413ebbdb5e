//! Device status snapshot
//!
//! The snapshot holds the last-known value of every attribute a device
//! reports. It is written by two parties: the push/poll path with
//! authoritative values, and entities applying optimistic updates after an
//! acknowledged command. Whichever write lands last wins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::attribute;
use crate::device::COMPONENT_MAIN;

/// The last-known state of a single attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeState {
    /// Raw value, scalar or structured
    pub value: Value,

    /// Unit of measurement, when the attribute carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Extra structured data reported alongside the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl AttributeState {
    /// Create a state holding only a value
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            unit: None,
            data: None,
        }
    }

    /// Create a state holding a value and its unit
    pub fn with_unit(value: impl Into<Value>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: Some(unit.into()),
            data: None,
        }
    }
}

/// Status snapshot of one device
///
/// Attributes of the `main` component are stored directly; attributes of
/// other components are kept per component id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    device_id: String,
    #[serde(default)]
    attributes: HashMap<String, AttributeState>,
    #[serde(default)]
    components: HashMap<String, HashMap<String, AttributeState>>,
}

impl DeviceStatus {
    /// Create an empty snapshot for a device
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            attributes: HashMap::new(),
            components: HashMap::new(),
        }
    }

    /// Builder-style helper that seeds a main-component attribute value
    pub fn with_value(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .insert(attribute.into(), AttributeState::new(value));
        self
    }

    /// Builder-style helper that seeds a main-component attribute with its
    /// full state
    pub fn with_state(mut self, attribute: impl Into<String>, state: AttributeState) -> Self {
        self.attributes.insert(attribute.into(), state);
        self
    }

    /// The device this snapshot belongs to
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// All main-component attributes
    pub fn attributes(&self) -> &HashMap<String, AttributeState> {
        &self.attributes
    }

    /// Attributes of a non-main component
    pub fn component(&self, component_id: &str) -> Option<&HashMap<String, AttributeState>> {
        self.components.get(component_id)
    }

    /// Get an attribute's full state
    pub fn attribute(&self, attribute: &str) -> Option<&AttributeState> {
        self.attributes.get(attribute)
    }

    /// Get an attribute's raw value
    ///
    /// A missing attribute and an explicit `null` both read as `None`.
    pub fn value(&self, attribute: &str) -> Option<&Value> {
        self.attributes
            .get(attribute)
            .map(|state| &state.value)
            .filter(|value| !value.is_null())
    }

    /// Get an attribute's value as a string
    pub fn str_value(&self, attribute: &str) -> Option<&str> {
        self.value(attribute).and_then(Value::as_str)
    }

    /// Get an attribute's value as an integer
    ///
    /// Floats are accepted and truncated, since some devices report `42.0`.
    pub fn int_value(&self, attribute: &str) -> Option<i64> {
        let value = self.value(attribute)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|float| float as i64))
    }

    /// Boolean interpretation of an attribute
    ///
    /// True only when the raw value equals the attribute's active spelling
    /// (e.g. "wet" for water, "open" for contact). Attributes without such a
    /// spelling, and missing attributes, read as false.
    pub fn is_on(&self, attribute: &str) -> bool {
        match (attribute::on_value(attribute), self.str_value(attribute)) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        }
    }

    /// Whether the switch attribute is on
    pub fn switch(&self) -> bool {
        self.is_on(attribute::SWITCH)
    }

    /// The raw fan speed level
    pub fn fan_speed(&self) -> Option<i64> {
        self.int_value(attribute::FAN_SPEED)
    }

    /// Overwrite an attribute's value in place
    ///
    /// Used for optimistic updates. Any unit or data already recorded for
    /// the attribute is kept.
    pub fn update_attribute_value(&mut self, attribute: &str, value: impl Into<Value>) {
        let value = value.into();
        trace!(device_id = %self.device_id, attribute, %value, "Updating attribute value");
        self.attributes
            .entry(attribute.to_string())
            .or_default()
            .value = value;
    }

    /// Apply an authoritative attribute update from the push/poll path
    pub fn apply_attribute_update(
        &mut self,
        component_id: &str,
        attribute: &str,
        value: Value,
        unit: Option<String>,
        data: Option<Value>,
    ) {
        let state = AttributeState { value, unit, data };
        let target = if component_id == COMPONENT_MAIN {
            &mut self.attributes
        } else {
            self.components.entry(component_id.to_string()).or_default()
        };
        target.insert(attribute.to_string(), state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_on_uses_attribute_spelling() {
        let status = DeviceStatus::new("dev-1")
            .with_value(attribute::WATER, "wet")
            .with_value(attribute::CONTACT, "closed")
            .with_value(attribute::MOTION, "active");

        assert!(status.is_on(attribute::WATER));
        assert!(!status.is_on(attribute::CONTACT));
        assert!(status.is_on(attribute::MOTION));
    }

    #[test]
    fn test_missing_attribute_is_neutral() {
        let status = DeviceStatus::new("dev-1");
        assert!(!status.is_on(attribute::SOUND));
        assert!(status.value(attribute::VOLUME).is_none());
        assert!(status.fan_speed().is_none());
        assert!(!status.switch());
    }

    #[test]
    fn test_null_reads_as_missing() {
        let status = DeviceStatus::new("dev-1").with_value(attribute::VOLUME, Value::Null);
        assert!(status.value(attribute::VOLUME).is_none());
    }

    #[test]
    fn test_update_keeps_unit() {
        let mut status = DeviceStatus::new("dev-1");
        status.apply_attribute_update(
            COMPONENT_MAIN,
            attribute::VOLUME,
            json!(10),
            Some("%".to_string()),
            None,
        );
        status.update_attribute_value(attribute::VOLUME, 42);

        let state = status.attribute(attribute::VOLUME).unwrap();
        assert_eq!(state.value, json!(42));
        assert_eq!(state.unit.as_deref(), Some("%"));
    }

    #[test]
    fn test_update_creates_missing_attribute() {
        let mut status = DeviceStatus::new("dev-1");
        status.update_attribute_value(attribute::SWITCH, "on");
        assert!(status.switch());
    }

    #[test]
    fn test_component_update_leaves_main_untouched() {
        let mut status = DeviceStatus::new("dev-1").with_value(attribute::SWITCH, "off");
        status.apply_attribute_update("outlet2", attribute::SWITCH, json!("on"), None, None);

        assert!(!status.switch());
        let outlet = status.component("outlet2").unwrap();
        assert_eq!(outlet[attribute::SWITCH].value, json!("on"));
    }

    #[test]
    fn test_with_state_keeps_unit() {
        let status = DeviceStatus::new("dev-1")
            .with_state(attribute::TEMPERATURE, AttributeState::with_unit(71, "F"));

        let state = status.attribute(attribute::TEMPERATURE).unwrap();
        assert_eq!(state.value, json!(71));
        assert_eq!(state.unit.as_deref(), Some("F"));
    }

    #[test]
    fn test_int_value_accepts_floats() {
        let status = DeviceStatus::new("dev-1").with_value(attribute::VOLUME, 42.0);
        assert_eq!(status.int_value(attribute::VOLUME), Some(42));
    }
}
