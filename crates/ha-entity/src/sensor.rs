//! Sensor domain

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::Entity;

pub const DOMAIN: &str = "sensor";

/// What kind of quantity a sensor measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorDeviceClass {
    Battery,
    #[serde(rename = "carbon_monoxide")]
    Co,
    #[serde(rename = "carbon_dioxide")]
    Co2,
    Energy,
    Humidity,
    Illuminance,
    Power,
    SignalStrength,
    Temperature,
    /// The state is a point in time
    Timestamp,
    Voltage,
}

impl SensorDeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Co => "carbon_monoxide",
            Self::Co2 => "carbon_dioxide",
            Self::Energy => "energy",
            Self::Humidity => "humidity",
            Self::Illuminance => "illuminance",
            Self::Power => "power",
            Self::SignalStrength => "signal_strength",
            Self::Temperature => "temperature",
            Self::Timestamp => "timestamp",
            Self::Voltage => "voltage",
        }
    }
}

impl fmt::Display for SensorDeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a sensor's values relate to each other over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStateClass {
    /// The value is a current reading
    Measurement,
}

impl SensorStateClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Measurement => "measurement",
        }
    }
}

/// Units shared by sensor integrations
pub mod unit {
    pub const PERCENTAGE: &str = "%";
    pub const TEMP_CELSIUS: &str = "°C";
    pub const TEMP_FAHRENHEIT: &str = "°F";
    pub const MASS_KILOGRAMS: &str = "kg";
    pub const BODY_MASS_INDEX: &str = "kg/m²";
    pub const CONCENTRATION_PARTS_PER_MILLION: &str = "ppm";
    pub const ENERGY_KILO_WATT_HOUR: &str = "kWh";
    pub const POWER_WATT: &str = "W";
    pub const ELECTRIC_POTENTIAL_VOLT: &str = "V";
    pub const LIGHT_LUX: &str = "lx";
    pub const VOLUME_CUBIC_METERS: &str = "m³";
}

/// A read-only entity reporting a single value
pub trait SensorEntity: Entity {
    /// The raw reading, `None` while nothing has been reported
    fn native_value(&self) -> Option<Value>;

    fn unit_of_measurement(&self) -> Option<String> {
        None
    }

    fn device_class(&self) -> Option<SensorDeviceClass> {
        None
    }

    fn state_class(&self) -> Option<SensorStateClass> {
        None
    }

    /// When an accumulating reading last started over from zero
    fn last_reset(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Render a reading as a state string
///
/// Strings are used as-is; other scalars and structured values use their
/// JSON text. `null` has no state.
pub fn value_to_state(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Render a sensor's state value
pub fn state_of<E: SensorEntity + ?Sized>(entity: &E) -> Option<String> {
    entity.native_value().as_ref().and_then(value_to_state)
}

/// Render a sensor's state attributes
pub fn attributes_of<E: SensorEntity + ?Sized>(entity: &E) -> HashMap<String, Value> {
    let mut attributes = HashMap::new();
    if let Some(unit) = entity.unit_of_measurement() {
        attributes.insert("unit_of_measurement".to_string(), json!(unit));
    }
    if let Some(class) = entity.device_class() {
        attributes.insert("device_class".to_string(), json!(class.as_str()));
    }
    if let Some(class) = entity.state_class() {
        attributes.insert("state_class".to_string(), json!(class.as_str()));
    }
    if let Some(reset) = entity.last_reset() {
        attributes.insert("last_reset".to_string(), json!(reset.to_rfc3339()));
    }
    attributes
}
