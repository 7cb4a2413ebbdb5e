//! Sensors through the SmartThings cloud API
//!
//! Any capability in the catalog becomes one or more read-only sensors, one
//! per reported attribute. Two capabilities are spread over several sensors
//! by position instead: `threeAxis` yields one sensor per axis and
//! `powerConsumptionReport` one per report field.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ha_entity::sensor::{self, unit, SensorDeviceClass, SensorEntity, SensorStateClass};
use ha_entity::{Entity, UpdateRequester};
use serde_json::{json, Value};
use smartthings_api::{attribute, capability, Device};

use crate::config::SmartThingsConfig;
use crate::entity::SmartThingsEntity;

/// One sensor derived from a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorMap {
    pub attribute: &'static str,
    pub name: &'static str,
    pub default_unit: Option<&'static str>,
    pub device_class: Option<SensorDeviceClass>,
    pub state_class: Option<SensorStateClass>,
}

const fn map(
    attribute: &'static str,
    name: &'static str,
    default_unit: Option<&'static str>,
    device_class: Option<SensorDeviceClass>,
    state_class: Option<SensorStateClass>,
) -> SensorMap {
    SensorMap {
        attribute,
        name,
        default_unit,
        device_class,
        state_class,
    }
}

const MEASUREMENT: Option<SensorStateClass> = Some(SensorStateClass::Measurement);
const TIMESTAMP: Option<SensorDeviceClass> = Some(SensorDeviceClass::Timestamp);
const TEMPERATURE: Option<SensorDeviceClass> = Some(SensorDeviceClass::Temperature);

/// Capability -> the sensors it yields
///
/// Order matters: matched capabilities are returned in this order. The
/// axis and power report capabilities have no fixed maps.
pub const CAPABILITY_TO_SENSORS: &[(&str, &[SensorMap])] = &[
    (
        capability::ACTIVITY_LIGHTING_MODE,
        &[map(attribute::LIGHTING_MODE, "Activity Lighting Mode", None, None, None)],
    ),
    (
        capability::AIR_CONDITIONER_MODE,
        &[map(attribute::AIR_CONDITIONER_MODE, "Air Conditioner Mode", None, None, None)],
    ),
    (
        capability::AIR_QUALITY_SENSOR,
        &[map(attribute::AIR_QUALITY, "Air Quality", Some("CAQI"), None, MEASUREMENT)],
    ),
    (capability::ALARM, &[map(attribute::ALARM, "Alarm", None, None, None)]),
    (
        capability::AUDIO_VOLUME,
        &[map(attribute::VOLUME, "Volume", Some(unit::PERCENTAGE), None, None)],
    ),
    (
        capability::BATTERY,
        &[map(
            attribute::BATTERY,
            "Battery",
            Some(unit::PERCENTAGE),
            Some(SensorDeviceClass::Battery),
            None,
        )],
    ),
    (
        capability::BODY_MASS_INDEX_MEASUREMENT,
        &[map(
            attribute::BMI_MEASUREMENT,
            "Body Mass Index",
            Some(unit::BODY_MASS_INDEX),
            None,
            MEASUREMENT,
        )],
    ),
    (
        capability::BODY_WEIGHT_MEASUREMENT,
        &[map(
            attribute::BODY_WEIGHT_MEASUREMENT,
            "Body Weight",
            Some(unit::MASS_KILOGRAMS),
            None,
            MEASUREMENT,
        )],
    ),
    (
        capability::CARBON_DIOXIDE_MEASUREMENT,
        &[map(
            attribute::CARBON_DIOXIDE,
            "Carbon Dioxide Measurement",
            Some(unit::CONCENTRATION_PARTS_PER_MILLION),
            Some(SensorDeviceClass::Co2),
            MEASUREMENT,
        )],
    ),
    (
        capability::CARBON_MONOXIDE_DETECTOR,
        &[map(attribute::CARBON_MONOXIDE, "Carbon Monoxide Detector", None, None, None)],
    ),
    (
        capability::CARBON_MONOXIDE_MEASUREMENT,
        &[map(
            attribute::CARBON_MONOXIDE_LEVEL,
            "Carbon Monoxide Measurement",
            Some(unit::CONCENTRATION_PARTS_PER_MILLION),
            Some(SensorDeviceClass::Co),
            MEASUREMENT,
        )],
    ),
    (
        capability::DISHWASHER_OPERATING_STATE,
        &[
            map(attribute::MACHINE_STATE, "Dishwasher Machine State", None, None, None),
            map(attribute::DISHWASHER_JOB_STATE, "Dishwasher Job State", None, None, None),
            map(attribute::COMPLETION_TIME, "Dishwasher Completion Time", None, TIMESTAMP, None),
        ],
    ),
    (
        capability::DRYER_MODE,
        &[map(attribute::DRYER_MODE, "Dryer Mode", None, None, None)],
    ),
    (
        capability::DRYER_OPERATING_STATE,
        &[
            map(attribute::MACHINE_STATE, "Dryer Machine State", None, None, None),
            map(attribute::DRYER_JOB_STATE, "Dryer Job State", None, None, None),
            map(attribute::COMPLETION_TIME, "Dryer Completion Time", None, TIMESTAMP, None),
        ],
    ),
    (
        capability::DUST_SENSOR,
        &[
            map(attribute::FINE_DUST_LEVEL, "Fine Dust Level", None, None, MEASUREMENT),
            map(attribute::DUST_LEVEL, "Dust Level", None, None, MEASUREMENT),
        ],
    ),
    (
        capability::ENERGY_METER,
        &[map(
            attribute::ENERGY,
            "Energy Meter",
            Some(unit::ENERGY_KILO_WATT_HOUR),
            Some(SensorDeviceClass::Energy),
            MEASUREMENT,
        )],
    ),
    (
        capability::EQUIVALENT_CARBON_DIOXIDE_MEASUREMENT,
        &[map(
            attribute::EQUIVALENT_CARBON_DIOXIDE_MEASUREMENT,
            "Equivalent Carbon Dioxide Measurement",
            Some(unit::CONCENTRATION_PARTS_PER_MILLION),
            None,
            MEASUREMENT,
        )],
    ),
    (
        capability::FORMALDEHYDE_MEASUREMENT,
        &[map(
            attribute::FORMALDEHYDE_LEVEL,
            "Formaldehyde Measurement",
            Some(unit::CONCENTRATION_PARTS_PER_MILLION),
            None,
            MEASUREMENT,
        )],
    ),
    (
        capability::GAS_METER,
        &[
            map(
                attribute::GAS_METER,
                "Gas Meter",
                Some(unit::ENERGY_KILO_WATT_HOUR),
                None,
                MEASUREMENT,
            ),
            map(attribute::GAS_METER_CALORIFIC, "Gas Meter Calorific", None, None, None),
            map(attribute::GAS_METER_TIME, "Gas Meter Time", None, TIMESTAMP, None),
            map(
                attribute::GAS_METER_VOLUME,
                "Gas Meter Volume",
                Some(unit::VOLUME_CUBIC_METERS),
                None,
                MEASUREMENT,
            ),
        ],
    ),
    (
        capability::ILLUMINANCE_MEASUREMENT,
        &[map(
            attribute::ILLUMINANCE,
            "Illuminance",
            Some(unit::LIGHT_LUX),
            Some(SensorDeviceClass::Illuminance),
            MEASUREMENT,
        )],
    ),
    (
        capability::INFRARED_LEVEL,
        &[map(
            attribute::INFRARED_LEVEL,
            "Infrared Level",
            Some(unit::PERCENTAGE),
            None,
            MEASUREMENT,
        )],
    ),
    (
        capability::MEDIA_INPUT_SOURCE,
        &[map(attribute::INPUT_SOURCE, "Media Input Source", None, None, None)],
    ),
    (
        capability::MEDIA_PLAYBACK_REPEAT,
        &[map(attribute::PLAYBACK_REPEAT_MODE, "Media Playback Repeat", None, None, None)],
    ),
    (
        capability::MEDIA_PLAYBACK_SHUFFLE,
        &[map(attribute::PLAYBACK_SHUFFLE, "Media Playback Shuffle", None, None, None)],
    ),
    (
        capability::MEDIA_PLAYBACK,
        &[map(attribute::PLAYBACK_STATUS, "Media Playback Status", None, None, None)],
    ),
    (
        capability::ODOR_SENSOR,
        &[map(attribute::ODOR_LEVEL, "Odor Sensor", None, None, None)],
    ),
    (
        capability::OVEN_MODE,
        &[map(attribute::OVEN_MODE, "Oven Mode", None, None, None)],
    ),
    (
        capability::OVEN_OPERATING_STATE,
        &[
            map(attribute::MACHINE_STATE, "Oven Machine State", None, None, None),
            map(attribute::OVEN_JOB_STATE, "Oven Job State", None, None, None),
            map(attribute::COMPLETION_TIME, "Oven Completion Time", None, None, None),
        ],
    ),
    (
        capability::OVEN_SETPOINT,
        &[map(attribute::OVEN_SETPOINT, "Oven Set Point", None, None, None)],
    ),
    (capability::POWER_CONSUMPTION_REPORT, &[]),
    (
        capability::POWER_METER,
        &[map(
            attribute::POWER,
            "Power Meter",
            Some(unit::POWER_WATT),
            Some(SensorDeviceClass::Power),
            MEASUREMENT,
        )],
    ),
    (
        capability::POWER_SOURCE,
        &[map(attribute::POWER_SOURCE, "Power Source", None, None, None)],
    ),
    (
        capability::REFRIGERATION_SETPOINT,
        &[map(
            attribute::REFRIGERATION_SETPOINT,
            "Refrigeration Setpoint",
            None,
            TEMPERATURE,
            None,
        )],
    ),
    (
        capability::RELATIVE_HUMIDITY_MEASUREMENT,
        &[map(
            attribute::HUMIDITY,
            "Relative Humidity Measurement",
            Some(unit::PERCENTAGE),
            Some(SensorDeviceClass::Humidity),
            MEASUREMENT,
        )],
    ),
    (
        capability::ROBOT_CLEANER_CLEANING_MODE,
        &[map(
            attribute::ROBOT_CLEANER_CLEANING_MODE,
            "Robot Cleaner Cleaning Mode",
            None,
            None,
            None,
        )],
    ),
    (
        capability::ROBOT_CLEANER_MOVEMENT,
        &[map(
            attribute::ROBOT_CLEANER_MOVEMENT,
            "Robot Cleaner Movement",
            None,
            None,
            None,
        )],
    ),
    (
        capability::ROBOT_CLEANER_TURBO_MODE,
        &[map(
            attribute::ROBOT_CLEANER_TURBO_MODE,
            "Robot Cleaner Turbo Mode",
            None,
            None,
            None,
        )],
    ),
    (
        capability::SIGNAL_STRENGTH,
        &[
            map(attribute::LQI, "LQI Signal Strength", None, None, MEASUREMENT),
            map(
                attribute::RSSI,
                "RSSI Signal Strength",
                None,
                Some(SensorDeviceClass::SignalStrength),
                MEASUREMENT,
            ),
        ],
    ),
    (
        capability::SMOKE_DETECTOR,
        &[map(attribute::SMOKE, "Smoke Detector", None, None, None)],
    ),
    (
        capability::TEMPERATURE_MEASUREMENT,
        &[map(
            attribute::TEMPERATURE,
            "Temperature Measurement",
            None,
            TEMPERATURE,
            MEASUREMENT,
        )],
    ),
    (
        capability::THERMOSTAT_COOLING_SETPOINT,
        &[map(
            attribute::COOLING_SETPOINT,
            "Thermostat Cooling Setpoint",
            None,
            TEMPERATURE,
            None,
        )],
    ),
    (
        capability::THERMOSTAT_FAN_MODE,
        &[map(attribute::THERMOSTAT_FAN_MODE, "Thermostat Fan Mode", None, None, None)],
    ),
    (
        capability::THERMOSTAT_HEATING_SETPOINT,
        &[map(
            attribute::HEATING_SETPOINT,
            "Thermostat Heating Setpoint",
            None,
            TEMPERATURE,
            None,
        )],
    ),
    (
        capability::THERMOSTAT_MODE,
        &[map(attribute::THERMOSTAT_MODE, "Thermostat Mode", None, None, None)],
    ),
    (
        capability::THERMOSTAT_OPERATING_STATE,
        &[map(
            attribute::THERMOSTAT_OPERATING_STATE,
            "Thermostat Operating State",
            None,
            None,
            None,
        )],
    ),
    (
        capability::THERMOSTAT_SETPOINT,
        &[map(
            attribute::THERMOSTAT_SETPOINT,
            "Thermostat Setpoint",
            None,
            TEMPERATURE,
            None,
        )],
    ),
    (capability::THREE_AXIS, &[]),
    (
        capability::TV_CHANNEL,
        &[
            map(attribute::TV_CHANNEL, "Tv Channel", None, None, None),
            map(attribute::TV_CHANNEL_NAME, "Tv Channel Name", None, None, None),
        ],
    ),
    (
        capability::TVOC_MEASUREMENT,
        &[map(
            attribute::TVOC_LEVEL,
            "Tvoc Measurement",
            Some(unit::CONCENTRATION_PARTS_PER_MILLION),
            None,
            MEASUREMENT,
        )],
    ),
    (
        capability::ULTRAVIOLET_INDEX,
        &[map(attribute::ULTRAVIOLET_INDEX, "Ultraviolet Index", None, None, MEASUREMENT)],
    ),
    (
        capability::VOLTAGE_MEASUREMENT,
        &[map(
            attribute::VOLTAGE,
            "Voltage Measurement",
            Some(unit::ELECTRIC_POTENTIAL_VOLT),
            Some(SensorDeviceClass::Voltage),
            MEASUREMENT,
        )],
    ),
    (
        capability::WASHER_MODE,
        &[map(attribute::WASHER_MODE, "Washer Mode", None, None, None)],
    ),
    (
        capability::WASHER_OPERATING_STATE,
        &[
            map(attribute::MACHINE_STATE, "Washer Machine State", None, None, None),
            map(attribute::WASHER_JOB_STATE, "Washer Job State", None, None, None),
            map(attribute::COMPLETION_TIME, "Washer Completion Time", None, TIMESTAMP, None),
        ],
    ),
];

/// Axis sensor names, by position in the `threeAxis` value
pub const THREE_AXIS_NAMES: [&str; 3] = ["X Coordinate", "Y Coordinate", "Z Coordinate"];

/// Fields of the `powerConsumption` report that become sensors
pub const POWER_CONSUMPTION_REPORT_NAMES: [&str; 5] =
    ["energy", "power", "deltaEnergy", "powerEnergy", "energySaved"];

/// The report field reported in watts; every other field is in Wh
const REPORT_POWER: &str = "power";

/// Where a sensor takes its reading from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSource {
    /// One attribute, described by a catalog entry
    Attribute(&'static SensorMap),
    /// One position of the `threeAxis` attribute
    ThreeAxis(usize),
    /// One field of the `powerConsumption` report
    PowerConsumption(&'static str),
}

impl SensorSource {
    /// The part of the unique id after the device id
    pub fn key(&self) -> &'static str {
        match *self {
            Self::Attribute(map) => map.attribute,
            Self::ThreeAxis(index) => axis_name(index),
            Self::PowerConsumption(report) => report,
        }
    }

    /// The part of the name after the device label
    pub fn name(&self) -> &'static str {
        match *self {
            Self::Attribute(map) => map.name,
            Self::ThreeAxis(index) => axis_name(index),
            Self::PowerConsumption(report) => report,
        }
    }
}

fn axis_name(index: usize) -> &'static str {
    THREE_AXIS_NAMES.get(index).copied().unwrap_or_default()
}

/// Catalog capabilities present on a device, in catalog order
pub fn get_capabilities<S: AsRef<str>>(capabilities: &[S]) -> Vec<&'static str> {
    CAPABILITY_TO_SENSORS
        .iter()
        .map(|(capability, _)| *capability)
        .filter(|capability| capabilities.iter().any(|c| c.as_ref() == *capability))
        .collect()
}

/// Every sensor one capability yields
///
/// Empty for capabilities outside the catalog.
pub fn sources_for(capability_id: &str) -> Vec<SensorSource> {
    match capability_id {
        capability::THREE_AXIS => (0..THREE_AXIS_NAMES.len())
            .map(SensorSource::ThreeAxis)
            .collect(),
        capability::POWER_CONSUMPTION_REPORT => POWER_CONSUMPTION_REPORT_NAMES
            .into_iter()
            .map(SensorSource::PowerConsumption)
            .collect(),
        _ => CAPABILITY_TO_SENSORS
            .iter()
            .find(|(c, _)| *c == capability_id)
            .map(|&(_, maps)| maps.iter().map(SensorSource::Attribute).collect())
            .unwrap_or_default(),
    }
}

/// Unique id of a sensor of a device
pub fn unique_id(device_id: &str, source: &SensorSource) -> String {
    format!("{device_id}.{}", source.key())
}

/// Spell out the temperature units devices report as a bare letter
pub fn normalize_unit(unit: &str) -> &str {
    match unit {
        "C" => unit::TEMP_CELSIUS,
        "F" => unit::TEMP_FAHRENHEIT,
        other => other,
    }
}

fn epoch() -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(0, 0)
}

/// One reading of a SmartThings device as a sensor
pub struct SmartThingsSensor {
    base: SmartThingsEntity,
    source: SensorSource,
}

impl SmartThingsSensor {
    pub fn new(
        device: Arc<Device>,
        source: SensorSource,
        config: Arc<SmartThingsConfig>,
        updates: UpdateRequester,
    ) -> Self {
        Self {
            base: SmartThingsEntity::new(device, config, updates),
            source,
        }
    }

    pub fn source(&self) -> SensorSource {
        self.source
    }
}

impl Entity for SmartThingsSensor {
    fn domain(&self) -> &'static str {
        sensor::DOMAIN
    }

    fn unique_id(&self) -> String {
        unique_id(self.base.device().device_id(), &self.source)
    }

    fn name(&self) -> String {
        format!("{} {}", self.base.device().label(), self.source.name())
    }

    fn state(&self) -> Option<String> {
        sensor::state_of(self)
    }

    fn attributes(&self) -> HashMap<String, Value> {
        sensor::attributes_of(self)
    }
}

impl SensorEntity for SmartThingsSensor {
    fn native_value(&self) -> Option<Value> {
        let status = self.base.device().status();
        match self.source {
            SensorSource::Attribute(map) => status.value(map.attribute).cloned(),
            SensorSource::ThreeAxis(index) => status
                .value(attribute::THREE_AXIS)
                .and_then(Value::as_array)
                .and_then(|axes| axes.get(index))
                .cloned(),
            SensorSource::PowerConsumption(report) => {
                let reading = status
                    .value(attribute::POWER_CONSUMPTION)?
                    .get(report)
                    .filter(|value| !value.is_null())?;
                if report == REPORT_POWER {
                    Some(reading.clone())
                } else {
                    reading.as_f64().map(|wh| json!(wh / 1000.0))
                }
            }
        }
    }

    /// The unit the device reports, else the catalog default
    fn unit_of_measurement(&self) -> Option<String> {
        match self.source {
            SensorSource::Attribute(map) => {
                let status = self.base.device().status();
                let reported = status
                    .attribute(map.attribute)
                    .and_then(|state| state.unit.as_deref())
                    .filter(|unit| !unit.is_empty());
                reported
                    .map(normalize_unit)
                    .or(map.default_unit)
                    .map(str::to_string)
            }
            SensorSource::ThreeAxis(_) => None,
            SensorSource::PowerConsumption(REPORT_POWER) => Some(unit::POWER_WATT.to_string()),
            SensorSource::PowerConsumption(_) => Some(unit::ENERGY_KILO_WATT_HOUR.to_string()),
        }
    }

    fn device_class(&self) -> Option<SensorDeviceClass> {
        match self.source {
            SensorSource::Attribute(map) => map.device_class,
            SensorSource::ThreeAxis(_) => None,
            SensorSource::PowerConsumption(REPORT_POWER) => Some(SensorDeviceClass::Power),
            SensorSource::PowerConsumption(_) => Some(SensorDeviceClass::Energy),
        }
    }

    fn state_class(&self) -> Option<SensorStateClass> {
        match self.source {
            SensorSource::Attribute(map) => map.state_class,
            SensorSource::ThreeAxis(_) => None,
            SensorSource::PowerConsumption(_) => MEASUREMENT,
        }
    }

    /// Energy totals count up from the epoch
    fn last_reset(&self) -> Option<DateTime<Utc>> {
        match self.source {
            SensorSource::Attribute(map) if map.attribute == attribute::ENERGY => epoch(),
            SensorSource::PowerConsumption(report) if report != REPORT_POWER => epoch(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{device, device_with_status, RecordingApi};
    use smartthings_api::{AttributeState, DeviceStatus};

    fn new_sensor(device: Arc<Device>, source: SensorSource) -> SmartThingsSensor {
        let (updates, _) = UpdateRequester::channel();
        SmartThingsSensor::new(device, source, Arc::new(SmartThingsConfig::default()), updates)
    }

    fn attribute_source(capability: &str) -> SensorSource {
        sources_for(capability)[0]
    }

    #[test]
    fn test_get_capabilities_is_catalog_ordered() {
        let capabilities = [
            capability::THREE_AXIS,
            capability::SWITCH,
            capability::BATTERY,
            capability::TEMPERATURE_MEASUREMENT,
            capability::CONTACT_SENSOR,
        ];
        assert_eq!(
            get_capabilities(&capabilities),
            vec![
                capability::BATTERY,
                capability::TEMPERATURE_MEASUREMENT,
                capability::THREE_AXIS
            ]
        );
        assert!(get_capabilities(&[capability::SWITCH, capability::FAN_SPEED]).is_empty());
    }

    #[test]
    fn test_catalog_has_no_duplicate_capabilities() {
        let mut seen = std::collections::HashSet::new();
        for (capability, _) in CAPABILITY_TO_SENSORS {
            assert!(seen.insert(*capability), "{capability} listed twice");
        }
    }

    #[test]
    fn test_sources_for() {
        let washer = sources_for(capability::WASHER_OPERATING_STATE);
        let keys: Vec<&str> = washer.iter().map(SensorSource::key).collect();
        assert_eq!(
            keys,
            vec![
                attribute::MACHINE_STATE,
                attribute::WASHER_JOB_STATE,
                attribute::COMPLETION_TIME
            ]
        );

        assert_eq!(
            sources_for(capability::THREE_AXIS),
            vec![
                SensorSource::ThreeAxis(0),
                SensorSource::ThreeAxis(1),
                SensorSource::ThreeAxis(2)
            ]
        );
        assert_eq!(sources_for(capability::POWER_CONSUMPTION_REPORT).len(), 5);
        assert!(sources_for(capability::SWITCH).is_empty());
    }

    #[test]
    fn test_name_and_unique_id() {
        let device = device(RecordingApi::acknowledging(), &[capability::BATTERY]);
        let battery = new_sensor(device.clone(), attribute_source(capability::BATTERY));

        assert_eq!(battery.name(), "Living Room Battery");
        assert_eq!(battery.unique_id(), "dev-1.battery");
        assert_eq!(battery.domain(), "sensor");

        let y = new_sensor(device, SensorSource::ThreeAxis(1));
        assert_eq!(y.name(), "Living Room Y Coordinate");
        assert_eq!(y.unique_id(), "dev-1.Y Coordinate");
    }

    #[test]
    fn test_reads_raw_value_with_default_unit() {
        let status = DeviceStatus::new("dev-1").with_value(attribute::BATTERY, 87);
        let device =
            device_with_status(RecordingApi::acknowledging(), &[capability::BATTERY], status);
        let battery = new_sensor(device, attribute_source(capability::BATTERY));

        assert_eq!(battery.native_value(), Some(json!(87)));
        assert_eq!(battery.state().as_deref(), Some("87"));
        assert_eq!(battery.unit_of_measurement().as_deref(), Some("%"));
        assert_eq!(battery.device_class(), Some(SensorDeviceClass::Battery));
        assert_eq!(battery.state_class(), None);
    }

    #[test]
    fn test_reported_unit_wins_and_is_spelled_out() {
        let status = DeviceStatus::new("dev-1")
            .with_state(attribute::TEMPERATURE, AttributeState::with_unit(71.5, "F"));
        let device = device_with_status(
            RecordingApi::acknowledging(),
            &[capability::TEMPERATURE_MEASUREMENT],
            status,
        );
        let temperature = new_sensor(
            device.clone(),
            attribute_source(capability::TEMPERATURE_MEASUREMENT),
        );

        assert_eq!(temperature.state().as_deref(), Some("71.5"));
        assert_eq!(temperature.unit_of_measurement().as_deref(), Some("°F"));

        let attributes = temperature.attributes();
        assert_eq!(attributes["device_class"], json!("temperature"));
        assert_eq!(attributes["state_class"], json!("measurement"));

        device.status_mut().apply_attribute_update(
            smartthings_api::COMPONENT_MAIN,
            attribute::TEMPERATURE,
            json!(1013),
            Some("mbar".to_string()),
            None,
        );
        assert_eq!(temperature.unit_of_measurement().as_deref(), Some("mbar"));
    }

    #[test]
    fn test_missing_value_is_unknown() {
        let capabilities = [capability::RELATIVE_HUMIDITY_MEASUREMENT];
        let device = device(RecordingApi::acknowledging(), &capabilities);
        let humidity = new_sensor(device, attribute_source(capabilities[0]));

        assert_eq!(humidity.native_value(), None);
        assert_eq!(humidity.state(), None);
        assert_eq!(humidity.unit_of_measurement().as_deref(), Some("%"));
    }

    #[test]
    fn test_energy_meter_resets_at_epoch() {
        let device = device(RecordingApi::acknowledging(), &[capability::ENERGY_METER]);
        let energy = new_sensor(device.clone(), attribute_source(capability::ENERGY_METER));
        let power = new_sensor(device, attribute_source(capability::POWER_METER));

        assert_eq!(energy.last_reset(), DateTime::<Utc>::from_timestamp(0, 0));
        assert_eq!(
            energy.attributes()["last_reset"],
            json!("1970-01-01T00:00:00+00:00")
        );
        assert_eq!(power.last_reset(), None);
        assert!(!power.attributes().contains_key("last_reset"));
    }

    #[test]
    fn test_three_axis_reads_by_position() {
        let status =
            DeviceStatus::new("dev-1").with_value(attribute::THREE_AXIS, json!([-12, 4, 1003]));
        let device =
            device_with_status(RecordingApi::acknowledging(), &[capability::THREE_AXIS], status);

        let z = new_sensor(device.clone(), SensorSource::ThreeAxis(2));
        assert_eq!(z.state().as_deref(), Some("1003"));
        assert_eq!(z.unit_of_measurement(), None);
        assert!(z.attributes().is_empty());

        // A malformed value reads as unknown rather than failing
        device
            .status_mut()
            .update_attribute_value(attribute::THREE_AXIS, json!([1]));
        assert_eq!(z.state(), None);
        device
            .status_mut()
            .update_attribute_value(attribute::THREE_AXIS, "flat");
        assert_eq!(z.state(), None);
    }

    #[test]
    fn test_power_consumption_report() {
        let status = DeviceStatus::new("dev-1").with_value(
            attribute::POWER_CONSUMPTION,
            json!({"energy": 52500, "power": 120, "deltaEnergy": null}),
        );
        let device = device_with_status(
            RecordingApi::acknowledging(),
            &[capability::POWER_CONSUMPTION_REPORT],
            status,
        );

        let energy = new_sensor(device.clone(), SensorSource::PowerConsumption("energy"));
        assert_eq!(energy.native_value(), Some(json!(52.5)));
        assert_eq!(energy.unit_of_measurement().as_deref(), Some("kWh"));
        assert_eq!(energy.device_class(), Some(SensorDeviceClass::Energy));
        assert_eq!(energy.state_class(), Some(SensorStateClass::Measurement));
        assert!(energy.last_reset().is_some());

        let power = new_sensor(device.clone(), SensorSource::PowerConsumption("power"));
        assert_eq!(power.native_value(), Some(json!(120)));
        assert_eq!(power.unit_of_measurement().as_deref(), Some("W"));
        assert_eq!(power.device_class(), Some(SensorDeviceClass::Power));
        assert_eq!(power.last_reset(), None);

        let delta = new_sensor(device.clone(), SensorSource::PowerConsumption("deltaEnergy"));
        assert_eq!(delta.native_value(), None);
        let saved = new_sensor(device, SensorSource::PowerConsumption("energySaved"));
        assert_eq!(saved.state(), None);
    }

    #[test]
    fn test_normalize_unit() {
        assert_eq!(normalize_unit("C"), "°C");
        assert_eq!(normalize_unit("F"), "°F");
        assert_eq!(normalize_unit("lux"), "lux");
    }
}
