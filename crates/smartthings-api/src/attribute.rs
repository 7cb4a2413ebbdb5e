//! Attribute identifiers reported in a device's status

pub const ACCELERATION: &str = "acceleration";
pub const AIR_CONDITIONER_MODE: &str = "airConditionerMode";
pub const AIR_QUALITY: &str = "airQuality";
pub const ALARM: &str = "alarm";
pub const BATTERY: &str = "battery";
pub const BMI_MEASUREMENT: &str = "bmiMeasurement";
pub const BODY_WEIGHT_MEASUREMENT: &str = "bodyWeightMeasurement";
pub const CARBON_DIOXIDE: &str = "carbonDioxide";
pub const CARBON_MONOXIDE: &str = "carbonMonoxide";
pub const CARBON_MONOXIDE_LEVEL: &str = "carbonMonoxideLevel";
pub const COMPLETION_TIME: &str = "completionTime";
pub const CONTACT: &str = "contact";
pub const COOLING_SETPOINT: &str = "coolingSetpoint";
pub const DISHWASHER_JOB_STATE: &str = "dishwasherJobState";
pub const DRYER_JOB_STATE: &str = "dryerJobState";
pub const DRYER_MODE: &str = "dryerMode";
pub const DUST_LEVEL: &str = "dustLevel";
pub const ENERGY: &str = "energy";
pub const EQUIVALENT_CARBON_DIOXIDE_MEASUREMENT: &str = "equivalentCarbonDioxideMeasurement";
pub const FAN_SPEED: &str = "fanSpeed";
pub const FILTER_STATUS: &str = "filterStatus";
pub const FINE_DUST_LEVEL: &str = "fineDustLevel";
pub const FORMALDEHYDE_LEVEL: &str = "formaldehydeLevel";
pub const GAS_METER: &str = "gasMeter";
pub const GAS_METER_CALORIFIC: &str = "gasMeterCalorific";
pub const GAS_METER_TIME: &str = "gasMeterTime";
pub const GAS_METER_VOLUME: &str = "gasMeterVolume";
pub const HEATING_SETPOINT: &str = "heatingSetpoint";
pub const HUMIDITY: &str = "humidity";
pub const ILLUMINANCE: &str = "illuminance";
pub const INFRARED_LEVEL: &str = "infraredLevel";
pub const INPUT_SOURCE: &str = "inputSource";
pub const LIGHTING_MODE: &str = "lightingMode";
pub const LQI: &str = "lqi";
pub const MACHINE_STATE: &str = "machineState";
pub const MOTION: &str = "motion";
pub const MUTE: &str = "mute";
pub const ODOR_LEVEL: &str = "odorLevel";
pub const OVEN_JOB_STATE: &str = "ovenJobState";
pub const OVEN_MODE: &str = "ovenMode";
pub const OVEN_SETPOINT: &str = "ovenSetpoint";
pub const PLAYBACK_REPEAT_MODE: &str = "playbackRepeatMode";
pub const PLAYBACK_SHUFFLE: &str = "playbackShuffle";
pub const PLAYBACK_STATUS: &str = "playbackStatus";
pub const POWER: &str = "power";
pub const POWER_CONSUMPTION: &str = "powerConsumption";
pub const POWER_SOURCE: &str = "powerSource";
pub const PRESENCE: &str = "presence";
pub const REFRIGERATION_SETPOINT: &str = "refrigerationSetpoint";
pub const ROBOT_CLEANER_CLEANING_MODE: &str = "robotCleanerCleaningMode";
pub const ROBOT_CLEANER_MOVEMENT: &str = "robotCleanerMovement";
pub const ROBOT_CLEANER_TURBO_MODE: &str = "robotCleanerTurboMode";
pub const RSSI: &str = "rssi";
pub const SMOKE: &str = "smoke";
pub const SOUND: &str = "sound";
pub const SUPPORTED_INPUT_SOURCES: &str = "supportedInputSources";
pub const SWITCH: &str = "switch";
pub const TAMPER: &str = "tamper";
pub const TEMPERATURE: &str = "temperature";
pub const THERMOSTAT_FAN_MODE: &str = "thermostatFanMode";
pub const THERMOSTAT_MODE: &str = "thermostatMode";
pub const THERMOSTAT_OPERATING_STATE: &str = "thermostatOperatingState";
pub const THERMOSTAT_SETPOINT: &str = "thermostatSetpoint";
pub const THREE_AXIS: &str = "threeAxis";
pub const TRACK_DESCRIPTION: &str = "trackDescription";
pub const TVOC_LEVEL: &str = "tvocLevel";
pub const TV_CHANNEL: &str = "tvChannel";
pub const TV_CHANNEL_NAME: &str = "tvChannelName";
pub const ULTRAVIOLET_INDEX: &str = "ultravioletIndex";
pub const VALVE: &str = "valve";
pub const VOLTAGE: &str = "voltage";
pub const VOLUME: &str = "volume";
pub const WASHER_JOB_STATE: &str = "washerJobState";
pub const WASHER_MODE: &str = "washerMode";
pub const WATER: &str = "water";

/// The raw value that marks an attribute as active ("on")
///
/// Returns `None` for attributes that have no boolean interpretation.
pub fn on_value(attribute: &str) -> Option<&'static str> {
    let value = match attribute {
        ACCELERATION => "active",
        CONTACT => "open",
        FILTER_STATUS => "replace",
        MOTION => "active",
        MUTE => "muted",
        PLAYBACK_SHUFFLE => "enabled",
        PRESENCE => "present",
        SOUND => "detected",
        SWITCH => "on",
        TAMPER => "detected",
        VALVE => "open",
        WATER => "wet",
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_values() {
        assert_eq!(on_value(WATER), Some("wet"));
        assert_eq!(on_value(CONTACT), Some("open"));
        assert_eq!(on_value(SOUND), Some("detected"));
        assert_eq!(on_value(VOLUME), None);
    }
}
