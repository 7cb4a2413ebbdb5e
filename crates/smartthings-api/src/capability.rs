//! Capability identifiers advertised by SmartThings devices

pub const ACCELERATION_SENSOR: &str = "accelerationSensor";
pub const ACTIVITY_LIGHTING_MODE: &str = "activityLightingMode";
pub const AIR_CONDITIONER_MODE: &str = "airConditionerMode";
pub const AIR_QUALITY_SENSOR: &str = "airQualitySensor";
pub const ALARM: &str = "alarm";
pub const AUDIO_MUTE: &str = "audioMute";
pub const AUDIO_VOLUME: &str = "audioVolume";
pub const BATTERY: &str = "battery";
pub const BODY_MASS_INDEX_MEASUREMENT: &str = "bodyMassIndexMeasurement";
pub const BODY_WEIGHT_MEASUREMENT: &str = "bodyWeightMeasurement";
pub const CARBON_DIOXIDE_MEASUREMENT: &str = "carbonDioxideMeasurement";
pub const CARBON_MONOXIDE_DETECTOR: &str = "carbonMonoxideDetector";
pub const CARBON_MONOXIDE_MEASUREMENT: &str = "carbonMonoxideMeasurement";
pub const CONTACT_SENSOR: &str = "contactSensor";
pub const DISHWASHER_OPERATING_STATE: &str = "dishwasherOperatingState";
pub const DRYER_MODE: &str = "dryerMode";
pub const DRYER_OPERATING_STATE: &str = "dryerOperatingState";
pub const DUST_SENSOR: &str = "dustSensor";
pub const ENERGY_METER: &str = "energyMeter";
pub const EQUIVALENT_CARBON_DIOXIDE_MEASUREMENT: &str = "equivalentCarbonDioxideMeasurement";
pub const FAN_SPEED: &str = "fanSpeed";
pub const FILTER_STATUS: &str = "filterStatus";
pub const FORMALDEHYDE_MEASUREMENT: &str = "formaldehydeMeasurement";
pub const GAS_METER: &str = "gasMeter";
pub const ILLUMINANCE_MEASUREMENT: &str = "illuminanceMeasurement";
pub const INFRARED_LEVEL: &str = "infraredLevel";
pub const MEDIA_INPUT_SOURCE: &str = "mediaInputSource";
pub const MEDIA_PLAYBACK: &str = "mediaPlayback";
pub const MEDIA_PLAYBACK_REPEAT: &str = "mediaPlaybackRepeat";
pub const MEDIA_PLAYBACK_SHUFFLE: &str = "mediaPlaybackShuffle";
pub const MOTION_SENSOR: &str = "motionSensor";
pub const ODOR_SENSOR: &str = "odorSensor";
pub const OVEN_MODE: &str = "ovenMode";
pub const OVEN_OPERATING_STATE: &str = "ovenOperatingState";
pub const OVEN_SETPOINT: &str = "ovenSetpoint";
pub const POWER_CONSUMPTION_REPORT: &str = "powerConsumptionReport";
pub const POWER_METER: &str = "powerMeter";
pub const POWER_SOURCE: &str = "powerSource";
pub const PRESENCE_SENSOR: &str = "presenceSensor";
pub const REFRIGERATION_SETPOINT: &str = "refrigerationSetpoint";
pub const RELATIVE_HUMIDITY_MEASUREMENT: &str = "relativeHumidityMeasurement";
pub const ROBOT_CLEANER_CLEANING_MODE: &str = "robotCleanerCleaningMode";
pub const ROBOT_CLEANER_MOVEMENT: &str = "robotCleanerMovement";
pub const ROBOT_CLEANER_TURBO_MODE: &str = "robotCleanerTurboMode";
pub const SIGNAL_STRENGTH: &str = "signalStrength";
pub const SMOKE_DETECTOR: &str = "smokeDetector";
pub const SOUND_SENSOR: &str = "soundSensor";
pub const SWITCH: &str = "switch";
pub const TAMPER_ALERT: &str = "tamperAlert";
pub const TEMPERATURE_MEASUREMENT: &str = "temperatureMeasurement";
pub const THERMOSTAT_COOLING_SETPOINT: &str = "thermostatCoolingSetpoint";
pub const THERMOSTAT_FAN_MODE: &str = "thermostatFanMode";
pub const THERMOSTAT_HEATING_SETPOINT: &str = "thermostatHeatingSetpoint";
pub const THERMOSTAT_MODE: &str = "thermostatMode";
pub const THERMOSTAT_OPERATING_STATE: &str = "thermostatOperatingState";
pub const THERMOSTAT_SETPOINT: &str = "thermostatSetpoint";
pub const THREE_AXIS: &str = "threeAxis";
pub const TVOC_MEASUREMENT: &str = "tvocMeasurement";
pub const TV_CHANNEL: &str = "tvChannel";
pub const ULTRAVIOLET_INDEX: &str = "ultravioletIndex";
pub const VALVE: &str = "valve";
pub const VOLTAGE_MEASUREMENT: &str = "voltageMeasurement";
pub const WASHER_MODE: &str = "washerMode";
pub const WASHER_OPERATING_STATE: &str = "washerOperatingState";
pub const WATER_SENSOR: &str = "waterSensor";
