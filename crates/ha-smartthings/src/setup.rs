//! Platform setup
//!
//! Builds the entities of each platform from the broker's assignments and
//! registers them with the host's entity platform.

use std::sync::Arc;

use ha_entity::{Entity, EntityPlatform, UpdateRequester};
use tracing::{debug, info};

use crate::binary_sensor::{self, SmartThingsBinarySensor};
use crate::broker::{DeviceBroker, DeviceEvent, Platform};
use crate::config::SmartThingsConfig;
use crate::fan::SmartThingsFan;
use crate::media_player::SmartThingsMediaPlayer;
use crate::sensor::{self, SmartThingsSensor};

/// One binary sensor per assigned sensor capability of every device
pub fn setup_binary_sensors(
    broker: &DeviceBroker,
    config: &Arc<SmartThingsConfig>,
    updates: &UpdateRequester,
) -> Vec<SmartThingsBinarySensor> {
    let mut sensors = Vec::new();
    for device in broker.devices() {
        for capability in broker.get_assigned(device.device_id(), Platform::BinarySensor) {
            let Some(attribute) = binary_sensor::attribute_for(capability) else {
                continue;
            };
            sensors.push(SmartThingsBinarySensor::new(
                device.clone(),
                attribute,
                config.clone(),
                updates.clone(),
            ));
        }
    }
    debug!("Built {} binary sensors", sensors.len());
    sensors
}

/// Every sensor of every assigned catalog capability of every device
pub fn setup_sensors(
    broker: &DeviceBroker,
    config: &Arc<SmartThingsConfig>,
    updates: &UpdateRequester,
) -> Vec<SmartThingsSensor> {
    let mut sensors = Vec::new();
    for device in broker.devices() {
        for capability in broker.get_assigned(device.device_id(), Platform::Sensor) {
            sensors.extend(sensor::sources_for(capability).into_iter().map(|source| {
                SmartThingsSensor::new(device.clone(), source, config.clone(), updates.clone())
            }));
        }
    }
    debug!("Built {} sensors", sensors.len());
    sensors
}

/// One media player per device with media capabilities assigned
pub fn setup_media_players(
    broker: &DeviceBroker,
    config: &Arc<SmartThingsConfig>,
    updates: &UpdateRequester,
) -> Vec<SmartThingsMediaPlayer> {
    broker
        .devices()
        .filter(|device| broker.any_assigned(device.device_id(), Platform::MediaPlayer))
        .map(|device| SmartThingsMediaPlayer::new(device.clone(), config.clone(), updates.clone()))
        .collect()
}

/// One fan per device with fan capabilities assigned
pub fn setup_fans(
    broker: &DeviceBroker,
    config: &Arc<SmartThingsConfig>,
    updates: &UpdateRequester,
) -> Vec<SmartThingsFan> {
    broker
        .devices()
        .filter(|device| broker.any_assigned(device.device_id(), Platform::Fan))
        .map(|device| SmartThingsFan::new(device.clone(), config.clone(), updates.clone()))
        .collect()
}

/// Entities of one platform, ready for registration
pub fn setup_platform(
    platform: Platform,
    broker: &DeviceBroker,
    config: &Arc<SmartThingsConfig>,
    updates: &UpdateRequester,
) -> Vec<Arc<dyn Entity>> {
    match platform {
        Platform::MediaPlayer => setup_media_players(broker, config, updates)
            .into_iter()
            .map(|entity| Arc::new(entity) as Arc<dyn Entity>)
            .collect(),
        Platform::Fan => setup_fans(broker, config, updates)
            .into_iter()
            .map(|entity| Arc::new(entity) as Arc<dyn Entity>)
            .collect(),
        Platform::BinarySensor => setup_binary_sensors(broker, config, updates)
            .into_iter()
            .map(|entity| Arc::new(entity) as Arc<dyn Entity>)
            .collect(),
        Platform::Sensor => setup_sensors(broker, config, updates)
            .into_iter()
            .map(|entity| Arc::new(entity) as Arc<dyn Entity>)
            .collect(),
    }
}

/// Set up every platform and register the entities
///
/// Returns the number of entities added.
pub fn setup_entry(
    broker: &DeviceBroker,
    config: Arc<SmartThingsConfig>,
    platform: &mut EntityPlatform,
) -> usize {
    let updates = platform.update_requester();
    let mut added = 0;
    for kind in Platform::ALL {
        let entities = setup_platform(kind, broker, &config, &updates);
        let count = platform.add_entities(entities);
        info!(platform = %kind, "Set up {} entities", count);
        added += count;
    }
    added
}

/// Route a pushed event into the broker and request re-renders
///
/// Returns the number of re-render requests sent.
pub fn dispatch_event(broker: &DeviceBroker, event: DeviceEvent, updates: &UpdateRequester) -> usize {
    let unique_ids = broker.apply_event(event);
    for unique_id in &unique_ids {
        updates.schedule_update(unique_id);
    }
    unique_ids.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::RecordingApi;
    use smartthings_api::{capability, Device};

    fn broker() -> DeviceBroker {
        let api = RecordingApi::acknowledging();
        let devices = vec![
            Arc::new(Device::new(
                "speaker",
                "Kitchen Speaker",
                vec![
                    capability::SWITCH.to_string(),
                    capability::MEDIA_PLAYBACK.to_string(),
                    capability::AUDIO_VOLUME.to_string(),
                ],
                api.clone(),
            )),
            Arc::new(Device::new(
                "fan",
                "Ceiling Fan",
                vec![
                    capability::FAN_SPEED.to_string(),
                    capability::SWITCH.to_string(),
                ],
                api.clone(),
            )),
            Arc::new(Device::new(
                "multi",
                "Back Door",
                vec![
                    capability::CONTACT_SENSOR.to_string(),
                    capability::ACCELERATION_SENSOR.to_string(),
                ],
                api.clone(),
            )),
            Arc::new(Device::new(
                "meter",
                "Dryer Plug",
                vec![
                    capability::POWER_METER.to_string(),
                    capability::DRYER_OPERATING_STATE.to_string(),
                ],
                api,
            )),
        ];
        DeviceBroker::new(devices)
    }

    #[test]
    fn test_each_platform_gets_its_devices() {
        let broker = broker();
        let config = Arc::new(SmartThingsConfig::default());
        let (updates, _) = UpdateRequester::channel();

        let players = setup_media_players(&broker, &config, &updates);
        let fans = setup_fans(&broker, &config, &updates);
        let sensors = setup_binary_sensors(&broker, &config, &updates);

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].unique_id(), "speaker");
        assert_eq!(fans.len(), 1);
        assert_eq!(fans[0].unique_id(), "fan");
        let sensor_ids: Vec<String> = sensors.iter().map(|s| s.unique_id()).collect();
        assert_eq!(sensor_ids, vec!["multi.acceleration", "multi.contact"]);
    }

    #[test]
    fn test_sensors_follow_catalog_order() {
        let broker = broker();
        let config = Arc::new(SmartThingsConfig::default());
        let (updates, _) = UpdateRequester::channel();

        let names: Vec<String> = setup_sensors(&broker, &config, &updates)
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "Dryer Plug Dryer Machine State",
                "Dryer Plug Dryer Job State",
                "Dryer Plug Dryer Completion Time",
                "Dryer Plug Power Meter",
            ]
        );
    }

    #[test]
    fn test_setup_platform_by_domain() {
        let broker = broker();
        let config = Arc::new(SmartThingsConfig::default());
        let (updates, _) = UpdateRequester::channel();

        let platform: Platform = "sensor".parse().unwrap();
        let entities = setup_platform(platform, &broker, &config, &updates);
        assert_eq!(entities.len(), 4);
        assert!(entities.iter().all(|e| e.domain() == "sensor"));
    }

    #[test]
    fn test_dispatch_event_requests_rerender() {
        let broker = broker();
        let (updates, mut rx) = UpdateRequester::channel();

        let sent = dispatch_event(
            &broker,
            DeviceEvent::new("multi", capability::CONTACT_SENSOR, "contact", "open"),
            &updates,
        );

        assert_eq!(sent, 2);
        assert_eq!(rx.try_recv().unwrap(), "multi.acceleration");
        assert_eq!(rx.try_recv().unwrap(), "multi.contact");
    }
}
