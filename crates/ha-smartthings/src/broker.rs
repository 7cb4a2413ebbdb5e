//! Device broker
//!
//! The broker owns the devices discovered for one integration entry. It
//! decides once which platform serves which capability of each device, and
//! routes push updates from the cloud into device snapshots.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smartthings_api::{Device, COMPONENT_MAIN};
use tracing::{debug, info, instrument};

use crate::error::SetupError;
use crate::{binary_sensor, fan, media_player, sensor};

/// Entity platforms the integration provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Fan,
    MediaPlayer,
    BinarySensor,
    Sensor,
}

impl Platform {
    /// Platforms in the order they draw capabilities
    ///
    /// The sensor platforms go last since they accept almost anything.
    pub const ALL: [Platform; 4] = [
        Self::Fan,
        Self::MediaPlayer,
        Self::BinarySensor,
        Self::Sensor,
    ];

    pub fn domain(&self) -> &'static str {
        match self {
            Self::MediaPlayer => ha_entity::media_player::DOMAIN,
            Self::Fan => ha_entity::fan::DOMAIN,
            Self::BinarySensor => ha_entity::binary_sensor::DOMAIN,
            Self::Sensor => ha_entity::sensor::DOMAIN,
        }
    }

    /// Capabilities this platform wants out of `capabilities`
    pub fn get_capabilities(&self, capabilities: &[&str]) -> Vec<&'static str> {
        match self {
            Self::MediaPlayer => media_player::get_capabilities(capabilities).unwrap_or_default(),
            Self::Fan => fan::get_capabilities(capabilities).unwrap_or_default(),
            Self::BinarySensor => binary_sensor::get_capabilities(capabilities),
            Self::Sensor => sensor::get_capabilities(capabilities),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

impl FromStr for Platform {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.domain() == s)
            .ok_or_else(|| SetupError::UnknownPlatform(s.to_string()))
    }
}

/// An authoritative attribute update pushed by the cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEvent {
    pub device_id: String,
    #[serde(default = "default_component")]
    pub component_id: String,
    pub capability: String,
    pub attribute: String,
    pub value: Value,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

fn default_component() -> String {
    COMPONENT_MAIN.to_string()
}

impl DeviceEvent {
    pub fn new(
        device_id: impl Into<String>,
        capability: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            component_id: default_component(),
            capability: capability.into(),
            attribute: attribute.into(),
            value: value.into(),
            unit: None,
            data: None,
        }
    }
}

pub struct DeviceBroker {
    /// Devices keyed by device id, in discovery order
    devices: IndexMap<String, Arc<Device>>,
    /// Claimed capabilities per device and platform
    assignments: HashMap<String, HashMap<Platform, Vec<&'static str>>>,
}

impl DeviceBroker {
    pub fn new(devices: Vec<Arc<Device>>) -> Self {
        let mut broker = Self {
            devices: IndexMap::new(),
            assignments: HashMap::new(),
        };
        for device in devices {
            let assigned = assign_capabilities(&device);
            broker
                .assignments
                .insert(device.device_id().to_string(), assigned);
            broker
                .devices
                .insert(device.device_id().to_string(), device);
        }
        info!("Broker manages {} devices", broker.devices.len());
        broker
    }

    /// All devices, in discovery order
    pub fn devices(&self) -> impl Iterator<Item = &Arc<Device>> {
        self.devices.values()
    }

    pub fn device(&self, device_id: &str) -> Option<&Arc<Device>> {
        self.devices.get(device_id)
    }

    /// Capabilities of a device claimed by a platform
    pub fn get_assigned(&self, device_id: &str, platform: Platform) -> &[&'static str] {
        self.assignments
            .get(device_id)
            .and_then(|platforms| platforms.get(&platform))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn any_assigned(&self, device_id: &str, platform: Platform) -> bool {
        !self.get_assigned(device_id, platform).is_empty()
    }

    /// Write a pushed value into the device snapshot
    ///
    /// Returns the unique ids of every entity of the device, which all need
    /// re-rendering. Events for unknown devices are dropped.
    #[instrument(skip(self, event), fields(device_id = %event.device_id, attribute = %event.attribute))]
    pub fn apply_event(&self, event: DeviceEvent) -> Vec<String> {
        let Some(device) = self.devices.get(&event.device_id) else {
            debug!("Event for unknown device dropped");
            return Vec::new();
        };

        device.status_mut().apply_attribute_update(
            &event.component_id,
            &event.attribute,
            event.value,
            event.unit,
            event.data,
        );
        self.unique_ids(&event.device_id)
    }

    /// Unique ids of the entities set up for a device
    pub fn unique_ids(&self, device_id: &str) -> Vec<String> {
        let mut ids = Vec::new();
        for platform in Platform::ALL {
            let assigned = self.get_assigned(device_id, platform);
            if assigned.is_empty() {
                continue;
            }
            match platform {
                Platform::MediaPlayer | Platform::Fan => ids.push(device_id.to_string()),
                Platform::BinarySensor => ids.extend(
                    assigned
                        .iter()
                        .filter_map(|capability| binary_sensor::attribute_for(capability))
                        .map(|attribute| binary_sensor::unique_id(device_id, attribute)),
                ),
                Platform::Sensor => ids.extend(
                    assigned
                        .iter()
                        .flat_map(|capability| sensor::sources_for(capability))
                        .map(|source| sensor::unique_id(device_id, &source)),
                ),
            }
        }
        ids
    }
}

/// Draw a device's capabilities down through the platforms
///
/// Each platform sees only what earlier platforms left and claims the
/// capabilities it asks for that are still unclaimed.
fn assign_capabilities(device: &Device) -> HashMap<Platform, Vec<&'static str>> {
    let mut remaining: Vec<&str> = device.capabilities().iter().map(String::as_str).collect();
    let mut assigned = HashMap::new();

    for platform in Platform::ALL {
        let claimed: Vec<&'static str> = platform
            .get_capabilities(&remaining)
            .into_iter()
            .filter(|capability| remaining.contains(capability))
            .collect();
        if claimed.is_empty() {
            continue;
        }
        debug!(
            device_id = device.device_id(),
            platform = %platform,
            ?claimed,
            "Assigning capabilities"
        );
        remaining.retain(|capability| !claimed.iter().any(|c| c == capability));
        assigned.insert(platform, claimed);
    }
    assigned
}
