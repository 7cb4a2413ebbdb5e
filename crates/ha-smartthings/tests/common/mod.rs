//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use smartthings_api::{
    ApiResult, AttributeState, Device, DeviceApi, DeviceCommand, DeviceStatus,
};

/// A cloud API double that records commands and acknowledges them
/// unless told otherwise
pub struct MockDeviceApi {
    acknowledge: Mutex<bool>,
    sent: Mutex<Vec<(String, DeviceCommand)>>,
}

impl MockDeviceApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            acknowledge: Mutex::new(true),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn set_acknowledge(&self, acknowledge: bool) {
        *self.acknowledge.lock() = acknowledge;
    }

    /// Every command sent so far, with the device it went to
    pub fn sent(&self) -> Vec<(String, DeviceCommand)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl DeviceApi for MockDeviceApi {
    async fn post_command(&self, device_id: &str, command: &DeviceCommand) -> ApiResult<bool> {
        self.sent
            .lock()
            .push((device_id.to_string(), command.clone()));
        Ok(*self.acknowledge.lock())
    }
}

#[derive(Deserialize)]
struct DeviceFixture {
    device_id: String,
    label: String,
    capabilities: Vec<String>,
    #[serde(default)]
    status: serde_json::Map<String, Value>,
    /// Units of the status attributes that carry one
    #[serde(default)]
    units: HashMap<String, String>,
}

/// Load a fixture file as a string
///
/// Fixtures are stored in the `tests/fixtures/` directory.
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);

    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e))
}

/// Build the devices described in a fixture file, all talking to `api`
pub fn load_devices(name: &str, api: Arc<MockDeviceApi>) -> Vec<Arc<Device>> {
    let fixtures: Vec<DeviceFixture> = serde_json::from_str(&load_fixture(name))
        .unwrap_or_else(|e| panic!("Failed to parse fixture '{}': {}", name, e));

    fixtures
        .into_iter()
        .map(|mut fixture| {
            let status = fixture
                .status
                .into_iter()
                .fold(DeviceStatus::new(&fixture.device_id), |status, (k, v)| {
                    match fixture.units.remove(&k) {
                        Some(unit) => status.with_state(k, AttributeState::with_unit(v, unit)),
                        None => status.with_value(k, v),
                    }
                });
            Arc::new(
                Device::new(
                    fixture.device_id,
                    fixture.label,
                    fixture.capabilities,
                    api.clone(),
                )
                .with_status(status),
            )
        })
        .collect()
}
