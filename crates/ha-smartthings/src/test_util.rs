//! Helpers for unit tests

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use smartthings_api::{ApiResult, Device, DeviceApi, DeviceCommand, DeviceStatus};

/// A `DeviceApi` that records every command and answers with a fixed result
pub struct RecordingApi {
    result: Mutex<ApiResult<bool>>,
    sent: Mutex<Vec<DeviceCommand>>,
}

impl RecordingApi {
    pub fn new(result: ApiResult<bool>) -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(result),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn acknowledging() -> Arc<Self> {
        Self::new(Ok(true))
    }

    pub fn rejecting() -> Arc<Self> {
        Self::new(Ok(false))
    }

    pub fn set_result(&self, result: ApiResult<bool>) {
        *self.result.lock() = result;
    }

    pub fn sent(&self) -> Vec<DeviceCommand> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl DeviceApi for RecordingApi {
    async fn post_command(&self, _device_id: &str, command: &DeviceCommand) -> ApiResult<bool> {
        self.sent.lock().push(command.clone());
        self.result.lock().clone()
    }
}

/// A device with the given capabilities and an empty snapshot
pub fn device(api: Arc<RecordingApi>, capabilities: &[&str]) -> Arc<Device> {
    device_with_status(api, capabilities, DeviceStatus::new("dev-1"))
}

/// A device with the given capabilities and snapshot
pub fn device_with_status(
    api: Arc<RecordingApi>,
    capabilities: &[&str],
    status: DeviceStatus,
) -> Arc<Device> {
    Arc::new(
        Device::new(
            "dev-1",
            "Living Room",
            capabilities.iter().map(|c| c.to_string()).collect(),
            api,
        )
        .with_status(status),
    )
}
