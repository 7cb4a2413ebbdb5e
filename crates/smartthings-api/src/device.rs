//! Device object and command transport

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ApiResult;
use crate::status::DeviceStatus;
use crate::{attribute, capability};

/// Component addressed when none is given
pub const COMPONENT_MAIN: &str = "main";

/// A single command as posted to the device API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCommand {
    #[serde(rename = "component")]
    pub component_id: String,
    pub capability: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Value>,
}

impl DeviceCommand {
    pub fn new(
        component_id: impl Into<String>,
        capability: impl Into<String>,
        command: impl Into<String>,
        arguments: Vec<Value>,
    ) -> Self {
        Self {
            component_id: component_id.into(),
            capability: capability.into(),
            command: command.into(),
            arguments,
        }
    }
}

/// Transport that delivers commands to the cloud
///
/// `Ok(true)` means the command was acknowledged, `Ok(false)` that the
/// cloud answered without acknowledging it.
#[async_trait]
pub trait DeviceApi: Send + Sync {
    async fn post_command(&self, device_id: &str, command: &DeviceCommand) -> ApiResult<bool>;
}

/// A discovered SmartThings device
///
/// Identity and capabilities are fixed for the device's lifetime; only the
/// status snapshot changes.
pub struct Device {
    device_id: String,
    label: String,
    capabilities: Vec<String>,
    status: RwLock<DeviceStatus>,
    api: Arc<dyn DeviceApi>,
}

impl Device {
    pub fn new(
        device_id: impl Into<String>,
        label: impl Into<String>,
        capabilities: Vec<String>,
        api: Arc<dyn DeviceApi>,
    ) -> Self {
        let device_id = device_id.into();
        Self {
            status: RwLock::new(DeviceStatus::new(device_id.clone())),
            device_id,
            label: label.into(),
            capabilities,
            api,
        }
    }

    /// Replace the initial status snapshot
    pub fn with_status(self, status: DeviceStatus) -> Self {
        *self.status.write() = status;
        self
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }

    /// Read access to the status snapshot
    pub fn status(&self) -> RwLockReadGuard<'_, DeviceStatus> {
        self.status.read()
    }

    /// Write access to the status snapshot
    ///
    /// Never hold the guard across an `.await`.
    pub fn status_mut(&self) -> RwLockWriteGuard<'_, DeviceStatus> {
        self.status.write()
    }

    /// Send a command to one of the device's components
    pub async fn command(
        &self,
        component_id: &str,
        capability: &str,
        command: &str,
        arguments: Vec<Value>,
    ) -> ApiResult<bool> {
        let command = DeviceCommand::new(component_id, capability, command, arguments);
        debug!(device_id = %self.device_id, ?command, "Sending command");
        self.api.post_command(&self.device_id, &command).await
    }

    /// Turn the device on, optionally recording the result in the snapshot
    pub async fn switch_on(&self, set_status: bool) -> ApiResult<bool> {
        self.set_switch("on", set_status).await
    }

    /// Turn the device off, optionally recording the result in the snapshot
    pub async fn switch_off(&self, set_status: bool) -> ApiResult<bool> {
        self.set_switch("off", set_status).await
    }

    async fn set_switch(&self, value: &str, set_status: bool) -> ApiResult<bool> {
        let result = self
            .command(COMPONENT_MAIN, capability::SWITCH, value, Vec::new())
            .await?;
        if result && set_status {
            self.status_mut()
                .update_attribute_value(attribute::SWITCH, value);
        }
        Ok(result)
    }

    /// Set the fan speed level, optionally recording the result in the snapshot
    pub async fn set_fan_speed(&self, speed: i64, set_status: bool) -> ApiResult<bool> {
        let result = self
            .command(
                COMPONENT_MAIN,
                capability::FAN_SPEED,
                "setFanSpeed",
                vec![json!(speed)],
            )
            .await?;
        if result && set_status {
            let mut status = self.status_mut();
            status.update_attribute_value(attribute::FAN_SPEED, speed);
            // A non-zero speed implies the fan is running
            status.update_attribute_value(attribute::SWITCH, if speed > 0 { "on" } else { "off" });
        }
        Ok(result)
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("device_id", &self.device_id)
            .field("label", &self.label)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
