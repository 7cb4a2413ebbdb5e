//! Shared part of every SmartThings entity
//!
//! Each entity type holds one of these next to its own state and
//! implements the host's entity traits itself.

use std::sync::Arc;

use ha_entity::UpdateRequester;
use smartthings_api::Device;

use crate::config::SmartThingsConfig;

pub struct SmartThingsEntity {
    device: Arc<Device>,
    config: Arc<SmartThingsConfig>,
    updates: UpdateRequester,
}

impl SmartThingsEntity {
    pub fn new(device: Arc<Device>, config: Arc<SmartThingsConfig>, updates: UpdateRequester) -> Self {
        Self {
            device,
            config,
            updates,
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn config(&self) -> &SmartThingsConfig {
        &self.config
    }

    /// Ask the platform to re-render the entity now
    pub fn schedule_update(&self, unique_id: &str) {
        self.updates.schedule_update(unique_id);
    }
}
