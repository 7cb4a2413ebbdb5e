//! Optimistic command execution
//!
//! Every entity action runs the same protocol: send the command, and only
//! if the device acknowledges it, write the presumed result into the status
//! snapshot and ask for an immediate re-render. A push update for the same
//! attribute may land before or after the optimistic write; the later write
//! wins and no reconciliation is attempted.

use std::future::Future;

use smartthings_api::{ApiResult, DeviceStatus};
use tracing::{debug, warn};

use crate::entity::SmartThingsEntity;

/// Collapse a command result into an acknowledgement
///
/// Transport errors are logged and count as "not acknowledged".
pub fn acknowledged(device_id: &str, command: &str, result: ApiResult<bool>) -> bool {
    match result {
        Ok(true) => true,
        Ok(false) => {
            warn!(device_id, command, "Command was not acknowledged");
            false
        }
        Err(e) => {
            warn!(device_id, command, error = %e, "Command failed");
            false
        }
    }
}

/// Run one entity action under the optimistic update protocol
///
/// `update` is applied to the snapshot after an acknowledgement when the
/// integration runs optimistically; it never runs for a failed command.
/// Returns whether the command was acknowledged.
pub async fn execute<F, U>(
    entity: &SmartThingsEntity,
    unique_id: &str,
    command: &str,
    request: F,
    update: U,
) -> bool
where
    F: Future<Output = ApiResult<bool>>,
    U: FnOnce(&mut DeviceStatus),
{
    let device_id = entity.device().device_id();
    if !acknowledged(device_id, command, request.await) {
        return false;
    }

    if entity.config().optimistic {
        debug!(device_id, command, "Applying optimistic update");
        let mut status = entity.device().status_mut();
        update(&mut *status);
    }
    entity.schedule_update(unique_id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SmartThingsConfig;
    use crate::test_util::{device, RecordingApi};
    use ha_entity::UpdateRequester;
    use smartthings_api::{attribute, capability, ApiError};
    use std::sync::Arc;

    fn entity(
        api: Arc<RecordingApi>,
        config: SmartThingsConfig,
    ) -> (SmartThingsEntity, tokio::sync::mpsc::UnboundedReceiver<String>) {
        let (updates, rx) = UpdateRequester::channel();
        let device = device(api, &[capability::MEDIA_PLAYBACK]);
        (SmartThingsEntity::new(device, Arc::new(config), updates), rx)
    }

    #[test]
    fn test_acknowledged() {
        assert!(acknowledged("dev", "play", Ok(true)));
        assert!(!acknowledged("dev", "play", Ok(false)));
        assert!(!acknowledged(
            "dev",
            "play",
            Err(ApiError::Rejected {
                status: 422,
                message: "bad argument".to_string()
            })
        ));
    }

    #[tokio::test]
    async fn test_acknowledged_command_updates_and_rerenders() {
        let api = RecordingApi::acknowledging();
        let (entity, mut rx) = entity(api, SmartThingsConfig::default());

        let ok = execute(&entity, "dev-1", "play", async { Ok(true) }, |status| {
            status.update_attribute_value(attribute::PLAYBACK_STATUS, "playing")
        })
        .await;

        assert!(ok);
        assert_eq!(
            entity.device().status().str_value(attribute::PLAYBACK_STATUS),
            Some("playing")
        );
        assert_eq!(rx.try_recv().unwrap(), "dev-1");
    }

    #[tokio::test]
    async fn test_failed_command_changes_nothing() {
        let api = RecordingApi::acknowledging();
        let (entity, mut rx) = entity(api, SmartThingsConfig::default());

        let ok = execute(
            &entity,
            "dev-1",
            "play",
            async { Err(ApiError::DeviceNotFound("dev-1".to_string())) },
            |status| status.update_attribute_value(attribute::PLAYBACK_STATUS, "playing"),
        )
        .await;

        assert!(!ok);
        assert!(entity
            .device()
            .status()
            .value(attribute::PLAYBACK_STATUS)
            .is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_non_optimistic_still_rerenders() {
        let api = RecordingApi::acknowledging();
        let config = SmartThingsConfig {
            optimistic: false,
            ..Default::default()
        };
        let (entity, mut rx) = entity(api, config);

        let ok = execute(&entity, "dev-1", "play", async { Ok(true) }, |status| {
            status.update_attribute_value(attribute::PLAYBACK_STATUS, "playing")
        })
        .await;

        assert!(ok);
        assert!(entity
            .device()
            .status()
            .value(attribute::PLAYBACK_STATUS)
            .is_none());
        assert_eq!(rx.try_recv().unwrap(), "dev-1");
    }
}
