//! Media players through the SmartThings cloud API
//!
//! A device qualifies with either the playback or the switch capability and
//! then becomes exactly one media player. The optional capabilities only
//! decide which features that player supports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ha_core::states::{STATE_OFF, STATE_ON, STATE_PAUSED, STATE_PLAYING, STATE_UNKNOWN};
use ha_entity::media_player::{
    self, MediaPlayerEntity, MediaPlayerEntityFeature, MediaPlayerState, DEVICE_CLASS_SPEAKER,
};
use ha_entity::{Entity, UpdateRequester};
use serde_json::{json, Value};
use smartthings_api::{attribute, capability, Device, DeviceStatus, COMPONENT_MAIN};
use tracing::debug;

use crate::config::SmartThingsConfig;
use crate::entity::SmartThingsEntity;
use crate::optimistic;

/// A device needs at least one of these to become a media player
pub const MIN_REQUIRED: [&str; 2] = [capability::MEDIA_PLAYBACK, capability::SWITCH];

/// Every capability a media player claims once admitted
pub const ALL_SUPPORTED: [&str; 6] = [
    capability::SWITCH,
    capability::AUDIO_VOLUME,
    capability::MEDIA_PLAYBACK_SHUFFLE,
    capability::MEDIA_INPUT_SOURCE,
    capability::AUDIO_MUTE,
    capability::MEDIA_PLAYBACK,
];

/// Shuffle attribute value meaning "on"
const SHUFFLE_ENABLED: &str = "enabled";
const SHUFFLE_DISABLED: &str = "disabled";

/// Command names of the media capabilities
mod command {
    pub const MUTE: &str = "mute";
    pub const UNMUTE: &str = "unmute";
    pub const SET_VOLUME: &str = "setVolume";
    pub const VOLUME_UP: &str = "volumeUp";
    pub const VOLUME_DOWN: &str = "volumeDown";
    pub const PLAY: &str = "play";
    pub const PAUSE: &str = "pause";
    pub const STOP: &str = "stop";
    pub const SET_INPUT_SOURCE: &str = "setInputSource";
    pub const SET_PLAYBACK_SHUFFLE: &str = "setPlaybackShuffle";
}

/// All supported capabilities if the minimum required are present
pub fn get_capabilities<S: AsRef<str>>(capabilities: &[S]) -> Option<Vec<&'static str>> {
    let qualifies = MIN_REQUIRED
        .iter()
        .any(|required| capabilities.iter().any(|c| c.as_ref() == *required));
    qualifies.then(|| ALL_SUPPORTED.to_vec())
}

/// Features a device supports, derived from its capabilities alone
pub fn supported_features<S: AsRef<str>>(capabilities: &[S]) -> MediaPlayerEntityFeature {
    let has = |capability: &str| capabilities.iter().any(|c| c.as_ref() == capability);

    let mut features = MediaPlayerEntityFeature::PLAY
        | MediaPlayerEntityFeature::PAUSE
        | MediaPlayerEntityFeature::STOP;
    if has(capability::AUDIO_VOLUME) {
        features |= MediaPlayerEntityFeature::VOLUME_SET | MediaPlayerEntityFeature::VOLUME_STEP;
    }
    if has(capability::AUDIO_MUTE) {
        features |= MediaPlayerEntityFeature::VOLUME_MUTE;
    }
    if has(capability::SWITCH) {
        features |= MediaPlayerEntityFeature::TURN_ON | MediaPlayerEntityFeature::TURN_OFF;
    }
    if has(capability::MEDIA_INPUT_SOURCE) {
        features |= MediaPlayerEntityFeature::SELECT_SOURCE;
    }
    if has(capability::MEDIA_PLAYBACK_SHUFFLE) {
        features |= MediaPlayerEntityFeature::SHUFFLE_SET;
    }
    features
}

/// Map a raw playback status onto a player state
///
/// The outer `None` means the value is not recognised; `Some(None)` is the
/// recognised "unknown" status.
fn playback_to_state(status: &str) -> Option<Option<MediaPlayerState>> {
    match status {
        STATE_PLAYING => Some(Some(MediaPlayerState::Playing)),
        STATE_PAUSED => Some(Some(MediaPlayerState::Paused)),
        STATE_ON => Some(Some(MediaPlayerState::On)),
        STATE_OFF => Some(Some(MediaPlayerState::Off)),
        STATE_UNKNOWN => Some(None),
        _ => None,
    }
}

/// Read a source list that arrives either bare or wrapped in `{"value": [...]}`
pub fn normalize_source_list(value: &Value) -> Option<Vec<String>> {
    let list = match value {
        Value::Array(list) => list,
        Value::Object(map) => map.get("value")?.as_array()?,
        _ => return None,
    };
    Some(
        list.iter()
            .filter_map(|source| source.as_str().map(str::to_string))
            .collect(),
    )
}

/// One volume step up or down from `current`, kept within 0-100
///
/// Out-of-range readings are clamped before stepping.
fn step_volume(current: i64, up: bool) -> i64 {
    let current = current.clamp(0, 100);
    if up {
        (current + 1).min(100)
    } else {
        (current - 1).max(0)
    }
}

/// Scale a 0.0-1.0 volume to the device's 0-100 range
///
/// Rounds to the nearest step instead of truncating, so 0.29 maps to 29
/// rather than 28.
fn volume_to_raw(volume: f64) -> i64 {
    (volume * 100.0).round().clamp(0.0, 100.0) as i64
}

pub struct SmartThingsMediaPlayer {
    base: SmartThingsEntity,
    supported_features: MediaPlayerEntityFeature,
}

impl SmartThingsMediaPlayer {
    pub fn new(
        device: Arc<Device>,
        config: Arc<SmartThingsConfig>,
        updates: UpdateRequester,
    ) -> Self {
        let supported_features = supported_features(device.capabilities());
        debug!(
            device_id = device.device_id(),
            features = supported_features.bits(),
            "Creating media player"
        );
        Self {
            base: SmartThingsEntity::new(device, config, updates),
            supported_features,
        }
    }

    fn supports(&self, feature: MediaPlayerEntityFeature) -> bool {
        self.supported_features.contains(feature)
    }

    fn status(&self) -> parking_lot::RwLockReadGuard<'_, DeviceStatus> {
        self.base.device().status()
    }

    /// Send a media command to the main component and run the optimistic
    /// update protocol
    async fn media_command<U>(
        &self,
        capability: &str,
        command: &str,
        arguments: Vec<Value>,
        update: U,
    ) -> bool
    where
        U: FnOnce(&mut DeviceStatus) + Send,
    {
        let device = self.base.device();
        let request = device.command(COMPONENT_MAIN, capability, command, arguments);
        optimistic::execute(&self.base, device.device_id(), command, request, update).await
    }

    fn playback_target_for_stop(&self) -> &'static str {
        if self.base.config().fix_optimistic_targets {
            "stopped"
        } else {
            "paused"
        }
    }

    fn shuffle_target(&self) -> &'static str {
        if self.base.config().fix_optimistic_targets {
            attribute::PLAYBACK_SHUFFLE
        } else {
            attribute::PLAYBACK_STATUS
        }
    }
}

impl Entity for SmartThingsMediaPlayer {
    fn domain(&self) -> &'static str {
        media_player::DOMAIN
    }

    fn unique_id(&self) -> String {
        self.base.device().device_id().to_string()
    }

    fn name(&self) -> String {
        self.base.device().label().to_string()
    }

    fn state(&self) -> Option<String> {
        media_player::state_of(self)
    }

    fn attributes(&self) -> HashMap<String, Value> {
        media_player::attributes_of(self)
    }
}

#[async_trait]
impl MediaPlayerEntity for SmartThingsMediaPlayer {
    fn supported_features(&self) -> MediaPlayerEntityFeature {
        self.supported_features
    }

    fn device_class(&self) -> Option<&'static str> {
        Some(DEVICE_CLASS_SPEAKER)
    }

    /// Off when switched off; the playback status when the active source is
    /// controllable and the status is recognised; on otherwise
    fn player_state(&self) -> Option<MediaPlayerState> {
        if !self.status().switch() {
            return Some(MediaPlayerState::Off);
        }

        let controllable = self
            .source()
            .is_some_and(|source| self.base.config().is_controllable_source(&source));
        if controllable {
            let playback = self
                .status()
                .str_value(attribute::PLAYBACK_STATUS)
                .and_then(playback_to_state);
            if let Some(Some(state)) = playback {
                return Some(state);
            }
        }
        Some(MediaPlayerState::On)
    }

    fn volume_level(&self) -> Option<f64> {
        if !self.supports(MediaPlayerEntityFeature::VOLUME_SET) {
            return None;
        }
        let raw = self.status().int_value(attribute::VOLUME)?;
        Some(raw as f64 / 100.0)
    }

    fn is_volume_muted(&self) -> Option<bool> {
        if !self.supports(MediaPlayerEntityFeature::VOLUME_MUTE) {
            return None;
        }
        Some(self.status().is_on(attribute::MUTE))
    }

    fn source(&self) -> Option<String> {
        if !self.supports(MediaPlayerEntityFeature::SELECT_SOURCE) {
            return None;
        }
        self.status()
            .str_value(attribute::INPUT_SOURCE)
            .map(str::to_string)
    }

    fn source_list(&self) -> Option<Vec<String>> {
        if !self.supports(MediaPlayerEntityFeature::SELECT_SOURCE) {
            return None;
        }
        self.status()
            .value(attribute::SUPPORTED_INPUT_SOURCES)
            .and_then(normalize_source_list)
    }

    fn shuffle(&self) -> Option<bool> {
        if !self.supports(MediaPlayerEntityFeature::SHUFFLE_SET) {
            return None;
        }
        self.status()
            .str_value(attribute::PLAYBACK_SHUFFLE)
            .map(|value| value == SHUFFLE_ENABLED)
    }

    fn media_title(&self) -> Option<String> {
        match self.player_state() {
            Some(MediaPlayerState::Playing | MediaPlayerState::Paused) => self
                .status()
                .str_value(attribute::TRACK_DESCRIPTION)
                .map(str::to_string),
            _ => None,
        }
    }

    async fn turn_on(&self) -> bool {
        let device = self.base.device();
        let request = device.switch_on(self.base.config().optimistic);
        optimistic::execute(&self.base, device.device_id(), "on", request, |_| {}).await
    }

    async fn turn_off(&self) -> bool {
        let device = self.base.device();
        let request = device.switch_off(self.base.config().optimistic);
        optimistic::execute(&self.base, device.device_id(), "off", request, |_| {}).await
    }

    async fn mute_volume(&self, mute: bool) -> bool {
        let (command, value) = if mute {
            (command::MUTE, "muted")
        } else {
            (command::UNMUTE, "unmuted")
        };
        self.media_command(capability::AUDIO_MUTE, command, Vec::new(), move |status| {
            status.update_attribute_value(attribute::MUTE, value)
        })
        .await
    }

    async fn set_volume_level(&self, volume: f64) -> bool {
        let raw = volume_to_raw(volume);
        self.media_command(
            capability::AUDIO_VOLUME,
            command::SET_VOLUME,
            vec![json!(raw)],
            move |status| status.update_attribute_value(attribute::VOLUME, raw),
        )
        .await
    }

    async fn volume_up(&self) -> bool {
        self.media_command(
            capability::AUDIO_VOLUME,
            command::VOLUME_UP,
            Vec::new(),
            |status| {
                if let Some(current) = status.int_value(attribute::VOLUME) {
                    status.update_attribute_value(attribute::VOLUME, step_volume(current, true));
                }
            },
        )
        .await
    }

    async fn volume_down(&self) -> bool {
        self.media_command(
            capability::AUDIO_VOLUME,
            command::VOLUME_DOWN,
            Vec::new(),
            |status| {
                if let Some(current) = status.int_value(attribute::VOLUME) {
                    status.update_attribute_value(attribute::VOLUME, step_volume(current, false));
                }
            },
        )
        .await
    }

    async fn media_play(&self) -> bool {
        self.media_command(capability::MEDIA_PLAYBACK, command::PLAY, Vec::new(), |status| {
            status.update_attribute_value(attribute::PLAYBACK_STATUS, "playing")
        })
        .await
    }

    async fn media_pause(&self) -> bool {
        self.media_command(capability::MEDIA_PLAYBACK, command::PAUSE, Vec::new(), |status| {
            status.update_attribute_value(attribute::PLAYBACK_STATUS, "paused")
        })
        .await
    }

    async fn media_stop(&self) -> bool {
        let target = self.playback_target_for_stop();
        self.media_command(
            capability::MEDIA_PLAYBACK,
            command::STOP,
            Vec::new(),
            move |status| status.update_attribute_value(attribute::PLAYBACK_STATUS, target),
        )
        .await
    }

    async fn select_source(&self, source: &str) -> bool {
        let selected = source.to_string();
        self.media_command(
            capability::MEDIA_INPUT_SOURCE,
            command::SET_INPUT_SOURCE,
            vec![json!(source)],
            move |status| status.update_attribute_value(attribute::INPUT_SOURCE, selected),
        )
        .await
    }

    async fn set_shuffle(&self, shuffle: bool) -> bool {
        let value = if shuffle {
            SHUFFLE_ENABLED
        } else {
            SHUFFLE_DISABLED
        };
        let target = self.shuffle_target();
        self.media_command(
            capability::MEDIA_PLAYBACK_SHUFFLE,
            command::SET_PLAYBACK_SHUFFLE,
            vec![json!(value)],
            move |status| status.update_attribute_value(target, value),
        )
        .await
    }
}
