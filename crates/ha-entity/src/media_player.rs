//! Media player domain

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use bitflags::bitflags;
use ha_core::states::{STATE_OFF, STATE_ON, STATE_PAUSED, STATE_PLAYING};
use serde_json::{json, Value};

use crate::Entity;

pub const DOMAIN: &str = "media_player";

/// Device class for speakers
pub const DEVICE_CLASS_SPEAKER: &str = "speaker";

bitflags! {
    /// Operations a media player supports
    ///
    /// Bit values match the host's `supported_features` attribute.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MediaPlayerEntityFeature: u32 {
        const PAUSE = 1;
        const VOLUME_SET = 4;
        const VOLUME_MUTE = 8;
        const TURN_ON = 128;
        const TURN_OFF = 256;
        const VOLUME_STEP = 1024;
        const SELECT_SOURCE = 2048;
        const STOP = 4096;
        const PLAY = 16384;
        const SHUFFLE_SET = 32768;
    }
}

/// Rendered state of a media player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaPlayerState {
    Off,
    On,
    Playing,
    Paused,
}

impl MediaPlayerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => STATE_OFF,
            Self::On => STATE_ON,
            Self::Playing => STATE_PLAYING,
            Self::Paused => STATE_PAUSED,
        }
    }
}

impl fmt::Display for MediaPlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A controllable media player
///
/// Read accessors return `None` for anything the player does not support
/// or does not know yet. Actions return whether the device acknowledged
/// the command.
#[async_trait]
pub trait MediaPlayerEntity: Entity {
    fn supported_features(&self) -> MediaPlayerEntityFeature;

    fn device_class(&self) -> Option<&'static str> {
        None
    }

    fn player_state(&self) -> Option<MediaPlayerState>;

    /// Volume as a fraction between 0.0 and 1.0
    fn volume_level(&self) -> Option<f64> {
        None
    }

    fn is_volume_muted(&self) -> Option<bool> {
        None
    }

    fn source(&self) -> Option<String> {
        None
    }

    fn source_list(&self) -> Option<Vec<String>> {
        None
    }

    fn shuffle(&self) -> Option<bool> {
        None
    }

    fn media_title(&self) -> Option<String> {
        None
    }

    async fn turn_on(&self) -> bool;
    async fn turn_off(&self) -> bool;
    async fn mute_volume(&self, mute: bool) -> bool;
    async fn set_volume_level(&self, volume: f64) -> bool;
    async fn volume_up(&self) -> bool;
    async fn volume_down(&self) -> bool;
    async fn media_play(&self) -> bool;
    async fn media_pause(&self) -> bool;
    async fn media_stop(&self) -> bool;
    async fn select_source(&self, source: &str) -> bool;
    async fn set_shuffle(&self, shuffle: bool) -> bool;
}

/// Render a media player's state value
pub fn state_of<E: MediaPlayerEntity + ?Sized>(entity: &E) -> Option<String> {
    entity.player_state().map(|state| state.as_str().to_string())
}

/// Render a media player's state attributes
///
/// Only values the player reports are included.
pub fn attributes_of<E: MediaPlayerEntity + ?Sized>(entity: &E) -> HashMap<String, Value> {
    let mut attributes = HashMap::from([(
        "supported_features".to_string(),
        json!(entity.supported_features().bits()),
    )]);
    if let Some(class) = entity.device_class() {
        attributes.insert("device_class".to_string(), json!(class));
    }
    if let Some(volume) = entity.volume_level() {
        attributes.insert("volume_level".to_string(), json!(volume));
    }
    if let Some(muted) = entity.is_volume_muted() {
        attributes.insert("is_volume_muted".to_string(), json!(muted));
    }
    if let Some(source) = entity.source() {
        attributes.insert("source".to_string(), json!(source));
    }
    if let Some(sources) = entity.source_list() {
        attributes.insert("source_list".to_string(), json!(sources));
    }
    if let Some(shuffle) = entity.shuffle() {
        attributes.insert("shuffle".to_string(), json!(shuffle));
    }
    if let Some(title) = entity.media_title() {
        attributes.insert("media_title".to_string(), json!(title));
    }
    attributes
}
