//! Device, system, and audio player state at request time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use super::{Application, User, null_as_default};

/// System and device state supplied with every request.
///
/// On the wire the members are spelled `System` and `AudioPlayer`; the
/// lower camel case spellings are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    #[serde(
        rename = "System",
        alias = "system",
        deserialize_with = "null_as_default"
    )]
    system: SystemState,
    #[serde(
        rename = "AudioPlayer",
        alias = "audioPlayer",
        skip_serializing_if = "Option::is_none"
    )]
    audio_player: Option<AudioPlayerState>,
}

impl Context {
    /// Returns the system state.
    #[must_use]
    pub const fn system(&self) -> &SystemState {
        &self.system
    }

    /// Returns the audio player state when the device reported one.
    #[must_use]
    pub const fn audio_player(&self) -> Option<&AudioPlayerState> {
        self.audio_player.as_ref()
    }
}

/// The platform and the device interacting with the skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemState {
    #[serde(deserialize_with = "null_as_default")]
    api_access_token: String,
    #[serde(deserialize_with = "null_as_default")]
    api_endpoint: String,
    #[serde(deserialize_with = "null_as_default")]
    application: Application,
    #[serde(deserialize_with = "null_as_default")]
    device: Device,
    #[serde(deserialize_with = "null_as_default")]
    user: User,
}

impl SystemState {
    /// Returns the token for calling platform APIs on behalf of the user.
    #[must_use]
    pub fn api_access_token(&self) -> &str {
        &self.api_access_token
    }

    /// Returns the regional base URI for platform APIs.
    #[must_use]
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Returns the application the request targets.
    #[must_use]
    pub const fn application(&self) -> &Application {
        &self.application
    }

    /// Returns the device the user is talking to.
    #[must_use]
    pub const fn device(&self) -> &Device {
        &self.device
    }

    /// Returns the user as seen by the platform.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }
}

/// A device and its declared capabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    #[serde(deserialize_with = "null_as_default")]
    device_id: String,
    #[serde(deserialize_with = "null_as_default")]
    supported_interfaces: BTreeMap<String, Value>,
}

impl Device {
    /// Returns the device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns `true` when the device declares the named interface.
    ///
    /// ```
    /// use speechlet::RequestEnvelope;
    ///
    /// let envelope = RequestEnvelope::parse(br#"{
    ///     "version": "1.0",
    ///     "context": {"System": {"device": {
    ///         "deviceId": "dev-1",
    ///         "supportedInterfaces": {"AudioPlayer": {}}
    ///     }}},
    ///     "request": {"type": "LaunchRequest"}
    /// }"#).expect("parse envelope");
    /// let device = envelope.context().system().device();
    /// assert!(device.supports("AudioPlayer"));
    /// assert!(!device.supports("Display"));
    /// ```
    #[must_use]
    pub fn supports(&self, interface: &str) -> bool {
        self.supported_interfaces.contains_key(interface)
    }

    /// Iterates over the declared interface names in sorted order.
    pub fn supported_interfaces(&self) -> impl Iterator<Item = &str> {
        self.supported_interfaces.keys().map(String::as_str)
    }
}

/// Playback state reported by the audio player interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioPlayerState {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    offset_in_milliseconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    player_activity: Option<PlayerActivity>,
}

impl AudioPlayerState {
    /// Returns the token the skill attached when it started playback.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the playback offset from the start of the track.
    #[must_use]
    pub const fn offset_in_milliseconds(&self) -> i64 {
        self.offset_in_milliseconds
    }

    /// Returns the last known playback activity.
    #[must_use]
    pub const fn player_activity(&self) -> Option<PlayerActivity> {
        self.player_activity
    }
}

/// Last known state of audio playback.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerActivity {
    /// Nothing was playing.
    Idle,
    /// Playback was paused.
    Paused,
    /// A track is playing.
    Playing,
    /// Playback stalled waiting for data.
    BufferUnderrun,
    /// The track played to completion.
    Finished,
    /// Playback was stopped.
    Stopped,
}
