//! Typed request variants and their builders.
//!
//! Every variant starts from the same base shape, [`LaunchRequest`]. The
//! richer variants hold a `LaunchRequest` and dereference to it, so handlers
//! read `request.request_id()` or `request.session()` on an
//! [`IntentRequest`] exactly as they would on a launch.

mod intent;
mod launch;
mod session_ended;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{DecodeError, RouterError};

pub(crate) use self::intent::intent_name;
pub use self::intent::{Intent, IntentRequest, Slot};
pub use self::launch::LaunchRequest;
pub use self::session_ended::{SessionEndedRequest, SessionError};

/// Body field holding the request discriminant.
pub(crate) const TYPE_FIELD: &str = "type";

/// The request kinds the router understands.
///
/// Parsing and display use the wire spelling, which is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, Display)]
pub enum RequestType {
    /// The user opened the skill without a specific request.
    #[strum(serialize = "LaunchRequest")]
    Launch,
    /// The user invoked a named intent.
    #[strum(serialize = "IntentRequest")]
    Intent,
    /// The platform closed the session.
    #[strum(serialize = "SessionEndedRequest")]
    SessionEnded,
}

impl RequestType {
    /// Parses the wire value of the body's `type` field.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnsupportedRequestType`] carrying the raw value
    /// when it names no known request kind.
    pub fn parse(value: &str) -> Result<Self, RouterError> {
        value
            .parse::<Self>()
            .map_err(|_| RouterError::unsupported_request_type(value))
    }

    /// Reads the discriminant from a request body.
    ///
    /// An absent or `null` field is a decode failure. Any other non-string
    /// value is reported as an unsupported type using its JSON text.
    pub(crate) fn from_body(body: &Map<String, Value>) -> Result<Self, RouterError> {
        match body.get(TYPE_FIELD) {
            Some(Value::String(raw)) => Self::parse(raw),
            Some(Value::Null) | None => Err(DecodeError::missing_field(TYPE_FIELD).into()),
            Some(other) => Err(RouterError::unsupported_request_type(other.to_string())),
        }
    }

    /// Returns the wire spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Progress of a multi-turn dialog, passed through uninterpreted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogState {
    /// The first turn of the dialog.
    Started,
    /// The dialog has further slots to collect.
    InProgress,
    /// Every required slot has been filled.
    Completed,
}

/// Whether the user confirmed an intent.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationStatus {
    /// No confirmation was requested.
    #[default]
    None,
    /// The user confirmed.
    Confirmed,
    /// The user declined.
    Denied,
}

/// Why the platform closed a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEndedReason {
    /// The user asked to exit.
    UserInitiated,
    /// The session failed.
    Error,
    /// The user did not answer after the maximum number of reprompts.
    ExceededMaxReprompts,
}

/// Category of failure reported alongside [`SessionEndedReason::Error`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionErrorType {
    /// The skill's previous response was rejected.
    InvalidResponse,
    /// The platform could not reach the device.
    DeviceCommunicationError,
    /// The platform failed internally.
    InternalError,
}
