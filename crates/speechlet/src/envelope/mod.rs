//! The inbound request envelope.
//!
//! An envelope carries the protocol version, the conversation [`Session`],
//! the device [`Context`], and a loosely typed request body. Session and
//! context are decoded eagerly with serde because every request variant copies
//! them verbatim. The body stays an open JSON object: its shape depends on the
//! `type` discriminant and each request builder reads only the fields it
//! needs.

mod context;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::DecodeError;

pub use self::context::{AudioPlayerState, Context, Device, PlayerActivity, SystemState};

/// Free-form key/value attributes echoed back by the platform across turns.
pub type SessionAttributes = Map<String, Value>;

/// The top-level inbound payload.
///
/// # Example
///
/// ```
/// use speechlet::RequestEnvelope;
///
/// let envelope = RequestEnvelope::parse(
///     br#"{"version":"1.0","request":{"type":"LaunchRequest"}}"#,
/// )
/// .expect("parse envelope");
/// assert_eq!(envelope.version(), "1.0");
/// assert!(envelope.body().contains_key("type"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestEnvelope {
    version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    session: Session,
    #[serde(default, deserialize_with = "null_as_default")]
    context: Context,
    #[serde(rename = "request")]
    body: Map<String, Value>,
}

impl RequestEnvelope {
    /// Creates an envelope from already decoded parts.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        session: Session,
        context: Context,
        body: Map<String, Value>,
    ) -> Self {
        Self {
            version: version.into(),
            session,
            context,
            body,
        }
    }

    /// Parses an envelope from raw JSON bytes.
    ///
    /// Trailing whitespace, including a line delimiter, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedEnvelope`] if the input is empty or is
    /// not a JSON object with at least `version` and `request`.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        let trimmed = trim_trailing_whitespace(bytes);
        if trimmed.is_empty() {
            return Err(DecodeError::malformed("empty envelope"));
        }
        serde_json::from_slice(trimmed).map_err(DecodeError::from_json_error)
    }

    /// Decodes an envelope from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedEnvelope`] if the value does not have
    /// the envelope shape.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        serde_json::from_value(value).map_err(DecodeError::from_json_error)
    }

    /// Returns the protocol version supplied by the platform.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the conversation session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the device and system context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Returns the loosely typed request body.
    #[must_use]
    pub const fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// The current conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    #[serde(deserialize_with = "null_as_default")]
    new: bool,
    #[serde(deserialize_with = "null_as_default")]
    session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    application: Application,
    #[serde(deserialize_with = "null_as_default")]
    attributes: SessionAttributes,
    #[serde(deserialize_with = "null_as_default")]
    user: User,
}

impl Session {
    /// Returns whether this request opens a new session.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.new
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Returns the owning application.
    #[must_use]
    pub const fn application(&self) -> &Application {
        &self.application
    }

    /// Returns the attributes echoed back from the previous response.
    #[must_use]
    pub const fn attributes(&self) -> &SessionAttributes {
        &self.attributes
    }

    /// Returns the user identity.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }
}

/// Identifies the skill the request is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Application {
    #[serde(deserialize_with = "null_as_default")]
    application_id: String,
}

impl Application {
    /// Returns the application identifier.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }
}

/// User identity and account linking information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

impl User {
    /// Returns the platform user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the token linking the user to an external account, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

/// Treats an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    bytes.get(..end).unwrap_or_default()
}
