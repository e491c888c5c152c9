//! Session-ended requests: the platform closed the conversation.

use std::ops::Deref;

use super::launch::LaunchRequest;
use super::{SessionEndedReason, SessionErrorType};
use crate::decode::FieldReader;
use crate::envelope::RequestEnvelope;
use crate::error::DecodeError;

/// A session-ended request.
///
/// Dereferences to [`LaunchRequest`] for the shared base fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEndedRequest {
    launch: LaunchRequest,
    reason: SessionEndedReason,
    error: SessionError,
}

impl SessionEndedRequest {
    /// Builds a session-ended request from an envelope.
    ///
    /// `reason` is required. When the body carries no `error` object the
    /// error is [`SessionError::default`].
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the base fields fail to decode, when
    /// `reason` is missing or unrecognised, or when a present `error` object
    /// lacks a valid `type` or a string `message`.
    pub fn from_envelope(envelope: &RequestEnvelope) -> Result<Self, DecodeError> {
        let launch = LaunchRequest::from_envelope(envelope)?;
        let body = FieldReader::new(envelope.body());
        let reason = body.required_variant("reason")?;
        let error = body
            .optional_object("error")?
            .map(|error| SessionError::decode(&error))
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            launch,
            reason,
            error,
        })
    }

    /// Returns the base fields.
    #[must_use]
    pub const fn launch(&self) -> &LaunchRequest {
        &self.launch
    }

    /// Returns why the session ended.
    #[must_use]
    pub const fn reason(&self) -> SessionEndedReason {
        self.reason
    }

    /// Returns the reported error; the default value when none was reported.
    #[must_use]
    pub const fn error(&self) -> &SessionError {
        &self.error
    }
}

impl Deref for SessionEndedRequest {
    type Target = LaunchRequest;

    fn deref(&self) -> &Self::Target {
        &self.launch
    }
}

/// Error details attached to a session that ended abnormally.
///
/// The default value (no type, empty message) stands for "no error reported".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionError {
    error_type: Option<SessionErrorType>,
    message: String,
}

impl SessionError {
    fn decode(error: &FieldReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            error_type: Some(error.required_variant("type")?),
            message: error.required_str("message")?.to_owned(),
        })
    }

    /// Returns the error category, or `None` when no error was reported.
    #[must_use]
    pub const fn error_type(&self) -> Option<SessionErrorType> {
        self.error_type
    }

    /// Returns the platform's description of the error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` when this is the "no error reported" value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error_type.is_none() && self.message.is_empty()
    }
}
