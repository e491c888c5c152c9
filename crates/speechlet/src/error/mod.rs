//! Errors raised while decoding envelopes and dispatching requests.
//!
//! Both enums use `thiserror` with structured fields so hosts can inspect the
//! failure programmatically. Decoding failures name the offending field using
//! a dotted path relative to the request body (for example
//! `intent.slots.City.value`).

use thiserror::Error;

use crate::request::RequestType;

/// Errors raised while turning an inbound payload into a typed request.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload could not be read as a request envelope at all.
    #[error("malformed envelope: {message}")]
    MalformedEnvelope {
        /// Human-readable description of the failure.
        message: String,
        /// Underlying JSON error, when one exists.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A required field is absent from the request body.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Dotted path of the missing field.
        field: String,
    },

    /// A field is present but holds a value of the wrong JSON type.
    #[error("field '{field}' must be {expected}, found {found}")]
    UnexpectedType {
        /// Dotted path of the offending field.
        field: String,
        /// Expected JSON type.
        expected: &'static str,
        /// JSON type actually present.
        found: &'static str,
    },

    /// A string field holds a value outside its closed set of variants.
    #[error("field '{field}' has unrecognised value '{value}'")]
    UnknownVariant {
        /// Dotted path of the offending field.
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The request timestamp does not follow `YYYY-MM-DDTHH:MM:SSZ`.
    #[error("invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The raw timestamp text.
        value: String,
        /// Why the text was rejected.
        message: String,
        /// Parse failure reported by `time`, when it got that far.
        #[source]
        source: Option<time::error::Parse>,
    },
}

impl DecodeError {
    /// Creates a malformed envelope error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedEnvelope {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed envelope error with a custom message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedEnvelope {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn unexpected_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::UnexpectedType {
            field: field.into(),
            expected,
            found,
        }
    }

    /// Creates an unknown variant error.
    #[must_use]
    pub fn unknown_variant(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Errors surfaced by [`SkillRouter`](crate::SkillRouter) registration and
/// dispatch.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The envelope or the request body failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The body's `type` discriminant is not a known request kind.
    #[error("unsupported request type: {request_type}")]
    UnsupportedRequestType {
        /// The raw discriminant value.
        request_type: String,
    },

    /// No intent handler is registered for the requested intent.
    #[error("no intent handler found for {name}")]
    UnregisteredIntent {
        /// Intent name carried by the request.
        name: String,
    },

    /// An intent handler was registered twice under the same name.
    #[error("a handler is already registered to handle the {name} intent")]
    DuplicateIntentHandler {
        /// Intent name that was already taken.
        name: String,
    },

    /// A launch or session-ended request arrived before its handler was set.
    #[error("no handler registered for {request_type}")]
    HandlerNotRegistered {
        /// Request kind that lacked a handler.
        request_type: RequestType,
    },

    /// The response produced by a handler could not be serialised.
    #[error("failed to serialise response: {0}")]
    SerializeResponse(#[source] serde_json::Error),

    /// The invoked handler failed; its error is passed through untouched.
    #[error(transparent)]
    Handler(anyhow::Error),
}

impl RouterError {
    /// Returns a stable snake_case label for this error kind.
    ///
    /// Hosts use the label in structured output and logs; it never changes
    /// with the error's message.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::UnsupportedRequestType { .. } => "unsupported_request_type",
            Self::UnregisteredIntent { .. } => "unregistered_intent",
            Self::DuplicateIntentHandler { .. } => "duplicate_intent_handler",
            Self::HandlerNotRegistered { .. } => "handler_not_registered",
            Self::SerializeResponse(_) => "serialize_response",
            Self::Handler(_) => "handler",
        }
    }

    /// Creates an unsupported request type error.
    #[must_use]
    pub fn unsupported_request_type(request_type: impl Into<String>) -> Self {
        Self::UnsupportedRequestType {
            request_type: request_type.into(),
        }
    }

    /// Creates an unregistered intent error.
    #[must_use]
    pub fn unregistered_intent(name: impl Into<String>) -> Self {
        Self::UnregisteredIntent { name: name.into() }
    }

    /// Creates a duplicate intent handler error.
    #[must_use]
    pub fn duplicate_intent_handler(name: impl Into<String>) -> Self {
        Self::DuplicateIntentHandler { name: name.into() }
    }
}
