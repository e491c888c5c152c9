//! The base request shape shared by every variant.

use time::OffsetDateTime;

use crate::decode::FieldReader;
use crate::envelope::{Context, RequestEnvelope, Session};
use crate::error::DecodeError;

/// A launch request: the user opened the skill without asking for anything.
///
/// Every other variant carries these fields too.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRequest {
    request_id: String,
    timestamp: OffsetDateTime,
    locale: String,
    session: Session,
    context: Context,
}

impl LaunchRequest {
    /// Builds a launch request from an envelope.
    ///
    /// Reads `requestId`, `timestamp`, and `locale` from the body and copies
    /// the session and context verbatim.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when any of the three body fields is missing
    /// or not a string, or when the timestamp is not in the
    /// `YYYY-MM-DDTHH:MM:SSZ` layout.
    pub fn from_envelope(envelope: &RequestEnvelope) -> Result<Self, DecodeError> {
        let body = FieldReader::new(envelope.body());
        let request_id = body.required_str("requestId")?;
        let timestamp = body.timestamp("timestamp")?;
        let locale = body.required_str("locale")?;
        Ok(Self {
            request_id: request_id.to_owned(),
            timestamp,
            locale: locale.to_owned(),
            session: envelope.session().clone(),
            context: envelope.context().clone(),
        })
    }

    /// Returns the platform-assigned request identifier.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns when the request was issued, in UTC.
    #[must_use]
    pub const fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Returns the user's locale, for example `en-GB`.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
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
}
