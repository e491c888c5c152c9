//! Handler traits and per-invocation host metadata.

use time::OffsetDateTime;

use crate::request::{IntentRequest, LaunchRequest, SessionEndedRequest};
use crate::response::SpeechletResponse;

/// Outcome of a handler invocation.
///
/// Handler failures are opaque to the router and are returned to the host
/// untouched.
pub type HandlerResult = Result<SpeechletResponse, anyhow::Error>;

/// Metadata the host attaches to one invocation.
///
/// The router passes it to handlers as-is and never acts on it; a deadline,
/// for example, is advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    invocation_id: Option<String>,
    deadline: Option<OffsetDateTime>,
}

impl InvocationContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            invocation_id: None,
            deadline: None,
        }
    }

    /// Sets the host's identifier for this invocation.
    #[must_use]
    pub fn with_invocation_id(mut self, invocation_id: impl Into<String>) -> Self {
        self.invocation_id = Some(invocation_id.into());
        self
    }

    /// Sets the instant by which the host expects a response.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: OffsetDateTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the host's identifier for this invocation.
    #[must_use]
    pub fn invocation_id(&self) -> Option<&str> {
        self.invocation_id.as_deref()
    }

    /// Returns the response deadline, if the host set one.
    #[must_use]
    pub const fn deadline(&self) -> Option<OffsetDateTime> {
        self.deadline
    }
}

/// Handles launch requests.
///
/// Implemented for any `Fn(&InvocationContext, &LaunchRequest) -> HandlerResult`.
pub trait LaunchHandler: Send + Sync {
    /// Produces the response to a launch.
    ///
    /// # Errors
    ///
    /// Any error is returned to the host unchanged.
    fn handle(&self, context: &InvocationContext, request: &LaunchRequest) -> HandlerResult;
}

impl<F> LaunchHandler for F
where
    F: Fn(&InvocationContext, &LaunchRequest) -> HandlerResult + Send + Sync,
{
    fn handle(&self, context: &InvocationContext, request: &LaunchRequest) -> HandlerResult {
        self(context, request)
    }
}

/// Handles requests for one named intent.
///
/// Implemented for any `Fn(&InvocationContext, &IntentRequest) -> HandlerResult`.
pub trait IntentHandler: Send + Sync {
    /// Produces the response to an intent.
    ///
    /// # Errors
    ///
    /// Any error is returned to the host unchanged.
    fn handle(&self, context: &InvocationContext, request: &IntentRequest) -> HandlerResult;
}

impl<F> IntentHandler for F
where
    F: Fn(&InvocationContext, &IntentRequest) -> HandlerResult + Send + Sync,
{
    fn handle(&self, context: &InvocationContext, request: &IntentRequest) -> HandlerResult {
        self(context, request)
    }
}

/// Handles session-ended notifications.
///
/// Implemented for any
/// `Fn(&InvocationContext, &SessionEndedRequest) -> HandlerResult`.
pub trait SessionEndedHandler: Send + Sync {
    /// Reacts to the end of a session.
    ///
    /// # Errors
    ///
    /// Any error is returned to the host unchanged.
    fn handle(&self, context: &InvocationContext, request: &SessionEndedRequest)
    -> HandlerResult;
}

impl<F> SessionEndedHandler for F
where
    F: Fn(&InvocationContext, &SessionEndedRequest) -> HandlerResult + Send + Sync,
{
    fn handle(
        &self,
        context: &InvocationContext,
        request: &SessionEndedRequest,
    ) -> HandlerResult {
        self(context, request)
    }
}
