//! Two-level dispatch: by request type, then by intent name.
//!
//! A [`SkillRouter`] is populated once at startup and read-only afterwards.
//! Every invocation decodes a fresh request, calls exactly one handler, and
//! returns that handler's result. The router never retries, rewrites, or logs
//! handler failures.

mod handler;

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::envelope::RequestEnvelope;
use crate::error::RouterError;
use crate::request::{IntentRequest, LaunchRequest, RequestType, SessionEndedRequest, intent_name};
use crate::response::SpeechletResponse;

pub use self::handler::{
    HandlerResult, IntentHandler, InvocationContext, LaunchHandler, SessionEndedHandler,
};

/// Tracing target for routing and registration events.
pub(crate) const ROUTER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::router");

/// Routes decoded requests to registered handlers.
///
/// # Example
///
/// ```
/// use speechlet::{
///     HandlerResult, IntentRequest, InvocationContext, RequestEnvelope, SkillRouter,
///     SpeechletResponse,
/// };
///
/// fn stop(_: &InvocationContext, _: &IntentRequest) -> HandlerResult {
///     let mut response = SpeechletResponse::new();
///     response.tell_plain_text("Goodbye.");
///     Ok(response)
/// }
///
/// let mut router = SkillRouter::new();
/// router
///     .register_intent_handler("AMAZON.StopIntent", stop)
///     .expect("first registration");
///
/// let envelope = RequestEnvelope::parse(br#"{
///     "version": "1.0",
///     "request": {
///         "type": "IntentRequest",
///         "requestId": "req-1",
///         "timestamp": "2024-03-15T10:20:30Z",
///         "locale": "en-GB",
///         "intent": {"name": "AMAZON.StopIntent", "confirmationStatus": "NONE"}
///     }
/// }"#).expect("parse envelope");
///
/// let response = router
///     .handle(&InvocationContext::new(), &envelope)
///     .expect("dispatch");
/// assert!(response.should_end_session());
/// ```
#[derive(Default)]
pub struct SkillRouter {
    launch: Option<Box<dyn LaunchHandler>>,
    session_ended: Option<Box<dyn SessionEndedHandler>>,
    intents: HashMap<String, Box<dyn IntentHandler>>,
}

impl fmt::Debug for SkillRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillRouter")
            .field("launch", &self.launch.is_some())
            .field("session_ended", &self.session_ended.is_some())
            .field("intents", &self.intent_names())
            .finish()
    }
}

impl SkillRouter {
    /// Creates a router with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the launch handler, replacing any previous one.
    pub fn register_launch_handler(&mut self, handler: impl LaunchHandler + 'static) -> &mut Self {
        debug!(target: ROUTER_TARGET, "registered launch handler");
        self.launch = Some(Box::new(handler));
        self
    }

    /// Sets the session-ended handler, replacing any previous one.
    pub fn register_session_ended_handler(
        &mut self,
        handler: impl SessionEndedHandler + 'static,
    ) -> &mut Self {
        debug!(target: ROUTER_TARGET, "registered session-ended handler");
        self.session_ended = Some(Box::new(handler));
        self
    }

    /// Registers the handler for one intent name.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::DuplicateIntentHandler`] if the name is already
    /// taken. The existing handler stays registered.
    pub fn register_intent_handler(
        &mut self,
        name: impl Into<String>,
        handler: impl IntentHandler + 'static,
    ) -> Result<&mut Self, RouterError> {
        let name = name.into();
        if self.intents.contains_key(&name) {
            return Err(RouterError::duplicate_intent_handler(name));
        }
        debug!(target: ROUTER_TARGET, intent = %name, "registered intent handler");
        self.intents.insert(name, Box::new(handler));
        Ok(self)
    }

    /// Returns `true` if a handler is registered for the named intent.
    #[must_use]
    pub fn has_intent_handler(&self, name: &str) -> bool {
        self.intents.contains_key(name)
    }

    /// Returns the registered intent names in sorted order.
    #[must_use]
    pub fn intent_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.intents.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Decodes and dispatches one envelope.
    ///
    /// The body's `type` selects the request kind. Launch and session-ended
    /// requests are decoded and passed to their single handler. Intent
    /// requests are routed by intent name; the handler is looked up before the
    /// rest of the request is decoded.
    ///
    /// # Errors
    ///
    /// - [`RouterError::Decode`] if `type` is absent, or the intent name or
    ///   any field the selected request kind needs fails to decode.
    /// - [`RouterError::UnsupportedRequestType`] for an unknown or non-string
    ///   `type`.
    /// - [`RouterError::UnregisteredIntent`] when no handler claims the intent.
    /// - [`RouterError::HandlerNotRegistered`] when a launch or session-ended
    ///   request arrives before its handler is set.
    /// - [`RouterError::Handler`] carrying the handler's own error.
    pub fn handle(
        &self,
        context: &InvocationContext,
        envelope: &RequestEnvelope,
    ) -> Result<SpeechletResponse, RouterError> {
        let request_type = RequestType::from_body(envelope.body())?;
        debug!(
            target: ROUTER_TARGET,
            request_type = request_type.as_str(),
            invocation_id = context.invocation_id(),
            "routing request"
        );
        match request_type {
            RequestType::Launch => self.dispatch_launch(context, envelope),
            RequestType::Intent => self.dispatch_intent(context, envelope),
            RequestType::SessionEnded => self.dispatch_session_ended(context, envelope),
        }
    }

    /// Parses raw envelope bytes, dispatches them, and serialises the response.
    ///
    /// # Errors
    ///
    /// Everything [`SkillRouter::handle`] returns, plus
    /// [`RouterError::Decode`] for bytes that are not an envelope and
    /// [`RouterError::SerializeResponse`] if the response cannot be encoded.
    pub fn handle_json(
        &self,
        context: &InvocationContext,
        bytes: &[u8],
    ) -> Result<String, RouterError> {
        let envelope = RequestEnvelope::parse(bytes)?;
        self.handle(context, &envelope)?
            .to_json()
            .map_err(RouterError::SerializeResponse)
    }

    fn dispatch_launch(
        &self,
        context: &InvocationContext,
        envelope: &RequestEnvelope,
    ) -> Result<SpeechletResponse, RouterError> {
        let request = LaunchRequest::from_envelope(envelope)?;
        let handler = self
            .launch
            .as_deref()
            .ok_or(RouterError::HandlerNotRegistered {
                request_type: RequestType::Launch,
            })?;
        handler
            .handle(context, &request)
            .map_err(RouterError::Handler)
    }

    fn dispatch_intent(
        &self,
        context: &InvocationContext,
        envelope: &RequestEnvelope,
    ) -> Result<SpeechletResponse, RouterError> {
        let name = intent_name(envelope.body())?;
        let handler = self
            .intents
            .get(name)
            .ok_or_else(|| RouterError::unregistered_intent(name))?;
        debug!(target: ROUTER_TARGET, intent = name, "routing intent");
        let request = IntentRequest::from_envelope(envelope)?;
        handler
            .handle(context, &request)
            .map_err(RouterError::Handler)
    }

    fn dispatch_session_ended(
        &self,
        context: &InvocationContext,
        envelope: &RequestEnvelope,
    ) -> Result<SpeechletResponse, RouterError> {
        let request = SessionEndedRequest::from_envelope(envelope)?;
        let handler =
            self.session_ended
                .as_deref()
                .ok_or(RouterError::HandlerNotRegistered {
                    request_type: RequestType::SessionEnded,
                })?;
        handler
            .handle(context, &request)
            .map_err(RouterError::Handler)
    }
}
