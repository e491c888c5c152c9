//! Request routing for voice-assistant skills.
//!
//! The `speechlet` crate sits between a hosting runtime and a skill's
//! handlers. The host hands it one inbound [`RequestEnvelope`]; the crate
//! reads the body's `type` discriminant, decodes the matching typed request,
//! calls the one handler registered for it, and returns the handler's
//! [`SpeechletResponse`] or a [`RouterError`].
//!
//! # Request kinds
//!
//! - [`LaunchRequest`]: the user opened the skill.
//! - [`IntentRequest`]: the user invoked a named intent. Routed by intent
//!   name to the matching [`IntentHandler`].
//! - [`SessionEndedRequest`]: the platform closed the session.
//!
//! The richer variants dereference to [`LaunchRequest`], so every handler
//! reads the shared fields the same way.
//!
//! # Decoding
//!
//! The request body is decoded one field at a time. Fields a variant does not
//! read are ignored; a required field that is missing or mistyped fails the
//! invocation with a [`DecodeError`] naming the field. Timestamps must use the
//! exact layout `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! # Concurrency
//!
//! Register handlers once at startup. A populated [`SkillRouter`] is `Sync`
//! and can serve any number of concurrent invocations through a shared
//! reference; no request state is kept between calls.
//!
//! # Example
//!
//! ```
//! use speechlet::{
//!     HandlerResult, InvocationContext, LaunchRequest, SkillRouter, SpeechletResponse,
//! };
//!
//! fn welcome(_: &InvocationContext, _: &LaunchRequest) -> HandlerResult {
//!     let mut response = SpeechletResponse::new();
//!     response
//!         .ask_plain_text("Welcome. What would you like?")
//!         .reprompt_plain_text("What would you like?");
//!     Ok(response)
//! }
//!
//! let mut router = SkillRouter::new();
//! router.register_launch_handler(welcome);
//!
//! let output = router
//!     .handle_json(
//!         &InvocationContext::new(),
//!         br#"{"version":"1.0","request":{
//!             "type":"LaunchRequest","requestId":"req-1",
//!             "timestamp":"2024-03-15T10:20:30Z","locale":"en-GB"}}"#,
//!     )
//!     .expect("dispatch launch");
//! assert!(output.contains("\"shouldEndSession\":false"));
//! ```

mod decode;
pub mod envelope;
pub mod error;
pub mod request;
pub mod response;
pub mod router;

#[cfg(test)]
mod tests;

pub use self::envelope::{
    Application, AudioPlayerState, Context, Device, PlayerActivity, RequestEnvelope, Session,
    SessionAttributes, SystemState, User,
};
pub use self::error::{DecodeError, RouterError};
pub use self::request::{
    ConfirmationStatus, DialogState, Intent, IntentRequest, LaunchRequest, RequestType,
    SessionEndedReason, SessionEndedRequest, SessionError, SessionErrorType, Slot,
};
pub use self::response::{
    Card, CardImage, OutputSpeech, RESPONSE_VERSION, Reprompt, ResponseBody, SpeechletResponse,
};
pub use self::router::{
    HandlerResult, IntentHandler, InvocationContext, LaunchHandler, SessionEndedHandler,
    SkillRouter,
};
