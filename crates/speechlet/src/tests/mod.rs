//! Shared fixtures for the crate's unit and behaviour tests.


use serde_json::{Value, json};

use crate::envelope::RequestEnvelope;

pub(crate) const TIMESTAMP: &str = "2024-03-15T10:20:30Z";

/// Returns a session carrying one attribute and an access token.
pub(crate) fn session_json() -> Value {
    json!({
        "new": true,
        "sessionId": "amzn1.echo-api.session.0001",
        "application": {"applicationId": "amzn1.ask.skill.demo"},
        "attributes": {"turns": 2, "favourite": "tea"},
        "user": {"userId": "amzn1.ask.account.user", "accessToken": "linked-token"}
    })
}

/// Returns a context with a device and audio player state.
pub(crate) fn context_json() -> Value {
    json!({
        "System": {
            "apiAccessToken": "api-token",
            "apiEndpoint": "https://api.eu.amazonalexa.com",
            "application": {"applicationId": "amzn1.ask.skill.demo"},
            "device": {
                "deviceId": "amzn1.ask.device.1",
                "supportedInterfaces": {"AudioPlayer": {}}
            },
            "user": {"userId": "amzn1.ask.account.user"}
        },
        "AudioPlayer": {
            "token": "track-7",
            "offsetInMilliseconds": 1500,
            "playerActivity": "PLAYING"
        }
    })
}

/// Returns the base body fields with the given discriminant.
pub(crate) fn base_body(request_type: &str) -> Value {
    json!({
        "type": request_type,
        "requestId": "amzn1.echo-api.request.0001",
        "timestamp": TIMESTAMP,
        "locale": "en-GB"
    })
}

/// Returns an intent body with no slots.
pub(crate) fn intent_body(name: &str) -> Value {
    let mut body = base_body("IntentRequest");
    merge(
        &mut body,
        json!({"intent": {"name": name, "confirmationStatus": "NONE"}}),
    );
    body
}

/// Returns a session-ended body with the given reason.
pub(crate) fn session_ended_body(reason: &str) -> Value {
    let mut body = base_body("SessionEndedRequest");
    merge(&mut body, json!({"reason": reason}));
    body
}

/// Copies the top-level members of `extra` into `body`.
pub(crate) fn merge(body: &mut Value, extra: Value) {
    let (Value::Object(target), Value::Object(source)) = (body, extra) else {
        panic!("both values must be objects");
    };
    target.extend(source);
}

/// Wraps a body in an envelope with the sample session and context.
pub(crate) fn envelope(body: Value) -> RequestEnvelope {
    RequestEnvelope::from_value(json!({
        "version": "1.0",
        "session": session_json(),
        "context": context_json(),
        "request": body
    }))
    .expect("sample envelope decodes")
}
