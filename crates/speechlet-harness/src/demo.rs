//! A small greeting skill used by the harness binary.
//!
//! Launch asks who to greet, `HelloIntent` greets the `name` slot, and
//! `AMAZON.StopIntent` says goodbye. Every spoken response echoes the
//! request's session attributes and bumps a `turns` counter.

use serde_json::Value;
use tracing::debug;

use speechlet::{
    HandlerResult, IntentRequest, InvocationContext, LaunchRequest, RouterError, Session,
    SessionEndedRequest, SkillRouter, SpeechletResponse,
};

const DEMO_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::demo");

/// Intent greeting the user by name.
pub const HELLO_INTENT: &str = "HelloIntent";
/// Built-in intent ending the conversation.
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
/// Slot read by [`HELLO_INTENT`].
pub const NAME_SLOT: &str = "name";
/// Session attribute counting spoken turns.
pub const TURNS_ATTRIBUTE: &str = "turns";

const WELCOME: &str = "Welcome. Who should I greet?";
const WELCOME_REPROMPT: &str = "Who should I greet?";
const FALLBACK_NAME: &str = "there";

/// Builds a router with every demonstration handler registered.
///
/// # Errors
///
/// Returns [`RouterError::DuplicateIntentHandler`] if an intent name is
/// registered twice.
pub fn router() -> Result<SkillRouter, RouterError> {
    let mut router = SkillRouter::new();
    router
        .register_launch_handler(welcome)
        .register_session_ended_handler(session_ended);
    router
        .register_intent_handler(HELLO_INTENT, hello)?
        .register_intent_handler(STOP_INTENT, stop)?;
    Ok(router)
}

fn welcome(_: &InvocationContext, request: &LaunchRequest) -> HandlerResult {
    let mut response = carry_session(request.session());
    response
        .ask_plain_text(WELCOME)
        .reprompt_plain_text(WELCOME_REPROMPT);
    Ok(response)
}

fn hello(_: &InvocationContext, request: &IntentRequest) -> HandlerResult {
    let name = request
        .intent()
        .slot_value(NAME_SLOT)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(FALLBACK_NAME);
    let greeting = format!("Hello, {name}.");

    let mut response = carry_session(request.session());
    response
        .tell_plain_text(greeting.as_str())
        .show_simple_card("Greeting", greeting);
    Ok(response)
}

fn stop(_: &InvocationContext, request: &IntentRequest) -> HandlerResult {
    let mut response = carry_session(request.session());
    response.tell_plain_text("Goodbye.");
    Ok(response)
}

fn session_ended(context: &InvocationContext, request: &SessionEndedRequest) -> HandlerResult {
    debug!(
        target: DEMO_TARGET,
        invocation_id = context.invocation_id(),
        reason = %request.reason(),
        "session ended"
    );
    Ok(SpeechletResponse::new())
}

/// Starts a response carrying the request's attributes and the next turn.
fn carry_session(session: &Session) -> SpeechletResponse {
    let turns = session
        .attributes()
        .get(TURNS_ATTRIBUTE)
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .saturating_add(1);
    let mut response = SpeechletResponse::new();
    response
        .with_session_attributes(session.attributes().clone())
        .set_session_attribute(TURNS_ATTRIBUTE, turns);
    response
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use speechlet::{Card, OutputSpeech, RequestEnvelope};

    use super::*;

    #[fixture]
    fn demo() -> SkillRouter {
        router().expect("demo router")
    }

    fn envelope(attributes: &Value, request: Value) -> RequestEnvelope {
        RequestEnvelope::from_value(json!({
            "version": "1.0",
            "session": {
                "new": false,
                "sessionId": "session-1",
                "attributes": attributes
            },
            "request": request
        }))
        .expect("envelope")
    }

    fn base(kind: &str) -> Value {
        json!({
            "type": kind,
            "requestId": "req-1",
            "timestamp": "2024-03-15T10:20:30Z",
            "locale": "en-GB"
        })
    }

    fn hello_request(slots: &Value) -> Value {
        let mut request = base("IntentRequest");
        if let Some(object) = request.as_object_mut() {
            object.insert(
                "intent".to_owned(),
                json!({"name": HELLO_INTENT, "confirmationStatus": "NONE", "slots": slots}),
            );
        }
        request
    }

    fn dispatch(router: &SkillRouter, envelope: &RequestEnvelope) -> SpeechletResponse {
        router
            .handle(&InvocationContext::new(), envelope)
            .expect("dispatch")
    }

    fn spoken(response: &SpeechletResponse) -> Option<&str> {
        match response.output_speech() {
            Some(OutputSpeech::PlainText { text }) => Some(text.as_str()),
            _ => None,
        }
    }

    #[rstest]
    fn registers_both_intents(demo: SkillRouter) {
        assert_eq!(demo.intent_names(), vec![STOP_INTENT, HELLO_INTENT]);
    }

    #[rstest]
    fn launch_asks_with_reprompt(demo: SkillRouter) {
        let response = dispatch(&demo, &envelope(&json!({}), base("LaunchRequest")));

        assert_eq!(spoken(&response), Some(WELCOME));
        assert!(response.reprompt().is_some());
        assert!(!response.should_end_session());
    }

    #[rstest]
    #[case::named(json!({"name": {"name": "name", "value": "Ada"}}), "Hello, Ada.")]
    #[case::blank(json!({"name": {"name": "name", "value": "  "}}), "Hello, there.")]
    #[case::missing(json!({}), "Hello, there.")]
    fn hello_greets_the_slot(demo: SkillRouter, #[case] slots: Value, #[case] expected: &str) {
        let response = dispatch(&demo, &envelope(&json!({}), hello_request(&slots)));

        assert_eq!(spoken(&response), Some(expected));
        assert!(response.should_end_session());
        assert_eq!(
            response.card(),
            Some(&Card::Simple {
                title: "Greeting".to_owned(),
                content: expected.to_owned(),
            })
        );
    }

    #[rstest]
    fn stop_says_goodbye(demo: SkillRouter) {
        let mut request = base("IntentRequest");
        if let Some(object) = request.as_object_mut() {
            object.insert(
                "intent".to_owned(),
                json!({"name": STOP_INTENT, "confirmationStatus": "NONE"}),
            );
        }
        let response = dispatch(&demo, &envelope(&json!({}), request));

        assert_eq!(spoken(&response), Some("Goodbye."));
        assert!(response.should_end_session());
    }

    #[rstest]
    fn session_ended_returns_empty_response(demo: SkillRouter) {
        let mut request = base("SessionEndedRequest");
        if let Some(object) = request.as_object_mut() {
            object.insert("reason".to_owned(), json!("USER_INITIATED"));
        }
        let response = dispatch(&demo, &envelope(&json!({"turns": 3}), request));

        assert_eq!(response, SpeechletResponse::new());
    }

    #[rstest]
    #[case::first_turn(json!({}), 1)]
    #[case::later_turn(json!({"turns": 4, "colour": "blue"}), 5)]
    #[case::garbled_counter(json!({"turns": "many"}), 1)]
    fn attributes_are_echoed_with_turn_count(
        demo: SkillRouter,
        #[case] attributes: Value,
        #[case] expected_turns: u64,
    ) {
        let response = dispatch(&demo, &envelope(&attributes, base("LaunchRequest")));
        let echoed = response.session_attributes();

        assert_eq!(echoed.get(TURNS_ATTRIBUTE), Some(&json!(expected_turns)));
        if let Some(colour) = attributes.get("colour") {
            assert_eq!(echoed.get("colour"), Some(colour));
        }
    }
}
