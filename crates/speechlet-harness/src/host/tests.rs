//! Unit tests for the line host.

use std::io::Cursor;

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use speechlet::{HandlerResult, IntentRequest, InvocationContext, LaunchRequest, SpeechletResponse};

use super::*;

fn launch(context: &InvocationContext, _: &LaunchRequest) -> HandlerResult {
    let mut response = SpeechletResponse::new();
    response.ask_plain_text(format!(
        "invocation {}",
        context.invocation_id().unwrap_or("none")
    ));
    Ok(response)
}

fn failing(_: &InvocationContext, _: &IntentRequest) -> HandlerResult {
    Err(anyhow::anyhow!("backend unavailable"))
}

#[fixture]
fn router() -> SkillRouter {
    let mut router = SkillRouter::new();
    router.register_launch_handler(launch);
    router
        .register_intent_handler("BrokenIntent", failing)
        .expect("register intent");
    router
}

fn body(request: &Value) -> String {
    json!({ "version": "1.0", "request": request }).to_string()
}

fn launch_line() -> String {
    body(&json!({
        "type": "LaunchRequest",
        "requestId": "req-1",
        "timestamp": "2024-03-15T10:20:30Z",
        "locale": "en-GB"
    }))
}

fn intent_line(name: &str) -> String {
    body(&json!({
        "type": "IntentRequest",
        "requestId": "req-2",
        "timestamp": "2024-03-15T10:20:30Z",
        "locale": "en-GB",
        "intent": { "name": name, "confirmationStatus": "NONE" }
    }))
}

fn run_host(router: &SkillRouter, limit: usize, input: &str) -> (HostSummary, Vec<Value>) {
    let mut output = Vec::new();
    let summary = LineHost::new(router, limit)
        .run(Cursor::new(input.as_bytes()), &mut output)
        .expect("host run");
    let text = String::from_utf8(output).expect("utf8 output");
    let lines = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    (summary, lines)
}

fn error_kind(line: &Value) -> Option<&str> {
    line.pointer("/error/kind").and_then(Value::as_str)
}

#[rstest]
fn writes_one_response_per_envelope(router: SkillRouter) {
    let input = format!("{}\n{}\n", launch_line(), launch_line());
    let (summary, lines) = run_host(&router, 1024 * 1024, &input);

    assert_eq!(summary, HostSummary { handled: 2, failed: 0 });
    assert!(summary.all_succeeded());
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines.first().and_then(|line| line.pointer("/response/outputSpeech/text")),
        Some(&json!("invocation 1"))
    );
    assert_eq!(
        lines.get(1).and_then(|line| line.pointer("/response/outputSpeech/text")),
        Some(&json!("invocation 2"))
    );
}

#[rstest]
fn blank_lines_are_skipped(router: SkillRouter) {
    let input = format!("\n   \n{}\n\n", launch_line());
    let (summary, lines) = run_host(&router, 1024 * 1024, &input);

    assert_eq!(summary.handled, 1);
    assert_eq!(lines.len(), 1);
}

#[rstest]
fn final_line_without_newline_is_processed(router: SkillRouter) {
    let (summary, lines) = run_host(&router, 1024 * 1024, &launch_line());

    assert_eq!(summary.handled, 1);
    assert_eq!(lines.len(), 1);
}

#[rstest]
#[case::not_json("{oops", "decode")]
#[case::unknown_type(&body(&json!({"type": "FooRequest"})), "unsupported_request_type")]
#[case::unknown_intent(&intent_line("MissingIntent"), "unregistered_intent")]
#[case::handler_failure(&intent_line("BrokenIntent"), "handler")]
#[case::no_session_ended_handler(
    &body(&json!({
        "type": "SessionEndedRequest",
        "requestId": "req-3",
        "timestamp": "2024-03-15T10:20:30Z",
        "locale": "en-GB",
        "reason": "USER_INITIATED"
    })),
    "handler_not_registered"
)]
fn failures_become_error_lines(router: SkillRouter, #[case] line: &str, #[case] kind: &str) {
    let (summary, lines) = run_host(&router, 1024 * 1024, line);

    assert_eq!(summary, HostSummary { handled: 0, failed: 1 });
    assert!(!summary.all_succeeded());
    assert_eq!(lines.first().and_then(error_kind), Some(kind));
}

#[rstest]
fn handler_messages_pass_through(router: SkillRouter) {
    let (_, lines) = run_host(&router, 1024 * 1024, &intent_line("BrokenIntent"));

    assert_eq!(
        lines.first().and_then(|line| line.pointer("/error/message")),
        Some(&json!("backend unavailable"))
    );
}

#[rstest]
fn oversized_lines_are_rejected_and_skipped(router: SkillRouter) {
    let small = launch_line();
    let limit = small.len();
    let large = format!("{}{}", small, " ".repeat(16));
    let input = format!("{large}\n{small}\n");
    let (summary, lines) = run_host(&router, limit, &input);

    assert_eq!(summary, HostSummary { handled: 1, failed: 1 });
    assert_eq!(lines.first().and_then(error_kind), Some(ENVELOPE_TOO_LARGE));
    assert_eq!(
        lines.get(1).and_then(|line| line.pointer("/response/outputSpeech/text")),
        Some(&json!("invocation 2"))
    );
}

#[rstest]
fn line_at_the_limit_is_accepted(router: SkillRouter) {
    let line = launch_line();
    let (summary, _) = run_host(&router, line.len(), &format!("{line}\n"));

    assert_eq!(summary.handled, 1);
}

#[rstest]
fn mixed_input_keeps_going_after_failures(router: SkillRouter) {
    let input = format!(
        "{}\n{}\n{}\n",
        intent_line("MissingIntent"),
        launch_line(),
        intent_line("BrokenIntent")
    );
    let (summary, lines) = run_host(&router, 1024 * 1024, &input);

    assert_eq!(summary, HostSummary { handled: 1, failed: 2 });
    assert_eq!(lines.len(), 3);
}
