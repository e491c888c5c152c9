//! Unit tests for the harness entry point.

use std::io::Cursor;

use rstest::rstest;

use super::*;

const LAUNCH: &str = concat!(
    r#"{"version":"1.0","request":{"type":"LaunchRequest","requestId":"req-1","#,
    r#""timestamp":"2024-03-15T10:20:30Z","locale":"en-GB"}}"#
);

struct Outcome {
    status: HarnessStatus,
    stdout: String,
    stderr: String,
}

fn execute_with(args: &[&str], input: &str) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once("speechlet-harness").chain(args.iter().copied());
    let status = execute(
        argv,
        Cursor::new(input.as_bytes()),
        &mut stdout,
        &mut stderr,
    );
    Outcome {
        status,
        stdout: String::from_utf8(stdout).expect("utf8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf8 stderr"),
    }
}

#[rstest]
#[case(HarnessStatus::Success, 0)]
#[case(HarnessStatus::InvocationFailures, 1)]
#[case(HarnessStatus::Infrastructure, 2)]
fn status_codes_are_stable(#[case] status: HarnessStatus, #[case] code: u8) {
    assert_eq!(status.code(), code);
}

#[test]
fn successful_envelopes_exit_cleanly() {
    let outcome = execute_with(&[], &format!("{LAUNCH}\n"));

    assert_eq!(outcome.status, HarnessStatus::Success);
    assert!(outcome.stdout.contains("Welcome. Who should I greet?"));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn empty_input_succeeds() {
    let outcome = execute_with(&[], "");

    assert_eq!(outcome.status, HarnessStatus::Success);
    assert!(outcome.stdout.is_empty());
}

#[test]
fn failed_envelopes_are_reported_in_band() {
    let outcome = execute_with(&[], &format!("{LAUNCH}\nnot json\n"));

    assert_eq!(outcome.status, HarnessStatus::InvocationFailures);
    assert_eq!(outcome.stdout.lines().count(), 2);
    assert!(outcome.stdout.contains("\"kind\":\"decode\""));
}

#[test]
fn envelope_limit_flag_is_honoured() {
    let outcome = execute_with(&["--max-envelope-bytes", "16"], &format!("{LAUNCH}\n"));

    assert_eq!(outcome.status, HarnessStatus::InvocationFailures);
    assert!(outcome.stdout.contains(ENVELOPE_TOO_LARGE));
}

#[test]
fn help_goes_to_stdout() {
    let outcome = execute_with(&["--help"], "");

    assert_eq!(outcome.status, HarnessStatus::Success);
    assert!(outcome.stdout.contains("--max-envelope-bytes"));
    assert!(outcome.stderr.is_empty());
}

#[rstest]
#[case::unknown_flag(&["--bogus"])]
#[case::zero_limit(&["--max-envelope-bytes", "0"])]
#[case::bad_format(&["--log-format", "xml"])]
fn bad_arguments_are_infrastructure_failures(#[case] args: &[&str]) {
    let outcome = execute_with(args, "");

    assert_eq!(outcome.status, HarnessStatus::Infrastructure);
    assert!(outcome.stderr.starts_with("speechlet-harness:"));
    assert!(outcome.stdout.is_empty());
}
