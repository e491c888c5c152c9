//! Integration tests for the `speechlet-harness` binary entry point.
//!
//! Drives the demonstration skill over standard input and checks the JSON
//! lines and exit status the binary reports.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

const HELLO: &str = concat!(
    r#"{"version":"1.0","session":{"new":true,"sessionId":"s-1","attributes":{}},"#,
    r#""request":{"type":"IntentRequest","requestId":"req-1","timestamp":"2024-03-15T10:20:30Z","#,
    r#""locale":"en-GB","intent":{"name":"HelloIntent","confirmationStatus":"NONE","#,
    r#""slots":{"name":{"name":"name","value":"Ada"}}}}}"#
);

const UNKNOWN_TYPE: &str = r#"{"version":"1.0","request":{"type":"FooRequest"}}"#;

fn harness() -> Command {
    let mut command = cargo_bin_cmd!("speechlet-harness");
    command
        .env_remove("SPEECHLET_LOG_FORMAT")
        .env_remove("SPEECHLET_MAX_ENVELOPE_BYTES")
        .env("SPEECHLET_LOG_FILTER", "warn");
    command
}

#[test]
fn greets_the_named_user() {
    harness()
        .write_stdin(format!("{HELLO}\n"))
        .assert()
        .success()
        .stdout(contains("Hello, Ada.").and(contains("\"turns\":1")));
}

#[test]
fn unsupported_request_type_fails_in_band() {
    harness()
        .write_stdin(format!("{HELLO}\n{UNKNOWN_TYPE}\n"))
        .assert()
        .code(1)
        .stdout(contains("Hello, Ada.").and(contains("unsupported_request_type")));
}

#[test]
fn invalid_log_format_is_an_infrastructure_failure() {
    harness()
        .args(["--log-format", "xml"])
        .assert()
        .code(2)
        .stderr(contains("xml"));
}

#[test]
fn help_exits_successfully() {
    harness()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--log-filter"));
}
