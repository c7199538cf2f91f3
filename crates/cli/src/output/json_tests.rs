#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use super::*;
use crate::finding::{SYNTAX_ERROR_ID, Severity};

fn render(output: &LintOutput) -> serde_json::Value {
    let mut buf = Vec::new();
    JsonFormatter::new(&mut buf).write(output).unwrap();
    serde_json::from_slice(&buf).unwrap()
}

#[test]
fn serializes_findings_and_pass_flag() {
    let output = create_output(
        2,
        vec![
            Finding::new("flat-example", 4, "hoist the condition")
                .in_file(Path::new("spec/a_spec.rb"))
                .with_suggestion("context 'when x' do"),
        ],
    );
    let json = render(&output);

    assert_eq!(json["passed"], true);
    assert_eq!(json["files"], 2);
    let finding = &json["findings"][0];
    assert_eq!(finding["file"], "spec/a_spec.rb");
    assert_eq!(finding["line"], 4);
    assert_eq!(finding["rule"], "flat-example");
    assert_eq!(finding["severity"], "warning");
    assert_eq!(finding["suggestion"], "context 'when x' do");
}

#[test]
fn error_findings_fail_the_run() {
    let output = create_output(
        1,
        vec![Finding::file_failure("a_spec.rb", SYNTAX_ERROR_ID, 3, "unexpected `end`")],
    );
    let json = render(&output);

    assert_eq!(json["passed"], false);
    assert_eq!(json["findings"][0]["severity"], "error");
    assert!(json["findings"][0].get("suggestion").is_none());
}

#[test]
fn timestamp_is_rfc3339_utc() {
    let output = create_output(0, Vec::new());
    assert!(output.timestamp.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&output.timestamp).is_ok());
    assert_eq!(output.count(Severity::Error), 0);
}
