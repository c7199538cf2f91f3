//! Output format specs: text layout, suggestions, limits, color, and JSON.

use crate::prelude::*;

fn two_flat_examples() -> Project {
    let project = Project::with_defaults();
    project.file(
        "spec/book_spec.rb",
        r#"describe Book do
  it 'raises an error when already reserved' do
    expect { book.reserve }.to raise_error(AlreadyReserved)
  end

  it 'returns nil if missing' do
    expect(book.author).to be_nil
  end
end
"#,
    );
    project
}

#[test]
fn text_output_one_line_per_finding() {
    let project = two_flat_examples();
    check().pwd(project.path()).passes().stdout_eq(
        "spec/book_spec.rb:2: [flat-example] example title hides the condition `when already reserved`; move it into a context
spec/book_spec.rb:6: [flat-example] example title hides the condition `if missing`; move it into a context
2 findings in 1 file checked (2 warnings)
",
    );
}

#[test]
fn suggest_prints_rewrites() {
    let project = two_flat_examples();
    check()
        .pwd(project.path())
        .args(&["--suggest"])
        .passes()
        .stdout_has("    context 'when already reserved' do\n      it 'raises an error' do\n")
        .stdout_has("    context 'if missing' do\n      it 'returns nil' do\n");
}

#[test]
fn limit_truncates_text_output() {
    let project = two_flat_examples();
    check()
        .pwd(project.path())
        .args(&["--limit", "1"])
        .passes()
        .stdout_has("spec/book_spec.rb:2:")
        .stdout_lacks("spec/book_spec.rb:6:")
        .stdout_has("Stopped after 1 findings. Use --no-limit to see all.");
}

#[test]
fn no_limit_shows_everything() {
    let project = two_flat_examples();
    check()
        .pwd(project.path())
        .args(&["--limit", "1", "--no-limit"])
        .passes()
        .stdout_has("spec/book_spec.rb:6:")
        .stdout_lacks("Stopped after");
}

#[test]
fn json_output_shape() {
    let project = two_flat_examples();
    let json = check().pwd(project.path()).json().passes().json();

    assert_eq!(json["passed"], true);
    assert_eq!(json["files"], 1);
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    let finding = &json["findings"][0];
    assert_eq!(finding["file"], "spec/book_spec.rb");
    assert_eq!(finding["line"], 2);
    assert_eq!(finding["rule"], "flat-example");
    assert_eq!(finding["severity"], "warning");
    assert_eq!(
        finding["suggestion"],
        "context 'when already reserved' do\n  it 'raises an error' do"
    );
}

#[test]
fn json_output_is_never_truncated() {
    let project = two_flat_examples();
    let run = check().pwd(project.path()).args(&["--limit", "1"]).json().passes();
    assert_eq!(run.rules().len(), 2);
}

#[test]
fn color_flag_forces_ansi() {
    let project = two_flat_examples();
    speclint_cmd()
        .args(["check", "--color"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("\x1b["));
}

#[test]
fn no_color_env_disables_ansi() {
    let project = two_flat_examples();
    speclint_cmd()
        .arg("check")
        .env("NO_COLOR", "1")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("\x1b[").not());
}

#[test]
fn color_env_forces_ansi() {
    let project = two_flat_examples();
    speclint_cmd()
        .arg("check")
        .env("COLOR", "1")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("\x1b["));
}
