//! Configuration specs: discovery, validation, and per-rule settings.

use crate::prelude::*;

const FLAT: &str =
    "describe Book do\n  it 'fails when empty' do\n    expect(book).to be_invalid\n  end\nend\n";

#[test]
fn runs_with_defaults_without_config() {
    let project = Project::empty();
    project.file("spec/book_spec.rb", FLAT);

    let run = check().pwd(project.path()).json().passes();
    assert_eq!(run.rules(), vec!["flat-example"]);
}

#[test]
fn config_discovered_from_subdirectory() {
    let project = Project::empty();
    project.config("[rules.flat-example]\nenabled = false\n");
    project.file("spec/book_spec.rb", FLAT);

    check()
        .pwd(project.path().join("spec"))
        .passes()
        .stdout_eq("1 file checked, no findings\n");
}

#[test]
fn disabled_rule_yields_no_findings() {
    let project = Project::empty();
    project.config("[rules.flat-example]\nenabled = false\n");
    project.file("spec/book_spec.rb", FLAT);

    check().pwd(project.path()).passes().stdout_lacks("flat-example");
}

#[test]
fn severity_override_fails_the_run() {
    let project = Project::empty();
    project.config("[rules.flat-example]\nseverity = \"error\"\n");
    project.file("spec/book_spec.rb", FLAT);

    let run = check().pwd(project.path()).json().fails();
    assert_eq!(run.json()["findings"][0]["severity"], "error");
}

#[test]
fn custom_connectives() {
    let project = Project::empty();
    project.config("[rules.flat-example]\nconnectives = [\"after\"]\n");
    project.file(
        "spec/book_spec.rb",
        "describe Book do\n  it 'fails when empty' do\n  end\n\n  it 'is hidden after archiving' do\n  end\nend\n",
    );

    check()
        .pwd(project.path())
        .passes()
        .stdout_has("spec/book_spec.rb:5: [flat-example]")
        .stdout_lacks("spec/book_spec.rb:2:");
}

#[test]
fn exclude_patterns_skip_files() {
    let project = Project::empty();
    project.config("[project]\nexclude = [\"spec/legacy/**\"]\n");
    project.file("spec/legacy/book_spec.rb", FLAT);
    project.file("spec/book_spec.rb", "describe Book do\nend\n");

    check()
        .pwd(project.path())
        .passes()
        .stdout_eq("1 file checked, no findings\n");
}

#[test]
fn config_flag_selects_file() {
    let project = Project::empty();
    project.file("ci/strict.toml", "version = 1\n[rules.flat-example]\nseverity = \"error\"\n");
    project.file("spec/book_spec.rb", FLAT);

    check()
        .pwd(project.path())
        .args(&["-C", "ci/strict.toml"])
        .fails();
}

#[test]
fn config_env_var_selects_file() {
    let project = Project::empty();
    project.file("ci/strict.toml", "version = 1\n[rules.flat-example]\nseverity = \"error\"\n");
    project.file("spec/book_spec.rb", FLAT);

    check()
        .pwd(project.path())
        .env("SPECLINT_CONFIG", "ci/strict.toml")
        .fails();
}

#[test]
fn missing_config_flag_file_is_config_error() {
    let project = Project::empty();
    check()
        .pwd(project.path())
        .args(&["-C", "nope.toml"])
        .exits(exit::CONFIG_ERROR)
        .stderr_has("config file not found");
}

#[test]
fn unknown_rule_id_is_config_error() {
    let project = Project::empty();
    project.config("[rules.unamed-subject]\nenabled = false\n");

    check()
        .pwd(project.path())
        .exits(exit::CONFIG_ERROR)
        .stderr_has("unknown rule `unamed-subject`. Did you mean `unnamed-subject`?");
}

#[test]
fn unsupported_version_is_config_error() {
    let project = Project::empty();
    project.config("version = 2\n");

    check()
        .pwd(project.path())
        .exits(exit::CONFIG_ERROR)
        .stderr_has("unsupported config version 2");
}

#[test]
fn invalid_severity_is_config_error() {
    let project = Project::empty();
    project.config("[rules.context-mutation]\nseverity = \"fatal\"\n");

    check()
        .pwd(project.path())
        .exits(exit::CONFIG_ERROR)
        .stderr_has("invalid severity `fatal`");
}

#[test]
fn invalid_timeout_is_config_error() {
    let project = Project::empty();
    project.config("[check]\ntimeout = \"forever\"\n");

    check()
        .pwd(project.path())
        .exits(exit::CONFIG_ERROR)
        .stderr_has("check.timeout");
}

#[test]
fn unknown_keys_warn_but_run() {
    let project = Project::empty();
    project.config("[project]\nfiles = [\"x\"]\n");
    project.file("spec/book_spec.rb", "describe Book do\nend\n");

    check()
        .pwd(project.path())
        .passes()
        .stderr_has("unrecognized field `project.files` (ignored)");
}
