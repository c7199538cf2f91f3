#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use clap::CommandFactory;

fn check_args(args: &[&str]) -> CheckArgs {
    let argv: Vec<&str> = ["speclint", "check"].iter().chain(args).copied().collect();
    match Cli::parse_from(argv).command {
        Some(Command::Check(args)) => args,
        _ => panic!("expected check command"),
    }
}

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn parse_bare_invocation() {
    let cli = Cli::parse_from(["speclint"]);
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
}

#[test]
fn parse_check_with_paths() {
    let args = check_args(&["spec/", "features/"]);
    assert_eq!(args.paths, vec![PathBuf::from("spec/"), PathBuf::from("features/")]);
    assert_eq!(args.output, OutputFormat::Text);
}

#[test]
fn parse_output_format() {
    assert_eq!(check_args(&["-o", "json"]).output, OutputFormat::Json);
}

#[test]
fn only_and_skip_repeat() {
    let args = check_args(&["--only", "flat-example", "--only", "unnamed-subject", "--skip", "x"]);
    assert_eq!(args.only, vec!["flat-example", "unnamed-subject"]);
    assert_eq!(args.skip, vec!["x"]);
}

#[test]
fn limit_defaults_and_no_limit() {
    assert_eq!(check_args(&[]).display_limit(), Some(15));
    assert_eq!(check_args(&["--limit", "3"]).display_limit(), Some(3));
    assert_eq!(check_args(&["--no-limit"]).display_limit(), None);
}

#[test]
fn timeout_parses_duration() {
    let args = check_args(&["--timeout", "250ms"]);
    assert_eq!(args.timeout, Some(Duration::from_millis(250)));
}

#[test]
fn invalid_timeout_is_rejected() {
    assert!(Cli::try_parse_from(["speclint", "check", "--timeout", "soon"]).is_err());
}

#[test]
fn color_flags_conflict() {
    assert!(Cli::try_parse_from(["speclint", "check", "--color", "--no-color"]).is_err());
}

#[test]
fn global_config_flag() {
    let cli = Cli::parse_from(["speclint", "rules", "-C", "ci/speclint.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("ci/speclint.toml")));
    assert!(matches!(cli.command, Some(Command::Rules(_))));
}

#[test]
fn parse_init_force() {
    match Cli::parse_from(["speclint", "init", "--force"]).command {
        Some(Command::Init(args)) => assert!(args.force),
        _ => panic!("expected init command"),
    }
}
