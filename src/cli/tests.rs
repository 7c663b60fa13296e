//! Tests for argument parsing and configuration building.

use super::{Cli, OutputFormat};
use clap::Parser;

#[test]
fn test_cli_parsing() {
    // --help exits through the error path
    assert!(Cli::try_parse_from(["plate", "--help"]).is_err());
    assert!(Cli::try_parse_from(["plate", "list"]).is_ok());
    assert!(Cli::try_parse_from(["plate", "resolve"]).is_ok());
    assert!(Cli::try_parse_from(["plate"]).is_err());
}

#[test]
fn test_cli_verbose_flag() {
    let cli = Cli::try_parse_from(["plate", "--verbose", "list"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.build_config().log_level, Some("debug".to_string()));
}

#[test]
fn test_cli_quiet_flag() {
    let cli = Cli::try_parse_from(["plate", "list", "-q"]).unwrap();
    assert!(cli.quiet);
    assert_eq!(cli.build_config().log_level, None);
}

#[test]
fn test_cli_default_log_level() {
    let cli = Cli::try_parse_from(["plate", "list"]).unwrap();
    assert_eq!(cli.build_config().log_level, Some("info".to_string()));
}

#[test]
fn test_cli_verbose_conflicts_with_quiet() {
    assert!(Cli::try_parse_from(["plate", "-v", "-q", "list"]).is_err());
}

#[test]
fn test_resolve_arguments() {
    let cli = Cli::try_parse_from([
        "plate",
        "resolve",
        "--template-folder",
        "templates/app",
        "--var",
        "name=demo",
        "--var",
        "port=8080",
        "--var-file",
        "a.yml",
        "--var-file",
        "b.yml",
        "--non-interactive",
        "--format",
        "json",
    ])
    .unwrap();

    match cli.command {
        super::Commands::Resolve(cmd) => {
            let debug = format!("{cmd:?}");
            assert!(debug.contains("templates/app"));
            assert!(debug.contains("name=demo"));
            assert!(debug.contains("port=8080"));
            assert!(debug.contains("b.yml"));
            assert!(debug.contains("non_interactive: true"));
            assert!(debug.contains(&format!("{:?}", OutputFormat::Json)));
        }
        super::Commands::List(_) => panic!("expected resolve"),
    }
}

#[test]
fn test_resolve_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["plate", "resolve", "--format", "toml"]).is_err());
}
