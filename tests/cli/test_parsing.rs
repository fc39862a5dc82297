// Command-line parsing for every subcommand

use clap::Parser;
use repochat::cli::{Cli, Commands, LogFormat, OutputFormat};
use repochat::core::config::DisplayMode;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("repochat").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_issues_with_overrides() {
    let cli = parse(&["issues", "--owner", "tokio-rs", "--repo", "axum", "--display", "navigator", "-k", "5"]);

    match cli.command {
        Commands::Issues(args) => {
            assert_eq!(args.owner.as_deref(), Some("tokio-rs"));
            assert_eq!(args.repo.as_deref(), Some("axum"));
            assert_eq!(args.display, Some(DisplayMode::Navigator));
            assert_eq!(args.num_results, Some(5));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_docs_defaults() {
    let cli = parse(&["docs"]);

    assert!(!cli.verbose);
    assert_eq!(cli.log_format, LogFormat::Text);
    match cli.command {
        Commands::Docs(args) => {
            assert!(args.owner.is_none());
            assert!(args.display.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_code_no_chunk_and_global_flags() {
    let cli = parse(&["code", "--no-chunk", "--verbose", "--log-format", "json"]);

    assert!(cli.verbose);
    assert_eq!(cli.log_format, LogFormat::Json);
    match cli.command {
        Commands::Code(args) => {
            assert!(args.no_chunk);
            assert!(args.app.repo.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_show_config_format() {
    match parse(&["show-config", "--format", "json"]).command {
        Commands::ShowConfig(args) => assert_eq!(args.format, OutputFormat::Json),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_invalid_arguments_rejected() {
    assert!(Cli::try_parse_from(["repochat", "issues", "--display", "fancy"]).is_err());
    assert!(Cli::try_parse_from(["repochat", "docs", "--no-chunk"]).is_err());
    assert!(Cli::try_parse_from(["repochat", "completions", "cmd"]).is_err());
    assert!(Cli::try_parse_from(["repochat"]).is_err());
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
