use std::path::PathBuf;

use clap::CommandFactory;

use super::*;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_check_defaults() {
    let cli = Cli::parse_from(["bazel-check", "check", "src/lib.rs"]);
    assert_eq!(cli.verbose, 0);
    assert!(!cli.quiet);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.file, PathBuf::from("src/lib.rs"));
            assert_eq!(args.format, OutputFormat::Text);
            assert!(!args.explain);
            assert!(args.build_flags.is_empty());
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_with_options() {
    let cli = Cli::parse_from([
        "bazel-check",
        "check",
        "src/lib.rs",
        "--format",
        "json",
        "--explain",
        "--build-flag",
        "--config=ci",
        "--build-flag=-c",
        "--build-flag",
        "opt",
    ]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.format, OutputFormat::Json);
            assert!(args.explain);
            assert_eq!(args.build_flags, vec!["--config=ci", "-c", "opt"]);
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_global_options_after_subcommand() {
    let cli = Cli::parse_from([
        "bazel-check",
        "root",
        "BUILD",
        "-vv",
        "--color",
        "never",
        "--bazel",
        "/usr/local/bin/bazelisk",
        "--config",
        "ci.toml",
    ]);
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.color, ColorChoice::Never));
    assert_eq!(cli.bazel.as_deref(), Some("/usr/local/bin/bazelisk"));
    assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
    assert!(matches!(cli.command, Commands::Root(ref args) if args.file == PathBuf::from("BUILD")));
}

#[test]
fn cli_config_and_no_config_conflict() {
    let result = Cli::try_parse_from(["bazel-check", "--config", "a.toml", "--no-config", "root", "x"]);
    assert!(result.is_err());
}

#[test]
fn cli_file_argument_is_required() {
    assert!(Cli::try_parse_from(["bazel-check", "targets"]).is_err());
    assert!(Cli::try_parse_from(["bazel-check", "verify"]).is_err());
}

#[test]
fn cli_unknown_format_is_rejected() {
    let result = Cli::try_parse_from(["bazel-check", "verify", "a.rs", "--format", "sarif"]);
    assert!(result.is_err());
}

#[test]
fn cli_init_defaults() {
    let cli = Cli::parse_from(["bazel-check", "init"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.output, PathBuf::from(".bazel-check.toml"));
            assert!(!args.force);
        }
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn cli_config_show_json() {
    let cli = Cli::parse_from(["bazel-check", "config", "show", "--format", "json"]);
    match cli.command {
        Commands::Config(args) => {
            assert!(matches!(args.action, ConfigAction::Show { format: OutputFormat::Json }));
        }
        _ => panic!("Expected Config command"),
    }
}

#[test]
fn color_choice_maps_to_mode() {
    assert_eq!(ColorMode::from(ColorChoice::Always), ColorMode::Always);
    assert_eq!(ColorMode::from(ColorChoice::Auto), ColorMode::Auto);
}
