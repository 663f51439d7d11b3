use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bazel-check")]
#[command(author, version, about = "Build the Bazel targets owning a file and report compiler diagnostics")]
#[command(long_about = "Finds the Bazel workspace enclosing a file, asks `bazel query` which rule \
    targets depend on it, builds those targets and reports the compiler's diagnostics.\n\n\
    Exit codes:\n  \
    0 - Success (no errors)\n  \
    1 - Errors reported by the build or by verification\n  \
    2 - Configuration, I/O or tool invocation error")]
pub struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    /// Bazel executable (overrides config)
    #[arg(long, global = true, value_name = "EXE")]
    pub bazel: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the targets owning a file and report diagnostics
    Check(CheckArgs),

    /// Print the workspace root enclosing a file
    Root(FileArgs),

    /// Print the rule targets that directly depend on a file
    Targets(FileArgs),

    /// Print the build command a check would run, without running it
    Command(CommandArgs),

    /// Report whether the workspace root and owning targets can be found
    Verify(VerifyArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Configuration file utilities
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct FileArgs {
    /// Source file inside a Bazel workspace
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Source file to check
    pub file: PathBuf,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Show extended explanations for diagnostics that have one
    #[arg(long)]
    pub explain: bool,

    /// Extra build flag, appended after configured ones (repeatable)
    #[arg(long = "build-flag", value_name = "FLAG", allow_hyphen_values = true)]
    pub build_flags: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct CommandArgs {
    /// Source file to check
    pub file: PathBuf,

    /// Extra build flag, appended after configured ones (repeatable)
    #[arg(long = "build-flag", value_name = "FLAG", allow_hyphen_values = true)]
    pub build_flags: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Source file to verify
    pub file: PathBuf,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for the configuration file
    #[arg(short, long, default_value = ".bazel-check.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate configuration file syntax and values (default: .bazel-check.toml)
    Validate,

    /// Display the effective configuration
    Show {
        /// Output format [possible values: text, json]
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
