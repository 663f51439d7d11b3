use clap::Parser;
use tracing_subscriber::EnvFilter;

use bazel_check::cli::{Cli, Commands};
use bazel_check::commands::{
    run_check, run_command, run_config, run_init, run_root, run_targets, run_verify,
};

/// Log level selected by `-v` repetitions; `RUST_LOG` wins when set.
const fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_level(verbose).into()),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Root(args) => run_root(args, &cli),
        Commands::Targets(args) => run_targets(args, &cli),
        Commands::Command(args) => run_command(args, &cli),
        Commands::Verify(args) => run_verify(args, &cli),
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}
