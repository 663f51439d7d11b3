//! Subcommand implementations. Each `run_*` returns the process exit code;
//! the `*_impl` functions carry the logic and are generic over the runner
//! and filesystem so they can be tested without Bazel.

pub mod check;
pub mod config;
pub mod context;
pub mod init;
pub mod inspect;
pub mod verify;

pub use check::{CheckOptions, run_check, run_check_impl};
pub use config::{format_config, run_config, run_config_validate_impl};
pub use context::CommandContext;
pub use init::{generate_config_template, run_init, run_init_impl};
pub use inspect::{
    run_command, run_command_impl, run_root, run_root_impl, run_targets, run_targets_impl,
};
pub use verify::{run_verify, run_verify_impl};
