pub mod checker;
pub mod cli;
pub mod command;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filesystem;
pub mod output;
pub mod process;
pub mod targets;
pub mod verify;
pub mod workspace;

pub use error::{BazelCheckError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CHECK_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
