//! Construction of the `bazel build` invocation for a check.

mod builder;

pub use builder::{BUILD_UI_FLAGS, CheckCommandBuilder};
