mod loader;
mod model;
mod validation;

pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, LoadResult};
pub use model::{
    BazelConfig, Config, DEFAULT_DIAGNOSTIC_FORMAT, DEFAULT_EXECUTABLE, DEFAULT_MARKERS,
    DiagnosticsConfig, WorkspaceConfig,
};
pub use validation::validate_config_semantics;
