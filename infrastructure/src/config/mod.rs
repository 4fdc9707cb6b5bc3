//! Configuration file loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    BackendKind, ConfigValidationError, FileAgentsConfig, FileBackendConfig, FileConfig,
    FileLoggingConfig,
};
pub use loader::ConfigLoader;
