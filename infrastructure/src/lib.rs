//! Infrastructure layer for fraud-triage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    BackendKind, ConfigLoader, ConfigValidationError, FileAgentsConfig, FileBackendConfig,
    FileConfig, FileLoggingConfig,
};
pub use logging::JsonlTranscriptLogger;
pub use providers::{
    azure::{AzureAgentGateway, AzureConfigError},
    scripted::ScriptedAgentGateway,
    InstructionSet,
};
