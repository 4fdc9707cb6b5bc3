//! Application layer for fraud-triage
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    agent_gateway::{AgentGateway, GatewayError},
    progress::{ExchangeProgressNotifier, NoExchangeProgress},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::run_batch::RunBatchUseCase;
pub use use_cases::run_exchange::{
    RunExchangeError, RunExchangeInput, RunExchangeOutput, RunExchangeUseCase,
};
