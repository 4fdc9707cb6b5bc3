//! Agent gateway port
//!
//! Defines the interface to the external generation backend that produces
//! each role's response text. The driver performs exactly one gateway call
//! per loop iteration and never retries — retry policy, if any, belongs to
//! the adapter behind this port.

use async_trait::async_trait;
use thiserror::Error;
use triage_domain::{AgentRole, Transaction, Transcript};

/// Errors that can occur during a backend invocation
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Backend returned an empty response")]
    EmptyResponse,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the generation backend
///
/// One call produces one role's contribution: the adapter receives the role
/// to impersonate, the full transcript so far, and the read-only transaction,
/// and returns the role's response text. Implementations (adapters) live in
/// the infrastructure layer.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    async fn invoke(
        &self,
        role: AgentRole,
        transcript: &Transcript,
        transaction: &Transaction,
    ) -> Result<String, GatewayError>;
}
