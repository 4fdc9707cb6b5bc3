//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Routing strategies never produce these — they are total functions that
/// degrade to a terminal decision on malformed input. Domain errors arise
/// only from input validation before an exchange starts.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("No instructions configured for role {0}")]
    MissingInstructions(String),
}
