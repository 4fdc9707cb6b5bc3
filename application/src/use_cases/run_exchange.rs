//! Run Exchange use case — the conversation driver.
//!
//! Drives one transaction through the triage pipeline: each iteration
//! consults the termination strategy, asks the selection strategy for the
//! next role, invokes that role through the [`AgentGateway`], and appends
//! the response to the transcript. The gateway call is the sole suspension
//! point — no two invocations for the same transaction are ever in flight
//! at once.

use crate::config::BehaviorConfig;
use crate::ports::agent_gateway::{AgentGateway, GatewayError};
use crate::ports::progress::ExchangeProgressNotifier;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use triage_domain::{
    AgentInstructions, AgentRole, DomainError, FraudRisk, RelaySelection, ReportTermination,
    SelectionStrategy, TerminationStrategy, Transaction, Transcript, Turn,
};

/// Errors that can abort an exchange.
///
/// Aborts carry the transcript as it stood at the failure, truncated at the
/// last fully appended turn — partial turns are never recorded.
#[derive(Error, Debug)]
pub enum RunExchangeError {
    /// The transaction failed validation before the loop started.
    #[error("Exchange rejected: {0}")]
    Rejected(#[from] DomainError),

    /// The generation backend failed while a role was being invoked.
    #[error("Backend call for {role} failed: {source}")]
    Aborted {
        role: AgentRole,
        source: GatewayError,
        transcript: Transcript,
    },

    /// The caller cancelled the exchange.
    #[error("Exchange cancelled")]
    Cancelled { transcript: Transcript },
}

impl RunExchangeError {
    /// The transcript recorded up to the failure, when one exists.
    pub fn transcript_so_far(&self) -> Option<&Transcript> {
        match self {
            RunExchangeError::Rejected(_) => None,
            RunExchangeError::Aborted { transcript, .. } => Some(transcript),
            RunExchangeError::Cancelled { transcript } => Some(transcript),
        }
    }
}

/// Input for the [`RunExchangeUseCase`].
#[derive(Debug, Clone)]
pub struct RunExchangeInput {
    pub transaction: Transaction,
    /// Execution parameters — `timeout` bounds each backend call.
    pub behavior: BehaviorConfig,
}

impl RunExchangeInput {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction,
            behavior: BehaviorConfig::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }
}

/// Result of a completed exchange.
#[derive(Debug, Clone)]
pub struct RunExchangeOutput {
    /// The full ordered turn sequence, for audit and printing.
    pub transcript: Transcript,
    /// Risk assessment derived from the finished transcript.
    pub risk: FraudRisk,
}

/// Use case for running one triage exchange.
///
/// Flow:
/// 1. Validate the transaction (configuration problems surface here, never
///    mid-loop)
/// 2. Append the initiator turn carrying the serialized transaction
/// 3. Loop: terminate? → select next role → invoke backend → append turn
/// 4. Derive the [`FraudRisk`] from the finished transcript
pub struct RunExchangeUseCase {
    gateway: Arc<dyn AgentGateway>,
    selection: Arc<dyn SelectionStrategy>,
    termination: Arc<dyn TerminationStrategy>,
    transcript_logger: Arc<dyn TranscriptLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl Clone for RunExchangeUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            selection: self.selection.clone(),
            termination: self.termination.clone(),
            transcript_logger: self.transcript_logger.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

impl RunExchangeUseCase {
    pub fn new(gateway: Arc<dyn AgentGateway>) -> Self {
        Self {
            gateway,
            selection: Arc::new(RelaySelection),
            termination: Arc::new(ReportTermination),
            transcript_logger: Arc::new(NoTranscriptLogger),
            cancellation_token: None,
        }
    }

    /// Replace the routing strategies.
    pub fn with_strategies(
        mut self,
        selection: Arc<dyn SelectionStrategy>,
        termination: Arc<dyn TerminationStrategy>,
    ) -> Self {
        self.selection = selection;
        self.termination = termination;
        self
    }

    /// Set a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript_logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the exchange with progress callbacks.
    pub async fn execute(
        &self,
        input: RunExchangeInput,
        progress: &dyn ExchangeProgressNotifier,
    ) -> Result<RunExchangeOutput, RunExchangeError> {
        let transaction = &input.transaction;
        transaction.validate()?;

        info!("Starting exchange for transaction {}", transaction.transaction_id);
        progress.on_exchange_start(transaction);
        self.transcript_logger.log(TranscriptEvent::new(
            "exchange_started",
            serde_json::json!({ "transaction": transaction }),
        ));

        let mut transcript = Transcript::new();
        let opening = Turn::initiator(AgentInstructions::initial_request(transaction));
        self.record_turn(&opening, transaction, progress);
        transcript.append(opening);

        loop {
            if self.termination.should_terminate(&transcript, transaction) {
                debug!(
                    "Exchange for {} terminated after {} turns",
                    transaction.transaction_id,
                    transcript.len()
                );
                break;
            }

            let Some(role) = self
                .selection
                .select_next(&transcript, transaction)
                .next_role()
            else {
                // No progress possible — distinct from explicit termination,
                // this covers malformed transcript states.
                debug!(
                    "No next role for {} after {} turns; stopping",
                    transaction.transaction_id,
                    transcript.len()
                );
                break;
            };

            if let Some(token) = &self.cancellation_token
                && token.is_cancelled()
            {
                info!("Exchange for {} cancelled", transaction.transaction_id);
                return Err(RunExchangeError::Cancelled { transcript });
            }

            progress.on_turn_start(role);
            debug!("Invoking {} for {}", role, transaction.transaction_id);

            let outcome = match &self.cancellation_token {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => None,
                    result = self.call_backend(role, &transcript, transaction, &input.behavior) => {
                        Some(result)
                    }
                },
                None => Some(
                    self.call_backend(role, &transcript, transaction, &input.behavior)
                        .await,
                ),
            };

            let Some(result) = outcome else {
                info!(
                    "Exchange for {} cancelled mid-call; transcript kept at {} turns",
                    transaction.transaction_id,
                    transcript.len()
                );
                return Err(RunExchangeError::Cancelled { transcript });
            };

            let text = match result {
                Ok(text) => text,
                Err(source) => {
                    warn!(
                        "Backend call for {} failed on transaction {}: {}",
                        role, transaction.transaction_id, source
                    );
                    return Err(RunExchangeError::Aborted {
                        role,
                        source,
                        transcript,
                    });
                }
            };

            let turn = Turn::new(role, text);
            self.record_turn(&turn, transaction, progress);
            transcript.append(turn);
        }

        progress.on_exchange_complete(&transcript);

        let risk = FraudRisk::from_transcript(&transcript, transaction);
        info!(
            "Exchange for {} complete: {} turns, risk {}",
            transaction.transaction_id,
            transcript.len(),
            risk.level
        );
        self.transcript_logger.log(TranscriptEvent::new(
            "exchange_completed",
            serde_json::json!({
                "transaction_id": &transaction.transaction_id,
                "turns": transcript.len(),
                "risk": &risk,
            }),
        ));

        Ok(RunExchangeOutput { transcript, risk })
    }

    /// One backend invocation, bounded by the configured timeout.
    async fn call_backend(
        &self,
        role: AgentRole,
        transcript: &Transcript,
        transaction: &Transaction,
        behavior: &BehaviorConfig,
    ) -> Result<String, GatewayError> {
        let call = self.gateway.invoke(role, transcript, transaction);
        match behavior.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => call.await,
        }
    }

    fn record_turn(
        &self,
        turn: &Turn,
        transaction: &Transaction,
        progress: &dyn ExchangeProgressNotifier,
    ) {
        self.transcript_logger.log(TranscriptEvent::new(
            "turn",
            serde_json::json!({
                "transaction_id": &transaction.transaction_id,
                "role": turn.role,
                "text": &turn.text,
            }),
        ));
        progress.on_turn_complete(turn);
    }
}
