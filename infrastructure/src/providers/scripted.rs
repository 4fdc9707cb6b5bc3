//! Scripted generation backend
//!
//! A deterministic offline adapter that produces each role's canonical
//! response from the transaction data alone — no credentials, no network.
//! It powers demos and doubles as a reference backend in tests: the
//! responses carry exactly the phrases the role instructions mandate, so
//! routing behaves as it would against a well-behaved live backend.

use async_trait::async_trait;
use tracing::debug;
use triage_application::ports::agent_gateway::{AgentGateway, GatewayError};
use triage_domain::{signal, AgentRole, Transaction, Transcript};

/// Deterministic rule-based gateway.
pub struct ScriptedAgentGateway {
    /// Amount at or above which the verifier flags high risk
    flag_threshold: f64,
}

impl ScriptedAgentGateway {
    pub fn new(flag_threshold: f64) -> Self {
        Self { flag_threshold }
    }

    fn verdict_is_high(&self, transaction: &Transaction) -> bool {
        transaction.amount >= self.flag_threshold
    }
}

impl Default for ScriptedAgentGateway {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

#[async_trait]
impl AgentGateway for ScriptedAgentGateway {
    async fn invoke(
        &self,
        role: AgentRole,
        transcript: &Transcript,
        transaction: &Transaction,
    ) -> Result<String, GatewayError> {
        let id = &transaction.transaction_id;
        debug!("Scripted backend answering as {} for {}", role, id);

        let text = match role {
            AgentRole::Orchestrator if transaction.already_flagged => {
                format!("ORCHESTRATOR_AGENT > {} | {}", id, signal::PRE_FLAGGED_ACK_PHRASE)
            }
            AgentRole::Orchestrator => {
                // Before the verdict the orchestrator delegates; afterwards
                // it relays the result onward.
                match transcript.last_turn_from(AgentRole::Verification) {
                    Some(_) => format!(
                        "ORCHESTRATOR_AGENT > {} | Routing verification result to the report agent.",
                        id
                    ),
                    None => format!(
                        "ORCHESTRATOR_AGENT > {} | Forwarding transaction to the Verification Agent for assessment.",
                        id
                    ),
                }
            }
            AgentRole::Verification if self.verdict_is_high(transaction) => {
                format!(
                    "VERIFICATION_AGENT > {} | Amount {} {} at {} exceeds the review threshold. {}",
                    id, transaction.amount, transaction.currency, transaction.merchant,
                    signal::HIGH_RISK_PHRASE
                )
            }
            AgentRole::Verification => {
                format!(
                    "VERIFICATION_AGENT > {} | Compared against historical patterns. {}",
                    id,
                    signal::LOW_RISK_PHRASE
                )
            }
            AgentRole::ReportGeneration if self.verdict_is_high(transaction) => {
                format!(
                    "REPORT_GENERATION_AGENT > {} | Recommendation: hold the transaction and contact the cardholder. {}",
                    id,
                    signal::REPORT_COMPLETE_PHRASE
                )
            }
            AgentRole::ReportGeneration => {
                format!(
                    "REPORT_GENERATION_AGENT > {} | No suspicious findings to report. Transaction cleared.",
                    id
                )
            }
            AgentRole::Initiator => {
                return Err(GatewayError::Other(
                    "the initiator role cannot be invoked".to_string(),
                ));
            }
        };

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(amount: f64) -> Transaction {
        Transaction::new("TXN12345", amount, "New York", "Electronics Store")
    }

    #[tokio::test]
    async fn test_verifier_verdict_follows_threshold() {
        let gateway = ScriptedAgentGateway::new(1000.0);
        let transcript = Transcript::new();

        let low = gateway
            .invoke(AgentRole::Verification, &transcript, &transaction(500.0))
            .await
            .unwrap();
        assert!(signal::is_low_risk(&low));

        let high = gateway
            .invoke(AgentRole::Verification, &transcript, &transaction(1000.0))
            .await
            .unwrap();
        assert!(signal::is_high_risk(&high));
    }

    #[tokio::test]
    async fn test_orchestrator_acknowledges_pre_flagged() {
        let gateway = ScriptedAgentGateway::default();
        let text = gateway
            .invoke(
                AgentRole::Orchestrator,
                &Transcript::new(),
                &transaction(10.0).flagged(),
            )
            .await
            .unwrap();
        assert!(signal::is_pre_flagged_ack(&text));
    }

    #[tokio::test]
    async fn test_report_includes_completion_phrase_on_high_risk() {
        let gateway = ScriptedAgentGateway::new(100.0);
        let text = gateway
            .invoke(
                AgentRole::ReportGeneration,
                &Transcript::new(),
                &transaction(250.0),
            )
            .await
            .unwrap();
        assert!(signal::is_report_complete(&text));
    }

    #[tokio::test]
    async fn test_responses_carry_the_agent_prefix() {
        let gateway = ScriptedAgentGateway::default();
        let text = gateway
            .invoke(
                AgentRole::Orchestrator,
                &Transcript::new(),
                &transaction(10.0),
            )
            .await
            .unwrap();
        assert!(text.starts_with("ORCHESTRATOR_AGENT > TXN12345 | "));
    }

    #[tokio::test]
    async fn test_invoking_initiator_is_an_error() {
        let gateway = ScriptedAgentGateway::default();
        let result = gateway
            .invoke(AgentRole::Initiator, &Transcript::new(), &transaction(10.0))
            .await;
        assert!(result.is_err());
    }
}
