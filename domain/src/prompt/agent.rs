//! Fixed instruction text for each agent role
//!
//! These are the system prompts handed to the generation backend. The
//! outcome phrases they mandate are load-bearing: the routing strategies
//! match on them (see [`crate::signal`]), so the instruction text and the
//! signal vocabulary must stay in sync.

use crate::conversation::role::AgentRole;
use crate::core::error::DomainError;
use crate::transaction::entities::Transaction;

/// Instruction templates for the triage agents
pub struct AgentInstructions;

impl AgentInstructions {
    /// System prompt for the orchestrator agent
    pub fn orchestrator() -> &'static str {
        r#"Role: Coordinate the fraud detection workflow.
Responsibilities:
- Receive incoming transaction data.
- Forward data to the Verification Agent.
- Route verification results to the Report Generation Agent.
- Ensure structured communication.
Strict Rules:
1. Never perform fraud analysis directly.
2. Always delegate transactions to the Verification Agent.
3. If already flagged: "ORCHESTRATOR_AGENT > Fraud detected. Report generation in progress."
4. Prefix all messages with: "ORCHESTRATOR_AGENT > {transaction_id} | ""#
    }

    /// System prompt for the verification agent
    pub fn verification() -> &'static str {
        r#"Role: Analyze transactions using historical patterns.
Key Patterns:
- Unusual Spending, Rapid Transactions, Location Anomalies, High-Risk Merchants,
  Account Takeovers, Split Transactions, Card Testing.
Rules:
1. Compare with historical data before assessing.
2. High risk: "VERIFICATION_AGENT > High fraud likelihood detected."
3. Low risk: "VERIFICATION_AGENT > No fraud detected."
4. Prefix all messages with: "VERIFICATION_AGENT > {transaction_id} | ""#
    }

    /// System prompt for the report generation agent
    pub fn report() -> &'static str {
        r#"Role: Compile a structured fraud report.
Rules:
1. Never modify verification output.
2. Provide recommendations based on findings.
3. Prefix all messages with: "REPORT_GENERATION_AGENT > {transaction_id} | "
4. If high risk: Include "Fraud report generated.""#
    }

    /// Instruction text for an invocable role.
    ///
    /// The initiator is synthetic — it carries the caller's opening turn and
    /// is never invoked, so asking for its instructions is an error.
    pub fn for_role(role: AgentRole) -> Result<&'static str, DomainError> {
        match role {
            AgentRole::Orchestrator => Ok(Self::orchestrator()),
            AgentRole::Verification => Ok(Self::verification()),
            AgentRole::ReportGeneration => Ok(Self::report()),
            AgentRole::Initiator => Err(DomainError::MissingInstructions(role.to_string())),
        }
    }

    /// The opening request the initiator turn carries
    pub fn initial_request(transaction: &Transaction) -> String {
        transaction.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal;

    #[test]
    fn test_instructions_mandate_signal_phrases() {
        // The routing vocabulary must appear verbatim in the prompts.
        assert!(AgentInstructions::verification().contains(signal::HIGH_RISK_PHRASE));
        assert!(AgentInstructions::verification().contains(signal::LOW_RISK_PHRASE));
        assert!(AgentInstructions::report().contains(signal::REPORT_COMPLETE_PHRASE));
        assert!(AgentInstructions::orchestrator().contains(signal::PRE_FLAGGED_ACK_PHRASE));
    }

    #[test]
    fn test_every_agent_role_has_instructions() {
        for role in AgentRole::agents() {
            assert!(AgentInstructions::for_role(role).is_ok());
        }
    }

    #[test]
    fn test_initiator_has_no_instructions() {
        assert!(AgentInstructions::for_role(AgentRole::Initiator).is_err());
    }

    #[test]
    fn test_initial_request_carries_transaction_id() {
        let tx = Transaction::new("TXN12345", 500.0, "New York", "Electronics Store");
        let request = AgentInstructions::initial_request(&tx);
        assert!(request.starts_with("Transaction ID: TXN12345"));
    }
}
