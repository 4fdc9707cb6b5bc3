//! Relay selection strategy
//!
//! The pipeline routes everything through the orchestrator: it opens the
//! exchange, hands the transaction to the verification agent, receives the
//! verdict back, and only then hands off to the report agent. The verifier
//! therefore never talks to the report agent directly.

use crate::conversation::role::AgentRole;
use crate::conversation::transcript::Transcript;
use crate::routing::decision::RoutingDecision;
use crate::routing::strategy::SelectionStrategy;
use crate::signal::RiskSignal;
use crate::transaction::entities::Transaction;

/// Orchestrator-relayed next-speaker selection
///
/// Evaluation order:
/// 1. Pre-flagged transactions visit the orchestrator exactly once and never
///    reach the verification or report agents.
/// 2. An empty transcript always starts with the orchestrator.
/// 3. Otherwise dispatch on the last turn's role:
///    - orchestrator → report agent if the most recent verification turn
///      carries a verdict, else the verification agent
///    - verification → orchestrator (the verdict is relayed, not forwarded)
///    - report agent → complete
///    - anything else (initiator reappearing mid-exchange, malformed input)
///      → complete, so a broken transcript can never loop forever
#[derive(Debug, Clone, Copy, Default)]
pub struct RelaySelection;

impl SelectionStrategy for RelaySelection {
    fn select_next(&self, transcript: &Transcript, transaction: &Transaction) -> RoutingDecision {
        if transaction.already_flagged {
            return if transcript.has_turn_from(AgentRole::Orchestrator) {
                RoutingDecision::Complete
            } else {
                RoutingDecision::Next(AgentRole::Orchestrator)
            };
        }

        let Some(last) = transcript.last() else {
            return RoutingDecision::Next(AgentRole::Orchestrator);
        };

        match last.role {
            AgentRole::Orchestrator => {
                // Only the most recent verification turn counts: an older
                // verdict followed by a fresh non-verdict turn means the
                // verifier must be asked again.
                match transcript.last_turn_from(AgentRole::Verification) {
                    Some(turn) if RiskSignal::is_verdict(&turn.text) => {
                        RoutingDecision::Next(AgentRole::ReportGeneration)
                    }
                    _ => RoutingDecision::Next(AgentRole::Verification),
                }
            }
            AgentRole::Verification => RoutingDecision::Next(AgentRole::Orchestrator),
            AgentRole::ReportGeneration => RoutingDecision::Complete,
            // The opening turn hands off to the orchestrator; an initiator
            // turn anywhere later is a tampered transcript.
            AgentRole::Initiator if transcript.len() == 1 => {
                RoutingDecision::Next(AgentRole::Orchestrator)
            }
            AgentRole::Initiator => RoutingDecision::Complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::transcript::Turn;

    fn transaction() -> Transaction {
        Transaction::new("TXN12345", 500.0, "New York", "Electronics Store")
    }

    fn select(transcript: &Transcript, tx: &Transaction) -> RoutingDecision {
        RelaySelection.select_next(transcript, tx)
    }

    // ==================== Pre-flagged path ====================

    #[test]
    fn test_pre_flagged_goes_to_orchestrator_once() {
        let tx = transaction().flagged();
        let mut transcript = Transcript::new();

        assert_eq!(
            select(&transcript, &tx),
            RoutingDecision::Next(AgentRole::Orchestrator)
        );

        transcript.append(Turn::orchestrator(
            "ORCHESTRATOR_AGENT > Fraud detected. Report generation in progress.",
        ));
        assert_eq!(select(&transcript, &tx), RoutingDecision::Complete);
    }

    #[test]
    fn test_pre_flagged_never_visits_other_agents() {
        // Even a transcript that somehow contains a verifier verdict stays
        // on the short-circuit path.
        let tx = transaction().flagged();
        let mut transcript = Transcript::new();
        transcript.append(Turn::verification("High fraud likelihood detected."));

        assert_eq!(
            select(&transcript, &tx),
            RoutingDecision::Next(AgentRole::Orchestrator)
        );
    }

    // ==================== Normal flow ====================

    #[test]
    fn test_empty_transcript_starts_with_orchestrator() {
        assert_eq!(
            select(&Transcript::new(), &transaction()),
            RoutingDecision::Next(AgentRole::Orchestrator)
        );
    }

    #[test]
    fn test_opening_turn_hands_off_to_orchestrator() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::initiator("Transaction ID: TXN12345"));

        assert_eq!(
            select(&transcript, &transaction()),
            RoutingDecision::Next(AgentRole::Orchestrator)
        );
    }

    #[test]
    fn test_orchestrator_without_verdict_asks_verifier() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::initiator("TXN12345"));
        transcript.append(Turn::orchestrator("Please verify this transaction."));

        assert_eq!(
            select(&transcript, &transaction()),
            RoutingDecision::Next(AgentRole::Verification)
        );
    }

    #[test]
    fn test_verifier_routes_back_through_orchestrator() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::orchestrator("Please verify."));
        transcript.append(Turn::verification("No fraud detected."));

        assert_eq!(
            select(&transcript, &transaction()),
            RoutingDecision::Next(AgentRole::Orchestrator)
        );
    }

    #[test]
    fn test_orchestrator_with_verdict_hands_off_to_report() {
        for verdict in ["No fraud detected.", "High fraud likelihood detected."] {
            let mut transcript = Transcript::new();
            transcript.append(Turn::orchestrator("Please verify."));
            transcript.append(Turn::verification(verdict));
            transcript.append(Turn::orchestrator("Routing verdict to report agent."));

            assert_eq!(
                select(&transcript, &transaction()),
                RoutingDecision::Next(AgentRole::ReportGeneration)
            );
        }
    }

    #[test]
    fn test_only_most_recent_verifier_turn_counts() {
        // An old verdict followed by a newer verifier turn without one: the
        // reverse scan sees the newer turn first and sends the verifier back
        // to work.
        let mut transcript = Transcript::new();
        transcript.append(Turn::orchestrator("Please verify."));
        transcript.append(Turn::verification("No fraud detected."));
        transcript.append(Turn::orchestrator("Please re-check with history."));
        transcript.append(Turn::verification("Gathering historical data..."));
        transcript.append(Turn::orchestrator("Waiting on the verdict."));

        assert_eq!(
            select(&transcript, &transaction()),
            RoutingDecision::Next(AgentRole::Verification)
        );
    }

    #[test]
    fn test_report_turn_completes() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::report("Fraud report generated."));

        assert_eq!(select(&transcript, &transaction()), RoutingDecision::Complete);
    }

    // ==================== Defensive cases ====================

    #[test]
    fn test_initiator_as_last_turn_completes() {
        // The initiator only legitimately appears as the first turn; seeing
        // it last mid-exchange means the transcript was tampered with.
        let mut transcript = Transcript::new();
        transcript.append(Turn::orchestrator("Please verify."));
        transcript.append(Turn::initiator("rogue turn"));

        assert_eq!(select(&transcript, &transaction()), RoutingDecision::Complete);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::orchestrator("Please verify."));
        let tx = transaction();

        let first = select(&transcript, &tx);
        for _ in 0..10 {
            assert_eq!(select(&transcript, &tx), first);
        }
    }
}
