//! Report-participation termination strategy

use crate::conversation::role::AgentRole;
use crate::conversation::transcript::Transcript;
use crate::routing::strategy::TerminationStrategy;
use crate::signal;
use crate::transaction::entities::Transaction;

/// Terminates once the report agent has participated
///
/// Policy: the exchange ends as soon as the report agent has spoken at all —
/// its participation, not the exact completion phrase, closes the normal
/// flow. The report agent's instructions still mandate the
/// "Fraud report generated." phrase on high-risk reports, so the phrase
/// stays observable in transcripts; it just is not the termination trigger.
///
/// Pre-flagged transactions end on the orchestrator's acknowledgement
/// instead, since the report agent never runs for those.
///
/// Both checks only look at the presence and content of already-appended
/// turns, which makes the decision monotonic: once terminated, appending
/// more turns can never flip it back.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportTermination;

impl TerminationStrategy for ReportTermination {
    fn should_terminate(&self, transcript: &Transcript, transaction: &Transaction) -> bool {
        if transaction.already_flagged {
            return transcript.turns().iter().any(|t| {
                t.role == AgentRole::Orchestrator && signal::is_pre_flagged_ack(&t.text)
            });
        }

        transcript.has_turn_from(AgentRole::ReportGeneration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::transcript::Turn;

    fn transaction() -> Transaction {
        Transaction::new("TXN12345", 500.0, "New York", "Electronics Store")
    }

    fn terminated(transcript: &Transcript, tx: &Transaction) -> bool {
        ReportTermination.should_terminate(transcript, tx)
    }

    // ==================== Normal path ====================

    #[test]
    fn test_not_terminated_before_report_agent_speaks() {
        let mut transcript = Transcript::new();
        assert!(!terminated(&transcript, &transaction()));

        transcript.append(Turn::initiator("TXN12345"));
        transcript.append(Turn::orchestrator("Please verify."));
        transcript.append(Turn::verification("High fraud likelihood detected."));
        assert!(!terminated(&transcript, &transaction()));
    }

    #[test]
    fn test_report_participation_terminates() {
        // Participation alone is enough — no completion phrase required.
        let mut transcript = Transcript::new();
        transcript.append(Turn::report("Compiling the report now..."));
        assert!(terminated(&transcript, &transaction()));
    }

    // ==================== Pre-flagged path ====================

    #[test]
    fn test_pre_flagged_needs_acknowledgement() {
        let tx = transaction().flagged();
        let mut transcript = Transcript::new();
        assert!(!terminated(&transcript, &tx));

        // An orchestrator turn without the acknowledgement does not end it
        transcript.append(Turn::orchestrator("Looking into TXN12345."));
        assert!(!terminated(&transcript, &tx));

        transcript.append(Turn::orchestrator(
            "ORCHESTRATOR_AGENT > Fraud detected. Report generation in progress.",
        ));
        assert!(terminated(&transcript, &tx));
    }

    #[test]
    fn test_pre_flagged_ack_from_wrong_role_does_not_terminate() {
        let tx = transaction().flagged();
        let mut transcript = Transcript::new();
        transcript.append(Turn::verification(
            "Fraud detected. Report generation in progress.",
        ));
        assert!(!terminated(&transcript, &tx));
    }

    #[test]
    fn test_pre_flagged_ignores_report_participation() {
        // On the pre-flagged path only the acknowledgement counts.
        let tx = transaction().flagged();
        let mut transcript = Transcript::new();
        transcript.append(Turn::report("Fraud report generated."));
        assert!(!terminated(&transcript, &tx));
    }

    // ==================== Properties ====================

    #[test]
    fn test_termination_is_monotonic_under_append() {
        let tx = transaction();
        let mut transcript = Transcript::new();
        transcript.append(Turn::report("Fraud report generated."));
        assert!(terminated(&transcript, &tx));

        // Appending anything afterwards cannot undo termination
        transcript.append(Turn::orchestrator("late arrival"));
        transcript.append(Turn::initiator("even this"));
        assert!(terminated(&transcript, &tx));
    }

    #[test]
    fn test_termination_is_deterministic() {
        let tx = transaction().flagged();
        let mut transcript = Transcript::new();
        transcript.append(Turn::orchestrator(
            "Fraud detected. Report generation in progress.",
        ));

        let first = terminated(&transcript, &tx);
        for _ in 0..10 {
            assert_eq!(terminated(&transcript, &tx), first);
        }
    }
}
