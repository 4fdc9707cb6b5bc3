//! Turn and transcript entities
//!
//! The transcript is the single source of truth the routing strategies read.
//! It is strictly append-only: turns are never reordered, edited, or removed
//! once appended. Routing decisions key off the *last* turn, so preserving
//! order is what makes an exchange replayable.

use crate::conversation::role::AgentRole;
use serde::{Deserialize, Serialize};

/// One role's single contribution to an exchange (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: AgentRole,
    pub text: String,
}

impl Turn {
    pub fn new(role: AgentRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn initiator(text: impl Into<String>) -> Self {
        Self::new(AgentRole::Initiator, text)
    }

    pub fn orchestrator(text: impl Into<String>) -> Self {
        Self::new(AgentRole::Orchestrator, text)
    }

    pub fn verification(text: impl Into<String>) -> Self {
        Self::new(AgentRole::Verification, text)
    }

    pub fn report(text: impl Into<String>) -> Self {
        Self::new(AgentRole::ReportGeneration, text)
    }
}

/// The ordered history of turns for one transaction's exchange (Entity)
///
/// Scoped to exactly one transaction; created empty when the exchange starts
/// and discarded when it ends. Serializes as the ordered list of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. This is the only way the transcript changes.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns, in append order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recently appended turn
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Whether any turn was contributed by the given role
    pub fn has_turn_from(&self, role: AgentRole) -> bool {
        self.turns.iter().any(|t| t.role == role)
    }

    /// The most recent turn contributed by the given role, if any
    pub fn last_turn_from(&self, role: AgentRole) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == role)
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::initiator("TXN1"));
        transcript.append(Turn::orchestrator("forwarding"));
        transcript.append(Turn::verification("No fraud detected."));

        let roles: Vec<AgentRole> = transcript.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                AgentRole::Initiator,
                AgentRole::Orchestrator,
                AgentRole::Verification
            ]
        );
        assert_eq!(transcript.last().unwrap().role, AgentRole::Verification);
    }

    #[test]
    fn test_last_turn_from_picks_most_recent() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::orchestrator("first"));
        transcript.append(Turn::verification("verdict"));
        transcript.append(Turn::orchestrator("second"));

        assert_eq!(
            transcript.last_turn_from(AgentRole::Orchestrator).unwrap().text,
            "second"
        );
        assert!(transcript.last_turn_from(AgentRole::ReportGeneration).is_none());
    }

    #[test]
    fn test_has_turn_from() {
        let mut transcript = Transcript::new();
        assert!(!transcript.has_turn_from(AgentRole::Orchestrator));
        transcript.append(Turn::orchestrator("hello"));
        assert!(transcript.has_turn_from(AgentRole::Orchestrator));
        assert!(!transcript.has_turn_from(AgentRole::Verification));
    }

    #[test]
    fn test_serializes_as_ordered_records() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::initiator("TXN1"));
        transcript.append(Turn::report("Fraud report generated."));

        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(json[0]["role"], "initiator");
        assert_eq!(json[1]["role"], "REPORT_GENERATION_AGENT");
        assert_eq!(json[1]["text"], "Fraud report generated.");

        let back: Transcript = serde_json::from_value(json).unwrap();
        assert_eq!(back, transcript);
    }
}
