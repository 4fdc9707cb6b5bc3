//! Routing decision value object

use crate::conversation::role::AgentRole;

/// The outcome of one selection step (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    /// The given role speaks next
    Next(AgentRole),
    /// No further role acts; the exchange is over
    Complete,
}

impl RoutingDecision {
    pub fn is_complete(&self) -> bool {
        matches!(self, RoutingDecision::Complete)
    }

    /// The role to invoke next, if the exchange continues
    pub fn next_role(&self) -> Option<AgentRole> {
        match self {
            RoutingDecision::Next(role) => Some(*role),
            RoutingDecision::Complete => None,
        }
    }
}

impl std::fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingDecision::Next(role) => write!(f, "next: {}", role),
            RoutingDecision::Complete => write!(f, "complete"),
        }
    }
}
