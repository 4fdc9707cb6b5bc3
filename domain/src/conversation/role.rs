//! Agent role value object
//!
//! The participant set is closed: three named agents plus the synthetic
//! initiator that contributes only the opening turn. Keeping this an enum
//! (rather than raw strings) makes the routing dispatch exhaustive — an
//! unrecognized role cannot slip past the compiler.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A participant in a triage exchange (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    /// Synthetic role carrying the opening, caller-supplied turn
    Initiator,
    /// Coordinates the workflow and relays between the other agents
    Orchestrator,
    /// Assesses the transaction and emits a risk verdict
    Verification,
    /// Compiles the final fraud report
    ReportGeneration,
}

impl AgentRole {
    /// Get the wire identifier for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Initiator => "initiator",
            AgentRole::Orchestrator => "ORCHESTRATOR_AGENT",
            AgentRole::Verification => "VERIFICATION_AGENT",
            AgentRole::ReportGeneration => "REPORT_GENERATION_AGENT",
        }
    }

    /// The three agent roles that can be invoked, in pipeline order
    pub fn agents() -> [AgentRole; 3] {
        [
            AgentRole::Orchestrator,
            AgentRole::Verification,
            AgentRole::ReportGeneration,
        ]
    }

    /// Whether this role can be selected to speak (the initiator cannot)
    pub fn is_agent(&self) -> bool {
        !matches!(self, AgentRole::Initiator)
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initiator" => Ok(AgentRole::Initiator),
            "ORCHESTRATOR_AGENT" => Ok(AgentRole::Orchestrator),
            "VERIFICATION_AGENT" => Ok(AgentRole::Verification),
            "REPORT_GENERATION_AGENT" => Ok(AgentRole::ReportGeneration),
            other => Err(format!("Unknown agent role: {}", other)),
        }
    }
}

impl Serialize for AgentRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
