//! Generation backend adapters

pub mod azure;
pub mod scripted;

use crate::config::file_config::{ConfigValidationError, FileAgentsConfig};
use triage_domain::{AgentInstructions, AgentRole};

/// Resolved instruction text for the three invocable roles.
///
/// Defaults to the built-in instructions; the config file may override any
/// role. Overrides are validated at load time so a blank instruction can
/// never reach the backend.
#[derive(Debug, Clone)]
pub struct InstructionSet {
    orchestrator: String,
    verification: String,
    report: String,
}

impl Default for InstructionSet {
    fn default() -> Self {
        Self {
            orchestrator: AgentInstructions::orchestrator().to_string(),
            verification: AgentInstructions::verification().to_string(),
            report: AgentInstructions::report().to_string(),
        }
    }
}

impl InstructionSet {
    /// Apply per-role overrides from the config file.
    pub fn from_overrides(agents: &FileAgentsConfig) -> Result<Self, ConfigValidationError> {
        let mut set = Self::default();
        for (name, override_value, slot) in [
            ("orchestrator", &agents.orchestrator, &mut set.orchestrator),
            ("verification", &agents.verification, &mut set.verification),
            ("report", &agents.report, &mut set.report),
        ] {
            if let Some(text) = override_value {
                if text.trim().is_empty() {
                    return Err(ConfigValidationError::EmptyInstructions(name));
                }
                *slot = text.clone();
            }
        }
        Ok(set)
    }

    /// Instruction text for an invocable role; `None` for the initiator.
    pub fn for_role(&self, role: AgentRole) -> Option<&str> {
        match role {
            AgentRole::Orchestrator => Some(&self.orchestrator),
            AgentRole::Verification => Some(&self.verification),
            AgentRole::ReportGeneration => Some(&self.report),
            AgentRole::Initiator => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_all_agents() {
        let set = InstructionSet::default();
        for role in AgentRole::agents() {
            assert!(set.for_role(role).is_some());
        }
        assert!(set.for_role(AgentRole::Initiator).is_none());
    }

    #[test]
    fn test_override_replaces_single_role() {
        let agents = FileAgentsConfig {
            verification: Some("Custom verifier instructions.".to_string()),
            ..Default::default()
        };
        let set = InstructionSet::from_overrides(&agents).unwrap();
        assert_eq!(
            set.for_role(AgentRole::Verification),
            Some("Custom verifier instructions.")
        );
        // Others keep the built-in text
        assert_eq!(
            set.for_role(AgentRole::Orchestrator),
            Some(AgentInstructions::orchestrator())
        );
    }

    #[test]
    fn test_blank_override_is_rejected() {
        let agents = FileAgentsConfig {
            report: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(InstructionSet::from_overrides(&agents).is_err());
    }
}
