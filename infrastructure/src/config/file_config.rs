//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Validation runs once after loading, before any exchange starts — a bad
//! config never surfaces mid-conversation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("flag_threshold must be a finite, non-negative amount")]
    InvalidFlagThreshold,

    #[error("instruction override for {0} cannot be empty")]
    EmptyInstructions(&'static str),

    #[error("backend.endpoint is required for the azure backend")]
    MissingEndpoint,

    #[error("backend.deployment is required for the azure backend")]
    MissingDeployment,
}

/// Which generation backend adapter to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Deterministic offline adapter — no credentials needed
    #[default]
    Scripted,
    /// Azure OpenAI chat-completions REST adapter
    Azure,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scripted" => Ok(BackendKind::Scripted),
            "azure" => Ok(BackendKind::Azure),
            other => Err(format!("Unknown backend kind: {}", other)),
        }
    }
}

/// Raw backend configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub kind: BackendKind,
    /// Azure resource endpoint, e.g. `https://myresource.openai.azure.com`
    pub endpoint: Option<String>,
    /// Azure deployment name of the chat model
    pub deployment: Option<String>,
    pub api_version: String,
    /// Environment variable holding the API key (never the key itself)
    pub api_key_env: String,
    /// Timeout in seconds for one backend call
    pub timeout_seconds: Option<u64>,
    /// Amount at or above which the scripted verifier flags high risk
    pub flag_threshold: f64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Scripted,
            endpoint: None,
            deployment: None,
            api_version: "2024-06-01".to_string(),
            api_key_env: "AZURE_OPENAI_API_KEY".to_string(),
            timeout_seconds: None,
            flag_threshold: 1000.0,
        }
    }
}

/// Optional per-role instruction overrides from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    pub orchestrator: Option<String>,
    pub verification: Option<String>,
    pub report: Option<String>,
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path of the JSONL transcript log; unset disables it
    pub transcript_log: Option<String>,
}

/// Complete raw configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub backend: FileBackendConfig,
    pub agents: FileAgentsConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the merged configuration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if !self.backend.flag_threshold.is_finite() || self.backend.flag_threshold < 0.0 {
            return Err(ConfigValidationError::InvalidFlagThreshold);
        }
        if self.backend.kind == BackendKind::Azure {
            if self.backend.endpoint.as_deref().is_none_or(|e| e.trim().is_empty()) {
                return Err(ConfigValidationError::MissingEndpoint);
            }
            if self.backend.deployment.as_deref().is_none_or(|d| d.trim().is_empty()) {
                return Err(ConfigValidationError::MissingDeployment);
            }
        }
        for (name, value) in [
            ("orchestrator", &self.agents.orchestrator),
            ("verification", &self.agents.verification),
            ("report", &self.agents.report),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyInstructions(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = FileConfig::default();
        config.backend.timeout_seconds = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_azure_requires_endpoint_and_deployment() {
        let mut config = FileConfig::default();
        config.backend.kind = BackendKind::Azure;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::MissingEndpoint)
        ));

        config.backend.endpoint = Some("https://example.openai.azure.com".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::MissingDeployment)
        ));

        config.backend.deployment = Some("gpt-4o".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_instruction_override_rejected() {
        let mut config = FileConfig::default();
        config.agents.verification = Some("   ".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyInstructions("verification"))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config: FileConfig = toml::from_str(
            r#"
            [backend]
            kind = "azure"
            endpoint = "https://example.openai.azure.com"
            deployment = "gpt-4o"
            timeout_seconds = 30

            [logging]
            transcript_log = "triage.jsonl"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.kind, BackendKind::Azure);
        assert_eq!(config.backend.timeout_seconds, Some(30));
        assert_eq!(
            config.logging.transcript_log.as_deref(),
            Some("triage.jsonl")
        );
        // Untouched sections keep their defaults
        assert_eq!(config.backend.api_key_env, "AZURE_OPENAI_API_KEY");
    }
}
