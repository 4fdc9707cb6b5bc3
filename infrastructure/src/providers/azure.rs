//! Azure OpenAI generation backend
//!
//! Invokes a role by replaying the exchange into a chat-completions request:
//! the role's instruction text becomes the system message, the role's own
//! earlier turns become assistant messages, and everything else (the
//! initiator's opening request included) is presented as user input. One
//! invocation produces one turn.

use crate::config::file_config::FileBackendConfig;
use crate::providers::InstructionSet;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use triage_application::ports::agent_gateway::{AgentGateway, GatewayError};
use triage_domain::{AgentRole, Transaction, Transcript};

/// Connect timeout for the HTTP client; per-call deadlines are the
/// driver's responsibility.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors constructing the Azure gateway
#[derive(Debug, Error)]
pub enum AzureConfigError {
    #[error("backend.endpoint is not configured")]
    MissingEndpoint,

    #[error("backend.deployment is not configured")]
    MissingDeployment,

    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Azure OpenAI chat-completions adapter
pub struct AzureAgentGateway {
    client: reqwest::Client,
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
    instructions: InstructionSet,
}

impl AzureAgentGateway {
    /// Build the gateway from file configuration.
    ///
    /// The API key is read from the environment variable named in
    /// `backend.api_key_env` — the key itself never lives in config files.
    pub fn from_config(
        backend: &FileBackendConfig,
        instructions: InstructionSet,
    ) -> Result<Self, AzureConfigError> {
        let endpoint = backend
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(AzureConfigError::MissingEndpoint)?
            .trim_end_matches('/')
            .to_string();
        let deployment = backend
            .deployment
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(AzureConfigError::MissingDeployment)?
            .to_string();
        let api_key = std::env::var(&backend.api_key_env)
            .map_err(|_| AzureConfigError::MissingApiKey(backend.api_key_env.clone()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AzureConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            deployment,
            api_version: backend.api_version.clone(),
            api_key,
            instructions,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    /// Replay the exchange from the invoked role's point of view.
    fn build_messages(
        &self,
        role: AgentRole,
        transcript: &Transcript,
        system_prompt: &str,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage {
            role: "system",
            content: system_prompt.to_string(),
        }];
        for turn in transcript {
            messages.push(if turn.role == role {
                ChatMessage {
                    role: "assistant",
                    content: turn.text.clone(),
                }
            } else {
                ChatMessage {
                    role: "user",
                    content: turn.text.clone(),
                }
            });
        }
        messages
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

fn map_error_status(status: reqwest::StatusCode, body: &str) -> GatewayError {
    match status.as_u16() {
        401 | 403 => GatewayError::AuthFailed(format!("{}: {}", status, body)),
        429 => GatewayError::RateLimited(body.to_string()),
        _ => GatewayError::RequestFailed(format!("{}: {}", status, body)),
    }
}

#[async_trait]
impl AgentGateway for AzureAgentGateway {
    async fn invoke(
        &self,
        role: AgentRole,
        transcript: &Transcript,
        transaction: &Transaction,
    ) -> Result<String, GatewayError> {
        let Some(system_prompt) = self.instructions.for_role(role) else {
            return Err(GatewayError::Other(format!(
                "no instructions for role {}",
                role
            )));
        };

        let request = ChatRequest {
            messages: self.build_messages(role, transcript, system_prompt),
        };
        debug!(
            "Azure call as {} for {}: {} messages",
            role,
            transaction.transaction_id,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.request_url())
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, &body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }
}
