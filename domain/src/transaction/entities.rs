//! Transaction entity

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_currency() -> String {
    "USD".to_string()
}

fn default_status() -> String {
    "pending".to_string()
}

/// A financial transaction under triage (Entity)
///
/// Created by the caller before an exchange starts and treated as read-only
/// for the exchange's entire lifetime — the routing strategies and the
/// driver only ever borrow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub amount: f64,
    pub location: String,
    pub merchant: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_status")]
    pub status: String,
    /// Set when upstream systems have already flagged this transaction as
    /// fraudulent, which short-circuits the normal verify → report flow.
    #[serde(default)]
    pub already_flagged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl Transaction {
    /// Create a transaction with the current timestamp and default fields
    pub fn new(
        transaction_id: impl Into<String>,
        amount: f64,
        location: impl Into<String>,
        merchant: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            amount,
            location: location.into(),
            merchant: merchant.into(),
            currency: default_currency(),
            timestamp: Utc::now(),
            status: default_status(),
            already_flagged: false,
            metadata: None,
        }
    }

    /// Mark the transaction as already flagged by an upstream system
    pub fn flagged(mut self) -> Self {
        self.already_flagged = true;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_metadata(mut self, metadata: BTreeMap<String, serde_json::Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Check the fields required to open an exchange.
    ///
    /// Runs before the conversation loop starts so that bad input never
    /// surfaces mid-exchange.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.transaction_id.trim().is_empty() {
            return Err(DomainError::InvalidTransaction(
                "transaction_id cannot be empty".to_string(),
            ));
        }
        if !self.amount.is_finite() {
            return Err(DomainError::InvalidTransaction(format!(
                "amount must be finite, got {}",
                self.amount
            )));
        }
        if self.amount < 0.0 {
            return Err(DomainError::InvalidTransaction(format!(
                "amount cannot be negative, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    /// Render the opening request the initiator turn carries
    pub fn summary(&self) -> String {
        let data = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        format!("Transaction ID: {}\nData: {}", self.transaction_id, data)
    }
}
