//! Fraud risk value objects
//!
//! The exchange itself only produces a transcript; the risk assessment is
//! derived from it afterwards by scanning for the verdict phrases.

use crate::conversation::transcript::Transcript;
use crate::signal;
use crate::transaction::entities::Transaction;
use serde::{Deserialize, Serialize};

/// Assessed risk level (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// A fraud risk assessment derived from a finished exchange (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudRisk {
    pub level: RiskLevel,
    pub score: f64,
    pub reasons: Vec<String>,
    pub confidence: f64,
}

impl FraudRisk {
    pub fn high(reasons: Vec<String>) -> Self {
        Self {
            level: RiskLevel::High,
            score: 0.9,
            reasons,
            confidence: 0.95,
        }
    }

    pub fn low(reasons: Vec<String>) -> Self {
        Self {
            level: RiskLevel::Low,
            score: 0.1,
            reasons,
            confidence: 0.95,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        self.level == RiskLevel::High
    }

    /// Derive the assessment from a transcript.
    ///
    /// Pre-flagged transactions whose acknowledgement was recorded are high
    /// risk by definition. Otherwise any turn carrying the high-risk phrase
    /// makes the assessment high; a transcript without one is low risk.
    pub fn from_transcript(transcript: &Transcript, transaction: &Transaction) -> Self {
        if transaction.already_flagged
            && transcript
                .turns()
                .iter()
                .any(|t| signal::is_pre_flagged_ack(&t.text))
        {
            return Self::high(vec![
                "Transaction previously flagged as fraudulent".to_string()
            ]);
        }

        if transcript
            .turns()
            .iter()
            .any(|t| signal::is_high_risk(&t.text))
        {
            Self::high(vec!["High risk transaction detected".to_string()])
        } else {
            Self::low(vec!["No suspicious patterns detected".to_string()])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::transcript::Turn;

    fn transaction() -> Transaction {
        Transaction::new("TXN1", 100.0, "Paris", "Bakery")
    }

    #[test]
    fn test_high_risk_verdict_drives_assessment() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::verification(
            "VERIFICATION_AGENT > TXN1 | High fraud likelihood detected.",
        ));

        let risk = FraudRisk::from_transcript(&transcript, &transaction());
        assert!(risk.is_high_risk());
        assert_eq!(risk.score, 0.9);
    }

    #[test]
    fn test_quiet_transcript_is_low_risk() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::verification(
            "VERIFICATION_AGENT > TXN1 | No fraud detected.",
        ));

        let risk = FraudRisk::from_transcript(&transcript, &transaction());
        assert_eq!(risk.level, RiskLevel::Low);
        assert_eq!(risk.score, 0.1);
    }

    #[test]
    fn test_pre_flagged_ack_is_high_risk() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::orchestrator(
            "ORCHESTRATOR_AGENT > Fraud detected. Report generation in progress.",
        ));

        let risk = FraudRisk::from_transcript(&transcript, &transaction().flagged());
        assert!(risk.is_high_risk());
        assert!(risk.reasons[0].contains("previously flagged"));
    }

    #[test]
    fn test_risk_level_serde() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
        let level: RiskLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(level, RiskLevel::Medium);
    }
}
