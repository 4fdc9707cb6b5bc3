//! Console output for exchanges

use colored::{ColoredString, Colorize};
use triage_application::{
    ExchangeProgressNotifier, RunExchangeError, RunExchangeOutput,
};
use triage_domain::{AgentRole, FraudRisk, RiskLevel, Transaction, Transcript, Turn};

fn role_label(role: AgentRole) -> ColoredString {
    match role {
        AgentRole::Initiator => role.as_str().dimmed(),
        AgentRole::Orchestrator => role.as_str().blue().bold(),
        AgentRole::Verification => role.as_str().yellow().bold(),
        AgentRole::ReportGeneration => role.as_str().green().bold(),
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints each turn as it is appended.
pub struct ConsoleProgress;

impl ExchangeProgressNotifier for ConsoleProgress {
    fn on_exchange_start(&self, transaction: &Transaction) {
        println!();
        println!(
            "Triaging transaction {}",
            transaction.transaction_id.as_str().bold()
        );
        println!(
            "  {} {} at {} ({})",
            transaction.amount, transaction.currency, transaction.merchant, transaction.location
        );
        println!();
    }

    fn on_turn_complete(&self, turn: &Turn) {
        println!("{}:", role_label(turn.role));
        println!("{}", indent(&turn.text));
        println!("{}", "-".repeat(50).as_str().dimmed());
    }
}

/// Print the derived risk assessment.
pub fn print_risk(risk: &FraudRisk) {
    let text = risk.level.to_string();
    let level = match risk.level {
        RiskLevel::Low => text.as_str().green().bold(),
        RiskLevel::Medium => text.as_str().yellow().bold(),
        RiskLevel::High => text.as_str().red().bold(),
    };
    println!();
    println!(
        "Risk: {} (score {:.2}, confidence {:.2})",
        level, risk.score, risk.confidence
    );
    for reason in &risk.reasons {
        println!("  - {}", reason);
    }
}

/// Print the transcript recorded before an aborted exchange failed.
pub fn print_partial_transcript(transcript: &Transcript) {
    eprintln!();
    eprintln!("{}", "Transcript before the failure:".dimmed());
    for turn in transcript {
        eprintln!("  {}: {}", role_label(turn.role), turn.text);
    }
}

/// Print one line per batch result.
pub fn print_batch(
    transactions: &[String],
    results: &[Result<RunExchangeOutput, RunExchangeError>],
) {
    println!();
    for (id, result) in transactions.iter().zip(results) {
        match result {
            Ok(output) => {
                let text = output.risk.level.to_string();
                let level = match output.risk.level {
                    RiskLevel::Low => text.as_str().green(),
                    RiskLevel::Medium => text.as_str().yellow(),
                    RiskLevel::High => text.as_str().red(),
                };
                println!(
                    "{}  risk={}  turns={}",
                    id.as_str().bold(),
                    level,
                    output.transcript.len()
                );
            }
            Err(error) => {
                let message = format!("failed: {}", error);
                println!("{}  {}", id.as_str().bold(), message.as_str().red());
            }
        }
    }
}
