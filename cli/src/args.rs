//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for fraud-triage
#[derive(Parser, Debug)]
#[command(name = "fraud-triage")]
#[command(author, version, about = "Agent pipeline that triages financial transactions for fraud")]
#[command(long_about = r#"
fraud-triage runs one transaction (or a batch) through a three-agent pipeline:

1. Orchestrator: coordinates the workflow and relays between agents
2. Verification: assesses the transaction and emits a risk verdict
3. Report generation: compiles the final fraud report

Transactions already flagged upstream take a short path: the orchestrator
acknowledges the flag and the exchange ends without verification.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./triage.toml       Project-level config
3. ~/.config/fraud-triage/config.toml   Global config

Example:
  fraud-triage --amount 4999.0 --merchant "Jewelry Store" --location "Lagos"
  fraud-triage --flagged --id TXN-7781
  fraud-triage --batch transactions.json --backend scripted
"#)]
pub struct Cli {
    /// Transaction identifier
    #[arg(long, default_value = "TXN12345", value_name = "ID")]
    pub id: String,

    /// Transaction amount
    #[arg(long, default_value_t = 500.0)]
    pub amount: f64,

    /// Transaction location
    #[arg(long, default_value = "New York")]
    pub location: String,

    /// Merchant name
    #[arg(long, default_value = "Electronics Store")]
    pub merchant: String,

    /// Currency code
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Treat the transaction as already flagged upstream
    #[arg(long)]
    pub flagged: bool,

    /// Triage a JSON file holding an array of transactions instead
    #[arg(long, value_name = "FILE")]
    pub batch: Option<PathBuf>,

    /// Generation backend: scripted or azure (overrides the config file)
    #[arg(long, value_name = "KIND")]
    pub backend: Option<String>,

    /// Explicit config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip config files and use built-in defaults
    #[arg(long)]
    pub no_config: bool,

    /// Timeout in seconds per backend call (overrides the config file)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Write the exchange to a JSONL transcript log (overrides the config file)
    #[arg(long, value_name = "PATH")]
    pub transcript_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress per-turn console output
    #[arg(short, long)]
    pub quiet: bool,
}
