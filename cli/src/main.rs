//! CLI entrypoint for fraud-triage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod output;

use anyhow::{bail, Context, Result};
use args::Cli;
use clap::Parser;
use output::ConsoleProgress;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;
use triage_application::{
    AgentGateway, BehaviorConfig, NoExchangeProgress, RunBatchUseCase, RunExchangeInput,
    RunExchangeUseCase,
};
use triage_domain::Transaction;
use triage_infrastructure::{
    AzureAgentGateway, BackendKind, ConfigLoader, InstructionSet, JsonlTranscriptLogger,
    ScriptedAgentGateway,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting fraud-triage");

    // Load and validate configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    if let Some(kind) = &cli.backend {
        config.backend.kind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    }
    if let Some(seconds) = cli.timeout {
        config.backend.timeout_seconds = Some(seconds);
    }
    if let Some(path) = &cli.transcript_log {
        config.logging.transcript_log = Some(path.display().to_string());
    }
    config.validate()?;

    // === Dependency Injection ===
    let gateway: Arc<dyn AgentGateway> = match config.backend.kind {
        BackendKind::Scripted => {
            Arc::new(ScriptedAgentGateway::new(config.backend.flag_threshold))
        }
        BackendKind::Azure => {
            let instructions = InstructionSet::from_overrides(&config.agents)?;
            Arc::new(AzureAgentGateway::from_config(&config.backend, instructions)?)
        }
    };

    // Ctrl-C cancels the in-flight exchange, keeping the transcript intact
    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
    }

    let mut use_case = RunExchangeUseCase::new(gateway).with_cancellation(token);

    if let Some(path) = &config.logging.transcript_log {
        match JsonlTranscriptLogger::new(path) {
            Some(logger) => use_case = use_case.with_transcript_logger(Arc::new(logger)),
            None => bail!("Could not open transcript log at {}", path),
        }
    }

    let behavior = BehaviorConfig::from_timeout_seconds(config.backend.timeout_seconds);

    // Batch mode
    if let Some(batch_path) = &cli.batch {
        let raw = std::fs::read_to_string(batch_path)
            .with_context(|| format!("Could not read batch file {}", batch_path.display()))?;
        let transactions: Vec<Transaction> = serde_json::from_str(&raw)
            .with_context(|| format!("Could not parse batch file {}", batch_path.display()))?;
        let ids: Vec<String> = transactions
            .iter()
            .map(|t| t.transaction_id.clone())
            .collect();

        let results = RunBatchUseCase::new(use_case)
            .execute(transactions, behavior, &NoExchangeProgress)
            .await;

        output::print_batch(&ids, &results);

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            bail!("{} of {} exchanges failed", failed, results.len());
        }
        return Ok(());
    }

    // Single transaction mode
    let mut transaction = Transaction::new(cli.id, cli.amount, cli.location, cli.merchant)
        .with_currency(cli.currency);
    if cli.flagged {
        transaction = transaction.flagged();
    }

    let input = RunExchangeInput::new(transaction).with_behavior(behavior);
    let result = if cli.quiet {
        use_case.execute(input, &NoExchangeProgress).await
    } else {
        use_case.execute(input, &ConsoleProgress).await
    };

    match result {
        Ok(exchange) => {
            output::print_risk(&exchange.risk);
            Ok(())
        }
        Err(error) => {
            if let Some(transcript) = error.transcript_so_far() {
                output::print_partial_transcript(transcript);
            }
            Err(error.into())
        }
    }
}
