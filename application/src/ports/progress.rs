//! Progress notification port

use triage_domain::{AgentRole, Transaction, Transcript, Turn};

/// Callback for progress updates while an exchange runs
///
/// Implemented by the presentation side (console printer, test probes).
/// All methods have empty defaults so implementations only override what
/// they care about.
pub trait ExchangeProgressNotifier: Send + Sync {
    /// Called once before the first turn
    fn on_exchange_start(&self, _transaction: &Transaction) {}

    /// Called when a role has been selected and is about to be invoked
    fn on_turn_start(&self, _role: AgentRole) {}

    /// Called as a finished turn is appended to the transcript
    fn on_turn_complete(&self, _turn: &Turn) {}

    /// Called once the exchange has terminated
    fn on_exchange_complete(&self, _transcript: &Transcript) {}
}

/// No-op progress notifier
pub struct NoExchangeProgress;

impl ExchangeProgressNotifier for NoExchangeProgress {}
