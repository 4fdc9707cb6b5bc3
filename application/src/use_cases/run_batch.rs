//! Run Batch use case — independent exchanges in parallel.
//!
//! Each transaction gets its own driver iteration with an exclusive
//! transcript, so exchanges share nothing and need no locking. Within one
//! exchange the single-flight rule still holds; only *across* transactions
//! does work overlap.

use crate::config::BehaviorConfig;
use crate::ports::progress::ExchangeProgressNotifier;
use crate::use_cases::run_exchange::{
    RunExchangeError, RunExchangeInput, RunExchangeOutput, RunExchangeUseCase,
};
use tracing::info;
use triage_domain::Transaction;

/// Use case for triaging a batch of transactions concurrently.
#[derive(Clone)]
pub struct RunBatchUseCase {
    exchange: RunExchangeUseCase,
}

impl RunBatchUseCase {
    pub fn new(exchange: RunExchangeUseCase) -> Self {
        Self { exchange }
    }

    /// Run one exchange per transaction, all in flight at once.
    ///
    /// Results come back in input order, one per transaction; a failed
    /// exchange does not disturb its neighbors.
    pub async fn execute(
        &self,
        transactions: Vec<Transaction>,
        behavior: BehaviorConfig,
        progress: &dyn ExchangeProgressNotifier,
    ) -> Vec<Result<RunExchangeOutput, RunExchangeError>> {
        info!("Starting batch of {} exchanges", transactions.len());

        let futures = transactions.into_iter().map(|transaction| {
            let input = RunExchangeInput::new(transaction).with_behavior(behavior.clone());
            self.exchange.execute(input, progress)
        });

        let results = futures::future::join_all(futures).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            "Batch complete: {} succeeded, {} failed",
            results.len() - failed,
            failed
        );
        results
    }
}
