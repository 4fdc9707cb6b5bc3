//! Routing strategy traits
//!
//! Different strategies can be plugged in to change how an exchange is
//! routed. Both traits are deliberately synchronous and infallible: a
//! routing decision must be a deterministic, total function of its inputs.
//! Strategies hold no mutable state — calling one twice with identical
//! inputs yields identical output. Malformed transcript states (a caller
//! violating the append-only ordering between iterations) must degrade to a
//! terminal decision rather than panic, so the driver can never livelock on
//! unexpected input.

use crate::conversation::transcript::Transcript;
use crate::routing::decision::RoutingDecision;
use crate::transaction::entities::Transaction;

/// Decides which role acts next given the transcript so far
pub trait SelectionStrategy: Send + Sync {
    fn select_next(&self, transcript: &Transcript, transaction: &Transaction) -> RoutingDecision;
}

/// Decides whether the exchange is finished
///
/// Implementations must be monotonic under append: once an implementation
/// returns `true` for a transcript, it must return `true` for every
/// extension of that transcript.
pub trait TerminationStrategy: Send + Sync {
    fn should_terminate(&self, transcript: &Transcript, transaction: &Transaction) -> bool;
}
