//! Turn routing: who speaks next, and when the exchange ends
//!
//! Routing is split into two pluggable strategies, both pure functions of
//! the transcript and the transaction:
//!
//! - [`SelectionStrategy`](strategy::SelectionStrategy) picks the next role
//!   (or declares the exchange complete)
//! - [`TerminationStrategy`](strategy::TerminationStrategy) decides whether
//!   the exchange is finished
//!
//! Decisions are derived, never stored — the driver recomputes them from the
//! transcript each iteration, which is what makes an exchange replayable.

pub mod decision;
pub mod selection;
pub mod strategy;
pub mod termination;
