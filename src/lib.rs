//! # settlement-planner
//!
//! Minimal settlement planning for a closed group of participants.
//!
//! Given a square matrix of gross bilateral obligations, the planner reduces
//! it to the fewest/smallest payments that realize the same net position for
//! every participant:
//!
//! 1. **Bilateral netting** — each pair's mutual debts collapse into a single
//!    directed debt (or none).
//! 2. **Cycle elimination** — circular debt chains (A owes B owes C owes A)
//!    are cancelled by subtracting each cycle's bottleneck until the
//!    settlement graph is acyclic.
//!
//! Both transforms preserve every participant's net balance (total owed out
//! minus total owed in); only the routing of payments changes.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: the obligation matrix, participant ids
//! - **graph** — Settlement graph construction and cycle detection
//! - **settlement** — Bilateral netting and the cycle-resolution loop
//! - **simulation** — Random matrix generation for testing and benchmarks

pub mod core;
pub mod graph;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::matrix::{MatrixError, ObligationMatrix};
    pub use crate::core::participant::ParticipantId;
    pub use crate::graph::cycle::{find_cycle, CyclePath};
    pub use crate::graph::debt_graph::DebtGraph;
    pub use crate::settlement::netting::{net_bilateral_payments, NettingReport};
    pub use crate::settlement::resolver::{simplify_settlement_graph, SimplificationReport};
}
