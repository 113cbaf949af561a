use crate::core::matrix::ObligationMatrix;
use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;

/// The directed settlement graph derived from an obligation matrix.
///
/// There is an edge `i → j` exactly when `i ≠ j` and `matrix[i][j] > 0`.
/// Outgoing edges are stored in increasing target order and participants are
/// enumerated in increasing index order; the cycle finder's notion of "first
/// cycle" depends on this ordering, so it must stay stable.
///
/// The graph is ephemeral: the resolver rebuilds it from the current matrix
/// on every iteration instead of patching it in place. Incremental updates
/// would risk reordering edges and silently changing which cycle is cancelled
/// first.
#[derive(Debug, Clone)]
pub struct DebtGraph {
    adjacency: Vec<Vec<(ParticipantId, Decimal)>>,
}

impl DebtGraph {
    /// Build the graph of strictly positive obligations.
    ///
    /// Self-loops are excluded unconditionally. A matrix with a non-zero
    /// diagonal violates the caller contract, but it must never surface here
    /// as a trivial one-node cycle.
    pub fn build(matrix: &ObligationMatrix) -> Self {
        let n = matrix.len();
        let mut adjacency: Vec<Vec<(ParticipantId, Decimal)>> = vec![Vec::new(); n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let amount = matrix.amount(i, j);
                if amount > Decimal::ZERO {
                    adjacency[i].push((ParticipantId::new(j), amount));
                }
            }
        }
        Self { adjacency }
    }

    /// Number of participants (nodes), including those without edges.
    pub fn participant_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Outgoing edges of a participant as `(creditor, amount)` pairs,
    /// in increasing creditor order.
    pub fn outgoing(&self, participant: ParticipantId) -> &[(ParticipantId, Decimal)] {
        &self.adjacency[participant.index()]
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Whether any obligation remains.
    pub fn has_edges(&self) -> bool {
        self.adjacency.iter().any(|out| !out.is_empty())
    }
}
