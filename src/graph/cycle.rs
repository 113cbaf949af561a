use crate::core::matrix::ObligationMatrix;
use crate::core::participant::ParticipantId;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;

/// A directed cycle in the settlement graph — a circular chain of debt
/// that can be cancelled without changing any participant's net balance.
///
/// Stored as a closed walk `[p0, p1, …, pk, p0]` with `k ≥ 1`; every
/// consecutive pair is an edge of the graph the cycle was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePath {
    nodes: Vec<ParticipantId>,
}

impl CyclePath {
    /// The closed walk, first node repeated at the end.
    pub fn nodes(&self) -> &[ParticipantId] {
        &self.nodes
    }

    /// Number of edges (equals the number of distinct participants).
    pub fn edge_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// The consecutive `(debtor, creditor)` pairs along the walk,
    /// closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (ParticipantId, ParticipantId)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// The minimum obligation along the cycle — the amount that can be
    /// subtracted from every edge while keeping all entries non-negative.
    pub fn bottleneck(&self, matrix: &ObligationMatrix) -> Decimal {
        self.edges()
            .map(|(from, to)| matrix.amount(from.index(), to.index()))
            .min()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Find one directed cycle in the graph, or `None` if it is acyclic.
///
/// Candidate start nodes are tried in increasing index order (nodes without
/// outgoing edges are skipped) and each node's outgoing edges in the graph's
/// stored order, so the cycle returned is fully determined by the matrix
/// contents. The resolver cancels one cycle per iteration and which cycle
/// goes first decides every intermediate matrix; a non-deterministic choice
/// here would make results unreproducible.
///
/// The search stops at the first cycle found; enumerating all cycles would
/// be wasted work since the resolver rebuilds the graph after each
/// cancellation anyway.
pub fn find_cycle(graph: &DebtGraph) -> Option<CyclePath> {
    let n = graph.participant_count();
    for start in (0..n).map(ParticipantId::new) {
        if graph.outgoing(start).is_empty() {
            continue;
        }
        let mut path: Vec<ParticipantId> = Vec::new();
        // Visited set is scoped to this start-node attempt.
        let mut visited = vec![false; n];
        if dfs(graph, start, start, &mut path, &mut visited) {
            path.push(start);
            return Some(CyclePath { nodes: path });
        }
    }
    None
}

/// Depth-first search for a walk from `current` back to `start`.
///
/// On success `path` holds `[start, …, current]`; on failure the node is
/// popped again (backtracking) and `path` is left as it was. Recursion depth
/// is bounded by the number of participants, which is fine for the small
/// closed groups this planner targets.
fn dfs(
    graph: &DebtGraph,
    start: ParticipantId,
    current: ParticipantId,
    path: &mut Vec<ParticipantId>,
    visited: &mut [bool],
) -> bool {
    path.push(current);
    visited[current.index()] = true;

    for &(next, _amount) in graph.outgoing(current) {
        if next == start {
            return true;
        }
        if !visited[next.index()] && dfs(graph, start, next, path, visited) {
            return true;
        }
    }

    path.pop();
    visited[current.index()] = false;
    false
}
