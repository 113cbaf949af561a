use crate::core::matrix::ObligationMatrix;
use crate::graph::cycle::find_cycle;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;
use serde::Serialize;

/// Summary of a cycle-resolution pass.
#[derive(Debug, Clone, Serialize)]
pub struct SimplificationReport {
    /// Gross total before simplification.
    pub gross_before: Decimal,
    /// Gross total after simplification.
    pub gross_after: Decimal,
    /// Number of cycles cancelled.
    pub cycles_cancelled: usize,
    /// Total amount subtracted across all cycle edges.
    pub total_cancelled: Decimal,
}

impl SimplificationReport {
    pub fn savings(&self) -> Decimal {
        self.gross_before - self.gross_after
    }
}

impl std::fmt::Display for SimplificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Cycle Resolution ===")?;
        writeln!(f, "Gross Before:     {}", self.gross_before)?;
        writeln!(f, "Gross After:      {}", self.gross_after)?;
        writeln!(f, "Cycles Cancelled: {}", self.cycles_cancelled)?;
        writeln!(f, "Total Cancelled:  {}", self.total_cancelled)?;
        Ok(())
    }
}

/// Eliminate all circular debt from the matrix.
///
/// Repeatedly rebuilds the settlement graph, finds one cycle, and subtracts
/// the cycle's bottleneck (its minimum edge) from every edge along it, until
/// no cycle remains. The result is an acyclic routing of the same net
/// positions: no participant pays money that flows back to them indirectly.
///
/// Each pass drops the cycle's minimum edge to exactly zero and never raises
/// any entry, so the number of strictly positive entries shrinks by at least
/// one per pass and the loop ends after at most `n * (n - 1)` iterations.
///
/// Cancelling a cycle leaves every balance unchanged: each participant on
/// the cycle has exactly one incoming and one outgoing cycle edge, both
/// reduced by the same amount; everyone else is untouched.
///
/// Idempotent — running it on its own output is a no-op, since the output
/// graph has no cycle to find.
pub fn simplify_settlement_graph(matrix: &ObligationMatrix) -> ObligationMatrix {
    simplify_with_report(matrix).0
}

/// Cycle resolution plus a summary of what was cancelled.
pub fn simplify_with_report(matrix: &ObligationMatrix) -> (ObligationMatrix, SimplificationReport) {
    let mut simplified = matrix.clone();
    let mut cycles_cancelled = 0usize;
    let mut total_cancelled = Decimal::ZERO;

    loop {
        // Rebuilt from scratch each pass; see DebtGraph on why not incremental.
        let graph = DebtGraph::build(&simplified);
        if !graph.has_edges() {
            break;
        }
        let Some(cycle) = find_cycle(&graph) else {
            // Remaining graph is acyclic; nothing left to simplify.
            break;
        };

        let bottleneck = cycle.bottleneck(&simplified);
        log::debug!(
            "cancelling cycle {:?} (bottleneck {})",
            cycle.nodes(),
            bottleneck
        );

        for (from, to) in cycle.edges() {
            let remaining = simplified.amount(from.index(), to.index()) - bottleneck;
            simplified.set_amount(from.index(), to.index(), remaining);
        }

        cycles_cancelled += 1;
        total_cancelled += bottleneck * Decimal::from(cycle.edge_count());
    }

    let report = SimplificationReport {
        gross_before: matrix.gross_total(),
        gross_after: simplified.gross_total(),
        cycles_cancelled,
        total_cancelled,
    };
    log::debug!(
        "simplification done: {} cycles, gross {} -> {}",
        report.cycles_cancelled,
        report.gross_before,
        report.gross_after
    );
    (simplified, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn matrix(rows: Vec<Vec<Decimal>>) -> ObligationMatrix {
        ObligationMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_perfect_cycle_cancels_to_zero() {
        let input = matrix(vec![
            vec![dec!(0), dec!(100), dec!(0)],
            vec![dec!(0), dec!(0), dec!(100)],
            vec![dec!(100), dec!(0), dec!(0)],
        ]);

        let (simplified, report) = simplify_with_report(&input);
        assert_eq!(simplified, ObligationMatrix::zeros(3));
        assert_eq!(report.cycles_cancelled, 1);
        assert_eq!(report.total_cancelled, dec!(300));
    }

    #[test]
    fn test_partial_cycle_leaves_residue() {
        // 0 -> 1: 100, 1 -> 2: 30, 2 -> 0: 40. The bottleneck of 30 cancels
        // the cycle, leaving 0 -> 1: 70 and 2 -> 0: 10, which is acyclic.
        let input = matrix(vec![
            vec![dec!(0), dec!(100), dec!(0)],
            vec![dec!(0), dec!(0), dec!(30)],
            vec![dec!(40), dec!(0), dec!(0)],
        ]);

        let simplified = simplify_settlement_graph(&input);
        assert_eq!(simplified.balances(), input.balances());
        assert!(find_cycle(&DebtGraph::build(&simplified)).is_none());
    }

    #[test]
    fn test_acyclic_input_unchanged() {
        let input = matrix(vec![
            vec![dec!(0), dec!(80), dec!(10)],
            vec![dec!(0), dec!(0), dec!(70)],
            vec![dec!(0), dec!(0), dec!(0)],
        ]);

        let (simplified, report) = simplify_with_report(&input);
        assert_eq!(simplified, input);
        assert_eq!(report.cycles_cancelled, 0);
        assert_eq!(report.savings(), dec!(0));
    }

    #[test]
    fn test_balances_preserved() {
        let input = matrix(vec![
            vec![dec!(0), dec!(80), dec!(10), dec!(0)],
            vec![dec!(0), dec!(0), dec!(30), dec!(70)],
            vec![dec!(0), dec!(0), dec!(0), dec!(20)],
            vec![dec!(10), dec!(0), dec!(0), dec!(0)],
        ]);

        let simplified = simplify_settlement_graph(&input);
        assert_eq!(simplified.balances(), input.balances());
    }

    #[test]
    fn test_idempotent() {
        let input = matrix(vec![
            vec![dec!(0), dec!(80), dec!(10), dec!(0)],
            vec![dec!(0), dec!(0), dec!(30), dec!(70)],
            vec![dec!(0), dec!(0), dec!(0), dec!(20)],
            vec![dec!(10), dec!(0), dec!(0), dec!(0)],
        ]);

        let once = simplify_settlement_graph(&input);
        let twice = simplify_settlement_graph(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_output_bounded_by_input() {
        let input = matrix(vec![
            vec![dec!(0), dec!(80), dec!(10), dec!(0)],
            vec![dec!(0), dec!(0), dec!(30), dec!(70)],
            vec![dec!(0), dec!(0), dec!(0), dec!(20)],
            vec![dec!(10), dec!(0), dec!(0), dec!(0)],
        ]);

        let simplified = simplify_settlement_graph(&input);
        for i in 0..input.len() {
            for j in 0..input.len() {
                assert!(simplified.amount(i, j) >= dec!(0));
                assert!(simplified.amount(i, j) <= input.amount(i, j));
            }
        }
    }

    #[test]
    fn test_empty_matrix() {
        let (simplified, report) =
            simplify_with_report(&ObligationMatrix::from_rows(Vec::new()).unwrap());
        assert!(simplified.is_empty());
        assert_eq!(report.cycles_cancelled, 0);
    }
}
