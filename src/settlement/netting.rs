use crate::core::matrix::ObligationMatrix;
use rust_decimal::Decimal;
use serde::Serialize;

/// Summary of a bilateral netting pass.
#[derive(Debug, Clone, Serialize)]
pub struct NettingReport {
    /// Gross total of all obligations before netting.
    pub gross_before: Decimal,
    /// Gross total after netting.
    pub gross_after: Decimal,
}

impl NettingReport {
    /// Absolute amount removed by offsetting mutual debts.
    pub fn savings(&self) -> Decimal {
        self.gross_before - self.gross_after
    }

    /// Savings as a percentage of the gross total.
    pub fn savings_percent(&self) -> f64 {
        if self.gross_before == Decimal::ZERO {
            return 0.0;
        }
        let pct = self.savings() * Decimal::from(100) / self.gross_before;
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

impl std::fmt::Display for NettingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Bilateral Netting ===")?;
        writeln!(f, "Gross Before: {}", self.gross_before)?;
        writeln!(f, "Gross After:  {}", self.gross_after)?;
        writeln!(f, "Savings:      {}", self.savings())?;
        writeln!(f, "Savings %:    {:.1}%", self.savings_percent())?;
        Ok(())
    }
}

/// Collapse every pair's mutual debts into a single directed debt.
///
/// For each unordered pair `(i, j)` with `i < j`, the two gross entries are
/// replaced by their difference: the side that nets positive keeps the
/// difference, the other side goes to zero. A perfectly offset pair zeroes
/// both entries. The input is never mutated.
///
/// After netting, at most one of `out[i][j]` and `out[j][i]` is non-zero for
/// every pair. Each participant's net balance is unchanged: the transform
/// only redistributes a pair's two entries into their difference, which
/// leaves the row-sum-minus-column-sum contribution of that pair intact.
///
/// Negative entries are a caller contract violation and are carried through
/// the arithmetic undefined; use [`ObligationMatrix::validate`] to reject
/// them up front.
pub fn net_bilateral_payments(matrix: &ObligationMatrix) -> ObligationMatrix {
    let mut netted = matrix.clone();
    let n = netted.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let diff = netted.amount(i, j) - netted.amount(j, i);
            if diff > Decimal::ZERO {
                netted.set_amount(i, j, diff);
                netted.set_amount(j, i, Decimal::ZERO);
            } else {
                // Also zeroes both sides when the pair offsets exactly.
                netted.set_amount(j, i, -diff);
                netted.set_amount(i, j, Decimal::ZERO);
            }
        }
    }

    netted
}

/// Bilateral netting plus a before/after summary.
pub fn net_with_report(matrix: &ObligationMatrix) -> (ObligationMatrix, NettingReport) {
    let netted = net_bilateral_payments(matrix);
    let report = NettingReport {
        gross_before: matrix.gross_total(),
        gross_after: netted.gross_total(),
    };
    (netted, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pair_nets_to_difference() {
        let matrix = ObligationMatrix::from_rows(vec![
            vec![dec!(0), dec!(100)],
            vec![dec!(60), dec!(0)],
        ])
        .unwrap();

        let netted = net_bilateral_payments(&matrix);
        assert_eq!(netted.amount(0, 1), dec!(40));
        assert_eq!(netted.amount(1, 0), dec!(0));
    }

    #[test]
    fn test_exact_offset_zeroes_both_sides() {
        let matrix = ObligationMatrix::from_rows(vec![
            vec![dec!(0), dec!(75)],
            vec![dec!(75), dec!(0)],
        ])
        .unwrap();

        let netted = net_bilateral_payments(&matrix);
        assert_eq!(netted.amount(0, 1), dec!(0));
        assert_eq!(netted.amount(1, 0), dec!(0));
    }

    #[test]
    fn test_mutual_exclusivity() {
        let matrix = ObligationMatrix::from_rows(vec![
            vec![dec!(0), dec!(100), dec!(50), dec!(0)],
            vec![dec!(20), dec!(0), dec!(30), dec!(80)],
            vec![dec!(40), dec!(0), dec!(0), dec!(20)],
            vec![dec!(10), dec!(10), dec!(0), dec!(0)],
        ])
        .unwrap();

        let netted = net_bilateral_payments(&matrix);
        for i in 0..netted.len() {
            for j in 0..netted.len() {
                if i != j {
                    assert!(
                        netted.amount(i, j) == dec!(0) || netted.amount(j, i) == dec!(0),
                        "both directions positive for pair ({i}, {j})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_balances_preserved() {
        let matrix = ObligationMatrix::from_rows(vec![
            vec![dec!(0), dec!(100), dec!(50), dec!(0)],
            vec![dec!(20), dec!(0), dec!(30), dec!(80)],
            vec![dec!(40), dec!(0), dec!(0), dec!(20)],
            vec![dec!(10), dec!(10), dec!(0), dec!(0)],
        ])
        .unwrap();

        let netted = net_bilateral_payments(&matrix);
        assert_eq!(netted.balances(), matrix.balances());
    }

    #[test]
    fn test_input_not_mutated() {
        let matrix = ObligationMatrix::from_rows(vec![
            vec![dec!(0), dec!(100)],
            vec![dec!(60), dec!(0)],
        ])
        .unwrap();
        let before = matrix.clone();

        let _ = net_bilateral_payments(&matrix);
        assert_eq!(matrix, before);
    }

    #[test]
    fn test_report_savings() {
        let matrix = ObligationMatrix::from_rows(vec![
            vec![dec!(0), dec!(100)],
            vec![dec!(60), dec!(0)],
        ])
        .unwrap();

        let (_, report) = net_with_report(&matrix);
        assert_eq!(report.gross_before, dec!(160));
        assert_eq!(report.gross_after, dec!(40));
        assert_eq!(report.savings(), dec!(120));
        assert_relative_eq!(report.savings_percent(), 75.0, epsilon = 0.01);
    }

    #[test]
    fn test_empty_matrix_report() {
        let (netted, report) = net_with_report(&ObligationMatrix::from_rows(Vec::new()).unwrap());
        assert!(netted.is_empty());
        assert_eq!(report.savings_percent(), 0.0);
    }
}
