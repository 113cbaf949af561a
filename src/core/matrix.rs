use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors arising from obligation matrix construction and validation.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("obligation matrix must be square: got {rows} rows but a row with {cols} columns")]
    NotSquare { rows: usize, cols: usize },
    #[error("negative amount {amount} owed from {from} to {to}")]
    NegativeAmount {
        from: ParticipantId,
        to: ParticipantId,
        amount: Decimal,
    },
    #[error("participant {participant} owes itself {amount}")]
    SelfDebt {
        participant: ParticipantId,
        amount: Decimal,
    },
}

/// A square matrix of gross payment obligations.
///
/// `amount(i, j)` is what participant `i` owes participant `j`. By convention
/// all entries are non-negative and the diagonal is zero; squareness is the
/// only condition checked at construction, the rest can be enforced with
/// [`ObligationMatrix::validate`].
///
/// The matrix is the single input and output of both settlement transforms.
/// Transforms clone it on entry and return a new matrix; a caller's instance
/// is never mutated.
///
/// # Examples
///
/// ```
/// use settlement_planner::core::matrix::ObligationMatrix;
/// use rust_decimal_macros::dec;
///
/// let matrix = ObligationMatrix::from_rows(vec![
///     vec![dec!(0), dec!(100)],
///     vec![dec!(60), dec!(0)],
/// ]).unwrap();
///
/// assert_eq!(matrix.amount(0, 1), dec!(100));
/// assert_eq!(matrix.balance(0), dec!(40)); // owes 100, owed 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObligationMatrix {
    /// Row-major amounts; `cells[i][j]` is what `i` owes `j`.
    cells: Vec<Vec<Decimal>>,
}

impl ObligationMatrix {
    /// Build a matrix from row-major amounts.
    ///
    /// Fails with [`MatrixError::NotSquare`] if any row length differs from
    /// the row count. Nothing else is checked here; see
    /// [`validate`](Self::validate) for the strict checks.
    pub fn from_rows(rows: Vec<Vec<Decimal>>) -> Result<Self, MatrixError> {
        let n = rows.len();
        for row in &rows {
            if row.len() != n {
                return Err(MatrixError::NotSquare {
                    rows: n,
                    cols: row.len(),
                });
            }
        }
        Ok(Self { cells: rows })
    }

    /// An all-zero matrix for `n` participants.
    pub fn zeros(n: usize) -> Self {
        Self {
            cells: vec![vec![Decimal::ZERO; n]; n],
        }
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All participant ids, in increasing index order.
    pub fn participants(&self) -> impl Iterator<Item = ParticipantId> {
        (0..self.len()).map(ParticipantId::new)
    }

    /// Amount owed from participant `from` to participant `to`.
    pub fn amount(&self, from: usize, to: usize) -> Decimal {
        self.cells[from][to]
    }

    /// Overwrite a single obligation.
    pub fn set_amount(&mut self, from: usize, to: usize, amount: Decimal) {
        self.cells[from][to] = amount;
    }

    /// Net balance of a participant: total owed out minus total owed in.
    ///
    /// Positive means the participant must pay on net; negative means they
    /// receive on net. Both settlement transforms preserve this quantity for
    /// every participant — it is the correctness criterion of the planner.
    pub fn balance(&self, participant: usize) -> Decimal {
        let owed_out: Decimal = self.cells[participant].iter().sum();
        let owed_in: Decimal = self.cells.iter().map(|row| row[participant]).sum();
        owed_out - owed_in
    }

    /// Net balances of all participants, indexed by participant.
    pub fn balances(&self) -> Vec<Decimal> {
        (0..self.len()).map(|p| self.balance(p)).collect()
    }

    /// Sum of all obligations.
    pub fn gross_total(&self) -> Decimal {
        self.cells.iter().flatten().copied().sum()
    }

    /// Number of strictly positive entries.
    pub fn positive_entries(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|a| **a > Decimal::ZERO)
            .count()
    }

    /// Row-major view of the amounts.
    pub fn rows(&self) -> &[Vec<Decimal>] {
        &self.cells
    }

    /// Strict validation: rejects negative entries and non-zero diagonal.
    ///
    /// The transforms themselves tolerate such input (a caller contract
    /// violation with undefined results); callers that ingest external data
    /// should validate first.
    pub fn validate(&self) -> Result<(), MatrixError> {
        for i in 0..self.len() {
            for j in 0..self.len() {
                let amount = self.cells[i][j];
                if amount < Decimal::ZERO {
                    return Err(MatrixError::NegativeAmount {
                        from: ParticipantId::new(i),
                        to: ParticipantId::new(j),
                        amount,
                    });
                }
                if i == j && amount != Decimal::ZERO {
                    return Err(MatrixError::SelfDebt {
                        participant: ParticipantId::new(i),
                        amount,
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ObligationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let formatted: Vec<String> = row.iter().map(|a| format!("{:>10}", a)).collect();
            writeln!(f, "{}", formatted.join(" "))?;
        }
        Ok(())
    }
}
