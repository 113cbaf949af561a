//! Random obligation matrix generation.
//!
//! Produces dense random debt networks for stress testing the settlement
//! pipeline and for the `generate` CLI command.

use crate::core::matrix::ObligationMatrix;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random obligation matrix.
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// Number of participants.
    pub participants: usize,
    /// Probability that any given off-diagonal entry is non-zero.
    pub density: f64,
    /// Minimum obligation amount.
    pub min_amount: Decimal,
    /// Maximum obligation amount.
    pub max_amount: Decimal,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            participants: 10,
            density: 0.4,
            min_amount: Decimal::from(10),
            max_amount: Decimal::from(10_000),
        }
    }
}

/// Generate a random obligation matrix for testing.
///
/// The diagonal is always zero and every entry is non-negative, so the
/// result satisfies [`ObligationMatrix::validate`].
pub fn generate_random_matrix(config: &MatrixConfig) -> ObligationMatrix {
    let mut rng = rand::thread_rng();
    let mut matrix = ObligationMatrix::zeros(config.participants);

    let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(10.0);
    let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(10_000.0);

    for i in 0..config.participants {
        for j in 0..config.participants {
            if i == j || !rng.gen_bool(config.density.clamp(0.0, 1.0)) {
                continue;
            }
            let amount_f64 = rng.gen_range(min_f64..max_f64);
            let amount = Decimal::from_f64_retain(amount_f64)
                .unwrap_or(Decimal::from(10))
                .round_dp(2);
            if amount > Decimal::ZERO {
                matrix.set_amount(i, j, amount);
            }
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::netting::net_bilateral_payments;
    use crate::settlement::resolver::simplify_settlement_graph;

    #[test]
    fn test_generated_matrix_is_valid() {
        let config = MatrixConfig {
            participants: 8,
            density: 0.5,
            ..Default::default()
        };

        let matrix = generate_random_matrix(&config);
        assert_eq!(matrix.len(), 8);
        assert!(matrix.validate().is_ok());
    }

    #[test]
    fn test_generated_matrix_survives_pipeline() {
        let config = MatrixConfig {
            participants: 12,
            density: 0.6,
            ..Default::default()
        };

        let matrix = generate_random_matrix(&config);
        let netted = net_bilateral_payments(&matrix);
        let simplified = simplify_settlement_graph(&netted);

        assert_eq!(simplified.balances(), matrix.balances());
        assert!(simplified.gross_total() <= matrix.gross_total());
    }
}
