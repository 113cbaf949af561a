//! Four-participant settlement planning walkthrough.
//!
//! Nets bilateral debts between Alice, Bob, Carol and David, then cancels
//! the remaining debt cycle, printing the matrix at every stage.

use rust_decimal_macros::dec;
use settlement_planner::core::matrix::ObligationMatrix;
use settlement_planner::settlement::netting::net_with_report;
use settlement_planner::settlement::resolver::simplify_with_report;

fn print_matrix(matrix: &ObligationMatrix, labels: &[&str]) {
    print!("{:>8}", "");
    for label in labels {
        print!("{:>8}", label);
    }
    println!();
    for (i, row) in matrix.rows().iter().enumerate() {
        print!("{:<8}", labels[i]);
        for amount in row {
            print!("{:>8}", amount);
        }
        println!();
    }
    println!();
}

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  settlement-planner: Four-Party Walkthrough  ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let labels = ["Alice", "Bob", "Carol", "David"];

    let initial = ObligationMatrix::from_rows(vec![
        vec![dec!(0), dec!(100), dec!(50), dec!(0)],
        vec![dec!(20), dec!(0), dec!(30), dec!(80)],
        vec![dec!(40), dec!(0), dec!(0), dec!(20)],
        vec![dec!(10), dec!(10), dec!(0), dec!(0)],
    ])
    .expect("matrix is square");

    println!("--- 1. Initial Debt Matrix ---");
    print_matrix(&initial, &labels);

    let (netted, netting_report) = net_with_report(&initial);
    println!("--- 2. Net Bilateral Debts ---");
    print_matrix(&netted, &labels);
    println!("{}", netting_report);

    let (simplified, cycle_report) = simplify_with_report(&netted);
    println!("--- 3. Final Settlement Plan ---");
    print_matrix(&simplified, &labels);
    println!("{}", cycle_report);

    println!("--- Summary of Final Payments ---");
    for i in 0..simplified.len() {
        for j in 0..simplified.len() {
            let amount = simplified.amount(i, j);
            if amount > dec!(0) {
                println!("{} pays {}: {}", labels[i], labels[j], amount);
            }
        }
    }

    println!("\n--- Net Balances (unchanged at every stage) ---");
    for (i, balance) in simplified.balances().iter().enumerate() {
        println!("{:<8} {:>6}", labels[i], balance);
    }
}
