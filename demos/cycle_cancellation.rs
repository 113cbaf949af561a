//! Trilateral debt-cycle cancellation example.
//!
//! Shows how a circular chain of debt (A owes B owes C owes A) is detected
//! and reduced by its bottleneck without changing anyone's net balance.

use rust_decimal_macros::dec;
use settlement_planner::core::matrix::ObligationMatrix;
use settlement_planner::graph::cycle::find_cycle;
use settlement_planner::graph::debt_graph::DebtGraph;
use settlement_planner::settlement::resolver::simplify_with_report;

fn main() {
    println!("╔═════════════════════════════════════════════╗");
    println!("║  settlement-planner: Cycle Cancellation     ║");
    println!("╚═════════════════════════════════════════════╝\n");

    println!("Debts:");
    println!("  A → B: 100");
    println!("  B → C: 80");
    println!("  C → A: 120\n");

    let matrix = ObligationMatrix::from_rows(vec![
        vec![dec!(0), dec!(100), dec!(0)],
        vec![dec!(0), dec!(0), dec!(80)],
        vec![dec!(120), dec!(0), dec!(0)],
    ])
    .expect("matrix is square");

    let graph = DebtGraph::build(&matrix);
    match find_cycle(&graph) {
        Some(cycle) => {
            let nodes: Vec<String> = cycle.nodes().iter().map(|p| p.to_string()).collect();
            println!("Cycle found: {}", nodes.join(" → "));
            println!("Bottleneck:  {}\n", cycle.bottleneck(&matrix));
        }
        None => println!("No cycle found.\n"),
    }

    let (simplified, report) = simplify_with_report(&matrix);
    println!("{}", report);

    println!("Remaining payments:");
    for i in 0..simplified.len() {
        for j in 0..simplified.len() {
            let amount = simplified.amount(i, j);
            if amount > dec!(0) {
                println!("  {} → {}: {}", i, j, amount);
            }
        }
    }

    println!("\nBalances before: {:?}", matrix.balances());
    println!("Balances after:  {:?}", simplified.balances());
}
