//! settlement-planner CLI
//!
//! Compute minimal settlement plans from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Full pipeline: bilateral netting, then cycle elimination
//! settlement-planner plan --input debts.json
//!
//! # Individual stages
//! settlement-planner net --input debts.json
//! settlement-planner simplify --input debts.json --format json
//!
//! # Generate a random debt network for testing
//! settlement-planner generate --participants 10 --density 0.4
//! ```

use rust_decimal::Decimal;
use settlement_planner::core::matrix::ObligationMatrix;
use settlement_planner::settlement::netting::net_with_report;
use settlement_planner::settlement::resolver::simplify_with_report;
use settlement_planner::simulation::random::{generate_random_matrix, MatrixConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"settlement-planner — minimal settlement planning for closed groups

USAGE:
    settlement-planner <COMMAND> [OPTIONS]

COMMANDS:
    plan        Net bilateral debts, then eliminate debt cycles
    net         Bilateral netting only
    simplify    Cycle elimination only
    generate    Generate a random debt matrix (for testing)
    help        Show this message

OPTIONS (plan, net, simplify):
    --input <FILE>      Path to JSON debts file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --participants <N>  Number of participants (default: 10)
    --density <F>       Probability of a debt per pair, 0..1 (default: 0.4)
    --max-amount <X>    Maximum debt amount (default: 10000)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    settlement-planner plan --input debts.json
    settlement-planner net --input debts.json --format json
    settlement-planner generate --participants 6 --density 0.5 --output test.json"#
    );
}

/// JSON schema for input debts.
#[derive(serde::Deserialize)]
struct DebtsFile {
    /// Optional display labels; defaults to P0, P1, … when absent or short.
    #[serde(default)]
    participants: Vec<String>,
    /// Row-major amounts; `matrix[i][j]` is what participant i owes j.
    matrix: Vec<Vec<Decimal>>,
}

/// JSON output schema for a settlement plan.
#[derive(serde::Serialize)]
struct PlanOutput {
    matrix: ObligationMatrix,
    payments: Vec<PaymentOutput>,
    balances: Vec<BalanceOutput>,
    gross_before: String,
    gross_after: String,
}

#[derive(serde::Serialize)]
struct PaymentOutput {
    from: String,
    to: String,
    amount: String,
}

#[derive(serde::Serialize)]
struct BalanceOutput {
    participant: String,
    balance: String,
    status: String,
}

fn load_debts(path: &str) -> (Vec<String>, ObligationMatrix) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: DebtsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "participants": ["Alice", "Bob"],
  "matrix": [["0", "100"], ["60", "0"]]
}}"#
        );
        process::exit(1);
    });

    let matrix = ObligationMatrix::from_rows(file.matrix).unwrap_or_else(|e| {
        eprintln!("Invalid debt matrix: {}", e);
        process::exit(1);
    });
    if let Err(e) = matrix.validate() {
        eprintln!("Invalid debt matrix: {}", e);
        process::exit(1);
    }

    let mut labels = file.participants;
    for i in labels.len()..matrix.len() {
        labels.push(format!("P{}", i));
    }
    (labels, matrix)
}

/// Render a matrix as an aligned table with participant labels.
fn render_matrix(matrix: &ObligationMatrix, labels: &[String]) -> String {
    let width = labels.iter().map(|l| l.len()).max().unwrap_or(2).max(8);
    let mut out = String::new();

    out.push_str(&" ".repeat(width + 2));
    for label in labels {
        out.push_str(&format!("{:>width$} ", label, width = width));
    }
    out.push('\n');

    for (i, row) in matrix.rows().iter().enumerate() {
        out.push_str(&format!("{:<width$} |", labels[i], width = width));
        for amount in row {
            out.push_str(&format!("{:>width$} ", amount, width = width));
        }
        out.push('\n');
    }
    out
}

/// List the non-zero payments of a matrix in reading order.
fn payments(matrix: &ObligationMatrix, labels: &[String]) -> Vec<PaymentOutput> {
    let mut list = Vec::new();
    for i in 0..matrix.len() {
        for j in 0..matrix.len() {
            let amount = matrix.amount(i, j);
            if amount > Decimal::ZERO {
                list.push(PaymentOutput {
                    from: labels[i].clone(),
                    to: labels[j].clone(),
                    amount: amount.to_string(),
                });
            }
        }
    }
    list
}

fn balances(matrix: &ObligationMatrix, labels: &[String]) -> Vec<BalanceOutput> {
    matrix
        .balances()
        .iter()
        .enumerate()
        .map(|(i, balance)| BalanceOutput {
            participant: labels[i].clone(),
            balance: balance.to_string(),
            status: if *balance > Decimal::ZERO {
                "PAYS".to_string()
            } else if *balance < Decimal::ZERO {
                "RECEIVES".to_string()
            } else {
                "SETTLED".to_string()
            },
        })
        .collect()
}

/// Parse the common `--input` / `--format` options.
fn parse_io_options(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn emit(matrix: &ObligationMatrix, labels: &[String], format: &str, gross_before: Decimal) {
    if format == "json" {
        let output = PlanOutput {
            payments: payments(matrix, labels),
            balances: balances(matrix, labels),
            gross_before: gross_before.to_string(),
            gross_after: matrix.gross_total().to_string(),
            matrix: matrix.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", render_matrix(matrix, labels));
        for payment in payments(matrix, labels) {
            println!("{} pays {}: {}", payment.from, payment.to, payment.amount);
        }
    }
}

fn cmd_net(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let (labels, matrix) = load_debts(&path);
    let (netted, report) = net_with_report(&matrix);

    if format != "json" {
        println!("{}", report);
    }
    emit(&netted, &labels, &format, matrix.gross_total());
}

fn cmd_simplify(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let (labels, matrix) = load_debts(&path);
    let (simplified, report) = simplify_with_report(&matrix);

    if format != "json" {
        println!("{}", report);
    }
    emit(&simplified, &labels, &format, matrix.gross_total());
}

fn cmd_plan(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let (labels, matrix) = load_debts(&path);

    let (netted, netting_report) = net_with_report(&matrix);
    let (simplified, cycle_report) = simplify_with_report(&netted);

    if format == "json" {
        emit(&simplified, &labels, &format, matrix.gross_total());
        return;
    }

    println!("--- 1. Initial Debt Matrix ---");
    println!("{}", render_matrix(&matrix, &labels));

    println!("--- 2. After Bilateral Netting ---");
    println!("{}", render_matrix(&netted, &labels));
    println!("{}", netting_report);

    println!("--- 3. Final Settlement Plan ---");
    println!("{}", render_matrix(&simplified, &labels));
    println!("{}", cycle_report);

    println!("--- Payments ---");
    let list = payments(&simplified, &labels);
    if list.is_empty() {
        println!("Nothing to settle.");
    } else {
        for payment in &list {
            println!("{} pays {}: {}", payment.from, payment.to, payment.amount);
        }
    }

    println!("\n--- Net Balances ---");
    for balance in balances(&simplified, &labels) {
        println!(
            "{:<12} {:>12}  ({})",
            balance.participant, balance.balance, balance.status
        );
    }
}

fn cmd_generate(args: &[String]) {
    let mut participants = 10usize;
    let mut density = 0.4f64;
    let mut max_amount = Decimal::from(10_000);
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                participants = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--participants requires a number");
                    process::exit(1);
                });
            }
            "--density" => {
                i += 1;
                density = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--density requires a number in 0..1");
                    process::exit(1);
                });
            }
            "--max-amount" => {
                i += 1;
                max_amount = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max-amount requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = MatrixConfig {
        participants,
        density,
        max_amount,
        ..Default::default()
    };
    let matrix = generate_random_matrix(&config);

    #[derive(serde::Serialize)]
    struct OutputFile {
        participants: Vec<String>,
        matrix: ObligationMatrix,
    }

    let output = OutputFile {
        participants: (0..participants).map(|i| format!("P{}", i)).collect(),
        matrix,
    };

    let json = serde_json::to_string_pretty(&output).unwrap();
    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} x {} debt matrix → {}", participants, participants, path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "plan" => cmd_plan(rest),
        "net" => cmd_net(rest),
        "simplify" => cmd_simplify(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
