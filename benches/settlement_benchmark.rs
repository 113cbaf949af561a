use criterion::{black_box, criterion_group, criterion_main, Criterion};
use settlement_planner::settlement::netting::net_bilateral_payments;
use settlement_planner::settlement::resolver::simplify_settlement_graph;
use settlement_planner::simulation::random::{generate_random_matrix, MatrixConfig};

fn bench_plan_10_participants(c: &mut Criterion) {
    let config = MatrixConfig {
        participants: 10,
        density: 0.4,
        ..Default::default()
    };
    let matrix = generate_random_matrix(&config);

    c.bench_function("plan_10_participants", |b| {
        b.iter(|| simplify_settlement_graph(&net_bilateral_payments(black_box(&matrix))))
    });
}

fn bench_plan_50_participants(c: &mut Criterion) {
    let config = MatrixConfig {
        participants: 50,
        density: 0.3,
        ..Default::default()
    };
    let matrix = generate_random_matrix(&config);

    c.bench_function("plan_50_participants", |b| {
        b.iter(|| simplify_settlement_graph(&net_bilateral_payments(black_box(&matrix))))
    });
}

fn bench_plan_100_participants(c: &mut Criterion) {
    let config = MatrixConfig {
        participants: 100,
        density: 0.2,
        ..Default::default()
    };
    let matrix = generate_random_matrix(&config);

    c.bench_function("plan_100_participants", |b| {
        b.iter(|| simplify_settlement_graph(&net_bilateral_payments(black_box(&matrix))))
    });
}

criterion_group!(
    benches,
    bench_plan_10_participants,
    bench_plan_50_participants,
    bench_plan_100_participants
);
criterion_main!(benches);
