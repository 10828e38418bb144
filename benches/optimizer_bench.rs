//! Criterion benchmarks for the assignment optimizers.
//!
//! Uses a synthetic two-continent network so the numbers measure the
//! route search and optimizer loops, not data loading.

use airlift::aco::{AcoConfig, AcoStrategy};
use airlift::ga::{GaConfig, GaStrategy};
use airlift::geo::AirportDirectory;
use airlift::model::{Airport, Continent, Leg, Order};
use airlift::network::FlightNetwork;
use airlift::optimize::Strategy;
use airlift::problem::PlanningProblem;
use chrono::NaiveTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn directory() -> AirportDirectory {
    AirportDirectory::new(vec![
        Airport::new("SPIM", -5, Continent::SouthAmerica),
        Airport::new("SKBO", -5, Continent::SouthAmerica),
        Airport::new("SABE", -3, Continent::SouthAmerica),
        Airport::new("UBBB", 4, Continent::Asia),
        Airport::new("EBCI", 1, Continent::Europe),
        Airport::new("EDDI", 1, Continent::Europe),
    ])
    .unwrap()
}

fn network(directory: &AirportDirectory) -> FlightNetwork {
    FlightNetwork::new(
        vec![
            Leg::new("SPIM", "SKBO", t(8, 0), t(12, 0), 300),
            Leg::new("SPIM", "SABE", t(9, 30), t(16, 0), 250),
            Leg::new("SPIM", "EBCI", t(18, 0), t(10, 30), 220),
            Leg::new("UBBB", "EBCI", t(9, 0), t(12, 0), 200),
            Leg::new("UBBB", "SKBO", t(7, 0), t(21, 0), 180),
            Leg::new("UBBB", "EDDI", t(14, 0), t(17, 30), 240),
            Leg::new("EBCI", "EDDI", t(8, 15), t(9, 45), 160),
            Leg::new("EBCI", "SABE", t(22, 0), t(11, 0), 190),
            Leg::new("SKBO", "SABE", t(13, 0), t(18, 30), 210),
        ],
        directory,
    )
    .unwrap()
}

/// Deterministic synthetic order book spread over destinations and days.
fn orders(count: usize) -> Vec<Order> {
    let destinations = ["SKBO", "SABE", "EBCI", "EDDI"];
    let hubs = ["SPIM", "UBBB"];
    (0..count)
        .map(|i| Order {
            id: format!("ORD-{i:04}"),
            hub: hubs[i % hubs.len()].to_string(),
            destination: destinations[i % destinations.len()].to_string(),
            quantity: 20 + (i as u32 * 7) % 60,
            day: 1 + (i as u32) % 3,
            time: t((6 + i as u32 * 3) % 24, (i as u32 * 11) % 60),
        })
        .collect()
}

fn problem(order_count: usize) -> PlanningProblem {
    let directory = directory();
    let network = network(&directory);
    PlanningProblem::new(
        directory,
        network,
        orders(order_count),
        vec!["SPIM".to_string(), "UBBB".to_string()],
    )
    .unwrap()
}

fn bench_realize(c: &mut Criterion) {
    let mut group = c.benchmark_group("realize");
    for count in [10, 40] {
        let problem = problem(count);
        let choices = vec![0usize; count];
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let assignment = problem.realize(black_box(&choices)).unwrap();
                black_box(problem.evaluate(&assignment))
            })
        });
    }
    group.finish();
}

fn bench_ga(c: &mut Criterion) {
    let problem = problem(20);
    let strategy = GaStrategy::new(
        GaConfig::default()
            .with_population_size(20)
            .with_max_generations(15)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false),
    );
    c.bench_function("ga_20_orders", |b| {
        b.iter(|| black_box(strategy.optimize(&problem, None).unwrap().best_score))
    });
}

fn bench_aco(c: &mut Criterion) {
    let problem = problem(20);
    let strategy = AcoStrategy::new(
        AcoConfig::default()
            .with_ants(10)
            .with_max_iterations(15)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false),
    );
    c.bench_function("aco_20_orders", |b| {
        b.iter(|| black_box(strategy.optimize(&problem, None).unwrap().best_score))
    });
}

criterion_group!(benches, bench_realize, bench_ga, bench_aco);
criterion_main!(benches);
