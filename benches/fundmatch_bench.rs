//! Criterion benchmarks for u-fundmatch scoring and allocation.
//!
//! Uses randomly generated candidate pools (fixed seed) to measure batch
//! throughput of the scorers and the greedy allocator.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_fundmatch::allocation::{
    AllocationCandidate, AllocationConstraints, AllocatorConfig, ConstrainedAllocator,
    PerformanceScores,
};
use u_fundmatch::engine::{Engine, EngineConfig};
use u_fundmatch::model::{BudgetEnvelope, Candidate, ImpactMetrics, RequesterProfile};

const CATEGORIES: [&str; 8] = [
    "water", "health", "education", "energy", "arts", "housing", "food", "climate",
];
const REGIONS: [&str; 5] = ["Kenya", "Uganda", "Peru", "India", "Ghana"];

// ===========================================================================
// Synthetic pools
// ===========================================================================

fn requester() -> RequesterProfile {
    RequesterProfile::new()
        .with_categories(["water", "health", "climate"])
        .with_geographies(["Kenya", "Uganda"])
        .with_budget(BudgetEnvelope::new(50_000.0, 500_000.0))
}

fn candidates(n: usize, rng: &mut StdRng) -> Vec<Candidate> {
    (0..n)
        .map(|i| {
            let picks: Vec<&str> = (0..rng.random_range(1..4))
                .map(|_| CATEGORIES[rng.random_range(0..CATEGORIES.len())])
                .collect();
            let region = REGIONS[rng.random_range(0..REGIONS.len())];
            Candidate::new(format!("c{i:05}"))
                .with_categories(picks)
                .with_location(format!("Somewhere, {region}"))
                .with_budget(format!("${}", rng.random_range(10_000..800_000)))
                .with_rating(rng.random_range(1.0..5.0))
                .with_impact(ImpactMetrics {
                    beneficiaries: Some(rng.random_range(0..20_000)),
                    jobs_created: Some(rng.random_range(0..300)),
                    ..ImpactMetrics::default()
                })
        })
        .collect()
}

fn offers(n: usize, rng: &mut StdRng) -> Vec<AllocationCandidate> {
    (0..n)
        .map(|i| {
            let scores = PerformanceScores {
                roi: rng.random_range(0.0..1.0),
                impact: rng.random_range(0.0..1.0),
                risk: rng.random_range(0.0..1.0),
                alignment: rng.random_range(0.0..1.0),
                feasibility: rng.random_range(0.0..1.0),
            };
            AllocationCandidate::new(format!("o{i:05}"), rng.random_range(1_000.0..100_000.0), scores)
                .with_location(REGIONS[rng.random_range(0..REGIONS.len())])
                .with_categories([CATEGORIES[rng.random_range(0..CATEGORIES.len())]])
        })
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_rank_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_candidates");
    group.sample_size(10);

    let engine = Engine::new(EngineConfig::default()).unwrap_or_else(|e| panic!("{e}"));
    let requester = requester();
    for &n in &[100, 1_000, 10_000] {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = candidates(n, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pool, |b, pool| {
            b.iter(|| {
                let result = engine.rank_candidates(black_box(pool), black_box(&requester));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_evaluate_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_all");
    group.sample_size(10);

    let engine = Engine::new(EngineConfig::default()).unwrap_or_else(|e| panic!("{e}"));
    let requester = requester();
    for &n in &[100, 1_000] {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = candidates(n, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pool, |b, pool| {
            b.iter(|| {
                let result = engine.evaluate_all(black_box(pool), black_box(&requester));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");
    group.sample_size(10);

    let allocator =
        ConstrainedAllocator::new(AllocatorConfig::default()).unwrap_or_else(|e| panic!("{e}"));
    for &n in &[100, 1_000, 10_000] {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = offers(n, &mut rng);
        let constraints = AllocationConstraints::new(n as f64 * 10_000.0)
            .with_candidate_range(1, n / 4)
            .with_per_candidate_range(0.0, 80_000.0);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(pool, constraints),
            |b, (p, c)| {
                b.iter(|| {
                    let result = allocator.allocate(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_rank_candidates, bench_evaluate_all, bench_allocate);
criterion_main!(benches);
