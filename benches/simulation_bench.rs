//! Criterion benchmarks for the analytic chain and the kill simulation

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use combat_odds::combat::{resolve_combat_chain, CombatProfile, KillSimulator, TargetPool};
use combat_odds::core::{EngineConfig, RerollPolicy, StatValue};
use combat_odds::distribution::{build_distribution, OutcomeWindow};

fn bench_chain(c: &mut Criterion) {
    let config = EngineConfig::default();
    let profile = CombatProfile::new(40)
        .with_to_hit(StatValue(3), RerollPolicy::RerollOnes)
        .with_lethal_hits()
        .with_sustained_hits(1)
        .with_to_wound(StatValue(4), RerollPolicy::RerollFailures)
        .with_devastating_wounds();

    c.bench_function("chain 40 attacks full rules", |b| {
        b.iter(|| resolve_combat_chain(black_box(&profile), &config))
    });

    c.bench_function("binomial distribution n=2000", |b| {
        b.iter(|| build_distribution(black_box(2_000), 0.42, OutcomeWindow::full(2_000)))
    });
}

fn bench_simulation(c: &mut Criterion) {
    let profile = CombatProfile::new(30).with_damage(2);
    let pool = TargetPool::new(10, 3)
        .with_save(StatValue(4), RerollPolicy::RerollOnes)
        .with_feel_no_pain(StatValue(5));

    let mut group = c.benchmark_group("kill simulation");
    group.sample_size(20);

    let sequential = {
        let mut config = EngineConfig::default().with_iterations(10_000).with_seed(1);
        config.parallel_threshold = u32::MAX;
        KillSimulator::from_config(&config)
    };
    group.bench_function("10k trials sequential", |b| {
        b.iter(|| sequential.simulate(black_box(&profile), &pool))
    });

    let parallel = KillSimulator::from_config(&EngineConfig::default().with_iterations(10_000).with_seed(1));
    group.bench_function("10k trials parallel", |b| {
        b.iter(|| parallel.simulate(black_box(&profile), &pool))
    });

    group.finish();
}

criterion_group!(benches, bench_chain, bench_simulation);
criterion_main!(benches);
