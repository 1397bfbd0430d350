//! Benchmarks for the discovery pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dimlaw::catalog::QuantityCatalog;
use dimlaw::config::EngineConfig;
use dimlaw::engine::Engine;
use dimlaw::matrix::QuantitySet;
use dimlaw::request::RelationshipRequest;
use dimlaw::solver::ConsistencySolver;
use dimlaw::suggest::SuggestionEngine;

const NONE: [&str; 0] = [];

fn ready_engine() -> Engine {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    engine.initialize();
    engine
}

fn bench_classify(c: &mut Criterion) {
    let catalog = QuantityCatalog::builtin();
    let set = QuantitySet::resolve(&catalog, "energy", &["mass", "velocity"], &NONE).unwrap();
    let dimensions = set.dimensions();
    let solver = ConsistencySolver::new(SuggestionEngine::new(&catalog, 4));

    c.bench_function("classify_kinetic_energy", |bench| {
        bench.iter(|| black_box(solver.classify(&set, &dimensions).unwrap()))
    });
}

fn bench_suggest(c: &mut Criterion) {
    let catalog = QuantityCatalog::builtin();
    let set = QuantitySet::resolve(&catalog, "energy", &["mass"], &NONE).unwrap();
    let missing = set.missing_dimensions();
    let suggester = SuggestionEngine::new(&catalog, 4);

    c.bench_function("suggest_energy_from_mass", |bench| {
        bench.iter(|| black_box(suggester.suggest(&set, Some(&missing))))
    });
}

fn bench_discover(c: &mut Criterion) {
    let engine = ready_engine();
    let direct = RelationshipRequest::new("time", ["length", "acceleration"]);
    let searched = RelationshipRequest::new("energy", ["mass"]).with_auto_search(true);

    c.bench_function("discover_pendulum", |bench| {
        bench.iter(|| black_box(engine.discover(&direct)))
    });
    c.bench_function("discover_auto_search", |bench| {
        bench.iter(|| black_box(engine.discover(&searched)))
    });
}

criterion_group!(benches, bench_classify, bench_suggest, bench_discover);
criterion_main!(benches);
