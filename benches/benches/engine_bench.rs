//! # Pattern Engine Benchmarks
//!
//! Measures catalogue matching across input shapes: the O(N) scan over
//! pairs dominates; the internal lock is noise in single-threaded runs.
//!
//! Run: `cargo bench --bench engine_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rift_core::GovernMode;
use rift_pattern::PatternEngine;

fn catalogue() -> PatternEngine {
    let engine = PatternEngine::new(GovernMode::Classical);
    engine.register(r"!govern\s+(?P<mode>\w+)", "# govern {mode}", 10, true).unwrap();
    engine.register(r"align\s+span<(?P<kind>\w+)>.*", "# span {kind}", 10, true).unwrap();
    engine.register(r"validate\((?P<name>\w+)\)", "rift.validate({name})", 10, true).unwrap();
    engine
        .register(r"(?P<name>[A-Za-z_]\w*)\s*:=\s*(?P<expr>.+)", "{name} = {expr}", 10, true)
        .unwrap();
    engine.register(r"while\s*\((?P<cond>[^)]*)\).*", "while {cond}:", 10, true).unwrap();
    engine
}

fn bench_engine_match(c: &mut Criterion) {
    let engine = catalogue();
    let mut group = c.benchmark_group("engine_match");

    group.bench_function("assignment", |b| {
        b.iter(|| black_box(engine.apply(black_box("counter := counter + 1"))))
    });

    group.bench_function("directive", |b| {
        b.iter(|| black_box(engine.apply(black_box("!govern quantum"))))
    });

    group.bench_function("no_match", |b| {
        b.iter(|| black_box(engine.apply(black_box("completely unrelated text"))))
    });

    group.finish();
}

fn bench_engine_registration(c: &mut Criterion) {
    c.bench_function("engine_registration", |b| {
        b.iter(|| black_box(catalogue()))
    });
}

criterion_group!(benches, bench_engine_match, bench_engine_registration);
criterion_main!(benches);
