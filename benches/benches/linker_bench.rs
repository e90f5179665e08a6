//! # Linker and Codec Benchmarks
//!
//! Measures the single forward pass and per-target emission over a
//! synthetic program that exercises every node kind.
//!
//! Run: `cargo bench --bench linker_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rift_lang::{emit, link, Target};

fn synthetic_source(statements: usize) -> String {
    let mut source = String::from(
        "!govern classical\nalign span<fixed> { bytes: 4096 }\ntype Pair = {\n  x: INT,\n  y: FLOAT\n}\n",
    );
    for i in 0..statements {
        source.push_str(&format!("v{} := {}\n", i % 48, i));
        if i % 16 == 0 {
            source.push_str(&format!("while (v0 < {}) {{ v0 := v0 + 1 }}\n", i));
        }
    }
    source.push_str("validate(v0)\n");
    source
}

fn bench_link(c: &mut Criterion) {
    let mut group = c.benchmark_group("link");

    for size in [16usize, 128, 512] {
        let source = synthetic_source(size);
        group.bench_function(format!("{}_statements", size), |b| {
            b.iter(|| black_box(link(black_box(&source))))
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let source = synthetic_source(128);
    let program = link(&source);
    let mut group = c.benchmark_group("emit");

    for (name, target) in [
        ("c", Target::C),
        ("go", Target::Go),
        ("python", Target::Python),
        ("wat", Target::Wat),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(emit(black_box(&program), target).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_link, bench_emit);
criterion_main!(benches);
