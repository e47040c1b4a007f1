mod common;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use spritescript::{lexer, parser};

// One benchmark group per frontend stage, one measurement per workload.
// Parsing is measured from a pre-tokenized stream so the two stages can be
// compared in isolation; the combined cost lives in the transpiler bench.

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for (label, path) in common::WORKLOADS {
        let source = common::load_source(path);
        group.bench_with_input(BenchmarkId::from_parameter(label), &source, |b, source| {
            b.iter(|| {
                let tokens = lexer::tokenize(black_box(source)).expect("tokenize");
                black_box(tokens);
            })
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (label, path) in common::WORKLOADS {
        let tokens = lexer::tokenize(&common::load_source(path)).expect("tokenize");
        group.bench_with_input(BenchmarkId::from_parameter(label), &tokens, |b, tokens| {
            b.iter(|| {
                let program = parser::parse_tokens(black_box(tokens.clone())).expect("parse");
                black_box(program);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
