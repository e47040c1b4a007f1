mod common;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use spritescript::transpile;
use spritescript::transpiler::Transpiler;

// `codegen` measures the AST walk alone; `pipeline` measures the full
// source-to-text path the CLI takes.

fn bench_transpiler(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpile");
    for (label, path) in common::WORKLOADS {
        let program = common::load_program(path);
        group.bench_with_input(BenchmarkId::new("codegen", label), &program, |b, program| {
            b.iter(|| {
                let mut transpiler = Transpiler;
                let output = transpiler.transpile(black_box(program)).expect("transpile");
                black_box(output);
            })
        });

        let source = common::load_source(path);
        group.bench_with_input(BenchmarkId::new("pipeline", label), &source, |b, source| {
            b.iter(|| {
                let output = transpile(black_box(source)).expect("transpile");
                black_box(output);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transpiler);
criterion_main!(benches);
