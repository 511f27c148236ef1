//! Benchmarks for building and rendering node graphs.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use jsrope::{
    Beautifier, Beautify, Element, Flow, For, If, Int, Literal, Render, Return, Switch, Value,
    let_binding,
};

/// A flow of `n` nested loops over guarded DOM updates.
fn program(n: usize) -> Flow {
    let i = Int::new("i");
    let p = Element::by_tag("p");
    let mut flow = Flow::new();
    for k in 0..n {
        let branch = Switch::new()
            .case(i.strict_eq(k), p.change_inner_html(format!("item {}", k)))
            .otherwise(Return::empty());
        flow.add(For::new(
            let_binding(&i, 0),
            i.less_than(k),
            i.add_assign(1),
            If::new(i.modulo(2).loose_eq(0), branch),
        ));
    }
    flow
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for n in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("build_and_render", n), &n, |b, &n| {
            b.iter(|| black_box(program(n).to_code()));
        });

        let source = program(n).to_code();
        let beautifier = Beautifier::default();
        group.bench_with_input(BenchmarkId::new("beautify", n), &n, |b, _| {
            b.iter(|| black_box(beautifier.beautify(source.as_str())));
        });
    }

    group.finish();
}

fn bench_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("literal");

    for n in [10, 100, 1000] {
        let value = Literal::mapping((0..n).map(|k| {
            (
                format!("key{}", k),
                Literal::sequence([Literal::from(k), Literal::from("text \"quoted\"")]),
            )
        }));
        group.bench_with_input(BenchmarkId::new("escape", n), &value, |b, value| {
            b.iter(|| black_box(value.to_source()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_literals);
criterion_main!(benches);
