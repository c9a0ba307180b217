use criterion::{black_box, criterion_group, criterion_main, Criterion};

use graphframe_ast::{FieldFilter, FrameDescription, TraversalAliases, TraversalDirection};
use graphframe_compiler::FrameCompiler;

fn compile_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_frame");

    let node_read = FrameDescription::node_read("Person")
        .with_filter(FieldFilter::new("age__gte", 21i64))
        .with_filter(FieldFilter::new("country", "US"))
        .with_projection(["name".to_string(), "email".to_string()])
        .with_limit(10);
    group.bench_function("node read with two filters", |b| {
        b.iter(|| black_box(FrameCompiler::compile(&node_read).unwrap()));
    });

    let traversal = FrameDescription::node_read("Person").traverse(
        "WORKS_AT",
        "Company",
        TraversalDirection::Out,
        TraversalAliases::default(),
    );
    let traversal = traversal
        .with_filter(FieldFilter::new("rel__since__gte", 2020i64))
        .with_filter(FieldFilter::new("to__city", "SF"));
    group.bench_function("traversal with namespaced filters", |b| {
        b.iter(|| black_box(FrameCompiler::compile(&traversal).unwrap()));
    });

    let back_to_origin = FrameDescription::node_read("Person")
        .traverse("WORKS_AT", "Company", TraversalDirection::Out, TraversalAliases::default())
        .back();
    group.bench_function("back-to-origin read", |b| {
        b.iter(|| black_box(FrameCompiler::compile(&back_to_origin).unwrap()));
    });
}

criterion_group!(benches, compile_frame);
criterion_main!(benches);
