use criterion::{black_box, criterion_group, criterion_main, Criterion};

use graphframe_ast::WriteDescription;
use graphframe_core::{RelUniquenessPolicy, Row, Value};
use graphframe_compiler::WritePlanner;

fn row(email: &str, name: &str) -> Row {
    let mut row = Row::new();
    row.insert("email".to_string(), Value::from(email));
    row.insert("name".to_string(), Value::from(name));
    row
}

fn compile_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_write");

    let single_row = WriteDescription::node_upsert("Person", vec![row("j@x", "J")], vec!["email".to_string()]);
    group.bench_function("single-row node upsert", |b| {
        b.iter(|| black_box(WritePlanner::compile(&single_row, RelUniquenessPolicy::Single).unwrap()));
    });

    let rows: Vec<Row> = (0..5_000)
        .map(|i| row(&format!("user{i}@x"), &format!("User {i}")))
        .collect();
    let batched = WriteDescription::node_upsert("Person", rows, vec!["email".to_string()]);
    group.bench_function("5000-row node upsert, default batch size", |b| {
        b.iter(|| black_box(WritePlanner::compile(&batched, RelUniquenessPolicy::Single).unwrap()));
    });
}

criterion_group!(benches, compile_write);
criterion_main!(benches);
