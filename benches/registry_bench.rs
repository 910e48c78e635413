//! Benchmark for struct validation and building.
//!
//! Measures recursive validation of nested structs and typed sequences, and
//! the cost of `build` against assembling the same record by hand, and how
//! building a wide mapping scales with its size.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use shapelens::types::{SchemaDefinition, TypeRegistry};
use shapelens::value::{Mapping, Value};
use shapelens::{record, sequence};
use std::hint::black_box;

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            "User",
            SchemaDefinition::new()
                .field("name", ["string"])
                .field_with_default("age", ["int", "float"], 0),
        )
        .unwrap();
    registry
        .register(
            "Account",
            SchemaDefinition::new()
                .field_with_default("id", ["int"], 2)
                .field("owner", ["User"])
                .field_with_default("members", ["sequence:User"], sequence![]),
        )
        .unwrap();
    registry
}

fn account(members: usize) -> Value {
    let members: Vec<Value> = (0..members)
        .map(|index| record! { "name" => format!("user{index}"), "age" => 30 })
        .collect();
    record! {
        "id" => 1,
        "owner" => record! { "name" => "mark", "age" => 65 },
        "members" => members,
    }
}

// =============================================================================
// Validation Benchmarks
// =============================================================================

fn benchmark_validate_primitive(criterion: &mut Criterion) {
    let registry = registry();
    let mut group = criterion.benchmark_group("validate_primitive");

    for type_name in ["int", "mixed", "sequence:int"] {
        group.bench_with_input(
            BenchmarkId::from_parameter(type_name),
            &type_name,
            |bencher, type_name| {
                let value = sequence![1, 2, 3];
                bencher.iter(|| black_box(registry.validate(type_name, black_box(&value))));
            },
        );
    }

    group.finish();
}

fn benchmark_validate_nested(criterion: &mut Criterion) {
    let registry = registry();
    let mut group = criterion.benchmark_group("validate_nested");

    for members in [0_usize, 10, 100] {
        let value = account(members);
        group.throughput(Throughput::Elements(members as u64 + 1));
        group.bench_with_input(BenchmarkId::new("account", members), &value, |bencher, value| {
            bencher.iter(|| black_box(registry.validate("Account", black_box(value))));
        });
    }

    group.finish();
}

// =============================================================================
// Build Benchmarks
// =============================================================================

fn benchmark_build(criterion: &mut Criterion) {
    let registry = registry();
    let mut group = criterion.benchmark_group("build");
    let owner = record! { "name" => "mark", "age" => 65 };

    group.bench_function("with_defaults", |bencher| {
        bencher.iter(|| {
            let overrides: Mapping = [("owner", owner.clone())].into_iter().collect();
            black_box(registry.build("Account", overrides))
        });
    });

    group.bench_function("manual", |bencher| {
        bencher.iter(|| {
            let built: Mapping = [
                ("id", Value::from(2)),
                ("owner", owner.clone()),
                ("members", sequence![]),
            ]
            .into_iter()
            .collect();
            black_box(built)
        });
    });

    group.finish();
}

// =============================================================================
// Mapping Benchmarks
// =============================================================================

fn benchmark_mapping_collect(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("mapping_collect");

    for size in [1_000_i64, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mapping: Mapping = (0..size)
                    .map(|index| (format!("k{index}"), Value::from(index)))
                    .collect();
                black_box(mapping)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_validate_primitive,
    benchmark_validate_nested,
    benchmark_build,
    benchmark_mapping_collect,
);

criterion_main!(benches);
