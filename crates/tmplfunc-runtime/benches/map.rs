//! Map benchmarks
//!
//! Compares a callable with a concrete result type against one returning
//! `any`, over 1000 ints, plus the predicate operations on the same data.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tmplfunc_runtime::native::NativeFunctionBuilder;
use tmplfunc_runtime::simple::{inc, odd};
use tmplfunc_runtime::{filter, find_index, map, Type, Value};

const SIZE: i64 = 1000;

fn ints() -> Value {
    Value::array(Type::Int, (0..SIZE).map(Value::Int).collect())
}

fn inc_any() -> Value {
    NativeFunctionBuilder::new("inc_any")
        .param(Type::Any)
        .returns(Type::Any)
        .with_implementation(|args| match args {
            [Value::Int(i)] => vec![Value::Int(i + 1)],
            _ => vec![Value::Null],
        })
        .build()
        .unwrap()
}

fn bench_map(c: &mut Criterion) {
    let data = ints();
    let concrete = inc();
    let untyped = inc_any();

    let mut group = c.benchmark_group("map_1000");
    group.throughput(Throughput::Elements(SIZE as u64));
    group.bench_function("int_result", |b| {
        b.iter(|| map(black_box(&data), black_box(&concrete)).unwrap())
    });
    group.bench_function("any_result", |b| {
        b.iter(|| map(black_box(&data), black_box(&untyped)).unwrap())
    });
    group.finish();
}

fn bench_predicates(c: &mut Criterion) {
    let data = ints();
    let pred = odd();

    c.bench_function("filter_odd_1000", |b| {
        b.iter(|| filter(black_box(&data), black_box(&pred)).unwrap())
    });
    // odd() matches element 1, so this measures validation overhead
    c.bench_function("find_index_odd_1000", |b| {
        b.iter(|| find_index(black_box(&data), black_box(&pred)).unwrap())
    });
}

criterion_group!(benches, bench_map, bench_predicates);
criterion_main!(benches);
