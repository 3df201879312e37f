use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use serde_formquery::{
    encode, encode_with_options, form, to_string, EncodingMode, FormMap, QueryOptions, Value,
};

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn benchmark_encode_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice Liddell".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("encode_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_encode_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_list");

    for size in [10, 50, 100, 500].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect();
        let value = serde_formquery::to_value(&products).unwrap();

        group.bench_with_input(BenchmarkId::new("serde", size), size, |b, _| {
            b.iter(|| to_string(black_box(&products)))
        });
        group.bench_with_input(BenchmarkId::new("value", size), size, |b, _| {
            b.iter(|| encode(black_box(&value)))
        });
    }
    group.finish();
}

fn benchmark_encode_nested(c: &mut Criterion) {
    let data = NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    };

    c.bench_function("encode_nested_struct", |b| {
        b.iter(|| to_string(black_box(&data)))
    });
}

fn benchmark_deep_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_nesting");

    for depth in [4, 16, 64].iter() {
        let mut value = form!({ "leaf": "value" });
        for level in 0..*depth {
            let mut map = FormMap::new();
            map.insert(format!("level{}", level), value);
            value = Value::Map(map);
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &value, |b, value| {
            b.iter(|| encode(black_box(value)))
        });
    }
    group.finish();
}

fn benchmark_string_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_modes");

    let plain = form!({ "q": "plainascii0123456789" });
    let spaced = form!({ "q": "This is a medium length string with some content & symbols" });
    let unicode = form!({ "q": "Grüße aus Köln, 日本語のテキスト" });

    let legacy = QueryOptions::new().with_mode(EncodingMode::Legacy);
    let strict = QueryOptions::new().with_mode(EncodingMode::Strict);

    for (name, value) in [("plain", &plain), ("spaced", &spaced), ("unicode", &unicode)] {
        group.bench_function(format!("{}_legacy", name), |b| {
            b.iter(|| encode_with_options(black_box(value), &legacy))
        });
        group.bench_function(format!("{}_strict", name), |b| {
            b.iter(|| encode_with_options(black_box(value), &strict))
        });
    }

    group.finish();
}

fn benchmark_scalar_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_lists");

    let numbers: Vec<i32> = (0..100).collect();
    let bools: Vec<bool> = (0..100).map(|i| i % 2 == 0).collect();
    let floats: Vec<f64> = (0..100).map(|i| i as f64 * 1.5).collect();

    group.bench_function("integers", |b| b.iter(|| to_string(black_box(&numbers))));
    group.bench_function("booleans", |b| b.iter(|| to_string(black_box(&bools))));
    group.bench_function("floats", |b| b.iter(|| to_string(black_box(&floats))));

    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_simple,
    benchmark_encode_list,
    benchmark_encode_nested,
    benchmark_deep_nesting,
    benchmark_string_modes,
    benchmark_scalar_lists
);
criterion_main!(benches);
