use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_csvxml::{csv, xml, CsvOptions, Value};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

const KEYS: [&str; 4] = ["sku", "name", "price", "quantity"];

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}, size {}", i, i % 3),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn benchmark_csv_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_encode");
    let options = CsvOptions::new().with_keys(KEYS);

    for size in [10, 100, 1000].iter() {
        let rows = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| csv::to_string_with_options(black_box(rows), &options))
        });
    }
    group.finish();
}

fn benchmark_csv_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_decode");

    for size in [10, 100, 1000].iter() {
        let text = csv::to_string_with_keys(&products(*size), KEYS).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| csv::from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_xml_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("xml_encode");

    for size in [10, 100, 1000].iter() {
        let rows = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| xml::to_string(black_box(rows)))
        });
    }
    group.finish();
}

fn benchmark_xml_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("xml_decode");

    for size in [10, 100, 1000].iter() {
        let text = xml::to_string(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| xml::from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_quoting(c: &mut Criterion) {
    let mut group = c.benchmark_group("quoting");

    let plain = "This is a plain field without separators";
    let awkward = "A field with, commas\nand \"quotes\" in it";

    group.bench_function("quote_plain", |b| {
        b.iter(|| csv::engine::quote(black_box(plain)))
    });
    group.bench_function("quote_awkward", |b| {
        b.iter(|| csv::engine::quote(black_box(awkward)))
    });

    let row = vec![csv::engine::quote(awkward); 20].join(",");
    group.bench_function("split_quoted_row", |b| {
        b.iter(|| csv::engine::split_fields(black_box(&row)))
    });

    group.finish();
}

fn benchmark_value_tree(c: &mut Criterion) {
    let text = csv::to_string_with_keys(&products(100), KEYS).unwrap();
    let value: Value = csv::from_str(&text).unwrap();

    let mut group = c.benchmark_group("value_tree");

    group.bench_function("csv_to_value", |b| {
        b.iter(|| csv::from_str::<Value>(black_box(&text)))
    });

    group.bench_function("value_to_xml", |b| {
        b.iter(|| xml::to_string(black_box(&value)))
    });

    group.bench_function("value_to_products", |b| {
        b.iter(|| serde_csvxml::from_value::<Vec<Product>>(black_box(value.clone())))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let rows = products(100);
    let mut group = c.benchmark_group("comparison");

    let csv_str = csv::to_string_with_keys(&rows, KEYS).unwrap();
    let xml_str = xml::to_string(&rows).unwrap();
    let json_str = serde_json::to_string(&rows).unwrap();

    group.bench_function("csv_deserialize", |b| {
        b.iter(|| csv::from_str::<Vec<Product>>(black_box(&csv_str)))
    });

    group.bench_function("xml_deserialize", |b| {
        b.iter(|| xml::from_str::<Vec<Product>>(black_box(&xml_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Vec<Product>>(black_box(&json_str)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_csv_encode,
    benchmark_csv_decode,
    benchmark_xml_encode,
    benchmark_xml_decode,
    benchmark_quoting,
    benchmark_value_tree,
    benchmark_comparison_with_json
);
criterion_main!(benches);
