use criterion::{criterion_group, criterion_main, Criterion};
use gp_snapshot::{aggregate_conditions, aggregate_value, EntityRecord, LocationFilter};
use serde_json::json;
use std::hint::black_box;

const CONDITIONS: &[&str] = &["Clean", "Polluted", "Heavily polluted", ""];
const CATEGORIES: &[&str] = &["Pond", "Well", "Tank", "Canal", "Check dam"];
const VILLAGES: &[&str] = &["Alpha", "Beta", "Gamma", "Delta", "Kendupali"];

fn create_records(n: usize) -> Vec<EntityRecord> {
    (0..n)
        .map(|i| {
            let condition = CONDITIONS[i % CONDITIONS.len()];
            EntityRecord::new(
                CATEGORIES[i % CATEGORIES.len()],
                (!condition.is_empty()).then_some(condition),
                &[VILLAGES[i % VILLAGES.len()], VILLAGES[(i / 3) % VILLAGES.len()]],
            )
        })
        .collect()
}

fn bench_typed_records(c: &mut Criterion) {
    let records = create_records(10_000);
    let all = LocationFilter::All;
    let village = LocationFilter::parse("kendupali");

    c.bench_function("aggregate_10k_all", |b| {
        b.iter(|| aggregate_conditions(black_box(&records), black_box(&all)))
    });

    c.bench_function("aggregate_10k_village", |b| {
        b.iter(|| aggregate_conditions(black_box(&records), black_box(&village)))
    });
}

fn bench_raw_json(c: &mut Criterion) {
    let raw = json!(create_records(10_000));
    let village = LocationFilter::parse("Beta");

    c.bench_function("aggregate_10k_raw_json", |b| {
        b.iter(|| aggregate_value(black_box(&raw), black_box(&village)))
    });
}

criterion_group!(benches, bench_typed_records, bench_raw_json);
criterion_main!(benches);
