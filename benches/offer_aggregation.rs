#![allow(clippy::expect_used)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use savvy_shopper::application::services::{OfferAggregationEngine, rank_offers};
use savvy_shopper::domain::entities::Offer;
use savvy_shopper::domain::value_objects::{Price, Retailer};
use savvy_shopper::infrastructure::retailers::{FixtureSearcher, RetailerRegistry};

const GLOBAL_CAP: usize = 6;

fn offers(retailer: Retailer, count: usize) -> Vec<Offer> {
    (0..count)
        .map(|i| {
            let cents = ((i * 7919) % 10_000) as i64;
            Offer::new(format!("{retailer}-{i}"), Price::from_cents(cents), "https://example.com")
        })
        .collect()
}

fn registry(per_source: usize) -> RetailerRegistry {
    Retailer::ALL
        .into_iter()
        .fold(RetailerRegistry::new(), |registry, retailer| {
            registry.with(Arc::new(FixtureSearcher::new(retailer, offers(retailer, per_source))))
        })
}

fn bench_rank_offers(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_offers");
    for size in [6usize, 60, 600] {
        let pool = offers(Retailer::Amazon, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &pool, |b, pool| {
            b.iter(|| rank_offers(black_box(pool.clone()), GLOBAL_CAP))
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let engine = OfferAggregationEngine::with_defaults(registry(3));

    c.bench_function("aggregate_two_fixture_sources", |b| {
        b.to_async(&runtime)
            .iter(|| async { engine.aggregate(black_box("usb cable")).await })
    });
}

criterion_group!(benches, bench_rank_offers, bench_aggregate);
criterion_main!(benches);
