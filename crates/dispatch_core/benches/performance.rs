//! Performance benchmarks for dispatch_core using Criterion.rs.

use chrono::NaiveTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dispatch_core::config::DispatchConfig;
use dispatch_core::dispatch::DispatchState;
use dispatch_core::orders::generate_orders;
use dispatch_core::scoring::{apply_analyses, parse_reply, score_orders};
use dispatch_core::test_helpers::{reply_scoring, ScriptedOracle};
use dispatch_core::traffic::TrafficRules;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_order_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_generation");
    for count in [5usize, 50, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| black_box(generate_orders(count, &mut rng)));
        });
    }
    group.finish();
}

fn bench_reply_parsing(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let orders = generate_orders(50, &mut rng);
    let entries: Vec<(&str, f64)> = orders
        .iter()
        .enumerate()
        .map(|(i, o)| (o.id.as_str(), (i * 7 % 100) as f64))
        .collect();
    let strict = reply_scoring(&entries);
    let wrapped = format!("Sure, here is the analysis:\n```json\n{strict}\n```\nLet me know!");

    let mut group = c.benchmark_group("reply_parsing");
    group.bench_function("strict_50_orders", |b| {
        b.iter(|| black_box(parse_reply(black_box(&strict))));
    });
    group.bench_function("wrapped_50_orders", |b| {
        b.iter(|| black_box(parse_reply(black_box(&wrapped))));
    });
    group.bench_function("apply_50_orders", |b| {
        let analyses = parse_reply(&strict).map(|p| p.analyses).unwrap_or_default();
        b.iter(|| black_box(apply_analyses(&orders, &analyses)));
    });
    group.bench_function("score_50_orders", |b| {
        let oracle = ScriptedOracle::replying(&strict);
        let rules = TrafficRules::default();
        let time = NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default();
        b.iter(|| black_box(score_orders(&oracle, &orders, time, &rules)));
    });
    group.finish();
}

fn bench_full_trip(c: &mut Criterion) {
    c.bench_function("trip_300_ticks", |b| {
        b.iter(|| {
            let mut state = DispatchState::new(DispatchConfig::default().with_seed(42));
            let id = state.orders()[0].id.clone();
            state.select(&id);
            state.start_navigation();
            for _ in 0..300 {
                black_box(state.tick());
            }
        });
    });
}

criterion_group!(benches, bench_order_generation, bench_reply_parsing, bench_full_trip);
criterion_main!(benches);
