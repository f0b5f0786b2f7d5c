//! Resolver and batch throughput over a synthetic gazetteer.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geosync_core::prelude::*;
use geosync_core::score::weighted_ratio;
use std::hint::black_box;

const REGIONS: &[&str] = &[
    "Московская область",
    "Ленинградская область",
    "Мурманская область",
    "Нижегородская область",
    "Свердловская область",
    "Краснодарский край",
    "Республика Татарстан",
];

const STEMS: &[&str] = &[
    "Кировск", "Бор", "Заречный", "Октябрьск", "Советск", "Лесной", "Красногорск", "Победа",
];

/// Regions with a handful of towns each, some names qualified by region.
fn synthetic_gazetteer(towns_per_region: usize) -> Gazetteer {
    let roots: Vec<AreaRaw> = REGIONS
        .iter()
        .enumerate()
        .map(|(r, region)| {
            let towns = (0..towns_per_region)
                .map(|t| {
                    let stem = STEMS[t % STEMS.len()];
                    let name = if t < STEMS.len() {
                        format!("{stem} ({region})")
                    } else {
                        format!("{stem}-{t}")
                    };
                    AreaRaw::new(format!("{r}{t:04}"), name)
                })
                .collect();
            AreaRaw::new(r.to_string(), *region).with_children(towns)
        })
        .collect();
    Gazetteer::from_tree(&roots)
}

fn batch_inputs(n: usize) -> Vec<Option<String>> {
    let samples = [
        "Кировск",
        "Кировск Мурманская обл",
        "Красногорск",
        "Заречны",
        "Лесной-12",
        "Советск Нижегородская область",
        "Неизвестноград",
    ];
    (0..n)
        .map(|i| match i % 11 {
            10 => None,
            _ => Some(samples[i % samples.len()].to_string()),
        })
        .collect()
}

fn bench_weighted_ratio(c: &mut Criterion) {
    c.bench_function("weighted_ratio", |b| {
        b.iter(|| {
            weighted_ratio(
                black_box("Кировск Мурманская обл"),
                black_box("Кировск (Мурманская область)"),
            )
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let gz = synthetic_gazetteer(200);
    let resolver = Resolver::new(&gz, MatchConfig::default());
    let mut group = c.benchmark_group("resolve");
    for input in ["Кировск", "Кировск Мурманская обл", "Заречны", "Неизвестноград"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, input| {
            b.iter(|| resolver.resolve(black_box(input)))
        });
    }
    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let gz = synthetic_gazetteer(200);
    let reconciler = match Reconciler::new(&gz, MatchConfig::default()) {
        Ok(r) => r,
        Err(e) => panic!("synthetic gazetteer rejected: {e}"),
    };
    let mut group = c.benchmark_group("reconcile");
    group.sample_size(20);
    for rows in [100usize, 1_000] {
        let inputs = batch_inputs(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &inputs, |b, inputs| {
            b.iter(|| reconciler.reconcile(inputs.iter().map(Option::as_deref)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_weighted_ratio, bench_resolve, bench_reconcile);
criterion_main!(benches);
