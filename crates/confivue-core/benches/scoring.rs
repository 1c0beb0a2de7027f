use criterion::{black_box, criterion_group, criterion_main, Criterion};

use confivue_core::estimator::{estimate_theta, sem_after};
use confivue_core::model::{Band, Response};
use confivue_core::scaling::scale_to_0_100;

fn make_log(len: usize) -> Vec<Response> {
    (0..len)
        .map(|i| Response {
            item_id: format!("item-{i}"),
            category: (i % 5) as u8,
            rt_ms: Some(1500),
        })
        .collect()
}

fn bench_estimate_theta(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_theta");

    for len in [1usize, 8, 64] {
        let log = make_log(len);
        group.bench_function(format!("responses={len}"), |b| {
            b.iter(|| estimate_theta(black_box(&log)))
        });
    }

    group.finish();
}

fn bench_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale");

    group.bench_function("scale_and_band", |b| {
        b.iter(|| Band::from_score(scale_to_0_100(black_box(0.37))))
    });

    group.bench_function("sem_after", |b| b.iter(|| sem_after(black_box(6))));

    group.finish();
}

criterion_group!(benches, bench_estimate_theta, bench_scale);
criterion_main!(benches);
