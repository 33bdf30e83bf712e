//! Resampling benchmarks over one month of synthetic 1-minute klines.
//!
//! Run with: `cargo bench --package rekline-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rekline_bench::{MONTH_MINUTES, synthetic_csv, synthetic_klines};
use rekline_lib::prelude::*;
use rekline_lib::{MonthRange, parse_batch};
use std::hint::black_box;

fn aggregate_benchmark(c: &mut Criterion) {
    let klines = synthetic_klines(MONTH_MINUTES);

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Elements(klines.len() as u64));

    for minutes in [5u32, 30, 240] {
        let config = ResampleConfig::new(Period::new(minutes).unwrap(), minutes / 2).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(format!("{minutes}m")), &config, |b, config| {
            b.iter(|| aggregate_klines(black_box(&klines), *config).len());
        });
    }

    group.finish();
}

fn pass_benchmark(c: &mut Criterion) {
    let text = synthetic_csv(&synthetic_klines(MONTH_MINUTES));
    let month = MonthRange::from_label("2017-01-01_2017-01-31").unwrap().start;
    let config = ResampleConfig::new(Period::new(30).unwrap(), 7).unwrap();
    let formatter = CsvFormatter::new();

    let mut group = c.benchmark_group("pass");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("parse+aggregate+format", |b| {
        b.iter(|| {
            let batch = parse_batch(month, black_box(&text), ParseMode::Lenient);
            let mut out = Vec::with_capacity(64 * 1024);
            for bar in resample(batch.klines, config) {
                formatter.write_kline(&bar, &mut out).unwrap();
            }
            out.len()
        });
    });

    group.finish();
}

criterion_group!(benches, aggregate_benchmark, pass_benchmark);
criterion_main!(benches);
