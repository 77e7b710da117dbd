//! Benchmarks for notation expansion and grid construction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gto_range_trainer::data::{Category, TrainerData};
use gto_range_trainer::range::{aggregate_line, parse_list};

const RANGE_DATA: &str = include_str!("../data/range_data.json");

fn notation_benchmark(c: &mut Criterion) {
    c.bench_function("parse_list_mixed_tokens", |b| {
        b.iter(|| parse_list(black_box("22+, A2s+, K8s-K6s, KTo+, QJs(mixed), 99-, A9s-")))
    });
}

fn combo_benchmark(c: &mut Criterion) {
    let line = "AhAd, AsAc, [50]KhKd, KsKc[/50], [25.5]Ah5h, As5s, Ad5d[/25.5], 9h9d, 9s9c";
    c.bench_function("aggregate_combo_line", |b| b.iter(|| aggregate_line(black_box(line))));
}

fn grid_benchmark(c: &mut Criterion) {
    let data = match TrainerData::from_json_str(RANGE_DATA) {
        Ok(data) => data,
        Err(e) => panic!("bundled range data failed to load: {}", e),
    };

    c.bench_function("build_all_cash_grids", |b| {
        b.iter(|| {
            let mut built = 0;
            for category in Category::all() {
                for record in data.scenarios("cash", *category) {
                    black_box(record.build_grid(*category));
                    built += 1;
                }
            }
            built
        })
    });

    if let Some(record) = data.scenarios("cash", Category::BbDefense).first() {
        let grid = record.build_grid(Category::BbDefense);
        c.bench_function("borderline_cells", |b| b.iter(|| black_box(&grid).borderline_cells()));
    }
}

criterion_group!(benches, notation_benchmark, combo_benchmark, grid_benchmark);
criterion_main!(benches);
