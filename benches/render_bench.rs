//! Benchmarks for adaptive_table planning, wrapping and rendering.

use adaptive_table::cells::cell_len;
use adaptive_table::layout::{LayoutPlanner, Overhead};
use adaptive_table::markup;
use adaptive_table::prelude::*;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

const PARAGRAPH: &str = "This is a longer string that needs to be wrapped to fit within a \
    certain width. It contains multiple words and should demonstrate the wrapping algorithm.";

fn sample_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            Row::from(vec![
                format!("User{i}"),
                format!("<info>{}</info>", 20 + i),
                "New York".to_string(),
                format!("<comment>{PARAGRAPH}</comment>"),
            ])
        })
        .collect()
}

fn benchmark_plan(c: &mut Criterion) {
    let headers = vec![Row::from(vec!["Name", "Age", "City", "Notes"])];
    let small = sample_rows(3);
    let large = sample_rows(100);
    let planner = LayoutPlanner::new(80, 10, Overhead::default());

    c.bench_function("plan_3_rows", |b| {
        b.iter(|| black_box(planner.plan(&headers, &small)));
    });

    c.bench_function("plan_100_rows", |b| {
        b.iter(|| black_box(planner.plan(&headers, &large)));
    });
}

fn benchmark_wrap(c: &mut Criterion) {
    let styled = format!("<info>{PARAGRAPH}</info> <error>and <options=bold>more</> text</error>");

    c.bench_function("wrap_plain_40", |b| {
        b.iter(|| black_box(wrap_plain(PARAGRAPH, 40)));
    });

    c.bench_function("wrap_markup_40", |b| {
        b.iter(|| black_box(wrap(&styled, 40)));
    });

    c.bench_function("wrap_markup_fits", |b| {
        b.iter(|| black_box(wrap(&styled, 400)));
    });
}

fn benchmark_markup(c: &mut Criterion) {
    let styled = format!("<info>{PARAGRAPH}</info>");

    c.bench_function("markup_strip", |b| {
        b.iter(|| black_box(markup::strip(&styled)));
    });

    c.bench_function("markup_validate", |b| {
        b.iter(|| black_box(markup::validate(&styled)));
    });

    c.bench_function("cell_len_ascii", |b| {
        b.iter(|| black_box(cell_len(PARAGRAPH)));
    });

    c.bench_function("cell_len_cjk", |b| {
        b.iter(|| black_box(cell_len("日本語のテキストです")));
    });
}

fn benchmark_render(c: &mut Criterion) {
    let rows = sample_rows(10);

    c.bench_function("render_10_rows_80", |b| {
        b.iter(|| {
            let mut table = AdaptiveTable::builder()
                .max_width(80)
                .build(Console::new(Vec::new()));
            table
                .set_headers([vec!["Name", "Age", "City", "Notes"]])
                .unwrap_or_default();
            table.add_rows(rows.clone()).unwrap_or_default();
            black_box(table.render_to_string())
        });
    });

    c.bench_function("render_10_rows_color", |b| {
        b.iter(|| {
            let mut console = Console::new(Vec::new()).with_color(true);
            let mut table = AdaptiveTable::builder().max_width(60).build(&mut console);
            table.add_rows(rows.clone()).unwrap_or_default();
            black_box(table.render()).unwrap_or_default();
        });
    });
}

criterion_group!(
    benches,
    benchmark_plan,
    benchmark_wrap,
    benchmark_markup,
    benchmark_render,
);
criterion_main!(benches);
