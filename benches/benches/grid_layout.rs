// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for deriving grids and extraction plans from calibration points.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use ricegrid_layout::{
    AffineBasis, ExtractionPlan, GridConfig, GridLayout, GroupDirection, PreviewScale,
};

/// Calibration of a frame rotated by a few degrees, as clicked on a preview.
fn tilted_points() -> [Point; 3] {
    let angle = 4.0_f64.to_radians();
    let ux = Vec2::new(angle.cos(), angle.sin());
    let uy = Vec2::new(-ux.y, ux.x);
    let p1 = Point::new(60.0, 40.0);
    [p1, p1 + ux * 1800.0, p1 + uy * 1200.0 + ux * 9.0]
}

fn config(rows: i64, cols: i64, groups: i64, direction: GroupDirection) -> GridConfig {
    let mut cfg = GridConfig::new(rows, cols, groups).unwrap();
    cfg.set_margin(6.0).unwrap();
    cfg.set_gaps(4.0, 4.0, 16.0).unwrap();
    cfg.set_group_direction(direction);
    cfg
}

fn bench_basis(c: &mut Criterion) {
    let [p1, p2, p3] = tilted_points();
    c.bench_function("basis/from_points", |b| {
        b.iter(|| AffineBasis::from_points(black_box(p1), black_box(p2), black_box(p3)));
    });
}

fn bench_layout(c: &mut Criterion) {
    let points = tilted_points();
    let mut group = c.benchmark_group("layout/cells");
    for (rows, cols, groups) in [(6, 4, 1), (12, 8, 4), (40, 30, 8)] {
        for direction in [GroupDirection::Horizontal, GroupDirection::Vertical] {
            let cfg = config(rows, cols, groups, direction);
            group.throughput(Throughput::Elements(u64::from(cfg.cell_count())));
            let id = BenchmarkId::new(format!("{direction:?}"), cfg.cell_count());
            group.bench_with_input(id, &cfg, |b, cfg| {
                b.iter(|| GridLayout::new(black_box(points), cfg).unwrap());
            });
        }
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let cfg = config(12, 8, 4, GroupDirection::Horizontal);
    let layout = GridLayout::new(tilted_points(), &cfg).unwrap();
    let probes: Vec<Point> = layout.cells().iter().map(|cell| cell.center()).collect();
    c.bench_function("layout/cell_at", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|pt| layout.cell_at(black_box(**pt)).is_some())
                .count()
        });
    });
}

fn bench_plan(c: &mut Criterion) {
    let points = tilted_points();
    let scale = PreviewScale::new(Size::new(2048.0, 1365.0), Size::new(12000.0, 8000.0)).unwrap();
    let mut group = c.benchmark_group("extraction/plan");
    for (rows, cols, groups) in [(6, 4, 1), (40, 30, 8)] {
        let cfg = config(rows, cols, groups, GroupDirection::Horizontal);
        group.throughput(Throughput::Elements(u64::from(cfg.cell_count())));
        group.bench_with_input(BenchmarkId::from_parameter(cfg.cell_count()), &cfg, |b, cfg| {
            b.iter(|| ExtractionPlan::new(black_box(points), cfg, scale).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_basis, bench_layout, bench_hit_test, bench_plan);
criterion_main!(benches);
