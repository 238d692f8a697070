// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the per-event work of the canvas: coordinate conversion,
//! wheel zoom and calibration clicks.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use ricegrid_calibration::calibration::CalibrationState;
use ricegrid_view::{DEFAULT_FIT_FRACTION, ViewTransform};

fn fitted_view() -> ViewTransform {
    let mut view = ViewTransform::new();
    view.fit_to_viewport(
        Size::new(2048.0, 1365.0),
        Size::new(1600.0, 900.0),
        DEFAULT_FIT_FRACTION,
    );
    view
}

fn screen_path(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            Point::new(100.0 + 1400.0 * t, 80.0 + 700.0 * (t * 6.0).sin().abs())
        })
        .collect()
}

fn bench_convert(c: &mut Criterion) {
    let view = fitted_view();
    let path = screen_path(1024);
    c.bench_function("view/screen_to_image_1024", |b| {
        b.iter(|| {
            path.iter()
                .map(|pt| view.screen_to_image(black_box(*pt)))
                .fold(0.0, |acc, p| acc + p.x)
        });
    });
}

fn bench_wheel(c: &mut Criterion) {
    let path = screen_path(256);
    c.bench_function("view/zoom_by_wheel_256", |b| {
        b.iter_batched(
            fitted_view,
            |mut view| {
                for (i, pt) in path.iter().enumerate() {
                    let dy = if i % 2 == 0 { -120.0 } else { 100.0 };
                    view.zoom_by_wheel(*pt, black_box(dy));
                }
                view
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_clicks(c: &mut Criterion) {
    let view = fitted_view();
    let path = screen_path(300);
    c.bench_function("calibration/click_300", |b| {
        b.iter_batched(
            || CalibrationState::new(Size::new(2048.0, 1365.0)),
            |mut cal| {
                for pt in &path {
                    cal.click(view.screen_to_image(black_box(*pt)));
                }
                cal
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_convert, bench_wheel, bench_clicks);
criterion_main!(benches);
