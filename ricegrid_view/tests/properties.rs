// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sweeps over the invariants every `ViewTransform` has to uphold.
//!
//! Instead of a property-testing harness these tests walk a deterministic
//! lattice of screen points, scales and offsets, which is enough to cover the
//! clamping edges and the sign combinations.

use kurbo::{Point, Vec2};
use ricegrid_view::{MAX_SCALE, MIN_SCALE, ViewTransform};

const EPS: f64 = 1e-9;

fn transforms() -> Vec<ViewTransform> {
    let mut out = Vec::new();
    for scale in [MIN_SCALE, 0.1, 0.37, 1.0, 2.5, 13.0, MAX_SCALE] {
        for offset in [
            Vec2::ZERO,
            Vec2::new(125.0, -40.0),
            Vec2::new(-3_000.5, 1_234.25),
        ] {
            out.push(ViewTransform::from_parts(offset, scale));
        }
    }
    out
}

fn screen_points() -> Vec<Point> {
    let mut out = Vec::new();
    for x in [-500.0, 0.0, 0.5, 317.25, 1920.0] {
        for y in [-20.0, 0.0, 99.9, 1080.0] {
            out.push(Point::new(x, y));
        }
    }
    out
}

fn assert_close(a: Point, b: Point, tol: f64) {
    assert!(
        (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol,
        "{a:?} != {b:?} (tol {tol})"
    );
}

#[test]
fn screen_image_round_trip() {
    for view in transforms() {
        for sp in screen_points() {
            let back = view.image_to_screen(view.screen_to_image(sp));
            // Relative tolerance: offsets reach the thousands.
            assert_close(back, sp, EPS * 4_000.0);
        }
    }
}

#[test]
fn zoom_keeps_point_under_cursor() {
    for base in transforms() {
        for sp in screen_points() {
            for delta in [-100.0, -0.3, -0.01, 0.02, 0.75, 60.0] {
                let mut view = base;
                let before = view.screen_to_image(sp);
                view.zoom_at(sp, delta);
                let after = view.screen_to_image(sp);
                let tol = EPS * (1.0 + before.to_vec2().hypot());
                assert_close(after, before, tol * 100.0);
                assert!((MIN_SCALE..=MAX_SCALE).contains(&view.scale()));
            }
        }
    }
}

#[test]
fn pan_shifts_screen_positions_only() {
    let mut view = ViewTransform::from_parts(Vec2::new(10.0, 10.0), 2.0);
    let image_pt = Point::new(40.0, 25.0);
    let before = view.image_to_screen(image_pt);
    view.pan(Vec2::new(-7.0, 13.0));
    let after = view.image_to_screen(image_pt);
    assert_close(after, before + Vec2::new(-7.0, 13.0), EPS);
    assert_eq!(view.scale(), 2.0);
}
