// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::error::GeometryError;

/// Orthogonal frame spanned by three calibration points.
///
/// - `origin` is the first point.
/// - `unit_x` points from the first point towards the second.
/// - `unit_y` is `unit_x` turned by +90° (clockwise on a Y-down screen).
/// - `extent_x` is the distance between the first two points.
/// - `extent_y` is the distance of the third point from the X axis.
///
/// Only the perpendicular component of the third point is used, so it
/// controls the height of the frame but never its skew: the frame is a true
/// rectangle even when the clicks are not.
///
/// A local offset `(dx, dy)` maps to image space as
/// `origin + unit_x * dx + unit_y * dy`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineBasis {
    /// First calibration point; local `(0, 0)`.
    pub origin: Point,
    /// Unit vector along the local X axis.
    pub unit_x: Vec2,
    /// Unit vector along the local Y axis.
    pub unit_y: Vec2,
    /// Length of the frame along `unit_x`.
    pub extent_x: f64,
    /// Length of the frame along `unit_y`.
    pub extent_y: f64,
}

impl AffineBasis {
    /// Resolves the frame for calibration points `p1`, `p2`, `p3` (in click order).
    ///
    /// Fails with [`GeometryError::DegenerateBasis`] when `p1` and `p2`
    /// coincide (or are not finite), instead of producing NaN axes.
    pub fn from_points(p1: Point, p2: Point, p3: Point) -> Result<Self, GeometryError> {
        let v_x = p2 - p1;
        let extent_x = v_x.hypot();
        if !(extent_x > 0.0 && extent_x.is_finite()) {
            return Err(GeometryError::DegenerateBasis);
        }
        let unit_x = v_x / extent_x;
        let unit_y = Vec2::new(-unit_x.y, unit_x.x);
        let extent_y = (p3 - p1).dot(unit_y).abs();
        Ok(Self {
            origin: p1,
            unit_x,
            unit_y,
            extent_x,
            extent_y,
        })
    }

    /// Same as [`AffineBasis::from_points`], taking the points as an array.
    pub fn from_triple([p1, p2, p3]: [Point; 3]) -> Result<Self, GeometryError> {
        Self::from_points(p1, p2, p3)
    }

    /// Maps a local offset into image space.
    #[must_use]
    pub fn local_to_image(&self, local: Vec2) -> Point {
        self.origin + self.unit_x * local.x + self.unit_y * local.y
    }

    /// Maps an image point into local coordinates.
    #[must_use]
    pub fn image_to_local(&self, pt: Point) -> Vec2 {
        let v = pt - self.origin;
        Vec2::new(v.dot(self.unit_x), v.dot(self.unit_y))
    }

    /// Returns the local → image mapping as an affine transform.
    #[must_use]
    pub fn local_to_image_affine(&self) -> Affine {
        let Self {
            origin,
            unit_x,
            unit_y,
            ..
        } = *self;
        Affine::new([unit_x.x, unit_x.y, unit_y.x, unit_y.y, origin.x, origin.y])
    }

    /// Returns the image → local mapping as an affine transform.
    ///
    /// Applied to the source image this yields the rectified canvas: the
    /// first point lands at `(0, 0)`, the second at `(extent_x, 0)` and the
    /// frame corner opposite at `(extent_x, extent_y)`.
    #[must_use]
    pub fn rectifying_affine(&self) -> Affine {
        let Self {
            origin,
            unit_x,
            unit_y,
            ..
        } = *self;
        let o = origin.to_vec2();
        Affine::new([
            unit_x.x,
            unit_y.x,
            unit_x.y,
            unit_y.y,
            -o.dot(unit_x),
            -o.dot(unit_y),
        ])
    }

    /// Corners of the whole frame: top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            self.local_to_image(Vec2::ZERO),
            self.local_to_image(Vec2::new(self.extent_x, 0.0)),
            self.local_to_image(Vec2::new(self.extent_x, self.extent_y)),
            self.local_to_image(Vec2::new(0.0, self.extent_y)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn axis_aligned_points() {
        let b = AffineBasis::from_points(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 50.0),
        )
        .unwrap();
        assert_eq!(b.unit_x, Vec2::new(1.0, 0.0));
        assert_eq!(b.unit_y, Vec2::new(0.0, 1.0));
        assert_eq!(b.extent_x, 100.0);
        assert_eq!(b.extent_y, 50.0);
    }

    #[test]
    fn third_point_only_sets_height() {
        // p3 is skewed 30 units along X; only its perpendicular distance counts.
        let b = AffineBasis::from_points(
            Point::new(10.0, 10.0),
            Point::new(110.0, 10.0),
            Point::new(40.0, 70.0),
        )
        .unwrap();
        assert_eq!(b.extent_y, 60.0);
        assert!(close(b.corners()[3], Point::new(10.0, 70.0)));
    }

    #[test]
    fn third_point_on_other_side_still_gives_positive_height() {
        let b = AffineBasis::from_points(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(3.0, -4.0),
        )
        .unwrap();
        assert_eq!(b.extent_y, 4.0);
        // The frame still extends along +unit_y.
        assert!(close(b.corners()[3], Point::new(0.0, 4.0)));
    }

    #[test]
    fn rotated_frame_is_orthonormal() {
        let b = AffineBasis::from_points(
            Point::new(5.0, 5.0),
            Point::new(8.0, 9.0),
            Point::new(1.0, 8.0),
        )
        .unwrap();
        assert!((b.extent_x - 5.0).abs() < 1e-12);
        assert!((b.unit_x.hypot() - 1.0).abs() < 1e-12);
        assert!((b.unit_y.hypot() - 1.0).abs() < 1e-12);
        assert!(b.unit_x.dot(b.unit_y).abs() < 1e-12);
        // (1,8) - (5,5) = (-4, 3); unit_y = (-0.8, 0.6); projection = 5.
        assert!((b.extent_y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let p = Point::new(10.0, 10.0);
        assert_eq!(
            AffineBasis::from_points(p, p, Point::new(20.0, 20.0)),
            Err(GeometryError::DegenerateBasis)
        );
        assert_eq!(
            AffineBasis::from_points(Point::new(f64::NAN, 0.0), p, p),
            Err(GeometryError::DegenerateBasis)
        );
    }

    #[test]
    fn collinear_third_point_gives_zero_height() {
        let b = AffineBasis::from_points(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        )
        .unwrap();
        assert_eq!(b.extent_y, 0.0);
    }

    #[test]
    fn affines_agree_with_point_mapping() {
        let b = AffineBasis::from_points(
            Point::new(30.0, 12.0),
            Point::new(80.0, 40.0),
            Point::new(10.0, 60.0),
        )
        .unwrap();
        let local = Vec2::new(7.5, -3.25);
        let img = b.local_to_image(local);
        assert!(close(b.local_to_image_affine() * local.to_point(), img));
        assert!(close(b.rectifying_affine() * img, local.to_point()));
        assert!(close(b.image_to_local(img).to_point(), local.to_point()));
        assert!(close(b.rectifying_affine() * b.origin, Point::ORIGIN));
    }
}
