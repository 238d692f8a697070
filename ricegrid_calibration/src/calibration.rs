// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three-click calibration: collect the points that anchor the grid.
//!
//! ## Usage
//!
//! 1) Create a [`CalibrationState`] with the bounds of the loaded image.
//! 2) Convert each primary click into image space and pass it to
//!    [`CalibrationState::click`].
//! 3) Once [`CalibrationState::phase`] is [`CalibrationPhase::Ready`], take the
//!    points from [`CalibrationState::triple`] and derive the grid from them.
//! 4) Call [`CalibrationState::reset`] whenever a new image is loaded.
//!
//! The point order matters: the first point anchors the top-left corner, the
//! second fixes the horizontal axis, the third fixes the height.
//!
//! A click on a ready calibration starts over: the new point becomes the
//! first point of a fresh calibration, so no explicit "clear" is needed.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use ricegrid_calibration::calibration::{CalibrationPhase, CalibrationState, ClickOutcome};
//!
//! let mut cal = CalibrationState::new(Size::new(100.0, 100.0));
//! cal.click(Point::new(0.0, 0.0));
//! cal.click(Point::new(90.0, 0.0));
//! assert_eq!(cal.click(Point::new(0.0, 40.0)), ClickOutcome::Added { count: 3 });
//! assert_eq!(cal.phase(), CalibrationPhase::Ready);
//!
//! // Outside the image: ignored.
//! assert_eq!(cal.click(Point::new(-1.0, 5.0)), ClickOutcome::Ignored);
//!
//! // Fourth click restarts with a single point.
//! assert_eq!(cal.click(Point::new(5.0, 5.0)), ClickOutcome::Restarted);
//! assert_eq!(cal.points(), &[Point::new(5.0, 5.0)]);
//! ```

use kurbo::{Point, Size};
use smallvec::SmallVec;

/// Number of points a complete calibration holds.
pub const CALIBRATION_POINTS: usize = 3;

/// Coarse progress of a [`CalibrationState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationPhase {
    /// No points recorded.
    Empty,
    /// One or two points recorded; the payload is the count.
    Partial(usize),
    /// All three points recorded; the grid can be derived.
    Ready,
}

/// What a click did to a [`CalibrationState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The point fell outside the image and was dropped.
    Ignored,
    /// The point was appended; `count` is the new number of points.
    Added {
        /// Number of recorded points after the click.
        count: usize,
    },
    /// The calibration was ready; it now holds only the new point.
    Restarted,
}

/// Returned by [`CalibrationState::restore`] when given more than three points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("a calibration holds at most 3 points, got {0}")]
pub struct TooManyPoints(pub usize);

/// Ordered calibration points for a single image.
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationState {
    bounds: Size,
    points: SmallVec<[Point; CALIBRATION_POINTS]>,
}

impl CalibrationState {
    /// Creates an empty calibration for an image of the given size.
    #[must_use]
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds,
            points: SmallVec::new(),
        }
    }

    /// Forgets all points and adopts the bounds of a newly loaded image.
    pub fn reset(&mut self, bounds: Size) {
        self.bounds = bounds;
        self.points.clear();
    }

    /// Returns the image bounds clicks are checked against.
    #[must_use]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Returns `true` if `pt` lies inside `[0, width] x [0, height]`, edges included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        (0.0..=self.bounds.width).contains(&pt.x) && (0.0..=self.bounds.height).contains(&pt.y)
    }

    /// Feeds one image-space click into the state machine.
    pub fn click(&mut self, pt: Point) -> ClickOutcome {
        if !self.contains(pt) {
            log::debug!("calibration click at ({}, {}) is outside the image", pt.x, pt.y);
            return ClickOutcome::Ignored;
        }
        if self.points.len() == CALIBRATION_POINTS {
            self.points.clear();
            self.points.push(pt);
            log::debug!("calibration restarted at ({}, {})", pt.x, pt.y);
            return ClickOutcome::Restarted;
        }
        self.points.push(pt);
        let count = self.points.len();
        log::debug!("calibration point {count} at ({}, {})", pt.x, pt.y);
        ClickOutcome::Added { count }
    }

    /// Replaces the recorded points wholesale, for example from a saved preset.
    ///
    /// Restored points are not checked against the image bounds.
    pub fn restore(&mut self, points: &[Point]) -> Result<(), TooManyPoints> {
        if points.len() > CALIBRATION_POINTS {
            return Err(TooManyPoints(points.len()));
        }
        self.points.clear();
        self.points.extend_from_slice(points);
        Ok(())
    }

    /// Returns the recorded points in click order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of recorded points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> CalibrationPhase {
        match self.points.len() {
            0 => CalibrationPhase::Empty,
            CALIBRATION_POINTS => CalibrationPhase::Ready,
            n => CalibrationPhase::Partial(n),
        }
    }

    /// Returns the three points once the calibration is ready.
    #[must_use]
    pub fn triple(&self) -> Option<[Point; CALIBRATION_POINTS]> {
        match self.points[..] {
            [p1, p2, p3] => Some([p1, p2, p3]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Size {
        Size::new(200.0, 100.0)
    }

    #[test]
    fn new_state_is_empty() {
        let cal = CalibrationState::new(bounds());
        assert!(cal.is_empty());
        assert_eq!(cal.phase(), CalibrationPhase::Empty);
        assert_eq!(cal.triple(), None);
    }

    #[test]
    fn clicks_advance_through_phases() {
        let mut cal = CalibrationState::new(bounds());

        assert_eq!(cal.click(Point::new(1.0, 1.0)), ClickOutcome::Added { count: 1 });
        assert_eq!(cal.phase(), CalibrationPhase::Partial(1));

        assert_eq!(cal.click(Point::new(2.0, 1.0)), ClickOutcome::Added { count: 2 });
        assert_eq!(cal.phase(), CalibrationPhase::Partial(2));

        assert_eq!(cal.click(Point::new(1.0, 9.0)), ClickOutcome::Added { count: 3 });
        assert_eq!(cal.phase(), CalibrationPhase::Ready);
        assert_eq!(
            cal.triple(),
            Some([Point::new(1.0, 1.0), Point::new(2.0, 1.0), Point::new(1.0, 9.0)])
        );
    }

    #[test]
    fn edges_are_inside() {
        let cal = CalibrationState::new(bounds());
        assert!(cal.contains(Point::new(0.0, 0.0)));
        assert!(cal.contains(Point::new(200.0, 100.0)));
        assert!(!cal.contains(Point::new(200.001, 50.0)));
        assert!(!cal.contains(Point::new(10.0, -0.001)));
        assert!(!cal.contains(Point::new(f64::NAN, 10.0)));
    }

    #[test]
    fn out_of_bounds_click_changes_nothing() {
        let mut cal = CalibrationState::new(bounds());
        cal.click(Point::new(5.0, 5.0));
        let before = cal.clone();

        assert_eq!(cal.click(Point::new(500.0, 5.0)), ClickOutcome::Ignored);
        assert_eq!(cal, before);
    }

    #[test]
    fn out_of_bounds_click_does_not_restart_ready_state() {
        let mut cal = CalibrationState::new(bounds());
        cal.click(Point::new(0.0, 0.0));
        cal.click(Point::new(10.0, 0.0));
        cal.click(Point::new(0.0, 10.0));

        assert_eq!(cal.click(Point::new(-5.0, -5.0)), ClickOutcome::Ignored);
        assert_eq!(cal.phase(), CalibrationPhase::Ready);
    }

    #[test]
    fn reset_clears_and_updates_bounds() {
        let mut cal = CalibrationState::new(bounds());
        cal.click(Point::new(150.0, 50.0));

        cal.reset(Size::new(100.0, 100.0));
        assert!(cal.is_empty());
        assert_eq!(cal.bounds(), Size::new(100.0, 100.0));
        assert_eq!(cal.click(Point::new(150.0, 50.0)), ClickOutcome::Ignored);
    }

    #[test]
    fn restore_accepts_up_to_three_points() {
        let mut cal = CalibrationState::new(bounds());
        let pts = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        assert_eq!(cal.restore(&pts), Ok(()));
        assert_eq!(cal.points(), &pts);

        let four = [Point::ORIGIN; 4];
        assert_eq!(cal.restore(&four), Err(TooManyPoints(4)));
        assert_eq!(cal.points(), &pts);
    }
}
