// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan gesture helper: turn pointer motion into view offsets.
//!
//! A pan starts when the secondary button goes down, produces one screen-space
//! delta per pointer move, and ends on button release or when the pointer
//! leaves the canvas.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use ricegrid_calibration::pan::PanDrag;
//!
//! let mut pan = PanDrag::default();
//! assert_eq!(pan.move_to(Point::new(3.0, 3.0)), None);
//!
//! pan.begin(Point::new(10.0, 10.0));
//! assert_eq!(pan.move_to(Point::new(14.0, 7.0)), Some(Vec2::new(4.0, -3.0)));
//! assert_eq!(pan.move_to(Point::new(15.0, 7.0)), Some(Vec2::new(1.0, 0.0)));
//!
//! pan.end();
//! assert!(!pan.is_active());
//! ```

use kurbo::{Point, Vec2};

/// Tracks an in-progress pan drag in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanDrag {
    last: Option<Point>,
}

impl PanDrag {
    /// Starts (or restarts) a pan at `pos`.
    pub fn begin(&mut self, pos: Point) {
        self.last = Some(pos);
    }

    /// Records a pointer move, returning the delta since the previous position.
    ///
    /// Returns `None` when no pan is active.
    pub fn move_to(&mut self, pos: Point) -> Option<Vec2> {
        let last = self.last?;
        self.last = Some(pos);
        Some(pos - last)
    }

    /// Ends the pan. Safe to call when no pan is active.
    pub fn end(&mut self) {
        self.last = None;
    }

    /// Returns `true` while a pan is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}
