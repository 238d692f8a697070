// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RiceGrid Calibration: pointer-driven state machines for grid calibration.
//!
//! This crate holds the small pieces of interaction state that have to
//! survive across pointer events:
//!
//! - [`calibration`]: collect the three image-space points that anchor a
//!   grid, ignoring clicks outside the image and restarting on a fourth click.
//! - [`pan`]: turn a secondary-button drag into screen-space pan deltas.
//!
//! Both work on positions the caller has already resolved. Calibration
//! expects image-space points (see `ricegrid_view::ViewTransform::screen_to_image`);
//! panning works directly in screen space.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use ricegrid_calibration::calibration::{CalibrationPhase, CalibrationState};
//!
//! let mut cal = CalibrationState::new(Size::new(640.0, 480.0));
//! for pt in [Point::new(10.0, 10.0), Point::new(600.0, 30.0), Point::new(20.0, 400.0)] {
//!     cal.click(pt);
//! }
//! assert_eq!(cal.phase(), CalibrationPhase::Ready);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod calibration;
pub mod pan;
