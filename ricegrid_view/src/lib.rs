// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RiceGrid View: the pan/zoom mapping between an image and the screen.
//!
//! A [`ViewTransform`] records where the image origin sits on screen and how
//! many screen pixels one image unit covers. It is used for two things:
//! - Rendering: draw the image and any image-space overlay through
//!   [`ViewTransform::image_to_screen_affine`].
//! - Input: convert pointer positions into image coordinates with
//!   [`ViewTransform::screen_to_image`] before acting on them.
//!
//! The crate is headless. It does not own the image, the viewport or the
//! event loop; callers feed it viewport sizes, wheel deltas and drag deltas.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use ricegrid_view::{DEFAULT_FIT_FRACTION, ViewTransform};
//!
//! // A 2000x1000 preview shown in an 800x600 canvas.
//! let mut view = ViewTransform::new();
//! view.fit_to_viewport(
//!     Size::new(2000.0, 1000.0),
//!     Size::new(800.0, 600.0),
//!     DEFAULT_FIT_FRACTION,
//! );
//!
//! // A click in the middle of the canvas lands in the middle of the image.
//! let image_pt = view.screen_to_image(Point::new(400.0, 300.0));
//! assert!((image_pt.x - 1000.0).abs() < 1e-9);
//! assert!((image_pt.y - 500.0).abs() < 1e-9);
//! ```
//!
//! ## Zooming
//!
//! Zoom is additive: [`ViewTransform::zoom_at`] adds a delta to the scale and
//! clamps it into [`MIN_SCALE`]`..=`[`MAX_SCALE`]. The image point under the
//! anchor stays under the anchor.
//!
//! ```rust
//! use kurbo::Point;
//! use ricegrid_view::ViewTransform;
//!
//! let mut view = ViewTransform::new();
//! let cursor = Point::new(120.0, 80.0);
//! let before = view.screen_to_image(cursor);
//! view.zoom_at(cursor, 0.5);
//! let after = view.screen_to_image(cursor);
//! assert!((before - after).hypot() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod view_transform;

pub use view_transform::{
    DEFAULT_FIT_FRACTION, MAX_SCALE, MIN_SCALE, ViewTransform, WHEEL_ZOOM_SPEED,
};
