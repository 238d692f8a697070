// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Smallest zoom factor a [`ViewTransform`] will accept.
pub const MIN_SCALE: f64 = 0.05;

/// Largest zoom factor a [`ViewTransform`] will accept.
pub const MAX_SCALE: f64 = 50.0;

/// Fraction of the viewport an image occupies after [`ViewTransform::fit_to_viewport`].
pub const DEFAULT_FIT_FRACTION: f64 = 0.85;

/// Scale change per unit of wheel delta in [`ViewTransform::zoom_by_wheel`].
pub const WHEEL_ZOOM_SPEED: f64 = 0.001;

/// Pan + zoom mapping between image space and screen space.
///
/// The image-space origin is drawn at `offset` (in screen pixels) and one
/// image unit covers `scale` screen pixels:
///
/// ```text
/// screen = image * scale + offset
/// image  = (screen - offset) / scale
/// ```
///
/// The scale always lies in [`MIN_SCALE`]`..=`[`MAX_SCALE`]. The offset is
/// unbounded, so the image may be panned fully out of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    offset: Vec2,
    scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTransform {
    /// Creates an identity transform: scale `1.0`, image origin at the screen origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }

    /// Creates a transform from an explicit offset and scale.
    ///
    /// The scale is clamped into the supported range; a non-finite scale
    /// falls back to `1.0`.
    #[must_use]
    pub fn from_parts(offset: Vec2, scale: f64) -> Self {
        Self {
            offset,
            scale: sanitize_scale(scale),
        }
    }

    /// Returns the current zoom factor (screen pixels per image unit).
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the screen-space position of the image origin.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Fits an image of `image` size into a viewport of `viewport` size.
    ///
    /// The image is scaled uniformly so that it covers `fraction` of the
    /// limiting viewport axis and is then centered in the viewport. Degenerate
    /// sizes leave the transform unchanged.
    pub fn fit_to_viewport(&mut self, image: Size, viewport: Size, fraction: f64) {
        if !(image.width > 0.0 && image.height > 0.0) {
            return;
        }
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            return;
        }

        let sx = viewport.width * fraction / image.width;
        let sy = viewport.height * fraction / image.height;
        let scale = sanitize_scale(sx.min(sy));

        self.scale = scale;
        self.offset = Vec2::new(
            (viewport.width - image.width * scale) / 2.0,
            (viewport.height - image.height * scale) / 2.0,
        );
    }

    /// Changes the scale by `delta` while keeping the image point under
    /// `anchor` (a screen position) fixed on screen.
    ///
    /// A non-finite `delta` or `anchor` leaves the view unchanged.
    pub fn zoom_at(&mut self, anchor: Point, delta: f64) {
        if !delta.is_finite() || !anchor.is_finite() {
            return;
        }
        let new_scale = sanitize_scale(self.scale + delta);
        if new_scale == self.scale {
            return;
        }
        let factor = new_scale / self.scale;
        let anchor = anchor.to_vec2();
        self.offset = anchor - (anchor - self.offset) * factor;
        self.scale = new_scale;
    }

    /// Zooms around `anchor` in response to a mouse wheel event.
    ///
    /// Negative `wheel_delta_y` (scrolling up) zooms in.
    pub fn zoom_by_wheel(&mut self, anchor: Point, wheel_delta_y: f64) {
        self.zoom_at(anchor, -wheel_delta_y * WHEEL_ZOOM_SPEED);
    }

    /// Moves the image by `delta` screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Converts a screen position into image coordinates.
    #[must_use]
    pub fn screen_to_image(&self, pt: Point) -> Point {
        Point::new(
            (pt.x - self.offset.x) / self.scale,
            (pt.y - self.offset.y) / self.scale,
        )
    }

    /// Converts an image position into screen coordinates.
    #[must_use]
    pub fn image_to_screen(&self, pt: Point) -> Point {
        Point::new(
            pt.x * self.scale + self.offset.x,
            pt.y * self.scale + self.offset.y,
        )
    }

    /// Converts a length in screen pixels into image units.
    ///
    /// Renderers use this to keep strokes, markers and labels at a constant
    /// on-screen size regardless of zoom.
    #[must_use]
    pub fn screen_length_to_image(&self, px: f64) -> f64 {
        px / self.scale
    }

    /// Returns the image → screen mapping as an affine transform.
    #[must_use]
    pub fn image_to_screen_affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Returns the screen → image mapping as an affine transform.
    #[must_use]
    pub fn screen_to_image_affine(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Returns the image-space rectangle visible through `viewport` (in screen pixels).
    #[must_use]
    pub fn visible_image_rect(&self, viewport: Rect) -> Rect {
        let p0 = self.screen_to_image(viewport.origin());
        let p1 = self.screen_to_image(Point::new(viewport.max_x(), viewport.max_y()));
        Rect::from_points(p0, p1)
    }
}

fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    }
}
