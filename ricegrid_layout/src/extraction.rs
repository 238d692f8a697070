// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planning the crops an extraction service cuts from the full-resolution image.
//!
//! Calibration happens on a downscaled preview. Before cropping, the points
//! and every configured length are carried over to original-image pixels,
//! the image is rectified with [`AffineBasis::rectifying_affine`], and each
//! cell becomes an integer crop of the rectified canvas.

use kurbo::{Point, Size, Vec2};

use crate::basis::AffineBasis;
use crate::cells::GridLayout;
use crate::config::GridConfig;
use crate::error::GeometryError;

/// Label used in patch file names when the user gives none.
pub const DEFAULT_PATCH_LABEL: &str = "00000000";

/// Per-axis factor from preview pixels to original-image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewScale {
    /// `original.width / preview.width`.
    pub sx: f64,
    /// `original.height / preview.height`.
    pub sy: f64,
}

impl PreviewScale {
    /// No scaling; the preview is the original.
    pub const IDENTITY: Self = Self { sx: 1.0, sy: 1.0 };

    /// Computes the scale between a preview and the image it was made from.
    ///
    /// Returns `None` unless both sizes are positive and finite.
    #[must_use]
    pub fn new(preview: Size, original: Size) -> Option<Self> {
        let ok = |s: Size| s.width > 0.0 && s.height > 0.0 && s.is_finite();
        if !ok(preview) || !ok(original) {
            return None;
        }
        Some(Self {
            sx: original.width / preview.width,
            sy: original.height / preview.height,
        })
    }

    /// Scales a preview point into original-image pixels.
    #[must_use]
    pub fn apply(&self, pt: Point) -> Point {
        Point::new(pt.x * self.sx, pt.y * self.sy)
    }

    /// Scales all three calibration points.
    #[must_use]
    pub fn apply_all(&self, points: [Point; 3]) -> [Point; 3] {
        points.map(|p| self.apply(p))
    }

    /// The factors as a vector, for [`GridLayout::from_basis_scaled`].
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.sx, self.sy)
    }
}

impl Default for PreviewScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Integer crop of one cell on the rectified canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellCrop {
    /// Displayed number of the cell.
    pub number: i64,
    /// Left edge, in canvas pixels.
    pub x: u32,
    /// Top edge, in canvas pixels.
    pub y: u32,
    /// Width after clipping to the canvas.
    pub width: u32,
    /// Height after clipping to the canvas.
    pub height: u32,
    /// Whole patches that fit in the crop.
    pub patches: u32,
}

impl CellCrop {
    /// Whether the crop covers no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Top-left corners of each patch, row-major, relative to the crop.
    ///
    /// The `n`th item (counting from 1) is saved as patch `n`.
    pub fn patch_origins(&self, patch_size: u32) -> impl Iterator<Item = (u32, u32)> {
        let (across, down) = patch_grid(self.width, self.height, patch_size);
        (0..down).flat_map(move |py| (0..across).map(move |px| (px * patch_size, py * patch_size)))
    }
}

/// Everything an extraction service needs besides the pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionPlan {
    basis: AffineBasis,
    canvas_width: u32,
    canvas_height: u32,
    patch_size: u32,
    crops: Vec<CellCrop>,
}

impl ExtractionPlan {
    /// Plans the crops for preview-space `points` and `config`.
    ///
    /// `config` is in preview pixels as well; `scale` carries both into
    /// original-image pixels before anything is measured.
    pub fn new(
        points: [Point; 3],
        config: &GridConfig,
        scale: PreviewScale,
    ) -> Result<Self, GeometryError> {
        let basis = AffineBasis::from_triple(scale.apply_all(points))?;
        let layout = GridLayout::from_basis_scaled(basis, config, scale.to_vec2());
        Ok(Self::from_layout(&layout, config.patch_size()))
    }

    /// Plans the crops for a layout already in original-image pixels.
    #[must_use]
    pub fn from_layout(layout: &GridLayout, patch_size: u32) -> Self {
        let basis = *layout.basis();
        let canvas_width = truncate_px(basis.extent_x);
        let canvas_height = truncate_px(basis.extent_y);
        let partition = layout.partition();
        let w = round_px(partition.cell_width());
        let h = round_px(partition.cell_height());

        let crops = layout
            .cells()
            .iter()
            .map(|cell| {
                let o = partition.cell_offset(cell.group, cell.row, cell.col);
                let (x, width) = clip(round_px(o.x), w, canvas_width);
                let (y, height) = clip(round_px(o.y), h, canvas_height);
                let (across, down) = patch_grid(width, height, patch_size);
                CellCrop {
                    number: cell.number,
                    x,
                    y,
                    width,
                    height,
                    patches: across * down,
                }
            })
            .collect();

        Self {
            basis,
            canvas_width,
            canvas_height,
            patch_size,
            crops,
        }
    }

    /// The frame in original-image pixels; its rectifying affine produces the canvas.
    #[must_use]
    pub fn basis(&self) -> &AffineBasis {
        &self.basis
    }

    /// Size of the rectified canvas, `(extent_x, extent_y)` truncated to whole pixels.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Patch edge length.
    #[must_use]
    pub fn patch_size(&self) -> u32 {
        self.patch_size
    }

    /// One crop per cell, in sequence order.
    #[must_use]
    pub fn crops(&self) -> &[CellCrop] {
        &self.crops
    }

    /// Total number of patch files the plan produces.
    #[must_use]
    pub fn total_patches(&self) -> u64 {
        self.crops.iter().map(|c| u64::from(c.patches)).sum()
    }
}

/// File name of patch `patch_index` (1-based) of cell `number`.
///
/// ```
/// use ricegrid_layout::patch_file_name;
///
/// assert_eq!(patch_file_name(Some("20260206"), 101, 1), "20260206_101_0001.png");
/// assert_eq!(patch_file_name(None, 7, 12), "00000000_007_0012.png");
/// ```
#[must_use]
pub fn patch_file_name(label: Option<&str>, number: i64, patch_index: u32) -> String {
    let label = match label {
        Some(l) if !l.is_empty() => l,
        _ => DEFAULT_PATCH_LABEL,
    };
    format!("{label}_{number:03}_{patch_index:04}.png")
}

fn patch_grid(width: u32, height: u32, patch_size: u32) -> (u32, u32) {
    if patch_size == 0 {
        return (0, 0);
    }
    (width / patch_size, height / patch_size)
}

/// Clips the span `[start, start + len)` to `[0, limit)`.
fn clip(start: i64, len: i64, limit: u32) -> (u32, u32) {
    let limit = i64::from(limit);
    let lo = start.clamp(0, limit);
    let hi = start.saturating_add(len).clamp(lo, limit);
    // Both ends lie in `0..=limit`, which came from a u32.
    let to_u32 = |v: i64| u32::try_from(v).unwrap_or(u32::MAX);
    (to_u32(lo), to_u32(hi - lo))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate; canvas coordinates are far below i64::MAX"
)]
fn round_px(v: f64) -> i64 {
    v.round_ties_even() as i64
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate; negative and NaN extents become 0"
)]
fn truncate_px(v: f64) -> u32 {
    v.trunc() as u32
}
