// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RiceGrid Layout: grid geometry over three calibration points.
//!
//! Three image-space points fix a rotated rectangle:
//!
//! - The first point is the origin.
//! - The second sets the horizontal axis and the width.
//! - The third sets the height, through its distance from that axis.
//!
//! [`AffineBasis`] resolves that frame. [`Partition`] divides it into groups
//! of `rows × cols` cells separated by a margin and by row, column and group
//! gaps. [`GridLayout`] then enumerates every [`Cell`] as an image-space
//! quadrilateral carrying its display number.
//!
//! ```rust
//! use kurbo::Point;
//! use ricegrid_layout::{GridConfig, GridLayout};
//!
//! let config = GridConfig::new(2, 2, 1).unwrap();
//! let layout = GridLayout::new(
//!     [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(0.0, 50.0)],
//!     &config,
//! )
//! .unwrap();
//!
//! assert_eq!(layout.cells().len(), 4);
//! assert_eq!(layout.cells()[3].top_left, Point::new(50.0, 25.0));
//! ```
//!
//! Extraction from the full-resolution image is planned by
//! [`ExtractionPlan`], which rescales preview-space input and turns each
//! cell into an integer crop of the rectified image.
//!
//! Geometry is recomputed from scratch on every call; nothing is cached.

mod basis;
mod cells;
mod config;
mod error;
mod extraction;
mod partition;

pub use basis::AffineBasis;
pub use cells::{Cell, GridLayout, sequence_index};
pub use config::{
    DEFAULT_GRID_COLOR, DEFAULT_PATCH_SIZE, GridConfig, GridConfigDraft, GroupDirection,
};
pub use error::{ConfigError, GeometryError, GridField};
pub use extraction::{
    CellCrop, DEFAULT_PATCH_LABEL, ExtractionPlan, PreviewScale, patch_file_name,
};
pub use partition::Partition;
