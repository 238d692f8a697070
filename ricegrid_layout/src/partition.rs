// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

use crate::basis::AffineBasis;
use crate::config::{GridConfig, GroupDirection};

/// Cell and group sizes for a grid laid over a frame.
///
/// All values are local lengths along the basis axes. Nothing is clamped: if
/// margins and gaps eat more than the available extent, the cell sizes come
/// out negative and the resulting cells are inverted. That is left to the
/// caller to prevent; the partition itself never fails.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Partition {
    direction: GroupDirection,
    margin: Vec2,
    row_gap: f64,
    col_gap: f64,
    group_gap: f64,
    cell_width: f64,
    cell_height: f64,
    group_width: f64,
    group_height: f64,
}

impl Partition {
    /// Partitions a frame of `extent_x` by `extent_y` according to `config`.
    #[must_use]
    pub fn new(extent_x: f64, extent_y: f64, config: &GridConfig) -> Self {
        Self::scaled(extent_x, extent_y, config, Vec2::new(1.0, 1.0))
    }

    /// Like [`Partition::new`], with the configured lengths first converted
    /// into the frame's pixel space.
    ///
    /// Every length is multiplied by the scale of the axis it runs along:
    /// `scale.x` for the column gap and the left/right margins, `scale.y` for
    /// the row gap and the top/bottom margins. The group gap uses the scale of
    /// the axis its groups are laid out on.
    #[must_use]
    pub fn scaled(extent_x: f64, extent_y: f64, config: &GridConfig, scale: Vec2) -> Self {
        let rows = f64::from(config.rows());
        let cols = f64::from(config.cols());
        let groups = f64::from(config.groups());
        let margin = scale * config.margin();
        let row_gap = config.row_gap() * scale.y;
        let col_gap = config.col_gap() * scale.x;
        let direction = config.group_direction();
        let group_gap = config.group_gap()
            * match direction {
                GroupDirection::Horizontal => scale.x,
                GroupDirection::Vertical => scale.y,
            };

        let (cell_width, cell_height, group_width, group_height) = match direction {
            GroupDirection::Horizontal => {
                let group_width = (extent_x - 2.0 * margin.x - group_gap * (groups - 1.0)) / groups;
                let cell_width = (group_width - col_gap * (cols - 1.0)) / cols;
                let cell_height = (extent_y - 2.0 * margin.y - row_gap * (rows - 1.0)) / rows;
                let group_height = cell_height * rows + row_gap * (rows - 1.0);
                (cell_width, cell_height, group_width, group_height)
            }
            GroupDirection::Vertical => {
                let group_height = (extent_y - 2.0 * margin.y - group_gap * (groups - 1.0)) / groups;
                let cell_width = (extent_x - 2.0 * margin.x - col_gap * (cols - 1.0)) / cols;
                let cell_height = (group_height - row_gap * (rows - 1.0)) / rows;
                let group_width = cell_width * cols + col_gap * (cols - 1.0);
                (cell_width, cell_height, group_width, group_height)
            }
        };

        Self {
            direction,
            margin,
            row_gap,
            col_gap,
            group_gap,
            cell_width,
            cell_height,
            group_width,
            group_height,
        }
    }

    /// Partitions the frame of `basis`.
    #[must_use]
    pub fn for_basis(basis: &AffineBasis, config: &GridConfig) -> Self {
        Self::new(basis.extent_x, basis.extent_y, config)
    }

    /// Width of one cell along the basis X axis.
    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Height of one cell along the basis Y axis.
    #[must_use]
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Width of one group, gaps between its columns included.
    #[must_use]
    pub fn group_width(&self) -> f64 {
        self.group_width
    }

    /// Height of one group, gaps between its rows included.
    #[must_use]
    pub fn group_height(&self) -> f64 {
        self.group_height
    }

    /// Axis along which groups repeat.
    #[must_use]
    pub fn direction(&self) -> GroupDirection {
        self.direction
    }

    /// Distance from the start of one group to the start of the next.
    #[must_use]
    pub fn group_pitch(&self) -> Vec2 {
        match self.direction {
            GroupDirection::Horizontal => Vec2::new(self.group_width + self.group_gap, 0.0),
            GroupDirection::Vertical => Vec2::new(0.0, self.group_height + self.group_gap),
        }
    }

    /// Local offset of the top-left corner of group `group`.
    #[must_use]
    pub fn group_offset(&self, group: u32) -> Vec2 {
        self.margin + self.group_pitch() * f64::from(group)
    }

    /// Local offset of the top-left corner of a cell.
    #[must_use]
    pub fn cell_offset(&self, group: u32, row: u32, col: u32) -> Vec2 {
        let within = Vec2::new(
            f64::from(col) * (self.cell_width + self.col_gap),
            f64::from(row) * (self.cell_height + self.row_gap),
        );
        self.group_offset(group) + within
    }
}
