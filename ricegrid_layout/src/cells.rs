// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::basis::AffineBasis;
use crate::config::{GridConfig, GroupDirection};
use crate::error::GeometryError;
use crate::partition::Partition;

/// One numbered cell of the calibrated grid, in image space.
///
/// The corners form a rectangle in the basis frame; in image space it is
/// rotated along with the basis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// 1-based position in the numbering sequence.
    pub index: u32,
    /// Displayed and exported number: `index + start_number - 1`.
    pub number: i64,
    /// Group the cell belongs to.
    pub group: u32,
    /// Row within the group.
    pub row: u32,
    /// Column within the group.
    pub col: u32,
    /// Top-left corner.
    pub top_left: Point,
    /// Top-right corner.
    pub top_right: Point,
    /// Bottom-left corner.
    pub bottom_left: Point,
    /// Bottom-right corner.
    pub bottom_right: Point,
}

impl Cell {
    /// Where the cell number is drawn.
    #[must_use]
    pub fn center(&self) -> Point {
        self.top_left.midpoint(self.bottom_right)
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn outline(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

/// 1-based sequence index of cell `(group, row, col)`.
///
/// - [`GroupDirection::Horizontal`]: rows outermost, then groups left to
///   right, then columns: `row * groups * cols + group * cols + col + 1`.
/// - [`GroupDirection::Vertical`]: groups outermost, then rows, then columns:
///   `group * rows * cols + row * cols + col + 1`.
///
/// Exported patch files are named after these numbers, so the two orderings
/// are fixed.
#[must_use]
pub fn sequence_index(config: &GridConfig, group: u32, row: u32, col: u32) -> u32 {
    let (rows, cols, groups) = (config.rows(), config.cols(), config.groups());
    match config.group_direction() {
        GroupDirection::Horizontal => row * (groups * cols) + group * cols + col + 1,
        GroupDirection::Vertical => group * (rows * cols) + row * cols + col + 1,
    }
}

/// Visits every `(group, row, col)` triple in ascending sequence order.
fn for_each_in_sequence(config: &GridConfig, mut f: impl FnMut(u32, u32, u32)) {
    let (rows, cols, groups) = (config.rows(), config.cols(), config.groups());
    match config.group_direction() {
        GroupDirection::Horizontal => {
            for r in 0..rows {
                for g in 0..groups {
                    for c in 0..cols {
                        f(g, r, c);
                    }
                }
            }
        }
        GroupDirection::Vertical => {
            for g in 0..groups {
                for r in 0..rows {
                    for c in 0..cols {
                        f(g, r, c);
                    }
                }
            }
        }
    }
}

/// Every cell of a grid, derived from a basis and a configuration.
///
/// Cells are stored in ascending sequence order, so `cells()[i].index == i + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    basis: AffineBasis,
    partition: Partition,
    cells: Vec<Cell>,
}

impl GridLayout {
    /// Derives the grid for three calibration points.
    pub fn new(points: [Point; 3], config: &GridConfig) -> Result<Self, GeometryError> {
        let basis = AffineBasis::from_triple(points)?;
        Ok(Self::from_basis(basis, config))
    }

    /// Derives the grid for an already resolved basis.
    #[must_use]
    pub fn from_basis(basis: AffineBasis, config: &GridConfig) -> Self {
        Self::from_partition(basis, Partition::for_basis(&basis, config), config)
    }

    /// Derives the grid for a basis whose pixels differ from the units of
    /// `config`; see [`Partition::scaled`].
    #[must_use]
    pub fn from_basis_scaled(basis: AffineBasis, config: &GridConfig, scale: Vec2) -> Self {
        let partition = Partition::scaled(basis.extent_x, basis.extent_y, config, scale);
        Self::from_partition(basis, partition, config)
    }

    fn from_partition(basis: AffineBasis, partition: Partition, config: &GridConfig) -> Self {
        let width = basis.unit_x * partition.cell_width();
        let height = basis.unit_y * partition.cell_height();
        let start = config.start_number();

        let mut cells = Vec::with_capacity(config.cell_count() as usize);
        for_each_in_sequence(config, |group, row, col| {
            let index = sequence_index(config, group, row, col);
            let top_left = basis.local_to_image(partition.cell_offset(group, row, col));
            let top_right = top_left + width;
            cells.push(Cell {
                index,
                number: start + (i64::from(index) - 1),
                group,
                row,
                col,
                top_left,
                top_right,
                bottom_left: top_left + height,
                bottom_right: top_right + height,
            });
        });

        Self {
            basis,
            partition,
            cells,
        }
    }

    /// The frame the grid is laid out in.
    #[must_use]
    pub fn basis(&self) -> &AffineBasis {
        &self.basis
    }

    /// Cell and group sizes.
    #[must_use]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// All cells in sequence order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Looks up a cell by its displayed number.
    #[must_use]
    pub fn cell_by_number(&self, number: i64) -> Option<&Cell> {
        let first = self.cells.first()?.number;
        let i = usize::try_from(number.checked_sub(first)?).ok()?;
        self.cells.get(i)
    }

    /// Returns the cell containing the image point `pt`, edges included.
    ///
    /// Points in margins or gaps belong to no cell. Cells with a negative
    /// size contain nothing.
    #[must_use]
    pub fn cell_at(&self, pt: Point) -> Option<&Cell> {
        let (w, h) = (self.partition.cell_width(), self.partition.cell_height());
        if w < 0.0 || h < 0.0 {
            return None;
        }
        let local = self.basis.image_to_local(pt);
        self.cells.iter().find(|cell| {
            let o: Vec2 = self.partition.cell_offset(cell.group, cell.row, cell.col);
            let d = local - o;
            (0.0..=w).contains(&d.x) && (0.0..=h).contains(&d.y)
        })
    }
}
