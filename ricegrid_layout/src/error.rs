// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Names a [`GridConfig`](crate::GridConfig) field in validation errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridField {
    /// Rows per group.
    Rows,
    /// Columns per group.
    Cols,
    /// Number of groups.
    Groups,
    /// Margin around the whole grid.
    Margin,
    /// Gap between rows.
    RowGap,
    /// Gap between columns.
    ColGap,
    /// Gap between groups.
    GroupGap,
}

impl GridField {
    /// The field name as it appears in serialized configurations.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Cols => "cols",
            Self::Groups => "groups",
            Self::Margin => "margin",
            Self::RowGap => "rowGap",
            Self::ColGap => "colGap",
            Self::GroupGap => "groupGap",
        }
    }
}

impl fmt::Display for GridField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A grid configuration value that can never produce a partition.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `rows`, `cols` or `groups` is zero or negative.
    #[error("{field} must be at least 1, got {value}")]
    CountBelowOne {
        /// Offending field.
        field: GridField,
        /// Value as supplied.
        value: i64,
    },
    /// A count does not fit in `u32`.
    #[error("{field} is too large: {value}")]
    CountTooLarge {
        /// Offending field.
        field: GridField,
        /// Value as supplied.
        value: i64,
    },
    /// `rows * cols * groups` overflows the cell numbering.
    #[error("rows * cols * groups does not fit in 32 bits")]
    TooManyCells,
    /// The last cell's number does not fit in `i64`.
    #[error("start number {start_number} leaves no room to number every cell")]
    NumberingOverflow {
        /// Value as supplied.
        start_number: i64,
    },
    /// A margin or gap is negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeLength {
        /// Offending field.
        field: GridField,
        /// Value as supplied.
        value: f64,
    },
    /// A margin or gap is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteLength {
        /// Offending field.
        field: GridField,
    },
}

/// Why no grid geometry could be derived.
///
/// Both variants are recoverable: the grid is simply not drawn or exported
/// until the user fixes the input.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The first two calibration points coincide, so there is no horizontal axis.
    #[error("calibration points 1 and 2 coincide; the grid has no horizontal axis")]
    DegenerateBasis,
    /// The grid configuration was rejected before partitioning.
    #[error("invalid grid configuration: {0}")]
    InvalidGridConfig(#[from] ConfigError),
}
