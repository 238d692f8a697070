// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GridField};

/// Default colour of the grid overlay.
pub const DEFAULT_GRID_COLOR: &str = "#FF00FF";

/// Default edge length, in original-image pixels, of extracted patches.
pub const DEFAULT_PATCH_SIZE: u32 = 100;

/// Axis along which groups of cells are repeated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupDirection {
    /// Groups sit side by side along the basis X axis.
    #[default]
    Horizontal,
    /// Groups are stacked along the basis Y axis.
    Vertical,
}

/// Grid configuration exactly as the user typed it.
///
/// Nothing here is validated; counts are signed so that a zero or negative
/// entry survives long enough to be reported. Turn a draft into a usable
/// [`GridConfig`] with [`GridConfigDraft::validate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfigDraft {
    /// Rows per group.
    pub rows: i64,
    /// Columns per group.
    pub cols: i64,
    /// Number of groups.
    pub groups: i64,
    /// Margin kept free on every side of the calibrated rectangle.
    pub margin: f64,
    /// Gap between adjacent rows.
    pub row_gap: f64,
    /// Gap between adjacent columns.
    pub col_gap: f64,
    /// Gap between adjacent groups.
    pub group_gap: f64,
    /// Axis along which groups repeat.
    pub group_direction: GroupDirection,
    /// Number given to the first cell.
    #[serde(alias = "start_number")]
    pub start_number: i64,
    /// Overlay colour; display only.
    pub grid_color: String,
    /// Patch edge length handed to the extraction service.
    pub patch_size: u32,
}

impl Default for GridConfigDraft {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 4,
            groups: 1,
            margin: 0.0,
            row_gap: 10.0,
            col_gap: 10.0,
            group_gap: 10.0,
            group_direction: GroupDirection::Horizontal,
            start_number: 1,
            grid_color: DEFAULT_GRID_COLOR.into(),
            patch_size: DEFAULT_PATCH_SIZE,
        }
    }
}

impl GridConfigDraft {
    /// Checks every field and produces a [`GridConfig`].
    pub fn validate(&self) -> Result<GridConfig, ConfigError> {
        let rows = count(GridField::Rows, self.rows)?;
        let cols = count(GridField::Cols, self.cols)?;
        let groups = count(GridField::Groups, self.groups)?;
        let cells = total_cells(rows, cols, groups)?;
        numbering(self.start_number, cells)?;

        Ok(GridConfig {
            rows,
            cols,
            groups,
            margin: length(GridField::Margin, self.margin)?,
            row_gap: length(GridField::RowGap, self.row_gap)?,
            col_gap: length(GridField::ColGap, self.col_gap)?,
            group_gap: length(GridField::GroupGap, self.group_gap)?,
            group_direction: self.group_direction,
            start_number: self.start_number,
            grid_color: self.grid_color.clone(),
            patch_size: self.patch_size,
        })
    }
}

impl From<GridConfig> for GridConfigDraft {
    fn from(cfg: GridConfig) -> Self {
        Self {
            rows: cfg.rows.into(),
            cols: cfg.cols.into(),
            groups: cfg.groups.into(),
            margin: cfg.margin,
            row_gap: cfg.row_gap,
            col_gap: cfg.col_gap,
            group_gap: cfg.group_gap,
            group_direction: cfg.group_direction,
            start_number: cfg.start_number,
            grid_color: cfg.grid_color,
            patch_size: cfg.patch_size,
        }
    }
}

impl TryFrom<GridConfigDraft> for GridConfig {
    type Error = ConfigError;

    fn try_from(draft: GridConfigDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

/// Validated grid configuration.
///
/// Counts are at least 1 and lengths are finite and non-negative, so the
/// partitioner never divides by zero. Lengths are in the same units as the
/// calibration points (preview pixels).
///
/// Deserialization goes through [`GridConfigDraft::validate`], so an invalid
/// configuration can never be loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GridConfigDraft")]
pub struct GridConfig {
    rows: u32,
    cols: u32,
    groups: u32,
    margin: f64,
    row_gap: f64,
    col_gap: f64,
    group_gap: f64,
    group_direction: GroupDirection,
    start_number: i64,
    grid_color: String,
    patch_size: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        let draft = GridConfigDraft::default();
        Self {
            rows: 6,
            cols: 4,
            groups: 1,
            margin: draft.margin,
            row_gap: draft.row_gap,
            col_gap: draft.col_gap,
            group_gap: draft.group_gap,
            group_direction: draft.group_direction,
            start_number: draft.start_number,
            grid_color: draft.grid_color,
            patch_size: draft.patch_size,
        }
    }
}

impl GridConfig {
    /// Creates a configuration with the given counts, no margin and no gaps.
    pub fn new(rows: i64, cols: i64, groups: i64) -> Result<Self, ConfigError> {
        GridConfigDraft {
            rows,
            cols,
            groups,
            row_gap: 0.0,
            col_gap: 0.0,
            group_gap: 0.0,
            ..GridConfigDraft::default()
        }
        .validate()
    }

    /// Rows per group.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Columns per group.
    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of groups.
    #[must_use]
    pub fn groups(&self) -> u32 {
        self.groups
    }

    /// Total number of cells, `rows * cols * groups`.
    #[must_use]
    pub fn cell_count(&self) -> u32 {
        self.rows * self.cols * self.groups
    }

    /// Margin on every side of the calibrated rectangle.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Gap between rows.
    #[must_use]
    pub fn row_gap(&self) -> f64 {
        self.row_gap
    }

    /// Gap between columns.
    #[must_use]
    pub fn col_gap(&self) -> f64 {
        self.col_gap
    }

    /// Gap between groups.
    #[must_use]
    pub fn group_gap(&self) -> f64 {
        self.group_gap
    }

    /// Axis along which groups repeat.
    #[must_use]
    pub fn group_direction(&self) -> GroupDirection {
        self.group_direction
    }

    /// Number of the first cell.
    #[must_use]
    pub fn start_number(&self) -> i64 {
        self.start_number
    }

    /// Overlay colour.
    #[must_use]
    pub fn grid_color(&self) -> &str {
        &self.grid_color
    }

    /// Patch edge length for extraction.
    #[must_use]
    pub fn patch_size(&self) -> u32 {
        self.patch_size
    }

    /// Replaces the counts.
    pub fn set_counts(&mut self, rows: i64, cols: i64, groups: i64) -> Result<(), ConfigError> {
        let r = count(GridField::Rows, rows)?;
        let c = count(GridField::Cols, cols)?;
        let g = count(GridField::Groups, groups)?;
        numbering(self.start_number, total_cells(r, c, g)?)?;
        (self.rows, self.cols, self.groups) = (r, c, g);
        Ok(())
    }

    /// Replaces the margin.
    pub fn set_margin(&mut self, margin: f64) -> Result<(), ConfigError> {
        self.margin = length(GridField::Margin, margin)?;
        Ok(())
    }

    /// Replaces the row, column and group gaps.
    pub fn set_gaps(&mut self, row_gap: f64, col_gap: f64, group_gap: f64) -> Result<(), ConfigError> {
        let row_gap = length(GridField::RowGap, row_gap)?;
        let col_gap = length(GridField::ColGap, col_gap)?;
        let group_gap = length(GridField::GroupGap, group_gap)?;
        (self.row_gap, self.col_gap, self.group_gap) = (row_gap, col_gap, group_gap);
        Ok(())
    }

    /// Sets the axis along which groups repeat.
    pub fn set_group_direction(&mut self, direction: GroupDirection) {
        self.group_direction = direction;
    }

    /// Sets the number given to the first cell.
    ///
    /// Fails if the last cell's number would not fit in `i64`.
    pub fn set_start_number(&mut self, start_number: i64) -> Result<(), ConfigError> {
        numbering(start_number, self.cell_count())?;
        self.start_number = start_number;
        Ok(())
    }

    /// Sets the overlay colour.
    pub fn set_grid_color(&mut self, color: impl Into<String>) {
        self.grid_color = color.into();
    }

    /// Sets the patch edge length for extraction.
    pub fn set_patch_size(&mut self, patch_size: u32) {
        self.patch_size = patch_size;
    }
}

fn count(field: GridField, value: i64) -> Result<u32, ConfigError> {
    if value < 1 {
        return Err(ConfigError::CountBelowOne { field, value });
    }
    u32::try_from(value).map_err(|_| ConfigError::CountTooLarge { field, value })
}

fn total_cells(rows: u32, cols: u32, groups: u32) -> Result<u32, ConfigError> {
    rows.checked_mul(cols)
        .and_then(|n| n.checked_mul(groups))
        .ok_or(ConfigError::TooManyCells)
}

fn numbering(start_number: i64, cells: u32) -> Result<i64, ConfigError> {
    start_number
        .checked_add(i64::from(cells) - 1)
        .ok_or(ConfigError::NumberingOverflow { start_number })
}

fn length(field: GridField, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteLength { field });
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeLength { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_counts_are_rejected() {
        assert_eq!(
            GridConfig::new(0, 2, 1),
            Err(ConfigError::CountBelowOne {
                field: GridField::Rows,
                value: 0
            })
        );
        assert_eq!(
            GridConfig::new(2, -3, 1),
            Err(ConfigError::CountBelowOne {
                field: GridField::Cols,
                value: -3
            })
        );
        assert_eq!(
            GridConfig::new(2, 2, 0),
            Err(ConfigError::CountBelowOne {
                field: GridField::Groups,
                value: 0
            })
        );
    }

    #[test]
    fn oversized_counts_are_rejected() {
        assert_eq!(
            GridConfig::new(i64::from(u32::MAX) + 1, 1, 1),
            Err(ConfigError::CountTooLarge {
                field: GridField::Rows,
                value: i64::from(u32::MAX) + 1
            })
        );
        assert_eq!(
            GridConfig::new(100_000, 100_000, 1),
            Err(ConfigError::TooManyCells)
        );
    }

    #[test]
    fn bad_lengths_are_rejected() {
        let mut cfg = GridConfig::new(1, 1, 1).unwrap();
        assert_eq!(
            cfg.set_margin(-1.0),
            Err(ConfigError::NegativeLength {
                field: GridField::Margin,
                value: -1.0
            })
        );
        assert_eq!(
            cfg.set_gaps(0.0, f64::INFINITY, 0.0),
            Err(ConfigError::NonFiniteLength {
                field: GridField::ColGap
            })
        );
        // Failed setters leave the old values in place.
        assert_eq!(cfg.margin(), 0.0);
        assert_eq!(cfg.col_gap(), 0.0);
    }

    #[test]
    fn numbers_past_i64_max_are_rejected() {
        let mut cfg = GridConfig::new(1, 2, 1).unwrap();
        assert_eq!(
            cfg.set_start_number(i64::MAX),
            Err(ConfigError::NumberingOverflow {
                start_number: i64::MAX
            })
        );
        assert_eq!(cfg.start_number(), 1);
        cfg.set_start_number(i64::MAX - 1).unwrap();
        assert!(cfg.set_counts(1, 3, 1).is_err());
        assert_eq!(cfg.cell_count(), 2);
        cfg.set_start_number(i64::MIN).unwrap();

        let draft = GridConfigDraft {
            start_number: i64::MAX,
            ..GridConfigDraft::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(ConfigError::NumberingOverflow { .. })
        ));
        let one = GridConfigDraft {
            rows: 1,
            cols: 1,
            groups: 1,
            ..draft
        };
        assert_eq!(one.validate().map(|c| c.start_number()), Ok(i64::MAX));
    }

    #[test]
    fn failed_count_update_keeps_previous_counts() {
        let mut cfg = GridConfig::new(2, 3, 4).unwrap();
        assert!(cfg.set_counts(5, 0, 1).is_err());
        assert_eq!((cfg.rows(), cfg.cols(), cfg.groups()), (2, 3, 4));
        cfg.set_counts(5, 6, 1).unwrap();
        assert_eq!(cfg.cell_count(), 30);
    }

    #[test]
    fn defaults_match_draft_defaults() {
        let cfg = GridConfig::default();
        assert_eq!(GridConfigDraft::default().validate(), Ok(cfg.clone()));
        assert_eq!(cfg.grid_color(), DEFAULT_GRID_COLOR);
        assert_eq!(cfg.patch_size(), DEFAULT_PATCH_SIZE);
        assert_eq!(cfg.start_number(), 1);
    }

    #[test]
    fn deserialize_validates() {
        let ok: GridConfig = serde_json::from_str(
            r##"{"rows":2,"cols":3,"groups":2,"margin":4,"rowGap":1,"colGap":2,
                "groupGap":5,"groupDirection":"vertical","startNumber":101,
                "gridColor":"#00FF00","patchSize":64}"##,
        )
        .unwrap();
        assert_eq!(ok.group_direction(), GroupDirection::Vertical);
        assert_eq!(ok.start_number(), 101);
        assert_eq!(ok.cell_count(), 12);
        assert_eq!(ok.grid_color(), "#00FF00");

        let err = serde_json::from_str::<GridConfig>(r#"{"rows":0,"cols":3,"groups":1}"#)
            .unwrap_err();
        assert!(err.to_string().contains("rows must be at least 1"), "{err}");
    }

    #[test]
    fn deserialize_fills_defaults_and_accepts_snake_start_number() {
        let cfg: GridConfig =
            serde_json::from_str(r#"{"rows":1,"cols":1,"groups":1,"start_number":7}"#).unwrap();
        assert_eq!(cfg.start_number(), 7);
        assert_eq!(cfg.row_gap(), 10.0);
        assert_eq!(cfg.group_direction(), GroupDirection::Horizontal);
    }

    #[test]
    fn serialize_uses_camel_case() {
        let json = serde_json::to_value(GridConfig::default()).unwrap();
        assert_eq!(json["rowGap"], 10.0);
        assert_eq!(json["groupDirection"], "horizontal");
        assert_eq!(json["gridColor"], DEFAULT_GRID_COLOR);
    }
}
