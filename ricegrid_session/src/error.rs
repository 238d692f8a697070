// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use ricegrid_calibration::calibration::TooManyPoints;
use ricegrid_layout::{ConfigError, GeometryError};

/// Everything that can go wrong while driving a [`Session`](crate::Session).
///
/// None of these leave the session in a broken state: calibration, view and
/// configuration are exactly as they were before the failing call.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The operation needs a loaded image.
    #[error("no image is loaded")]
    NoImage,
    /// The loaded image reports an empty or non-finite size.
    #[error("image size {width} x {height} is not usable")]
    EmptyImage {
        /// Reported width.
        width: f64,
        /// Reported height.
        height: f64,
    },
    /// Fewer than three calibration points have been placed.
    #[error("calibration needs 3 points, have {0}")]
    CalibrationIncomplete(usize),
    /// No grid can be derived from the current points and configuration.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// A stored calibration has more points than a grid takes.
    #[error(transparent)]
    TooManyPoints(#[from] TooManyPoints),
    /// An image source, extraction service or preset store reported a failure.
    #[error("{0}")]
    Collaborator(String),
    /// No preset has the requested id.
    #[error("no preset with id {0}")]
    PresetNotFound(u64),
    /// The largest preset id is `u64::MAX`, so a new preset has no id left.
    #[error("no preset id left after {0}")]
    PresetIdsExhausted(u64),
    /// A preset collection could not be encoded or decoded.
    #[error("preset collection is malformed: {0}")]
    PresetCodec(#[from] serde_json::Error),
}

impl From<ConfigError> for SessionError {
    fn from(err: ConfigError) -> Self {
        Self::Geometry(err.into())
    }
}

impl SessionError {
    pub(crate) fn collaborator(err: impl core::fmt::Display) -> Self {
        Self::Collaborator(err.to_string())
    }
}
