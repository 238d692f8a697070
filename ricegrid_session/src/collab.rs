// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request/response shapes for the services a session talks to.
//!
//! Decoding images, cutting patches and writing files all happen outside this
//! crate. The traits here are the seams; the structs are what crosses them.

use core::fmt;

use kurbo::{Point, Size};
use ricegrid_layout::{ExtractionPlan, GridConfig, PreviewScale};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Metadata of an image the user opened.
///
/// Calibration happens on the preview; `original_size` only matters when
/// carrying the grid over to the full-resolution pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedImage {
    /// Where the full-resolution image lives.
    pub path: String,
    /// Size of the preview the user calibrates on.
    pub preview_size: Size,
    /// Size of the full-resolution image.
    pub original_size: Size,
}

impl LoadedImage {
    /// Creates image metadata.
    pub fn new(path: impl Into<String>, preview_size: Size, original_size: Size) -> Self {
        Self {
            path: path.into(),
            preview_size,
            original_size,
        }
    }

    /// Factor from preview pixels to original pixels.
    ///
    /// Fails if either size is empty or not finite.
    pub fn scale(&self) -> Result<PreviewScale, SessionError> {
        preview_scale(self.preview_size, self.original_size)
    }
}

/// Opens images on request, typically by asking the user to pick a file.
pub trait ImageSource {
    /// Failure reported by the source.
    type Error: fmt::Display;

    /// Opens an image. `Ok(None)` means the user cancelled.
    fn open_image(&mut self) -> Result<Option<LoadedImage>, Self::Error>;
}

/// Everything an extraction service needs to cut patches for one grid.
///
/// Points and lengths are in preview pixels, exactly as calibrated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Full-resolution image to cut from.
    pub source_path: String,
    /// Folder the patches are written to.
    pub destination_folder: String,
    /// Size of the preview the points refer to.
    pub preview_size: Size,
    /// Size of the full-resolution image.
    pub original_size: Size,
    /// The three calibration points, in click order.
    pub calibration_points: [Point; 3],
    /// Grid configuration.
    pub grid_config: GridConfig,
    /// Number of the first cell; mirrors `grid_config`.
    pub start_number: i64,
    /// Prefix of every patch file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
}

impl ExportRequest {
    /// Crops and patch counts in full-resolution pixels.
    pub fn plan(&self) -> Result<ExtractionPlan, SessionError> {
        let scale = preview_scale(self.preview_size, self.original_size)?;
        Ok(ExtractionPlan::new(
            self.calibration_points,
            &self.grid_config,
            scale,
        )?)
    }
}

/// Outcome reported by an extraction service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    /// Patches were written.
    Success,
    /// Extraction failed; the message says why.
    Error,
}

/// Reply of an extraction service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    /// Whether the extraction worked.
    pub status: ExtractionStatus,
    /// Text to show to the user.
    pub message: String,
}

impl ExtractionResponse {
    /// A successful reply.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ExtractionStatus::Success,
            message: message.into(),
        }
    }

    /// A failed reply.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ExtractionStatus::Error,
            message: message.into(),
        }
    }

    /// `Ok(message)` on success, otherwise [`SessionError::Collaborator`].
    pub fn into_result(self) -> Result<String, SessionError> {
        match self.status {
            ExtractionStatus::Success => Ok(self.message),
            ExtractionStatus::Error => Err(SessionError::Collaborator(self.message)),
        }
    }
}

/// Cuts patches out of a full-resolution image.
pub trait ExtractionService {
    /// Transport-level failure; a reply with an error status is not one.
    type Error: fmt::Display;

    /// Runs one extraction.
    fn extract(&mut self, request: &ExportRequest) -> Result<ExtractionResponse, Self::Error>;
}

fn preview_scale(preview: Size, original: Size) -> Result<PreviewScale, SessionError> {
    if let Some(scale) = PreviewScale::new(preview, original) {
        return Ok(scale);
    }
    let bad = if PreviewScale::new(preview, preview).is_none() {
        preview
    } else {
        original
    };
    Err(SessionError::EmptyImage {
        width: bad.width,
        height: bad.height,
    })
}
