// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use ricegrid_calibration::calibration::{CALIBRATION_POINTS, CalibrationState, ClickOutcome};
use ricegrid_calibration::pan::PanDrag;
use ricegrid_layout::{
    AffineBasis, ConfigError, ExtractionPlan, GridConfig, GridConfigDraft, GridLayout,
};
use ricegrid_view::{DEFAULT_FIT_FRACTION, ViewTransform};

use crate::collab::{ExportRequest, ExtractionService, ImageSource, LoadedImage};
use crate::error::SessionError;

/// Pointer buttons the canvas reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Places calibration points.
    Primary,
    /// Drags the view.
    Secondary,
}

/// All state behind one calibration canvas.
///
/// A session owns the loaded image metadata, the view, the calibration, the
/// grid configuration and the pan drag. Pointer positions are screen
/// coordinates relative to the canvas; everything else is in preview pixels.
///
/// While no image is loaded, pointer and wheel input is ignored.
#[derive(Clone, Debug)]
pub struct Session {
    image: Option<LoadedImage>,
    viewport: Size,
    view: ViewTransform,
    calibration: CalibrationState,
    config: GridConfigDraft,
    pan: PanDrag,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An empty session with the default grid configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            image: None,
            viewport: Size::ZERO,
            view: ViewTransform::new(),
            calibration: CalibrationState::new(Size::ZERO),
            config: GridConfigDraft::default(),
            pan: PanDrag::default(),
        }
    }

    /// Shows a newly opened image.
    ///
    /// Clears the calibration and fits the preview into `viewport`. The grid
    /// configuration is kept. Fails, leaving the session as it was, if the
    /// image reports an unusable size.
    pub fn load_image(&mut self, image: LoadedImage, viewport: Size) -> Result<(), SessionError> {
        image.scale()?;
        log::info!(
            "loaded {} ({} x {} preview of {} x {})",
            image.path,
            image.preview_size.width,
            image.preview_size.height,
            image.original_size.width,
            image.original_size.height,
        );
        self.calibration.reset(image.preview_size);
        self.pan.end();
        self.viewport = viewport;
        self.view
            .fit_to_viewport(image.preview_size, viewport, DEFAULT_FIT_FRACTION);
        self.image = Some(image);
        Ok(())
    }

    /// Asks `source` for an image and loads it.
    ///
    /// Returns `Ok(false)` if the user cancelled; the session is untouched in
    /// that case and when the source fails.
    pub fn open_image<S: ImageSource>(
        &mut self,
        source: &mut S,
        viewport: Size,
    ) -> Result<bool, SessionError> {
        match source.open_image() {
            Ok(Some(image)) => {
                self.load_image(image, viewport)?;
                Ok(true)
            }
            Ok(None) => {
                log::debug!("image selection cancelled");
                Ok(false)
            }
            Err(err) => {
                log::warn!("image source failed: {err}");
                Err(SessionError::collaborator(err))
            }
        }
    }

    /// The loaded image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    /// Current pan and zoom.
    #[must_use]
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Placed calibration points.
    #[must_use]
    pub fn calibration(&self) -> &CalibrationState {
        &self.calibration
    }

    /// The configuration as last entered, valid or not.
    #[must_use]
    pub fn config_draft(&self) -> &GridConfigDraft {
        &self.config
    }

    /// The validated configuration.
    pub fn config(&self) -> Result<GridConfig, ConfigError> {
        self.config.validate()
    }

    /// Size of the canvas the view was last fitted to.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Re-fits the preview into a resized canvas.
    pub fn fit_view(&mut self, viewport: Size) {
        self.viewport = viewport;
        if let Some(image) = &self.image {
            self.view
                .fit_to_viewport(image.preview_size, viewport, DEFAULT_FIT_FRACTION);
        }
    }

    /// Handles a button press at `screen`.
    ///
    /// The primary button places a calibration point; its outcome is
    /// returned. The secondary button starts a pan and returns `None`.
    pub fn pointer_down(&mut self, button: PointerButton, screen: Point) -> Option<ClickOutcome> {
        self.image.as_ref()?;
        match button {
            PointerButton::Primary => {
                let outcome = self.calibration.click(self.view.screen_to_image(screen));
                let completed = matches!(
                    outcome,
                    ClickOutcome::Added {
                        count: CALIBRATION_POINTS
                    }
                );
                let basis = self.calibration.triple().filter(|_| completed);
                if let Some(Err(err)) = basis.map(AffineBasis::from_triple) {
                    log::warn!("calibration is unusable: {err}");
                }
                Some(outcome)
            }
            PointerButton::Secondary => {
                self.pan.begin(screen);
                None
            }
        }
    }

    /// Handles pointer motion. Returns `true` if the view moved.
    pub fn pointer_move(&mut self, screen: Point) -> bool {
        if self.image.is_none() {
            return false;
        }
        match self.pan.move_to(screen) {
            Some(delta) => {
                self.view.pan(delta);
                true
            }
            None => false,
        }
    }

    /// Handles a button release.
    pub fn pointer_up(&mut self) {
        self.pan.end();
    }

    /// Handles the pointer leaving the canvas.
    pub fn pointer_leave(&mut self) {
        self.pan.end();
    }

    /// Whether a pan drag is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan.is_active()
    }

    /// Zooms about `screen` for a wheel step of `delta_y`.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) {
        if self.image.is_some() {
            self.view.zoom_by_wheel(screen, delta_y);
        }
    }

    /// Replaces the grid configuration.
    ///
    /// The draft is stored even when invalid, so the user can keep editing
    /// it; until it validates, [`Session::layout`] reports the problem and no
    /// grid is derived.
    pub fn set_config(&mut self, draft: GridConfigDraft) -> Result<(), ConfigError> {
        let checked = draft.validate().map(drop);
        if let Err(err) = &checked {
            log::debug!("grid configuration rejected: {err}");
        }
        self.config = draft;
        checked
    }

    /// Replaces the grid configuration with one already validated.
    pub fn set_grid_config(&mut self, config: GridConfig) {
        self.config = config.into();
    }

    /// Replaces the calibration points, keeping the view.
    pub fn restore_calibration(&mut self, points: &[Point]) -> Result<(), SessionError> {
        self.calibration.restore(points)?;
        Ok(())
    }

    /// Derives the grid for the current calibration and configuration.
    pub fn layout(&self) -> Result<GridLayout, SessionError> {
        let (points, config) = self.ready()?;
        Ok(GridLayout::new(points, &config)?)
    }

    /// Builds the request an extraction service needs.
    ///
    /// Only succeeds when a grid can actually be derived, so degenerate or
    /// misconfigured grids are never sent.
    pub fn export_request(
        &self,
        destination: impl Into<String>,
        label: Option<&str>,
    ) -> Result<ExportRequest, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
        let (points, config) = self.ready()?;
        AffineBasis::from_triple(points)?;
        Ok(ExportRequest {
            source_path: image.path.clone(),
            destination_folder: destination.into(),
            preview_size: image.preview_size,
            original_size: image.original_size,
            calibration_points: points,
            start_number: config.start_number(),
            grid_config: config,
            custom_label: label.filter(|l| !l.is_empty()).map(str::to_owned),
        })
    }

    /// Crops the current grid would produce, in original-image pixels.
    pub fn extraction_plan(&self) -> Result<ExtractionPlan, SessionError> {
        self.export_request(String::new(), None)?.plan()
    }

    /// Sends the current grid to `service` and returns its message.
    ///
    /// A failed extraction leaves the session untouched.
    pub fn export<E: ExtractionService>(
        &self,
        service: &mut E,
        destination: impl Into<String>,
        label: Option<&str>,
    ) -> Result<String, SessionError> {
        let request = self.export_request(destination, label)?;
        log::info!(
            "exporting {} cells of {} to {}",
            request.grid_config.cell_count(),
            request.source_path,
            request.destination_folder,
        );
        let result = service
            .extract(&request)
            .map_err(SessionError::collaborator)
            .and_then(|response| response.into_result());
        match &result {
            Ok(message) => log::info!("export finished: {message}"),
            Err(err) => log::warn!("export failed: {err}"),
        }
        result
    }

    fn ready(&self) -> Result<([Point; 3], GridConfig), SessionError> {
        if self.image.is_none() {
            return Err(SessionError::NoImage);
        }
        let points = self
            .calibration
            .triple()
            .ok_or(SessionError::CalibrationIncomplete(self.calibration.len()))?;
        Ok((points, self.config()?))
    }
}
