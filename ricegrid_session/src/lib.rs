// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RiceGrid Session: the controller behind a calibration canvas.
//!
//! A [`Session`] ties the pieces together for one open image:
//!
//! - pointer and wheel input drive the view (`ricegrid_view`) and the
//!   calibration (`ricegrid_calibration`);
//! - the grid is derived on demand from the calibration and the current
//!   configuration (`ricegrid_layout`);
//! - export requests and presets cross to external services through the
//!   [`ImageSource`], [`ExtractionService`] and [`PresetStore`] traits.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use ricegrid_session::{LoadedImage, PointerButton, Session};
//!
//! let mut session = Session::new();
//! let image = LoadedImage::new("plate.tif", Size::new(400.0, 300.0), Size::new(4000.0, 3000.0));
//! session.load_image(image, Size::new(800.0, 600.0)).unwrap();
//!
//! for pt in [Point::new(20.0, 20.0), Point::new(380.0, 20.0), Point::new(20.0, 280.0)] {
//!     let screen = session.view().image_to_screen(pt);
//!     session.pointer_down(PointerButton::Primary, screen);
//! }
//!
//! let grid = session.layout().unwrap();
//! assert_eq!(grid.cells().len(), 24);
//! ```
//!
//! Nothing here installs a logger; events are reported through the `log`
//! facade.

mod collab;
mod error;
mod presets;
mod session;

pub use collab::{
    ExportRequest, ExtractionResponse, ExtractionService, ExtractionStatus, ImageSource,
    LoadedImage,
};
pub use error::SessionError;
pub use presets::{
    JsonFileError, JsonFilePresetStore, MemoryPresetStore, PresetLibrary, PresetRecord,
    PresetStore, decode_presets, encode_presets,
};
pub use session::{PointerButton, Session};
