// Copyright 2025 the RiceGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named snapshots of a grid configuration and its calibration points.
//!
//! Stores only ever see whole collections: every change writes the complete
//! list back, so a store never has to merge.

use core::convert::Infallible;
use core::fmt;
use std::io;
use std::path::{Path, PathBuf};

use kurbo::Point;
use ricegrid_layout::GridConfig;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::session::Session;

/// One saved preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetRecord {
    /// Unique within a collection.
    pub id: u64,
    /// Name shown in the preset list.
    pub name: String,
    /// Saved grid configuration.
    pub grid_config: GridConfig,
    /// Saved calibration points; zero to three of them.
    #[serde(default)]
    pub calibration_points: Vec<Point>,
}

impl PresetRecord {
    /// One-line description for the preset list, e.g. `6×4 | 1 groups`.
    #[must_use]
    pub fn summary(&self) -> String {
        let c = &self.grid_config;
        format!("{}×{} | {} groups", c.rows(), c.cols(), c.groups())
    }
}

/// Serializes a preset collection to JSON.
pub fn encode_presets(presets: &[PresetRecord]) -> Result<String, SessionError> {
    Ok(serde_json::to_string_pretty(presets)?)
}

/// Parses a preset collection from JSON.
///
/// Every configuration is validated; one bad record fails the whole load.
pub fn decode_presets(json: &str) -> Result<Vec<PresetRecord>, SessionError> {
    Ok(serde_json::from_str(json)?)
}

/// Where preset collections are kept.
pub trait PresetStore {
    /// Failure reported by the store.
    type Error: fmt::Display;

    /// Reads the whole collection, in display order.
    fn load(&mut self) -> Result<Vec<PresetRecord>, Self::Error>;

    /// Replaces the whole collection.
    fn save(&mut self, presets: &[PresetRecord]) -> Result<(), Self::Error>;
}

/// Keeps presets in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryPresetStore {
    presets: Vec<PresetRecord>,
    writes: usize,
}

impl MemoryPresetStore {
    /// A store that starts out holding `presets`.
    #[must_use]
    pub fn with_presets(presets: Vec<PresetRecord>) -> Self {
        Self { presets, writes: 0 }
    }

    /// The collection as last saved.
    #[must_use]
    pub fn presets(&self) -> &[PresetRecord] {
        &self.presets
    }

    /// How many times the collection has been written.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PresetStore for MemoryPresetStore {
    type Error = Infallible;

    fn load(&mut self) -> Result<Vec<PresetRecord>, Self::Error> {
        Ok(self.presets.clone())
    }

    fn save(&mut self, presets: &[PresetRecord]) -> Result<(), Self::Error> {
        self.presets = presets.to_vec();
        self.writes += 1;
        Ok(())
    }
}

/// Failure of a [`JsonFilePresetStore`].
#[derive(Debug, thiserror::Error)]
pub enum JsonFileError {
    /// Reading or writing the file failed.
    #[error("{path}: {source}")]
    Io {
        /// The preset file.
        path: PathBuf,
        /// What went wrong.
        source: io::Error,
    },
    /// The file does not hold a valid preset collection.
    #[error("{path}: {source}")]
    Json {
        /// The preset file.
        path: PathBuf,
        /// What went wrong.
        source: serde_json::Error,
    },
}

/// Keeps presets in a JSON file.
///
/// A missing file reads as an empty collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFilePresetStore {
    path: PathBuf,
}

impl JsonFilePresetStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> JsonFileError {
        JsonFileError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> JsonFileError {
        JsonFileError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

impl PresetStore for JsonFilePresetStore {
    type Error = JsonFileError;

    fn load(&mut self) -> Result<Vec<PresetRecord>, Self::Error> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error(err)),
        };
        serde_json::from_str(&text).map_err(|e| self.json_error(e))
    }

    fn save(&mut self, presets: &[PresetRecord]) -> Result<(), Self::Error> {
        let text = serde_json::to_string_pretty(presets).map_err(|e| self.json_error(e))?;
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}

/// The preset list, kept in sync with a [`PresetStore`].
///
/// A failed write leaves both the list and the store as they were.
#[derive(Debug)]
pub struct PresetLibrary<S> {
    store: S,
    presets: Vec<PresetRecord>,
}

impl<S: PresetStore> PresetLibrary<S> {
    /// Loads the collection held by `store`.
    pub fn open(mut store: S) -> Result<Self, SessionError> {
        let presets = store.load().map_err(|err| {
            log::warn!("loading presets failed: {err}");
            SessionError::collaborator(err)
        })?;
        Ok(Self { store, presets })
    }

    /// All presets, in display order.
    #[must_use]
    pub fn presets(&self) -> &[PresetRecord] {
        &self.presets
    }

    /// Looks up a preset.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&PresetRecord> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saves the configuration and calibration points of `session` as a new
    /// preset at the end of the list.
    ///
    /// The configuration must be valid. Returns the id of the new preset.
    pub fn save_current(
        &mut self,
        name: impl Into<String>,
        session: &Session,
    ) -> Result<u64, SessionError> {
        let id = self.next_id()?;
        let record = PresetRecord {
            id,
            name: name.into(),
            grid_config: session.config()?,
            calibration_points: session.calibration().points().to_vec(),
        };
        let mut next = self.presets.clone();
        next.push(record);
        self.commit(next)?;
        log::info!("saved preset {id}");
        Ok(id)
    }

    /// Loads preset `id` into `session`.
    ///
    /// Replaces the configuration and calibration points; the view and the
    /// loaded image stay as they are.
    pub fn apply(&self, id: u64, session: &mut Session) -> Result<(), SessionError> {
        let preset = self.get(id).ok_or(SessionError::PresetNotFound(id))?;
        session.restore_calibration(&preset.calibration_points)?;
        session.set_grid_config(preset.grid_config.clone());
        log::info!("applied preset {id} ({})", preset.name);
        Ok(())
    }

    /// Removes preset `id` and returns it.
    pub fn delete(&mut self, id: u64) -> Result<PresetRecord, SessionError> {
        let pos = self
            .presets
            .iter()
            .position(|p| p.id == id)
            .ok_or(SessionError::PresetNotFound(id))?;
        let mut next = self.presets.clone();
        let removed = next.remove(pos);
        self.commit(next)?;
        log::info!("deleted preset {id}");
        Ok(removed)
    }

    fn next_id(&self) -> Result<u64, SessionError> {
        match self.presets.iter().map(|p| p.id).max() {
            None => Ok(1),
            Some(last) => last
                .checked_add(1)
                .ok_or(SessionError::PresetIdsExhausted(last)),
        }
    }

    fn commit(&mut self, presets: Vec<PresetRecord>) -> Result<(), SessionError> {
        self.store.save(&presets).map_err(|err| {
            log::warn!("writing presets failed: {err}");
            SessionError::collaborator(err)
        })?;
        self.presets = presets;
        Ok(())
    }
}
