//! Palette persistence
//!
//! The palette lives in a single slot as a JSON object:
//! `{"colors": [...], "lockedIndices": [...], "colorCount": 5,
//!   "colorFormat": "hex", "timestamp": "2026-01-01T00:00:00Z"}`

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::{PaletteState, DEFAULT_SIZE};
use crate::color::DisplayFormat;
use crate::storage::SlotStore;

/// Slot name. Must not change between releases.
pub const STORAGE_KEY: &str = "colorPalette";

/// On-disk record. Every field is optional on read, and an explicit `null`
/// counts as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedPalette {
    pub colors: Option<Vec<String>>,
    pub locked_indices: Option<Vec<usize>>,
    pub color_count: Option<usize>,
    pub color_format: Option<String>,
    /// Informational only, never read back into state.
    pub timestamp: Option<String>,
}

impl SavedPalette {
    fn from_state(state: &PaletteState) -> Self {
        Self {
            colors: Some(state.colors.clone()),
            // BTreeSet iterates ascending
            locked_indices: Some(state.locked.iter().copied().collect()),
            color_count: Some(state.size),
            color_format: Some(state.format.as_str().to_string()),
            timestamp: OffsetDateTime::now_utc().format(&Rfc3339).ok(),
        }
    }

    fn into_state(self) -> PaletteState {
        let size = match self.color_count {
            None | Some(0) => DEFAULT_SIZE,
            Some(n) => n,
        };
        let format = match self.color_format.as_deref() {
            None | Some("") => DisplayFormat::Hex,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(format = %raw, "unknown stored color format, using hex");
                DisplayFormat::Hex
            }),
        };
        PaletteState {
            colors: self.colors.unwrap_or_default(),
            size,
            locked: self.locked_indices.unwrap_or_default().into_iter().collect(),
            format,
        }
    }
}

pub struct PersistenceStore<S: SlotStore> {
    slots: S,
    last_error: Option<String>,
}

impl<S: SlotStore> PersistenceStore<S> {
    pub fn new(slots: S) -> Self {
        Self {
            slots,
            last_error: None,
        }
    }

    /// Write the state. Failures are logged and remembered, never returned:
    /// the in-memory palette stays authoritative.
    pub fn save(&mut self, state: &PaletteState) -> bool {
        match self.try_save(state) {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to save palette");
                self.last_error = Some(format!("{e:#}"));
                false
            }
        }
    }

    fn try_save(&mut self, state: &PaletteState) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&SavedPalette::from_state(state))
            .context("serialize palette")?;
        self.slots.write(STORAGE_KEY, &raw)
    }

    /// Read the stored state, with defaults for missing fields.
    ///
    /// Returns `None` when nothing is stored or the record cannot be read.
    /// The result is not reconciled against size bounds; see
    /// `PaletteEngine::open`.
    pub fn load(&self) -> Option<PaletteState> {
        let raw = match self.slots.read(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to read palette");
                return None;
            }
        };
        match serde_json::from_str::<SavedPalette>(&raw) {
            Ok(saved) => Some(saved.into_state()),
            Err(e) => {
                tracing::warn!(error = %e, "stored palette is malformed, ignoring");
                None
            }
        }
    }

    /// The stored record as-is, for dumping.
    pub fn raw(&self) -> anyhow::Result<Option<String>> {
        self.slots.read(STORAGE_KEY)
    }

    /// Error text of the most recent failed save, cleared by a good one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[cfg(test)]
    pub fn slots(&self) -> &S {
        &self.slots
    }

    #[cfg(test)]
    pub fn slots_mut(&mut self) -> &mut S {
        &mut self.slots
    }
}
