//! Palette state engine
//!
//! This module provides:
//! - `PaletteState`, the aggregate that is owned in memory and persisted
//! - `PaletteEngine`, the operations that mutate it (regenerate, resize, lock)
//! - `PersistenceStore`, the JSON round-trip through a `SlotStore`

pub mod engine;
pub mod persist;

pub use engine::{PaletteEngine, Swatch};
pub use persist::PersistenceStore;

use crate::color::DisplayFormat;
use std::collections::BTreeSet;
use std::fmt;

/// Size used when nothing is configured or stored.
pub const DEFAULT_SIZE: usize = 5;
pub const MIN_SIZE: usize = 1;
pub const MAX_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaletteState {
    /// Canonical `#RRGGBB` colors, one per slot.
    pub colors: Vec<String>,
    pub size: usize,
    /// Slots exempt from regeneration.
    pub locked: BTreeSet<usize>,
    pub format: DisplayFormat,
}

impl PaletteState {
    pub fn is_locked(&self, index: usize) -> bool {
        self.locked.contains(&index)
    }
}

/// Allowed palette sizes plus the size of a fresh palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min: usize,
    pub max: usize,
    pub default_size: usize,
}

impl SizeBounds {
    pub fn contains(&self, size: usize) -> bool {
        (self.min..=self.max).contains(&size)
    }

    pub fn clamp(&self, size: usize) -> usize {
        size.clamp(self.min, self.max)
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min: MIN_SIZE,
            max: MAX_SIZE,
            default_size: DEFAULT_SIZE,
        }
    }
}

/// Caller mistakes. Rejected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    InvalidFormat(String),
    SlotOutOfRange { index: usize, size: usize },
    SizeOutOfRange { requested: usize, min: usize, max: usize },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(v) => write!(f, "unknown color format {v:?} (expected hex or rgb)"),
            Self::SlotOutOfRange { index, size } => {
                write!(f, "slot {index} out of range (palette has {size} colors)")
            }
            Self::SizeOutOfRange { requested, min, max } => {
                write!(f, "palette size {requested} out of range ({min}-{max})")
            }
        }
    }
}

impl std::error::Error for PaletteError {}
