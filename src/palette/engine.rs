use rand::Rng;
use rand::rngs::ThreadRng;
use std::cmp::Ordering;

use super::{PaletteError, PaletteState, PersistenceStore, SizeBounds};
use crate::color::{self, DisplayFormat};
use crate::storage::SlotStore;

/// What a renderer needs to draw one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub index: usize,
    pub color: String,
    pub display: String,
    pub locked: bool,
    pub dark: bool,
}

/// Owns the palette and writes it through to storage after every change.
pub struct PaletteEngine<S: SlotStore, R: Rng = ThreadRng> {
    state: PaletteState,
    store: PersistenceStore<S>,
    bounds: SizeBounds,
    rng: R,
}

impl<S: SlotStore> PaletteEngine<S, ThreadRng> {
    pub fn open(slots: S, bounds: SizeBounds) -> Self {
        Self::with_rng(slots, bounds, rand::rng())
    }
}

impl<S: SlotStore, R: Rng> PaletteEngine<S, R> {
    /// Restore the stored palette, or start a fresh one when there is
    /// nothing usable in storage.
    pub fn with_rng(slots: S, bounds: SizeBounds, mut rng: R) -> Self {
        let store = PersistenceStore::new(slots);
        let loaded = store.load();

        let state = match &loaded {
            Some(saved) => reconcile(saved.clone(), &bounds, &mut rng),
            None => {
                tracing::info!(size = bounds.default_size, "no stored palette, generating");
                reconcile(
                    PaletteState {
                        size: bounds.default_size,
                        ..PaletteState::default()
                    },
                    &bounds,
                    &mut rng,
                )
            }
        };

        let mut engine = Self {
            state,
            store,
            bounds,
            rng,
        };
        if loaded.as_ref() != Some(&engine.state) {
            engine.persist();
        }
        engine
    }

    pub fn state(&self) -> &PaletteState {
        &self.state
    }

    pub fn colors(&self) -> &[String] {
        &self.state.colors
    }

    pub fn size(&self) -> usize {
        self.state.size
    }

    pub fn display_format(&self) -> DisplayFormat {
        self.state.format
    }

    pub fn store(&self) -> &PersistenceStore<S> {
        &self.store
    }

    /// Redraw every unlocked slot from the harmonious band.
    pub fn regenerate(&mut self) {
        let Self { state, rng, .. } = self;
        let colors = (0..state.size)
            .map(|i| match state.colors.get(i) {
                Some(kept) if state.locked.contains(&i) => kept.clone(),
                _ => color::harmonious(rng),
            })
            .collect();
        state.colors = colors;
        tracing::debug!(locked = state.locked.len(), "regenerated palette");
        self.persist();
    }

    /// Grow with uniformly random colors, or truncate and drop locks that
    /// fall off the end.
    pub fn resize(&mut self, new_size: usize) -> Result<(), PaletteError> {
        if !self.bounds.contains(new_size) {
            return Err(PaletteError::SizeOutOfRange {
                requested: new_size,
                min: self.bounds.min,
                max: self.bounds.max,
            });
        }

        match new_size.cmp(&self.state.size) {
            Ordering::Greater => {
                for _ in self.state.size..new_size {
                    self.state.colors.push(color::uniform(&mut self.rng));
                }
            }
            Ordering::Less => {
                self.state.colors.truncate(new_size);
                self.state.locked.retain(|&i| i < new_size);
            }
            Ordering::Equal => {}
        }
        self.state.size = new_size;
        self.persist();
        Ok(())
    }

    pub fn grow(&mut self) -> Result<(), PaletteError> {
        self.resize(self.state.size + 1)
    }

    pub fn shrink(&mut self) -> Result<(), PaletteError> {
        self.resize(self.state.size.saturating_sub(1))
    }

    pub fn set_display_format(&mut self, format: DisplayFormat) {
        self.state.format = format;
        self.persist();
    }

    /// Parse and apply a user-supplied format name.
    pub fn set_display_format_str(&mut self, format: &str) -> Result<DisplayFormat, PaletteError> {
        let format = format.parse::<DisplayFormat>()?;
        self.set_display_format(format);
        Ok(format)
    }

    pub fn cycle_display_format(&mut self) -> DisplayFormat {
        let next = self.state.format.next();
        self.set_display_format(next);
        next
    }

    /// Flip the lock on a slot. Returns whether it is locked afterwards.
    pub fn toggle_lock(&mut self, index: usize) -> Result<bool, PaletteError> {
        if index >= self.state.size {
            return Err(PaletteError::SlotOutOfRange {
                index,
                size: self.state.size,
            });
        }
        let locked = if self.state.locked.remove(&index) {
            false
        } else {
            self.state.locked.insert(index)
        };
        self.persist();
        Ok(locked)
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.state.is_locked(index)
    }

    pub fn swatches(&self) -> Vec<Swatch> {
        self.state
            .colors
            .iter()
            .enumerate()
            .map(|(index, c)| Swatch {
                index,
                color: c.clone(),
                display: color::format_color(c, self.state.format),
                locked: self.state.is_locked(index),
                dark: color::is_dark(c),
            })
            .collect()
    }

    /// Explicit save. Returns whether the write reached storage.
    pub fn save(&mut self) -> bool {
        self.store.save(&self.state)
    }

    pub fn last_persist_error(&self) -> Option<&str> {
        self.store.last_error()
    }

    fn persist(&mut self) {
        self.store.save(&self.state);
    }
}

/// Bring a stored (or empty) state back in line with the palette invariants.
fn reconcile<R: Rng>(mut state: PaletteState, bounds: &SizeBounds, rng: &mut R) -> PaletteState {
    let size = bounds.clamp(state.size);
    if size != state.size {
        tracing::warn!(stored = state.size, size, "stored palette size out of range");
    }

    let fresh = state.colors.is_empty();
    let mut colors: Vec<String> = state
        .colors
        .iter()
        .take(size)
        .map(|c| {
            color::canonicalize(c).unwrap_or_else(|| {
                tracing::warn!(color = %c, "replacing malformed stored color");
                color::harmonious(rng)
            })
        })
        .collect();
    while colors.len() < size {
        let c = if fresh {
            color::harmonious(rng)
        } else {
            color::uniform(rng)
        };
        colors.push(c);
    }

    state.locked.retain(|&i| i < size);
    state.colors = colors;
    state.size = size;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::persist::STORAGE_KEY;
    use crate::storage::MemorySlots;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    type TestEngine = PaletteEngine<MemorySlots, StdRng>;

    fn engine(seed: u64) -> TestEngine {
        PaletteEngine::with_rng(MemorySlots::new(), SizeBounds::default(), StdRng::seed_from_u64(seed))
    }

    fn engine_from(raw: &str, seed: u64) -> TestEngine {
        let mut slots = MemorySlots::new();
        slots.insert(STORAGE_KEY, raw);
        PaletteEngine::with_rng(slots, SizeBounds::default(), StdRng::seed_from_u64(seed))
    }

    fn assert_invariants(e: &TestEngine) {
        let s = e.state();
        assert_eq!(s.colors.len(), s.size);
        assert!(s.locked.iter().all(|&i| i < s.size));
        for c in &s.colors {
            assert_eq!(color::canonicalize(c).as_deref(), Some(c.as_str()));
        }
    }

    #[test]
    fn test_bootstrap_fresh() {
        let e = engine(1);
        assert_eq!(e.size(), 5);
        assert_eq!(e.display_format(), DisplayFormat::Hex);
        assert_invariants(&e);
        // Fresh palette is written straight away
        assert_eq!(e.store().load().as_ref(), Some(e.state()));
    }

    #[test]
    fn test_reopen_restores_state() {
        let mut e = engine(2);
        e.resize(7).unwrap();
        e.toggle_lock(3).unwrap();
        e.set_display_format(DisplayFormat::Rgb);
        let slots = e.store().slots().clone();

        let reopened = PaletteEngine::with_rng(slots, SizeBounds::default(), StdRng::seed_from_u64(99));
        assert_eq!(reopened.state(), e.state());
    }

    #[test]
    fn test_regenerate_keeps_locked() {
        let mut e = engine(3);
        e.toggle_lock(0).unwrap();
        e.toggle_lock(3).unwrap();
        let before = e.colors().to_vec();

        for _ in 0..10 {
            e.regenerate();
            assert_eq!(e.colors()[0], before[0]);
            assert_eq!(e.colors()[3], before[3]);
            assert_invariants(&e);
        }
        assert!(
            [1, 2, 4].iter().any(|&i| e.colors()[i] != before[i]),
            "unlocked slots never changed"
        );
    }

    #[test]
    fn test_resize_grow_and_shrink() {
        let mut e = engine(4);
        let before = e.colors().to_vec();

        e.resize(9).unwrap();
        assert_eq!(e.size(), 9);
        assert_eq!(&e.colors()[..5], &before[..]);
        assert_invariants(&e);

        e.toggle_lock(1).unwrap();
        e.toggle_lock(6).unwrap();
        e.toggle_lock(8).unwrap();
        e.resize(4).unwrap();
        assert_eq!(e.colors(), &before[..4]);
        assert_eq!(e.state().locked.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_invariants(&e);
    }

    #[test]
    fn test_resize_every_valid_size() {
        let mut e = engine(5);
        for n in (1..=20).chain((1..=20).rev()) {
            if n % 3 == 0 && n <= e.size() {
                e.toggle_lock(n - 1).unwrap();
            }
            e.resize(n).unwrap();
            assert_eq!(e.colors().len(), n);
            assert_invariants(&e);
        }
    }

    #[test]
    fn test_resize_same_size_is_noop() {
        let mut e = engine(6);
        e.toggle_lock(2).unwrap();
        let before = e.state().clone();
        e.resize(5).unwrap();
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn test_resize_out_of_bounds() {
        let mut e = engine(7);
        let before = e.state().clone();
        assert_eq!(
            e.resize(0),
            Err(PaletteError::SizeOutOfRange { requested: 0, min: 1, max: 20 })
        );
        assert!(e.resize(21).is_err());
        assert_eq!(e.state(), &before);

        e.resize(1).unwrap();
        assert!(e.shrink().is_err());
        assert_eq!(e.size(), 1);
        e.grow().unwrap();
        assert_eq!(e.size(), 2);
    }

    #[test]
    fn test_toggle_lock_is_own_inverse() {
        let mut e = engine(8);
        assert!(!e.is_locked(2));
        assert_eq!(e.toggle_lock(2), Ok(true));
        assert!(e.is_locked(2));
        assert_eq!(e.toggle_lock(2), Ok(false));
        assert!(!e.is_locked(2));
    }

    #[test]
    fn test_toggle_lock_out_of_range() {
        let mut e = engine(9);
        assert_eq!(
            e.toggle_lock(5),
            Err(PaletteError::SlotOutOfRange { index: 5, size: 5 })
        );
        assert!(e.state().locked.is_empty());
    }

    #[test]
    fn test_display_format() {
        let mut e = engine(10);
        assert!(e.set_display_format_str("invalid").is_err());
        assert_eq!(e.display_format(), DisplayFormat::Hex);

        assert_eq!(e.set_display_format_str("rgb"), Ok(DisplayFormat::Rgb));
        assert!(e.swatches()[0].display.starts_with("rgb("));
        assert_eq!(e.cycle_display_format(), DisplayFormat::Hex);
        assert_eq!(e.swatches()[0].display, e.colors()[0]);
    }

    #[test]
    fn test_swatches() {
        let mut e = engine_from(
            r##"{"colors": ["#000000", "#ffffff"], "colorCount": 2, "lockedIndices": [1], "colorFormat": "rgb"}"##,
            11,
        );
        let sw = e.swatches();
        assert_eq!(sw.len(), 2);
        assert_eq!(sw[0].display, "rgb(0, 0, 0)");
        assert!(sw[0].dark && !sw[0].locked);
        assert_eq!(sw[1].color, "#FFFFFF");
        assert!(!sw[1].dark && sw[1].locked);

        e.set_display_format(DisplayFormat::Hex);
        assert_eq!(e.swatches()[1].display, "#FFFFFF");
    }

    #[test]
    fn test_save_failure_keeps_mutation() {
        let mut e = engine(12);
        e.store.slots_mut().set_fail_writes(true);

        e.resize(8).unwrap();
        assert_eq!(e.size(), 8);
        assert!(e.last_persist_error().is_some());
        assert!(!e.save());

        e.store.slots_mut().set_fail_writes(false);
        assert!(e.save());
        assert!(e.last_persist_error().is_none());
        assert_eq!(e.store().load().unwrap().size, 8);
    }

    #[test]
    fn test_restore_reconciles_stored_state() {
        let e = engine_from(
            r##"{"colors": ["#a1b2c3", "oops", "#000000"], "colorCount": 5, "lockedIndices": [0, 4, 9]}"##,
            13,
        );
        assert_invariants(&e);
        assert_eq!(e.size(), 5);
        assert_eq!(e.colors()[0], "#A1B2C3");
        assert_ne!(e.colors()[1], "oops");
        assert_eq!(e.colors()[2], "#000000");
        assert_eq!(e.state().locked.iter().copied().collect::<Vec<_>>(), vec![0, 4]);
        // reconciled state was written back
        assert_eq!(e.store().load().as_ref(), Some(e.state()));
    }

    #[test]
    fn test_restore_clamps_size_and_regenerates_empty() {
        let e = engine_from(r#"{"colorCount": 50, "lockedIndices": [2]}"#, 14);
        assert_eq!(e.size(), 20);
        assert!(e.is_locked(2));
        assert_invariants(&e);

        let e = engine_from("garbage", 15);
        assert_eq!(e.size(), 5);
        assert_invariants(&e);
    }
}
