// dirty.rs - Sparse tracking of painted cells for incremental fading

use std::collections::BTreeSet;

use rand::Rng;

use crate::cell::CellCoord;
use crate::error::{ConfigError, GridError};
use crate::store::CellStore;

/// Anything a sweep can fade a cell back to background on.
pub trait CellTarget {
    fn unset_cell(&mut self, col: i32, row: i32) -> Result<(), GridError>;
}

impl CellTarget for CellStore {
    fn unset_cell(&mut self, col: i32, row: i32) -> Result<(), GridError> {
        self.unset(col, row)
    }
}

/// Set of coordinates an update policy has painted and may later fade.
///
/// Marking is idempotent, so one `unmark` always fully untracks a cell no
/// matter how many times it was marked. Iteration order is row-major via
/// `CellCoord`'s ordering, which keeps seeded sweeps reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyTracker {
    tracked: BTreeSet<CellCoord>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, col: i32, row: i32) {
        self.tracked.insert(CellCoord::new(col, row));
    }

    /// Absent coordinates are ignored.
    pub fn unmark(&mut self, col: i32, row: i32) {
        self.tracked.remove(&CellCoord::new(col, row));
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        self.tracked.contains(&CellCoord::new(col, row))
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.tracked.iter().copied()
    }

    pub fn clear(&mut self) {
        self.tracked.clear();
    }

    /// Fades each tracked cell to background with probability
    /// `decay_probability`, untracking it. Survivors stay tracked for the
    /// next frame. Returns how many cells faded.
    ///
    /// Works over a snapshot, so every cell tracked at the start is visited
    /// exactly once. A tracked coordinate the target rejects as out of bounds
    /// is dropped and the pass goes on; the first such error is returned once
    /// every other cell has had its chance to fade.
    pub fn sweep<T, R>(
        &mut self,
        decay_probability: f64,
        rng: &mut R,
        target: &mut T,
    ) -> Result<usize, GridError>
    where
        T: CellTarget + ?Sized,
        R: Rng + ?Sized,
    {
        check_probability(decay_probability)?;

        let snapshot: Vec<CellCoord> = self.tracked.iter().copied().collect();
        let mut faded = 0;
        let mut first_error = None;
        for coord in snapshot {
            if !rng.gen_bool(decay_probability) {
                continue;
            }
            match target.unset_cell(coord.col, coord.row) {
                Ok(()) => faded += 1,
                Err(err @ GridError::OutOfBounds { .. }) => {
                    log::warn!("dropping tracked cell outside the grid: {err}");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
                Err(err) => return Err(err),
            }
            self.tracked.remove(&coord);
        }
        log::trace!("sweep faded {faded} cells, {} still tracked", self.tracked.len());
        match first_error {
            Some(err) => Err(err),
            None => Ok(faded),
        }
    }
}

pub(crate) fn check_probability(p: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { value: p })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{CellColor, Rgb};
    use crate::config::GridDims;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const GREEN: CellColor = CellColor::Rgb(Rgb::new(0, 255, 0));

    fn painted(coords: &[(i32, i32)]) -> (CellStore, DirtyTracker) {
        let mut store = CellStore::new(GridDims { columns: 8, rows: 8 });
        let mut tracker = DirtyTracker::new();
        for &(col, row) in coords {
            store.set(col, row, GREEN).unwrap();
            tracker.mark(col, row);
        }
        (store, tracker)
    }

    #[test]
    fn mark_then_unmark_restores_previous_set() {
        let (_, mut tracker) = painted(&[(1, 1), (2, 3)]);
        let before = tracker.clone();
        tracker.mark(5, 5);
        tracker.unmark(5, 5);
        assert_eq!(tracker, before);
    }

    #[test]
    fn double_mark_leaves_no_residue_after_one_unmark() {
        let mut tracker = DirtyTracker::new();
        tracker.mark(4, 2);
        tracker.mark(4, 2);
        assert_eq!(tracker.len(), 1);
        tracker.unmark(4, 2);
        assert!(!tracker.contains(4, 2));
        assert!(tracker.is_empty());
    }

    #[test]
    fn unmark_of_absent_coordinate_is_a_no_op() {
        let (_, mut tracker) = painted(&[(0, 0)]);
        tracker.unmark(7, 7);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn certain_decay_empties_tracker_and_store() {
        let (mut store, mut tracker) = painted(&[(0, 0), (3, 4), (7, 7)]);
        let mut rng = StdRng::seed_from_u64(1);
        let faded = tracker.sweep(1.0, &mut rng, &mut store).unwrap();
        assert_eq!(faded, 3);
        assert!(tracker.is_empty());
        assert_eq!(store.painted_count(), 0);
    }

    #[test]
    fn zero_decay_changes_nothing() {
        let (mut store, mut tracker) = painted(&[(0, 0), (3, 4), (7, 7)]);
        let (store_before, tracker_before) = (store.clone(), tracker.clone());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(tracker.sweep(0.0, &mut rng, &mut store), Ok(0));
        assert_eq!(tracker, tracker_before);
        assert_eq!(store, store_before);
    }

    #[test]
    fn partial_decay_keeps_survivors_painted() {
        let coords: Vec<_> = (0..8).flat_map(|c| (0..8).map(move |r| (c, r))).collect();
        let (mut store, mut tracker) = painted(&coords);
        let mut rng = StdRng::seed_from_u64(7);
        let faded = tracker.sweep(0.5, &mut rng, &mut store).unwrap();
        assert_eq!(faded + tracker.len(), 64);
        assert_eq!(store.painted_count(), tracker.len());
        for coord in tracker.iter() {
            assert_eq!(store.get(coord.col, coord.row), Ok(GREEN));
        }
    }

    #[test]
    fn stray_mark_outside_grid_does_not_block_other_cells() {
        let (mut store, mut tracker) = painted(&[(1, 1), (6, 2)]);
        tracker.mark(-1, 0);
        let mut rng = StdRng::seed_from_u64(3);

        let result = tracker.sweep(1.0, &mut rng, &mut store);
        assert!(matches!(result, Err(GridError::OutOfBounds { col: -1, row: 0, .. })));
        assert!(tracker.is_empty());
        assert_eq!(store.painted_count(), 0);

        // Nothing left to trip over on the next frame
        assert_eq!(tracker.sweep(1.0, &mut rng, &mut store), Ok(0));
    }

    #[test]
    fn rejects_probability_outside_unit_interval() {
        let (mut store, mut tracker) = painted(&[(1, 1)]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            tracker.sweep(1.5, &mut rng, &mut store),
            Err(GridError::Config(ConfigError::InvalidProbability { value: 1.5 }))
        );
        assert!(tracker.sweep(f64::NAN, &mut rng, &mut store).is_err());
        assert_eq!(tracker.len(), 1);
    }
}
