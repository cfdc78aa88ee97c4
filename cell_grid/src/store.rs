// store.rs - Dense per-cell colour state

use crate::cell::{CellColor, CellCoord};
use crate::config::GridDims;
use crate::error::GridError;

/// Row-major `columns x rows` array of cell colours. The single source of
/// truth for what each cell displays.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStore {
    dims: GridDims,
    cells: Vec<CellColor>,
}

impl CellStore {
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![CellColor::Background; dims.cell_count()],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Last write wins.
    pub fn set(&mut self, col: i32, row: i32, color: CellColor) -> Result<(), GridError> {
        let index = self.dims.index(col, row)?;
        self.cells[index] = color;
        Ok(())
    }

    pub fn unset(&mut self, col: i32, row: i32) -> Result<(), GridError> {
        self.set(col, row, CellColor::Background)
    }

    pub fn clear_all(&mut self) {
        self.cells.fill(CellColor::Background);
    }

    pub fn get(&self, col: i32, row: i32) -> Result<CellColor, GridError> {
        Ok(self.cells[self.dims.index(col, row)?])
    }

    /// Number of cells holding a non-background colour.
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_background()).count()
    }

    /// Every cell with its coordinate, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellColor)> + '_ {
        let columns = self.dims.columns as usize;
        self.cells.iter().enumerate().map(move |(i, &color)| {
            (CellCoord::new((i % columns) as i32, (i / columns) as i32), color)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Rgb;

    const RED: CellColor = CellColor::Rgb(Rgb::new(255, 0, 0));
    const BLUE: CellColor = CellColor::Rgb(Rgb::new(0, 0, 255));

    fn store() -> CellStore {
        CellStore::new(GridDims { columns: 5, rows: 40 })
    }

    #[test]
    fn starts_all_background() {
        let store = store();
        assert_eq!(store.painted_count(), 0);
        assert!(store.iter().all(|(_, c)| c.is_background()));
        assert_eq!(store.iter().count(), 200);
    }

    #[test]
    fn set_overwrites_and_unset_restores_background() {
        let mut store = store();
        store.set(2, 10, RED).unwrap();
        store.set(2, 10, BLUE).unwrap();
        assert_eq!(store.get(2, 10), Ok(BLUE));
        store.unset(2, 10).unwrap();
        assert_eq!(store.get(2, 10), Ok(CellColor::Background));
    }

    #[test]
    fn out_of_bounds_is_rejected_not_clamped() {
        let mut store = store();
        for (col, row) in [(5, 0), (-1, 0), (0, 40), (0, -1)] {
            assert!(matches!(
                store.set(col, row, RED),
                Err(GridError::OutOfBounds { columns: 5, rows: 40, .. })
            ));
        }
        assert_eq!(store.painted_count(), 0);
    }

    #[test]
    fn clear_all_is_idempotent() {
        let mut store = store();
        store.set(0, 0, RED).unwrap();
        store.set(4, 39, BLUE).unwrap();
        store.clear_all();
        let once = store.clone();
        store.clear_all();
        assert_eq!(store, once);
        assert_eq!(store, CellStore::new(store.dims()));
    }

    #[test]
    fn iter_reports_coordinates_row_major() {
        let mut store = store();
        store.set(3, 7, RED).unwrap();
        let painted: Vec<_> = store.iter().filter(|(_, c)| !c.is_background()).collect();
        assert_eq!(painted, vec![(CellCoord::new(3, 7), RED)]);
    }
}
