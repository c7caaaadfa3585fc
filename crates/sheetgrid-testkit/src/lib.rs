//! Fixtures shared by the sheetgrid test suites and benchmarks.

use sheetgrid_core::{CellRecord, GridKey, GridStore, SparseGrid};

/// The walk-through sheet: eight writes, one of them an overwrite of (1, 1).
///
/// Entries are `(row, column, value)`.
pub const SCENARIO_WRITES: &[(i64, i64, &str)] = &[
    (1, 1, "Alpha"),
    (3, 1, "Gamma"),
    (2, 2, "Beta"),
    (1, 2, "Delta"),
    (5, 3, "Epsilon"),
    (4, 1, "Zeta"),
    (2, 3, "Eta"),
    (1, 1, "New Alpha"),
];

/// Grid with [`SCENARIO_WRITES`] applied in order.
pub fn scenario_grid() -> SparseGrid {
    let mut grid = SparseGrid::new("Scenario");
    for &(row, col, value) in SCENARIO_WRITES {
        // Integer keys always normalize into the numeric domain.
        if let Err(err) = grid.set(row, col, value) {
            panic!("scenario write ({row}, {col}) failed: {err}");
        }
    }
    grid
}

/// What a store would hold after saving [`scenario_grid`]: column-major,
/// rows ascending, unstyled cells carrying `"{}"`.
pub fn scenario_records() -> Vec<CellRecord> {
    vec![
        CellRecord::new(1, 1, "New Alpha", "{}"),
        CellRecord::new(1, 3, "Gamma", "{}"),
        CellRecord::new(1, 4, "Zeta", "{}"),
        CellRecord::new(2, 1, "Delta", "{}"),
        CellRecord::new(2, 2, "Beta", "{}"),
        CellRecord::new(3, 2, "Eta", "{}"),
        CellRecord::new(3, 5, "Epsilon", "{}"),
    ]
}

/// Deterministic xorshift64 stream of `(row, column)` coordinates.
///
/// Used where a test or benchmark wants scattered keys without pulling in an
/// RNG crate or depending on a seed from the environment.
#[derive(Clone, Debug)]
pub struct KeyStream {
    state: u64,
    rows: u64,
    cols: u64,
}

impl KeyStream {
    /// Coordinates fall in `1..=rows` × `1..=cols`. A zero seed is bumped to 1
    /// since xorshift never leaves zero.
    pub fn new(seed: u64, rows: u64, cols: u64) -> Self {
        Self {
            state: seed.max(1),
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Iterator for KeyStream {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.next_u64() % self.rows + 1;
        let col = self.next_u64() % self.cols + 1;
        Some((row as i64, col as i64))
    }
}

/// Error returned by every [`FailingStore`] operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("store unavailable")]
pub struct StoreDown;

/// A [`GridStore`] whose backend is always unreachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl GridStore for FailingStore {
    type Error = StoreDown;

    fn has_sheet(&self, _sheet: &str) -> Result<bool, StoreDown> {
        Err(StoreDown)
    }

    fn column_names(&self, _sheet: &str) -> Result<Vec<GridKey>, StoreDown> {
        Err(StoreDown)
    }

    fn read_cells(&self, _sheet: &str) -> Result<Vec<CellRecord>, StoreDown> {
        Err(StoreDown)
    }

    fn write_sheet(
        &mut self,
        _sheet: &str,
        _columns: &[GridKey],
        _records: Vec<CellRecord>,
    ) -> Result<(), StoreDown> {
        Err(StoreDown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_store_reports_store_down() {
        let mut store = FailingStore;
        assert_eq!(store.has_sheet("Sheet1"), Err(StoreDown));
        assert_eq!(StoreDown.to_string(), "store unavailable");
        assert!(store.write_sheet("Sheet1", &[], Vec::new()).is_err());
    }

    #[test]
    fn key_stream_is_deterministic_and_in_range() {
        let a: Vec<_> = KeyStream::new(0, 10, 3).take(100).collect();
        let b: Vec<_> = KeyStream::new(0, 10, 3).take(100).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|&(r, c)| (1..=10).contains(&r) && (1..=3).contains(&c)));
    }
}
