use crate::{GridLoader, MemoryStore, SparseGrid};

/// Build a small grid, save it to an in-memory store, and load it back.
///
/// This helper is intended for documentation examples to avoid repetitive setup.
///
/// # Example
///
/// ```rust
/// # use sheetgrid::doc_examples::round_trip;
/// let grid = round_trip(&[(1, 1, "Alpha"), (3, 1, "Gamma"), (2, 2, "Beta")])?;
/// assert_eq!(grid.get(3, 1).map(ToString::to_string).as_deref(), Some("Gamma"));
/// assert_eq!(grid.column_rows(1).len(), 2);
/// # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
/// ```
pub fn round_trip(
    writes: &[(i64, i64, &str)],
) -> Result<SparseGrid, Box<dyn std::error::Error + Send + Sync>> {
    let mut grid = SparseGrid::new("Sheet1");
    for &(row, col, value) in writes {
        grid.set(row, col, value)?;
    }

    let mut loader = GridLoader::new(MemoryStore::new());
    loader.save(&grid)?;
    let loaded = loader.load("Sheet1")?;
    Ok(loaded)
}
