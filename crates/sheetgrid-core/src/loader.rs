use web_time::Instant;

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::grid::SparseGrid;
use crate::store::GridStore;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    pub sheets_loaded: usize,
    pub cells_loaded: usize,
    pub columns_created: usize,
    pub sheets_saved: usize,
    pub cells_saved: usize,
    pub load_time_ms: u64,
    pub save_time_ms: u64,
}

/// Moves grids between a [`GridStore`] and memory, keeping running stats.
pub struct GridLoader<S: GridStore> {
    store: S,
    stats: LoadStats,
}

impl<S: GridStore> GridLoader<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            stats: LoadStats::default(),
        }
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load `sheet` with default (numeric) key domains.
    pub fn load(&mut self, sheet: &str) -> Result<SparseGrid> {
        self.load_with(GridConfig::named(sheet))
    }

    /// Load the sheet named by `config.name`.
    ///
    /// Columns listed by the store come first in the display order; cells are
    /// applied one record at a time. On error the partially built grid is
    /// dropped.
    pub fn load_with(&mut self, mut config: GridConfig) -> Result<SparseGrid> {
        let start = Instant::now();
        let sheet = config.name.clone();

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("grid_load", sheet = sheet.as_str()).entered();

        if !self.store.has_sheet(&sheet).map_err(GridError::store)? {
            return Err(GridError::SheetNotFound(sheet));
        }

        config.columns = self.store.column_names(&sheet).map_err(GridError::store)?;
        #[cfg(feature = "tracing")]
        let listed = config.columns.len();
        let records = self.store.read_cells(&sheet).map_err(GridError::store)?;

        let grid = SparseGrid::from_records(config, records)?;

        #[cfg(feature = "tracing")]
        {
            let unlisted = grid.column_order().len().saturating_sub(listed);
            if unlisted > 0 {
                tracing::warn!(
                    sheet = sheet.as_str(),
                    unlisted,
                    "store returned cells for columns missing from its column list"
                );
            }
        }

        self.stats.sheets_loaded += 1;
        self.stats.cells_loaded += grid.row_count_hint();
        self.stats.columns_created += grid.column_count();
        self.stats.load_time_ms += start.elapsed().as_millis() as u64;
        Ok(grid)
    }

    /// Persist `grid` under its own name. Empty grids are refused.
    pub fn save(&mut self, grid: &SparseGrid) -> Result<usize> {
        let start = Instant::now();

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("grid_save", sheet = grid.name()).entered();

        if grid.is_empty() {
            return Err(GridError::EmptyGrid(grid.name().to_string()));
        }

        let records = grid.to_records()?;
        let saved = records.len();
        self.store
            .write_sheet(grid.name(), grid.column_order(), records)
            .map_err(GridError::store)?;

        self.stats.sheets_saved += 1;
        self.stats.cells_saved += saved;
        self.stats.save_time_ms += start.elapsed().as_millis() as u64;
        Ok(saved)
    }
}
