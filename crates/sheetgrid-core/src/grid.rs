use sheetgrid_common::{CellValue, GridKey, KeyDomain, StyleMap};

use crate::avl::{InvariantViolation, Upsert};
use crate::cell::{Cell, CellUpdate};
use crate::column_index::ColumnIndex;
use crate::config::GridConfig;
use crate::error::{Axis, GridError, Result};
use crate::traverse::{self, Cells, ColumnBlock, RowEntry};

/// Sparse two-level index over (row, column) → [`Cell`].
///
/// A primary AVL tree keyed by column holds, per column, a secondary AVL tree
/// keyed by row. Columns and rows come into existence on their first write
/// and are never removed individually; [`SparseGrid::clear`] drops them all.
///
/// The grid is a plain single-owner value. Hosts that share one across
/// threads wrap it in a lock at their boundary.
#[derive(Debug, Clone)]
pub struct SparseGrid {
    name: String,
    row_keys: KeyDomain,
    column_keys: KeyDomain,
    columns: ColumnIndex,
    column_order: Vec<GridKey>,
    row_count_hint: usize,
}

impl Default for SparseGrid {
    fn default() -> Self {
        Self::from_parts(GridConfig::default(), Vec::new())
    }
}

impl SparseGrid {
    /// Empty grid with numeric row and column keys.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_parts(GridConfig::named(name), Vec::new())
    }

    /// Empty numeric-keyed grid with an initial column display order.
    pub fn with_columns<I, K>(name: impl Into<String>, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<GridKey>,
    {
        Self::with_config(GridConfig::named(name).with_columns(columns))
    }

    /// Build a grid from `config`, rejecting initial columns that do not fit
    /// the column key domain.
    pub fn with_config(mut config: GridConfig) -> Result<Self> {
        let mut order: Vec<GridKey> = Vec::with_capacity(config.columns.len());
        for key in std::mem::take(&mut config.columns) {
            let key = config
                .column_keys
                .normalize(key)
                .map_err(GridError::key(Axis::Column))?;
            if !order.contains(&key) {
                order.push(key);
            }
        }
        Ok(Self::from_parts(config, order))
    }

    fn from_parts(config: GridConfig, column_order: Vec<GridKey>) -> Self {
        Self {
            name: config.name,
            row_keys: config.row_keys,
            column_keys: config.column_keys,
            columns: ColumnIndex::new(),
            column_order,
            row_count_hint: config.row_count_hint,
        }
    }

    /* ─────────────────────────── Writes ─────────────────────────── */

    /// Write `value` at (`row`, `col`) and reset the cell style to the empty
    /// map.
    pub fn set(
        &mut self,
        row: impl Into<GridKey>,
        col: impl Into<GridKey>,
        value: impl Into<CellValue>,
    ) -> Result<()> {
        self.set_cell(row, col, CellUpdate::value(value))
    }

    /// Write `value` and `style` at (`row`, `col`).
    pub fn set_styled(
        &mut self,
        row: impl Into<GridKey>,
        col: impl Into<GridKey>,
        value: impl Into<CellValue>,
        style: StyleMap,
    ) -> Result<()> {
        self.set_cell(row, col, CellUpdate::value(value).with_style(style))
    }

    /// Apply a partial write. Fields missing from `update` keep their current
    /// contents; the column and row are created if needed.
    pub fn set_cell(
        &mut self,
        row: impl Into<GridKey>,
        col: impl Into<GridKey>,
        update: CellUpdate,
    ) -> Result<()> {
        let row = self
            .row_keys
            .normalize(row.into())
            .map_err(GridError::key(Axis::Row))?;
        let col = self
            .column_keys
            .normalize(col.into())
            .map_err(GridError::key(Axis::Column))?;

        let created = self.columns.insert(col.clone(), row, update) == Upsert::Inserted;
        if created && !self.column_order.contains(&col) {
            #[cfg(feature = "tracing")]
            tracing::debug!(sheet = %self.name, column = %col, "column created");
            self.column_order.push(col);
        }
        Ok(())
    }

    /// Drop every cell. The name, key domains and column order are kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            sheet = %self.name,
            columns = self.columns.len(),
            "clearing grid"
        );
        self.columns.clear();
    }

    /* ─────────────────────────── Reads ──────────────────────────── */

    /// Value at (`row`, `col`), or `None` if nothing was ever written there.
    ///
    /// Keys that cannot belong to the grid's key domains are simply absent.
    pub fn get(&self, row: impl Into<GridKey>, col: impl Into<GridKey>) -> Option<&CellValue> {
        self.cell(row, col).map(|cell| &cell.value)
    }

    pub fn cell(&self, row: impl Into<GridKey>, col: impl Into<GridKey>) -> Option<&Cell> {
        let col = self.column_keys.normalize(col.into()).ok()?;
        let row = self.row_keys.normalize(row.into()).ok()?;
        self.columns.rows(&col)?.cell(&row)
    }

    pub fn style(&self, row: impl Into<GridKey>, col: impl Into<GridKey>) -> Option<&StyleMap> {
        self.cell(row, col).map(|cell| &cell.style)
    }

    pub fn contains(&self, row: impl Into<GridKey>, col: impl Into<GridKey>) -> bool {
        self.cell(row, col).is_some()
    }

    /// Rows of one column in ascending row order; empty when the column is
    /// unknown.
    pub fn column_rows(&self, col: impl Into<GridKey>) -> Vec<RowEntry<'_>> {
        let Ok(col) = self.column_keys.normalize(col.into()) else {
            return Vec::new();
        };
        self.columns
            .column(&col)
            .map(traverse::column_rows)
            .unwrap_or_default()
    }

    /// Every column in ascending key order, each with its rows ascending.
    pub fn all_columns(&self) -> Vec<ColumnBlock<'_>> {
        traverse::all_columns(&self.columns)
    }

    /// Lazily walk every cell in column-major, row-ascending order.
    pub fn cells(&self) -> Cells<'_> {
        Cells::new(&self.columns)
    }

    /// Column keys in ascending (tree) order.
    pub fn column_keys(&self) -> impl Iterator<Item = &GridKey> + '_ {
        self.columns.keys()
    }

    /// Column keys in display order: the configured columns followed by
    /// columns in the order they were first written.
    pub fn column_order(&self) -> &[GridKey] {
        &self.column_order
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell_count(&self) -> usize {
        self.columns
            .iter()
            .map(|(_, column)| column.rows().len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn row_domain(&self) -> KeyDomain {
        self.row_keys
    }

    pub fn column_domain(&self) -> KeyDomain {
        self.column_keys
    }

    /// Advisory only; nothing in the grid reads it.
    pub fn row_count_hint(&self) -> usize {
        self.row_count_hint
    }

    pub fn set_row_count_hint(&mut self, rows: usize) {
        self.row_count_hint = rows;
    }

    /// Check the ordering and balance invariants of every tree in the grid.
    pub fn validate(&self) -> std::result::Result<(), InvariantViolation> {
        self.columns.validate()
    }
}
