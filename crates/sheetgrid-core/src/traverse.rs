//! Ordered views over a grid.
//!
//! All views borrow the grid, so they describe a consistent snapshot: the
//! borrow checker rules out mutation while one is alive. They keep no cursor
//! state in the grid, so every call starts over from the smallest key.

use serde::Serialize;
use sheetgrid_common::{CellValue, GridKey, StyleMap};

use crate::avl::Iter;
use crate::cell::Cell;
use crate::column_index::{ColumnIndex, ColumnNode};

/// One row of a column listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowEntry<'a> {
    pub key: &'a GridKey,
    pub value: &'a CellValue,
    #[serde(skip)]
    pub style: &'a StyleMap,
}

impl<'a> RowEntry<'a> {
    pub(crate) fn new(key: &'a GridKey, cell: &'a Cell) -> Self {
        Self {
            key,
            value: &cell.value,
            style: &cell.style,
        }
    }
}

/// One column of an all-columns listing with its rows in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnBlock<'a> {
    #[serde(rename = "colKey")]
    pub key: &'a GridKey,
    pub rows: Vec<RowEntry<'a>>,
}

pub(crate) fn column_rows<'a>(column: &'a ColumnNode) -> Vec<RowEntry<'a>> {
    column
        .rows()
        .iter()
        .map(|(key, cell)| RowEntry::new(key, cell))
        .collect()
}

pub(crate) fn all_columns(index: &ColumnIndex) -> Vec<ColumnBlock<'_>> {
    index
        .iter()
        .map(|(key, column)| ColumnBlock {
            key,
            rows: column_rows(column),
        })
        .collect()
}

/// A cell visited by [`Cells`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRef<'a> {
    pub column: &'a GridKey,
    pub row: &'a GridKey,
    pub cell: &'a Cell,
}

/// Column-major, row-ascending iterator over every stored cell.
pub struct Cells<'a> {
    columns: Iter<'a, GridKey, ColumnNode>,
    current: Option<(&'a GridKey, Iter<'a, GridKey, Cell>)>,
}

impl<'a> Cells<'a> {
    pub(crate) fn new(index: &'a ColumnIndex) -> Self {
        Self {
            columns: index.iter(),
            current: None,
        }
    }
}

impl<'a> Iterator for Cells<'a> {
    type Item = CellRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((column, rows)) = self.current.as_mut()
                && let Some((row, cell)) = rows.next()
            {
                return Some(CellRef {
                    column: *column,
                    row,
                    cell,
                });
            }
            let (column, node) = self.columns.next()?;
            self.current = Some((column, node.rows().iter()));
        }
    }
}
