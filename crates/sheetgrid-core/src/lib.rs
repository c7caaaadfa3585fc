//! Sparse spreadsheet storage built from two levels of AVL trees.
//!
//! A [`SparseGrid`] keeps a column tree whose nodes each own a row tree, so
//! only cells that were written take up space and every listing comes out in
//! ascending key order.

pub mod avl;
pub mod cell;
pub mod column_index;
pub mod config;
pub mod error;
pub mod grid;
pub mod loader;
pub mod records;
pub mod row_index;
pub mod store;
pub mod traverse;

pub use avl::{AvlTree, InvariantViolation, Upsert};
pub use cell::{Cell, CellUpdate};
pub use column_index::{ColumnIndex, ColumnNode};
pub use config::GridConfig;
pub use error::{Axis, GridError, Result};
pub use grid::SparseGrid;
pub use loader::{GridLoader, LoadStats};
pub use records::CellRecord;
pub use row_index::RowIndex;
pub use store::{GridStore, MemoryStore};
pub use traverse::{CellRef, Cells, ColumnBlock, RowEntry};

pub use sheetgrid_common::{
    CellValue, GridKey, KeyDomain, KeyError, StyleMap, StyleValue,
};
