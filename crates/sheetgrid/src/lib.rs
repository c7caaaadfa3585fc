//! Meta crate that re-exports the sheetgrid building blocks. Depend on this
//! crate and opt into layers via feature flags; the underlying crates stay
//! reachable for deeper integration.

#[cfg(feature = "common")]
pub use sheetgrid_common as common;

#[cfg(feature = "core")]
pub use sheetgrid_core as grid;

#[cfg(feature = "common")]
pub use sheetgrid_common::{CellValue, GridKey, KeyDomain, KeyError, StyleMap, StyleValue};

#[cfg(feature = "core")]
pub use sheetgrid_core::{
    AvlTree, Cell, CellRecord, CellUpdate, ColumnBlock, GridConfig, GridError, GridLoader,
    GridStore, LoadStats, MemoryStore, RowEntry, SparseGrid,
};

#[cfg(feature = "core")]
pub mod doc_examples;
