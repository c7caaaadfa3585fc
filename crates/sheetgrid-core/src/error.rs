use std::fmt;

use sheetgrid_common::{GridKey, KeyError};

/// Which side of the grid a key addresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A key could not be brought into the axis' key domain.
    #[error("{axis} {source}")]
    Key {
        axis: Axis,
        #[source]
        source: KeyError,
    },

    /// A persisted style string is not a valid style object.
    #[error("invalid style for cell (row {row}, column {column}): {source}")]
    Style {
        column: GridKey,
        row: GridKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("sheet '{0}' has no cells to save")]
    EmptyGrid(String),

    /// Failure reported by a [`crate::store::GridStore`] implementation.
    #[error("store: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GridError {
    pub(crate) fn key(axis: Axis) -> impl FnOnce(KeyError) -> GridError {
        move |source| GridError::Key { axis, source }
    }

    pub(crate) fn store<E>(error: E) -> GridError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GridError::Store(Box::new(error))
    }

    pub fn is_key_error(&self) -> bool {
        matches!(self, GridError::Key { .. })
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
