use serde::Deserialize;
use sheetgrid_common::{GridKey, KeyDomain};

/// Construction parameters for a [`crate::SparseGrid`].
///
/// Key domains are fixed here and cannot change afterwards; every key the
/// grid receives is normalized into them.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub name: String,
    pub row_keys: KeyDomain,
    pub column_keys: KeyDomain,
    /// Initial display order of the columns.
    pub columns: Vec<GridKey>,
    /// Advisory row count supplied by the caller.
    pub row_count_hint: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            name: "Sheet1".to_string(),
            row_keys: KeyDomain::Numeric,
            column_keys: KeyDomain::Numeric,
            columns: Vec::new(),
            row_count_hint: 0,
        }
    }
}

impl GridConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Numeric rows with named (lexicographically ordered) columns.
    pub fn named_columns(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_keys: KeyDomain::Text,
            ..Default::default()
        }
    }

    pub fn with_row_keys(mut self, domain: KeyDomain) -> Self {
        self.row_keys = domain;
        self
    }

    pub fn with_column_keys(mut self, domain: KeyDomain) -> Self {
        self.column_keys = domain;
        self
    }

    pub fn with_columns<I, K>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<GridKey>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_row_count_hint(mut self, rows: usize) -> Self {
        self.row_count_hint = rows;
        self
    }
}
