//! Flat `(column, row, value, serialized style)` records.
//!
//! This is the shape persistence collaborators store cells in. A grid is
//! rehydrated from records with one write per record and read back in the
//! canonical column-major order.

use serde::{Deserialize, Serialize};
use sheetgrid_common::{CellValue, GridKey, StyleMap};

use crate::cell::CellUpdate;
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::grid::SparseGrid;

/// One persisted cell. `style` holds the style map as a JSON object string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub column: GridKey,
    pub row: GridKey,
    pub value: CellValue,
    pub style: String,
}

impl CellRecord {
    pub fn new(
        column: impl Into<GridKey>,
        row: impl Into<GridKey>,
        value: impl Into<CellValue>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            row: row.into(),
            value: value.into(),
            style: style.into(),
        }
    }

    /// Parse the serialized style. A blank string or JSON `null` means "no
    /// style recorded".
    pub fn parse_style(&self) -> Result<Option<StyleMap>> {
        let raw = self.style.trim();
        if raw.is_empty() || raw == "null" {
            return Ok(None);
        }
        serde_json::from_str(&self.style)
            .map(Some)
            .map_err(|source| GridError::Style {
                column: self.column.clone(),
                row: self.row.clone(),
                source,
            })
    }
}

impl SparseGrid {
    /// Build a grid from `config` and write every record into it.
    ///
    /// The row count hint becomes the number of records.
    pub fn from_records<I>(config: GridConfig, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = CellRecord>,
    {
        let mut grid = SparseGrid::with_config(config)?;
        let loaded = grid.extend_records(records)?;
        grid.set_row_count_hint(loaded);
        Ok(grid)
    }

    /// Write each record in turn, returning how many were applied.
    ///
    /// Records are independent writes: when one fails, the ones before it
    /// stay applied.
    pub fn extend_records<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = CellRecord>,
    {
        let mut applied = 0;
        for record in records {
            let style = record.parse_style()?;
            let update = CellUpdate {
                value: Some(record.value),
                style,
            };
            self.set_cell(record.row, record.column, update)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Every cell as a record, in column-major, row-ascending order.
    pub fn to_records(&self) -> Result<Vec<CellRecord>> {
        self.cells()
            .map(|entry| {
                let style =
                    serde_json::to_string(&entry.cell.style).map_err(|source| GridError::Style {
                        column: entry.column.clone(),
                        row: entry.row.clone(),
                        source,
                    })?;
                Ok(CellRecord {
                    column: entry.column.clone(),
                    row: entry.row.clone(),
                    value: entry.cell.value.clone(),
                    style,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_rehydrate_grid() {
        let records = vec![
            CellRecord::new(1, 1, "Alpha", r#"{"bold":true}"#),
            CellRecord::new(1, 3, "Gamma", "{}"),
            CellRecord::new(2, 2, "Beta", ""),
        ];
        let grid = SparseGrid::from_records(GridConfig::named("Loaded"), records).unwrap();
        assert_eq!(grid.get(3, 1), Some(&CellValue::from("Gamma")));
        assert_eq!(
            grid.style(1, 1).and_then(|s| s.get("bold")),
            Some(&sheetgrid_common::StyleValue::Bool(true))
        );
        assert_eq!(grid.style(2, 2), Some(&StyleMap::new()));
        assert_eq!(grid.row_count_hint(), 3);
        assert_eq!(grid.column_order(), &[GridKey::Int(1), GridKey::Int(2)]);
    }

    #[test]
    fn null_style_loads_as_unstyled() {
        let records = vec![
            CellRecord::new(1, 1, "a", "null"),
            CellRecord::new(1, 2, "b", " null "),
        ];
        let grid = SparseGrid::from_records(GridConfig::default(), records).unwrap();
        assert_eq!(grid.get(1, 1), Some(&CellValue::from("a")));
        assert_eq!(grid.style(1, 1), Some(&StyleMap::new()));
        assert_eq!(grid.style(2, 1), Some(&StyleMap::new()));
    }

    #[test]
    fn bad_style_names_the_cell() {
        let mut grid = SparseGrid::new("Sheet1");
        let records = vec![
            CellRecord::new(1, 1, "ok", "{}"),
            CellRecord::new(1, 2, "broken", "{color:"),
        ];
        let err = grid.extend_records(records).unwrap_err();
        assert!(matches!(
            &err,
            GridError::Style { row: GridKey::Int(2), column: GridKey::Int(1), .. }
        ));
        // earlier records stay applied
        assert_eq!(grid.get(1, 1), Some(&CellValue::from("ok")));
        assert_eq!(grid.get(2, 1), None);
    }

    #[test]
    fn to_records_is_column_major() {
        let mut grid = SparseGrid::new("Sheet1");
        grid.set(2, 2, "d").unwrap();
        grid.set_styled(1, 1, "a", StyleMap::new().with("color", "red"))
            .unwrap();
        grid.set(1, 2, "c").unwrap();
        let records = grid.to_records().unwrap();
        let coords: Vec<(i64, i64)> = records
            .iter()
            .map(|r| (r.column.as_int().unwrap(), r.row.as_int().unwrap()))
            .collect();
        assert_eq!(coords, vec![(1, 1), (2, 1), (2, 2)]);
        assert_eq!(records[0].style, r#"{"color":"red"}"#);
        assert_eq!(records[1].style, "{}");
    }

    #[test]
    fn records_serialize_as_flat_objects() {
        let record = CellRecord::new(1, 4, "Zeta", "{}");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"column":1,"row":4,"value":"Zeta","style":"{}"}"#);
    }
}
