use std::collections::BTreeMap;
use std::convert::Infallible;

use sheetgrid_common::GridKey;

use crate::records::CellRecord;

/// Persistence collaborator a grid is loaded from and saved to.
///
/// Implementations own transactions, retries and storage format; the grid
/// only sees column lists and flat [`CellRecord`]s.
pub trait GridStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn has_sheet(&self, sheet: &str) -> Result<bool, Self::Error>;

    /// Column keys in display order.
    fn column_names(&self, sheet: &str) -> Result<Vec<GridKey>, Self::Error>;

    fn read_cells(&self, sheet: &str) -> Result<Vec<CellRecord>, Self::Error>;

    /// Persist a sheet. When the sheet already exists its column list is kept
    /// and `records` are appended, mirroring a bulk insert into an existing
    /// table.
    fn write_sheet(
        &mut self,
        sheet: &str,
        columns: &[GridKey],
        records: Vec<CellRecord>,
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Default)]
struct StoredSheet {
    columns: Vec<GridKey>,
    records: Vec<CellRecord>,
}

/// In-process [`GridStore`] keyed by sheet name.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sheets: BTreeMap<String, StoredSheet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sheets.keys().map(String::as_str)
    }

    /// Records stored for `sheet`, in insertion order.
    pub fn records(&self, sheet: &str) -> &[CellRecord] {
        self.sheets
            .get(sheet)
            .map(|s| s.records.as_slice())
            .unwrap_or_default()
    }
}

impl GridStore for MemoryStore {
    type Error = Infallible;

    fn has_sheet(&self, sheet: &str) -> Result<bool, Self::Error> {
        Ok(self.sheets.contains_key(sheet))
    }

    fn column_names(&self, sheet: &str) -> Result<Vec<GridKey>, Self::Error> {
        Ok(self
            .sheets
            .get(sheet)
            .map(|s| s.columns.clone())
            .unwrap_or_default())
    }

    fn read_cells(&self, sheet: &str) -> Result<Vec<CellRecord>, Self::Error> {
        Ok(self.records(sheet).to_vec())
    }

    fn write_sheet(
        &mut self,
        sheet: &str,
        columns: &[GridKey],
        records: Vec<CellRecord>,
    ) -> Result<(), Self::Error> {
        let stored = self
            .sheets
            .entry(sheet.to_string())
            .or_insert_with(|| StoredSheet {
                columns: columns.to_vec(),
                records: Vec::new(),
            });
        stored.records.extend(records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_sheet_keeps_columns_and_appends() {
        let mut store = MemoryStore::new();
        store
            .write_sheet("S", &[1.into()], vec![CellRecord::new(1, 1, "a", "{}")])
            .unwrap();
        store
            .write_sheet("S", &[9.into()], vec![CellRecord::new(1, 2, "b", "{}")])
            .unwrap();
        assert_eq!(store.column_names("S").unwrap(), vec![GridKey::Int(1)]);
        assert_eq!(store.records("S").len(), 2);
        assert!(store.has_sheet("S").unwrap());
        assert!(!store.has_sheet("T").unwrap());
        assert!(store.records("T").is_empty());
    }
}
