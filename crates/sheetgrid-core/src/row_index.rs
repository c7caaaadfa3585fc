use sheetgrid_common::{CellValue, GridKey, StyleMap};

use crate::avl::{AvlTree, InvariantViolation, Iter, Upsert};
use crate::cell::{Cell, CellUpdate};

/// Secondary index: the cells of one column keyed by row.
///
/// Keys are assumed to already be normalized into the grid's row domain.
#[derive(Debug, Clone, Default)]
pub struct RowIndex {
    tree: AvlTree<GridKey, Cell>,
}

impl RowIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the cell at `row`.
    ///
    /// On an existing row only the fields present in `update` change; a new
    /// row starts from an empty value and an empty style.
    pub fn insert(&mut self, row: GridKey, update: CellUpdate) -> Upsert {
        self.tree.upsert(row, Cell::default, |cell| cell.apply(update))
    }

    pub fn get(&self, row: &GridKey) -> Option<&CellValue> {
        self.tree.get(row).map(|cell| &cell.value)
    }

    pub fn cell(&self, row: &GridKey) -> Option<&Cell> {
        self.tree.get(row)
    }

    pub fn style(&self, row: &GridKey) -> Option<&StyleMap> {
        self.tree.get(row).map(|cell| &cell.style)
    }

    pub fn contains(&self, row: &GridKey) -> bool {
        self.tree.contains_key(row)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Rows in ascending key order.
    pub fn iter(&self) -> Iter<'_, GridKey, Cell> {
        self.tree.iter()
    }

    pub fn first_row(&self) -> Option<&GridKey> {
        self.tree.first_key()
    }

    pub fn last_row(&self) -> Option<&GridKey> {
        self.tree.last_key()
    }

    pub fn height(&self) -> u32 {
        self.tree.height()
    }

    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.tree.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_single_row() {
        let mut rows = RowIndex::new();
        assert_eq!(rows.insert(3.into(), CellUpdate::value("Gamma")), Upsert::Inserted);
        assert_eq!(rows.insert(3.into(), CellUpdate::value("Delta")), Upsert::Updated);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.get(&3.into()), Some(&CellValue::from("Delta")));
    }

    #[test]
    fn value_and_style_update_independently() {
        let mut rows = RowIndex::new();
        let style = StyleMap::new().with("textAlign", "right");
        rows.insert(1.into(), CellUpdate::value("x").with_style(style.clone()));

        rows.insert(1.into(), CellUpdate::value_only("y"));
        assert_eq!(rows.style(&1.into()), Some(&style));

        rows.insert(1.into(), CellUpdate::style_only(StyleMap::new()));
        assert_eq!(rows.get(&1.into()), Some(&CellValue::from("y")));
        assert_eq!(rows.style(&1.into()), Some(&StyleMap::new()));
    }

    #[test]
    fn style_only_write_creates_empty_valued_row() {
        let mut rows = RowIndex::new();
        rows.insert(9.into(), CellUpdate::style_only(StyleMap::new().with("bold", true)));
        assert_eq!(rows.get(&9.into()), Some(&CellValue::Empty));
    }

    #[test]
    fn rows_iterate_ascending() {
        let mut rows = RowIndex::new();
        for r in [5, 1, 4, 2, 3] {
            rows.insert(r.into(), CellUpdate::value(r * 10));
        }
        let keys: Vec<i64> = rows.iter().filter_map(|(k, _)| k.as_int()).collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
        assert_eq!(rows.first_row(), Some(&GridKey::Int(1)));
        assert_eq!(rows.last_row(), Some(&GridKey::Int(5)));
        rows.validate().unwrap();
    }

    #[test]
    fn missing_row_is_none() {
        let rows = RowIndex::new();
        assert!(rows.get(&1.into()).is_none());
        assert!(rows.is_empty());
    }
}
