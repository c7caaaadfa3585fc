use sheetgrid_common::GridKey;

use crate::avl::{AvlTree, InvariantViolation, Iter, Upsert};
use crate::cell::CellUpdate;
use crate::row_index::RowIndex;

/// Payload of the primary tree: one column and the rows it holds.
///
/// The row index starts out as an empty tree, which allocates nothing until
/// the first cell lands in the column.
#[derive(Debug, Clone, Default)]
pub struct ColumnNode {
    rows: RowIndex,
}

impl ColumnNode {
    pub fn rows(&self) -> &RowIndex {
        &self.rows
    }
}

/// Primary index: columns keyed by column key.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    tree: AvlTree<GridKey, ColumnNode>,
}

impl ColumnIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find-or-create `col`, then write `update` into its row index.
    ///
    /// Returns whether the column node was created by this call.
    pub fn insert(&mut self, col: GridKey, row: GridKey, update: CellUpdate) -> Upsert {
        self.tree.upsert(col, ColumnNode::default, |column| {
            column.rows.insert(row, update);
        })
    }

    pub fn column(&self, col: &GridKey) -> Option<&ColumnNode> {
        self.tree.get(col)
    }

    pub fn rows(&self, col: &GridKey) -> Option<&RowIndex> {
        self.tree.get(col).map(ColumnNode::rows)
    }

    pub fn contains(&self, col: &GridKey) -> bool {
        self.tree.contains_key(col)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Columns in ascending key order.
    pub fn iter(&self) -> Iter<'_, GridKey, ColumnNode> {
        self.tree.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &GridKey> + '_ {
        self.tree.keys()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Validate the primary tree and every row tree beneath it.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.tree.validate()?;
        self.tree
            .values()
            .try_for_each(|column| column.rows.validate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_created_exactly_once() {
        let mut columns = ColumnIndex::new();
        let outcomes: Vec<Upsert> = [7, 2, 9, 1]
            .into_iter()
            .map(|r| columns.insert(1.into(), GridKey::from(r), CellUpdate::value(r)))
            .collect();
        assert_eq!(outcomes[0], Upsert::Inserted);
        assert!(outcomes[1..].iter().all(|o| *o == Upsert::Updated));
        assert_eq!(columns.len(), 1);
        assert_eq!(columns.rows(&1.into()).map(RowIndex::len), Some(4));
    }

    #[test]
    fn columns_iterate_ascending() {
        let mut columns = ColumnIndex::new();
        for c in [30, 10, 20] {
            columns.insert(c.into(), 1.into(), CellUpdate::value("v"));
        }
        let keys: Vec<&GridKey> = columns.keys().collect();
        assert_eq!(keys, vec![&GridKey::Int(10), &GridKey::Int(20), &GridKey::Int(30)]);
        columns.validate().unwrap();
    }

    #[test]
    fn clear_drops_everything() {
        let mut columns = ColumnIndex::new();
        columns.insert(1.into(), 1.into(), CellUpdate::value("v"));
        columns.clear();
        assert!(columns.is_empty());
        assert!(columns.rows(&1.into()).is_none());
    }
}
