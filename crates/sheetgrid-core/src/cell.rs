use serde::Serialize;
use sheetgrid_common::{CellValue, StyleMap};

/// Payload stored at one (row, column) coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cell {
    pub value: CellValue,
    pub style: StyleMap,
}

impl Cell {
    pub fn new(value: impl Into<CellValue>, style: StyleMap) -> Self {
        Self {
            value: value.into(),
            style,
        }
    }

    /// Apply `update`, leaving each field untouched when the update omits it.
    pub(crate) fn apply(&mut self, update: CellUpdate) {
        if let Some(value) = update.value {
            self.value = value;
        }
        if let Some(style) = update.style {
            self.style = style;
        }
    }
}

impl From<CellUpdate> for Cell {
    fn from(update: CellUpdate) -> Self {
        let mut cell = Cell::default();
        cell.apply(update);
        cell
    }
}

/// A partial write to a cell.
///
/// `value` and `style` are independent: `None` keeps what the cell already
/// holds (or the empty default for a new cell), `Some` replaces it wholesale.
/// A replacement style is never merged key-by-key with the previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellUpdate {
    pub value: Option<CellValue>,
    pub style: Option<StyleMap>,
}

impl CellUpdate {
    /// Write `value` and reset the style to the empty map.
    pub fn value(value: impl Into<CellValue>) -> Self {
        Self {
            value: Some(value.into()),
            style: Some(StyleMap::default()),
        }
    }

    /// Write `value` and leave the style as it is.
    pub fn value_only(value: impl Into<CellValue>) -> Self {
        Self {
            value: Some(value.into()),
            style: None,
        }
    }

    /// Replace the style and leave the value as it is.
    pub fn style_only(style: StyleMap) -> Self {
        Self {
            value: None,
            style: Some(style),
        }
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = Some(style);
        self
    }
}
