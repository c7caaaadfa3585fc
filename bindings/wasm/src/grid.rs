use std::sync::{Arc, RwLock};

use sheetgrid_core::{CellRecord, CellUpdate, GridConfig, RowEntry, SparseGrid};
use wasm_bindgen::prelude::*;

use crate::convert::{
    js_to_key, js_to_style, js_to_value, key_to_js, set, style_to_js, value_to_js,
};
use crate::utils::{from_js_value, js_error, to_js_value};

fn rows_to_js(rows: &[RowEntry<'_>]) -> Result<js_sys::Array, JsValue> {
    let arr = js_sys::Array::new();
    for entry in rows {
        let obj = js_sys::Object::new();
        set(&obj, "key", &key_to_js(entry.key))?;
        set(&obj, "value", &value_to_js(entry.value))?;
        arr.push(&obj);
    }
    Ok(arr)
}

/// A sparse sheet for the browser UI.
///
/// Cloning shares the underlying grid.
#[wasm_bindgen]
pub struct SpreadsheetGrid {
    inner: Arc<RwLock<SparseGrid>>,
}

impl Default for SpreadsheetGrid {
    fn default() -> Self {
        Self::from_grid(SparseGrid::default())
    }
}

impl Clone for SpreadsheetGrid {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SpreadsheetGrid {
    fn from_grid(grid: SparseGrid) -> Self {
        Self {
            inner: Arc::new(RwLock::new(grid)),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&SparseGrid) -> T) -> Result<T, JsValue> {
        let grid = self
            .inner
            .read()
            .map_err(|_| js_error("failed to lock grid for read"))?;
        Ok(f(&grid))
    }

    fn write<T>(&self, f: impl FnOnce(&mut SparseGrid) -> T) -> Result<T, JsValue> {
        let mut grid = self
            .inner
            .write()
            .map_err(|_| js_error("failed to lock grid for write"))?;
        Ok(f(&mut grid))
    }
}

#[wasm_bindgen]
impl SpreadsheetGrid {
    /// Grid with integer row and column keys. Column keys such as `"c0"` are
    /// rejected; use [`SpreadsheetGrid::named`] for named columns.
    #[wasm_bindgen(constructor)]
    pub fn new(name: Option<String>) -> SpreadsheetGrid {
        match name {
            Some(name) => Self::from_grid(SparseGrid::new(name)),
            None => Self::default(),
        }
    }

    /// Grid with integer rows and named columns ordered as text, so a UI can
    /// address columns as `"c0"`, `"c1"`, and so on.
    pub fn named(name: Option<String>) -> Result<SpreadsheetGrid, JsValue> {
        let config = GridConfig::named_columns(name.unwrap_or_else(|| "Sheet1".to_string()));
        SparseGrid::with_config(config)
            .map(Self::from_grid)
            .map_err(|e| js_error(e.to_string()))
    }

    /// Build from a config object: `{ name, row_keys, column_keys, columns, row_count_hint }`.
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(config: JsValue) -> Result<SpreadsheetGrid, JsValue> {
        let config: GridConfig = from_js_value(config, "grid config")?;
        let grid = SparseGrid::with_config(config).map_err(|e| js_error(e.to_string()))?;
        Ok(Self::from_grid(grid))
    }

    /// Rebuild from persisted `{ column, row, value, style }` records.
    #[wasm_bindgen(js_name = "fromRecords")]
    pub fn from_records(config: JsValue, records: JsValue) -> Result<SpreadsheetGrid, JsValue> {
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            from_js_value(config, "grid config")?
        };
        let records: Vec<CellRecord> = from_js_value(records, "cell records")?;
        let grid = SparseGrid::from_records(config, records)
            .map_err(|e| js_error(format!("load failed: {e}")))?;
        Ok(Self::from_grid(grid))
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> Result<String, JsValue> {
        self.read(|g| g.name().to_string())
    }

    pub fn rename(&self, name: String) -> Result<(), JsValue> {
        self.write(|g| g.rename(name))
    }

    /// Column keys in display order.
    #[wasm_bindgen(getter)]
    pub fn columns(&self) -> Result<js_sys::Array, JsValue> {
        self.read(|g| g.column_order().iter().map(key_to_js).collect())
    }

    #[wasm_bindgen(getter, js_name = "cellCount")]
    pub fn cell_count(&self) -> Result<usize, JsValue> {
        self.read(SparseGrid::cell_count)
    }

    #[wasm_bindgen(getter, js_name = "rowCountHint")]
    pub fn row_count_hint(&self) -> Result<usize, JsValue> {
        self.read(SparseGrid::row_count_hint)
    }

    /// Write a cell. An omitted `value` keeps the current value; an omitted
    /// `style` resets the style to `{}`.
    #[wasm_bindgen(js_name = "insertData")]
    pub fn insert_data(
        &self,
        row: JsValue,
        col: JsValue,
        value: JsValue,
        style: JsValue,
    ) -> Result<(), JsValue> {
        let row = js_to_key(&row, "row")?;
        let col = js_to_key(&col, "column")?;
        let update = CellUpdate {
            value: if value.is_undefined() {
                None
            } else {
                Some(js_to_value(&value)?)
            },
            style: Some(js_to_style(style)?),
        };
        self.write(|g| g.set_cell(row, col, update))?
            .map_err(|e| js_error(format!("insertData failed: {e}")))
    }

    /// Replace only the style of a cell, creating the cell if needed.
    #[wasm_bindgen(js_name = "updateStyle")]
    pub fn update_style(&self, row: JsValue, col: JsValue, style: JsValue) -> Result<(), JsValue> {
        let row = js_to_key(&row, "row")?;
        let col = js_to_key(&col, "column")?;
        let update = CellUpdate::style_only(js_to_style(style)?);
        self.write(|g| g.set_cell(row, col, update))?
            .map_err(|e| js_error(format!("updateStyle failed: {e}")))
    }

    /// The stored value, or `null` when the cell was never written.
    #[wasm_bindgen(js_name = "retrieveCellData")]
    pub fn retrieve_cell_data(&self, row: JsValue, col: JsValue) -> Result<JsValue, JsValue> {
        let (Ok(row), Ok(col)) = (js_to_key(&row, "row"), js_to_key(&col, "column")) else {
            return Ok(JsValue::NULL);
        };
        self.read(|g| g.get(row, col).map(value_to_js).unwrap_or(JsValue::NULL))
    }

    #[wasm_bindgen(js_name = "retrieveCellStyle")]
    pub fn retrieve_cell_style(&self, row: JsValue, col: JsValue) -> Result<JsValue, JsValue> {
        let (Ok(row), Ok(col)) = (js_to_key(&row, "row"), js_to_key(&col, "column")) else {
            return Ok(JsValue::NULL);
        };
        let grid = self
            .inner
            .read()
            .map_err(|_| js_error("failed to lock grid for read"))?;
        match grid.style(row, col) {
            Some(style) => style_to_js(style),
            None => Ok(JsValue::NULL),
        }
    }

    /// `[{ key, value }]` for one column, rows ascending.
    #[wasm_bindgen(js_name = "traverseRowsInColumn")]
    pub fn traverse_rows_in_column(&self, col: JsValue) -> Result<js_sys::Array, JsValue> {
        let Ok(col) = js_to_key(&col, "column") else {
            return Ok(js_sys::Array::new());
        };
        let grid = self
            .inner
            .read()
            .map_err(|_| js_error("failed to lock grid for read"))?;
        rows_to_js(&grid.column_rows(col))
    }

    /// `[{ colKey, rows: [{ key, value }] }]`, columns and rows ascending.
    #[wasm_bindgen(js_name = "traverseAll")]
    pub fn traverse_all(&self) -> Result<js_sys::Array, JsValue> {
        let grid = self
            .inner
            .read()
            .map_err(|_| js_error("failed to lock grid for read"))?;
        let out = js_sys::Array::new();
        for block in grid.all_columns() {
            let obj = js_sys::Object::new();
            set(&obj, "colKey", &key_to_js(block.key))?;
            set(&obj, "rows", &rows_to_js(&block.rows)?.into())?;
            out.push(&obj);
        }
        Ok(out)
    }

    /// Every cell as a persistence record, column-major.
    #[wasm_bindgen(js_name = "toRecords")]
    pub fn to_records(&self) -> Result<JsValue, JsValue> {
        let records = self
            .read(SparseGrid::to_records)?
            .map_err(|e| js_error(format!("toRecords failed: {e}")))?;
        to_js_value(&records)
    }

    pub fn clear(&self) -> Result<(), JsValue> {
        self.write(SparseGrid::clear)
    }
}
