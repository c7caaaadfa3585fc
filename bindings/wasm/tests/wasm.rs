use sheetgrid_wasm::SpreadsheetGrid;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

fn get(obj: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

fn scenario() -> SpreadsheetGrid {
    let grid = SpreadsheetGrid::new(Some("Scenario".into()));
    for (row, col, value) in [
        (1, 1, "Alpha"),
        (3, 1, "Gamma"),
        (2, 2, "Beta"),
        (1, 2, "Delta"),
        (5, 3, "Epsilon"),
        (4, 1, "Zeta"),
        (2, 3, "Eta"),
        (1, 1, "New Alpha"),
    ] {
        grid.insert_data(
            JsValue::from_f64(row as f64),
            JsValue::from_f64(col as f64),
            JsValue::from_str(value),
            JsValue::UNDEFINED,
        )
        .unwrap();
    }
    grid
}

#[wasm_bindgen_test]
fn test_insert_and_retrieve() {
    let grid = scenario();
    let value = grid
        .retrieve_cell_data(JsValue::from_f64(1.0), JsValue::from_f64(1.0))
        .unwrap();
    assert_eq!(value.as_string().as_deref(), Some("New Alpha"));

    let missing = grid
        .retrieve_cell_data(JsValue::from_f64(99.0), JsValue::from_f64(99.0))
        .unwrap();
    assert!(missing.is_null());
    assert_eq!(grid.name().unwrap(), "Scenario");
    assert_eq!(grid.cell_count().unwrap(), 7);
}

#[wasm_bindgen_test]
fn test_traverse_rows_in_column() {
    let grid = scenario();
    let rows = grid.traverse_rows_in_column(JsValue::from_f64(1.0)).unwrap();
    assert_eq!(rows.length(), 3);
    let keys: Vec<f64> = rows
        .iter()
        .map(|r| get(&r, "key").as_f64().unwrap())
        .collect();
    assert_eq!(keys, vec![1.0, 3.0, 4.0]);
    assert_eq!(
        get(&rows.get(2), "value").as_string().as_deref(),
        Some("Zeta")
    );
}

#[wasm_bindgen_test]
fn test_traverse_all_and_clear() {
    let grid = scenario();
    let all = grid.traverse_all().unwrap();
    assert_eq!(all.length(), 3);
    assert_eq!(get(&all.get(0), "colKey").as_f64(), Some(1.0));

    grid.clear().unwrap();
    assert_eq!(grid.traverse_all().unwrap().length(), 0);
    assert_eq!(grid.columns().unwrap().length(), 3);
}

#[wasm_bindgen_test]
fn test_styles() {
    let grid = SpreadsheetGrid::new(None);
    let style = js_sys::Object::new();
    js_sys::Reflect::set(&style, &"color".into(), &"red".into()).unwrap();
    grid.insert_data(1.into(), 1.into(), JsValue::from_f64(2.5), style.into())
        .unwrap();

    let stored = grid.retrieve_cell_style(1.into(), 1.into()).unwrap();
    assert_eq!(get(&stored, "color").as_string().as_deref(), Some("red"));

    // style only
    let bold = js_sys::Object::new();
    js_sys::Reflect::set(&bold, &"bold".into(), &JsValue::TRUE).unwrap();
    grid.update_style(1.into(), 1.into(), bold.into()).unwrap();
    let value = grid.retrieve_cell_data(1.into(), 1.into()).unwrap();
    assert_eq!(value.as_f64(), Some(2.5));
}

#[wasm_bindgen_test]
fn test_bad_keys() {
    let grid = SpreadsheetGrid::new(None);
    let err = grid
        .insert_data("B".into(), 1.into(), "x".into(), JsValue::UNDEFINED)
        .unwrap_err();
    assert!(err.is_instance_of::<js_sys::Error>());
    assert!(
        grid.retrieve_cell_data(JsValue::from_f64(1.5), 1.into())
            .unwrap()
            .is_null()
    );
}

#[wasm_bindgen_test]
fn test_records_round_trip() {
    let grid = scenario();
    let records = grid.to_records().unwrap();
    let restored = SpreadsheetGrid::from_records(JsValue::UNDEFINED, records).unwrap();
    assert_eq!(restored.cell_count().unwrap(), 7);
    assert_eq!(restored.row_count_hint().unwrap(), 7);
    assert_eq!(
        restored
            .retrieve_cell_data(JsValue::from_f64(5.0), JsValue::from_f64(3.0))
            .unwrap()
            .as_string()
            .as_deref(),
        Some("Epsilon")
    );
}

#[wasm_bindgen_test]
fn test_named_columns() {
    let grid = SpreadsheetGrid::named(Some("People".into())).unwrap();
    for (col, value) in [("c1", "Ada"), ("c0", "1")] {
        grid.insert_data(1.into(), col.into(), value.into(), JsValue::UNDEFINED)
            .unwrap();
    }
    let all = grid.traverse_all().unwrap();
    assert_eq!(get(&all.get(0), "colKey").as_string().as_deref(), Some("c0"));

    let numeric = SpreadsheetGrid::new(None);
    assert!(
        numeric
            .insert_data(1.into(), "c0".into(), "x".into(), JsValue::UNDEFINED)
            .is_err()
    );
}

#[wasm_bindgen_test]
fn test_object_values_store_json_text() {
    let grid = SpreadsheetGrid::new(None);
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"a".into(), &JsValue::from_f64(1.0)).unwrap();
    grid.insert_data(1.into(), 1.into(), obj.into(), JsValue::UNDEFINED)
        .unwrap();
    let value = grid.retrieve_cell_data(1.into(), 1.into()).unwrap();
    assert_eq!(value.as_string().as_deref(), Some(r#"{"a":1}"#));

    let symbol = JsValue::symbol(Some("s"));
    assert!(
        grid.insert_data(2.into(), 1.into(), symbol, JsValue::UNDEFINED)
            .is_err()
    );
}
