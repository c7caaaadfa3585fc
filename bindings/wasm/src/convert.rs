use sheetgrid_common::{CellValue, GridKey, StyleMap};
use wasm_bindgen::prelude::*;

use crate::utils::{from_js_value, js_error, js_error_with_cause, to_js_value};

/// JS numbers become integer keys, strings become text keys.
pub(crate) fn js_to_key(value: &JsValue, axis: &str) -> Result<GridKey, JsValue> {
    if let Some(s) = value.as_string() {
        return Ok(GridKey::Text(s));
    }
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 => {
            Ok(GridKey::Int(n as i64))
        }
        _ => Err(js_error(format!(
            "{axis} key must be an integer or a string, got {value:?}"
        ))),
    }
}

pub(crate) fn key_to_js(key: &GridKey) -> JsValue {
    match key {
        GridKey::Int(i) => JsValue::from_f64(*i as f64),
        GridKey::Text(s) => JsValue::from_str(s),
    }
}

/// Objects and arrays are stored as their `JSON.stringify` text; values JSON
/// cannot represent (functions, symbols, cycles) are rejected.
pub(crate) fn js_to_value(value: &JsValue) -> Result<CellValue, JsValue> {
    let value = if value.is_null() || value.is_undefined() {
        CellValue::Empty
    } else if let Some(b) = value.as_bool() {
        CellValue::Boolean(b)
    } else if let Some(s) = value.as_string() {
        CellValue::Text(s)
    } else if let Some(n) = value.as_f64() {
        if n.fract() == 0.0 && n.is_finite() && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
            CellValue::Int(n as i64)
        } else {
            CellValue::Number(n)
        }
    } else {
        let json = js_sys::JSON::stringify(value)
            .map_err(|err| js_error_with_cause("cell value is not JSON-serializable", err))?;
        match json.as_string() {
            Some(text) => CellValue::Text(text),
            None => return Err(js_error("cell value is not JSON-serializable")),
        }
    };
    Ok(value)
}

pub(crate) fn value_to_js(value: &CellValue) -> JsValue {
    match value {
        CellValue::Empty => JsValue::NULL,
        CellValue::Boolean(b) => JsValue::from_bool(*b),
        CellValue::Int(i) => JsValue::from_f64(*i as f64),
        CellValue::Number(n) => JsValue::from_f64(*n),
        CellValue::Text(s) => JsValue::from_str(s),
    }
}

/// A missing style (`undefined` or `null`) is the empty style.
pub(crate) fn js_to_style(value: JsValue) -> Result<StyleMap, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(StyleMap::new())
    } else {
        from_js_value(value, "style object")
    }
}

pub(crate) fn style_to_js(style: &StyleMap) -> Result<JsValue, JsValue> {
    to_js_value(style)
}

pub(crate) fn set(obj: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(obj, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|err| js_error_with_cause(format!("failed to set `{key}`"), err))
}
