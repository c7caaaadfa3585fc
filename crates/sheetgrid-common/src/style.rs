use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A primitive style property value (`"#ff0000"`, `12`, `true`, ...).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Null => write!(f, "null"),
            StyleValue::Bool(b) => write!(f, "{b}"),
            StyleValue::Number(n) => write!(f, "{n}"),
            StyleValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(value as f64)
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

/// Opaque per-cell style properties keyed by name (`color`, `textAlign`, ...).
///
/// Each cell owns its map outright; writing a style moves or clones a whole
/// map into the cell and never merges with the previous one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap(BTreeMap<String, StyleValue>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy when constructing literals.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, StyleValue> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = (&'a String, &'a StyleValue);
    type IntoIter = btree_map::Iter<'a, String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let style = StyleMap::new()
            .with("color", "red")
            .with("bold", true)
            .with("fontSize", 12);
        assert_eq!(style.len(), 3);
        assert_eq!(style.get("color"), Some(&StyleValue::Text("red".into())));
        assert_eq!(style.get("fontSize"), Some(&StyleValue::Number(12.0)));
        assert_eq!(style.get("italic"), None);
    }

    #[test]
    fn collects_from_pairs() {
        let style: StyleMap = [("textAlign", "center"), ("background", "#eee")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = style.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["background", "textAlign"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_serialized_style_objects() {
        let style: StyleMap =
            serde_json::from_str(r#"{"color":"blue","width":80,"hidden":false,"note":null}"#)
                .unwrap();
        assert_eq!(style.get("width"), Some(&StyleValue::Number(80.0)));
        assert_eq!(style.get("hidden"), Some(&StyleValue::Bool(false)));
        assert_eq!(style.get("note"), Some(&StyleValue::Null));
        let round = serde_json::to_string(&style).unwrap();
        assert_eq!(round, r#"{"color":"blue","hidden":false,"note":null,"width":80.0}"#);
    }
}
