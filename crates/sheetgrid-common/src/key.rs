//! Row and column keys plus the key domains that fix their ordering.
//!
//! A grid orders each axis with exactly one comparison policy. `KeyDomain`
//! names that policy and `KeyDomain::normalize` converts incoming keys into
//! its canonical representation, so a tree never holds a mix of numeric and
//! textual keys:
//!
//! * `Numeric` stores `GridKey::Int` and orders keys as integers. Text that
//!   parses as an integer (`" 7 "`) is accepted and converted.
//! * `Text` stores `GridKey::Text` and orders keys lexicographically.
//!   Integers are rendered to their decimal form.
//!
//! The two orders are not interchangeable: `2 < 10` numerically while
//! `"10" < "2"` lexicographically.

use core::fmt;
use std::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A row or column identifier.
///
/// The derived `Ord` places every `Int` before every `Text`. Grids never rely
/// on that cross-variant order because keys are normalized per axis first.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GridKey {
    Int(i64),
    Text(String),
}

impl GridKey {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            GridKey::Int(i) => Some(*i),
            GridKey::Text(_) => None,
        }
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridKey::Int(i) => write!(f, "{i}"),
            GridKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for GridKey {
    fn from(value: i64) -> Self {
        GridKey::Int(value)
    }
}

impl From<i32> for GridKey {
    fn from(value: i32) -> Self {
        GridKey::Int(value as i64)
    }
}

impl From<u32> for GridKey {
    fn from(value: u32) -> Self {
        GridKey::Int(value as i64)
    }
}

impl From<String> for GridKey {
    fn from(value: String) -> Self {
        GridKey::Text(value)
    }
}

impl From<&str> for GridKey {
    fn from(value: &str) -> Self {
        GridKey::Text(value.to_string())
    }
}

impl From<&GridKey> for GridKey {
    fn from(value: &GridKey) -> Self {
        value.clone()
    }
}

/// Comparison policy for one axis of a grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyDomain {
    #[default]
    Numeric,
    Text,
}

impl KeyDomain {
    /// Convert `key` into this domain's canonical representation.
    pub fn normalize(self, key: GridKey) -> Result<GridKey, KeyError> {
        match (self, key) {
            (KeyDomain::Numeric, GridKey::Int(i)) => Ok(GridKey::Int(i)),
            (KeyDomain::Numeric, GridKey::Text(s)) => match s.trim().parse::<i64>() {
                Ok(i) => Ok(GridKey::Int(i)),
                Err(_) => Err(KeyError::NotNumeric(s)),
            },
            (KeyDomain::Text, GridKey::Text(s)) => Ok(GridKey::Text(s)),
            (KeyDomain::Text, GridKey::Int(i)) => Ok(GridKey::Text(i.to_string())),
        }
    }
}

impl fmt::Display for KeyDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyDomain::Numeric => f.write_str("numeric"),
            KeyDomain::Text => f.write_str("text"),
        }
    }
}

/// Errors returned when a key cannot be brought into a grid's key domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyError {
    NotNumeric(String),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::NotNumeric(raw) => write!(f, "key {raw:?} is not an integer"),
        }
    }
}

impl Error for KeyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_domain_parses_text_keys() {
        let key = KeyDomain::Numeric.normalize(" 42 ".into()).unwrap();
        assert_eq!(key, GridKey::Int(42));
        assert_eq!(
            KeyDomain::Numeric.normalize("B".into()),
            Err(KeyError::NotNumeric("B".to_string()))
        );
    }

    #[test]
    fn text_domain_renders_integers() {
        let key = KeyDomain::Text.normalize(GridKey::Int(-3)).unwrap();
        assert_eq!(key, GridKey::Text("-3".to_string()));
    }

    #[test]
    fn domains_order_differently() {
        let mut numeric: Vec<GridKey> = ["10", "2", "1"]
            .into_iter()
            .map(|s| KeyDomain::Numeric.normalize(s.into()).unwrap())
            .collect();
        numeric.sort();
        assert_eq!(numeric, vec![GridKey::Int(1), GridKey::Int(2), GridKey::Int(10)]);

        let mut text: Vec<GridKey> = [10, 2, 1]
            .into_iter()
            .map(|i| KeyDomain::Text.normalize(i.into()).unwrap())
            .collect();
        text.sort();
        let expected: Vec<GridKey> = vec!["1".into(), "10".into(), "2".into()];
        assert_eq!(text, expected);
    }
}
