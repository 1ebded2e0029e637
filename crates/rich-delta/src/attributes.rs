//! Attribute sets and their algebra.
//!
//! An attribute set maps names to scalar values. A key can be absent, set,
//! or explicitly [`AttributeValue::Null`]: the latter means "clear this
//! attribute" when composed onto a document and "this attribute was
//! removed" inside a diff.
//!
//! Every function here takes `Option<&AttributeMap>` (no attributes is
//! `None`) and returns `None` instead of an empty map.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Number, Value};

/// Attribute values keep insertion order for serialization; equality
/// ignores order.
pub type AttributeMap = IndexMap<String, AttributeValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Explicit clear.
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            AttributeValue::Null => Value::Null,
            AttributeValue::Bool(b) => Value::Bool(*b),
            AttributeValue::Number(n) => Value::Number(n.clone()),
            AttributeValue::String(s) => Value::String(s.clone()),
        }
    }

    /// Returns `None` for arrays and objects, which are not valid attribute
    /// values.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(AttributeValue::Null),
            Value::Bool(b) => Some(AttributeValue::Bool(*b)),
            Value::Number(n) => Some(AttributeValue::Number(n.clone())),
            Value::String(s) => Some(AttributeValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => f.write_str("null"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Number(n) => write!(f, "{n}"),
            AttributeValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Number(n.into())
    }
}

impl From<u64> for AttributeValue {
    fn from(n: u64) -> Self {
        AttributeValue::Number(n.into())
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(AttributeValue::Null, Into::into)
    }
}

/// Build an [`AttributeMap`] inline. `None` produces an explicit null.
///
/// ```
/// use rich_delta::{attributes, AttributeValue};
///
/// let attrs = attributes! { "bold" => true, "color" => None::<&str> };
/// assert_eq!(attrs["color"], AttributeValue::Null);
/// ```
#[macro_export]
macro_rules! attributes {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::AttributeMap::new();
        $( map.insert(::std::string::String::from($key), $crate::AttributeValue::from($value)); )*
        map
    }};
}

fn non_empty(map: AttributeMap) -> Option<AttributeMap> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Attributes resulting from applying `applied` over `base`.
///
/// Keys in `applied` win. Null keys from `applied` survive only when
/// `keep_null` is set (composing onto a retain, where the clear must still
/// reach the document); onto an insert there is nothing to clear, so they
/// are dropped.
pub fn compose(
    base: Option<&AttributeMap>,
    applied: Option<&AttributeMap>,
    keep_null: bool,
) -> Option<AttributeMap> {
    let mut out: AttributeMap = match applied {
        Some(b) if keep_null => b.clone(),
        Some(b) => b
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        None => AttributeMap::new(),
    };
    if let Some(a) = base {
        for (key, value) in a {
            if !applied.is_some_and(|b| b.contains_key(key)) {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    non_empty(out)
}

/// Smallest set `x` such that `compose(a, x, true)` yields `b`.
pub fn diff(a: Option<&AttributeMap>, b: Option<&AttributeMap>) -> Option<AttributeMap> {
    let empty = AttributeMap::new();
    let a = a.unwrap_or(&empty);
    let b = b.unwrap_or(&empty);
    let mut out = AttributeMap::new();
    for key in a.keys().chain(b.keys()) {
        if out.contains_key(key) {
            continue;
        }
        match (a.get(key), b.get(key)) {
            (x, y) if x == y => {}
            (_, Some(value)) => {
                out.insert(key.clone(), value.clone());
            }
            (_, None) => {
                out.insert(key.clone(), AttributeValue::Null);
            }
        }
    }
    non_empty(out)
}

/// Attributes undoing `change` on text that previously carried `base`.
pub fn invert(change: Option<&AttributeMap>, base: Option<&AttributeMap>) -> Option<AttributeMap> {
    let applied = compose(base, change, true);
    diff(applied.as_ref(), base)
}

/// Attributes `b` still contributes once `a` has been applied concurrently.
///
/// Without priority `b` wins outright. With priority, keys `a` already set
/// are dropped from `b`.
pub fn transform(
    a: Option<&AttributeMap>,
    b: Option<&AttributeMap>,
    priority: bool,
) -> Option<AttributeMap> {
    let Some(a) = a else {
        return b.cloned();
    };
    let b = b?;
    if !priority {
        return Some(b.clone());
    }
    non_empty(
        b.iter()
            .filter(|(key, _)| !a.contains_key(*key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    )
}
