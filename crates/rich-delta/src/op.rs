//! The atomic edit primitive.

use serde_json::Value;

use crate::attributes::AttributeMap;
use crate::error::DeltaError;

/// Content carried by an insert: a run of text, or a single opaque embed
/// (any non-string JSON value) of length 1.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertValue {
    Text(String),
    Embed(Value),
}

impl InsertValue {
    /// Length in chars; embeds always count as one.
    pub fn len(&self) -> usize {
        match self {
            InsertValue::Text(s) => s.chars().count(),
            InsertValue::Embed(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InsertValue::Text(s) if s.is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            InsertValue::Text(s) => Some(s),
            InsertValue::Embed(_) => None,
        }
    }
}

impl From<&str> for InsertValue {
    fn from(s: &str) -> Self {
        InsertValue::Text(s.to_string())
    }
}

impl From<String> for InsertValue {
    fn from(s: String) -> Self {
        InsertValue::Text(s)
    }
}

impl From<Value> for InsertValue {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => InsertValue::Text(s),
            other => InsertValue::Embed(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Insert,
    Delete,
    Retain,
}

/// One of insert, delete or retain. Lengths are always positive inside a
/// [`Delta`](crate::Delta).
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Insert {
        value: InsertValue,
        attributes: Option<AttributeMap>,
    },
    Delete(usize),
    Retain {
        len: usize,
        attributes: Option<AttributeMap>,
    },
}

fn normalize(attributes: Option<AttributeMap>) -> Option<AttributeMap> {
    attributes.filter(|a| !a.is_empty())
}

impl Op {
    pub fn insert(value: impl Into<InsertValue>, attributes: Option<AttributeMap>) -> Op {
        Op::Insert {
            value: value.into(),
            attributes: normalize(attributes),
        }
    }

    pub fn delete(len: usize) -> Op {
        Op::Delete(len)
    }

    pub fn retain(len: usize, attributes: Option<AttributeMap>) -> Op {
        Op::Retain {
            len,
            attributes: normalize(attributes),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Op::Insert { value, .. } => value.len(),
            Op::Delete(len) => *len,
            Op::Retain { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> OpKind {
        match self {
            Op::Insert { .. } => OpKind::Insert,
            Op::Delete(_) => OpKind::Delete,
            Op::Retain { .. } => OpKind::Retain,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Op::Insert { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Op::Delete(_))
    }

    pub fn is_retain(&self) -> bool {
        matches!(self, Op::Retain { .. })
    }

    pub fn attributes(&self) -> Option<&AttributeMap> {
        match self {
            Op::Insert { attributes, .. } | Op::Retain { attributes, .. } => attributes.as_ref(),
            Op::Delete(_) => None,
        }
    }

    pub(crate) fn attributes_slot(&mut self) -> Option<&mut Option<AttributeMap>> {
        match self {
            Op::Insert { attributes, .. } | Op::Retain { attributes, .. } => Some(attributes),
            Op::Delete(_) => None,
        }
    }

    /// Same op with its attributes replaced. Deletes are returned unchanged.
    pub fn with_attributes(self, attributes: Option<AttributeMap>) -> Op {
        match self {
            Op::Insert { value, .. } => Op::insert(value, attributes),
            Op::Retain { len, .. } => Op::retain(len, attributes),
            op @ Op::Delete(_) => op,
        }
    }

    /// The `len` units starting at `offset`, keeping kind and attributes.
    ///
    /// Embeds are indivisible: anything but the whole embed is an error.
    pub(crate) fn cut(&self, offset: usize, len: usize) -> Result<Op, DeltaError> {
        let op = match self {
            Op::Delete(_) => Op::Delete(len),
            Op::Retain { attributes, .. } => Op::Retain {
                len,
                attributes: attributes.clone(),
            },
            Op::Insert {
                value: InsertValue::Text(text),
                attributes,
            } => Op::Insert {
                value: InsertValue::Text(char_slice(text, offset, len).to_string()),
                attributes: attributes.clone(),
            },
            Op::Insert {
                value: InsertValue::Embed(_),
                ..
            } if offset != 0 || len != 1 => {
                return Err(DeltaError::InternalInvariantViolation(format!(
                    "cannot take {len} unit(s) at offset {offset} of an embed"
                )));
            }
            embed @ Op::Insert { .. } => embed.clone(),
        };
        Ok(op)
    }
}

/// Substring by char offset and count.
pub(crate) fn char_slice(text: &str, offset: usize, len: usize) -> &str {
    let mut indices = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
    let start = indices.nth(offset).unwrap_or(text.len());
    let end = if len == 0 {
        start
    } else {
        indices.nth(len - 1).unwrap_or(text.len())
    };
    &text[start..end]
}
