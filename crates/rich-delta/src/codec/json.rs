//! JSON wire format.
//!
//! ```text
//! [ { "insert": "text" | {..embed..}, "attributes"?: {..} },
//!   { "delete": n },
//!   { "retain": n, "attributes"?: {..} } ]
//! ```
//!
//! Decoding also accepts the wrapped form `{ "ops": [...] }`.

use serde_json::{Map, Value};

use crate::attributes::{AttributeMap, AttributeValue};
use crate::delta::Delta;
use crate::error::DeltaError;
use crate::op::{InsertValue, Op};

fn malformed(msg: impl Into<String>) -> DeltaError {
    DeltaError::MalformedOperation(msg.into())
}

fn attributes_to_json(attrs: &AttributeMap) -> Value {
    Value::Object(
        attrs
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

pub fn op_to_json(op: &Op) -> Value {
    let mut row = Map::new();
    match op {
        Op::Insert { value, .. } => {
            let value = match value {
                InsertValue::Text(s) => Value::String(s.clone()),
                InsertValue::Embed(v) => v.clone(),
            };
            row.insert("insert".to_string(), value);
        }
        Op::Delete(len) => {
            row.insert("delete".to_string(), Value::from(*len));
        }
        Op::Retain { len, .. } => {
            row.insert("retain".to_string(), Value::from(*len));
        }
    }
    if let Some(attrs) = op.attributes() {
        row.insert("attributes".to_string(), attributes_to_json(attrs));
    }
    Value::Object(row)
}

pub fn to_json(delta: &Delta) -> Value {
    Value::Array(delta.iter().map(op_to_json).collect())
}

fn attributes_from_json(v: Option<&Value>) -> Result<Option<AttributeMap>, DeltaError> {
    let obj = match v {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(obj)) => obj,
        Some(_) => return Err(malformed("attributes must be an object")),
    };
    let mut attrs = AttributeMap::with_capacity(obj.len());
    for (key, value) in obj {
        let value = AttributeValue::from_json(value)
            .ok_or_else(|| malformed(format!("attribute {key:?} must be a scalar or null")))?;
        attrs.insert(key.clone(), value);
    }
    Ok((!attrs.is_empty()).then_some(attrs))
}

fn length_from_json(key: &str, v: &Value) -> Result<usize, DeltaError> {
    match v.as_u64() {
        Some(n) if n > 0 => usize::try_from(n).map_err(|_| malformed(format!("{key} length out of range"))),
        _ => Err(malformed(format!("{key} length must be a positive integer"))),
    }
}

pub fn op_from_json(v: &Value) -> Result<Op, DeltaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| malformed("operation must be an object"))?;
    let insert = obj.get("insert");
    let delete = obj.get("delete");
    let retain = obj.get("retain");
    let attributes = attributes_from_json(obj.get("attributes"))?;
    match (insert, delete, retain) {
        (Some(value), None, None) => {
            let value = match value {
                Value::Null => return Err(malformed("insert must not be null")),
                Value::String(s) if s.is_empty() => return Err(malformed("insert must not be empty")),
                other => InsertValue::from(other.clone()),
            };
            Ok(Op::Insert { value, attributes })
        }
        (None, Some(len), None) => {
            if attributes.is_some() {
                return Err(malformed("delete cannot carry attributes"));
            }
            Ok(Op::Delete(length_from_json("delete", len)?))
        }
        (None, None, Some(len)) => Ok(Op::Retain {
            len: length_from_json("retain", len)?,
            attributes,
        }),
        _ => Err(malformed("expected exactly one of insert, delete or retain")),
    }
}

/// Decode a delta, canonicalizing the operation list.
pub fn from_json(v: &Value) -> Result<Delta, DeltaError> {
    let ops = match v {
        Value::Array(ops) => ops,
        Value::Object(obj) => obj
            .get("ops")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("expected an array of operations or { \"ops\": [...] }"))?,
        _ => return Err(malformed("expected an array of operations")),
    };
    ops.iter()
        .map(op_from_json)
        .collect::<Result<Vec<_>, _>>()
        .map(Delta::from_ops)
}
