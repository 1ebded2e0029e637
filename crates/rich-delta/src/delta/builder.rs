use crate::attributes::AttributeMap;
use crate::op::{InsertValue, Op};

use super::Delta;

/// Assembles a canonical [`Delta`] operation by operation.
///
/// ```
/// use rich_delta::{attributes, DeltaBuilder};
///
/// let delta = DeltaBuilder::new()
///     .retain(3)
///     .delete(1)
///     .insert_with("X", attributes! { "bold" => true })
///     .build();
/// assert_eq!(delta.ops().len(), 3);
/// assert!(delta.ops()[1].is_insert());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeltaBuilder {
    ops: Vec<Op>,
}

impl DeltaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: impl Into<InsertValue>) -> &mut Self {
        self.push(Op::insert(value, None))
    }

    pub fn insert_with(&mut self, value: impl Into<InsertValue>, attributes: AttributeMap) -> &mut Self {
        self.push(Op::insert(value, Some(attributes)))
    }

    pub fn retain(&mut self, len: usize) -> &mut Self {
        self.push(Op::retain(len, None))
    }

    pub fn retain_with(&mut self, len: usize, attributes: AttributeMap) -> &mut Self {
        self.push(Op::retain(len, Some(attributes)))
    }

    pub fn delete(&mut self, len: usize) -> &mut Self {
        self.push(Op::delete(len))
    }

    /// Append `op`, keeping the buffer canonical.
    pub fn push(&mut self, op: Op) -> &mut Self {
        push_op(&mut self.ops, op);
        self
    }

    /// Drop a trailing retain that carries no attributes.
    pub fn chop(&mut self) -> &mut Self {
        chop_ops(&mut self.ops);
        self
    }

    /// Take the assembled delta, leaving the builder empty.
    pub fn build(&mut self) -> Delta {
        Delta {
            ops: std::mem::take(&mut self.ops),
        }
    }
}

/// Canonical append.
///
/// Zero-length ops are dropped. Adjacent deletes merge. An insert landing
/// after a delete is placed in front of it. Text inserts and retains merge
/// with their neighbour when attributes are equal; embeds never merge.
pub(crate) fn push_op(ops: &mut Vec<Op>, op: Op) {
    if op.is_empty() {
        return;
    }
    if let (Some(Op::Delete(last)), Op::Delete(len)) = (ops.last_mut(), &op) {
        *last += len;
        return;
    }
    let mut index = ops.len();
    if op.is_insert() && matches!(ops.last(), Some(Op::Delete(_))) {
        index -= 1;
        if index == 0 {
            ops.insert(0, op);
            return;
        }
    }
    if let Some(prev) = index.checked_sub(1).and_then(|i| ops.get_mut(i)) {
        if merge_into(prev, &op) {
            return;
        }
    }
    ops.insert(index, op);
}

fn merge_into(prev: &mut Op, next: &Op) -> bool {
    match (prev, next) {
        (
            Op::Insert {
                value: InsertValue::Text(text),
                attributes: prev_attrs,
            },
            Op::Insert {
                value: InsertValue::Text(more),
                attributes: next_attrs,
            },
        ) if *prev_attrs == *next_attrs => {
            text.push_str(more);
            true
        }
        (
            Op::Retain {
                len,
                attributes: prev_attrs,
            },
            Op::Retain {
                len: more,
                attributes: next_attrs,
            },
        ) if *prev_attrs == *next_attrs => {
            *len += more;
            true
        }
        _ => false,
    }
}

pub(crate) fn chop_ops(ops: &mut Vec<Op>) {
    if matches!(ops.last(), Some(Op::Retain { attributes: None, .. })) {
        ops.pop();
    }
}
