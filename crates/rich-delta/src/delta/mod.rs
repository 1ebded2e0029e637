//! The document delta: a canonical operation list plus its algebra.
//!
//! A delta is either a document (inserts only) or an edit script against a
//! document. Values are immutable once built; every algorithm returns a new
//! delta.

mod builder;
mod compose;
mod diff;
mod transform;

use std::ops::{Bound, ControlFlow, RangeBounds};

use crate::attributes::{self, AttributeMap};
use crate::constants::NEWLINE;
use crate::cursor::OpCursor;
use crate::error::DeltaError;
use crate::op::{InsertValue, Op, OpKind};

pub use builder::DeltaBuilder;
pub(crate) use builder::{chop_ops, push_op};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    pub(crate) ops: Vec<Op>,
}

impl Delta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> DeltaBuilder {
        DeltaBuilder::new()
    }

    /// Canonicalizes `ops` on the way in.
    pub fn from_ops(ops: impl IntoIterator<Item = Op>) -> Self {
        let mut out = Vec::new();
        for op in ops {
            push_op(&mut out, op);
        }
        Self { ops: out }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Op> {
        self.ops.iter()
    }

    /// No operations at all.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Total length of all operations.
    pub fn len(&self) -> usize {
        self.ops.iter().map(Op::len).sum()
    }

    /// How much this delta grows (or shrinks) the document it is applied to.
    pub fn change_length(&self) -> isize {
        self.ops.iter().fold(0isize, |acc, op| match op {
            Op::Insert { .. } => acc + op.len() as isize,
            Op::Delete(len) => acc - *len as isize,
            Op::Retain { .. } => acc,
        })
    }

    /// A delta consisting only of inserts.
    pub fn is_document(&self) -> bool {
        self.ops.iter().all(Op::is_insert)
    }

    // ── Read-only helpers ──────────────────────────────────────────────────

    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Op>
    where
        P: FnMut(&Op, usize) -> bool,
    {
        self.ops
            .iter()
            .enumerate()
            .filter(|(i, op)| predicate(op, *i))
            .map(|(_, op)| op)
            .collect()
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Op, usize),
    {
        for (i, op) in self.ops.iter().enumerate() {
            f(op, i);
        }
    }

    pub fn map<T, F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(&Op, usize) -> T,
    {
        self.ops.iter().enumerate().map(|(i, op)| f(op, i)).collect()
    }

    /// Split the ops into those matching `predicate` and the rest.
    pub fn partition<P>(&self, mut predicate: P) -> (Vec<&Op>, Vec<&Op>)
    where
        P: FnMut(&Op) -> bool,
    {
        self.ops.iter().partition(|op| predicate(op))
    }

    pub fn reduce<T, F>(&self, init: T, mut f: F) -> T
    where
        F: FnMut(T, &Op, usize) -> T,
    {
        self.ops
            .iter()
            .enumerate()
            .fold(init, |acc, (i, op)| f(acc, op, i))
    }

    // ── Structural operations ──────────────────────────────────────────────

    /// The operations covering `range`, measured in op length.
    ///
    /// Unbounded ends run to the end of the delta.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Result<Delta, DeltaError> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => usize::MAX,
        };
        let mut ops = Vec::new();
        let mut cursor = OpCursor::new(&self.ops);
        let mut index = 0;
        while index < end && cursor.has_next() {
            if index < start {
                index += cursor.next_len(start - index)?.len();
            } else {
                let op = cursor.next_len(end - index)?;
                index += op.len();
                ops.push(op);
            }
        }
        Ok(Delta { ops })
    }

    /// `self` followed by `other`, merging across the seam.
    pub fn concat(&self, other: &Delta) -> Delta {
        let mut ops = self.ops.clone();
        if let Some((first, rest)) = other.ops.split_first() {
            push_op(&mut ops, first.clone());
            ops.extend_from_slice(rest);
        }
        Delta { ops }
    }

    /// The delta that undoes `self` on the document `base` it was made for.
    pub fn invert(&self, base: &Delta) -> Result<Delta, DeltaError> {
        let mut inverted = DeltaBuilder::new();
        let mut base_index = 0;
        for op in &self.ops {
            match op {
                Op::Insert { .. } => {
                    inverted.delete(op.len());
                }
                Op::Retain {
                    len,
                    attributes: None,
                } => {
                    inverted.retain(*len);
                    base_index += len;
                }
                Op::Delete(len) => {
                    for base_op in base.slice(base_index..base_index + len)?.ops {
                        inverted.push(base_op);
                    }
                    base_index += len;
                }
                Op::Retain {
                    len,
                    attributes: Some(change),
                } => {
                    for base_op in base.slice(base_index..base_index + len)?.ops {
                        let undo = attributes::invert(Some(change), base_op.attributes());
                        inverted.push(Op::retain(base_op.len(), undo));
                    }
                    base_index += len;
                }
            }
        }
        Ok(inverted.chop().build())
    }

    /// Where `index` ends up once `self` is applied.
    ///
    /// With `priority`, an insert exactly at `index` is treated as having
    /// happened after it and does not push it forward.
    pub fn transform_position(&self, mut index: usize, priority: bool) -> usize {
        let mut cursor = OpCursor::new(&self.ops);
        let mut offset = 0;
        while cursor.has_next() && offset <= index {
            let length = cursor.peek_length();
            let kind = cursor.peek_type();
            cursor.skip_op();
            match kind {
                Some(OpKind::Delete) => {
                    index -= length.min(index - offset);
                    continue;
                }
                Some(OpKind::Insert) if offset < index || !priority => index += length,
                _ => {}
            }
            offset += length;
        }
        index
    }

    // ── Lines ──────────────────────────────────────────────────────────────

    /// [`Delta::each_line_with`] splitting on `'\n'`.
    pub fn each_line<F>(&self, f: F) -> Result<(), DeltaError>
    where
        F: FnMut(&Delta, &AttributeMap, usize) -> ControlFlow<()>,
    {
        self.each_line_with(NEWLINE, f)
    }

    /// Call `f` once per line of a document with the line's content, the
    /// attributes of its terminating newline, and the line number.
    ///
    /// A trailing line without terminator is reported with empty
    /// attributes. Iteration ends at the first non-insert op or when `f`
    /// breaks.
    pub fn each_line_with<F>(&self, newline: char, mut f: F) -> Result<(), DeltaError>
    where
        F: FnMut(&Delta, &AttributeMap, usize) -> ControlFlow<()>,
    {
        let no_attributes = AttributeMap::new();
        let mut cursor = OpCursor::new(&self.ops);
        let mut line = DeltaBuilder::new();
        let mut index = 0;
        while let Some(op) = cursor.peek() {
            let position = match op {
                Op::Insert {
                    value: InsertValue::Text(text),
                    ..
                } => text.chars().skip(cursor.offset()).position(|c| c == newline),
                Op::Insert { .. } => None,
                _ => return Ok(()),
            };
            match position {
                None => {
                    line.push(cursor.next_op()?);
                }
                Some(0) => {
                    let terminator = cursor.next_len(1)?;
                    let attrs = terminator.attributes().unwrap_or(&no_attributes);
                    if f(&line.build(), attrs, index).is_break() {
                        return Ok(());
                    }
                    index += 1;
                }
                Some(n) => {
                    line.push(cursor.next_len(n)?);
                }
            }
        }
        let last = line.build();
        if !last.is_empty() {
            let _ = f(&last, &no_attributes, index);
        }
        Ok(())
    }
}

impl From<Vec<Op>> for Delta {
    fn from(ops: Vec<Op>) -> Self {
        Delta::from_ops(ops)
    }
}

impl FromIterator<Op> for Delta {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Delta::from_ops(iter)
    }
}

impl<'a> IntoIterator for &'a Delta {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl IntoIterator for Delta {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}
