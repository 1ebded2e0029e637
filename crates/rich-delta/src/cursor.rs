//! Lockstep iteration over an operation list.

use crate::error::DeltaError;
use crate::op::{Op, OpKind};

/// Walks a slice of [`Op`]s, handing out pieces of at most a requested
/// length. The merge loops drive two of these side by side.
///
/// Past the end, the cursor behaves as an endless plain retain: its peek
/// length is `usize::MAX` and [`OpCursor::next_len`] yields `Retain(n)`.
#[derive(Debug, Clone)]
pub struct OpCursor<'a> {
    ops: &'a [Op],
    index: usize,
    offset: usize,
}

impl<'a> OpCursor<'a> {
    pub fn new(ops: &'a [Op]) -> Self {
        Self {
            ops,
            index: 0,
            offset: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.peek_length() < usize::MAX
    }

    /// The op under the cursor, ignoring how much of it was consumed.
    pub fn peek(&self) -> Option<&'a Op> {
        self.ops.get(self.index)
    }

    /// Units left in the current op.
    pub fn peek_length(&self) -> usize {
        match self.peek() {
            Some(op) => op.len() - self.offset,
            None => usize::MAX,
        }
    }

    /// `None` once exhausted.
    pub fn peek_type(&self) -> Option<OpKind> {
        self.peek().map(Op::kind)
    }

    /// Units already consumed from the current op.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Consume up to `max` units of the current op.
    ///
    /// Fails if that would take part of an embed, which only a zero `max`
    /// can cause.
    pub fn next_len(&mut self, max: usize) -> Result<Op, DeltaError> {
        let Some(op) = self.peek() else {
            return Ok(Op::Retain {
                len: max,
                attributes: None,
            });
        };
        let offset = self.offset;
        let remaining = op.len() - offset;
        let len = if max >= remaining {
            self.index += 1;
            self.offset = 0;
            remaining
        } else {
            self.offset += max;
            max
        };
        if offset == 0 && len == op.len() {
            Ok(op.clone())
        } else {
            op.cut(offset, len)
        }
    }

    /// Consume the rest of the current op.
    pub fn next_op(&mut self) -> Result<Op, DeltaError> {
        self.next_len(usize::MAX)
    }

    /// Step past the rest of the current op without copying it.
    pub fn skip_op(&mut self) {
        if self.index < self.ops.len() {
            self.index += 1;
            self.offset = 0;
        }
    }

    /// Everything not yet consumed, starting with the unread part of the
    /// current op. Does not advance.
    pub fn rest(&self) -> Result<Vec<Op>, DeltaError> {
        let Some(op) = self.peek() else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(self.ops.len() - self.index);
        if self.offset == 0 {
            out.push(op.clone());
        } else {
            out.push(op.cut(self.offset, op.len() - self.offset)?);
        }
        out.extend_from_slice(&self.ops[self.index + 1..]);
        Ok(out)
    }
}

/// Yields the remaining ops whole. A partly consumed op yields its rest.
impl Iterator for OpCursor<'_> {
    type Item = Op;

    fn next(&mut self) -> Option<Op> {
        let op = self.peek()?;
        let rest = match self.offset {
            0 => op.clone(),
            offset => op.cut(offset, op.len() - offset).ok()?,
        };
        self.skip_op();
        Some(rest)
    }
}
