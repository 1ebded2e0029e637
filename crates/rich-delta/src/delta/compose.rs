use crate::attributes;
use crate::cursor::OpCursor;
use crate::detection::{detection_id, Ledger, Repair, Side};
use crate::error::DeltaError;
use crate::op::{Op, OpKind};

use super::Delta;

/// Retains keep an explicit clear on the detection key; inserts have no
/// prior state to clear.
fn repair_for(op: &Op) -> Repair {
    if op.is_retain() {
        Repair::Clear
    } else {
        Repair::Strip
    }
}

impl Delta {
    /// The single delta equivalent to applying `self` and then `other`.
    ///
    /// Detection ids that end up split, or that lose part of their span to
    /// a delete or an overwrite, are cleared from the result.
    ///
    /// ```
    /// use rich_delta::Delta;
    ///
    /// let a = Delta::builder().insert("A").build();
    /// let b = Delta::builder().insert("B").build();
    /// assert_eq!(a.compose(&b)?, Delta::builder().insert("BA").build());
    /// # Ok::<(), rich_delta::DeltaError>(())
    /// ```
    pub fn compose(&self, other: &Delta) -> Result<Delta, DeltaError> {
        let mut this_iter = OpCursor::new(&self.ops);
        let mut other_iter = OpCursor::new(&other.ops);
        let mut ledger = Ledger::new();

        // Leading inserts of `self` fully covered by a plain retain pass
        // straight through.
        if let Some(Op::Retain {
            len: first_retain,
            attributes: None,
        }) = other_iter.peek()
        {
            let mut left = *first_retain;
            while this_iter.peek_type() == Some(OpKind::Insert) && this_iter.peek_length() <= left {
                left -= this_iter.peek_length();
                let op = this_iter.next_op()?;
                ledger.push_marked(op, Side::This, Repair::Strip);
            }
            if *first_retain > left {
                other_iter.next_len(*first_retain - left)?;
            }
        }

        while this_iter.has_next() || other_iter.has_next() {
            if other_iter.peek_type() == Some(OpKind::Insert) {
                ledger.push_marked(other_iter.next_op()?, Side::Other, Repair::Strip);
                continue;
            }
            if this_iter.peek_type() == Some(OpKind::Delete) {
                ledger.push(this_iter.next_op()?);
                continue;
            }
            if !other_iter.has_next() {
                // Only `self` is left: copy it over, still tracking spans.
                while this_iter.has_next() {
                    let op = this_iter.next_op()?;
                    let repair = repair_for(&op);
                    ledger.push_marked(op, Side::This, repair);
                }
                break;
            }

            let length = this_iter.peek_length().min(other_iter.peek_length());
            let this_op = this_iter.next_len(length)?;
            let other_op = other_iter.next_len(length)?;
            let this_id = detection_id(this_op.attributes());

            match other_op {
                Op::Retain { .. } => {
                    let attrs = attributes::compose(
                        this_op.attributes(),
                        other_op.attributes(),
                        this_op.is_retain(),
                    );
                    let composed_id = detection_id(attrs.as_ref());
                    if this_id.is_some() && composed_id != this_id {
                        ledger.remove(this_id.as_deref(), Side::This);
                    }
                    let side = if this_id.is_some() && this_id == composed_id {
                        Side::This
                    } else {
                        Side::Other
                    };
                    let repair = repair_for(&this_op);
                    ledger.push_marked(this_op.with_attributes(attrs), side, repair);
                }
                Op::Delete(_) => {
                    ledger.remove(this_id.as_deref(), Side::This);
                    // An insert followed by its own deletion leaves nothing.
                    if this_op.is_retain() {
                        ledger.push(other_op);
                    }
                }
                Op::Insert { .. } => {
                    return Err(DeltaError::InternalInvariantViolation(
                        "compose consumed an insert in lockstep".to_string(),
                    ));
                }
            }
        }

        ledger.finish()
    }
}
