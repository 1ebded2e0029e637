use crate::attributes;
use crate::cursor::OpCursor;
use crate::detection::{detection_id, has_detection_key, Ledger, Repair, Side};
use crate::error::DeltaError;
use crate::op::{Op, OpKind};

use super::Delta;

impl Delta {
    /// Rebase `other` so it applies after `self`, both having been made
    /// against the same document.
    ///
    /// `priority` decides ties: when set, `self` is considered to have
    /// happened first, so its inserts go first and its attributes win.
    /// The two peers must pass opposite priorities to converge.
    ///
    /// ```
    /// use rich_delta::Delta;
    ///
    /// let a = Delta::builder().insert("a").build();
    /// let b = Delta::builder().insert("b").build();
    /// let rebased = a.transform(&b, true)?;
    /// assert_eq!(rebased, Delta::builder().retain(1).insert("b").build());
    /// # Ok::<(), rich_delta::DeltaError>(())
    /// ```
    pub fn transform(&self, other: &Delta, priority: bool) -> Result<Delta, DeltaError> {
        let mut this_iter = OpCursor::new(&self.ops);
        let mut other_iter = OpCursor::new(&other.ops);
        let mut ledger = Ledger::new();

        while this_iter.has_next() || other_iter.has_next() {
            let this_inserts = this_iter.peek_type() == Some(OpKind::Insert);
            let other_inserts = other_iter.peek_type() == Some(OpKind::Insert);

            if this_inserts && (priority || !other_inserts) {
                let op = this_iter.next_op()?;
                let id = detection_id(op.attributes());
                ledger.push_spanning(Op::retain(op.len(), None), id.as_deref());
                continue;
            }
            if other_inserts {
                ledger.push_marked(other_iter.next_op()?, Side::Other, Repair::Strip);
                continue;
            }

            let length = this_iter.peek_length().min(other_iter.peek_length());
            let this_op = this_iter.next_len(length)?;
            let other_op = other_iter.next_len(length)?;
            let this_id = detection_id(this_op.attributes());
            let other_id = detection_id(other_op.attributes());

            match (&this_op, &other_op) {
                // Already gone on our side: their retain or delete is moot.
                (Op::Delete(_), _) => {
                    ledger.remove(other_id.as_deref(), Side::Other);
                }
                (_, Op::Delete(_)) => {
                    ledger.remove(this_id.as_deref(), Side::This);
                    ledger.push(Op::delete(length));
                }
                (Op::Retain { .. }, Op::Retain { .. }) => {
                    let attrs = attributes::transform(this_op.attributes(), other_op.attributes(), priority);
                    if has_detection_key(attrs.as_ref()) {
                        if this_id.is_some() && this_id != other_id {
                            ledger.remove(this_id.as_deref(), Side::This);
                        }
                        let repair = if this_id.is_some() {
                            Repair::Clear
                        } else {
                            Repair::Strip
                        };
                        ledger.push_marked(Op::retain(length, attrs), Side::Other, repair);
                    } else {
                        ledger.remove(other_id.as_deref(), Side::Other);
                        ledger.push_spanning(Op::retain(length, attrs), this_id.as_deref());
                    }
                }
                _ => {
                    return Err(DeltaError::InternalInvariantViolation(
                        "transform consumed an insert in lockstep".to_string(),
                    ));
                }
            }
        }

        ledger.finish()
    }
}
