//! Detection span bookkeeping for `compose` and `transform`.
//!
//! A detection is a run of text tagged with the [`DETECTION_ID`] attribute.
//! After a merge, every id that survives must cover exactly one unbroken
//! run. The merge loops feed a [`Ledger`] as they produce output; the ledger
//! records where each id landed and which contributions were erased, then
//! [`Ledger::finish`] repairs offending ops and canonicalizes the result.
//!
//! Offsets are measured in the output document: inserts and retains take
//! up room, deletes do not.

use std::collections::{BTreeMap, HashMap};

use log::{debug, trace};

use crate::attributes::{AttributeMap, AttributeValue};
use crate::constants::DETECTION_ID;
use crate::delta::{chop_ops, push_op, Delta};
use crate::error::DeltaError;
use crate::op::Op;

/// Which operand an output op's detection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Side {
    This,
    Other,
}

/// How an invalidated mark is repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Repair {
    /// Keep the key with an explicit null so the clear propagates.
    Clear,
    /// Drop the key.
    Strip,
}

#[derive(Debug, Clone, Copy, Default)]
struct Sides {
    this: bool,
    other: bool,
}

impl Sides {
    fn set(&mut self, side: Side) {
        match side {
            Side::This => self.this = true,
            Side::Other => self.other = true,
        }
    }

    fn get(&self, side: Side) -> bool {
        match side {
            Side::This => self.this,
            Side::Other => self.other,
        }
    }
}

/// Output range `start..end` covered by an id, and who put it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Span {
    start: usize,
    end: usize,
    side: Side,
}

#[derive(Debug)]
struct Mark {
    index: usize,
    id: String,
    side: Side,
    repair: Repair,
}

/// Live detection id carried by `attrs`, if any. Null is not an id.
pub(crate) fn detection_id(attrs: Option<&AttributeMap>) -> Option<String> {
    match attrs?.get(DETECTION_ID)? {
        AttributeValue::Null => None,
        value => Some(value.to_string()),
    }
}

pub(crate) fn has_detection_key(attrs: Option<&AttributeMap>) -> bool {
    attrs.is_some_and(|a| a.contains_key(DETECTION_ID))
}

/// Whether sorted `spans` leave a hole between their first and last offset.
fn is_split<'a>(spans: impl Iterator<Item = &'a Span>) -> bool {
    let mut end = None;
    for span in spans {
        if end.is_some_and(|end| end < span.start) {
            return true;
        }
        end = Some(end.map_or(span.end, |end: usize| end.max(span.end)));
    }
    false
}

/// Side table filled while a merge loop runs.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    ops: Vec<Op>,
    cursor: usize,
    spans: BTreeMap<String, Vec<Span>>,
    marks: Vec<Mark>,
    removed: HashMap<String, Sides>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an op that no detection rule applies to.
    pub fn push(&mut self, op: Op) {
        self.advance(&op);
        self.ops.push(op);
    }

    /// Emit `op`, recording its own detection id (if it has one) as a
    /// contribution from `side`.
    pub fn push_marked(&mut self, op: Op, side: Side, repair: Repair) {
        if let Some(id) = detection_id(op.attributes()) {
            self.record_span(&id, op.len(), side);
            self.marks.push(Mark {
                index: self.ops.len(),
                id,
                side,
                repair,
            });
        }
        self.push(op);
    }

    /// Emit `op`, recording `id` as occupying its output range even though
    /// `op` itself does not carry it. The id is already in the document, so
    /// the range counts for [`Side::This`].
    pub fn push_spanning(&mut self, op: Op, id: Option<&str>) {
        if let Some(id) = id {
            self.record_span(id, op.len(), Side::This);
        }
        self.push(op);
    }

    /// `side`'s contribution to `id` was erased.
    pub fn remove(&mut self, id: Option<&str>, side: Side) {
        if let Some(id) = id {
            self.removed.entry(id.to_string()).or_default().set(side);
        }
    }

    fn record_span(&mut self, id: &str, len: usize, side: Side) {
        self.spans.entry(id.to_string()).or_default().push(Span {
            start: self.cursor,
            end: self.cursor + len,
            side,
        });
    }

    fn advance(&mut self, op: &Op) {
        if !op.is_delete() {
            self.cursor += op.len();
        }
    }

    /// Invalidate split or partially erased ids, repair their marks and
    /// build the canonical, chopped result.
    pub fn finish(self) -> Result<Delta, DeltaError> {
        let Ledger {
            mut ops,
            spans,
            marks,
            mut removed,
            ..
        } = self;

        for (id, mut ranges) in spans {
            ranges.sort_unstable();
            let sides = removed.entry(id.clone()).or_default();
            if is_split(ranges.iter()) {
                debug!("detection {id:?} is split in the output, invalidating both sides");
                sides.set(Side::This);
                sides.set(Side::Other);
                continue;
            }
            // Dropping one side may leave the other one in pieces.
            for (lost, kept) in [(Side::This, Side::Other), (Side::Other, Side::This)] {
                if sides.get(lost)
                    && !sides.get(kept)
                    && is_split(ranges.iter().filter(|span| span.side == kept))
                {
                    debug!("detection {id:?} is split once {lost:?} side is dropped");
                    sides.set(kept);
                }
            }
        }

        let mut repaired = 0usize;
        for mark in &marks {
            let invalid = removed
                .get(&mark.id)
                .is_some_and(|sides| sides.get(mark.side));
            if !invalid {
                continue;
            }
            debug!(
                "detection {:?} invalidated for {:?} side, op #{}",
                mark.id, mark.side, mark.index
            );
            let op = ops.get_mut(mark.index).ok_or_else(|| {
                DeltaError::InternalInvariantViolation(format!(
                    "detection mark points past output op #{}",
                    mark.index
                ))
            })?;
            let slot = op.attributes_slot().ok_or_else(|| {
                DeltaError::InternalInvariantViolation(format!(
                    "detection mark on delete op #{}",
                    mark.index
                ))
            })?;
            if let Some(attrs) = slot.as_mut() {
                match mark.repair {
                    Repair::Clear => {
                        attrs.insert(DETECTION_ID.to_string(), AttributeValue::Null);
                    }
                    Repair::Strip => {
                        attrs.shift_remove(DETECTION_ID);
                    }
                }
                if attrs.is_empty() {
                    *slot = None;
                }
            }
            repaired += 1;
        }
        trace!(
            "detection pass: {} ops, {} marks, {} repaired",
            ops.len(),
            marks.len(),
            repaired
        );

        let mut out = Vec::with_capacity(ops.len());
        for op in ops {
            push_op(&mut out, op);
        }
        chop_ops(&mut out);
        Ok(Delta { ops: out })
    }
}
