use rich_delta_text_diff::{self as text_diff, DiffKind};

use crate::attributes;
use crate::constants::EMBED_PLACEHOLDER;
use crate::cursor::OpCursor;
use crate::error::DeltaError;
use crate::op::{InsertValue, Op};

use super::{Delta, DeltaBuilder};

/// Flatten a document to text, one placeholder char per embed.
fn flatten(delta: &Delta, role: &'static str) -> Result<String, DeltaError> {
    let mut out = String::new();
    for op in &delta.ops {
        match op {
            Op::Insert {
                value: InsertValue::Text(text),
                ..
            } => out.push_str(text),
            Op::Insert {
                value: InsertValue::Embed(_),
                ..
            } => out.push(EMBED_PLACEHOLDER),
            _ => return Err(DeltaError::InvalidOperand(role)),
        }
    }
    Ok(out)
}

impl Delta {
    /// The edit turning document `self` into document `other`.
    ///
    /// `caret`, when known, is the cursor position in `self` before the edit.
    /// Typing or deleting next to it then skips the full diff and lands
    /// where the user was, even inside a run of repeated characters.
    ///
    /// Fails with [`DeltaError::InvalidOperand`] unless both deltas contain
    /// inserts only.
    pub fn diff(&self, other: &Delta, caret: Option<usize>) -> Result<Delta, DeltaError> {
        if self.ops == other.ops {
            return Ok(Delta::new());
        }
        let src = flatten(self, "with")?;
        let dst = flatten(other, "on")?;
        let chunks = match caret {
            Some(caret) => text_diff::diff_edit(&src, &dst, caret),
            None => text_diff::diff(&src, &dst),
        };

        let mut this_iter = OpCursor::new(&self.ops);
        let mut other_iter = OpCursor::new(&other.ops);
        let mut out = DeltaBuilder::new();
        for (kind, text) in &chunks {
            let mut length = text.chars().count();
            while length > 0 {
                let op_length = match kind {
                    DiffKind::Insert => {
                        let n = other_iter.peek_length().min(length);
                        out.push(other_iter.next_len(n)?);
                        n
                    }
                    DiffKind::Delete => {
                        let n = this_iter.peek_length().min(length);
                        this_iter.next_len(n)?;
                        out.delete(n);
                        n
                    }
                    DiffKind::Equal => {
                        let n = this_iter
                            .peek_length()
                            .min(other_iter.peek_length())
                            .min(length);
                        let this_op = this_iter.next_len(n)?;
                        let other_op = other_iter.next_len(n)?;
                        let same_content = matches!(
                            (&this_op, &other_op),
                            (Op::Insert { value: a, .. }, Op::Insert { value: b, .. }) if a == b
                        );
                        if same_content {
                            let attrs = attributes::diff(this_op.attributes(), other_op.attributes());
                            out.push(Op::retain(n, attrs));
                        } else {
                            out.push(other_op).delete(n);
                        }
                        n
                    }
                };
                length -= op_length;
            }
        }
        Ok(out.chop().build())
    }
}
