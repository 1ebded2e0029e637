//! Character-level text diff.
//!
//! Computes an ordered list of `(kind, text)` chunks turning one string into
//! another, where `kind` is one of [`DiffKind::Equal`], [`DiffKind::Insert`]
//! or [`DiffKind::Delete`]. This is the primitive `rich-delta` flattens
//! documents into before reconstructing an attribute-aware delta.
//!
//! All lengths and positions are Unicode scalar values (Rust `char`s).
//!
//! # Example
//!
//! ```
//! use rich_delta_text_diff::{diff, patch_dst, patch_src};
//!
//! let chunks = diff("the quick fox", "the slow fox");
//! assert_eq!(patch_src(&chunks), "the quick fox");
//! assert_eq!(patch_dst(&chunks), "the slow fox");
//! ```

mod myers;

// ── Types ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    Delete = -1,
    Equal = 0,
    Insert = 1,
}

pub type Chunk = (DiffKind, String);
pub type Diff = Vec<Chunk>;

// ── Public API ────────────────────────────────────────────────────────────

/// Compute the diff turning `src` into `dst`.
///
/// Equal chunks are included so the caller can walk both inputs in lockstep.
pub fn diff(src: &str, dst: &str) -> Diff {
    myers::diff_chars(src, dst)
}

/// Diff with a caret hint: `caret` is the cursor position in `src`, before
/// the edit.
///
/// Typing or backspacing just before the caret, or forward-deleting just
/// after it, is built directly from the text around the caret. Anything
/// else (or an out-of-range caret) falls back to [`diff`].
pub fn diff_edit(src: &str, dst: &str, caret: usize) -> Diff {
    let src_chars: Vec<char> = src.chars().collect();
    let dst_chars: Vec<char> = dst.chars().collect();
    if src_chars == dst_chars || caret > src_chars.len() {
        return diff(src, dst);
    }
    splice_before(&src_chars, &dst_chars, caret)
        .or_else(|| splice_after(&src_chars, &dst_chars, caret))
        .unwrap_or_else(|| diff(src, dst))
}

/// A single insertion or deletion ending at `caret`.
fn splice_before(src: &[char], dst: &[char], caret: usize) -> Option<Diff> {
    let dst_caret = (caret + dst.len()).checked_sub(src.len())?;
    if src[caret..] != dst[dst_caret..] {
        return None;
    }
    let prefix = caret.min(dst_caret);
    if src[..prefix] != dst[..prefix] {
        return None;
    }
    Some(splice(
        &src[..prefix],
        &src[prefix..caret],
        &dst[prefix..dst_caret],
        &src[caret..],
    ))
}

/// A single insertion or deletion starting at `caret`.
fn splice_after(src: &[char], dst: &[char], caret: usize) -> Option<Diff> {
    if caret > dst.len() || src[..caret] != dst[..caret] {
        return None;
    }
    let suffix = (src.len() - caret).min(dst.len() - caret);
    let (src_end, dst_end) = (src.len() - suffix, dst.len() - suffix);
    if src[src_end..] != dst[dst_end..] {
        return None;
    }
    Some(splice(
        &src[..caret],
        &src[caret..src_end],
        &dst[caret..dst_end],
        &src[src_end..],
    ))
}

fn splice(before: &[char], deleted: &[char], inserted: &[char], after: &[char]) -> Diff {
    let mut out: Diff = Vec::with_capacity(3);
    push_chunk(&mut out, DiffKind::Equal, before);
    push_chunk(&mut out, DiffKind::Delete, deleted);
    push_chunk(&mut out, DiffKind::Insert, inserted);
    push_chunk(&mut out, DiffKind::Equal, after);
    out
}

/// Merge consecutive chunks of the same kind and drop empty ones.
pub fn normalize(chunks: Diff) -> Diff {
    let mut result: Diff = Vec::with_capacity(chunks.len());
    for (kind, text) in chunks {
        if text.is_empty() {
            continue;
        }
        match result.last_mut() {
            Some(last) if last.0 == kind => last.1.push_str(&text),
            _ => result.push((kind, text)),
        }
    }
    result
}

/// Reconstruct the source string from a diff.
pub fn patch_src(chunks: &Diff) -> String {
    chunks
        .iter()
        .filter(|(kind, _)| *kind != DiffKind::Insert)
        .map(|(_, text)| text.as_str())
        .collect()
}

/// Reconstruct the destination string from a diff.
pub fn patch_dst(chunks: &Diff) -> String {
    chunks
        .iter()
        .filter(|(kind, _)| *kind != DiffKind::Delete)
        .map(|(_, text)| text.as_str())
        .collect()
}

/// Swap inserts and deletes so the diff turns `dst` back into `src`.
pub fn invert(chunks: Diff) -> Diff {
    chunks
        .into_iter()
        .map(|(kind, text)| {
            let inv = match kind {
                DiffKind::Equal => DiffKind::Equal,
                DiffKind::Insert => DiffKind::Delete,
                DiffKind::Delete => DiffKind::Insert,
            };
            (inv, text)
        })
        .collect()
}

fn push_chunk(out: &mut Diff, kind: DiffKind, chars: &[char]) {
    if !chars.is_empty() {
        out.push((kind, chars.iter().collect()));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
