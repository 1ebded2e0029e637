//! Myers O(ND) bisection over char slices, plus the merge cleanup that
//! coalesces adjacent edits and slides single edits onto equalities.

use crate::{Diff, DiffKind};

pub(crate) fn diff_chars(src: &str, dst: &str) -> Diff {
    if src == dst {
        return if src.is_empty() {
            vec![]
        } else {
            vec![(DiffKind::Equal, src.to_string())]
        };
    }

    let src_chars: Vec<char> = src.chars().collect();
    let dst_chars: Vec<char> = dst.chars().collect();

    let prefix_len = common_prefix(&src_chars, &dst_chars);
    let prefix = collect(&src_chars[..prefix_len]);
    let src_chars = &src_chars[prefix_len..];
    let dst_chars = &dst_chars[prefix_len..];

    let suffix_len = common_suffix(src_chars, dst_chars);
    let suffix = collect(&src_chars[src_chars.len() - suffix_len..]);
    let src_chars = &src_chars[..src_chars.len() - suffix_len];
    let dst_chars = &dst_chars[..dst_chars.len() - suffix_len];

    let mut result = diff_middle(src_chars, dst_chars);
    if !prefix.is_empty() {
        result.insert(0, (DiffKind::Equal, prefix));
    }
    if !suffix.is_empty() {
        result.push((DiffKind::Equal, suffix));
    }

    cleanup_merge(&mut result);
    result
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

fn common_prefix(c1: &[char], c2: &[char]) -> usize {
    c1.iter().zip(c2.iter()).take_while(|(a, b)| a == b).count()
}

fn common_suffix(c1: &[char], c2: &[char]) -> usize {
    c1.iter()
        .rev()
        .zip(c2.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

fn find_slice(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Diff two inputs that share no common prefix or suffix.
fn diff_middle(c1: &[char], c2: &[char]) -> Diff {
    if c1.is_empty() {
        return if c2.is_empty() {
            vec![]
        } else {
            vec![(DiffKind::Insert, collect(c2))]
        };
    }
    if c2.is_empty() {
        return vec![(DiffKind::Delete, collect(c1))];
    }

    let (long, short, long_is_src) = if c1.len() > c2.len() {
        (c1, c2, true)
    } else {
        (c2, c1, false)
    };
    if let Some(idx) = find_slice(long, short) {
        // Shorter text sits wholly inside the longer one.
        let edge = if long_is_src {
            DiffKind::Delete
        } else {
            DiffKind::Insert
        };
        let mut out = Vec::with_capacity(3);
        let head = &long[..idx];
        let tail = &long[idx + short.len()..];
        if !head.is_empty() {
            out.push((edge, collect(head)));
        }
        out.push((DiffKind::Equal, collect(short)));
        if !tail.is_empty() {
            out.push((edge, collect(tail)));
        }
        return out;
    }

    if short.len() == 1 {
        return vec![
            (DiffKind::Delete, collect(c1)),
            (DiffKind::Insert, collect(c2)),
        ];
    }

    bisect(c1, c2)
}

fn bisect(c1: &[char], c2: &[char]) -> Diff {
    let n1 = c1.len() as i64;
    let n2 = c2.len() as i64;
    let max_d = (c1.len() + c2.len()).div_ceil(2) + 1;
    let mid = max_d as i64;
    let width = 2 * max_d;

    let mut fwd: Vec<i64> = vec![-1; width];
    let mut rev: Vec<i64> = vec![-1; width];
    fwd[max_d + 1] = 0;
    rev[max_d + 1] = 0;

    let delta = n1 - n2;
    // With an odd delta the forward path is the one that can overlap.
    let odd = delta % 2 != 0;

    let mut fwd_lo = 0i64;
    let mut fwd_hi = 0i64;
    let mut rev_lo = 0i64;
    let mut rev_hi = 0i64;

    for d in 0..max_d as i64 {
        let mut k1 = -d + fwd_lo;
        while k1 <= d - fwd_hi {
            let k1_offset = (mid + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && fwd[k1_offset - 1] < fwd[k1_offset + 1]) {
                fwd[k1_offset + 1]
            } else {
                fwd[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n1 && y1 < n2 && c1[x1 as usize] == c2[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            fwd[k1_offset] = x1;
            if x1 > n1 {
                fwd_hi += 2;
            } else if y1 > n2 {
                fwd_lo += 2;
            } else if odd {
                let k2_offset = mid + delta - k1;
                if k2_offset >= 0
                    && (k2_offset as usize) < width
                    && rev[k2_offset as usize] != -1
                    && x1 >= n1 - rev[k2_offset as usize]
                {
                    return bisect_split(c1, c2, x1 as usize, y1 as usize);
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + rev_lo;
        while k2 <= d - rev_hi {
            let k2_offset = (mid + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && rev[k2_offset - 1] < rev[k2_offset + 1]) {
                rev[k2_offset + 1]
            } else {
                rev[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n1
                && y2 < n2
                && c1[(n1 - 1 - x2) as usize] == c2[(n2 - 1 - y2) as usize]
            {
                x2 += 1;
                y2 += 1;
            }
            rev[k2_offset] = x2;
            if x2 > n1 {
                rev_hi += 2;
            } else if y2 > n2 {
                rev_lo += 2;
            } else if !odd {
                let k1_offset = mid + delta - k2;
                if k1_offset >= 0 && (k1_offset as usize) < width {
                    let x1 = fwd[k1_offset as usize];
                    if x1 != -1 {
                        let y1 = mid + x1 - k1_offset;
                        if x1 >= n1 - x2 {
                            return bisect_split(c1, c2, x1 as usize, y1 as usize);
                        }
                    }
                }
            }
            k2 += 2;
        }
    }

    // No commonality at all.
    vec![
        (DiffKind::Delete, collect(c1)),
        (DiffKind::Insert, collect(c2)),
    ]
}

fn bisect_split(c1: &[char], c2: &[char], x: usize, y: usize) -> Diff {
    let mut result = diff_chars(&collect(&c1[..x]), &collect(&c2[..y]));
    result.extend(diff_chars(&collect(&c1[x..]), &collect(&c2[y..])));
    result
}

/// Reorder and merge like edit sections, factoring common affixes of
/// delete/insert pairs into the surrounding equalities.
pub(crate) fn cleanup_merge(diff: &mut Diff) {
    diff.push((DiffKind::Equal, String::new()));
    let mut at = 0usize;
    let mut n_deleted = 0usize;
    let mut n_inserted = 0usize;
    let mut deleted = String::new();
    let mut inserted = String::new();

    while at < diff.len() {
        if at < diff.len() - 1 && diff[at].1.is_empty() {
            diff.remove(at);
            continue;
        }

        match diff[at].0 {
            DiffKind::Insert => {
                n_inserted += 1;
                inserted.push_str(&diff[at].1);
                at += 1;
            }
            DiffKind::Delete => {
                n_deleted += 1;
                deleted.push_str(&diff[at].1);
                at += 1;
            }
            DiffKind::Equal => {
                let last_equal = at.checked_sub(n_inserted + n_deleted + 1);

                if !deleted.is_empty() || !inserted.is_empty() {
                    if !deleted.is_empty() && !inserted.is_empty() {
                        let deleted_chars: Vec<char> = deleted.chars().collect();
                        let inserted_chars: Vec<char> = inserted.chars().collect();
                        let common = common_prefix(&inserted_chars, &deleted_chars);
                        if common > 0 {
                            let prefix = collect(&inserted_chars[..common]);
                            match last_equal {
                                Some(pq) => diff[pq].1.push_str(&prefix),
                                None => {
                                    diff.insert(0, (DiffKind::Equal, prefix));
                                    at += 1;
                                }
                            }
                            inserted = collect(&inserted_chars[common..]);
                            deleted = collect(&deleted_chars[common..]);
                        }

                        let deleted_chars: Vec<char> = deleted.chars().collect();
                        let inserted_chars: Vec<char> = inserted.chars().collect();
                        let common = common_suffix(&inserted_chars, &deleted_chars);
                        if common > 0 {
                            let ins_len = inserted_chars.len();
                            let suffix = collect(&inserted_chars[ins_len - common..]);
                            diff[at].1 = suffix + &diff[at].1;
                            inserted = collect(&inserted_chars[..ins_len - common]);
                            deleted = collect(&deleted_chars[..deleted_chars.len() - common]);
                        }
                    }

                    let start = at - (n_inserted + n_deleted);
                    let mut replacement = Vec::with_capacity(2);
                    if !deleted.is_empty() {
                        replacement.push((DiffKind::Delete, deleted.clone()));
                    }
                    if !inserted.is_empty() {
                        replacement.push((DiffKind::Insert, inserted.clone()));
                    }
                    let added = replacement.len();
                    let _ = diff.splice(start..at, replacement);
                    at = start + added;
                }

                if at != 0 && diff[at - 1].0 == DiffKind::Equal {
                    let cur = diff.remove(at);
                    diff[at - 1].1.push_str(&cur.1);
                } else {
                    at += 1;
                }

                n_inserted = 0;
                n_deleted = 0;
                deleted.clear();
                inserted.clear();
            }
        }
    }

    if diff.last().is_some_and(|(_, s)| s.is_empty()) {
        diff.pop();
    }

    // Second pass: a single edit surrounded by equalities may slide left or
    // right to swallow one of them, e.g. `A<ins>BA</ins>C` -> `<ins>AB</ins>AC`.
    let mut changes = false;
    let mut at = 1usize;
    while at + 1 < diff.len() {
        if diff[at - 1].0 != DiffKind::Equal || diff[at + 1].0 != DiffKind::Equal {
            at += 1;
            continue;
        }
        let prev: Vec<char> = diff[at - 1].1.chars().collect();
        let cur: Vec<char> = diff[at].1.chars().collect();
        let next: Vec<char> = diff[at + 1].1.chars().collect();

        if cur.len() >= prev.len() && cur[cur.len() - prev.len()..] == prev[..] {
            diff[at].1 = prev
                .iter()
                .chain(cur[..cur.len() - prev.len()].iter())
                .collect();
            diff[at + 1].1 = prev.iter().chain(next.iter()).collect();
            diff.remove(at - 1);
            changes = true;
        } else if cur.len() >= next.len() && cur[..next.len()] == next[..] {
            diff[at - 1].1 = prev.iter().chain(next.iter()).collect();
            diff[at].1 = cur[next.len()..].iter().chain(next.iter()).collect();
            diff.remove(at + 1);
            changes = true;
            at += 1;
        } else {
            at += 1;
        }
    }

    if changes {
        cleanup_merge(diff);
    }
}
