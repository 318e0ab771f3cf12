//! Reconstructing an edit from two document states.

use crate::ops::Ops;

/// Builds an operation sequence that turns `old` into `new`.
///
/// The sequence retains the longest common prefix and suffix and replaces
/// whatever lies between, so a plain editor that only reports "the text is
/// now X" can still participate in a session. Both boundaries are backed off
/// to character boundaries, which keeps every insert valid UTF-8 on the wire
/// at the cost of occasionally deleting and reinserting one character.
///
/// This is a coarse diff. Two separate edits to the same line come back as
/// one replacement of the span covering both; that is still a correct edit,
/// just not the minimal one. Identical inputs come back as a single retain
/// covering the whole document, which applies as the identity edit.
///
/// # Example
///
/// ```
/// use ot_kit::{diff, Doc, Ops};
///
/// let ops = diff("go!", "gold!");
/// assert_eq!(ops, Ops::new().retain(2).insert("ld").retain(1));
///
/// let mut doc = Doc::from("go!");
/// doc.apply(&ops).unwrap();
/// assert_eq!(doc.as_bytes(), b"gold!");
/// ```
#[must_use]
pub fn diff(old: &str, new: &str) -> Ops {
    let a = old.as_bytes();
    let b = new.as_bytes();

    let mut prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    while prefix > 0 && !old.is_char_boundary(prefix) {
        prefix -= 1;
    }

    // the suffix must not reach back into the prefix
    let limit = a.len().min(b.len()) - prefix;
    let mut suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take(limit)
        .take_while(|(x, y)| x == y)
        .count();
    while suffix > 0 && !old.is_char_boundary(a.len() - suffix) {
        suffix -= 1;
    }

    let deleted = a.len() - prefix - suffix;
    let inserted = &new[prefix..b.len() - suffix];

    let mut ops = Ops::new()
        .retain(prefix)
        .delete(deleted)
        .insert(inserted)
        .retain(suffix);
    ops.merge();
    ops
}
