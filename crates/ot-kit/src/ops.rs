//! Operation sequences: one complete edit transaction.

use alloc::vec::Vec;
use core::slice;

use crate::op::Op;

/// Byte totals of the three step kinds in a sequence.
///
/// The two derived lengths are what every precondition checks: a sequence
/// applies to documents of [`base_len`](OpCounts::base_len) bytes and produces
/// documents of [`target_len`](OpCounts::target_len) bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    /// Bytes copied through unchanged.
    pub retained: usize,
    /// Bytes removed from the base document.
    pub deleted: usize,
    /// Bytes inserted as literal content.
    pub inserted: usize,
}

impl OpCounts {
    /// Length of the document this sequence applies to.
    #[must_use]
    pub fn base_len(&self) -> usize {
        self.retained + self.deleted
    }

    /// Length of the document this sequence produces.
    #[must_use]
    pub fn target_len(&self) -> usize {
        self.retained + self.inserted
    }
}

/// An ordered sequence of [`Op`] describing one edit transaction from a base
/// document to a target document.
///
/// Sequences are assembled with the chaining builder methods; steps are kept
/// exactly as given (including no-ops) until [`merge`](Ops::merge) normalizes
/// them. Equality is structural, so two sequences with the same effect but
/// different step boundaries compare unequal until merged.
///
/// # Example
///
/// ```
/// use ot_kit::Ops;
///
/// let ops = Ops::new().retain(1).insert("tag").delete(2);
/// assert_eq!(ops.base_len(), 3);
/// assert_eq!(ops.target_len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ops(Vec<Op>);

impl Ops {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Ops(Vec::new())
    }

    /// Appends a retain step.
    #[must_use]
    pub fn retain(mut self, n: usize) -> Self {
        self.0.push(Op::Retain(n));
        self
    }

    /// Appends a delete step.
    #[must_use]
    pub fn delete(mut self, n: usize) -> Self {
        self.0.push(Op::Delete(n));
        self
    }

    /// Appends an insert step with the given content.
    #[must_use]
    pub fn insert(mut self, content: impl AsRef<[u8]>) -> Self {
        self.0.push(Op::Insert(content.as_ref().to_vec()));
        self
    }

    /// Number of steps in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the steps.
    pub fn iter(&self) -> slice::Iter<'_, Op> {
        self.0.iter()
    }

    /// Sums the three step kinds.
    #[must_use]
    pub fn count(&self) -> OpCounts {
        let mut counts = OpCounts::default();
        for op in &self.0 {
            match op {
                Op::Retain(n) => counts.retained += n,
                Op::Delete(n) => counts.deleted += n,
                Op::Insert(content) => counts.inserted += content.len(),
            }
        }
        counts
    }

    /// Length of the document this sequence applies to.
    #[must_use]
    pub fn base_len(&self) -> usize {
        self.count().base_len()
    }

    /// Length of the document this sequence produces.
    #[must_use]
    pub fn target_len(&self) -> usize {
        self.count().target_len()
    }

    /// Normalizes the sequence: drops no-op steps and collapses adjacent
    /// steps of the same kind.
    ///
    /// Transform runs this on both of its outputs so they are minimal and
    /// comparable. Compose leaves its outputs unmerged; callers that want
    /// the compact form run this explicitly.
    ///
    /// # Example
    ///
    /// ```
    /// use ot_kit::Ops;
    ///
    /// let mut ops = Ops::new().retain(1).retain(2).insert("a").insert("b").delete(0);
    /// ops.merge();
    /// assert_eq!(ops, Ops::new().retain(3).insert("ab"));
    /// ```
    pub fn merge(&mut self) {
        let ops = core::mem::take(&mut self.0);
        let mut merged: Vec<Op> = Vec::with_capacity(ops.len());
        for op in ops {
            if op.is_noop() {
                continue;
            }
            let op = match (merged.pop(), op) {
                (Some(Op::Retain(a)), Op::Retain(b)) => Op::Retain(a + b),
                (Some(Op::Delete(a)), Op::Delete(b)) => Op::Delete(a + b),
                (Some(Op::Insert(mut a)), Op::Insert(b)) => {
                    a.extend_from_slice(&b);
                    Op::Insert(a)
                }
                (Some(prev), op) => {
                    merged.push(prev);
                    op
                }
                (None, op) => op,
            };
            merged.push(op);
        }
        self.0 = merged;
    }
}

impl From<Vec<Op>> for Ops {
    fn from(ops: Vec<Op>) -> Self {
        Ops(ops)
    }
}

impl IntoIterator for Ops {
    type Item = Op;
    type IntoIter = alloc::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ops {
    type Item = &'a Op;
    type IntoIter = slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Advances `iter` to the next effective step, skipping no-ops.
///
/// The compose and transform walks consume their inputs through this so that
/// decoded sequences containing no-ops behave identically to normalized ones.
pub(crate) fn next_op(iter: &mut slice::Iter<'_, Op>) -> Option<Op> {
    for op in iter {
        if !op.is_noop() {
            return Some(op.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_steps_in_order() {
        let ops = Ops::new().retain(1).insert("tag").delete(2);
        let steps: Vec<&Op> = ops.iter().collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(*steps[0], Op::Retain(1));
        assert_eq!(*steps[1], Op::Insert(b"tag".to_vec()));
        assert_eq!(*steps[2], Op::Delete(2));
    }

    #[test]
    fn count_sums_each_kind() {
        let ops = Ops::new().retain(1).insert("tag").delete(2);
        let counts = ops.count();
        assert_eq!(
            counts,
            OpCounts {
                retained: 1,
                deleted: 2,
                inserted: 3,
            }
        );
        assert_eq!(ops.base_len(), 3);
        assert_eq!(ops.target_len(), 4);
    }

    #[test]
    fn equality_is_structural_until_merged() {
        let split = Ops::new().retain(2).retain(1);
        let whole = Ops::new().retain(3);
        assert_ne!(split, whole);

        let mut merged = split;
        merged.merge();
        assert_eq!(merged, whole);
    }

    // --- merge tests ---

    #[test]
    fn merge_collapses_adjacent_steps_and_drops_noops() {
        let mut ops = Ops::new()
            .retain(1)
            .retain(2)
            .delete(0)
            .insert("ab")
            .insert("cd")
            .retain(0)
            .delete(3)
            .delete(1);
        ops.merge();
        assert_eq!(ops, Ops::new().retain(3).insert("abcd").delete(4));
    }

    #[test]
    fn merge_of_noops_is_empty() {
        let mut ops = Ops::new().retain(0).insert("").delete(0);
        ops.merge();
        assert!(ops.is_empty());
    }

    #[test]
    fn merge_twice_equals_merge_once() {
        let mut once = Ops::new().retain(2).retain(2).insert("x").insert("y").delete(1);
        once.merge();
        let mut twice = once.clone();
        twice.merge();
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_preserves_counts() {
        let mut ops = Ops::new().retain(1).retain(4).delete(2).delete(0).insert("hey");
        let before = ops.count();
        ops.merge();
        assert_eq!(ops.count(), before);
    }

    // --- wire form tests ---

    #[cfg(feature = "serde")]
    #[test]
    fn encodes_as_flat_array() {
        let ops = Ops::new().retain(7).insert("lorem").delete(5);
        assert_eq!(serde_json::to_string(&ops).unwrap(), "[7,\"lorem\",-5]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn round_trips_through_the_wire_form() {
        let ops = Ops::new().retain(7).insert("lorem").delete(5);
        let encoded = serde_json::to_string(&ops).unwrap();
        let decoded: Ops = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, ops);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decoded_noops_merge_away() {
        let mut decoded: Ops = serde_json::from_str("[0,\"\",3]").unwrap();
        assert_eq!(decoded.len(), 3);
        decoded.merge();
        assert_eq!(decoded, Ops::new().retain(3));
    }
}
