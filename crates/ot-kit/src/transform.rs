//! Transformation of concurrent edits.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::OtError;
use crate::op::Op;
use crate::ops::{next_op, Ops};

impl Ops {
    /// Rebases two concurrent edits against each other, returning
    /// `(a1, b1)` such that applying `self` then `b1` produces the same
    /// document as applying `other` then `a1`.
    ///
    /// Two sequences are concurrent when they were drawn from the same base
    /// document. When both sides insert at the same point, `self`'s insert is
    /// ordered first; every other overlap is resolved by a three-way
    /// comparison that consumes the exhausted side first and both sides on a
    /// tie. Replicating that order exactly is what makes independently
    /// written peers converge byte-for-byte. Both outputs are normalized with
    /// [`merge`](Ops::merge).
    ///
    /// # Example
    ///
    /// ```
    /// use ot_kit::{Doc, Ops};
    ///
    /// let a = Ops::new().retain(5).insert(" brave").retain(6);
    /// let b = Ops::new().retain(11).insert("!");
    /// let (a1, b1) = a.transform(&b).unwrap();
    ///
    /// let mut via_a = Doc::from("hello world");
    /// via_a.apply(&a).unwrap();
    /// via_a.apply(&b1).unwrap();
    ///
    /// let mut via_b = Doc::from("hello world");
    /// via_b.apply(&b).unwrap();
    /// via_b.apply(&a1).unwrap();
    ///
    /// assert_eq!(via_a.as_bytes(), b"hello brave world!");
    /// assert_eq!(via_a, via_b);
    /// ```
    ///
    /// # Errors
    ///
    /// [`OtError::NotConcurrent`] when the base lengths differ, and
    /// [`OtError::SequenceTooShort`] when one walk runs out of steps early.
    pub fn transform(&self, other: &Ops) -> Result<(Ops, Ops), OtError> {
        if self.base_len() != other.base_len() {
            return Err(OtError::NotConcurrent);
        }

        let mut a1: Vec<Op> = Vec::new();
        let mut b1: Vec<Op> = Vec::new();
        let mut iter_a = self.iter();
        let mut iter_b = other.iter();
        let mut cur_a = next_op(&mut iter_a);
        let mut cur_b = next_op(&mut iter_b);

        loop {
            match (cur_a, cur_b) {
                (None, None) => break,
                // an insert goes out verbatim on its own side while the other
                // side retains over the content it did not know about
                (Some(Op::Insert(content)), b) => {
                    b1.push(Op::Retain(content.len()));
                    a1.push(Op::Insert(content));
                    cur_a = next_op(&mut iter_a);
                    cur_b = b;
                }
                (a, Some(Op::Insert(content))) => {
                    a1.push(Op::Retain(content.len()));
                    b1.push(Op::Insert(content));
                    cur_a = a;
                    cur_b = next_op(&mut iter_b);
                }
                (None, Some(_)) | (Some(_), None) => return Err(OtError::SequenceTooShort),
                // both sides keep the overlap
                (Some(Op::Retain(na)), Some(Op::Retain(nb))) => {
                    let overlap = match na.cmp(&nb) {
                        Ordering::Greater => {
                            cur_a = Some(Op::Retain(na - nb));
                            cur_b = next_op(&mut iter_b);
                            nb
                        }
                        Ordering::Less => {
                            cur_b = Some(Op::Retain(nb - na));
                            cur_a = next_op(&mut iter_a);
                            na
                        }
                        Ordering::Equal => {
                            cur_a = next_op(&mut iter_a);
                            cur_b = next_op(&mut iter_b);
                            na
                        }
                    };
                    a1.push(Op::Retain(overlap));
                    b1.push(Op::Retain(overlap));
                }
                // both sides deleted the same region; whichever applies first
                // has already removed it
                (Some(Op::Delete(na)), Some(Op::Delete(nb))) => match na.cmp(&nb) {
                    Ordering::Greater => {
                        cur_a = Some(Op::Delete(na - nb));
                        cur_b = next_op(&mut iter_b);
                    }
                    Ordering::Less => {
                        cur_b = Some(Op::Delete(nb - na));
                        cur_a = next_op(&mut iter_a);
                    }
                    Ordering::Equal => {
                        cur_a = next_op(&mut iter_a);
                        cur_b = next_op(&mut iter_b);
                    }
                },
                // `self` deletes content `other` retained: the delete still
                // has to happen in `other`'s timeline, so it stays in a1
                (Some(Op::Delete(na)), Some(Op::Retain(nb))) => {
                    let overlap = match na.cmp(&nb) {
                        Ordering::Greater => {
                            cur_a = Some(Op::Delete(na - nb));
                            cur_b = next_op(&mut iter_b);
                            nb
                        }
                        Ordering::Less => {
                            cur_b = Some(Op::Retain(nb - na));
                            cur_a = next_op(&mut iter_a);
                            na
                        }
                        Ordering::Equal => {
                            cur_a = next_op(&mut iter_a);
                            cur_b = next_op(&mut iter_b);
                            na
                        }
                    };
                    a1.push(Op::Delete(overlap));
                }
                // mirror case: `other`'s delete stays in b1
                (Some(Op::Retain(na)), Some(Op::Delete(nb))) => {
                    let overlap = match na.cmp(&nb) {
                        Ordering::Greater => {
                            cur_a = Some(Op::Retain(na - nb));
                            cur_b = next_op(&mut iter_b);
                            nb
                        }
                        Ordering::Less => {
                            cur_b = Some(Op::Delete(nb - na));
                            cur_a = next_op(&mut iter_a);
                            na
                        }
                        Ordering::Equal => {
                            cur_a = next_op(&mut iter_a);
                            cur_b = next_op(&mut iter_b);
                            nb
                        }
                    };
                    b1.push(Op::Delete(overlap));
                }
            }
        }

        let mut a1 = Ops::from(a1);
        let mut b1 = Ops::from(b1);
        a1.merge();
        b1.merge();
        Ok((a1, b1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Doc;

    fn converge(base: &str, a: &Ops, b: &Ops) -> (Doc, Doc) {
        let (a1, b1) = a.transform(b).unwrap();

        let mut via_a = Doc::from(base);
        via_a.apply(a).unwrap();
        via_a.apply(&b1).unwrap();

        let mut via_b = Doc::from(base);
        via_b.apply(b).unwrap();
        via_b.apply(&a1).unwrap();

        (via_a, via_b)
    }

    #[test]
    fn transform_offsets_delete_past_concurrent_insert() {
        let a = Ops::new().retain(1).insert("tag").retain(2);
        let b = Ops::new().retain(2).delete(1);
        let (a1, b1) = a.transform(&b).unwrap();

        assert_eq!(a1, Ops::new().retain(1).insert("tag").retain(1));
        assert_eq!(b1, Ops::new().retain(5).delete(1));

        let (via_a, via_b) = converge("abc", &a, &b);
        assert_eq!(via_a.as_bytes(), b"atagb");
        assert_eq!(via_a, via_b);
    }

    #[test]
    fn transform_orders_identical_inserts_deterministically() {
        let a = Ops::new().retain(1).insert("tag").retain(2);
        let b = a.clone();
        let (a1, b1) = a.transform(&b).unwrap();

        assert_eq!(a1, Ops::new().retain(1).insert("tag").retain(5));
        assert_eq!(b1, Ops::new().retain(4).insert("tag").retain(2));

        let (via_a, via_b) = converge("abc", &a, &b);
        assert_eq!(via_a.as_bytes(), b"atagtagbc");
        assert_eq!(via_a, via_b);
    }

    #[test]
    fn transform_drops_doubly_deleted_overlap() {
        let a = Ops::new().delete(2).retain(1);
        let b = Ops::new().delete(1).retain(2);
        let (a1, b1) = a.transform(&b).unwrap();

        assert_eq!(a1, Ops::new().delete(1).retain(1));
        assert_eq!(b1, Ops::new().retain(1));

        let (via_a, via_b) = converge("abc", &a, &b);
        assert_eq!(via_a.as_bytes(), b"c");
        assert_eq!(via_a, via_b);
    }

    #[test]
    fn transform_outputs_are_normalized() {
        let a = Ops::new().retain(1).retain(2);
        let b = Ops::new().retain(3);
        let (a1, b1) = a.transform(&b).unwrap();
        assert_eq!(a1, Ops::new().retain(3));
        assert_eq!(b1, Ops::new().retain(3));
    }

    #[test]
    fn transform_against_an_empty_edit() {
        let insert = Ops::new().insert("x");
        let (a1, b1) = insert.transform(&Ops::new()).unwrap();
        assert_eq!(a1, insert);
        assert_eq!(b1, Ops::new().retain(1));

        let (a1, b1) = Ops::new().transform(&Ops::new()).unwrap();
        assert!(a1.is_empty());
        assert!(b1.is_empty());
    }

    #[test]
    fn transform_rejects_non_concurrent_sequences() {
        let a = Ops::new().retain(1);
        let b = Ops::new().retain(2);
        assert_eq!(a.transform(&b), Err(OtError::NotConcurrent));
    }
}
