//! Composition of consecutive edits.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::OtError;
use crate::op::Op;
use crate::ops::{next_op, Ops};

impl Ops {
    /// Combines two consecutive edits into one equivalent edit: applying the
    /// result is the same as applying `self` and then `other`.
    ///
    /// Two sequences are consecutive when `self` produces a document of
    /// exactly the length `other` applies to. The walk keeps both sequences'
    /// step boundaries in the output; it is not normalized with
    /// [`merge`](Ops::merge), so the result is byte-for-byte comparable
    /// across implementations.
    ///
    /// # Example
    ///
    /// ```
    /// use ot_kit::Ops;
    ///
    /// let first = Ops::new().retain(1).insert("tag").retain(2);
    /// let second = Ops::new().retain(4).delete(2);
    /// let combined = first.compose(&second).unwrap();
    /// assert_eq!(combined, Ops::new().retain(1).insert("tag").delete(2));
    /// ```
    ///
    /// # Errors
    ///
    /// [`OtError::NotConsecutive`] when the lengths do not line up, and
    /// [`OtError::SequenceTooShort`] when one walk runs out of steps early.
    pub fn compose(&self, other: &Ops) -> Result<Ops, OtError> {
        if self.target_len() != other.base_len() {
            return Err(OtError::NotConsecutive);
        }

        let mut out: Vec<Op> = Vec::new();
        let mut iter_a = self.iter();
        let mut iter_b = other.iter();
        let mut cur_a = next_op(&mut iter_a);
        let mut cur_b = next_op(&mut iter_b);

        loop {
            match (cur_a, cur_b) {
                (None, None) => break,
                // a delete from `self` removes base content `other` never saw
                (Some(del @ Op::Delete(_)), b) => {
                    out.push(del);
                    cur_a = next_op(&mut iter_a);
                    cur_b = b;
                }
                // an insert from `other` lands in the result untouched
                (a, Some(ins @ Op::Insert(_))) => {
                    out.push(ins);
                    cur_a = a;
                    cur_b = next_op(&mut iter_b);
                }
                (None, Some(_)) | (Some(_), None) => return Err(OtError::SequenceTooShort),
                (Some(Op::Retain(na)), Some(Op::Retain(nb))) => match na.cmp(&nb) {
                    Ordering::Greater => {
                        out.push(Op::Retain(nb));
                        cur_a = Some(Op::Retain(na - nb));
                        cur_b = next_op(&mut iter_b);
                    }
                    Ordering::Less => {
                        out.push(Op::Retain(na));
                        cur_b = Some(Op::Retain(nb - na));
                        cur_a = next_op(&mut iter_a);
                    }
                    Ordering::Equal => {
                        out.push(Op::Retain(na));
                        cur_a = next_op(&mut iter_a);
                        cur_b = next_op(&mut iter_b);
                    }
                },
                // `other` deletes content `self` just inserted; the overlap
                // cancels without reaching the result
                (Some(Op::Insert(content)), Some(Op::Delete(nb))) => {
                    match content.len().cmp(&nb) {
                        Ordering::Greater => {
                            cur_a = Some(Op::Insert(content[nb..].to_vec()));
                            cur_b = next_op(&mut iter_b);
                        }
                        Ordering::Less => {
                            cur_b = Some(Op::Delete(nb - content.len()));
                            cur_a = next_op(&mut iter_a);
                        }
                        Ordering::Equal => {
                            cur_a = next_op(&mut iter_a);
                            cur_b = next_op(&mut iter_b);
                        }
                    }
                }
                // `other` retains through inserted content; the retained part
                // survives as an insert
                (Some(Op::Insert(content)), Some(Op::Retain(nb))) => {
                    match content.len().cmp(&nb) {
                        Ordering::Greater => {
                            out.push(Op::Insert(content[..nb].to_vec()));
                            cur_a = Some(Op::Insert(content[nb..].to_vec()));
                            cur_b = next_op(&mut iter_b);
                        }
                        Ordering::Less => {
                            cur_b = Some(Op::Retain(nb - content.len()));
                            out.push(Op::Insert(content));
                            cur_a = next_op(&mut iter_a);
                        }
                        Ordering::Equal => {
                            out.push(Op::Insert(content));
                            cur_a = next_op(&mut iter_a);
                            cur_b = next_op(&mut iter_b);
                        }
                    }
                }
                // `other` deletes content `self` retained
                (Some(Op::Retain(na)), Some(Op::Delete(nb))) => match na.cmp(&nb) {
                    Ordering::Greater => {
                        out.push(Op::Delete(nb));
                        cur_a = Some(Op::Retain(na - nb));
                        cur_b = next_op(&mut iter_b);
                    }
                    Ordering::Less => {
                        out.push(Op::Delete(na));
                        cur_b = Some(Op::Delete(nb - na));
                        cur_a = next_op(&mut iter_a);
                    }
                    Ordering::Equal => {
                        out.push(Op::Delete(nb));
                        cur_a = next_op(&mut iter_a);
                        cur_b = next_op(&mut iter_b);
                    }
                },
            }
        }

        Ok(Ops::from(out))
    }
}
