//! The document buffer and its applicator.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::OtError;
use crate::op::Op;
use crate::ops::Ops;

/// A document's current content: an exclusively owned, growable byte buffer.
///
/// The buffer is mutated in place by [`apply`](Doc::apply); whichever role
/// holds the document owns it outright, and the algebra never keeps a
/// reference across calls.
///
/// # Example
///
/// ```
/// use ot_kit::{Doc, Ops};
///
/// let mut doc = Doc::from("abc");
/// doc.apply(&Ops::new().retain(1).insert("tag").delete(2)).unwrap();
/// assert_eq!(doc.as_bytes(), b"atag");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Doc(Vec<u8>);

impl Doc {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Doc(Vec::new())
    }

    /// Current length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The current content.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the document, returning its content.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Applies an operation sequence to the document in place.
    ///
    /// The buffer is walked once, left to right: deletes compact the tail
    /// over the removed region and inserts shift the tail right before the
    /// content is copied into the gap. Capacity for the whole edit is
    /// reserved up front (with headroom), so the buffer reallocates at most
    /// once per call.
    ///
    /// # Errors
    ///
    /// [`OtError::BaseLengthMismatch`] when the sequence was built against a
    /// document of a different length. The buffer is untouched in that case.
    ///
    /// # Panics
    ///
    /// Panics if the sequence passes the length check but fails to cover the
    /// whole document. That cannot happen for sequences produced by this
    /// crate; it indicates a corrupted hand-built sequence, and continuing
    /// would silently diverge the replicas.
    pub fn apply(&mut self, ops: &Ops) -> Result<(), OtError> {
        let counts = ops.count();
        if counts.base_len() != self.0.len() {
            return Err(OtError::BaseLengthMismatch {
                base: counts.base_len(),
                doc: self.0.len(),
            });
        }

        // worst-case length during the pass: every insert lands before any
        // delete shrinks the buffer
        let max = counts.retained + counts.deleted + counts.inserted;
        if max > self.0.capacity() {
            self.0.reserve(max + max / 4 - self.0.len());
        }

        let mut cursor = 0usize;
        for op in ops.iter() {
            match op {
                Op::Retain(n) => cursor += *n,
                Op::Delete(n) => {
                    let len = self.0.len();
                    self.0.copy_within(cursor + *n..len, cursor);
                    self.0.truncate(len - *n);
                }
                Op::Insert(content) => {
                    let len = self.0.len();
                    self.0.resize(len + content.len(), 0);
                    self.0.copy_within(cursor..len, cursor + content.len());
                    self.0[cursor..cursor + content.len()].copy_from_slice(content);
                    cursor += content.len();
                }
            }
        }

        assert_eq!(
            cursor,
            counts.target_len(),
            "operation sequence did not cover the whole document"
        );
        Ok(())
    }
}

impl fmt::Debug for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Doc({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl AsRef<[u8]> for Doc {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Doc {
    fn from(content: Vec<u8>) -> Self {
        Doc(content)
    }
}

impl From<&[u8]> for Doc {
    fn from(content: &[u8]) -> Self {
        Doc(content.to_vec())
    }
}

impl From<&str> for Doc {
    fn from(content: &str) -> Self {
        Doc(content.as_bytes().to_vec())
    }
}

impl From<String> for Doc {
    fn from(content: String) -> Self {
        Doc(content.into_bytes())
    }
}
