//! The primitive edit step.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// One primitive step in an edit: retain, delete, or insert.
///
/// Counts are byte counts. Insert content is raw bytes: the algebra and the
/// applicator are byte-exact and never reinterpret content, and only the
/// wire encoding requires inserts to be valid UTF-8.
///
/// # Example
///
/// ```
/// use ot_kit::Op;
///
/// let steps = [Op::Retain(1), Op::Insert(b"tag".to_vec()), Op::Delete(2)];
/// assert_eq!(steps.iter().map(Op::len).sum::<usize>(), 6);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Op {
    /// Copy the next `n` bytes of the source document unchanged.
    Retain(usize),
    /// Drop the next `n` bytes of the source document.
    Delete(usize),
    /// Insert literal content not present in the source document.
    Insert(Vec<u8>),
}

impl Op {
    /// Number of bytes this step covers: the count for retains and deletes,
    /// the content length for inserts.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Op::Retain(n) | Op::Delete(n) => *n,
            Op::Insert(content) => content.len(),
        }
    }

    /// Whether this step does nothing (zero count or empty content).
    ///
    /// The algebra never produces no-ops, but decoded or hand-built input may
    /// contain them; every consumer skips them.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Retain(n) => write!(f, "Retain({n})"),
            Op::Delete(n) => write!(f, "Delete({n})"),
            Op::Insert(content) => write!(f, "Insert({:?})", String::from_utf8_lossy(content)),
        }
    }
}

// ---- wire form ----
//
// A retain/delete step is a signed integer (positive retain, negative
// delete); an insert step is a string. This discrimination is the
// interoperability contract and must not change.

#[cfg(feature = "serde")]
impl serde::Serialize for Op {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Op::Retain(n) => serializer.serialize_i64(*n as i64),
            Op::Delete(n) => serializer.serialize_i64(-(*n as i64)),
            Op::Insert(content) => match core::str::from_utf8(content) {
                Ok(text) => serializer.serialize_str(text),
                Err(_) => Err(serde::ser::Error::custom("insert content is not valid UTF-8")),
            },
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Op {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OpVisitor;

        impl<'de> serde::de::Visitor<'de> for OpVisitor {
            type Value = Op;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a signed byte count or an insert string")
            }

            fn visit_i64<E>(self, n: i64) -> Result<Op, E>
            where
                E: serde::de::Error,
            {
                if n < 0 {
                    Ok(Op::Delete(n.unsigned_abs() as usize))
                } else {
                    Ok(Op::Retain(n as usize))
                }
            }

            fn visit_u64<E>(self, n: u64) -> Result<Op, E>
            where
                E: serde::de::Error,
            {
                Ok(Op::Retain(n as usize))
            }

            fn visit_str<E>(self, content: &str) -> Result<Op, E>
            where
                E: serde::de::Error,
            {
                Ok(Op::Insert(content.as_bytes().to_vec()))
            }

            fn visit_string<E>(self, content: String) -> Result<Op, E>
            where
                E: serde::de::Error,
            {
                Ok(Op::Insert(content.into_bytes()))
            }
        }

        deserializer.deserialize_any(OpVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_covers_all_three_kinds() {
        assert_eq!(Op::Retain(7).len(), 7);
        assert_eq!(Op::Delete(5).len(), 5);
        assert_eq!(Op::Insert(b"lorem".to_vec()).len(), 5);
    }

    #[test]
    fn noop_detection() {
        assert!(Op::Retain(0).is_noop());
        assert!(Op::Delete(0).is_noop());
        assert!(Op::Insert(Vec::new()).is_noop());
        assert!(!Op::Retain(1).is_noop());
        assert!(!Op::Insert(b"x".to_vec()).is_noop());
    }

    #[test]
    fn debug_shows_insert_content_as_text() {
        assert_eq!(format!("{:?}", Op::Retain(3)), "Retain(3)");
        assert_eq!(format!("{:?}", Op::Delete(2)), "Delete(2)");
        assert_eq!(format!("{:?}", Op::Insert(b"tag".to_vec())), "Insert(\"tag\")");
    }

    // --- wire form tests ---

    #[cfg(feature = "serde")]
    #[test]
    fn encodes_to_signed_count_or_string() {
        assert_eq!(serde_json::to_string(&Op::Retain(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Op::Delete(5)).unwrap(), "-5");
        assert_eq!(
            serde_json::to_string(&Op::Insert(b"lorem".to_vec())).unwrap(),
            "\"lorem\""
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decodes_signed_count_or_string() {
        assert_eq!(serde_json::from_str::<Op>("7").unwrap(), Op::Retain(7));
        assert_eq!(serde_json::from_str::<Op>("-5").unwrap(), Op::Delete(5));
        assert_eq!(
            serde_json::from_str::<Op>("\"lorem\"").unwrap(),
            Op::Insert(b"lorem".to_vec())
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decodes_zero_and_empty_string_to_noops() {
        assert!(serde_json::from_str::<Op>("0").unwrap().is_noop());
        assert!(serde_json::from_str::<Op>("\"\"").unwrap().is_noop());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn refuses_to_encode_non_utf8_insert() {
        let op = Op::Insert(vec![0xff, 0xfe]);
        assert!(serde_json::to_string(&op).is_err());
    }
}
