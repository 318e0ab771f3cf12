//! Errors surfaced by the algebra, the applicator, and the two roles.
//!
//! Every variant is a precondition violation: the inputs describe an edit that
//! cannot apply to the state it was given. None of them are retryable; the
//! only safe recovery for a live session is to refetch the authoritative
//! document and resubscribe.

use core::fmt;

/// Error returned when an operation sequence cannot be combined with, rebased
/// against, or applied to the state it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtError {
    /// Compose was given sequences that are not consecutive: the first
    /// sequence's target length differs from the second's base length.
    NotConsecutive,
    /// Transform was given sequences that are not concurrent: the two
    /// sequences have different base lengths.
    NotConcurrent,
    /// A compose or transform walk exhausted one sequence before the other,
    /// even though the length preconditions held.
    SequenceTooShort,
    /// An operation sequence was applied to a document of the wrong length.
    BaseLengthMismatch {
        /// Base length the sequence was built against.
        base: usize,
        /// Actual length of the document it was applied to.
        doc: usize,
    },
    /// A client submitted an edit against a revision the server has no
    /// record of.
    RevisionNotInHistory {
        /// Revision the client claimed its edit was computed against.
        rev: usize,
        /// The server's current revision.
        current: usize,
    },
    /// An acknowledgement arrived while no operation was awaiting one.
    NoPendingOperation,
}

impl fmt::Display for OtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConsecutive => write!(f, "compose requires consecutive operation sequences"),
            Self::NotConcurrent => write!(f, "transform requires concurrent operation sequences"),
            Self::SequenceTooShort => write!(f, "encountered a short operation sequence"),
            Self::BaseLengthMismatch { base, doc } => {
                write!(f, "base length {base} does not match document length {doc}")
            }
            Self::RevisionNotInHistory { rev, current } => {
                write!(f, "revision {rev} is not in history (current revision is {current})")
            }
            Self::NoPendingOperation => write!(f, "no pending operation to acknowledge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OtError {}
