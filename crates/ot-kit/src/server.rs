//! The authoritative server role.

use alloc::vec::Vec;

use crate::doc::Doc;
use crate::error::OtError;
use crate::ops::Ops;

/// The server side of a collaborative session.
///
/// The server holds the authoritative document and the full edit history.
/// Every client edit arrives tagged with the revision it was built against;
/// [`recv`](Server::recv) rebases it over whatever landed in the meantime,
/// applies it, and hands back the rebased sequence for broadcast.
///
/// # Example
///
/// ```
/// use ot_kit::{Doc, Ops, Server};
///
/// let mut server = Server::new(Doc::from("abc"));
/// let (broadcast, rev) = server
///     .recv(0, Ops::new().retain(1).insert("tag").retain(2))
///     .unwrap();
/// assert_eq!(rev, 1);
/// assert_eq!(broadcast, Ops::new().retain(1).insert("tag").retain(2));
/// assert_eq!(server.doc().as_bytes(), b"atagbc");
/// ```
#[derive(Debug, Default)]
pub struct Server {
    doc: Doc,
    history: Vec<Ops>,
}

impl Server {
    /// Creates a server over an initial document, with an empty history.
    #[must_use]
    pub fn new(doc: Doc) -> Self {
        Server {
            doc,
            history: Vec::new(),
        }
    }

    /// The current revision: the number of operations applied so far.
    #[must_use]
    pub fn rev(&self) -> usize {
        self.history.len()
    }

    /// The authoritative document.
    #[must_use]
    pub fn doc(&self) -> &Doc {
        &self.doc
    }

    /// Every applied operation, oldest first. Index `i` holds the operation
    /// that produced revision `i + 1`.
    #[must_use]
    pub fn history(&self) -> &[Ops] {
        &self.history
    }

    /// Accepts a client edit built against revision `rev`.
    ///
    /// The edit is rebased over each operation the client had not seen,
    /// applied to the document, and appended to the history. Returns the
    /// rebased sequence, ready to broadcast to the other clients, along with
    /// the new revision; the originating client only needs an acknowledgement
    /// carrying that revision.
    ///
    /// # Errors
    ///
    /// * [`OtError::RevisionNotInHistory`] when `rev` lies beyond the current
    ///   revision.
    /// * Any error from [`Ops::transform`] or [`Doc::apply`], which means the
    ///   client sent a sequence inconsistent with the revision it claimed.
    ///   The document and history are untouched in every error case.
    pub fn recv(&mut self, rev: usize, ops: Ops) -> Result<(Ops, usize), OtError> {
        if rev > self.history.len() {
            return Err(OtError::RevisionNotInHistory {
                rev,
                current: self.history.len(),
            });
        }

        let mut ops = ops;
        for concurrent in &self.history[rev..] {
            let (rebased, _) = ops.transform(concurrent)?;
            ops = rebased;
        }

        self.doc.apply(&ops)?;
        self.history.push(ops.clone());
        Ok((ops, self.history.len()))
    }

    /// A self-contained snapshot of the current state, for bootstrapping a
    /// late-joining client without replaying the history.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let ops = if self.doc.is_empty() {
            Ops::new()
        } else {
            Ops::new().insert(self.doc.as_bytes())
        };
        Snapshot {
            rev: self.history.len(),
            ops,
        }
    }
}

/// A point-in-time capture of the server state.
///
/// `ops` rebuilds the document content when applied to an empty document, so
/// a snapshot travels over the same wire encoding as any other operation
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// The revision the snapshot was taken at.
    pub rev: usize,
    /// A sequence that recreates the content from an empty document.
    pub ops: Ops,
}
