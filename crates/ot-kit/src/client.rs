//! The client role and its synchronization state machine.

use alloc::boxed::Box;
use core::fmt;

use crate::doc::Doc;
use crate::error::OtError;
use crate::ops::Ops;
use crate::server::Snapshot;

/// Callback used by [`Client`] to submit an edit to the server, tagged with
/// the revision it was built against.
pub type SendFn = Box<dyn FnMut(usize, &Ops)>;

/// Where a client currently stands relative to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Every local edit has been acknowledged.
    Synchronized,
    /// One edit is in flight, nothing queued behind it.
    AwaitingAck,
    /// One edit is in flight and further local edits are composed into a
    /// buffer behind it.
    Buffering,
}

/// The client side of a collaborative session.
///
/// A client keeps at most one edit in flight. Local edits made while waiting
/// for the acknowledgement are composed into a single buffered sequence, and
/// server broadcasts are rebased past both before they touch the document.
/// That keeps the protocol to three messages: submit, acknowledge, broadcast.
///
/// # Example
///
/// ```
/// use ot_kit::{Client, Ops, SyncState};
///
/// let mut client = Client::new(Box::new(|rev, ops: &Ops| {
///     println!("submitting {ops:?} against revision {rev}");
/// }));
/// client.apply(Ops::new().insert("hello")).unwrap();
/// assert_eq!(client.state(), SyncState::AwaitingAck);
///
/// client.ack().unwrap();
/// assert_eq!(client.state(), SyncState::Synchronized);
/// assert_eq!(client.doc().as_bytes(), b"hello");
/// ```
pub struct Client {
    doc: Doc,
    rev: usize,
    wait: Option<Ops>,
    buf: Option<Ops>,
    send: SendFn,
}

impl Client {
    /// Creates a synchronized client over an empty document at revision 0.
    #[must_use]
    pub fn new(send: SendFn) -> Self {
        Client {
            doc: Doc::new(),
            rev: 0,
            wait: None,
            buf: None,
            send,
        }
    }

    /// Bootstraps a late-joining client from a server [`Snapshot`].
    ///
    /// # Errors
    ///
    /// [`OtError::BaseLengthMismatch`] when the snapshot sequence does not
    /// start from an empty document.
    pub fn from_snapshot(snapshot: Snapshot, send: SendFn) -> Result<Self, OtError> {
        let mut doc = Doc::new();
        doc.apply(&snapshot.ops)?;
        Ok(Client {
            doc,
            rev: snapshot.rev,
            wait: None,
            buf: None,
            send,
        })
    }

    /// The local replica of the document.
    #[must_use]
    pub fn doc(&self) -> &Doc {
        &self.doc
    }

    /// The latest server revision this client has incorporated.
    #[must_use]
    pub fn rev(&self) -> usize {
        self.rev
    }

    /// The edit currently in flight, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&Ops> {
        self.wait.as_ref()
    }

    /// The composed local edits queued behind the in-flight one, if any.
    #[must_use]
    pub fn buffered(&self) -> Option<&Ops> {
        self.buf.as_ref()
    }

    /// The current synchronization state.
    #[must_use]
    pub fn state(&self) -> SyncState {
        if self.buf.is_some() {
            SyncState::Buffering
        } else if self.wait.is_some() {
            SyncState::AwaitingAck
        } else {
            SyncState::Synchronized
        }
    }

    /// Applies a local edit.
    ///
    /// The document changes immediately. If no edit is in flight the sequence
    /// is submitted right away; otherwise it is composed into the buffer and
    /// submitted after the in-flight edit is acknowledged.
    ///
    /// # Errors
    ///
    /// [`OtError::BaseLengthMismatch`] when the sequence was not built
    /// against the current document; the client is unchanged. An error from
    /// the buffer composition means the caller fed inconsistent sequences,
    /// and the session is no longer trustworthy.
    pub fn apply(&mut self, ops: Ops) -> Result<(), OtError> {
        self.doc.apply(&ops)?;
        if let Some(buf) = &mut self.buf {
            *buf = buf.compose(&ops)?;
        } else if self.wait.is_some() {
            self.buf = Some(ops);
        } else {
            (self.send)(self.rev, &ops);
            self.wait = Some(ops);
        }
        Ok(())
    }

    /// Handles the server's acknowledgement of the in-flight edit.
    ///
    /// A buffered sequence, if present, becomes the next in-flight edit and
    /// is submitted against the revision the acknowledgement produced.
    ///
    /// # Errors
    ///
    /// [`OtError::NoPendingOperation`] when nothing was awaiting an
    /// acknowledgement; the client is unchanged.
    pub fn ack(&mut self) -> Result<(), OtError> {
        if let Some(buf) = self.buf.take() {
            (self.send)(self.rev + 1, &buf);
            self.wait = Some(buf);
        } else if self.wait.take().is_none() {
            return Err(OtError::NoPendingOperation);
        }
        self.rev += 1;
        Ok(())
    }

    /// Handles a broadcast of another client's edit.
    ///
    /// The incoming sequence is rebased past the in-flight and buffered
    /// edits, which are rebased past it in turn, then applied to the
    /// document.
    ///
    /// # Errors
    ///
    /// Any error from [`Ops::transform`] or [`Doc::apply`]. The server is
    /// authoritative, so a failure here means client and server have already
    /// diverged and the session should be abandoned.
    pub fn recv(&mut self, ops: Ops) -> Result<(), OtError> {
        let mut ops = ops;
        if let Some(wait) = &self.wait {
            let (rebased_wait, rebased_ops) = wait.transform(&ops)?;
            self.wait = Some(rebased_wait);
            ops = rebased_ops;
        }
        if let Some(buf) = &self.buf {
            let (rebased_buf, rebased_ops) = buf.transform(&ops)?;
            self.buf = Some(rebased_buf);
            ops = rebased_ops;
        }
        self.doc.apply(&ops)?;
        self.rev += 1;
        Ok(())
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("doc", &self.doc)
            .field("rev", &self.rev)
            .field("wait", &self.wait)
            .field("buf", &self.buf)
            .finish_non_exhaustive()
    }
}
