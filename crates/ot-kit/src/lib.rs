//! # ot-kit
//!
//! Server-authoritative operational transformation for real-time
//! collaborative text editing.
//!
//! Documents are byte buffers and edits are flat sequences of three step
//! kinds: retain, delete, insert. The algebra supplies the two combinators
//! every OT system is built from:
//!
//! * [`Ops::compose`] folds two consecutive edits into one equivalent edit.
//! * [`Ops::transform`] rebases two concurrent edits across each other so
//!   that both sides converge on the same document.
//!
//! On top of the algebra sit the two session roles: a [`Server`] that owns
//! the authoritative document and history and rebases whatever clients
//! submit, and a [`Client`] that applies local edits optimistically while
//! keeping at most one edit in flight.
//!
//! ## Quick Start
//!
//! ```
//! use ot_kit::prelude::*;
//!
//! // two clients edit the same document concurrently
//! let ours = Ops::new().retain(11).insert("!");
//! let theirs = Ops::new().retain(5).insert(" brave").retain(6);
//!
//! let (ours_rebased, theirs_rebased) = ours.transform(&theirs).unwrap();
//!
//! // either order of application produces the same document
//! let mut doc_a = Doc::from("hello world");
//! doc_a.apply(&ours).unwrap();
//! doc_a.apply(&theirs_rebased).unwrap();
//!
//! let mut doc_b = Doc::from("hello world");
//! doc_b.apply(&theirs).unwrap();
//! doc_b.apply(&ours_rebased).unwrap();
//!
//! assert_eq!(doc_a.as_bytes(), b"hello brave world!");
//! assert_eq!(doc_a, doc_b);
//! ```
//!
//! ## Wire Encoding
//!
//! With the `serde` feature enabled, a sequence serializes as a compact
//! array: retains are positive integers, deletes negative integers, inserts
//! strings.
//!
//! ```
//! # #[cfg(feature = "serde")] {
//! use ot_kit::Ops;
//!
//! let ops = Ops::new().retain(7).insert("lorem").delete(5);
//! assert_eq!(serde_json::to_string(&ops).unwrap(), r#"[7,"lorem",-5]"#);
//! # }
//! ```
//!
//! ## `no_std` Support
//!
//! The crate is `no_std` compatible and requires only `alloc`. Disable the
//! default `std` feature:
//!
//! ```toml
//! [dependencies]
//! ot-kit = { version = "0.1", default-features = false }
//! ```
//!
//! ## Feature Flags
//!
//! * `std` (default): implements [`std::error::Error`] for [`OtError`].
//! * `serde`: wire encoding for [`Op`], [`Ops`], and [`Snapshot`].

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod client;
mod compose;
mod diff;
mod doc;
mod error;
mod op;
mod ops;
mod server;
mod transform;

pub mod prelude;

pub use client::{Client, SendFn, SyncState};
pub use diff::diff;
pub use doc::Doc;
pub use error::OtError;
pub use op::Op;
pub use ops::{OpCounts, Ops};
pub use server::{Server, Snapshot};
