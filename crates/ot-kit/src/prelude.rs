//! A convenience module re-exporting the whole public surface.
//!
//! ```
//! use ot_kit::prelude::*;
//!
//! let mut doc = Doc::from("abc");
//! doc.apply(&Ops::new().retain(1).insert("tag").delete(2)).unwrap();
//! assert_eq!(doc.as_bytes(), b"atag");
//! ```

pub use crate::client::{Client, SendFn, SyncState};
pub use crate::diff::diff;
pub use crate::doc::Doc;
pub use crate::error::OtError;
pub use crate::op::Op;
pub use crate::ops::{OpCounts, Ops};
pub use crate::server::{Server, Snapshot};
