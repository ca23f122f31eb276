//! A doubly-linked list stored in three parallel arrays (`data`,
//! `next`, and `prev`) that link to each other by index instead of by
//! pointer.
//!
//! Slot 0 is a sentinel that stands for both "before the first
//! element" and "after the last element", so the list is a ring and
//! insertion and removal never special-case the ends.
//!
//! As elements are removed, their slots are pushed onto a free chain
//! threaded through the same `next` array. That chain is used for new
//! elements before the arrays are grown, and when it runs dry the
//! arrays double in size.
//!
//! Handles returned by insertion are slot indices. They stay valid
//! until their element is removed or the list is
//! [`linearize`](struct.List.html#method.linearize)d.
//!
//! [`List::verify`](struct.List.html#method.verify) checks the
//! structure for corruption. Whether mutations run it on their own is
//! chosen with [`Checks`]. Diagnostic events are emitted through the
//! `log` facade.

mod config;
mod cursor;
mod error;
mod free_list;
mod handle;
mod iterators;
mod list;
mod snapshot;
mod store;
mod verify;

pub use crate::config::{Checks, Config, MIN_CAPACITY};
pub use crate::cursor::{Cursor, CursorMut};
pub use crate::error::{Error, LinkKind, Violation};
pub use crate::handle::Handle;
pub use crate::iterators::{Drain, Iter};
pub use crate::list::List;
pub use crate::snapshot::{RawParts, Snapshot};
