//! Generational sparse-set containers: stable handles over dense,
//! relocatable storage.
//!
//! Warren solves the classic problem of referencing mutable, relocating data
//! by a stable, validatable handle while keeping the backing storage dense
//! and cache-friendly. Insertion, lookup, and removal are O(1); removal
//! compacts by swap-remove, and every reuse of a raw id bumps a generation
//! counter so stale handles are rejected instead of aliasing new data.
//!
//! # Architecture
//!
//! ```text
//! SlotSet (engine: dense ↔ sparse index pair, generation bookkeeping)
//! ├── PagedSlotMap<T>  explicit ids, values in lazily allocated fixed pages
//! └── SlotList<T>      auto-assigned ids, values in one contiguous buffer
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use warren::SlotList;
//!
//! let mut list = SlotList::new();
//! let a = list.add("alpha");
//! let b = list.add("beta");
//!
//! // Handles survive compaction...
//! assert_eq!(list.remove_by_id(a), Some("alpha"));
//! assert_eq!(list.get(b), Some(&"beta"));
//!
//! // ...and stale handles never resolve, even after their raw id is reused.
//! let c = list.add("gamma");
//! assert_eq!(c.id(), a.id());
//! assert!(list.get(a).is_none());
//! ```
//!
//! Handles are opaque: store them, compare them, hand them back to the
//! container that issued them. Never synthesize one except through a
//! container's insertion API.
//!
//! All containers are single-threaded by design — wrap an instance in your
//! own lock if you need shared access.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod id;
pub mod list;
pub mod paged;
pub mod set;

pub use error::SetError;
pub use id::{DenseIndex, SlotId};
pub use list::SlotList;
pub use paged::PagedSlotMap;
pub use set::SlotSet;
