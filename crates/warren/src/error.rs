//! Container-specific error types.

use std::error::Error;
use std::fmt;

use crate::id::SlotId;

/// Errors raised by contract-violating container operations.
///
/// Expected misses (absent or stale handles) are *not* errors — lookups
/// return `Option` for those. This enum covers programmer mistakes:
/// out-of-range explicit ids, duplicate strict inserts, and invalid
/// construction parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetError {
    /// An explicit-mode raw id outside the current sparse range.
    IdOutOfRange {
        /// The offending raw id.
        id: u32,
        /// Current capacity of the sparse array.
        capacity: usize,
    },
    /// A resize target that does not exceed the current capacity.
    CapacityNotLarger {
        /// The requested capacity.
        requested: usize,
        /// The current capacity.
        current: usize,
    },
    /// A strict `add` for a raw id that is already live under some generation.
    DuplicateId {
        /// The handle that was already present.
        id: SlotId,
    },
    /// A page size below the supported minimum at construction.
    PageSizeTooSmall {
        /// The requested page size.
        page_size: usize,
        /// The smallest supported page size.
        min: usize,
    },
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdOutOfRange { id, capacity } => {
                write!(f, "id {id} out of range: sparse capacity is {capacity}")
            }
            Self::CapacityNotLarger { requested, current } => {
                write!(
                    f,
                    "new capacity {requested} does not exceed current capacity {current}"
                )
            }
            Self::DuplicateId { id } => {
                write!(f, "duplicate id: {id} is already present")
            }
            Self::PageSizeTooSmall { page_size, min } => {
                write!(f, "page size {page_size} is too small: minimum is {min}")
            }
        }
    }
}

impl Error for SetError {}
