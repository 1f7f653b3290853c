//! Slot handles and dense-position references.
//!
//! A [`SlotId`] is the stable identifier a container hands to its caller: a
//! raw id plus a generation counter that distinguishes successive reuses of
//! the same raw id. A [`DenseIndex`] is the container-internal reference into
//! compacted dense storage; it moves when other entries are removed, which is
//! why callers hold a `SlotId` instead.

use std::fmt;

/// Stable, generation-tagged identifier for an entry in a warren container.
///
/// Handles are opaque to callers: store them, compare them, and present them
/// back to the container that issued them. Generation 0 is the empty sentinel
/// ([`SlotId::EMPTY`]); live handles start at generation 1 and the generation
/// bumps by exactly 1 each time the raw id is reused after a removal, so a
/// stale handle compares unequal to its successor and never resolves again.
///
/// The generation counter wraps on overflow, skipping the 0 sentinel. A false
/// stale-match therefore requires 2^32 - 1 removals of the same raw id.
///
/// Ordering is by raw id first, then generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct SlotId {
    id: u32,
    generation: u32,
}

impl SlotId {
    /// The empty/invalid handle: generation 0, resolving nowhere.
    pub const EMPTY: SlotId = SlotId { id: 0, generation: 0 };

    /// Create a first-generation handle for the given raw id.
    ///
    /// This is the form explicit-mode insertion ([`PagedSlotMap::add`] and
    /// friends) expects as a key.
    ///
    /// [`PagedSlotMap::add`]: crate::PagedSlotMap::add
    pub fn new(id: u32) -> Self {
        Self { id, generation: 1 }
    }

    /// Create a handle with an explicit generation.
    pub(crate) fn with_generation(id: u32, generation: u32) -> Self {
        Self { id, generation }
    }

    /// The raw id component.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The generation component (0 means empty).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether this is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.generation == 0
    }

    /// The handle the raw id will carry on its next reuse.
    ///
    /// Wraps past `u32::MAX`, skipping the 0 sentinel.
    pub(crate) fn next_generation(self) -> Self {
        let bumped = self.generation.wrapping_add(1);
        Self {
            id: self.id,
            generation: if bumped == 0 { 1 } else { bumped },
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Empty")
        } else {
            write!(f, "{}:{}", self.id, self.generation)
        }
    }
}

/// Optional position into a container's dense storage.
///
/// Stored internally as `position + 1` so that the all-zeroes value is the
/// unambiguous empty sentinel; the encoding never leaks through the public
/// accessors. Ordering is by the raw stored value, which sorts the empty
/// sentinel first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DenseIndex(u32);

impl DenseIndex {
    /// The empty sentinel: refers to no dense position.
    pub const EMPTY: DenseIndex = DenseIndex(0);

    /// Create a reference to the given dense position.
    pub(crate) fn from_position(position: usize) -> Self {
        Self(position as u32 + 1)
    }

    /// The dense position, or `None` for the empty sentinel.
    pub fn position(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0 as usize - 1)
        }
    }

    /// Whether this is the empty sentinel.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for DenseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position() {
            Some(position) => write!(f, "{position}"),
            None => write!(f, "Empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_handle_starts_at_generation_one() {
        let h = SlotId::new(7);
        assert_eq!(h.id(), 7);
        assert_eq!(h.generation(), 1);
        assert!(!h.is_empty());
    }

    #[test]
    fn empty_sentinel() {
        assert!(SlotId::EMPTY.is_empty());
        assert_eq!(SlotId::EMPTY.to_string(), "Empty");
        assert!(DenseIndex::EMPTY.is_empty());
        assert_eq!(DenseIndex::EMPTY.position(), None);
    }

    #[test]
    fn next_generation_bumps_by_one() {
        let h = SlotId::new(3);
        let n = h.next_generation();
        assert_eq!(n.id(), 3);
        assert_eq!(n.generation(), 2);
        assert_ne!(h, n);
    }

    #[test]
    fn next_generation_wraps_past_sentinel() {
        let h = SlotId::with_generation(0, u32::MAX);
        assert_eq!(h.next_generation().generation(), 1);
    }

    #[test]
    fn ordering_is_id_then_generation() {
        let a = SlotId::with_generation(1, 2);
        let b = SlotId::with_generation(2, 1);
        let c = SlotId::with_generation(2, 2);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn display_renders_id_and_generation() {
        assert_eq!(SlotId::new(5).to_string(), "5:1");
        assert_eq!(SlotId::with_generation(7, 3).to_string(), "7:3");
    }

    #[test]
    fn dense_index_round_trip() {
        let i = DenseIndex::from_position(0);
        assert!(!i.is_empty());
        assert_eq!(i.position(), Some(0));
        assert_eq!(DenseIndex::from_position(41).position(), Some(41));
    }

    #[test]
    fn dense_index_orders_by_position_with_empty_first() {
        let empty = DenseIndex::EMPTY;
        let zero = DenseIndex::from_position(0);
        let one = DenseIndex::from_position(1);
        assert!(empty < zero);
        assert!(zero < one);
    }
}
