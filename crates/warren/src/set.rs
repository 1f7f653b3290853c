//! The sparse-set engine: dense/sparse index pair with generation tracking.
//!
//! [`SlotSet`] owns two parallel growable buffers. `dense` maps a compacted
//! position to the handle currently occupying it; `sparse` maps a raw id back
//! to that position. Removal is a swap-remove: the last live entry relocates
//! into the hole, and the next generation of the removed handle is pre-staged
//! at the vacated tail so a later reuse of the raw id yields a bumped
//! generation.
//!
//! The engine is pure index bookkeeping. [`SlotList`](crate::SlotList) and
//! [`PagedSlotMap`](crate::PagedSlotMap) layer value storage on top and move
//! their values in lockstep with the positions this type reports.

use crate::error::SetError;
use crate::id::{DenseIndex, SlotId};

/// Insertion discipline, tracked in debug builds only.
///
/// An engine instance must be driven through exactly one discipline for its
/// whole lifetime: either the engine assigns raw ids (`Auto`, via
/// [`SlotSet::list_add`]) or the caller supplies them (`Explicit`, via
/// [`SlotSet::set_add`] / [`SlotSet::set_add_or_get`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Discipline {
    Auto,
    Explicit,
}

/// Generational slot allocator over a dense/sparse index pair.
///
/// Positions in `[0, len)` are live and contiguous; every live position `p`
/// satisfies `sparse[dense[p].id()] == p`. Positions at or beyond `len` may
/// hold a pre-staged stale handle carrying the generation its raw id will
/// receive on reuse.
///
/// # Insertion disciplines
///
/// Auto-assign ([`list_add`](Self::list_add)) and explicit
/// ([`set_add`](Self::set_add) / [`set_add_or_get`](Self::set_add_or_get))
/// insertion must not be mixed on one instance. This is a precondition, not a
/// runtime guarantee; debug builds assert it, release builds pay nothing.
#[derive(Clone, Debug)]
pub struct SlotSet {
    dense: Vec<SlotId>,
    sparse: Vec<DenseIndex>,
    len: usize,
    #[cfg(debug_assertions)]
    discipline: Option<Discipline>,
}

impl SlotSet {
    /// Default capacity when none is given.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create an engine with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an engine sized for `capacity` raw ids and dense positions.
    ///
    /// A zero capacity falls back to the default.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            Self::DEFAULT_CAPACITY
        } else {
            capacity
        };
        Self {
            dense: vec![SlotId::EMPTY; capacity],
            sparse: vec![DenseIndex::EMPTY; capacity],
            len: 0,
            #[cfg(debug_assertions)]
            discipline: None,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no entries are live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current capacity of both buffers.
    pub fn capacity(&self) -> usize {
        self.dense.len()
    }

    /// Insert with an engine-assigned raw id. Auto-assign discipline.
    ///
    /// Returns the dense position and the issued handle. The lowest free raw
    /// id is reused: the first occupation of a dense slot mints
    /// `SlotId::new(position)`, later occupations reuse the stale handle
    /// pre-staged there by [`remove_id`](Self::remove_id), whose generation
    /// was already bumped. Grows (doubling) when full; never fails.
    pub fn list_add(&mut self) -> (usize, SlotId) {
        self.note_discipline(Discipline::Auto);
        if self.len == self.capacity() {
            self.grow();
        }
        let position = self.len;
        let staged = self.dense[position];
        let id = if staged.is_empty() {
            SlotId::new(position as u32)
        } else {
            staged
        };
        self.dense[position] = id;
        self.sparse[id.id() as usize] = DenseIndex::from_position(position);
        self.len += 1;
        (position, id)
    }

    /// Insert a caller-supplied raw id with generation 1. Explicit discipline.
    ///
    /// Fails with [`SetError::IdOutOfRange`] when `id` does not fit the
    /// current sparse range; callers grow first via
    /// [`scale_to`](Self::scale_to) or use
    /// [`set_add_or_get`](Self::set_add_or_get). The id must not already be
    /// live (precondition, not checked).
    pub fn set_add(&mut self, id: u32) -> Result<usize, SetError> {
        self.note_discipline(Discipline::Explicit);
        if id as usize >= self.capacity() {
            return Err(SetError::IdOutOfRange {
                id,
                capacity: self.capacity(),
            });
        }
        let position = self.len;
        self.dense[position] = SlotId::new(id);
        self.sparse[id as usize] = DenseIndex::from_position(position);
        self.len += 1;
        Ok(position)
    }

    /// Insert a caller-supplied handle, or find its raw id if already live.
    /// Explicit discipline with auto-grow.
    ///
    /// Grows the sparse range to the next power of two covering the raw id
    /// when needed. The probe is by raw-id liveness: any generation of a
    /// live raw id resolves to `(position, true)` without mutation, and the
    /// entry keeps the handle it was first inserted under. When the raw id
    /// is free the given handle is inserted verbatim and the result is
    /// `(position, false)`.
    pub fn set_add_or_get(&mut self, id: SlotId) -> (usize, bool) {
        self.note_discipline(Discipline::Explicit);
        let raw = id.id() as usize;
        if raw >= self.capacity() {
            self.resize_to(round_capacity(raw + 1));
        }
        if let Some(position) = self.sparse[raw].position() {
            return (position, true);
        }
        let position = self.len;
        self.dense[position] = id;
        self.sparse[raw] = DenseIndex::from_position(position);
        self.len += 1;
        (position, false)
    }

    /// Resolve a handle to its dense position.
    ///
    /// Out-of-range raw ids are a miss, not an error. A hit requires the
    /// sparse slot to be occupied *and* the dense entry there to equal the
    /// handle exactly — a stale handle (older generation of a reused raw id)
    /// never resolves.
    pub fn has_id(&self, id: SlotId) -> Option<usize> {
        let position = self.has_raw_id(id.id())?;
        if self.dense[position] == id {
            Some(position)
        } else {
            None
        }
    }

    /// Resolve a raw id to its dense position, ignoring the generation.
    ///
    /// A hit means *some* generation of `raw` is live right now. Containers
    /// that key on raw ids use this to detect occupation before inserting;
    /// handle validity checks go through [`has_id`](Self::has_id) instead.
    pub fn has_raw_id(&self, raw: u32) -> Option<usize> {
        let raw = raw as usize;
        if raw >= self.capacity() {
            return None;
        }
        self.sparse[raw].position()
    }

    /// The live handle at a dense position.
    ///
    /// `None` when the position is at or beyond [`len`](Self::len), or when
    /// the dense slot is (abnormally) empty.
    pub fn has_index(&self, index: usize) -> Option<SlotId> {
        if index >= self.len {
            return None;
        }
        let id = self.dense[index];
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    /// Remove by handle.
    ///
    /// Returns `(position, last_position)`: where the entry was, and the
    /// dense position vacated by the compaction (the value there moves into
    /// `position` in any container mirroring this engine). `None` when the
    /// handle does not currently resolve.
    pub fn remove_id(&mut self, id: SlotId) -> Option<(usize, usize)> {
        let position = self.has_id(id)?;
        let last = self.do_remove(position, id);
        Some((position, last))
    }

    /// Remove by dense position.
    ///
    /// Returns `(removed_handle, last_position)`, or `None` when the
    /// position is not live.
    pub fn remove_at(&mut self, index: usize) -> Option<(SlotId, usize)> {
        let id = self.has_index(index)?;
        let last = self.do_remove(index, id);
        Some((id, last))
    }

    /// Swap-remove core: relocate the tail into the hole and pre-stage the
    /// removed handle's next generation at the vacated tail.
    fn do_remove(&mut self, position: usize, id: SlotId) -> usize {
        self.len -= 1;
        let last = self.len;
        if last != position {
            let moved = self.dense[last];
            self.dense[position] = moved;
            self.sparse[moved.id() as usize] = DenseIndex::from_position(position);
        }
        self.dense[last] = id.next_generation();
        self.sparse[id.id() as usize] = DenseIndex::EMPTY;
        last
    }

    /// Grow to the next power of two above the current capacity.
    pub fn grow(&mut self) {
        self.resize_to(round_capacity(self.capacity() + 1));
    }

    /// Grow both buffers to at least `new_capacity` (rounded up to the next
    /// power of two), preserving all live and staged content.
    ///
    /// Fails with [`SetError::CapacityNotLarger`] unless `new_capacity`
    /// exceeds the current capacity.
    pub fn scale_to(&mut self, new_capacity: usize) -> Result<(), SetError> {
        if new_capacity <= self.capacity() {
            return Err(SetError::CapacityNotLarger {
                requested: new_capacity,
                current: self.capacity(),
            });
        }
        self.resize_to(round_capacity(new_capacity));
        Ok(())
    }

    fn resize_to(&mut self, new_capacity: usize) {
        debug_assert!(
            new_capacity > self.capacity(),
            "resize must grow: {} -> {new_capacity}",
            self.capacity()
        );
        self.dense.resize(new_capacity, SlotId::EMPTY);
        self.sparse.resize(new_capacity, DenseIndex::EMPTY);
    }

    /// Iterate the live handles in dense order.
    pub fn ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.dense[..self.len].iter().copied()
    }

    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    fn note_discipline(&mut self, discipline: Discipline) {
        #[cfg(debug_assertions)]
        {
            match self.discipline {
                None => self.discipline = Some(discipline),
                Some(first) => debug_assert_eq!(
                    first, discipline,
                    "auto-assign and explicit insertion cannot be mixed on one SlotSet"
                ),
            }
        }
    }
}

impl Default for SlotSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a minimum capacity up to the next power of two, in `usize` so raw
/// ids near `u32::MAX` stay representable on 64-bit targets.
fn round_capacity(min_capacity: usize) -> usize {
    min_capacity.next_power_of_two()
}
