//! Paged keyed store: handles to values, storage in fixed-size pages.
//!
//! [`PagedSlotMap`] delegates all index bookkeeping to the sparse-set engine
//! in explicit mode and keeps values in lazily allocated pages of
//! `page_size` slots, located by `dense position / page_size`. Because dense
//! positions are occupied contiguously, each page fills front-to-back and a
//! page's length is exactly its occupied prefix; growing the page table
//! never relocates a stored value.

use std::ops::{Index, IndexMut};

use crate::error::SetError;
use crate::id::SlotId;
use crate::set::SlotSet;

/// An id-addressed associative store with paged dense value storage.
///
/// Keys are caller-supplied [`SlotId`]s (explicit insertion discipline).
/// Insertion, lookup, and removal are O(1); removal compacts by moving the
/// value at the last dense position into the vacated slot, mirroring the
/// engine's swap-remove.
///
/// Each page is allocated with exactly `page_size` capacity on first write
/// and never grows past it, so values stay put for the page's lifetime.
#[derive(Clone, Debug)]
pub struct PagedSlotMap<T> {
    pages: Vec<Vec<T>>,
    inner: SlotSet,
    page_size: usize,
}

impl<T> PagedSlotMap<T> {
    /// Default number of value slots per page.
    pub const DEFAULT_PAGE_SIZE: usize = 64;

    /// Smallest supported page size.
    pub const MIN_PAGE_SIZE: usize = 4;

    /// Create a store with the default page size.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            inner: SlotSet::with_capacity(Self::DEFAULT_PAGE_SIZE),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a store with a custom page size.
    ///
    /// Fails with [`SetError::PageSizeTooSmall`] when `page_size` is below
    /// [`MIN_PAGE_SIZE`](Self::MIN_PAGE_SIZE).
    pub fn with_page_size(page_size: usize) -> Result<Self, SetError> {
        if page_size < Self::MIN_PAGE_SIZE {
            return Err(SetError::PageSizeTooSmall {
                page_size,
                min: Self::MIN_PAGE_SIZE,
            });
        }
        Ok(Self {
            pages: Vec::new(),
            inner: SlotSet::with_capacity(page_size),
            page_size,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The configured page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Insert or overwrite the value for `id`.
    ///
    /// Keyed by raw id: when any generation of `id.id()` is live, the value
    /// there is overwritten and the entry keeps the handle it was first
    /// inserted under. Returns the dense position and the replaced value, if
    /// any.
    pub fn set_or_replace(&mut self, id: SlotId, value: T) -> (usize, Option<T>) {
        let (position, existing) = self.inner.set_add_or_get(id);
        if existing {
            let slot = &mut self.pages[position / self.page_size][position % self.page_size];
            (position, Some(std::mem::replace(slot, value)))
        } else {
            self.append(position, value);
            (position, None)
        }
    }

    /// Insert a new entry, failing on a duplicate.
    ///
    /// Fails with [`SetError::DuplicateId`] when the raw id is already live
    /// under *any* generation; the store is left untouched in that case.
    pub fn add(&mut self, id: SlotId, value: T) -> Result<usize, SetError> {
        if self.inner.has_raw_id(id.id()).is_some() {
            return Err(SetError::DuplicateId { id });
        }
        let (position, _) = self.inner.set_add_or_get(id);
        self.append(position, value);
        Ok(position)
    }

    /// Insert a new entry, reporting a duplicate as `None`.
    pub fn try_add(&mut self, id: SlotId, value: T) -> Option<usize> {
        self.add(id, value).ok()
    }

    /// The value for `id`, or `None` when absent or stale.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        let position = self.inner.has_id(id)?;
        Some(&self.pages[position / self.page_size][position % self.page_size])
    }

    /// Mutable access to the value for `id`, or `None` when absent or stale.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        let position = self.inner.has_id(id)?;
        Some(&mut self.pages[position / self.page_size][position % self.page_size])
    }

    /// The value at a dense position, bypassing id resolution.
    ///
    /// Intended for bulk iteration over `0..len`.
    ///
    /// # Panics
    ///
    /// Panics when `index >= len`.
    pub fn get_at(&self, index: usize) -> &T {
        assert!(
            index < self.len(),
            "index {index} out of range (len {})",
            self.len()
        );
        &self.pages[index / self.page_size][index % self.page_size]
    }

    /// Mutable access to the value at a dense position.
    ///
    /// # Panics
    ///
    /// Panics when `index >= len`.
    pub fn get_at_mut(&mut self, index: usize) -> &mut T {
        assert!(
            index < self.len(),
            "index {index} out of range (len {})",
            self.len()
        );
        &mut self.pages[index / self.page_size][index % self.page_size]
    }

    /// Remove the entry for `id`, returning its value.
    ///
    /// `None` when the handle is absent or stale. The value at the freed
    /// last position moves into the removed position, page-wise mirroring
    /// the engine's dense compaction.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let (position, last) = self.inner.remove_id(id)?;
        Some(self.take_and_compact(position, last))
    }

    /// Remove the entry at a dense position, returning its value.
    ///
    /// # Panics
    ///
    /// Panics when `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> T {
        let Some((_, last)) = self.inner.remove_at(index) else {
            panic!("index {index} out of range (len {})", self.len());
        };
        self.take_and_compact(index, last)
    }

    /// The dense position for `id`, or `None` when absent or stale.
    pub fn index_by_id(&self, id: SlotId) -> Option<usize> {
        self.inner.has_id(id)
    }

    /// The handle at a dense position, or `None` when out of range.
    pub fn id_by_index(&self, index: usize) -> Option<SlotId> {
        self.inner.has_index(index)
    }

    /// Whether `id` currently resolves to a live entry.
    pub fn contains_id(&self, id: SlotId) -> bool {
        self.inner.has_id(id).is_some()
    }

    /// Whether a dense position holds a live entry.
    pub fn contains_index(&self, index: usize) -> bool {
        self.inner.has_index(index).is_some()
    }

    /// Drop every entry, resetting to a fresh store of the same page size.
    pub fn clear(&mut self) {
        self.inner = SlotSet::with_capacity(self.page_size);
        self.pages = Vec::new();
    }

    /// Iterate `(handle, value)` entries in dense order.
    pub fn iter(&self) -> Entries<'_, T> {
        Entries {
            map: self,
            index: 0,
        }
    }

    /// Iterate the live handles in dense order.
    pub fn ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.inner.ids()
    }

    /// Iterate the values in dense order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|page| page.iter())
    }

    /// Iterate the allocated pages, each trimmed to its occupied prefix.
    ///
    /// Pages emptied by removals are skipped.
    pub fn pages(&self) -> impl Iterator<Item = &[T]> {
        self.pages
            .iter()
            .map(|page| page.as_slice())
            .filter(|page| !page.is_empty())
    }

    /// Write a freshly inserted value at its appended dense position.
    fn append(&mut self, position: usize, value: T) {
        let page = position / self.page_size;
        if page == self.pages.len() {
            self.pages.push(Vec::with_capacity(self.page_size));
        }
        debug_assert_eq!(self.pages[page].len(), position % self.page_size);
        self.pages[page].push(value);
    }

    /// Pop the value at the freed last position and, unless it was the
    /// removed position itself, swap it into the hole. Returns the removed
    /// value.
    fn take_and_compact(&mut self, position: usize, last: usize) -> T {
        let Some(tail) = self.pages[last / self.page_size].pop() else {
            unreachable!("engine reported an occupied last position {last}");
        };
        if position == last {
            return tail;
        }
        std::mem::replace(
            &mut self.pages[position / self.page_size][position % self.page_size],
            tail,
        )
    }
}

impl<T> Default for PagedSlotMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<SlotId> for PagedSlotMap<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics when `id` is absent or stale.
    fn index(&self, id: SlotId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("no entry for id {id}"),
        }
    }
}

impl<T> Index<usize> for PagedSlotMap<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get_at(index)
    }
}

impl<T> IndexMut<usize> for PagedSlotMap<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_at_mut(index)
    }
}

impl<'a, T> IntoIterator for &'a PagedSlotMap<T> {
    type Item = (SlotId, &'a T);
    type IntoIter = Entries<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(SlotId, &T)` entries of a [`PagedSlotMap`] in dense order.
pub struct Entries<'a, T> {
    map: &'a PagedSlotMap<T>,
    index: usize,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.map.id_by_index(self.index)?;
        let value = self.map.get_at(self.index);
        self.index += 1;
        Some((id, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.map.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}
