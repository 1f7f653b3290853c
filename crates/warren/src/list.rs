//! Compacting list: auto-assigned handles over one contiguous buffer.
//!
//! [`SlotList`] pairs the sparse-set engine in auto-assign mode with a single
//! growable value buffer. Values stay dense and iteration order follows the
//! dense positions, but positions are not stable across removals — hold the
//! returned [`SlotId`] for stable addressing.

use std::ops::{Index, IndexMut};

use crate::id::SlotId;
use crate::set::SlotSet;

/// An unordered list with O(1) insert, lookup, and swap-remove, addressed by
/// stable generational handles.
///
/// [`add`](Self::add) assigns the lowest free raw id and returns its handle;
/// removal moves the last value into the hole (classic swap-pop), so dense
/// positions shift while handles keep resolving.
#[derive(Clone, Debug)]
pub struct SlotList<T> {
    values: Vec<T>,
    inner: SlotSet,
    initial_capacity: usize,
}

impl<T> SlotList<T> {
    /// Default initial capacity.
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Create an empty list with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an empty list sized for `capacity` entries.
    ///
    /// A zero capacity falls back to the default.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            Self::DEFAULT_CAPACITY
        } else {
            capacity
        };
        Self {
            values: Vec::with_capacity(capacity),
            inner: SlotSet::with_capacity(capacity),
            initial_capacity: capacity,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Current capacity of the value buffer.
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Append a value, returning its handle.
    ///
    /// Raw ids freed by removals are reused with a bumped generation.
    pub fn add(&mut self, value: T) -> SlotId {
        let (position, id) = self.inner.list_add();
        debug_assert_eq!(position, self.values.len());
        self.values.push(value);
        id
    }

    /// Remove by handle, returning the value.
    ///
    /// `None` when the handle is absent or stale.
    pub fn remove_by_id(&mut self, id: SlotId) -> Option<T> {
        let (position, _) = self.inner.remove_id(id)?;
        Some(self.values.swap_remove(position))
    }

    /// Remove by dense position, returning the value.
    ///
    /// # Panics
    ///
    /// Panics when `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> T {
        if self.inner.remove_at(index).is_none() {
            panic!("index {index} out of range (len {})", self.len());
        }
        self.values.swap_remove(index)
    }

    /// Whether `id` currently resolves to a live entry.
    pub fn contains_id(&self, id: SlotId) -> bool {
        self.inner.has_id(id).is_some()
    }

    /// The value for `id`, or `None` when absent or stale.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        let position = self.inner.has_id(id)?;
        Some(&self.values[position])
    }

    /// Mutable access to the value for `id`, or `None` when absent or stale.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        let position = self.inner.has_id(id)?;
        Some(&mut self.values[position])
    }

    /// The dense position for `id`, or `None` when absent or stale.
    pub fn index_by_id(&self, id: SlotId) -> Option<usize> {
        self.inner.has_id(id)
    }

    /// The handle at a dense position, or `None` when out of range.
    pub fn id_by_index(&self, index: usize) -> Option<SlotId> {
        self.inner.has_index(index)
    }

    /// The values as one contiguous slice in dense order.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// The values as one contiguous mutable slice in dense order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Iterate the values in dense order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Iterate the live handles in dense order.
    pub fn ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.inner.ids()
    }

    /// Iterate `(handle, value)` entries in dense order.
    pub fn entries(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.inner.ids().zip(self.values.iter())
    }

    /// Drop every entry, resetting to a fresh list of the construction-time
    /// capacity.
    pub fn clear(&mut self) {
        self.values = Vec::with_capacity(self.initial_capacity);
        self.inner = SlotSet::with_capacity(self.initial_capacity);
    }
}

impl<T: PartialEq> SlotList<T> {
    /// The dense position of the first value equal to `value`.
    ///
    /// Linear scan; a convenience, not a fast path.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

impl<T> Default for SlotList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for SlotList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T> IndexMut<usize> for SlotList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}

impl<'a, T> IntoIterator for &'a SlotList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for SlotList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> FromIterator<T> for SlotList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_insertion_order() {
        let list: SlotList<i32> = (0..10).collect();
        assert_eq!(list.len(), 10);
        assert_eq!(list.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn remove_by_id_swap_pops() {
        let mut list = SlotList::new();
        list.add(123);
        let id = list.add(456);
        list.add(789);
        assert_eq!(list.remove_by_id(id), Some(456));
        list.add(456);
        assert_eq!(list.as_slice(), &[123, 789, 456]);
    }

    #[test]
    fn remove_by_stale_id_is_none() {
        let mut list = SlotList::new();
        let id = list.add(1);
        assert_eq!(list.remove_by_id(id), Some(1));
        assert_eq!(list.remove_by_id(id), None);
        // The reused raw id does not resurrect the stale handle.
        list.add(2);
        assert_eq!(list.remove_by_id(id), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_at_returns_the_value() {
        let mut list = SlotList::new();
        list.add(123);
        list.add(456);
        list.add(789);
        assert_eq!(list.remove_at(1), 456);
        assert_eq!(list.as_slice(), &[123, 789]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn remove_at_out_of_range_panics() {
        let mut list = SlotList::<i32>::new();
        list.remove_at(0);
    }

    #[test]
    fn lookups_follow_relocation() {
        let mut list = SlotList::new();
        let a = list.add(10);
        let b = list.add(20);
        let c = list.add(30);
        assert_eq!(list.remove_by_id(a), Some(10));
        // c moved into position 0.
        assert_eq!(list.index_by_id(c), Some(0));
        assert_eq!(list.index_by_id(b), Some(1));
        assert_eq!(list.get(c), Some(&30));
        assert_eq!(list.id_by_index(0), Some(c));
    }

    #[test]
    fn get_mut_writes_through_the_handle() {
        let mut list = SlotList::new();
        let id = list.add(1);
        *list.get_mut(id).unwrap() = 99;
        assert_eq!(list[0], 99);
    }

    #[test]
    fn index_of_scans_by_value() {
        let mut list = SlotList::new();
        list.add("a");
        list.add("b");
        assert_eq!(list.index_of(&"b"), Some(1));
        assert_eq!(list.index_of(&"z"), None);
    }

    #[test]
    fn entries_pair_handles_with_values() {
        let mut list = SlotList::new();
        let a = list.add(10);
        let b = list.add(20);
        let entries: Vec<(SlotId, &i32)> = list.entries().collect();
        assert_eq!(entries, vec![(a, &10), (b, &20)]);
    }

    #[test]
    fn clear_resets_and_restarts_ids() {
        let mut list = SlotList::new();
        for i in 0..100 {
            list.add(i);
        }
        list.clear();
        assert!(list.is_empty());
        let id = list.add(7);
        assert_eq!(id, SlotId::new(0));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn extend_appends_in_order() {
        let mut list = SlotList::new();
        list.add(0);
        list.extend([1, 2, 3]);
        assert_eq!(list.as_slice(), &[0, 1, 2, 3]);
    }
}
