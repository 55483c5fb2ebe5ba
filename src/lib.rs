//! A growable list whose storage is split into fixed-size segments.
//!
//! `SegmentedList` behaves like `Vec` with the list operations of a
//! conventional array list (positional insert/remove, range removal,
//! searching, sorting, predicate scans), but never allocates one large
//! contiguous block. Elements live in segments whose byte size stays below a
//! configurable large-allocation threshold. Growing the list keeps every full
//! segment where it is; only the trailing partial segment may be resized.
//!
//! Every length-changing mutation advances a version counter. Enumerators
//! obtained from a [`SharedList`] capture that version and fail fast with
//! [`Error::Modified`] once the list changes under them.
//!
//! # Example
//!
//! ```
//! use segmented_list::SegmentedList;
//!
//! let mut list: SegmentedList<i32> = SegmentedList::new();
//! list.add(1);
//! list.add(2);
//! list.add(3);
//! list.insert(1, 9).unwrap();
//! assert_eq!(list, [1, 9, 2, 3]);
//!
//! list.remove_at(0).unwrap();
//! list.sort();
//! assert_eq!(list, [2, 3, 9]);
//! assert_eq!(list.binary_search(&2), Ok(0));
//! ```

mod capability;
mod config;
mod enumerator;
mod error;
mod into_iter;
mod iter;
mod read_only;
mod shared;
mod sort;
mod store;

pub use capability::{Collection, Cursor, Enumerable, IndexedList};
pub use config::{
    CurrentPolicy, EnumeratorOptions, SegmentConfig, ARRAY_HEADER_BYTES, DEFAULT_CAPACITY,
    DEFAULT_LARGE_ALLOCATION_THRESHOLD, MIN_SEGMENT_SIZE,
};
pub use enumerator::{Enumerator, ListCursor};
pub use error::{Error, ErrorKind, Result};
pub use into_iter::IntoIter;
pub use iter::{Iter, IterMut};
pub use read_only::{ListHandle, ReadOnlyList};
pub use shared::SharedList;
pub use store::{SegmentBlock, SegmentedStore};

use allocator_api2::alloc::{Allocator, Global};
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

/// A growable list stored in fixed-size segments.
///
/// # Memory Layout
///
/// Every segment except the last holds exactly
/// [`segment_size`](Self::segment_size) slots, a power of two derived from
/// the element size and the list's [`SegmentConfig`]. Index translation is a
/// shift and a mask. The last segment holds whatever remainder brings the
/// total to [`capacity`](Self::capacity).
pub struct SegmentedList<T, A: Allocator + Clone = Global> {
    /// Segment storage and live element count
    store: SegmentedStore<T, A>,
    /// Bumped on every length-changing mutation
    version: u64,
}

impl<T> SegmentedList<T> {
    /// Creates a new empty `SegmentedList`.
    ///
    /// Does not allocate until elements are added.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_list::SegmentedList;
    /// let list: SegmentedList<i32> = SegmentedList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates a new `SegmentedList` with exactly the given capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_list::SegmentedList;
    /// let list: SegmentedList<i32> = SegmentedList::with_capacity(100);
    /// assert_eq!(list.capacity(), 100);
    /// assert_eq!(list.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a new empty `SegmentedList` whose segments are sized by `config`.
    #[inline]
    pub const fn with_config(config: SegmentConfig) -> Self {
        Self::with_config_in(config, Global)
    }

    /// Creates a list sized by `config` with exactly `capacity` slots.
    pub fn with_capacity_and_config(capacity: usize, config: SegmentConfig) -> Self {
        let mut list = Self::with_config(config);
        list.store.grow(capacity);
        list
    }
}

impl<T, A: Allocator + Clone> SegmentedList<T, A> {
    /// Creates a new empty list that allocates from `alloc`.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Self::with_config_in(SegmentConfig::DEFAULT, alloc)
    }

    /// Creates a new empty list sized by `config` that allocates from `alloc`.
    #[inline]
    pub const fn with_config_in(config: SegmentConfig, alloc: A) -> Self {
        Self {
            store: SegmentedStore::new_in(config, alloc),
            version: 0,
        }
    }

    /// Creates a list with exactly `capacity` slots that allocates from `alloc`.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        let mut list = Self::new_in(alloc);
        list.store.grow(capacity);
        list
    }

    /// Creates a list holding the items of `iter`, in iteration order.
    pub fn from_iter_in<I: IntoIterator<Item = T>>(iter: I, alloc: A) -> Self {
        let mut list = Self::new_in(alloc);
        list.add_range(iter);
        list
    }

    /// An empty list with the same configuration and allocator.
    pub(crate) fn empty_like<U>(&self) -> SegmentedList<U, A> {
        SegmentedList::with_config_in(self.store.config(), self.store.allocator().clone())
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the number of slots currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns the number of elements per full segment.
    #[inline]
    pub fn segment_size(&self) -> usize {
        self.store.segment_size()
    }

    /// Returns the configuration the list was created with.
    #[inline]
    pub fn config(&self) -> SegmentConfig {
        self.store.config()
    }

    /// Returns the underlying segment storage.
    #[inline]
    pub fn store(&self) -> &SegmentedStore<T, A> {
        &self.store
    }

    /// Returns the structural version, advanced by every length change.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Overrides the version after a compound edit made of several steps.
    pub(crate) fn restore_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Resizes the storage to exactly `capacity` slots.
    ///
    /// Fails with [`Error::OutOfRange`] if `capacity` is less than the length.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity < self.len() {
            return Err(Error::out_of_range("capacity", capacity, self.len()));
        }
        if capacity != self.capacity() {
            self.store.resize(capacity);
        }
        Ok(())
    }

    /// Ensures the list can hold at least `min` elements and returns the new capacity.
    ///
    /// Growth at least doubles the capacity, starts at [`DEFAULT_CAPACITY`],
    /// and is rounded up to a whole number of segments once the list spans
    /// more than one segment. Never shrinks.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_list::{SegmentedList, DEFAULT_CAPACITY};
    /// let mut list: SegmentedList<u64> = SegmentedList::new();
    /// assert_eq!(list.ensure_capacity(1), DEFAULT_CAPACITY);
    /// assert_eq!(list.ensure_capacity(1), DEFAULT_CAPACITY);
    /// ```
    pub fn ensure_capacity(&mut self, min: usize) -> usize {
        if self.capacity() < min {
            let target = self.grown_capacity(min);
            self.store.grow(target);
        }
        self.capacity()
    }

    fn grown_capacity(&self, min: usize) -> usize {
        let capacity = self.capacity();
        let doubled = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity.saturating_mul(2)
        };
        let target = doubled.max(min);

        let segment_size = self.segment_size();
        if target > segment_size {
            target.div_ceil(segment_size).saturating_mul(segment_size)
        } else {
            target
        }
    }

    /// Shrinks the capacity to the length if less than 90% of it is used.
    pub fn trim_excess(&mut self) {
        let capacity = self.capacity();
        let threshold = capacity - capacity / 10;
        if self.len() < threshold {
            self.store.shrink(self.len());
        }
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.store.get(index)
    }

    /// Returns a mutable reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.store.get_mut(index)
    }

    /// Returns the element at `index`, or [`Error::OutOfRange`].
    pub fn try_get(&self, index: usize) -> Result<&T> {
        self.store
            .get(index)
            .ok_or(Error::out_of_range("index", index, self.len()))
    }

    /// Replaces the element at `index` and returns the old one.
    ///
    /// Overwriting does not change the version, so enumerators stay valid.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let len = self.len();
        match self.store.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(Error::out_of_range("index", index, len)),
        }
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.store.get(0)
    }

    /// Returns a reference to the last element, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.store.get(i))
    }

    /// Appends an element to the back of the list.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_list::SegmentedList;
    /// let mut list: SegmentedList<i32> = SegmentedList::new();
    /// list.add(1);
    /// list.add(2);
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn add(&mut self, value: T) {
        self.reserve_one();
        self.store.push(value);
        self.bump_version();
    }

    #[inline]
    fn reserve_one(&mut self) {
        if self.len() == self.capacity() {
            let target = self.grown_capacity(self.len() + 1);
            self.store.grow(target);
        }
    }

    /// Inserts an element at `index`, shifting everything after it to the right.
    ///
    /// Fails with [`Error::OutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len() {
            return Err(Error::out_of_range("index", index, self.len()));
        }
        self.reserve_one();
        self.store.insert(index, value);
        self.bump_version();
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// Fails with [`Error::OutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(Error::out_of_range("index", index, self.len()));
        }
        let removed = self.store.remove(index);
        self.bump_version();
        Ok(removed)
    }

    /// Removes `count` elements starting at `index`.
    ///
    /// Fails with [`Error::InvalidRange`] if the range runs past the end.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<()> {
        self.check_range(index, count)?;
        if count > 0 {
            self.store.remove_range(index, count);
            self.bump_version();
        }
        Ok(())
    }

    /// Removes the first element equal to `value`. Returns whether one was found.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => {
                self.store.remove(index);
                self.bump_version();
                true
            }
            None => false,
        }
    }

    /// Removes every element matching `pred` and returns how many were removed.
    ///
    /// Survivors keep their relative order.
    pub fn remove_all<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let len = self.len();
        let mut free = 0;
        while free < len && !pred(self.store.at(free)) {
            free += 1;
        }
        if free >= len {
            return 0;
        }

        let mut current = free + 1;
        while current < len {
            while current < len && pred(self.store.at(current)) {
                current += 1;
            }
            if current < len {
                self.store.swap(free, current);
                free += 1;
                current += 1;
            }
        }

        self.store.truncate(free);
        self.bump_version();
        len - free
    }

    /// Removes all elements. The capacity is kept.
    pub fn clear(&mut self) {
        self.store.truncate(0);
        self.bump_version();
    }

    /// Shortens the list to `len` elements, dropping the rest.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            self.store.truncate(len);
            self.bump_version();
        }
    }

    /// Appends every item of `items` in order.
    pub fn add_range<I: IntoIterator<Item = T>>(&mut self, items: I) {
        let index = self.len();
        self.splice_in(index, items);
    }

    /// Inserts every item of `items` at `index`, in order.
    ///
    /// Fails with [`Error::OutOfRange`] if `index > len`.
    pub fn insert_range<I>(&mut self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len() {
            return Err(Error::out_of_range("index", index, self.len()));
        }
        self.splice_in(index, items);
        Ok(())
    }

    /// Appends the items, then rotates them into place at `index`.
    fn splice_in<I: IntoIterator<Item = T>>(&mut self, index: usize, items: I) {
        let old_len = self.len();
        let items = items.into_iter();
        let (lower, _) = items.size_hint();
        if lower > 0 {
            self.ensure_capacity(old_len.saturating_add(lower));
        }

        for item in items {
            self.reserve_one();
            self.store.push(item);
        }

        let added = self.len() - old_len;
        if added > 0 {
            self.store.rotate_right(index, self.len(), added);
            self.bump_version();
        }
    }

    /// Swaps two elements.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        assert!(a < self.len() && b < self.len(), "index out of bounds");
        if a != b {
            self.store.swap(a, b);
        }
    }

    /// Any window reaching past the end is an invalid range, even an empty
    /// one starting beyond it.
    fn check_range(&self, index: usize, count: usize) -> Result<()> {
        match index.checked_add(count) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(Error::InvalidRange {
                index,
                count,
                len: self.len(),
            }),
        }
    }

    fn position_in<F>(&self, start: usize, count: usize, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        (start..start + count).find(|&i| pred(self.store.at(i)))
    }

    /// Searches `[end + 1 - count, end]` backwards.
    fn rposition_in<F>(&self, end: usize, count: usize, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        if count == 0 {
            return None;
        }
        (end + 1 - count..=end)
            .rev()
            .find(|&i| pred(self.store.at(i)))
    }

    /// Returns `true` if the list contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.store
            .segments()
            .iter()
            .any(|block| block.as_slice().contains(value))
    }

    /// Returns the index of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.position_in(0, self.len(), |item| item == value)
    }

    /// Returns the index of the first element equal to `value` at or after `start`.
    ///
    /// Fails with [`Error::OutOfRange`] if `start > len`.
    pub fn index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        if start > self.len() {
            return Err(Error::out_of_range("start", start, self.len()));
        }
        Ok(self.position_in(start, self.len() - start, |item| item == value))
    }

    /// Returns the index of the first element equal to `value` in `[start, start + count)`.
    pub fn index_of_in(&self, value: &T, start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.check_forward_window(start, count)?;
        Ok(self.position_in(start, count, |item| item == value))
    }

    /// Returns the index of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.rposition_in(len - 1, len, |item| item == value)
    }

    /// Returns the index of the last element equal to `value` at or before `start`.
    ///
    /// Fails with [`Error::OutOfRange`] if `start >= len`.
    pub fn last_index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        if start >= self.len() {
            return Err(Error::out_of_range("start", start, self.len()));
        }
        Ok(self.rposition_in(start, start + 1, |item| item == value))
    }

    /// Searches backwards from `start` through `count` elements.
    ///
    /// An empty list always yields `Ok(None)`.
    pub fn last_index_of_in(&self, value: &T, start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        if self.is_empty() {
            return Ok(None);
        }
        self.check_backward_window(start, count)?;
        Ok(self.rposition_in(start, count, |item| item == value))
    }

    fn check_forward_window(&self, start: usize, count: usize) -> Result<()> {
        if start > self.len() {
            return Err(Error::out_of_range("start", start, self.len()));
        }
        if count > self.len() - start {
            return Err(Error::out_of_range("count", count, self.len() - start));
        }
        Ok(())
    }

    fn check_backward_window(&self, start: usize, count: usize) -> Result<()> {
        if start >= self.len() {
            return Err(Error::out_of_range("start", start, self.len()));
        }
        if count > start + 1 {
            return Err(Error::out_of_range("count", count, start + 1));
        }
        Ok(())
    }

    /// Returns the first element matching `pred`.
    pub fn find<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|item| pred(item))
    }

    /// Returns the last element matching `pred`.
    pub fn find_last<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().rev().find(|item| pred(item))
    }

    /// Returns the index of the first element matching `pred`.
    pub fn find_index<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.position_in(0, self.len(), pred)
    }

    /// Returns the index of the first element at or after `start` matching `pred`.
    pub fn find_index_from<F>(&self, start: usize, pred: F) -> Result<Option<usize>>
    where
        F: FnMut(&T) -> bool,
    {
        if start > self.len() {
            return Err(Error::out_of_range("start", start, self.len()));
        }
        Ok(self.position_in(start, self.len() - start, pred))
    }

    /// Returns the index of the first element in `[start, start + count)` matching `pred`.
    pub fn find_index_in<F>(&self, start: usize, count: usize, pred: F) -> Result<Option<usize>>
    where
        F: FnMut(&T) -> bool,
    {
        self.check_forward_window(start, count)?;
        Ok(self.position_in(start, count, pred))
    }

    /// Returns the index of the last element matching `pred`.
    pub fn find_last_index<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.rposition_in(len - 1, len, pred)
    }

    /// Returns the index of the last element at or before `start` matching `pred`.
    pub fn find_last_index_from<F>(&self, start: usize, pred: F) -> Result<Option<usize>>
    where
        F: FnMut(&T) -> bool,
    {
        self.find_last_index_in(start, start.saturating_add(1), pred)
    }

    /// Searches backwards from `start` through `count` elements for `pred`.
    pub fn find_last_index_in<F>(
        &self,
        start: usize,
        count: usize,
        pred: F,
    ) -> Result<Option<usize>>
    where
        F: FnMut(&T) -> bool,
    {
        self.check_backward_window(start, count)?;
        Ok(self.rposition_in(start, count, pred))
    }

    /// Returns a new list holding clones of every element matching `pred`.
    pub fn find_all<F>(&self, mut pred: F) -> SegmentedList<T, A>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut found = self.empty_like();
        found.add_range(self.iter().filter(|item| pred(item)).cloned());
        found
    }

    /// Returns `true` if any element matches `pred`.
    pub fn exists<F>(&self, pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.find_index(pred).is_some()
    }

    /// Returns `true` if every element matches `pred` (vacuously true when empty).
    pub fn true_for_all<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().all(|item| pred(item))
    }

    /// Calls `action` on every element in order.
    pub fn for_each<F>(&self, action: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(action);
    }

    /// Returns a new list of the converted elements, in the same order.
    pub fn convert_all<U, F>(&self, converter: F) -> SegmentedList<U, A>
    where
        F: FnMut(&T) -> U,
    {
        let mut converted = self.empty_like();
        converted.store.grow(self.len());
        converted.add_range(self.iter().map(converter));
        converted
    }

    /// Returns a copy of `count` elements starting at `index`.
    pub fn get_range(&self, index: usize, count: usize) -> Result<SegmentedList<T, A>>
    where
        T: Clone,
    {
        self.check_range(index, count)?;
        let mut range = self.empty_like();
        range.store.grow(count);
        range.add_range((index..index + count).map(|i| self.store.at(i).clone()));
        Ok(range)
    }

    /// Copies the list into a standard `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Copies every element into `dest` starting at `start`.
    ///
    /// Fails with [`Error::OutOfRange`] if `start > dest.len()` and with
    /// [`Error::InvalidRange`] if the elements do not fit.
    pub fn copy_to(&self, dest: &mut [T], start: usize) -> Result<()>
    where
        T: Clone,
    {
        self.copy_range_to(0, dest, start, self.len())
    }

    /// Copies `count` elements starting at `index` into `dest` at `dest_start`.
    pub fn copy_range_to(
        &self,
        index: usize,
        dest: &mut [T],
        dest_start: usize,
        count: usize,
    ) -> Result<()>
    where
        T: Clone,
    {
        self.check_range(index, count)?;
        if dest_start > dest.len() {
            return Err(Error::out_of_range("dest_start", dest_start, dest.len()));
        }
        if count > dest.len() - dest_start {
            return Err(Error::InvalidRange {
                index: dest_start,
                count,
                len: dest.len(),
            });
        }
        for (offset, slot) in dest[dest_start..dest_start + count].iter_mut().enumerate() {
            slot.clone_from(self.store.at(index + offset));
        }
        Ok(())
    }

    /// Returns a read-only view of this list.
    pub fn as_read_only(&self) -> ReadOnlyList<&Self> {
        ReadOnlyList::new(self)
    }

    /// Returns an iterator over references to the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(self.store.segments(), self.len())
    }

    /// Returns an iterator over mutable references to the elements.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, A> {
        let len = self.len();
        IterMut::new(self.store.segments_mut(), len)
    }
}

// Ordering operations
impl<T, A: Allocator + Clone> SegmentedList<T, A> {
    /// Reverses the order of the elements.
    pub fn reverse(&mut self) {
        let len = self.len();
        self.store.reverse(0, len);
    }

    /// Reverses `count` elements starting at `index`.
    pub fn reverse_range(&mut self, index: usize, count: usize) -> Result<()> {
        self.check_range(index, count)?;
        self.store.reverse(index, index + count);
        Ok(())
    }

    /// Sorts the list. The sort is not stable.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Sorts the list with a comparison function. The sort is not stable.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let len = self.len();
        sort::sort_range(&mut self.store, 0, len, &mut compare);
    }

    /// Sorts the list by a key extraction function. The sort is not stable.
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.sort_by(|a, b| f(a).cmp(&f(b)));
    }

    /// Sorts `count` elements starting at `index`.
    pub fn sort_range<F>(&mut self, index: usize, count: usize, mut compare: F) -> Result<()>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.check_range(index, count)?;
        sort::sort_range(&mut self.store, index, index + count, &mut compare);
        Ok(())
    }

    /// Binary search for `x` in a sorted list.
    ///
    /// Returns `Ok(index)` of a matching element, or `Err(index)` of the
    /// position where `x` could be inserted to keep the list sorted.
    pub fn binary_search(&self, x: &T) -> std::result::Result<usize, usize>
    where
        T: Ord,
    {
        self.binary_search_by(|item| item.cmp(x))
    }

    /// Binary search using a comparison function.
    ///
    /// Locates the segment whose first element is not greater than the
    /// target, then searches that segment's slice directly.
    pub fn binary_search_by<F>(&self, mut f: F) -> std::result::Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        let segments = self.store.segments();
        let live = segments.iter().take_while(|block| block.live() > 0).count();
        if live == 0 {
            return Err(0);
        }

        // First segment whose head compares greater than the target.
        let after = segments[..live]
            .partition_point(|block| f(&block.as_slice()[0]) != Ordering::Greater);
        if after == 0 {
            return Err(0);
        }

        let segment = after - 1;
        let base = segment * self.segment_size();
        match segments[segment].as_slice().binary_search_by(&mut f) {
            Ok(pos) => Ok(base + pos),
            Err(pos) => Err(base + pos),
        }
    }

    /// Binary search using a key extraction function.
    pub fn binary_search_by_key<B, F>(&self, b: &B, mut f: F) -> std::result::Result<usize, usize>
    where
        F: FnMut(&T) -> B,
        B: Ord,
    {
        self.binary_search_by(|k| f(k).cmp(b))
    }

    /// Binary search within `count` elements starting at `index`.
    ///
    /// Fails with [`Error::InvalidRange`] if the range runs past the end.
    pub fn binary_search_in<F>(
        &self,
        index: usize,
        count: usize,
        mut f: F,
    ) -> Result<std::result::Result<usize, usize>>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.check_range(index, count)?;
        let mut left = index;
        let mut right = index + count;
        while left < right {
            let mid = left + (right - left) / 2;
            match f(self.store.at(mid)) {
                Ordering::Less => left = mid + 1,
                Ordering::Greater => right = mid,
                Ordering::Equal => return Ok(Ok(mid)),
            }
        }
        Ok(Err(left))
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for SegmentedList<T, A> {
    /// Clones into a list whose capacity equals the length.
    fn clone(&self) -> Self {
        let mut list = self.empty_like();
        list.store.grow(self.len());
        for block in self.store.segments() {
            for item in block.as_slice() {
                list.store.push(item.clone());
            }
        }
        list
    }
}

impl<T: PartialEq, A: Allocator + Clone, B: Allocator + Clone> PartialEq<SegmentedList<T, B>>
    for SegmentedList<T, A>
{
    fn eq(&self, other: &SegmentedList<T, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator + Clone> Eq for SegmentedList<T, A> {}

impl<T: PartialEq, A: Allocator + Clone> PartialEq<[T]> for SegmentedList<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq, A: Allocator + Clone, const N: usize> PartialEq<[T; N]> for SegmentedList<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        *self == other[..]
    }
}

impl<T: PartialEq, A: Allocator + Clone> PartialEq<Vec<T>> for SegmentedList<T, A> {
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == other[..]
    }
}

impl<T: std::hash::Hash, A: Allocator + Clone> std::hash::Hash for SegmentedList<T, A> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T: std::fmt::Debug, A: Allocator + Clone> std::fmt::Debug for SegmentedList<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for SegmentedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator + Clone> Index<usize> for SegmentedList<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(item) => item,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index
            ),
        }
    }
}

impl<T, A: Allocator + Clone> IndexMut<usize> for SegmentedList<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.len();
        match self.get_mut(index) {
            Some(item) => item,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T, A: Allocator + Clone> Extend<T> for SegmentedList<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

impl<'a, T: Copy + 'a, A: Allocator + Clone> Extend<&'a T> for SegmentedList<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.add_range(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for SegmentedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, Global)
    }
}

impl<T> From<Vec<T>> for SegmentedList<T> {
    fn from(items: Vec<T>) -> Self {
        let mut list = Self::with_capacity(items.len());
        list.add_range(items);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for SegmentedList<T> {
    fn from(items: [T; N]) -> Self {
        let mut list = Self::with_capacity(N);
        list.add_range(items);
        list
    }
}

impl<T, A: Allocator + Clone> IntoIterator for SegmentedList<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let len = self.len();
        IntoIter::new(self.store.into_segments(), len)
    }
}

impl<'a, T, A: Allocator + Clone> IntoIterator for &'a SegmentedList<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator + Clone> IntoIterator for &'a mut SegmentedList<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
