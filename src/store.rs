//! Segment storage for `SegmentedList`.
//!
//! A [`SegmentedStore`] presents one flat index space over a series of
//! [`SegmentBlock`]s. Every block except the last holds exactly
//! `segment_size` slots, so translating a flat index is a shift and a mask.
//! Live elements always occupy the prefix `[0, len)` of the index space.

use allocator_api2::alloc::{Allocator, Global};
use allocator_api2::vec::Vec as BlockVec;

use crate::config::SegmentConfig;
use crate::sort::IndexedAccess;

/// One fixed-length block of slots.
///
/// The block reserves its whole slot length up front and never reallocates
/// while elements are pushed into it, so its buffer address identifies it
/// across growth of the surrounding store.
pub struct SegmentBlock<T, A: Allocator = Global> {
    items: BlockVec<T, A>,
    slots: usize,
}

impl<T, A: Allocator> SegmentBlock<T, A> {
    fn new_in(slots: usize, alloc: A) -> Self {
        Self {
            items: BlockVec::with_capacity_in(slots, alloc),
            slots,
        }
    }

    /// Returns the slot length of this block.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots
    }

    /// Returns `true` if the block has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots == 0
    }

    /// Returns how many slots currently hold an element.
    #[inline]
    pub fn live(&self) -> usize {
        self.items.len()
    }

    /// Returns the live elements of this block.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Returns the address of the block's buffer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.items.as_ptr()
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.items.len() == self.slots
    }

    fn resize_slots(&mut self, slots: usize) {
        debug_assert!(slots >= self.items.len());
        if slots > self.slots {
            self.items.reserve_exact(slots - self.items.len());
        } else {
            self.items.shrink_to(slots);
        }
        self.slots = slots;
    }

    pub(crate) fn into_items(self) -> BlockVec<T, A> {
        self.items
    }
}

impl<T: std::fmt::Debug, A: Allocator> std::fmt::Debug for SegmentBlock<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentBlock")
            .field("slots", &self.slots)
            .field("items", &self.as_slice())
            .finish()
    }
}

/// An ordered series of segment blocks with one logical index space.
///
/// The store owns index translation, in-place shifting across block
/// boundaries, and growth. It never reallocates a full block: growing keeps
/// every full block as is, resizes at most the trailing partial block, and
/// appends new blocks after it.
pub struct SegmentedStore<T, A: Allocator + Clone = Global> {
    blocks: Vec<SegmentBlock<T, A>>,
    len: usize,
    shift: u32,
    config: SegmentConfig,
    alloc: A,
}

impl<T> SegmentedStore<T> {
    /// Creates an empty store sized by `config`. Does not allocate.
    pub const fn new(config: SegmentConfig) -> Self {
        Self::new_in(config, Global)
    }
}

impl<T, A: Allocator + Clone> SegmentedStore<T, A> {
    /// Creates an empty store that allocates its blocks from `alloc`.
    pub const fn new_in(config: SegmentConfig, alloc: A) -> Self {
        Self {
            blocks: Vec::new(),
            len: 0,
            shift: config.segment_shift::<T>(),
            config,
            alloc,
        }
    }

    /// Returns the configuration the store was sized with.
    #[inline]
    pub fn config(&self) -> SegmentConfig {
        self.config
    }

    /// Returns the allocator used for the blocks.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Number of slots in every block but the last.
    #[inline]
    pub fn segment_size(&self) -> usize {
        1 << self.shift
    }

    #[inline]
    fn offset_mask(&self) -> usize {
        self.segment_size() - 1
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the store holds no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of slots across all blocks.
    #[inline]
    pub fn capacity(&self) -> usize {
        match self.blocks.last() {
            Some(last) => ((self.blocks.len() - 1) << self.shift) + last.len(),
            None => 0,
        }
    }

    /// Number of allocated blocks.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the blocks in index order.
    #[inline]
    pub fn segments(&self) -> &[SegmentBlock<T, A>] {
        &self.blocks
    }

    #[inline]
    pub(crate) fn segments_mut(&mut self) -> &mut [SegmentBlock<T, A>] {
        &mut self.blocks
    }

    /// Translates a flat index into `(segment, offset)`.
    #[inline]
    pub fn location(&self, index: usize) -> (usize, usize) {
        (index >> self.shift, index & self.offset_mask())
    }

    /// Returns the element at `index`, or `None` past the live prefix.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            Some(self.at(index))
        } else {
            None
        }
    }

    /// Returns the element at `index` mutably, or `None` past the live prefix.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            Some(self.at_mut(index))
        } else {
            None
        }
    }

    /// Element at `index`, which must be below `len`.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> &T {
        let (segment, offset) = self.location(index);
        &self.blocks[segment].items[offset]
    }

    #[inline]
    pub(crate) fn at_mut(&mut self, index: usize) -> &mut T {
        let (segment, offset) = self.location(index);
        &mut self.blocks[segment].items[offset]
    }

    /// Swaps two live elements, possibly in different blocks.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        let (seg_a, off_a) = self.location(a);
        let (seg_b, off_b) = self.location(b);
        if seg_a == seg_b {
            self.blocks[seg_a].items.swap(off_a, off_b);
            return;
        }

        let ((lo_seg, lo_off), (hi_seg, hi_off)) = if seg_a < seg_b {
            ((seg_a, off_a), (seg_b, off_b))
        } else {
            ((seg_b, off_b), (seg_a, off_a))
        };
        let (head, tail) = self.blocks.split_at_mut(hi_seg);
        std::mem::swap(&mut head[lo_seg].items[lo_off], &mut tail[0].items[hi_off]);
    }

    /// Reverses the live elements in `[start, end)`.
    pub(crate) fn reverse(&mut self, start: usize, end: usize) {
        if end <= start + 1 {
            return;
        }
        let (first, _) = self.location(start);
        let (last, _) = self.location(end - 1);
        if first == last {
            let (_, offset) = self.location(start);
            self.blocks[first].items[offset..offset + (end - start)].reverse();
            return;
        }

        let mut front = start;
        let mut back = end - 1;
        while front < back {
            self.swap(front, back);
            front += 1;
            back -= 1;
        }
    }

    /// Moves the last `k` elements of `[start, end)` to the front of that range.
    pub(crate) fn rotate_right(&mut self, start: usize, end: usize, k: usize) {
        if k == 0 || k >= end - start {
            return;
        }
        self.reverse(start, end);
        self.reverse(start, start + k);
        self.reverse(start + k, end);
    }

    /// Appends an element. The store must have a free slot.
    pub(crate) fn push(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        let (segment, _) = self.location(self.len);
        self.blocks[segment].items.push(value);
        self.len += 1;
    }

    /// Inserts at `index`, carrying the last element of every full block
    /// into the front of the next one. The store must have a free slot.
    pub(crate) fn insert(&mut self, index: usize, value: T) {
        debug_assert!(index <= self.len);
        debug_assert!(self.len < self.capacity());

        let (mut segment, mut offset) = self.location(index);
        let mut carry = value;
        loop {
            let block = &mut self.blocks[segment];
            let overflow = if block.is_full() {
                block.items.pop()
            } else {
                None
            };
            block.items.insert(offset, carry);
            match overflow {
                Some(next) => {
                    carry = next;
                    segment += 1;
                    offset = 0;
                }
                None => break,
            }
        }
        self.len += 1;
    }

    /// Removes the element at `index`, pulling the first element of every
    /// following block back into the block before it.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);

        let (segment, offset) = self.location(index);
        let removed = self.blocks[segment].items.remove(offset);
        for next in segment + 1..self.blocks.len() {
            if self.blocks[next].items.is_empty() {
                break;
            }
            let head = self.blocks[next].items.remove(0);
            self.blocks[next - 1].items.push(head);
        }
        self.len -= 1;
        removed
    }

    /// Removes `count` elements starting at `index`.
    pub(crate) fn remove_range(&mut self, index: usize, count: usize) {
        debug_assert!(index + count <= self.len);
        if count == 0 {
            return;
        }
        if count == 1 {
            self.remove(index);
            return;
        }

        for i in index..self.len - count {
            self.swap(i, i + count);
        }
        self.truncate(self.len - count);
    }

    /// Drops every element at or after `new_len`.
    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let (first, _) = self.location(new_len);
        for (segment, block) in self.blocks.iter_mut().enumerate().skip(first) {
            let start = segment << self.shift;
            if start >= self.len {
                break;
            }
            block.items.truncate(new_len.saturating_sub(start));
        }
        self.len = new_len;
    }

    /// Grows the store to exactly `new_capacity` slots.
    ///
    /// Full blocks are kept untouched; only the trailing partial block may be
    /// resized before new blocks are appended.
    pub(crate) fn grow(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        debug_assert!(new_capacity >= old_capacity);
        if new_capacity <= old_capacity {
            return;
        }

        let segment_size = self.segment_size();
        if let Some(last) = self.blocks.last_mut() {
            if last.len() < segment_size {
                let extra = (segment_size - last.len()).min(new_capacity - old_capacity);
                last.resize_slots(last.len() + extra);
            }
        }

        let mut capacity = self.capacity();
        while capacity < new_capacity {
            let slots = (new_capacity - capacity).min(segment_size);
            self.blocks
                .push(SegmentBlock::new_in(slots, self.alloc.clone()));
            capacity += slots;
        }

        tracing::trace!(
            from = old_capacity,
            to = new_capacity,
            segments = self.blocks.len(),
            "grew segmented store"
        );
    }

    /// Shrinks the store to exactly `new_capacity` slots, which must still
    /// hold every live element.
    pub(crate) fn shrink(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        debug_assert!(new_capacity >= self.len);
        if new_capacity >= old_capacity {
            return;
        }

        let segment_size = self.segment_size();
        let keep = (new_capacity + segment_size - 1) >> self.shift;
        self.blocks.truncate(keep);
        if let Some(last) = self.blocks.last_mut() {
            let slots = new_capacity - ((keep - 1) << self.shift);
            if slots != last.len() {
                last.resize_slots(slots);
            }
        }

        tracing::trace!(
            from = old_capacity,
            to = new_capacity,
            segments = self.blocks.len(),
            "shrank segmented store"
        );
    }

    /// Grows or shrinks to exactly `capacity` slots.
    pub(crate) fn resize(&mut self, capacity: usize) {
        if capacity > self.capacity() {
            self.grow(capacity);
        } else {
            self.shrink(capacity);
        }
    }

    pub(crate) fn into_segments(self) -> Vec<SegmentBlock<T, A>> {
        self.blocks
    }
}

impl<T, A: Allocator + Clone> IndexedAccess<T> for SegmentedStore<T, A> {
    #[inline]
    fn get_ref(&self, index: usize) -> &T {
        self.at(index)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        SegmentedStore::swap(self, a, b);
    }

    fn contiguous_mut(&mut self, start: usize, end: usize) -> Option<&mut [T]> {
        if start >= end {
            return None;
        }
        let (first, offset) = self.location(start);
        if self.location(end - 1).0 != first {
            return None;
        }
        Some(&mut self.blocks[first].as_mut_slice()[offset..offset + (end - start)])
    }
}

impl<T: std::fmt::Debug, A: Allocator + Clone> std::fmt::Debug for SegmentedStore<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentedStore")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("segment_size", &self.segment_size())
            .field("segments", &self.blocks)
            .finish()
    }
}
