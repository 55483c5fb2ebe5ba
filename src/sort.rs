//! Unstable sorting over segmented storage.
//!
//! A range that lies inside a single segment is one contiguous slice and is
//! handed straight to the slice sort of the standard library. Longer ranges
//! are quicksort-partitioned until the pieces fit in a segment. Short pieces
//! that still straddle a segment boundary are insertion sorted, and a
//! recursion depth limit switches to heapsort.

use std::cmp::Ordering;

/// Pieces at most this long are insertion sorted when not contiguous.
const SMALL_RUN: usize = 16;

/// Ranges at least this long pick their pivot with Tukey's ninther.
const NINTHER_THRESHOLD: usize = 128;

/// Indexed access to a collection that sorting can work through.
pub trait IndexedAccess<T> {
    /// Get a reference to the element at index.
    fn get_ref(&self, index: usize) -> &T;

    /// Swap elements at two indices.
    fn swap(&mut self, a: usize, b: usize);

    /// Returns `start..end` as one slice when those elements are contiguous.
    fn contiguous_mut(&mut self, _start: usize, _end: usize) -> Option<&mut [T]> {
        None
    }
}

#[inline]
fn less<T, F>(v: &impl IndexedAccess<T>, a: usize, b: usize, compare: &mut F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    compare(v.get_ref(a), v.get_ref(b)) == Ordering::Less
}

/// Sorts `v[start..end]` by `compare`. The sort is not stable.
pub fn sort_range<T, F>(v: &mut impl IndexedAccess<T>, start: usize, end: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = end.saturating_sub(start);
    if len < 2 {
        return;
    }
    let depth = 2 * (usize::BITS - len.leading_zeros());
    introsort(v, start, end, compare, depth);
}

fn introsort<T, F>(
    v: &mut impl IndexedAccess<T>,
    mut start: usize,
    mut end: usize,
    compare: &mut F,
    mut depth: u32,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    while end - start > 1 {
        if let Some(run) = v.contiguous_mut(start, end) {
            run.sort_unstable_by(|a, b| compare(a, b));
            return;
        }
        if end - start <= SMALL_RUN {
            insertion_sort(v, start, end, compare);
            return;
        }
        if depth == 0 {
            heapsort(v, start, end, compare);
            return;
        }
        depth -= 1;

        let pivot = partition(v, start, end, compare);
        // Recurse into the shorter side, keep looping on the longer one.
        if pivot - start < end - pivot {
            introsort(v, start, pivot, compare, depth);
            start = pivot + 1;
        } else {
            introsort(v, pivot + 1, end, compare, depth);
            end = pivot;
        }
    }
}

/// Sorts `v[start..end]` using insertion sort.
pub fn insertion_sort<T, F>(
    v: &mut impl IndexedAccess<T>,
    start: usize,
    end: usize,
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    for next in start + 1..end {
        let mut hole = next;
        while hole > start && less(v, hole, hole - 1, compare) {
            v.swap(hole, hole - 1);
            hole -= 1;
        }
    }
}

/// Sorts `v[start..end]` using heapsort. O(n log n) in the worst case.
#[inline(never)]
pub fn heapsort<T, F>(v: &mut impl IndexedAccess<T>, start: usize, end: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = end - start;
    for root in (0..len / 2).rev() {
        sift_down(v, start, root, len, compare);
    }
    for last in (1..len).rev() {
        v.swap(start, start + last);
        sift_down(v, start, 0, last, compare);
    }
}

/// Restores the max-heap below `root` in the heap `v[base..base + len]`.
fn sift_down<T, F>(
    v: &mut impl IndexedAccess<T>,
    base: usize,
    mut root: usize,
    len: usize,
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    while 2 * root + 1 < len {
        let mut child = 2 * root + 1;
        if child + 1 < len && less(v, base + child, base + child + 1, compare) {
            child += 1;
        }
        if !less(v, base + root, base + child, compare) {
            return;
        }
        v.swap(base + root, base + child);
        root = child;
    }
}

/// Index of the median of three elements.
fn median_of_three<T, F>(
    v: &impl IndexedAccess<T>,
    mut a: usize,
    mut b: usize,
    mut c: usize,
    compare: &mut F,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    if less(v, b, a, compare) {
        std::mem::swap(&mut a, &mut b);
    }
    if less(v, c, b, compare) {
        std::mem::swap(&mut b, &mut c);
        if less(v, b, a, compare) {
            std::mem::swap(&mut a, &mut b);
        }
    }
    b
}

fn choose_pivot<T, F>(v: &impl IndexedAccess<T>, start: usize, end: usize, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = end - start;
    let mid = start + len / 2;
    if len < NINTHER_THRESHOLD {
        return median_of_three(v, start, mid, end - 1, compare);
    }
    let step = len / 8;
    let low = median_of_three(v, start, start + step, start + 2 * step, compare);
    let middle = median_of_three(v, mid - step, mid, mid + step, compare);
    let high = median_of_three(v, end - 1 - 2 * step, end - 1 - step, end - 1, compare);
    median_of_three(v, low, middle, high, compare)
}

/// Partitions `v[start..end]` and returns the pivot's final index.
///
/// Everything before the pivot compares less than it, nothing after does.
fn partition<T, F>(
    v: &mut impl IndexedAccess<T>,
    start: usize,
    end: usize,
    compare: &mut F,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let pivot = choose_pivot(v, start, end, compare);
    v.swap(start, pivot);

    // [start + 1, lo) is below the pivot, [hi, end) is not.
    let mut lo = start + 1;
    let mut hi = end;
    loop {
        while lo < hi && less(v, lo, start, compare) {
            lo += 1;
        }
        while lo < hi && !less(v, hi - 1, start, compare) {
            hi -= 1;
        }
        if lo == hi {
            break;
        }
        hi -= 1;
        v.swap(lo, hi);
        lo += 1;
    }

    v.swap(start, lo - 1);
    lo - 1
}
