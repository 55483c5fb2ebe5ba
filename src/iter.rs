//! Borrowing iterators for `SegmentedList`.

use allocator_api2::alloc::{Allocator, Global};

use crate::store::SegmentBlock;

/// An iterator over references to the elements of a `SegmentedList`.
pub struct Iter<'a, T, A: Allocator = Global> {
    /// Blocks not yet entered from either end
    pub(crate) blocks: std::slice::Iter<'a, SegmentBlock<T, A>>,
    /// Elements left in the block entered from the front
    pub(crate) front: std::slice::Iter<'a, T>,
    /// Elements left in the block entered from the back
    pub(crate) back: std::slice::Iter<'a, T>,
    /// Elements left overall
    pub(crate) remaining: usize,
}

impl<'a, T, A: Allocator> Iter<'a, T, A> {
    pub(crate) fn new(blocks: &'a [SegmentBlock<T, A>], len: usize) -> Self {
        Self {
            blocks: blocks.iter(),
            front: (&[]).iter(),
            back: (&[]).iter(),
            remaining: len,
        }
    }
}

impl<'a, T, A: Allocator> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.front.next() {
                self.remaining -= 1;
                return Some(item);
            }
            match self.blocks.next() {
                Some(block) => self.front = block.as_slice().iter(),
                None => {
                    let item = self.back.next()?;
                    self.remaining -= 1;
                    return Some(item);
                }
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for Iter<'_, T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.back.next_back() {
                self.remaining -= 1;
                return Some(item);
            }
            match self.blocks.next_back() {
                Some(block) => self.back = block.as_slice().iter(),
                None => {
                    let item = self.front.next_back()?;
                    self.remaining -= 1;
                    return Some(item);
                }
            }
        }
    }
}

impl<T, A: Allocator> ExactSizeIterator for Iter<'_, T, A> {}

impl<T, A: Allocator> std::iter::FusedIterator for Iter<'_, T, A> {}

impl<T, A: Allocator> Clone for Iter<'_, T, A> {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

/// An iterator over mutable references to the elements of a `SegmentedList`.
pub struct IterMut<'a, T, A: Allocator = Global> {
    pub(crate) blocks: std::slice::IterMut<'a, SegmentBlock<T, A>>,
    pub(crate) front: std::slice::IterMut<'a, T>,
    pub(crate) back: std::slice::IterMut<'a, T>,
    pub(crate) remaining: usize,
}

impl<'a, T, A: Allocator> IterMut<'a, T, A> {
    pub(crate) fn new(blocks: &'a mut [SegmentBlock<T, A>], len: usize) -> Self {
        Self {
            blocks: blocks.iter_mut(),
            front: (&mut []).iter_mut(),
            back: (&mut []).iter_mut(),
            remaining: len,
        }
    }
}

impl<'a, T, A: Allocator> Iterator for IterMut<'a, T, A> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.front.next() {
                self.remaining -= 1;
                return Some(item);
            }
            match self.blocks.next() {
                Some(block) => self.front = block.as_mut_slice().iter_mut(),
                None => {
                    let item = self.back.next()?;
                    self.remaining -= 1;
                    return Some(item);
                }
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IterMut<'_, T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.back.next_back() {
                self.remaining -= 1;
                return Some(item);
            }
            match self.blocks.next_back() {
                Some(block) => self.back = block.as_mut_slice().iter_mut(),
                None => {
                    let item = self.front.next_back()?;
                    self.remaining -= 1;
                    return Some(item);
                }
            }
        }
    }
}

impl<T, A: Allocator> ExactSizeIterator for IterMut<'_, T, A> {}

impl<T, A: Allocator> std::iter::FusedIterator for IterMut<'_, T, A> {}
