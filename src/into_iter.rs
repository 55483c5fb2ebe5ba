//! Owning iterator for `SegmentedList`.

use allocator_api2::alloc::{Allocator, Global};
use allocator_api2::vec::IntoIter as BlockIntoIter;

use crate::store::SegmentBlock;

/// An owning iterator over the elements of a `SegmentedList`.
///
/// This struct is created by the `into_iter` method on `SegmentedList`
/// (provided by the [`IntoIterator`] trait). Blocks are released as soon as
/// they have been walked.
pub struct IntoIter<T, A: Allocator = Global> {
    pub(crate) blocks: std::vec::IntoIter<SegmentBlock<T, A>>,
    pub(crate) front: Option<BlockIntoIter<T, A>>,
    pub(crate) back: Option<BlockIntoIter<T, A>>,
    pub(crate) remaining: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(crate) fn new(blocks: Vec<SegmentBlock<T, A>>, len: usize) -> Self {
        Self {
            blocks: blocks.into_iter(),
            front: None,
            back: None,
            remaining: len,
        }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.front.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            match self.blocks.next() {
                Some(block) => self.front = Some(block.into_items().into_iter()),
                None => {
                    let item = self.back.as_mut().and_then(Iterator::next)?;
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

    #[inline]
    fn count(self) -> usize {
        self.remaining
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.back.as_mut().and_then(DoubleEndedIterator::next_back) {
                self.remaining -= 1;
                return Some(item);
            }
            match self.blocks.next_back() {
                Some(block) => self.back = Some(block.into_items().into_iter()),
                None => {
                    let item = self
                        .front
                        .as_mut()
                        .and_then(DoubleEndedIterator::next_back)?;
                    self.remaining -= 1;
                    return Some(item);
                }
            }
        }
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> std::iter::FusedIterator for IntoIter<T, A> {}

impl<T: std::fmt::Debug, A: Allocator> std::fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
