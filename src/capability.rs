//! Narrow capability interfaces over lists.
//!
//! Consumers that only need to walk, fill or index a list can be written
//! against these traits and run unchanged over a [`SegmentedList`], a
//! [`SharedList`](crate::SharedList) or a read-only projection of either.

use allocator_api2::alloc::Allocator;

use crate::config::EnumeratorOptions;
use crate::enumerator::ListCursor;
use crate::error::Result;
use crate::SegmentedList;

/// A forward cursor that can be advanced, read and rewound.
pub trait Cursor<T> {
    /// Advances to the next element. Returns `Ok(false)` past the end.
    fn move_next(&mut self) -> Result<bool>;

    /// The element under the cursor.
    fn current(&self) -> Result<Option<&T>>;

    /// Moves back before the first element.
    fn reset(&mut self) -> Result<()>;
}

/// A sequence that hands out independent cursors.
pub trait Enumerable<T> {
    /// The cursor type, possibly borrowing the sequence.
    type Cursor<'a>: Cursor<T>
    where
        Self: 'a;

    /// Returns a fresh cursor positioned before the first element.
    fn cursor(&self) -> Self::Cursor<'_>;
}

/// A sized sequence that supports membership and size mutation.
///
/// Read-only implementations fail every mutating call with
/// [`Error::NotSupported`](crate::Error::NotSupported).
pub trait Collection<T>: Enumerable<T> {
    /// Number of elements.
    fn count(&self) -> usize;

    /// Whether mutating calls are rejected.
    fn is_read_only(&self) -> bool;

    /// Appends an element.
    fn add(&mut self, item: T) -> Result<()>;

    /// Removes every element.
    fn clear(&mut self) -> Result<()>;

    /// Whether an element equal to `item` under `eq` exists.
    fn contains_by<F>(&self, item: &T, eq: F) -> bool
    where
        F: FnMut(&T, &T) -> bool;

    /// Whether an element equal to `item` exists.
    fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.contains_by(item, T::eq)
    }

    /// Removes the first element equal to `item` under `eq`.
    fn remove_by<F>(&mut self, item: &T, eq: F) -> Result<bool>
    where
        F: FnMut(&T, &T) -> bool;

    /// Removes the first element equal to `item`.
    fn remove(&mut self, item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.remove_by(item, T::eq)
    }

    /// Copies every element into `dest` starting at `start`.
    fn copy_to(&self, dest: &mut [T], start: usize) -> Result<()>
    where
        T: Clone;
}

/// A collection addressable by position.
pub trait IndexedList<T>: Collection<T> {
    /// Returns a copy of the element at `index`.
    fn get_item(&self, index: usize) -> Result<T>
    where
        T: Clone;

    /// Overwrites the element at `index`.
    fn set_item(&mut self, index: usize, item: T) -> Result<()>;

    /// Position of the first element equal to `item`.
    fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq;

    /// Inserts `item` at `index`.
    fn insert(&mut self, index: usize, item: T) -> Result<()>;

    /// Removes the element at `index`.
    fn remove_at(&mut self, index: usize) -> Result<()>;
}

impl<T, A: Allocator + Clone> Enumerable<T> for SegmentedList<T, A> {
    type Cursor<'a> = ListCursor<'a, T, A>
    where
        Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        ListCursor::new(self, EnumeratorOptions::default())
    }
}

impl<T, A: Allocator + Clone> Collection<T> for SegmentedList<T, A> {
    fn count(&self) -> usize {
        self.len()
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn add(&mut self, item: T) -> Result<()> {
        SegmentedList::add(self, item);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        SegmentedList::clear(self);
        Ok(())
    }

    fn contains_by<F>(&self, item: &T, mut eq: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.exists(|x| eq(x, item))
    }

    fn remove_by<F>(&mut self, item: &T, mut eq: F) -> Result<bool>
    where
        F: FnMut(&T, &T) -> bool,
    {
        match self.find_index(|x| eq(x, item)) {
            Some(index) => {
                SegmentedList::remove_at(self, index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn copy_to(&self, dest: &mut [T], start: usize) -> Result<()>
    where
        T: Clone,
    {
        SegmentedList::copy_to(self, dest, start)
    }
}

impl<T, A: Allocator + Clone> IndexedList<T> for SegmentedList<T, A> {
    fn get_item(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.try_get(index).cloned()
    }

    fn set_item(&mut self, index: usize, item: T) -> Result<()> {
        self.set(index, item).map(drop)
    }

    fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        SegmentedList::index_of(self, item)
    }

    fn insert(&mut self, index: usize, item: T) -> Result<()> {
        SegmentedList::insert(self, index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<()> {
        SegmentedList::remove_at(self, index).map(drop)
    }
}
