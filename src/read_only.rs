//! Read-only projections of a list.

use allocator_api2::alloc::Allocator;

use crate::capability::{Collection, Cursor, Enumerable, IndexedList};
use crate::config::{CurrentPolicy, EnumeratorOptions};
use crate::enumerator::{Enumerator, ListCursor};
use crate::error::{Error, Result};
use crate::shared::SharedList;
use crate::SegmentedList;

/// Something a [`ReadOnlyList`] can look through.
///
/// Implemented for `&SegmentedList` and [`SharedList`].
pub trait ListHandle {
    /// Element type.
    type Item;
    /// Allocator of the underlying list.
    type Alloc: Allocator + Clone;
    /// Cursor handed out by the projection.
    type Cursor<'a>: Cursor<Self::Item>
    where
        Self: 'a;

    /// Runs `f` against the underlying list.
    fn with_list<R>(&self, f: impl FnOnce(&SegmentedList<Self::Item, Self::Alloc>) -> R) -> R;

    /// Returns a cursor over the underlying list.
    fn cursor_with(&self, options: EnumeratorOptions) -> Self::Cursor<'_>;
}

impl<'l, T, A: Allocator + Clone> ListHandle for &'l SegmentedList<T, A> {
    type Item = T;
    type Alloc = A;
    type Cursor<'a> = ListCursor<'l, T, A>
    where
        Self: 'a;

    fn with_list<R>(&self, f: impl FnOnce(&SegmentedList<T, A>) -> R) -> R {
        f(self)
    }

    fn cursor_with(&self, options: EnumeratorOptions) -> Self::Cursor<'_> {
        ListCursor::new(*self, options)
    }
}

impl<T: Clone, A: Allocator + Clone> ListHandle for SharedList<T, A> {
    type Item = T;
    type Alloc = A;
    type Cursor<'a> = Enumerator<T, A>
    where
        Self: 'a;

    fn with_list<R>(&self, f: impl FnOnce(&SegmentedList<T, A>) -> R) -> R {
        f(&self.borrow())
    }

    fn cursor_with(&self, options: EnumeratorOptions) -> Self::Cursor<'_> {
        self.enumerator_with(options)
    }
}

/// A read-only view over a list.
///
/// The view has no storage of its own: reads always see the list's current
/// content, and every mutating capability fails with
/// [`Error::NotSupported`]. Cursors from the view report
/// [`Error::NotPositioned`] when read off an element.
///
/// # Example
///
/// ```
/// use segmented_list::{Collection, Error, SharedList};
///
/// let list = SharedList::new();
/// let mut view = list.as_read_only();
/// assert_eq!(view.add(1), Err(Error::NotSupported { operation: "add" }));
///
/// list.add(1);
/// assert_eq!(view.get(0), Ok(1));
/// ```
pub struct ReadOnlyList<L> {
    handle: L,
}

impl<L: ListHandle> ReadOnlyList<L> {
    /// Wraps `handle` in a read-only view.
    pub fn new(handle: L) -> Self {
        Self { handle }
    }

    /// Returns the number of elements in the underlying list.
    pub fn len(&self) -> usize {
        self.handle.with_list(SegmentedList::len)
    }

    /// Returns `true` if the underlying list is empty.
    pub fn is_empty(&self) -> bool {
        self.handle.with_list(SegmentedList::is_empty)
    }

    /// Returns the capacity of the underlying list.
    pub fn capacity(&self) -> usize {
        self.handle.with_list(SegmentedList::capacity)
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Result<L::Item>
    where
        L::Item: Clone,
    {
        self.handle.with_list(|list| list.try_get(index).cloned())
    }

    /// Copies the list into a standard `Vec`.
    pub fn to_vec(&self) -> Vec<L::Item>
    where
        L::Item: Clone,
    {
        self.handle.with_list(SegmentedList::to_vec)
    }

    /// Returns a cursor that fails when read off an element.
    pub fn enumerator(&self) -> L::Cursor<'_> {
        self.handle
            .cursor_with(EnumeratorOptions::with_current(CurrentPolicy::Error))
    }
}

impl<L: ListHandle> Enumerable<L::Item> for ReadOnlyList<L> {
    type Cursor<'a> = L::Cursor<'a>
    where
        Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.enumerator()
    }
}

impl<L: ListHandle> Collection<L::Item> for ReadOnlyList<L> {
    fn count(&self) -> usize {
        self.len()
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn add(&mut self, _item: L::Item) -> Result<()> {
        Err(Error::read_only("add"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(Error::read_only("clear"))
    }

    fn contains_by<F>(&self, item: &L::Item, eq: F) -> bool
    where
        F: FnMut(&L::Item, &L::Item) -> bool,
    {
        self.handle.with_list(|list| list.contains_by(item, eq))
    }

    fn remove_by<F>(&mut self, _item: &L::Item, _eq: F) -> Result<bool>
    where
        F: FnMut(&L::Item, &L::Item) -> bool,
    {
        Err(Error::read_only("remove"))
    }

    fn copy_to(&self, dest: &mut [L::Item], start: usize) -> Result<()>
    where
        L::Item: Clone,
    {
        self.handle.with_list(|list| list.copy_to(dest, start))
    }
}

impl<L: ListHandle> IndexedList<L::Item> for ReadOnlyList<L> {
    fn get_item(&self, index: usize) -> Result<L::Item>
    where
        L::Item: Clone,
    {
        self.get(index)
    }

    fn set_item(&mut self, _index: usize, _item: L::Item) -> Result<()> {
        Err(Error::read_only("set"))
    }

    fn index_of(&self, item: &L::Item) -> Option<usize>
    where
        L::Item: PartialEq,
    {
        self.handle.with_list(|list| list.index_of(item))
    }

    fn insert(&mut self, _index: usize, _item: L::Item) -> Result<()> {
        Err(Error::read_only("insert"))
    }

    fn remove_at(&mut self, _index: usize) -> Result<()> {
        Err(Error::read_only("remove_at"))
    }
}

impl<L: ListHandle> std::fmt::Debug for ReadOnlyList<L>
where
    L::Item: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.handle
            .with_list(|list| f.debug_tuple("ReadOnlyList").field(list).finish())
    }
}
