//! A cloneable handle to a list that enumerators can observe.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use allocator_api2::alloc::{Allocator, Global};

use crate::capability::{Collection, Enumerable, IndexedList};
use crate::config::{EnumeratorOptions, SegmentConfig};
use crate::enumerator::Enumerator;
use crate::error::{Error, Result};
use crate::read_only::ReadOnlyList;
use crate::SegmentedList;

/// A single-threaded shared handle to a [`SegmentedList`].
///
/// Clones point at the same list. Enumerators hold a weak reference, so the
/// list can be mutated while they exist and they detect it on their next
/// step.
///
/// # Panics
///
/// Methods borrow the inner `RefCell` only for the duration of the call and
/// panic if the caller is holding a conflicting guard from
/// [`borrow`](Self::borrow) or [`borrow_mut`](Self::borrow_mut).
///
/// # Example
///
/// ```
/// use segmented_list::{Error, SharedList};
///
/// let list = SharedList::new();
/// list.add(1);
/// let mut e = list.enumerator();
/// assert_eq!(e.move_next(), Ok(true));
/// list.add(2);
/// assert_eq!(e.move_next(), Err(Error::Modified));
/// ```
pub struct SharedList<T, A: Allocator + Clone = Global> {
    inner: Rc<RefCell<SegmentedList<T, A>>>,
}

impl<T> SharedList<T> {
    /// Creates a handle to a new empty list.
    pub fn new() -> Self {
        Self::from_list(SegmentedList::new())
    }

    /// Creates a handle to a new empty list sized by `config`.
    pub fn with_config(config: SegmentConfig) -> Self {
        Self::from_list(SegmentedList::with_config(config))
    }
}

impl<T, A: Allocator + Clone> SharedList<T, A> {
    /// Moves `list` behind a shared handle.
    pub fn from_list(list: SegmentedList<T, A>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(list)),
        }
    }

    /// Immutably borrows the list.
    pub fn borrow(&self) -> Ref<'_, SegmentedList<T, A>> {
        self.inner.borrow()
    }

    /// Mutably borrows the list.
    pub fn borrow_mut(&self) -> RefMut<'_, SegmentedList<T, A>> {
        self.inner.borrow_mut()
    }

    /// Whether both handles point at the same list.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Returns the number of slots allocated.
    pub fn capacity(&self) -> usize {
        self.inner.borrow().capacity()
    }

    /// Returns the list's version counter.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version()
    }

    /// Appends an element.
    pub fn add(&self, value: T) {
        self.inner.borrow_mut().add(value);
    }

    /// Inserts an element at `index`, shifting later elements back.
    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        self.inner.borrow_mut().insert(index, value)
    }

    /// Removes and returns the element at `index`.
    pub fn remove_at(&self, index: usize) -> Result<T> {
        self.inner.borrow_mut().remove_at(index)
    }

    /// Removes every element, keeping the capacity.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Replaces the element at `index`. Enumerators stay valid.
    pub fn set(&self, index: usize, value: T) -> Result<T> {
        self.inner.borrow_mut().set(index, value)
    }
}

impl<T: Clone, A: Allocator + Clone> SharedList<T, A> {
    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.inner.borrow().try_get(index).cloned()
    }

    /// Copies the list into a standard `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.borrow().to_vec()
    }

    /// Returns a fail-fast enumerator with default options.
    pub fn enumerator(&self) -> Enumerator<T, A> {
        self.enumerator_with(EnumeratorOptions::default())
    }

    /// Returns a fail-fast enumerator with the given options.
    pub fn enumerator_with(&self, options: EnumeratorOptions) -> Enumerator<T, A> {
        Enumerator::new(&self.inner, self.version(), options)
    }

    /// Returns a read-only view sharing this list's storage.
    pub fn as_read_only(&self) -> ReadOnlyList<SharedList<T, A>> {
        ReadOnlyList::new(self.clone())
    }

    /// Appends a snapshot of `source`, which may be this very list.
    pub fn add_range_from<B: Allocator + Clone>(&self, source: &SharedList<T, B>) {
        let items = source.to_vec();
        self.inner.borrow_mut().add_range(items);
    }

    /// Inserts a snapshot of `source` at `index`. `source` may be this list.
    pub fn insert_range_from<B: Allocator + Clone>(
        &self,
        index: usize,
        source: &SharedList<T, B>,
    ) -> Result<()> {
        let items = source.to_vec();
        self.inner.borrow_mut().insert_range(index, items)
    }

    /// Appends items as the source produces them.
    ///
    /// If the source yields an error, the items added so far are removed
    /// again and the error is returned.
    pub fn try_add_range<I>(&self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<T>>,
    {
        let index = self.len();
        self.try_insert_range(index, items)
    }

    /// Inserts items at `index` as the source produces them.
    ///
    /// The version advances once, on the first insertion, so the source may
    /// be a live enumerator over this list: its next step then fails with
    /// [`Error::Modified`]. On any source error the inserted items are
    /// removed again, the version is restored and the error is returned.
    pub fn try_insert_range<I>(&self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<T>>,
    {
        let (len, version) = {
            let list = self.inner.borrow();
            (list.len(), list.version())
        };
        if index > len {
            return Err(Error::out_of_range("index", index, len));
        }

        let mut inserted = 0;
        for item in items {
            match item {
                Ok(value) => {
                    let mut list = self.inner.borrow_mut();
                    list.insert(index + inserted, value)?;
                    list.restore_version(version.wrapping_add(1));
                    inserted += 1;
                }
                Err(error) => {
                    let mut list = self.inner.borrow_mut();
                    if inserted > 0 {
                        list.remove_range(index, inserted)?;
                    }
                    list.restore_version(version);
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    /// Visits elements by index until the end, re-reading the length each step.
    ///
    /// No borrow is held while `f` runs, so `f` may mutate the list.
    fn visit<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        let mut index = 0;
        loop {
            let Some(item) = self.inner.borrow().get(index).cloned() else {
                break;
            };
            f(&item);
            index += 1;
        }
    }

    /// Removes every element matching `pred` and returns how many were removed.
    ///
    /// The predicate may append to the list; appended elements are tested
    /// too. Any other change made by the predicate would shift the verdicts
    /// onto the wrong elements, so a predicate that shrinks the list fails
    /// the call with [`Error::Modified`] and nothing is removed.
    pub fn remove_all<F>(&self, mut pred: F) -> Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let mut doomed = Vec::new();
        loop {
            let Some(item) = self.inner.borrow().get(doomed.len()).cloned() else {
                break;
            };
            let len = self.len();
            doomed.push(pred(&item));
            if self.len() < len {
                return Err(Error::Modified);
            }
        }

        let mut flags = doomed.into_iter();
        Ok(self
            .inner
            .borrow_mut()
            .remove_all(|_| flags.next().unwrap_or(false)))
    }

    /// Returns a new list of the elements matching `pred`.
    ///
    /// The predicate may append to the list; appended elements are tested too.
    pub fn find_all<F>(&self, mut pred: F) -> SegmentedList<T, A>
    where
        F: FnMut(&T) -> bool,
    {
        let mut found = self.inner.borrow().empty_like();
        self.visit(|item| {
            if pred(item) {
                found.add(item.clone());
            }
        });
        found
    }

    /// Calls `action` on every element in order.
    ///
    /// Stops and fails with [`Error::Modified`] if `action` changes the
    /// list's length.
    pub fn for_each<F>(&self, mut action: F) -> Result<()>
    where
        F: FnMut(&T),
    {
        let version = self.version();
        let mut index = 0;
        loop {
            let Some(item) = self.inner.borrow().get(index).cloned() else {
                break;
            };
            action(&item);
            if self.version() != version {
                return Err(Error::Modified);
            }
            index += 1;
        }
        Ok(())
    }
}

impl<T> Default for SharedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator + Clone> Clone for SharedList<T, A> {
    /// Returns another handle to the same list.
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, A: Allocator + Clone> From<SegmentedList<T, A>> for SharedList<T, A> {
    fn from(list: SegmentedList<T, A>) -> Self {
        Self::from_list(list)
    }
}

impl<T: std::fmt::Debug, A: Allocator + Clone> std::fmt::Debug for SharedList<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_borrow() {
            Ok(list) => f.debug_tuple("SharedList").field(&*list).finish(),
            Err(_) => f.write_str("SharedList(<borrowed>)"),
        }
    }
}

impl<T: Clone, A: Allocator + Clone> Enumerable<T> for SharedList<T, A> {
    type Cursor<'a> = Enumerator<T, A>
    where
        Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.enumerator()
    }
}

impl<T: Clone, A: Allocator + Clone> Collection<T> for SharedList<T, A> {
    fn count(&self) -> usize {
        self.len()
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn add(&mut self, item: T) -> Result<()> {
        SharedList::add(self, item);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        SharedList::clear(self);
        Ok(())
    }

    fn contains_by<F>(&self, item: &T, eq: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.inner.borrow().contains_by(item, eq)
    }

    fn remove_by<F>(&mut self, item: &T, eq: F) -> Result<bool>
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.inner.borrow_mut().remove_by(item, eq)
    }

    fn copy_to(&self, dest: &mut [T], start: usize) -> Result<()> {
        self.inner.borrow().copy_to(dest, start)
    }
}

impl<T: Clone, A: Allocator + Clone> IndexedList<T> for SharedList<T, A> {
    fn get_item(&self, index: usize) -> Result<T> {
        self.get(index)
    }

    fn set_item(&mut self, index: usize, item: T) -> Result<()> {
        self.set(index, item).map(drop)
    }

    fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.inner.borrow().index_of(item)
    }

    fn insert(&mut self, index: usize, item: T) -> Result<()> {
        SharedList::insert(self, index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<()> {
        SharedList::remove_at(self, index).map(drop)
    }
}
