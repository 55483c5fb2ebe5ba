//! Cursors over lists.
//!
//! [`Enumerator`] observes a [`SharedList`](crate::SharedList) through a weak
//! handle and fails fast once the list changes length. [`ListCursor`] borrows
//! a plain [`SegmentedList`], which the borrow keeps frozen.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use allocator_api2::alloc::{Allocator, Global};

use crate::capability::Cursor;
use crate::config::{CurrentPolicy, EnumeratorOptions};
use crate::error::{Error, Result};
use crate::SegmentedList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    NotStarted,
    InRange,
    Finished,
}

fn unpositioned<'a, T>(policy: CurrentPolicy) -> Result<Option<&'a T>> {
    match policy {
        CurrentPolicy::Default => Ok(None),
        CurrentPolicy::Error => Err(Error::NotPositioned),
    }
}

/// A fail-fast cursor over a shared list.
///
/// The enumerator records the list's version when it is created. Any
/// length-changing mutation afterwards makes the next
/// [`move_next`](Self::move_next) or [`reset`](Self::reset) fail with
/// [`Error::Modified`]. Overwriting an element does not.
///
/// The current element is cloned out of the list on every step, so
/// [`current`](Self::current) keeps returning it even after a mutation.
pub struct Enumerator<T, A: Allocator + Clone = Global> {
    list: Weak<RefCell<SegmentedList<T, A>>>,
    version: u64,
    index: usize,
    state: CursorState,
    current: Option<T>,
    options: EnumeratorOptions,
    /// Set once the `Iterator` impl has yielded an error
    faulted: bool,
}

impl<T: Clone, A: Allocator + Clone> Enumerator<T, A> {
    pub(crate) fn new(
        list: &Rc<RefCell<SegmentedList<T, A>>>,
        version: u64,
        options: EnumeratorOptions,
    ) -> Self {
        Self {
            list: Rc::downgrade(list),
            version,
            index: 0,
            state: CursorState::NotStarted,
            current: None,
            options,
            faulted: false,
        }
    }

    /// Returns the options this enumerator was created with.
    pub fn options(&self) -> EnumeratorOptions {
        self.options
    }

    /// Upgrades the handle and checks that the list has not changed length.
    fn live_list(&self) -> Result<Rc<RefCell<SegmentedList<T, A>>>> {
        let list = self.list.upgrade().ok_or(Error::Detached)?;
        let version = list.try_borrow().map_err(|_| Error::Modified)?.version();
        if version != self.version {
            return Err(Error::Modified);
        }
        Ok(list)
    }

    /// Advances to the next element.
    ///
    /// Returns `Ok(false)` once the end is reached, and keeps doing so on
    /// later calls. Fails with [`Error::Modified`] if the list changed length
    /// since the enumerator was created, and with [`Error::Detached`] if the
    /// list has been dropped.
    pub fn move_next(&mut self) -> Result<bool> {
        let list = self.live_list()?;
        let list = list.try_borrow().map_err(|_| Error::Modified)?;

        let next = match self.state {
            CursorState::Finished => return Ok(false),
            CursorState::NotStarted => 0,
            CursorState::InRange => self.index + 1,
        };

        match list.get(next) {
            Some(item) => {
                self.index = next;
                self.current = Some(item.clone());
                self.state = CursorState::InRange;
                Ok(true)
            }
            None => {
                self.index = list.len();
                self.current = None;
                self.state = CursorState::Finished;
                Ok(false)
            }
        }
    }

    /// The element under the cursor.
    ///
    /// Before the first [`move_next`](Self::move_next) and after the end the
    /// result depends on [`EnumeratorOptions::current`].
    pub fn current(&self) -> Result<Option<&T>> {
        match (self.state, &self.current) {
            (CursorState::InRange, Some(item)) => Ok(Some(item)),
            _ => unpositioned(self.options.current),
        }
    }

    /// Moves back before the first element.
    ///
    /// Fails with [`Error::NotSupported`] if the enumerator is not
    /// resettable and with [`Error::Modified`] if the list changed length.
    pub fn reset(&mut self) -> Result<()> {
        if !self.options.resettable {
            return Err(Error::read_only("reset"));
        }
        self.live_list()?;
        self.index = 0;
        self.state = CursorState::NotStarted;
        self.current = None;
        self.faulted = false;
        Ok(())
    }
}

impl<T: Clone, A: Allocator + Clone> Cursor<T> for Enumerator<T, A> {
    fn move_next(&mut self) -> Result<bool> {
        Enumerator::move_next(self)
    }

    fn current(&self) -> Result<Option<&T>> {
        Enumerator::current(self)
    }

    fn reset(&mut self) -> Result<()> {
        Enumerator::reset(self)
    }
}

/// Yields clones of the remaining elements.
///
/// A failed step is yielded once as `Some(Err(_))`; the iterator then ends.
impl<T: Clone, A: Allocator + Clone> Iterator for Enumerator<T, A> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.faulted {
            return None;
        }
        match self.move_next() {
            Ok(true) => self.current.clone().map(Ok),
            Ok(false) => None,
            Err(error) => {
                self.faulted = true;
                Some(Err(error))
            }
        }
    }
}

impl<T, A: Allocator + Clone> std::fmt::Debug for Enumerator<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enumerator")
            .field("version", &self.version)
            .field("index", &self.index)
            .field("state", &self.state)
            .field("options", &self.options)
            .finish()
    }
}

/// A cursor borrowing a [`SegmentedList`].
pub struct ListCursor<'a, T, A: Allocator + Clone = Global> {
    list: &'a SegmentedList<T, A>,
    index: usize,
    state: CursorState,
    options: EnumeratorOptions,
}

impl<'a, T, A: Allocator + Clone> ListCursor<'a, T, A> {
    pub(crate) fn new(list: &'a SegmentedList<T, A>, options: EnumeratorOptions) -> Self {
        Self {
            list,
            index: 0,
            state: CursorState::NotStarted,
            options,
        }
    }
}

impl<T, A: Allocator + Clone> Cursor<T> for ListCursor<'_, T, A> {
    fn move_next(&mut self) -> Result<bool> {
        let next = match self.state {
            CursorState::Finished => return Ok(false),
            CursorState::NotStarted => 0,
            CursorState::InRange => self.index + 1,
        };
        if next < self.list.len() {
            self.index = next;
            self.state = CursorState::InRange;
            Ok(true)
        } else {
            self.index = self.list.len();
            self.state = CursorState::Finished;
            Ok(false)
        }
    }

    fn current(&self) -> Result<Option<&T>> {
        match self.state {
            CursorState::InRange => Ok(self.list.get(self.index)),
            _ => unpositioned(self.options.current),
        }
    }

    fn reset(&mut self) -> Result<()> {
        if !self.options.resettable {
            return Err(Error::read_only("reset"));
        }
        self.index = 0;
        self.state = CursorState::NotStarted;
        Ok(())
    }
}

impl<T, A: Allocator + Clone> std::fmt::Debug for ListCursor<'_, T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListCursor")
            .field("index", &self.index)
            .field("state", &self.state)
            .finish()
    }
}
