//! Error types for `SegmentedList` and its views.

use thiserror::Error;

/// Result type for list operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by list, enumerator and projection operations.
///
/// Every error leaves the list exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A single index, count or capacity is outside the values the list accepts.
    #[error("{param} is out of range: {value} (limit {bound})")]
    OutOfRange {
        /// Name of the offending argument.
        param: &'static str,
        /// The value that was passed.
        value: usize,
        /// The limit the value was checked against.
        bound: usize,
    },

    /// An index and count that are fine on their own but together run past the end.
    #[error("offset {index} and count {count} are out of bounds for length {len}")]
    InvalidRange {
        /// Start of the requested range.
        index: usize,
        /// Length of the requested range.
        count: usize,
        /// Length of the collection the range was checked against.
        len: usize,
    },

    /// The list changed length after the enumerator was created.
    #[error("collection was modified; enumeration operation may not execute")]
    Modified,

    /// `current` was read before the first `move_next` or after the end.
    #[error("enumeration has either not started or has already finished")]
    NotPositioned,

    /// The list observed by an enumerator has been dropped.
    #[error("the list being enumerated no longer exists")]
    Detached,

    /// A mutating operation was invoked on a read-only view.
    #[error("{operation} is not supported")]
    NotSupported {
        /// The rejected operation.
        operation: &'static str,
    },
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument is out of range on its own.
    OutOfRange,
    /// A combination of arguments exceeds the bounds.
    InvalidRange,
    /// The operation is not valid in the current state.
    InvalidOperation,
    /// The operation is not supported by this view.
    NotSupported,
}

impl Error {
    /// Returns the category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::InvalidRange { .. } => ErrorKind::InvalidRange,
            Error::Modified | Error::NotPositioned | Error::Detached => {
                ErrorKind::InvalidOperation
            }
            Error::NotSupported { .. } => ErrorKind::NotSupported,
        }
    }

    pub(crate) const fn out_of_range(param: &'static str, value: usize, bound: usize) -> Self {
        Error::OutOfRange {
            param,
            value,
            bound,
        }
    }

    pub(crate) const fn read_only(operation: &'static str) -> Self {
        Error::NotSupported { operation }
    }
}
