//! Tunables for segment sizing and enumerator behavior.

/// Byte size above which a single allocation is considered too large.
///
/// Segments are sized so that one segment, including a small array header,
/// stays below this threshold.
pub const DEFAULT_LARGE_ALLOCATION_THRESHOLD: usize = 85_000;

/// Bytes of bookkeeping assumed in front of every segment allocation.
pub const ARRAY_HEADER_BYTES: usize = 2 * std::mem::size_of::<usize>();

/// Smallest segment length, used even for very large element types.
pub const MIN_SEGMENT_SIZE: usize = 8;

/// Capacity chosen by the first growth of an empty list.
pub const DEFAULT_CAPACITY: usize = MIN_SEGMENT_SIZE;

/// Controls how large each segment of a list may be.
///
/// # Example
///
/// ```
/// use segmented_list::SegmentConfig;
///
/// assert_eq!(SegmentConfig::default().segment_size::<i32>(), 16 * 1024);
/// assert_eq!(SegmentConfig::with_threshold(64).segment_size::<i32>(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentConfig {
    large_allocation_threshold: usize,
}

impl SegmentConfig {
    /// The configuration used by `SegmentedList::new`.
    pub const DEFAULT: Self = Self::with_threshold(DEFAULT_LARGE_ALLOCATION_THRESHOLD);

    /// Creates a configuration with the given large-allocation threshold in bytes.
    pub const fn with_threshold(large_allocation_threshold: usize) -> Self {
        Self {
            large_allocation_threshold,
        }
    }

    /// Returns the large-allocation threshold in bytes.
    pub const fn large_allocation_threshold(&self) -> usize {
        self.large_allocation_threshold
    }

    /// Returns the number of elements per segment for `T`.
    ///
    /// This is the largest power of two whose segment stays below the
    /// threshold, but never less than [`MIN_SEGMENT_SIZE`]. Zero-sized types
    /// are sized as if they were one byte wide.
    pub const fn segment_size<T>(&self) -> usize {
        let element_size = match std::mem::size_of::<T>() {
            0 => 1,
            size => size,
        };

        let mut size = MIN_SEGMENT_SIZE;
        loop {
            let next = size << 1;
            if next > isize::MAX as usize / 2 {
                break;
            }
            match next.checked_mul(element_size) {
                Some(bytes)
                    if bytes.saturating_add(ARRAY_HEADER_BYTES)
                        < self.large_allocation_threshold =>
                {
                    size = next
                }
                _ => break,
            }
        }
        size
    }

    /// Returns `log2(segment_size::<T>())`.
    pub const fn segment_shift<T>(&self) -> u32 {
        self.segment_size::<T>().trailing_zeros()
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What `Enumerator::current` reports when the cursor is not on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurrentPolicy {
    /// Report the absence as `Ok(None)`.
    #[default]
    Default,
    /// Fail with `Error::NotPositioned`.
    Error,
}

/// Options for enumerators handed out by shared lists and projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumeratorOptions {
    /// Behavior of `current` before the first element and after the last.
    pub current: CurrentPolicy,
    /// Whether `reset` is allowed.
    pub resettable: bool,
}

impl EnumeratorOptions {
    /// Options with the given `current` policy and reset enabled.
    pub const fn with_current(current: CurrentPolicy) -> Self {
        Self {
            current,
            resettable: true,
        }
    }
}

impl Default for EnumeratorOptions {
    fn default() -> Self {
        Self::with_current(CurrentPolicy::Default)
    }
}
