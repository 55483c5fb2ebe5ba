//! Comparison tests between SegmentedList and std::Vec
//!
//! Random operation sequences are applied to both containers and the results
//! compared after every step. Most lists use a tiny segment size so that
//! every operation crosses segment boundaries.

use proptest::prelude::*;
use segmented_list::{Error, ErrorKind, SegmentConfig, SegmentedList};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// ============================================================================
// COMPARISON TESTING INFRASTRUCTURE
// ============================================================================

/// Eight slots per segment for `i32`.
fn small() -> SegmentConfig {
    SegmentConfig::with_threshold(64)
}

fn small_list(values: &[i32]) -> SegmentedList<i32> {
    let mut list = SegmentedList::with_config(small());
    list.add_range(values.iter().copied());
    list
}

/// Operations that can be applied to a list for comparison testing.
#[derive(Debug, Clone)]
enum ListOp<T> {
    Add(T),
    Insert(usize, T),
    RemoveAt(usize),
    RemoveRange(usize, usize),
    RemoveValue(T),
    RemoveAllMultiplesOf(i32),
    Clear,
    Truncate(usize),
    AddRange(Vec<T>),
    InsertRange(usize, Vec<T>),
    Set(usize, T),
    Swap(usize, usize),
    Reverse,
    ReverseRange(usize, usize),
    Sort,
    SortRange(usize, usize),
    EnsureCapacity(usize),
    TrimExcess,
}

/// Apply an operation to both containers and compare results.
///
/// Operations with invalid arguments must fail on the list and leave both
/// containers untouched.
fn apply_op(std_vec: &mut Vec<i32>, list: &mut SegmentedList<i32>, op: &ListOp<i32>) {
    let len = std_vec.len();
    match op {
        ListOp::Add(v) => {
            std_vec.push(*v);
            list.add(*v);
        }
        ListOp::Insert(idx, v) => {
            let result = list.insert(*idx, *v);
            if *idx <= len {
                std_vec.insert(*idx, *v);
                assert_eq!(result, Ok(()), "insert() mismatch");
            } else {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::OutOfRange);
            }
        }
        ListOp::RemoveAt(idx) => {
            let result = list.remove_at(*idx);
            if *idx < len {
                assert_eq!(result, Ok(std_vec.remove(*idx)), "remove_at() mismatch");
            } else {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::OutOfRange);
            }
        }
        ListOp::RemoveRange(idx, count) => {
            let result = list.remove_range(*idx, *count);
            if idx + count > len {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidRange);
            } else {
                std_vec.drain(*idx..idx + count);
                assert_eq!(result, Ok(()));
            }
        }
        ListOp::RemoveValue(v) => {
            let expected = match std_vec.iter().position(|x| x == v) {
                Some(pos) => {
                    std_vec.remove(pos);
                    true
                }
                None => false,
            };
            assert_eq!(list.remove(v), expected, "remove() mismatch");
        }
        ListOp::RemoveAllMultiplesOf(m) => {
            let before = std_vec.len();
            std_vec.retain(|x| x % m != 0);
            let removed = list.remove_all(|x| x % m == 0);
            assert_eq!(removed, before - std_vec.len(), "remove_all() mismatch");
        }
        ListOp::Clear => {
            std_vec.clear();
            list.clear();
        }
        ListOp::Truncate(new_len) => {
            std_vec.truncate(*new_len);
            list.truncate(*new_len);
        }
        ListOp::AddRange(vals) => {
            std_vec.extend(vals.iter().copied());
            list.add_range(vals.iter().copied());
        }
        ListOp::InsertRange(idx, vals) => {
            let result = list.insert_range(*idx, vals.iter().copied());
            if *idx <= len {
                std_vec.splice(*idx..*idx, vals.iter().copied());
                assert_eq!(result, Ok(()));
            } else {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::OutOfRange);
            }
        }
        ListOp::Set(idx, v) => {
            let result = list.set(*idx, *v);
            if *idx < len {
                let old = std::mem::replace(&mut std_vec[*idx], *v);
                assert_eq!(result, Ok(old), "set() mismatch");
            } else {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::OutOfRange);
            }
        }
        ListOp::Swap(a, b) => {
            if *a < len && *b < len {
                std_vec.swap(*a, *b);
                list.swap(*a, *b);
            }
        }
        ListOp::Reverse => {
            std_vec.reverse();
            list.reverse();
        }
        ListOp::ReverseRange(idx, count) => {
            let result = list.reverse_range(*idx, *count);
            if idx + count <= len {
                std_vec[*idx..idx + count].reverse();
                assert_eq!(result, Ok(()));
            } else {
                assert!(result.is_err());
            }
        }
        ListOp::Sort => {
            std_vec.sort();
            list.sort();
        }
        ListOp::SortRange(idx, count) => {
            let result = list.sort_range(*idx, *count, i32::cmp);
            if idx + count <= len {
                std_vec[*idx..idx + count].sort();
                assert_eq!(result, Ok(()));
            } else {
                assert!(result.is_err());
            }
        }
        ListOp::EnsureCapacity(min) => {
            let capacity = list.ensure_capacity(*min);
            assert!(capacity >= *min);
            assert_eq!(list.ensure_capacity(*min), capacity);
        }
        ListOp::TrimExcess => {
            list.trim_excess();
            assert!(list.capacity() >= list.len());
        }
    }
}

/// Verify that both containers have the same content.
fn assert_lists_equal(std_vec: &[i32], list: &SegmentedList<i32>) {
    assert_eq!(std_vec.len(), list.len(), "length mismatch");
    assert_eq!(std_vec.is_empty(), list.is_empty(), "is_empty mismatch");
    assert!(list.capacity() >= list.len(), "capacity below length");

    for (i, (std_elem, seg_elem)) in std_vec.iter().zip(list.iter()).enumerate() {
        assert_eq!(std_elem, seg_elem, "element mismatch at index {}", i);
    }

    assert_eq!(std_vec.first(), list.first(), "first() mismatch");
    assert_eq!(std_vec.last(), list.last(), "last() mismatch");

    for i in 0..std_vec.len() {
        assert_eq!(std_vec.get(i), list.get(i), "get({}) mismatch", i);
    }

    // Slots past the length are never observable.
    assert_eq!(list.get(list.len()), None);
    assert_eq!(list.get(usize::MAX), None);
}

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Strategy for generating a single list operation.
fn list_op_strategy() -> impl Strategy<Value = ListOp<i32>> {
    prop_oneof![
        any::<i32>().prop_map(ListOp::Add),
        (0usize..60, any::<i32>()).prop_map(|(idx, v)| ListOp::Insert(idx, v)),
        (0usize..60).prop_map(ListOp::RemoveAt),
        (0usize..60, 0usize..20).prop_map(|(idx, n)| ListOp::RemoveRange(idx, n)),
        (0i32..10).prop_map(ListOp::RemoveValue),
        (1i32..5).prop_map(ListOp::RemoveAllMultiplesOf),
        Just(ListOp::Clear),
        (0usize..60).prop_map(ListOp::Truncate),
        prop::collection::vec(any::<i32>(), 0..30).prop_map(ListOp::AddRange),
        (0usize..60, prop::collection::vec(0i32..10, 0..20))
            .prop_map(|(idx, vals)| ListOp::InsertRange(idx, vals)),
        (0usize..60, any::<i32>()).prop_map(|(idx, v)| ListOp::Set(idx, v)),
        (0usize..60, 0usize..60).prop_map(|(a, b)| ListOp::Swap(a, b)),
        Just(ListOp::Reverse),
        (0usize..60, 0usize..30).prop_map(|(idx, n)| ListOp::ReverseRange(idx, n)),
        Just(ListOp::Sort),
        (0usize..60, 0usize..30).prop_map(|(idx, n)| ListOp::SortRange(idx, n)),
        (0usize..200).prop_map(ListOp::EnsureCapacity),
        Just(ListOp::TrimExcess),
    ]
}

/// Strategy for generating a sequence of operations.
fn ops_sequence_strategy() -> impl Strategy<Value = Vec<ListOp<i32>>> {
    prop::collection::vec(list_op_strategy(), 0..200)
}

// ============================================================================
// PROPTEST TESTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Test that a random sequence of operations produces identical results.
    #[test]
    fn proptest_operations_match(ops in ops_sequence_strategy()) {
        let mut std_vec: Vec<i32> = Vec::new();
        let mut list = SegmentedList::with_config(small());

        for op in &ops {
            apply_op(&mut std_vec, &mut list, op);
            assert_lists_equal(&std_vec, &list);
        }
    }

    /// Test that the default segment size behaves the same way.
    #[test]
    fn proptest_operations_match_default_segments(ops in ops_sequence_strategy()) {
        let mut std_vec: Vec<i32> = Vec::new();
        let mut list: SegmentedList<i32> = SegmentedList::new();

        for op in &ops {
            apply_op(&mut std_vec, &mut list, op);
        }
        assert_lists_equal(&std_vec, &list);
    }

    /// Test add followed by iteration.
    #[test]
    fn proptest_add_and_iter(values in prop::collection::vec(any::<i32>(), 0..500)) {
        let mut list = SegmentedList::with_config(small());
        for v in &values {
            list.add(*v);
        }

        let collected: Vec<_> = list.iter().copied().collect();
        prop_assert_eq!(&values, &collected);

        let reversed: Vec<_> = list.iter().rev().copied().collect();
        let expected: Vec<_> = values.iter().rev().copied().collect();
        prop_assert_eq!(reversed, expected);

        let owned: Vec<_> = list.clone().into_iter().collect();
        prop_assert_eq!(&values, &owned);
    }

    /// Test that sort produces the same result.
    #[test]
    fn proptest_sort(values in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut std_vec = values.clone();
        let mut list = small_list(&values);

        std_vec.sort_unstable();
        list.sort();

        prop_assert_eq!(std_vec, list.to_vec());
    }

    /// Test sort_by with a reversed comparator.
    #[test]
    fn proptest_sort_by(values in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut std_vec = values.clone();
        let mut list = small_list(&values);

        std_vec.sort_by(|a, b| b.cmp(a));
        list.sort_by(|a, b| b.cmp(a));

        prop_assert_eq!(std_vec, list.to_vec());
    }

    /// Test binary_search consistency for present and absent values.
    #[test]
    fn proptest_binary_search(
        values in prop::collection::vec(-500i32..500, 0..200),
        search_val in -600i32..600
    ) {
        let mut std_vec = values.clone();
        let mut list = small_list(&values);

        std_vec.sort();
        std_vec.dedup();
        list.clear();
        list.add_range(std_vec.iter().copied());

        prop_assert_eq!(std_vec.binary_search(&search_val), list.binary_search(&search_val));
    }

    /// Test that every present value is found after sorting, with duplicates.
    #[test]
    fn proptest_binary_search_finds_present(values in prop::collection::vec(0i32..50, 1..200)) {
        let mut list = small_list(&values);
        list.sort();

        for v in &values {
            let found = list.binary_search(v);
            prop_assert!(found.is_ok());
            prop_assert_eq!(list.get(found.unwrap_or(0)), Some(v));
        }
        match list.binary_search(&100) {
            Err(pos) => prop_assert_eq!(pos, list.len()),
            Ok(_) => prop_assert!(false, "found an absent value"),
        }
    }

    /// Test binary_search_in against a slice window.
    #[test]
    fn proptest_binary_search_in(
        values in prop::collection::vec(-100i32..100, 0..100),
        start in 0usize..100,
        count in 0usize..100,
        search_val in -100i32..100
    ) {
        let mut std_vec = values.clone();
        std_vec.sort();
        std_vec.dedup();
        let list = small_list(&std_vec);

        let result = list.binary_search_in(start, count, |x| x.cmp(&search_val));
        if start + count <= std_vec.len() {
            let expected = std_vec[start..start + count]
                .binary_search(&search_val)
                .map(|i| i + start)
                .map_err(|i| i + start);
            prop_assert_eq!(result, Ok(expected));
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// Test contains and index_of consistency.
    #[test]
    fn proptest_search(
        values in prop::collection::vec(0i32..20, 0..100),
        search_val in 0i32..25
    ) {
        let list = small_list(&values);

        prop_assert_eq!(values.contains(&search_val), list.contains(&search_val));
        prop_assert_eq!(
            values.iter().position(|x| *x == search_val),
            list.index_of(&search_val)
        );
        prop_assert_eq!(
            values.iter().rposition(|x| *x == search_val),
            list.last_index_of(&search_val)
        );
    }

    /// Test windowed forward searches against slice positions.
    #[test]
    fn proptest_index_of_in(
        values in prop::collection::vec(0i32..10, 0..60),
        start in 0usize..70,
        count in 0usize..70,
        search_val in 0i32..10
    ) {
        let list = small_list(&values);
        let result = list.index_of_in(&search_val, start, count);
        if start <= values.len() && count <= values.len() - start {
            let expected = values[start..start + count]
                .iter()
                .position(|x| *x == search_val)
                .map(|i| i + start);
            prop_assert_eq!(result, Ok(expected));
        } else {
            prop_assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::OutOfRange));
        }
    }

    /// Test windowed backward searches against slice positions.
    #[test]
    fn proptest_last_index_of_in(
        values in prop::collection::vec(0i32..10, 0..60),
        start in 0usize..70,
        count in 0usize..70,
        search_val in 0i32..10
    ) {
        let list = small_list(&values);
        let result = list.last_index_of_in(&search_val, start, count);
        if values.is_empty() {
            prop_assert_eq!(result, Ok(None));
        } else if start < values.len() && count <= start + 1 {
            let low = start + 1 - count;
            let expected = values[low..=start]
                .iter()
                .rposition(|x| *x == search_val)
                .map(|i| i + low);
            prop_assert_eq!(result, Ok(expected));
        } else {
            prop_assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::OutOfRange));
        }
    }

    /// Test remove_all against retain.
    #[test]
    fn proptest_remove_all(
        values in prop::collection::vec(any::<i32>(), 0..200),
        modulus in 1i32..7
    ) {
        let mut std_vec = values.clone();
        let mut list = small_list(&values);

        std_vec.retain(|x| x % modulus != 0);
        let removed = list.remove_all(|x| x % modulus == 0);

        prop_assert_eq!(removed, values.len() - std_vec.len());
        prop_assert_eq!(std_vec, list.to_vec());
    }

    /// Test find_all against filter.
    #[test]
    fn proptest_find_all(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let list = small_list(&values);
        let found = list.find_all(|x| *x > 0);
        let expected: Vec<i32> = values.iter().copied().filter(|x| *x > 0).collect();
        prop_assert_eq!(found.to_vec(), expected);
    }

    /// Test get_range against slicing.
    #[test]
    fn proptest_get_range(
        values in prop::collection::vec(any::<i32>(), 0..100),
        start in 0usize..110,
        count in 0usize..110
    ) {
        let list = small_list(&values);
        let result = list.get_range(start, count);
        if start + count <= values.len() {
            prop_assert_eq!(result.map(|r| r.to_vec()), Ok(values[start..start + count].to_vec()));
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// Test insert_range at every kind of position.
    #[test]
    fn proptest_insert_range(
        values in prop::collection::vec(any::<i32>(), 0..100),
        extra in prop::collection::vec(any::<i32>(), 0..50),
        position in 0usize..100
    ) {
        let position = position.min(values.len());
        let mut std_vec = values.clone();
        let mut list = small_list(&values);

        std_vec.splice(position..position, extra.iter().copied());
        list.insert_range(position, extra.iter().copied()).unwrap();

        prop_assert_eq!(std_vec, list.to_vec());
    }

    /// Test that insert followed by remove_at restores the list.
    #[test]
    fn proptest_insert_remove_restores(
        values in prop::collection::vec(any::<i32>(), 0..100),
        position in 0usize..100,
        v in any::<i32>()
    ) {
        let position = position.min(values.len());
        let mut list = small_list(&values);

        list.insert(position, v).unwrap();
        prop_assert_eq!(list.remove_at(position), Ok(v));
        prop_assert_eq!(list.to_vec(), values);
    }

    /// Test with_capacity reports the exact capacity.
    #[test]
    fn proptest_with_capacity(capacity in 0usize..5000) {
        let list = SegmentedList::<i32>::with_capacity_and_config(capacity, small());
        prop_assert_eq!(list.capacity(), capacity);
        prop_assert_eq!(list.len(), 0);
    }

    /// Test that growth keeps every full segment in place.
    #[test]
    fn proptest_growth_keeps_full_segments(initial in 0usize..100, extra_segments in 1usize..6) {
        let mut list = SegmentedList::<i32>::with_capacity_and_config(initial, small());
        let full = initial / list.segment_size();
        let before: Vec<*const i32> = list
            .store()
            .segments()
            .iter()
            .take(full)
            .map(|block| block.as_ptr())
            .collect();

        list.ensure_capacity(list.capacity() + extra_segments * list.segment_size());
        let after: Vec<*const i32> = list
            .store()
            .segments()
            .iter()
            .take(full)
            .map(|block| block.as_ptr())
            .collect();

        prop_assert_eq!(before, after);
        prop_assert!(list.store().segment_count() >= full + extra_segments);
    }

    /// Test clone and equality.
    #[test]
    fn proptest_clone(values in prop::collection::vec(any::<i32>(), 0..100)) {
        let list = small_list(&values);
        let cloned = list.clone();
        prop_assert_eq!(&list, &cloned);
        prop_assert_eq!(cloned.to_vec(), values);
    }

    /// Test that hashing matches between equal lists with different segment sizes.
    #[test]
    fn proptest_hash(values in prop::collection::vec(any::<i32>(), 0..100)) {
        fn hash_val<T: Hash>(val: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            val.hash(&mut hasher);
            hasher.finish()
        }

        let tiny = small_list(&values);
        let default: SegmentedList<i32> = values.iter().copied().collect();
        prop_assert_eq!(&tiny, &default);
        prop_assert_eq!(hash_val(&tiny), hash_val(&default));
    }
}

// ============================================================================
// QUICKCHECK TESTS
// ============================================================================

#[cfg(test)]
mod quickcheck_tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn qc_len_after_add(values: Vec<i32>) -> bool {
        let list = small_list(&values);
        list.len() == values.len()
    }

    #[quickcheck]
    fn qc_from_iter_round_trip(values: Vec<i32>) -> bool {
        let list: SegmentedList<i32> = values.iter().copied().collect();
        let back: Vec<i32> = list.into_iter().collect();
        back == values
    }

    #[quickcheck]
    fn qc_clear_empties(values: Vec<i32>) -> bool {
        let mut list = small_list(&values);
        let capacity = list.capacity();
        list.clear();
        list.is_empty() && list.capacity() == capacity
    }

    #[quickcheck]
    fn qc_reverse_twice_is_identity(values: Vec<i32>) -> bool {
        let mut list = small_list(&values);
        list.reverse();
        list.reverse();
        list.to_vec() == values
    }

    #[quickcheck]
    fn qc_sort_produces_sorted(values: Vec<i32>) -> bool {
        let mut list = small_list(&values);
        list.sort();
        list.to_vec().windows(2).all(|w| w[0] <= w[1])
    }

    #[quickcheck]
    fn qc_ensure_capacity_idempotent(min: u16) -> bool {
        let mut list = SegmentedList::<i32>::with_config(small());
        let first = list.ensure_capacity(min as usize);
        first >= min as usize && list.ensure_capacity(min as usize) == first
    }
}

// ============================================================================
// EDGE CASE TESTS
// ============================================================================

#[cfg(test)]
mod edge_case_tests {
    use super::*;

    #[test]
    fn test_empty_operations() {
        let mut list: SegmentedList<i32> = SegmentedList::new();

        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_eq!(list.index_of(&1), None);
        assert_eq!(list.last_index_of(&1), None);
        assert_eq!(list.binary_search(&1), Err(0));
        assert_eq!(list.remove_range(0, 0), Ok(()));
        assert_eq!(list.remove_all(|_| true), 0);
        assert!(list.true_for_all(|_| false));
        assert!(!list.exists(|_| true));
        assert_eq!(list.capacity(), 0);

        list.sort();
        list.reverse();
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_ensure_capacity_on_empty_uses_default() {
        let mut list: SegmentedList<i32> = SegmentedList::new();
        assert_eq!(list.ensure_capacity(1), segmented_list::DEFAULT_CAPACITY);
    }

    #[test]
    fn test_boundary_segment_sizes() {
        let sizes = [1, 7, 8, 9, 15, 16, 17, 63, 64, 65];
        for &n in &sizes {
            let values: Vec<i32> = (0..n).collect();
            let list = small_list(&values);
            assert_lists_equal(&values, &list);
        }
    }

    #[test]
    fn test_large_list_default_segments() {
        let n = 100_000;
        let mut list: SegmentedList<i32> = SegmentedList::new();
        for i in 0..n {
            list.add(i);
        }
        assert_eq!(list.len(), n as usize);
        assert!(list.store().segment_count() >= 6);
        assert_eq!(list[65_536], 65_536);
        assert_eq!(list.binary_search(&99_999), Ok(99_999));
    }

    #[test]
    fn test_insert_at_all_positions() {
        let values: Vec<i32> = (0..20).collect();
        for pos in 0..=values.len() {
            let mut std_vec = values.clone();
            let mut list = small_list(&values);
            std_vec.insert(pos, -1);
            list.insert(pos, -1).unwrap();
            assert_lists_equal(&std_vec, &list);
        }
    }

    #[test]
    fn test_remove_range_all_ranges() {
        let values: Vec<i32> = (0..20).collect();
        for start in 0..=values.len() {
            for end in start..=values.len() {
                let mut std_vec = values.clone();
                let mut list = small_list(&values);
                std_vec.drain(start..end);
                list.remove_range(start, end - start).unwrap();
                assert_lists_equal(&std_vec, &list);
            }
        }
    }

    #[test]
    fn test_error_kinds() {
        let mut list = small_list(&[1, 2, 3]);
        assert_eq!(
            list.remove_range(4, 0),
            Err(Error::InvalidRange {
                index: 4,
                count: 0,
                len: 3
            })
        );
        assert_eq!(
            list.remove_range(2, 2),
            Err(Error::InvalidRange {
                index: 2,
                count: 2,
                len: 3
            })
        );
        assert_eq!(list.set_capacity(2).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(list.to_vec(), [1, 2, 3]);
    }

    #[test]
    fn test_iter_mut_modifications() {
        let mut list = small_list(&(0..30).collect::<Vec<_>>());
        for x in list.iter_mut() {
            *x *= 2;
        }
        let expected: Vec<i32> = (0..30).map(|x| x * 2).collect();
        assert_eq!(list.to_vec(), expected);
    }

    #[test]
    fn test_double_ended_iterator() {
        let list = small_list(&(0..20).collect::<Vec<_>>());
        let mut iter = list.iter();
        let mut front = Vec::new();
        let mut back = Vec::new();
        loop {
            match iter.next() {
                Some(x) => front.push(*x),
                None => break,
            }
            match iter.next_back() {
                Some(x) => back.push(*x),
                None => break,
            }
        }
        back.reverse();
        front.extend(back);
        assert_eq!(front, (0..20).collect::<Vec<_>>());
    }
}

// ============================================================================
// DROP COUNTING TESTS
// ============================================================================

#[cfg(test)]
mod drop_tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct DropCounter {
        count: Rc<RefCell<usize>>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            *self.count.borrow_mut() += 1;
        }
    }

    fn counted(n: usize) -> (Rc<RefCell<usize>>, SegmentedList<DropCounter>) {
        let count = Rc::new(RefCell::new(0));
        let mut list = SegmentedList::with_config(SegmentConfig::with_threshold(64));
        for _ in 0..n {
            list.add(DropCounter {
                count: count.clone(),
            });
        }
        (count, list)
    }

    #[test]
    fn test_drop_on_clear() {
        let (count, mut list) = counted(20);
        assert_eq!(*count.borrow(), 0);
        list.clear();
        assert_eq!(*count.borrow(), 20);
    }

    #[test]
    fn test_drop_on_remove_range() {
        let (count, mut list) = counted(20);
        list.remove_range(3, 11).unwrap();
        assert_eq!(*count.borrow(), 11);
        drop(list);
        assert_eq!(*count.borrow(), 20);
    }

    #[test]
    fn test_drop_on_remove_all() {
        let (count, mut list) = counted(20);
        let mut i = 0;
        list.remove_all(|_| {
            i += 1;
            i % 2 == 0
        });
        assert_eq!(*count.borrow(), 10);
    }

    #[test]
    fn test_drop_on_set() {
        let (count, mut list) = counted(3);
        let replacement = DropCounter {
            count: count.clone(),
        };
        drop(list.set(1, replacement));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_drop_on_into_iter_partial() {
        let (count, list) = counted(20);
        let mut iter = list.into_iter();
        drop(iter.next());
        drop(iter.next_back());
        assert_eq!(*count.borrow(), 2);
        drop(iter);
        assert_eq!(*count.borrow(), 20);
    }

    #[test]
    fn test_drop_on_set_capacity_shrink() {
        let (count, mut list) = counted(10);
        list.set_capacity(40).unwrap();
        list.trim_excess();
        assert_eq!(list.capacity(), 10);
        assert_eq!(*count.borrow(), 0);
    }
}

// ============================================================================
// STRESS TESTS
// ============================================================================

#[cfg(test)]
mod stress_tests {
    use super::*;

    #[test]
    fn stress_random_operations() {
        use rand::Rng;
        let mut rng = rand::rng();

        let mut list = SegmentedList::with_config(small());
        let mut std_vec: Vec<i32> = Vec::new();

        for _ in 0..10_000 {
            let op: u8 = rng.random_range(0..8);

            match op {
                0..=3 => {
                    let val: i32 = rng.random();
                    list.add(val);
                    std_vec.push(val);
                }
                4 => {
                    let idx = rng.random_range(0..=std_vec.len());
                    let val: i32 = rng.random();
                    list.insert(idx, val).unwrap();
                    std_vec.insert(idx, val);
                }
                5 => {
                    if !std_vec.is_empty() {
                        let idx = rng.random_range(0..std_vec.len());
                        assert_eq!(list.remove_at(idx), Ok(std_vec.remove(idx)));
                    }
                }
                6 => {
                    if !std_vec.is_empty() {
                        let start = rng.random_range(0..std_vec.len());
                        let count = rng.random_range(0..=(std_vec.len() - start).min(10));
                        list.remove_range(start, count).unwrap();
                        std_vec.drain(start..start + count);
                    }
                }
                7 => {
                    let len = rng.random_range(0..=std_vec.len());
                    list.truncate(len);
                    std_vec.truncate(len);
                }
                _ => unreachable!(),
            }
        }

        assert_lists_equal(&std_vec, &list);
    }

    #[test]
    fn stress_sort_large() {
        use rand::Rng;
        let mut rng = rand::rng();

        let values: Vec<i32> = (0..50_000).map(|_| rng.random_range(-1000..1000)).collect();
        let mut std_vec = values.clone();
        let mut list: SegmentedList<i32> = values.into_iter().collect();

        std_vec.sort_unstable();
        list.sort();
        assert_eq!(list.to_vec(), std_vec);
    }
}

// ============================================================================
// ZERO-SIZED TYPE (ZST) TESTS
// ============================================================================

#[cfg(test)]
mod zst_tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    struct Zst;

    #[test]
    fn test_zst_add_remove() {
        let mut list: SegmentedList<Zst> = SegmentedList::new();
        for _ in 0..1000 {
            list.add(Zst);
        }
        assert_eq!(list.len(), 1000);
        assert_eq!(list.remove_at(999), Ok(Zst));
        list.insert(0, Zst).unwrap();
        list.remove_range(10, 500).unwrap();
        assert_eq!(list.len(), 500);
        assert_eq!(list.iter().count(), 500);
    }

    #[test]
    fn test_zst_sort_and_search() {
        let mut list: SegmentedList<Zst> = (0..100).map(|_| Zst).collect();
        list.sort();
        list.reverse();
        assert!(list.binary_search(&Zst).is_ok());
        assert_eq!(list.index_of(&Zst), Some(0));
        assert_eq!(list.last_index_of(&Zst), Some(99));
    }

    #[test]
    fn test_zst_capacity() {
        let mut list: SegmentedList<Zst> = SegmentedList::with_capacity(70_000);
        assert_eq!(list.capacity(), 70_000);
        list.set_capacity(10).unwrap();
        assert_eq!(list.capacity(), 10);
    }
}
