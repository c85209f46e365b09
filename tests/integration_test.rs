use trisort::prelude::*;

use rand::Rng;
use std::collections::HashMap;

fn random_input(len: usize, max_value: i32) -> Vec<i32> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(0..max_value)).collect()
}

fn counts(values: &[i32]) -> HashMap<i32, usize> {
    let mut map = HashMap::new();
    for v in values {
        *map.entry(*v).or_insert(0) += 1;
    }
    map
}

#[test]
fn test_sortedness() {
    let sorter = Sorter::with_defaults().unwrap();
    let sorted = sorter.sort(random_input(1000, 20)).unwrap();

    assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_multiset_preservation() {
    let sorter = Sorter::with_defaults().unwrap();
    let input = random_input(1000, 20);
    let expected = counts(&input);

    let sorted = sorter.sort(input).unwrap();

    assert_eq!(sorted.len(), 1000);
    assert_eq!(counts(&sorted), expected);
}

#[test]
fn test_idempotence() {
    let sorter = Sorter::with_defaults().unwrap();

    let once = sorter.sort(random_input(500, 10)).unwrap();
    let twice = sorter.sort(once.clone()).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_empty_and_singleton() {
    let sorter = Sorter::with_defaults().unwrap();

    assert_eq!(sorter.sort(Vec::<i32>::new()).unwrap(), Vec::<i32>::new());
    assert_eq!(sorter.sort(vec![17]).unwrap(), vec![17]);
}

#[test]
fn test_all_equal_short_circuit() {
    let sorter = Sorter::with_defaults().unwrap();
    assert_eq!(sorter.sort(vec![5; 5]).unwrap(), vec![5; 5]);
    assert_eq!(sorter.sort(vec![5; 1000]).unwrap(), vec![5; 1000]);
}

#[test]
fn test_parallel_matches_sequential() {
    let sorter = Sorter::with_defaults().unwrap();
    let input = random_input(1000, 20);

    let parallel = sorter.sort(input.clone()).unwrap();
    let sequential = sequential_sort(&input);

    assert_eq!(parallel, sequential);
}

#[test]
fn test_cutoff_boundaries() {
    // Default cutoff is 4; exercise sizes 3, 4 and 5 around the fallback
    // threshold.
    let sorter = Sorter::with_defaults().unwrap();

    for len in [3usize, 4, 5] {
        let input = random_input(len, 100);
        let mut expected = input.clone();
        expected.sort();

        assert_eq!(sorter.sort(input).unwrap(), expected, "len = {}", len);
    }
}

#[test]
fn test_reference_example() {
    // First call pivots on 6: less [3,1,4,1,5,2], equal [6], greater [9].
    let sorter = Sorter::with_defaults().unwrap();
    let sorted = sorter.sort(vec![3, 1, 4, 1, 5, 9, 2, 6]).unwrap();
    assert_eq!(sorted, vec![1, 1, 2, 3, 4, 5, 6, 9]);
}

#[test]
fn test_partition_api() {
    let seq = [3, 1, 4, 1, 5, 9, 2, 6];
    let pivot = *select_pivot(&seq).unwrap();

    assert_eq!(pivot, 6);
    assert_eq!(partition(&seq, Direction::Less, &pivot), vec![3, 1, 4, 1, 5, 2]);
    assert_eq!(partition(&seq, Direction::Equal, &pivot), vec![6]);
    assert_eq!(partition(&seq, Direction::Greater, &pivot), vec![9]);
}

#[test]
fn test_select_pivot_empty_is_invalid_argument() {
    let err = select_pivot::<i32>(&[]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_large_reverse_sorted_input() {
    let sorter = Sorter::with_defaults().unwrap();
    let input: Vec<i32> = (0..2000).rev().collect();

    let sorted = sorter.sort(input).unwrap();
    assert_eq!(sorted, (0..2000).collect::<Vec<_>>());
}

#[test]
fn test_concurrent_sorts_share_one_sorter() {
    let sorter = Sorter::with_defaults().unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            let sorter = &sorter;
            s.spawn(move || {
                let input = random_input(500, 10);
                let mut expected = input.clone();
                expected.sort();

                assert_eq!(sorter.sort(input).unwrap(), expected);
            });
        }
    });
}

#[test]
fn test_scheduling_failure_surfaces_from_sort() {
    // With a one-task queue cap the root task occupies the only slot, so
    // the first nested greater-branch spawn is rejected; the failure must
    // propagate out of sort instead of hanging or returning partial data.
    let config = Config::builder()
        .num_threads(1)
        .max_pending_tasks(1)
        .build()
        .unwrap();
    let sorter = Sorter::new(config).unwrap();

    let input: Vec<i32> = (0..64).rev().collect();
    let err = sorter.sort(input).unwrap_err();
    assert!(matches!(err, Error::Scheduling(_)));
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct PoisonOnCompare(i32);

impl PartialOrd for PoisonOnCompare {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PoisonOnCompare {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 == 13 || other.0 == 13 {
            panic!("comparison against poisoned value");
        }
        self.0.cmp(&other.0)
    }
}

#[test]
fn test_panicking_comparison_surfaces_as_worker_panic() {
    // A panic inside a sort task completes its slot with an error; the
    // join resolves and sort reports the panic instead of spinning.
    let config = Config::builder().num_threads(2).build().unwrap();
    let sorter = Sorter::new(config).unwrap();

    let input: Vec<PoisonOnCompare> = (0..16).map(PoisonOnCompare).collect();
    let err = sorter.sort(input).unwrap_err();
    assert!(matches!(err, Error::WorkerPanic(_)));
}

#[test]
fn test_custom_config() {
    let config = Config::builder()
        .num_threads(2)
        .cutoff(16)
        .thread_name_prefix("sort-test")
        .build()
        .unwrap();

    let sorter = Sorter::new(config).unwrap();
    assert_eq!(sorter.num_threads(), 2);

    let input = random_input(300, 50);
    let mut expected = input.clone();
    expected.sort();

    assert_eq!(sorter.sort(input).unwrap(), expected);
}
