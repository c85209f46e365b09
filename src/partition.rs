//! Sequential partition engine.
//!
//! Pure three-way partitioning around a pivot and the recursive sequential
//! sort built from it. No executor involvement; everything here only reads
//! its input and allocates fresh output, so calls are safe from any number
//! of threads at once.

use crate::error::{Error, Result};

/// Which subset of a sequence a partition call returns, relative to the
/// pivot value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Elements strictly less than the pivot.
    Less,
    /// Elements equal to the pivot.
    Equal,
    /// Elements strictly greater than the pivot.
    Greater,
}

/// Select the pivot of a sequence: its last element.
///
/// This is a fixed, non-adaptive strategy. Worst-case quadratic behavior on
/// already-sorted input is a known, accepted limitation of the contract.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the sequence is empty.
pub fn select_pivot<T>(seq: &[T]) -> Result<&T> {
    seq.last()
        .ok_or_else(|| Error::invalid_argument("cannot select a pivot from an empty sequence"))
}

/// Return the elements of `seq` selected by `direction` relative to
/// `pivot`, in their original scan order (stable filter).
///
/// Always allocates a fresh sequence; returns an empty one on no matches.
pub fn partition<T: Ord + Clone>(seq: &[T], direction: Direction, pivot: &T) -> Vec<T> {
    seq.iter()
        .filter(|val| match direction {
            Direction::Less => *val < pivot,
            Direction::Equal => *val == pivot,
            Direction::Greater => *val > pivot,
        })
        .cloned()
        .collect()
}

/// Purely recursive sequential quicksort over a borrowed sequence.
///
/// Also the fallback the parallel scheduler delegates to below its cutoff.
pub fn sequential_sort<T: Ord + Clone>(seq: &[T]) -> Vec<T> {
    if seq.len() <= 1 {
        return seq.to_vec();
    }

    // Non-empty here, so the last-element pivot exists.
    let pivot = seq[seq.len() - 1].clone();

    let equal = partition(seq, Direction::Equal, &pivot);
    if equal.len() == seq.len() {
        // Every remaining element is identical; no useful split left.
        return equal;
    }

    let less = sequential_sort(&partition(seq, Direction::Less, &pivot));
    let greater = sequential_sort(&partition(seq, Direction::Greater, &pivot));

    merge(less, equal, greater)
}

/// Reassemble three ordered pieces into one sorted sequence.
pub(crate) fn merge<T>(less: Vec<T>, equal: Vec<T>, greater: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(less.len() + equal.len() + greater.len());
    merged.extend(less);
    merged.extend(equal);
    merged.extend(greater);
    merged
}
