//! Classical comparison sorts over an arbitrary three-way comparator
//!
//! Each algorithm comes in two forms. `try_*_sort_by` takes a fallible comparator and
//! stops at the first error it returns, leaving the slice as a permutation of its input.
//! `*_sort_by` is the infallible convenience form. All of them sort into non-decreasing
//! order and never touch anything besides the slice (merge sort also uses a scratch
//! buffer).

use crate::error::{ShapeResult, ShapeSortError};
use itertools::Itertools;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Available sorting algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
    #[default]
    Heap,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 6] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
    ];

    /// Single-letter selector used on the command line
    pub fn flag(self) -> char {
        match self {
            SortAlgorithm::Bubble => 'b',
            SortAlgorithm::Insertion => 'i',
            SortAlgorithm::Selection => 's',
            SortAlgorithm::Merge => 'm',
            SortAlgorithm::Quick => 'q',
            SortAlgorithm::Heap => 'h',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Heap => "heap",
        }
    }

    /// Parse `value`, falling back to the default algorithm with a warning
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: ShapeSortError| {
            let fallback = Self::default();
            log::warn!("{err}; using {} sort", fallback.name());
            fallback
        })
    }

    /// Sort `v` with this algorithm, propagating the first comparator error
    pub fn try_sort_by<T, E, F>(self, v: &mut [T], cmp: F) -> Result<(), E>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Result<Ordering, E>,
    {
        match self {
            SortAlgorithm::Bubble => try_bubble_sort_by(v, cmp),
            SortAlgorithm::Insertion => try_insertion_sort_by(v, cmp),
            SortAlgorithm::Selection => try_selection_sort_by(v, cmp),
            SortAlgorithm::Merge => try_merge_sort_by(v, cmp),
            SortAlgorithm::Quick => try_quick_sort_by(v, cmp),
            SortAlgorithm::Heap => try_heap_sort_by(v, cmp),
        }
    }

    /// Sort `v` with this algorithm
    pub fn sort_by<T, F>(self, v: &mut [T], cmp: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        infallible(self.try_sort_by(v, lift(cmp)))
    }
}

impl FromStr for SortAlgorithm {
    type Err = ShapeSortError;

    fn from_str(s: &str) -> ShapeResult<Self> {
        let lower = s.to_lowercase();
        SortAlgorithm::ALL
            .into_iter()
            .find(|algo| {
                (lower.len() == 1 && lower.starts_with(algo.flag())) || lower == algo.name()
            })
            .ok_or_else(|| ShapeSortError::invalid_algorithm(s))
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `v` is non-decreasing under `cmp`
pub fn is_sorted_by<T, F>(v: &[T], mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    v.iter()
        .tuple_windows()
        .all(|(a, b)| cmp(a, b) != Ordering::Greater)
}

fn lift<T, F>(mut cmp: F) -> impl FnMut(&T, &T) -> Result<Ordering, Infallible>
where
    F: FnMut(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| Ok(cmp(a, b))
}

fn infallible(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Bubble sort: `n - 1` full passes, each carrying the largest remaining element to the end.
pub fn try_bubble_sort_by<T, E, F>(v: &mut [T], mut cmp: F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let n = v.len();
    for pass in 0..n.saturating_sub(1) {
        for j in 0..n - pass - 1 {
            if cmp(&v[j], &v[j + 1])? == Ordering::Greater {
                v.swap(j, j + 1);
            }
        }
    }
    Ok(())
}

pub fn bubble_sort_by<T, F>(v: &mut [T], cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    infallible(try_bubble_sort_by(v, lift(cmp)))
}

/// Insertion sort: grows a sorted prefix, moving each new element left past
/// every strictly larger one.
pub fn try_insertion_sort_by<T, E, F>(v: &mut [T], mut cmp: F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && cmp(&v[j - 1], &v[j])? == Ordering::Greater {
            v.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}

pub fn insertion_sort_by<T, F>(v: &mut [T], cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    infallible(try_insertion_sort_by(v, lift(cmp)))
}

/// Selection sort: swaps the first minimum of the unsorted suffix to its front.
pub fn try_selection_sort_by<T, E, F>(v: &mut [T], mut cmp: F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let n = v.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if cmp(&v[j], &v[min])? == Ordering::Less {
                min = j;
            }
        }
        v.swap(i, min);
    }
    Ok(())
}

pub fn selection_sort_by<T, F>(v: &mut [T], cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    infallible(try_selection_sort_by(v, lift(cmp)))
}

/// Top-down merge sort. Stable: on ties the element from the left half is emitted first.
pub fn try_merge_sort_by<T, E, F>(v: &mut [T], mut cmp: F) -> Result<(), E>
where
    T: Clone,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let mut scratch = Vec::with_capacity(v.len() / 2);
    merge_sort_recursive(v, &mut scratch, &mut cmp)
}

pub fn merge_sort_by<T, F>(v: &mut [T], cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    infallible(try_merge_sort_by(v, lift(cmp)))
}

fn merge_sort_recursive<T, E, F>(v: &mut [T], scratch: &mut Vec<T>, cmp: &mut F) -> Result<(), E>
where
    T: Clone,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let n = v.len();
    if n < 2 {
        return Ok(());
    }
    let mid = n / 2;
    merge_sort_recursive(&mut v[..mid], scratch, cmp)?;
    merge_sort_recursive(&mut v[mid..], scratch, cmp)?;

    // Left run moves to scratch; the right run is merged in place behind the write cursor.
    scratch.clear();
    scratch.extend_from_slice(&v[..mid]);

    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < n {
        let take_right = match cmp(&v[j], &scratch[i]) {
            Ok(ord) => ord == Ordering::Less,
            Err(err) => {
                // v[k..j] holds stale slots, exactly as many as the unmerged left run
                v[k..j].clone_from_slice(&scratch[i..]);
                return Err(err);
            }
        };
        if take_right {
            v[k] = v[j].clone();
            j += 1;
        } else {
            v[k] = scratch[i].clone();
            i += 1;
        }
        k += 1;
    }
    // Any right-run leftovers are already in place
    v[k..k + (mid - i)].clone_from_slice(&scratch[i..]);
    Ok(())
}

/// Quicksort with a Lomuto partition around the last element.
///
/// There is no pivot randomization, so already-sorted and reverse-sorted input
/// take O(n²) comparisons. Recursion always descends into the smaller partition
/// and iterates on the larger one, keeping the stack O(log n) deep.
pub fn try_quick_sort_by<T, E, F>(v: &mut [T], mut cmp: F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    quick_sort_recursive(v, &mut cmp)
}

pub fn quick_sort_by<T, F>(v: &mut [T], cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    infallible(try_quick_sort_by(v, lift(cmp)))
}

fn quick_sort_recursive<T, E, F>(mut v: &mut [T], cmp: &mut F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    while v.len() > 1 {
        let pivot = lomuto_partition(v, cmp)?;
        let (left, rest) = std::mem::take(&mut v).split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quick_sort_recursive(left, cmp)?;
            v = right;
        } else {
            quick_sort_recursive(right, cmp)?;
            v = left;
        }
    }
    Ok(())
}

/// Partition around `v[len - 1]`; returns the pivot's final index.
fn lomuto_partition<T, E, F>(v: &mut [T], cmp: &mut F) -> Result<usize, E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let high = v.len() - 1;
    let mut store = 0;
    for j in 0..high {
        if cmp(&v[j], &v[high])? != Ordering::Greater {
            v.swap(store, j);
            store += 1;
        }
    }
    v.swap(store, high);
    Ok(store)
}

/// Heapsort: bottom-up max-heap construction, then repeated root extraction.
pub fn try_heap_sort_by<T, E, F>(v: &mut [T], mut cmp: F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let n = v.len();
    for root in (0..n / 2).rev() {
        sift_down(v, root, n, &mut cmp)?;
    }
    for end in (1..n).rev() {
        v.swap(0, end);
        sift_down(v, 0, end, &mut cmp)?;
    }
    Ok(())
}

pub fn heap_sort_by<T, F>(v: &mut [T], cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    infallible(try_heap_sort_by(v, lift(cmp)))
}

fn sift_down<T, E, F>(v: &mut [T], mut root: usize, end: usize, cmp: &mut F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    loop {
        let left = 2 * root + 1;
        if left >= end {
            return Ok(());
        }
        let mut largest = root;
        if cmp(&v[left], &v[largest])? == Ordering::Greater {
            largest = left;
        }
        let right = left + 1;
        if right < end && cmp(&v[right], &v[largest])? == Ordering::Greater {
            largest = right;
        }
        if largest == root {
            return Ok(());
        }
        v.swap(root, largest);
        root = largest;
    }
}
