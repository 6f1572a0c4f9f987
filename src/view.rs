//! Read-only result views borrowing the universe's storage.

use std::iter::{Chain, Copied};
use std::ops::Index;
use std::slice;

use crate::errors::{FurthestError, Result};

/// Read-only, indexable, ordered sequence.
pub trait IndexedView<T> {
    /// Number of items.
    fn len(&self) -> usize;

    /// Checked access; `IndexOutOfRange` past the end.
    fn get(&self, index: usize) -> Result<&T>;

    /// `true` if the view has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn out_of_range(index: usize, len: usize) -> FurthestError {
    FurthestError::IndexOutOfRange { index, len }
}

/// Two contiguous ranges presented as one sequence, `head` first.
///
/// O(1) to build and to index; nothing is copied.
#[derive(Debug)]
pub struct CombinedView<'a, T> {
    head: &'a [T],
    tail: &'a [T],
}

impl<'a, T> Clone for CombinedView<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for CombinedView<'a, T> {}

impl<'a, T> CombinedView<'a, T> {
    /// Concatenate `head` and `tail` logically.
    pub fn new(head: &'a [T], tail: &'a [T]) -> Self {
        Self { head, tail }
    }

    /// First backing range.
    pub fn head(&self) -> &'a [T] {
        self.head
    }

    /// Second backing range.
    pub fn tail(&self) -> &'a [T] {
        self.tail
    }

    /// `head.len() + tail.len()`.
    pub fn len(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    /// `true` if both ranges are empty.
    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.tail.is_empty()
    }

    /// `head[index]` or `tail[index - head.len()]`.
    pub fn get(&self, index: usize) -> Result<&'a T> {
        if index < self.head.len() {
            Ok(&self.head[index])
        } else {
            self.tail
                .get(index - self.head.len())
                .ok_or_else(|| out_of_range(index, self.len()))
        }
    }

    /// Items in order.
    pub fn iter(&self) -> Chain<slice::Iter<'a, T>, slice::Iter<'a, T>> {
        self.head.iter().chain(self.tail.iter())
    }
}

impl<'a, T> IndexedView<T> for CombinedView<'a, T> {
    fn len(&self) -> usize {
        CombinedView::len(self)
    }

    fn get(&self, index: usize) -> Result<&T> {
        CombinedView::get(self, index)
    }
}

impl<'a, T> Index<usize> for CombinedView<'a, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match CombinedView::get(self, index) {
            Ok(item) => item,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'v, 'a, T> IntoIterator for &'v CombinedView<'a, T> {
    type Item = &'a T;
    type IntoIter = Chain<slice::Iter<'a, T>, slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Answer to a furthest-items query.
#[derive(Debug, Clone)]
pub enum FurthestView<'a, T> {
    /// A single contiguous range of the universe.
    Range(&'a [T]),
    /// A prefix and a suffix of the universe.
    Combined(CombinedView<'a, T>),
    /// Individually selected items, in universe order.
    Owned(Vec<&'a T>),
}

impl<'a, T> FurthestView<'a, T> {
    /// Number of items.
    pub fn len(&self) -> usize {
        match self {
            Self::Range(slice) => slice.len(),
            Self::Combined(view) => view.len(),
            Self::Owned(refs) => refs.len(),
        }
    }

    /// `true` if the view has no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checked access.
    pub fn get(&self, index: usize) -> Result<&'a T> {
        let found = match self {
            Self::Range(slice) => {
                let slice: &'a [T] = *slice;
                slice.get(index)
            }
            Self::Combined(view) => return view.get(index),
            Self::Owned(refs) => refs.get(index).copied(),
        };
        found.ok_or_else(|| out_of_range(index, self.len()))
    }

    /// Items in order.
    pub fn iter(&self) -> Iter<'_, T> {
        match self {
            Self::Range(slice) => Iter::Range(slice.iter()),
            Self::Combined(view) => Iter::Combined(view.iter()),
            Self::Owned(refs) => Iter::Owned(refs.iter().copied()),
        }
    }

    /// Clone the items out.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<'a, T> IndexedView<T> for FurthestView<'a, T> {
    fn len(&self) -> usize {
        FurthestView::len(self)
    }

    fn get(&self, index: usize) -> Result<&T> {
        FurthestView::get(self, index)
    }
}

impl<'v, 'a, T> IntoIterator for &'v FurthestView<'a, T> {
    type Item = &'v T;
    type IntoIter = Iter<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`FurthestView`].
#[derive(Debug)]
pub enum Iter<'v, T> {
    /// Contiguous range.
    Range(slice::Iter<'v, T>),
    /// Prefix then suffix.
    Combined(Chain<slice::Iter<'v, T>, slice::Iter<'v, T>>),
    /// Selected items.
    Owned(Copied<slice::Iter<'v, &'v T>>),
}

impl<'v, T> Iterator for Iter<'v, T> {
    type Item = &'v T;

    fn next(&mut self) -> Option<&'v T> {
        match self {
            Self::Range(it) => it.next(),
            Self::Combined(it) => it.next(),
            Self::Owned(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Range(it) => it.size_hint(),
            Self::Combined(it) => it.size_hint(),
            Self::Owned(it) => it.size_hint(),
        }
    }
}
