//! The sorted, immutable item store every query runs against.

use std::fmt;

use tracing::debug;

use crate::errors::{FurthestError, Result};

/// Items sorted ascending by their projected value.
///
/// Built once from an unsorted collection. The sort is stable, so items with
/// equal projections keep their original relative order. The projection is
/// retained for the lifetime of the universe and must be pure.
pub struct Universe<T, F> {
    items: Vec<T>,
    projection: F,
}

impl<T, F> fmt::Debug for Universe<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Universe")
            .field("len", &self.items.len())
            .field("projection", &"<fn(&T) -> f64>")
            .finish()
    }
}

impl<T, F> Universe<T, F>
where
    F: Fn(&T) -> f64,
{
    /// Sort `items` by `projection`. Fails if `items` is empty.
    pub fn build<I>(items: I, projection: F) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut keyed: Vec<(f64, T)> = items
            .into_iter()
            .map(|item| (projection(&item), item))
            .collect();
        if keyed.is_empty() {
            return Err(FurthestError::invalid("universe can't be empty"));
        }

        // stable; total_cmp puts -0.0 before 0.0
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        let items: Vec<T> = keyed.into_iter().map(|(_, item)| item).collect();

        debug!(size = items.len(), "built universe");
        Ok(Self { items, projection })
    }

    /// Projected value of an arbitrary item.
    #[inline]
    pub fn project(&self, item: &T) -> f64 {
        (self.projection)(item)
    }

    /// Projected value of the item at `index`.
    #[inline]
    pub fn value_at(&self, index: usize) -> f64 {
        (self.projection)(&self.items[index])
    }

    /// `|projection(items[index]) - query_value|`.
    #[inline]
    pub fn distance(&self, index: usize, query_value: f64) -> f64 {
        (self.value_at(index) - query_value).abs()
    }
}

impl<T, F> Universe<T, F> {
    /// Sorted items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items (never zero).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
