//! Linear-scan reference engine.

use std::cmp::Reverse;
use std::fmt;

use ordered_float::OrderedFloat;

use crate::errors::Result;
use crate::search::{check_k, FurthestItems};
use crate::universe::Universe;
use crate::view::FurthestView;

/// Ranks every item by distance on each query. O(n log n) per query.
///
/// Ties in distance go to the lower universe index. Selected items are
/// returned in universe order.
///
/// Agrees with an exact [`Sort1D`](crate::Sort1D) on the multiset of returned
/// distances only. When distances tie at the cut, the two engines may pick
/// different items: `Sort1D` sends ties to the right-hand candidate.
pub struct BruteForce<T, F> {
    universe: Universe<T, F>,
}

impl<T, F> fmt::Debug for BruteForce<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BruteForce")
            .field("universe", &self.universe)
            .finish()
    }
}

impl<T, F> BruteForce<T, F>
where
    F: Fn(&T) -> f64,
{
    /// Fails if `items` is empty.
    pub fn new<I>(items: I, projection: F) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Ok(Self {
            universe: Universe::build(items, projection)?,
        })
    }

    /// Distances of the `k` furthest items, largest first.
    pub fn top_distances(&self, query: &T, k: usize) -> Result<Vec<f64>> {
        let ranked = self.ranked(query, k)?;
        let query_value = self.universe.project(query);
        Ok(ranked
            .into_iter()
            .map(|i| self.universe.distance(i, query_value))
            .collect())
    }

    fn ranked(&self, query: &T, k: usize) -> Result<Vec<usize>> {
        check_k(k, self.universe.len())?;
        let query_value = self.universe.project(query);

        let mut order: Vec<usize> = (0..self.universe.len()).collect();
        order.sort_by_key(|&i| (Reverse(OrderedFloat(self.universe.distance(i, query_value))), i));
        order.truncate(k);
        Ok(order)
    }

    /// The `k` items furthest from `query`.
    pub fn find(&self, query: &T, k: usize) -> Result<FurthestView<'_, T>> {
        let mut selected = self.ranked(query, k)?;
        selected.sort_unstable();

        let items = self.universe.items();
        Ok(FurthestView::Owned(selected.into_iter().map(|i| &items[i]).collect()))
    }

    /// Sorted universe.
    pub fn universe(&self) -> &[T] {
        self.universe.items()
    }
}

impl<T, F> FurthestItems<T> for BruteForce<T, F>
where
    F: Fn(&T) -> f64,
{
    fn find(&self, query: &T, k: usize) -> Result<FurthestView<'_, T>> {
        BruteForce::find(self, query, k)
    }

    fn name(&self) -> &'static str {
        "BruteForce"
    }
}
