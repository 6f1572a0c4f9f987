//! Furthest-items query engines.

use crate::errors::{FurthestError, Result};
use crate::view::FurthestView;

mod brute_force;
mod sort1d;

pub use brute_force::BruteForce;
pub use sort1d::Sort1D;

/// Answers "which k items are furthest from this query".
pub trait FurthestItems<T> {
    /// Return the `k` items furthest from `query`, `k` in `[1, len]`.
    fn find(&self, query: &T, k: usize) -> Result<FurthestView<'_, T>>;

    /// Short engine name for reports.
    fn name(&self) -> &'static str;
}

pub(crate) fn check_k(k: usize, n: usize) -> Result<()> {
    if k < 1 || k > n {
        return Err(FurthestError::invalid(format!(
            "k must be in range [1, {n}], got {k}"
        )));
    }
    Ok(())
}
