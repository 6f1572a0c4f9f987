//! Bounded binary search over the two candidate windows of a sorted universe.

use std::fmt;

use tracing::{debug, trace};

use crate::config::{validate_delta, SearchConfig};
use crate::errors::Result;
use crate::search::{check_k, FurthestItems};
use crate::universe::Universe;
use crate::view::{CombinedView, FurthestView};

/// Furthest-items engine over a projection-sorted universe.
///
/// The k furthest items from any query always form a prefix plus a suffix of
/// the sorted universe whose lengths sum to k. `find` binary searches for that
/// split between the left window `[0, k)` and the right window `[n - k, n)`,
/// comparing mirrored midpoints. Each iteration halves a confidence value
/// starting at 1.0; once it falls to or below `threshold` the search stops
/// and returns the split decided so far.
///
/// `threshold` is `1 - delta`. Without a `delta` it is 0, which never stops
/// early, and `delta = 1.0` behaves the same. `delta = 0.0` stops after the
/// first iteration.
pub struct Sort1D<T, F> {
    universe: Universe<T, F>,
    threshold: f64,
}

impl<T, F> fmt::Debug for Sort1D<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sort1D")
            .field("universe", &self.universe)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl<T, F> fmt::Display for Sort1D<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sort1D")
    }
}

impl<T, F> Sort1D<T, F>
where
    F: Fn(&T) -> f64,
{
    /// Exact engine. Fails if `items` is empty.
    pub fn new<I>(items: I, projection: F) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let universe = Universe::build(items, projection)?;
        debug!(size = universe.len(), "sort1d ready");
        Ok(Self {
            universe,
            threshold: 0.0,
        })
    }

    /// Approximate engine. Fails if `items` is empty or `delta` is outside `[0.0, 1.0]`.
    pub fn with_delta<I>(items: I, projection: F, delta: f64) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut engine = Self::new(items, projection)?;
        validate_delta(delta)?;
        engine.threshold = 1.0 - delta;
        debug!(delta, threshold = engine.threshold, "sort1d threshold set");
        Ok(engine)
    }

    /// Engine configured from a [`SearchConfig`]; only `delta` is used.
    pub fn with_config<I>(items: I, projection: F, config: &SearchConfig) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        match config.delta {
            Some(delta) => Self::with_delta(items, projection, delta),
            None => Self::new(items, projection),
        }
    }

    /// The `k` items furthest from `query`.
    ///
    /// Returns the whole universe for `k == n`, one window when it dominates
    /// the other outright, and otherwise a prefix/suffix [`CombinedView`].
    pub fn find(&self, query: &T, k: usize) -> Result<FurthestView<'_, T>> {
        let n = self.universe.len();
        check_k(k, n)?;

        let items = self.universe.items();
        if k == n {
            return Ok(FurthestView::Range(items));
        }

        let query_value = self.universe.project(query);
        let distance = |index: isize| self.universe.distance(index as usize, query_value);

        let mut ll: isize = 0;
        let mut lh: isize = k as isize - 1;
        let mut rl: isize = (n - k) as isize;
        let mut rh: isize = n as isize - 1;

        if distance(lh) > distance(rh) {
            trace!(k, "left window dominates");
            return Ok(FurthestView::Range(&items[..k]));
        }
        if distance(ll) < distance(rl) {
            trace!(k, "right window dominates");
            return Ok(FurthestView::Range(&items[n - k..]));
        }

        // Both undecided ranges hold the same number of candidates after
        // every step; the parity terms keep them in lockstep.
        let mut confidence = 1.0_f64;
        let mut iterations = 0_usize;
        let (last_safe_l, last_safe_r) = loop {
            iterations += 1;
            let left_mid = ll + (lh - ll) / 2;
            let right_mid = rh - (rh - rl) / 2;

            let safe = if distance(left_mid) > distance(right_mid) {
                ll = left_mid + 1;
                rl = right_mid + (rh - rl + 1) % 2;
                (left_mid, rl)
            } else {
                lh = left_mid - (lh - ll + 1) % 2;
                rh = right_mid - 1;
                (lh, right_mid)
            };

            if lh < ll {
                trace!(k, iterations, "search converged");
                break safe;
            }
            confidence *= 0.5;
            if confidence <= self.threshold {
                trace!(k, iterations, confidence, "search stopped early");
                break safe;
            }
        };

        // last_safe_l may be -1 (empty prefix), last_safe_r may be n (empty suffix)
        let head = &items[..(last_safe_l + 1) as usize];
        let tail = &items[last_safe_r as usize..];
        Ok(FurthestView::Combined(CombinedView::new(head, tail)))
    }
}

impl<T, F> Sort1D<T, F> {
    /// Sorted universe.
    pub fn universe(&self) -> &[T] {
        self.universe.items()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.universe.len()
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }

    /// `1 - delta`, or 0 when built without a delta.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `true` when every search runs to convergence.
    pub fn is_exact(&self) -> bool {
        self.threshold <= 0.0
    }
}

impl<T, F> FurthestItems<T> for Sort1D<T, F>
where
    F: Fn(&T) -> f64,
{
    fn find(&self, query: &T, k: usize) -> Result<FurthestView<'_, T>> {
        Sort1D::find(self, query, k)
    }

    fn name(&self) -> &'static str {
        "Sort1D"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FurthestError;

    fn identity(x: &f64) -> f64 {
        *x
    }

    fn sorted(view: &FurthestView<'_, f64>) -> Vec<f64> {
        let mut v = view.to_vec();
        v.sort_by(|a, b| a.total_cmp(b));
        v
    }

    #[test]
    fn test_mixed_prefix_and_suffix() {
        let engine = Sort1D::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 10.0], identity).unwrap();
        let view = engine.find(&4.0, 2).unwrap();
        assert!(matches!(view, FurthestView::Combined(_)));
        assert_eq!(sorted(&view), vec![1.0, 10.0]);
    }

    #[test]
    fn test_right_window_dominates() {
        let engine = Sort1D::new((1..=8).map(f64::from), identity).unwrap();
        let view = engine.find(&1.0, 4).unwrap();
        assert!(matches!(view, FurthestView::Range(_)));
        assert_eq!(view.to_vec(), vec![5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_left_window_dominates() {
        let engine = Sort1D::new((1..=8).map(f64::from), identity).unwrap();
        let view = engine.find(&8.0, 3).unwrap();
        assert!(matches!(view, FurthestView::Range(_)));
        assert_eq!(view.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_single_item() {
        let engine = Sort1D::new(vec![7.0], identity).unwrap();
        assert_eq!(engine.find(&-100.0, 1).unwrap().to_vec(), vec![7.0]);
    }

    #[test]
    fn test_k_equals_n_returns_everything() {
        let engine = Sort1D::new(vec![3.0, 1.0, 2.0], identity).unwrap();
        let view = engine.find(&0.0, 3).unwrap();
        assert_eq!(view.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_k_bounds() {
        let engine = Sort1D::new(vec![1.0, 2.0, 3.0], identity).unwrap();
        assert!(matches!(
            engine.find(&0.0, 0),
            Err(FurthestError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.find(&0.0, 4),
            Err(FurthestError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_delta_bounds() {
        for bad in [1.5, -0.1, f64::NAN] {
            let err = Sort1D::with_delta(vec![1.0], identity, bad).unwrap_err();
            assert!(matches!(err, FurthestError::InvalidArgument(_)));
        }
        let empty = Sort1D::with_delta(Vec::<f64>::new(), identity, 0.5).unwrap_err();
        assert!(matches!(empty, FurthestError::InvalidArgument(_)));
    }

    #[test]
    fn test_threshold_from_delta() {
        let exact = Sort1D::new(vec![1.0], identity).unwrap();
        assert_eq!(exact.threshold(), 0.0);
        assert!(exact.is_exact());

        let approx = Sort1D::with_delta(vec![1.0], identity, 0.25).unwrap();
        assert_eq!(approx.threshold(), 0.75);
        assert!(!approx.is_exact());

        let full = Sort1D::with_delta(vec![1.0], identity, 1.0).unwrap();
        assert!(full.is_exact());
    }

    #[test]
    fn test_overlapping_windows() {
        // n = 3, k = 2: windows [0, 2) and [1, 3) share the middle item
        let engine = Sort1D::new(vec![0.0, 1.0, 2.0], identity).unwrap();
        let view = engine.find(&1.0, 2).unwrap();
        assert_eq!(sorted(&view), vec![0.0, 2.0]);
    }

    fn split(view: FurthestView<'_, f64>) -> (Vec<f64>, Vec<f64>) {
        match view {
            FurthestView::Combined(combined) => (combined.head().to_vec(), combined.tail().to_vec()),
            other => panic!("expected a prefix/suffix split, got {:?}", other),
        }
    }

    #[test]
    fn test_approximate_first_iteration_split() {
        // threshold 1.0 stops after one iteration
        let engine = Sort1D::with_delta((0..10).map(f64::from), identity, 0.0).unwrap();
        let view = engine.find(&4.5, 4).unwrap();
        assert_eq!(view.to_vec(), vec![0.0, 1.0, 8.0, 9.0]);
        assert_eq!(split(view), (vec![0.0, 1.0], vec![8.0, 9.0]));
    }

    #[test]
    fn test_approximate_two_iterations() {
        // threshold 0.25: confidence 0.5 continues, 0.25 stops
        let engine = Sort1D::with_delta((0..40).map(f64::from), identity, 0.75).unwrap();

        let (head, tail) = split(engine.find(&12.3, 16).unwrap());
        assert_eq!(head, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(tail, (28..40).map(f64::from).collect::<Vec<_>>());

        let (head, tail) = split(engine.find(&26.0, 16).unwrap());
        assert_eq!(head, (0..12).map(f64::from).collect::<Vec<_>>());
        assert_eq!(tail, vec![36.0, 37.0, 38.0, 39.0]);
    }

    #[test]
    fn test_half_delta_stops_after_one_iteration() {
        // confidence 0.5 <= threshold 0.5
        let engine = Sort1D::with_delta((0..40).map(f64::from), identity, 0.5).unwrap();
        let (head, tail) = split(engine.find(&12.3, 16).unwrap());
        assert_eq!(head, (0..8).map(f64::from).collect::<Vec<_>>());
        assert_eq!(tail, (32..40).map(f64::from).collect::<Vec<_>>());
    }

    #[test]
    fn test_exact_split_differs_from_early_stop() {
        let engine = Sort1D::new((0..40).map(f64::from), identity).unwrap();
        let (head, tail) = split(engine.find(&12.3, 16).unwrap());
        assert_eq!(head, vec![0.0]);
        assert_eq!(tail, (25..40).map(f64::from).collect::<Vec<_>>());
    }

    #[test]
    fn test_tied_distance_goes_right() {
        let engine = Sort1D::new(vec![0.0, 1.0, 2.0], identity).unwrap();
        let (head, tail) = split(engine.find(&1.0, 1).unwrap());
        assert!(head.is_empty());
        assert_eq!(tail, vec![2.0]);
    }

    #[test]
    fn test_display_and_name() {
        let engine = Sort1D::new(vec![1.0], identity).unwrap();
        assert_eq!(engine.to_string(), "Sort1D");
        assert_eq!(FurthestItems::name(&engine), "Sort1D");
    }

    #[test]
    fn test_projection_on_structs() {
        #[derive(Debug, Clone, PartialEq)]
        struct City {
            name: &'static str,
            longitude: f64,
        }
        let cities = vec![
            City { name: "lisbon", longitude: -9.1 },
            City { name: "berlin", longitude: 13.4 },
            City { name: "tokyo", longitude: 139.7 },
            City { name: "denver", longitude: -104.9 },
        ];
        let engine = Sort1D::new(cities, |c: &City| c.longitude).unwrap();
        let probe = City { name: "paris", longitude: 2.3 };
        let mut names: Vec<&str> = engine.find(&probe, 2).unwrap().iter().map(|c| c.name).collect();
        names.sort();
        assert_eq!(names, vec!["denver", "tokyo"]);
    }
}
