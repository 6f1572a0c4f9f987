#![forbid(unsafe_code)]
#![deny(
    warnings,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms
)]

//! # furthest1d
//!
//! k-furthest item queries over a static universe reduced to one dimension:
//! - Items are projected to `f64` once and sorted at construction
//! - Queries run a bounded binary search over the two candidate windows
//! - Results borrow the universe directly (no copying)
//!
//! An optional `delta` trades exactness for fewer search iterations.

pub mod config;
pub mod errors;
/// Query engines and the furthest-items capability.
pub mod search;
pub mod universe;
pub mod view;

pub use config::SearchConfig;
pub use errors::{FurthestError, Result};
pub use search::{BruteForce, FurthestItems, Sort1D};
pub use universe::Universe;
pub use view::{CombinedView, FurthestView, IndexedView};
