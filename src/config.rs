//! Search configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{FurthestError, Result};

/// Configuration for a furthest-items engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Approximation parameter in `[0.0, 1.0]`. `None` runs every search to convergence.
    pub delta: Option<f64>,
    /// Number of items to return when the caller does not say.
    pub k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { delta: None, k: 1 }
    }
}

impl SearchConfig {
    /// Exact configuration returning `k` items.
    pub fn exact(k: usize) -> Self {
        Self { delta: None, k }
    }

    /// Approximate configuration with the given `delta`.
    pub fn approximate(delta: f64, k: usize) -> Self {
        Self { delta: Some(delta), k }
    }

    /// Read a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check `delta` lies in `[0.0, 1.0]` and `k` is positive.
    pub fn validate(&self) -> Result<()> {
        if let Some(delta) = self.delta {
            validate_delta(delta)?;
        }
        if self.k == 0 {
            return Err(FurthestError::invalid("k must be at least 1"));
        }
        Ok(())
    }
}

pub(crate) fn validate_delta(delta: f64) -> Result<()> {
    // NaN fails the range check too
    if !(0.0..=1.0).contains(&delta) {
        return Err(FurthestError::invalid(format!(
            "delta must be in range [0.0, 1.0], got {delta}"
        )));
    }
    Ok(())
}
