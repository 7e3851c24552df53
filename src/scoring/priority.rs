use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::Weights;

/// Priority tier derived from a score. Ordered `Cold < Warm < Hot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Cold,
    Warm,
    Hot,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Hot => "Hot",
            Priority::Warm => "Warm",
            Priority::Cold => "Cold",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translate a score into Hot/Warm/Cold.
///
/// Thresholds are inclusive lower bounds, truncated to whole points.
pub fn priority_label(score: u8, weights: &Weights) -> Priority {
    let score = f64::from(score);
    if score >= weights.hot_threshold.trunc() {
        Priority::Hot
    } else if score >= weights.warm_threshold.trunc() {
        Priority::Warm
    } else {
        Priority::Cold
    }
}
