//! Optimizer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::exact::SearchLimits;

/// Configuration for [`RouteOptimizer`](super::RouteOptimizer).
///
/// Defaults: no deadline, no tour cap, sequential search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_delivery::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::new()
///     .with_deadline(Duration::from_secs(10))
///     .with_parallel(true);
/// assert_eq!(config.limits.deadline, Some(Duration::from_secs(10)));
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Bounds on the exhaustive search.
    pub limits: SearchLimits,
    /// Split the search across threads (needs the `parallel` feature).
    pub parallel: bool,
}

impl OptimizerConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.limits = self.limits.with_deadline(deadline);
        self
    }

    /// Sets the candidate tour cap.
    pub fn with_max_tours(mut self, max_tours: u64) -> Self {
        self.limits = self.limits.with_max_tours(max_tours);
        self
    }

    /// Enables or disables parallel search.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
