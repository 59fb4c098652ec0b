//! Stratify-then-search pipeline.
//!
//! [`RouteOptimizer`] takes raw stops (depot first), groups deliveries by
//! priority, runs the exact search over the grouped list, and returns the
//! route together with the list it indexes.

mod config;

pub use config::OptimizerConfig;

use crate::error::Result;
use crate::exact::{self, SearchStats};
use crate::models::{Point, RouteResult, Stop, StratifiedStopList};
use crate::stratification::{stratify, stratify_labeled};

/// Stop count (depot included) above which exhaustive search becomes slow
/// enough to warn about.
pub const RECOMMENDED_MAX_STOPS: usize = 11;

/// Runs stratification and exact search with a fixed configuration.
///
/// Each call is independent; the optimizer holds no state besides its
/// configuration.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Point, PriorityClass, Stop};
/// use u_delivery::optimizer::RouteOptimizer;
///
/// let stops = vec![
///     Stop::depot(Point::new(0.0, 0.0)),
///     Stop::delivery(Point::new(1.0, 0.0), PriorityClass::High),
///     Stop::delivery(Point::new(0.0, 1.0), PriorityClass::Low),
///     Stop::delivery(Point::new(1.0, 1.0), PriorityClass::Medium),
/// ];
/// let result = RouteOptimizer::default().optimize(&stops).unwrap();
/// assert_eq!(result.stops().labels(), vec!["depot", "high", "medium", "low"]);
/// assert_eq!(result.route().indices(), &[0, 1, 2, 3, 0]);
/// assert!((result.total_distance() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
}

impl RouteOptimizer {
    /// Creates an optimizer with the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Stratifies `stops` (depot first) and finds the optimal route.
    pub fn optimize(&self, stops: &[Stop]) -> Result<RouteResult> {
        self.optimize_with_stats(stops).map(|(result, _)| result)
    }

    /// Like [`optimize`](Self::optimize), also returning search counters.
    pub fn optimize_with_stats(&self, stops: &[Stop]) -> Result<(RouteResult, SearchStats)> {
        let list = stratify(stops)?;
        self.solve(&list)
    }

    /// Parses raw `(point, label)` pairs, depot first, and optimizes them.
    ///
    /// The depot's label is ignored; any other label outside
    /// `high`/`medium`/`low` fails with
    /// [`Error::InvalidInput`](crate::error::Error::InvalidInput).
    pub fn optimize_labeled<S: AsRef<str>>(&self, raw: &[(Point, S)]) -> Result<RouteResult> {
        let list = stratify_labeled(raw)?;
        self.solve(&list).map(|(result, _)| result)
    }

    /// Runs the search over an already stratified list.
    pub fn solve(&self, list: &StratifiedStopList) -> Result<(RouteResult, SearchStats)> {
        let n = list.len();
        if n > RECOMMENDED_MAX_STOPS {
            log::warn!(
                "exhaustive search over {n} stops ({} deliveries) may take very long",
                n - 1
            );
        }
        log::debug!(
            "searching {} stops (parallel: {}, limits: {:?})",
            n,
            self.config.parallel,
            self.config.limits
        );

        let (result, stats) = self.run(list)?;

        log::info!(
            "optimal route over {} stops: distance {:.4}, {} tours generated, {} skipped, {:?}",
            n,
            result.total_distance(),
            stats.tours_evaluated,
            stats.tours_skipped,
            stats.elapsed
        );
        Ok((result, stats))
    }

    #[cfg(feature = "parallel")]
    fn run(&self, list: &StratifiedStopList) -> Result<(RouteResult, SearchStats)> {
        if self.config.parallel {
            exact::solve_parallel(list, &self.config.limits)
        } else {
            exact::solve_with(list, &self.config.limits)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&self, list: &StratifiedStopList) -> Result<(RouteResult, SearchStats)> {
        if self.config.parallel {
            log::warn!("parallel search requested but the `parallel` feature is disabled");
        }
        exact::solve_with(list, &self.config.limits)
    }
}

/// Optimizes with the default configuration.
///
/// Shorthand for `RouteOptimizer::default().optimize(stops)`.
pub fn optimize_route(stops: &[Stop]) -> Result<RouteResult> {
    RouteOptimizer::default().optimize(stops)
}
