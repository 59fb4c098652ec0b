//! Exact route search.
//!
//! Evaluates every tour that starts and ends at the depot (index 0) and
//! visits each other stop once, and reports the shortest. Ties resolve to
//! the tour whose delivery order comes first lexicographically.
//!
//! - [`Permutations`] — lazy lexicographic permutation generator
//! - [`search`] / [`solve`] / [`solve_with`] — sequential search
//! - `search_parallel` / `solve_parallel` — the same search split across
//!   threads (feature `parallel`), returning the identical tour
//!
//! Cost grows factorially. [`SearchLimits`] bounds a call by wall-clock
//! time or by number of candidate tours; a search that hits a limit fails
//! with [`Error::SearchAborted`](crate::error::Error::SearchAborted).

#[cfg(feature = "parallel")]
mod parallel;
mod permutations;
mod search;

#[cfg(feature = "parallel")]
pub use parallel::{search_parallel, solve_parallel};
pub use permutations::{next_permutation, Permutations};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::{Point, Route, RouteResult, StratifiedStopList};
use search::{search_block, Budget};

/// Optional bounds on an exhaustive search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_delivery::exact::SearchLimits;
///
/// let limits = SearchLimits::new()
///     .with_deadline(Duration::from_secs(5))
///     .with_max_tours(1_000_000);
/// assert_eq!(limits.max_tours, Some(1_000_000));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Wall-clock budget, checked on the first and every 1024th candidate tour.
    pub deadline: Option<Duration>,
    /// Maximum number of candidate tours generated.
    ///
    /// Counts depend on pruning order: the parallel search generates at
    /// least as many tours as the sequential one, so the same cap may
    /// abort it where the sequential search finishes.
    pub max_tours: Option<u64>,
}

impl SearchLimits {
    /// No limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the candidate tour cap.
    pub fn with_max_tours(mut self, max_tours: u64) -> Self {
        self.max_tours = Some(max_tours);
        self
    }
}

/// Counters from one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Candidate tours generated.
    pub tours_evaluated: u64,
    /// Generated tours abandoned before the closing edge.
    pub tours_pruned: u64,
    /// Tours never generated because their prefix was already too long.
    pub tours_skipped: u64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

impl SearchStats {
    #[cfg(feature = "parallel")]
    pub(crate) fn merge(&mut self, other: &SearchStats) {
        self.tours_evaluated += other.tours_evaluated;
        self.tours_pruned += other.tours_pruned;
        self.tours_skipped = self.tours_skipped.saturating_add(other.tours_skipped);
    }
}

/// The optimal tour over a point set.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Closed tour starting and ending at index 0.
    pub route: Route,
    /// Tour length.
    pub distance: f64,
    /// Search counters.
    pub stats: SearchStats,
}

/// Finds the shortest closed tour over `points`, starting and ending at
/// `points[0]`.
///
/// Fails with [`Error::InvalidInput`] if `points` is empty or has a
/// non-finite coordinate, or with
/// [`Error::SearchAborted`] if a limit is hit.
///
/// # Examples
///
/// ```
/// use u_delivery::exact::{search, SearchLimits};
/// use u_delivery::models::Point;
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
/// ];
/// let out = search(&points, &SearchLimits::new()).unwrap();
/// assert_eq!(out.route.indices(), &[0, 1, 3, 2, 0]);
/// assert!((out.distance - 4.0).abs() < 1e-10);
/// ```
pub fn search(points: &[Point], limits: &SearchLimits) -> Result<SearchOutcome> {
    if points.is_empty() {
        return Err(Error::invalid_input("cannot search an empty stop list"));
    }
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(Error::invalid_input(format!(
            "point {i} has a non-finite coordinate"
        )));
    }
    let dm = DistanceMatrix::from_points(points);
    let budget = Budget::new(limits);
    let mut stats = SearchStats::default();

    let best = search_block(&dm, &[], (1..points.len()).collect(), &budget, &mut stats)?;
    stats.elapsed = budget.elapsed();

    outcome(best, stats)
}

/// Converts the winning block result into an outcome.
fn outcome(best: Option<search::BlockBest>, stats: SearchStats) -> Result<SearchOutcome> {
    // Every block accepts its first candidate, so this only fails on a
    // search that generated no tours at all.
    let best = best.ok_or_else(|| Error::invalid_input("search produced no tour"))?;
    Ok(SearchOutcome {
        route: Route::from_order(&best.order),
        distance: best.distance,
        stats,
    })
}

/// Finds the optimal route over a stratified stop list.
///
/// # Examples
///
/// ```
/// use u_delivery::exact::solve;
/// use u_delivery::models::{Point, PriorityClass, Stop};
/// use u_delivery::stratification::stratify;
///
/// let stops = stratify(&[
///     Stop::depot(Point::new(0.0, 0.0)),
///     Stop::delivery(Point::new(3.0, 4.0), PriorityClass::Low),
/// ])
/// .unwrap();
/// let result = solve(&stops).unwrap();
/// assert_eq!(result.route().indices(), &[0, 1, 0]);
/// assert!((result.total_distance() - 10.0).abs() < 1e-10);
/// ```
pub fn solve(stops: &StratifiedStopList) -> Result<RouteResult> {
    solve_with(stops, &SearchLimits::default()).map(|(result, _)| result)
}

/// Like [`solve`], with limits, also returning search counters.
pub fn solve_with(
    stops: &StratifiedStopList,
    limits: &SearchLimits,
) -> Result<(RouteResult, SearchStats)> {
    let out = search(&stops.points(), limits)?;
    Ok((
        RouteResult::new(out.route, out.distance, stops.clone()),
        out.stats,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AbortReason;
    use crate::models::{PriorityClass, Stop};

    fn brute_force(points: &[Point]) -> (Vec<usize>, f64) {
        let dm = DistanceMatrix::from_points(points);
        let mut best = (Vec::new(), f64::INFINITY);
        for order in Permutations::of_range(1, points.len()) {
            let d = dm.tour_length(&order);
            if d < best.1 {
                best = (order, d);
            }
        }
        best
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(search(&[], &SearchLimits::new()).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_non_finite_is_invalid() {
        let pts = [Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        assert!(search(&pts, &SearchLimits::new()).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_huge_coordinates_stay_finite() {
        let pts = [Point::new(0.0, 0.0), Point::new(1e200, 0.0)];
        let out = search(&pts, &SearchLimits::new()).expect("valid");
        assert_eq!(out.route.indices(), &[0, 1, 0]);
        assert_eq!(out.distance, 2e200);

        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1e200, 0.0),
            Point::new(1e200, 1e200),
            Point::new(0.0, 1e200),
        ];
        let out = search(&pts, &SearchLimits::new()).expect("valid");
        assert_eq!(out.route.indices(), &[0, 1, 2, 3, 0]);
        assert!(out.distance.is_finite());
        assert!(((out.distance - 4e200) / 4e200).abs() < 1e-12);
    }

    #[test]
    fn test_depot_only() {
        let out = search(&[Point::new(4.0, 2.0)], &SearchLimits::new()).expect("valid");
        assert_eq!(out.route.indices(), &[0, 0]);
        assert_eq!(out.distance, 0.0);
        assert_eq!(out.stats.tours_evaluated, 1);
    }

    #[test]
    fn test_single_delivery() {
        let pts = [Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
        let out = search(&pts, &SearchLimits::new()).expect("valid");
        assert_eq!(out.route.indices(), &[0, 1, 0]);
        assert_eq!(out.distance, 2.0 * pts[0].distance_to(&pts[1]));
    }

    #[test]
    fn test_collinear() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let out = search(&pts, &SearchLimits::new()).expect("valid");
        // [2,3,1] and [1,3,2] are both 6.0 long; [1,3,2] is first.
        assert_eq!(out.route.indices(), &[0, 1, 3, 2, 0]);
        assert!((out.distance - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_matches_brute_force() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 1.0),
            Point::new(-2.0, 3.5),
            Point::new(1.5, -4.0),
            Point::new(6.0, 6.0),
            Point::new(-3.0, -1.0),
            Point::new(2.0, 2.0),
        ];
        let (order, d) = brute_force(&pts);
        let out = search(&pts, &SearchLimits::new()).expect("valid");
        assert_eq!(out.route, Route::from_order(&order));
        assert_eq!(out.distance.to_bits(), d.to_bits());
        assert!(out.stats.tours_evaluated <= 720);
    }

    #[test]
    fn test_tie_keeps_first_permutation() {
        // Regular square around the depot: many equal-length optima.
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(-1.0, 1.0),
            Point::new(-1.0, -1.0),
            Point::new(1.0, -1.0),
        ];
        let (order, _) = brute_force(&pts);
        let out = search(&pts, &SearchLimits::new()).expect("valid");
        assert_eq!(out.route.deliveries(), order.as_slice());
    }

    #[test]
    fn test_tour_limit_aborts() {
        let pts: Vec<Point> = (0..8).map(|i| Point::new(i as f64, (i * i) as f64)).collect();
        let limits = SearchLimits::new().with_max_tours(10);
        match search(&pts, &limits) {
            Err(Error::SearchAborted { reason, .. }) => assert_eq!(reason, AbortReason::TourLimit),
            other => panic!("expected abort, got {other:?}"),
        }
    }

    #[test]
    fn test_deadline_aborts() {
        let pts: Vec<Point> = (0..11)
            .map(|i| Point::new((i * 7 % 11) as f64, (i * 3 % 5) as f64))
            .collect();
        let limits = SearchLimits::new().with_deadline(Duration::ZERO);
        match search(&pts, &limits) {
            Err(Error::SearchAborted { reason, .. }) => assert_eq!(reason, AbortReason::Deadline),
            other => panic!("expected abort, got {other:?}"),
        }
    }

    #[test]
    fn test_solve_scenario() {
        let stops = crate::stratification::stratify(&[
            Stop::depot(Point::new(0.0, 0.0)),
            Stop::delivery(Point::new(1.0, 0.0), PriorityClass::High),
            Stop::delivery(Point::new(0.0, 1.0), PriorityClass::Low),
            Stop::delivery(Point::new(1.0, 1.0), PriorityClass::Medium),
        ])
        .expect("valid");
        let result = solve(&stops).expect("valid");
        // Stratified: (1,0) high, (1,1) medium, (0,1) low → the perimeter
        // [1,2,3] has length 4 and is the first optimal permutation.
        assert_eq!(result.route().indices(), &[0, 1, 2, 3, 0]);
        assert!((result.total_distance() - 4.0).abs() < 1e-10);
        assert_eq!(result.stops(), &stops);
    }

    #[test]
    fn test_solve_deterministic() {
        let stops = crate::stratification::stratify(&[
            Stop::depot(Point::new(0.0, 0.0)),
            Stop::delivery(Point::new(2.0, 0.0), PriorityClass::Low),
            Stop::delivery(Point::new(0.0, 2.0), PriorityClass::Low),
            Stop::delivery(Point::new(-2.0, 0.0), PriorityClass::Low),
            Stop::delivery(Point::new(0.0, -2.0), PriorityClass::Low),
        ])
        .expect("valid");
        let a = solve(&stops).expect("valid");
        let b = solve(&stops).expect("valid");
        assert_eq!(a.route(), b.route());
        assert_eq!(a.total_distance().to_bits(), b.total_distance().to_bits());
    }

    #[test]
    fn test_solve_with_reports_stats() {
        let stops = crate::stratification::stratify(&[
            Stop::depot(Point::new(0.0, 0.0)),
            Stop::delivery(Point::new(1.0, 0.0), PriorityClass::High),
            Stop::delivery(Point::new(2.0, 0.0), PriorityClass::High),
            Stop::delivery(Point::new(3.0, 0.0), PriorityClass::High),
        ])
        .expect("valid");
        let (_, stats) = solve_with(&stops, &SearchLimits::new()).expect("valid");
        assert!(stats.tours_evaluated >= 1);
        assert_eq!(stats.tours_evaluated + stats.tours_skipped, 6);
    }
}
