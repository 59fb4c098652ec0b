//! Parallel exhaustive search.
//!
//! Splits the enumeration into one block per first delivery. Block `k`
//! holds exactly the permutations that start with `k`, which is a
//! contiguous run of the lexicographic order. Blocks are searched
//! independently and reduced in block order with the same strict `<`, so
//! the winner is the tour the sequential search would report, bit for bit.

use rayon::prelude::*;

use super::search::{search_block, BlockBest, Budget};
use super::{outcome, search, SearchLimits, SearchOutcome, SearchStats};
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::{Point, RouteResult, StratifiedStopList};

/// Parallel counterpart of [`search`](super::search).
///
/// Limits are shared across all worker threads. Each block prunes
/// against its own incumbent only, so this generates at least as many
/// candidate tours as the sequential search, often more. Without limits
/// both report the same tour; a `max_tours` cap the sequential search
/// stays under can still abort here. The first block to hit a limit
/// stops the remaining ones.
///
/// # Examples
///
/// ```
/// use u_delivery::exact::{search, search_parallel, SearchLimits};
/// use u_delivery::models::Point;
///
/// let points: Vec<Point> = (0..7)
///     .map(|i| Point::new((i * 5 % 7) as f64, (i * 3 % 4) as f64))
///     .collect();
/// let seq = search(&points, &SearchLimits::new()).unwrap();
/// let par = search_parallel(&points, &SearchLimits::new()).unwrap();
/// assert_eq!(seq.route, par.route);
/// assert_eq!(seq.distance.to_bits(), par.distance.to_bits());
/// ```
pub fn search_parallel(points: &[Point], limits: &SearchLimits) -> Result<SearchOutcome> {
    if points.len() < 3 {
        return search(points, limits);
    }
    let dm = DistanceMatrix::from_points(points);
    let budget = Budget::new(limits);
    let n = points.len();

    let blocks: Vec<(Option<BlockBest>, SearchStats)> = (1..n)
        .into_par_iter()
        .map(|first| {
            let rest: Vec<usize> = (1..n).filter(|&i| i != first).collect();
            let mut stats = SearchStats::default();
            let best = search_block(&dm, &[first], rest, &budget, &mut stats)?;
            Ok((best, stats))
        })
        .collect::<Result<_>>()?;

    let mut best: Option<BlockBest> = None;
    let mut stats = SearchStats::default();
    for (candidate, block_stats) in blocks {
        stats.merge(&block_stats);
        if let Some(candidate) = candidate {
            let better = match &best {
                None => true,
                Some(b) => candidate.distance < b.distance,
            };
            if better {
                best = Some(candidate);
            }
        }
    }
    stats.elapsed = budget.elapsed();

    log::debug!(
        "parallel search over {} blocks: {} tours generated",
        n - 1,
        stats.tours_evaluated
    );
    outcome(best, stats)
}

/// Parallel counterpart of [`solve_with`](super::solve_with).
pub fn solve_parallel(
    stops: &StratifiedStopList,
    limits: &SearchLimits,
) -> Result<(RouteResult, SearchStats)> {
    if stops.is_empty() {
        return Err(Error::invalid_input("cannot search an empty stop list"));
    }
    let out = search_parallel(&stops.points(), limits)?;
    Ok((
        RouteResult::new(out.route, out.distance, stops.clone()),
        out.stats,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AbortReason;

    #[test]
    fn test_parallel_matches_sequential_on_ties() {
        // Symmetric layout: every optimum has an equal-length mirror.
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(-2.0, 1.0),
            Point::new(2.0, -1.0),
            Point::new(-2.0, -1.0),
            Point::new(0.0, 3.0),
        ];
        let seq = search(&pts, &SearchLimits::new()).expect("valid");
        let par = search_parallel(&pts, &SearchLimits::new()).expect("valid");
        assert_eq!(seq.route, par.route);
        assert_eq!(seq.distance.to_bits(), par.distance.to_bits());
    }

    #[test]
    fn test_parallel_small_inputs() {
        let one = search_parallel(&[Point::new(1.0, 1.0)], &SearchLimits::new()).expect("valid");
        assert_eq!(one.route.indices(), &[0, 0]);
        let two = search_parallel(
            &[Point::new(0.0, 0.0), Point::new(0.0, 2.0)],
            &SearchLimits::new(),
        )
        .expect("valid");
        assert_eq!(two.route.indices(), &[0, 1, 0]);
        assert!((two.distance - 4.0).abs() < 1e-10);
        assert!(search_parallel(&[], &SearchLimits::new()).is_err());
    }

    #[test]
    fn test_parallel_generates_at_least_sequential_tours() {
        let pts: Vec<Point> = (0..8)
            .map(|i| Point::new((i * 5 % 8) as f64, (i * i % 5) as f64))
            .collect();
        let seq = search(&pts, &SearchLimits::new()).expect("valid");
        let par = search_parallel(&pts, &SearchLimits::new()).expect("valid");
        assert!(par.stats.tours_evaluated >= seq.stats.tours_evaluated);

        // A cap that covers the parallel run yields the same tour.
        let limits = SearchLimits::new().with_max_tours(par.stats.tours_evaluated);
        let capped = search_parallel(&pts, &limits).expect("within cap");
        assert_eq!(capped.route, seq.route);
        assert_eq!(capped.distance.to_bits(), seq.distance.to_bits());
    }

    #[test]
    fn test_parallel_tour_limit() {
        let pts: Vec<Point> = (0..8).map(|i| Point::new(i as f64, (i % 3) as f64)).collect();
        let limits = SearchLimits::new().with_max_tours(5);
        match search_parallel(&pts, &limits) {
            Err(Error::SearchAborted { reason, .. }) => assert_eq!(reason, AbortReason::TourLimit),
            other => panic!("expected abort, got {other:?}"),
        }
    }
}
