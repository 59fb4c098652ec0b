//! Sequential exhaustive search.
//!
//! # Algorithm
//!
//! Visits every permutation of the delivery indices in lexicographic order.
//! Each candidate tour `[0, p..., 0]` is summed edge by edge from 0.0 in
//! visit order; a candidate replaces the incumbent only if its length is
//! strictly smaller, so among equal-length optima the lexicographically
//! first one is kept.
//!
//! The running sum is abandoned as soon as it reaches the incumbent
//! length. Edge lengths are non-negative and floating-point addition of a
//! non-negative term never decreases the sum, so an abandoned tour could
//! never have been strictly shorter. Every other permutation sharing the
//! abandoned prefix is skipped for the same reason.
//!
//! The first candidate of a block is always accepted, so a tour whose
//! length overflows to infinity still yields a result.
//!
//! # Complexity
//!
//! O((n-1)! · n) in the worst case. Memory O(n).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::permutations::Permutations;
use super::{SearchLimits, SearchStats};
use crate::distance::DistanceMatrix;
use crate::error::{AbortReason, Error, Result};

/// How often (in tours) the wall clock is consulted.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Shared tour counter and limits for one search call.
pub(crate) struct Budget<'a> {
    limits: &'a SearchLimits,
    started: Instant,
    visited: AtomicU64,
}

impl<'a> Budget<'a> {
    pub(crate) fn new(limits: &'a SearchLimits) -> Self {
        Self {
            limits,
            started: Instant::now(),
            visited: AtomicU64::new(0),
        }
    }

    /// Accounts for one more candidate tour; fails once a limit is hit.
    fn tick(&self) -> Result<()> {
        let visited = self.visited.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(max) = self.limits.max_tours {
            if visited > max {
                return Err(Error::SearchAborted {
                    evaluated: max,
                    reason: AbortReason::TourLimit,
                });
            }
        }
        if let Some(deadline) = self.limits.deadline {
            let check = (visited - 1) % DEADLINE_CHECK_INTERVAL == 0;
            if check && self.started.elapsed() >= deadline {
                return Err(Error::SearchAborted {
                    evaluated: visited,
                    reason: AbortReason::Deadline,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Best tour found within one block of the enumeration.
#[derive(Debug, Clone)]
pub(crate) struct BlockBest {
    /// Delivery indices in visit order (depot excluded).
    pub order: Vec<usize>,
    pub distance: f64,
}

/// Searches all tours `[0, prefix..., perm(rest)..., 0]`.
///
/// Permutations of `rest` are visited in lexicographic order, so the block
/// as a whole is a contiguous run of the global lexicographic order when
/// `prefix` is fixed.
pub(crate) fn search_block(
    dm: &DistanceMatrix,
    prefix: &[usize],
    rest: Vec<usize>,
    budget: &Budget<'_>,
    stats: &mut SearchStats,
) -> Result<Option<BlockBest>> {
    let mut prefix_sum = 0.0;
    let mut prefix_end = 0;
    for &i in prefix {
        prefix_sum += dm.get(prefix_end, i);
        prefix_end = i;
    }

    let mut best: Option<BlockBest> = None;
    let mut best_distance = f64::INFINITY;
    let mut perms = Permutations::new(rest);

    while let Some(suffix) = perms.advance() {
        budget.tick()?;
        stats.tours_evaluated += 1;

        let mut total = prefix_sum;
        let mut prev = prefix_end;
        let mut cut = None;
        for (pos, &i) in suffix.iter().enumerate() {
            total += dm.get(prev, i);
            prev = i;
            if best.is_some() && total >= best_distance {
                cut = Some(pos);
                break;
            }
        }

        if let Some(pos) = cut {
            stats.tours_pruned += 1;
            stats.tours_skipped = stats
                .tours_skipped
                .saturating_add(perms.skip_suffix_after(pos));
            continue;
        }

        total += dm.get(prev, 0);
        if best.is_none() || total < best_distance {
            best_distance = total;
            let mut order = Vec::with_capacity(prefix.len() + suffix.len());
            order.extend_from_slice(prefix);
            order.extend_from_slice(suffix);
            best = Some(BlockBest {
                order,
                distance: total,
            });
        }
    }

    Ok(best)
}
