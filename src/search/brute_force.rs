//! Exhaustive permutation search.
//!
//! City 0 is fixed as the start, since every rotation of a cycle costs the
//! same, and the remaining `n - 1` cities are enumerated in lexicographic order,
//! `(n - 1)!` tours in total. Each tour and its mirror image are both visited.
//! Only the current permutation and the incumbent are kept, so memory is
//! constant beyond the permutation itself. Meant as ground truth for small
//! instances.

use super::{Incumbent, SearchLimits, SearchStrategy, ORIGIN};
use crate::error::TspError;
use crate::instance::TspInstance;
use crate::solution::{SearchStats, Solution};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct BruteForce {
    /// `max_expansions` caps the number of permutations checked
    pub limits: SearchLimits,
}

impl BruteForce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        BruteForce { limits }
    }

    fn closed_cost(instance: &TspInstance, order: &[usize]) -> f64 {
        let mut cost = 0.0;
        let mut prev = ORIGIN;
        for &city in order {
            cost += instance.edge(prev, city);
            prev = city;
        }
        cost + instance.edge(prev, ORIGIN)
    }
}

/// Rearrange `items` into the next lexicographic permutation. Returns `false`
/// and leaves the slice sorted ascending once the last permutation is passed.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }

    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }

    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

impl SearchStrategy for BruteForce {
    fn solve(&self, instance: &TspInstance) -> Result<Solution, TspError> {
        let start = Instant::now();
        let n = instance.num_cities();
        let budget = self.limits.start();
        let mut stats = SearchStats::default();
        let mut incumbent = Incumbent::new();

        let mut order: Vec<usize> = (0..n).filter(|&c| c != ORIGIN).collect();
        let mut complete = true;

        loop {
            // the first permutation is always checked so a tour exists
            if stats.expanded > 0 && budget.exhausted(stats.expanded) {
                complete = false;
                break;
            }
            stats.expanded += 1;

            let cost = Self::closed_cost(instance, &order);
            let improved = incumbent.offer(cost, || {
                let mut route = Vec::with_capacity(n + 1);
                route.push(ORIGIN);
                route.extend_from_slice(&order);
                route.push(ORIGIN);
                route
            });
            if improved {
                log::trace!("BruteForce: new incumbent {:.2} at permutation {}", cost, stats.expanded);
            }

            if !next_permutation(&mut order) {
                break;
            }
        }

        stats.generated = stats.expanded;
        stats.peak_frontier = 1;
        stats.improvements = incumbent.improvements();

        let (tour, cost) = incumbent
            .into_route()
            .ok_or_else(|| TspError::invalid_model("no permutation was evaluated"))?;

        log::debug!("BruteForce: cost {:.2} after {} permutations", cost, stats.expanded);

        Ok(Solution {
            tour,
            cost,
            algorithm: self.name().to_string(),
            optimal: complete,
            computation_time: start.elapsed().as_secs_f64(),
            stats,
        })
    }

    fn name(&self) -> &str {
        "BruteForce"
    }
}
