//! Steepest-descent hill climbing over the swap neighborhood.
//!
//! A climb starts from a uniformly random permutation. At each step every swap
//! of two positions `i < j` is evaluated and the cheapest neighbor is taken if
//! it strictly improves the tour; otherwise the climb stops at the first local
//! optimum. Different random starts can end in different local optima, so the
//! random source is always injectable: pass any [`Rng`] to
//! [`HillClimbing::solve_with_rng`], or set `seed` for [`SearchStrategy::solve`].

use super::SearchStrategy;
use crate::error::TspError;
use crate::instance::TspInstance;
use crate::solution::{SearchStats, Solution};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Improvements smaller than this are treated as float noise
const IMPROVEMENT_EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct HillClimbing {
    pub seed: u64,
    /// Independent climbs from successive random starts; the best one wins
    pub restarts: usize,
    /// Cap on improving moves per climb
    pub max_steps: Option<usize>,
}

impl HillClimbing {
    pub fn new() -> Self {
        HillClimbing {
            seed: 42,
            restarts: 1,
            max_steps: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        HillClimbing {
            seed,
            ..Self::new()
        }
    }

    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts.max(1);
        self
    }

    /// Run the configured climbs drawing every random start from `rng`.
    pub fn solve_with_rng<R: Rng + ?Sized>(&self, instance: &TspInstance, rng: &mut R) -> Result<Solution, TspError> {
        let start = std::time::Instant::now();
        let mut stats = SearchStats::default();
        let mut best: Option<(Vec<usize>, f64)> = None;

        for restart in 0..self.restarts.max(1) {
            let (tour, cost) = self.climb(instance, rng, &mut stats);
            log::trace!("HillClimbing restart {}: local optimum {:.2}", restart, cost);
            if best.as_ref().map_or(true, |(_, c)| cost < *c) {
                best = Some((tour, cost));
                stats.improvements += 1;
            }
        }

        let (tour, _) = best.unwrap_or_else(|| ((0..instance.num_cities()).collect(), 0.0));
        let mut solution = Solution::from_tour(instance, tour, self.name())?;
        solution.computation_time = start.elapsed().as_secs_f64();
        solution.stats = stats;
        log::debug!(
            "HillClimbing: cost {:.2} after {} steps over {} restart(s)",
            solution.cost,
            stats.expanded,
            self.restarts.max(1)
        );
        Ok(solution)
    }

    /// One descent from a random permutation; returns the open tour and its
    /// closed cost.
    fn climb<R: Rng + ?Sized>(&self, instance: &TspInstance, rng: &mut R, stats: &mut SearchStats) -> (Vec<usize>, f64) {
        let n = instance.num_cities();
        let mut tour: Vec<usize> = (0..n).collect();
        tour.shuffle(rng);
        let mut cost = tour_cost(instance, &tour);
        let mut steps = 0;

        loop {
            if self.max_steps.is_some_and(|max| steps >= max) {
                break;
            }

            let mut best_move = None;
            let mut best_cost = cost;
            for i in 0..n {
                for j in i + 1..n {
                    tour.swap(i, j);
                    let candidate = tour_cost(instance, &tour);
                    tour.swap(i, j);
                    stats.generated += 1;

                    if candidate < best_cost {
                        best_cost = candidate;
                        best_move = Some((i, j));
                    }
                }
            }

            match best_move {
                Some((i, j)) if best_cost < cost - IMPROVEMENT_EPS => {
                    tour.swap(i, j);
                    cost = best_cost;
                    steps += 1;
                    stats.expanded += 1;
                }
                _ => break,
            }
        }

        (tour, cost)
    }
}

impl Default for HillClimbing {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed-tour cost for an open tour, hot-loop version of `route_cost`.
fn tour_cost(instance: &TspInstance, tour: &[usize]) -> f64 {
    let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
        return 0.0;
    };
    tour.windows(2).map(|w| instance.edge(w[0], w[1])).sum::<f64>() + instance.edge(last, first)
}

impl SearchStrategy for HillClimbing {
    fn solve(&self, instance: &TspInstance) -> Result<Solution, TspError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.solve_with_rng(instance, &mut rng)
    }

    fn name(&self) -> &str {
        "HillClimbing"
    }
}
