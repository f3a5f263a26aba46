//! Search strategies for the TSP.
//!
//! Every strategy implements [`SearchStrategy`] and returns a closed tour:
//!
//! - [`BruteForce`]: enumerates every ordering of the cities after city 0
//! - [`BreadthFirstSearch`], [`DepthFirstSearch`], [`AStarSearch`]: the same
//!   exhaustive expansion loop run over a FIFO, LIFO or `f = g + h` priority
//!   frontier
//! - [`NearestNeighbor`]: greedy construction, not optimal
//! - [`HillClimbing`]: swap-neighborhood descent from a random tour, not optimal
//!
//! Memory profile of the exhaustive strategies: breadth-first and A* keep every
//! pending partial path alive at once (exponential in the worst case),
//! depth-first keeps the active chain plus its pending siblings, and brute force
//! keeps a single permutation and the incumbent.

pub mod astar;
pub mod brute_force;
mod engine;
pub mod frontier;
pub mod greedy;
pub mod heuristic;
pub mod hill_climbing;
pub mod node;
pub mod uninformed;

pub use astar::AStarSearch;
pub use brute_force::BruteForce;
pub use greedy::NearestNeighbor;
pub use heuristic::{estimate_remaining, Heuristic, MinOutgoingEdge, ZeroHeuristic};
pub use hill_climbing::HillClimbing;
pub use node::CitySet;
pub use uninformed::{BreadthFirstSearch, DepthFirstSearch};

use crate::error::TspError;
use crate::instance::TspInstance;
use crate::solution::Solution;
use std::time::{Duration, Instant};

/// City every exhaustive search starts from and returns to
pub const ORIGIN: usize = 0;

/// Common interface of all strategies
pub trait SearchStrategy {
    fn solve(&self, instance: &TspInstance) -> Result<Solution, TspError>;
    fn name(&self) -> &str;
}

/// Optional budget for the exhaustive strategies. A run stopped by its budget
/// still returns a valid tour, but not a proven optimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of states expanded (permutations for brute force)
    pub max_expansions: Option<usize>,
    /// Wall-clock limit
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub(crate) fn start(&self) -> Budget {
        Budget {
            limits: *self,
            started: Instant::now(),
        }
    }
}

pub(crate) struct Budget {
    limits: SearchLimits,
    started: Instant,
}

impl Budget {
    /// Whether another expansion would exceed the budget.
    pub fn exhausted(&self, expanded: usize) -> bool {
        if let Some(max) = self.limits.max_expansions {
            if expanded >= max {
                return true;
            }
        }
        // reading the clock on every expansion dominates small searches
        match self.limits.time_limit {
            Some(limit) if expanded % 256 == 0 => self.started.elapsed() >= limit,
            _ => false,
        }
    }
}

/// Best complete tour found so far, replaced only by strictly cheaper tours.
#[derive(Debug)]
pub(crate) struct Incumbent {
    route: Option<Vec<usize>>,
    cost: f64,
    improvements: usize,
}

impl Incumbent {
    pub fn new() -> Self {
        Incumbent {
            route: None,
            cost: f64::INFINITY,
            improvements: 0,
        }
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Offer a closed tour of `cost`; `route` is only built when it wins.
    pub fn offer<F: FnOnce() -> Vec<usize>>(&mut self, cost: f64, route: F) -> bool {
        if cost < self.cost {
            self.cost = cost;
            self.route = Some(route());
            self.improvements += 1;
            true
        } else {
            false
        }
    }

    pub fn improvements(&self) -> usize {
        self.improvements
    }

    pub fn into_route(self) -> Option<(Vec<usize>, f64)> {
        let cost = self.cost;
        self.route.map(|r| (r, cost))
    }
}

/// One instance of every strategy with default settings, exhaustive ones first.
pub fn standard_strategies(seed: u64) -> Vec<Box<dyn SearchStrategy + Send + Sync>> {
    vec![
        Box::new(BruteForce::new()),
        Box::new(BreadthFirstSearch::new()),
        Box::new(DepthFirstSearch::new()),
        Box::new(AStarSearch::new()),
        Box::new(NearestNeighbor::new()),
        Box::new(HillClimbing::with_seed(seed)),
    ]
}
