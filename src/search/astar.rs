//! A* search over partial tours.
//!
//! States are popped in increasing `f = g + h` order, where `g` is the cost of
//! the open path and `h` an admissible estimate of the remaining cost. By
//! default the search still runs until the frontier is empty, exactly like the
//! breadth-first and depth-first searches, and performs no dominance pruning
//! between paths over the same visited set.
//!
//! With [`AStarSearch::with_early_exit`] the search stops as soon as the popped
//! state's `f` is no lower than the incumbent cost. Every state left in the
//! frontier has an `f` at least that large, and since `h` never overestimates,
//! none of them can complete into a cheaper tour: the incumbent is optimal.

use super::engine::{explore, ExploreOptions};
use super::frontier::PriorityFrontier;
use super::heuristic::{Heuristic, MinOutgoingEdge};
use super::{SearchLimits, SearchStrategy};
use crate::error::TspError;
use crate::instance::TspInstance;
use crate::solution::Solution;

/// A* over a priority frontier, generic over the estimator
#[derive(Debug, Clone)]
pub struct AStarSearch<H: Heuristic = MinOutgoingEdge> {
    pub heuristic: H,
    pub limits: SearchLimits,
    pub early_exit: bool,
}

impl AStarSearch<MinOutgoingEdge> {
    pub fn new() -> Self {
        Self::with_heuristic(MinOutgoingEdge)
    }
}

impl Default for AStarSearch<MinOutgoingEdge> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Heuristic> AStarSearch<H> {
    pub fn with_heuristic(heuristic: H) -> Self {
        AStarSearch {
            heuristic,
            limits: SearchLimits::default(),
            early_exit: false,
        }
    }

    /// Stop at the first state whose `f` reaches the incumbent cost.
    pub fn with_early_exit(mut self) -> Self {
        self.early_exit = true;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl<H: Heuristic> SearchStrategy for AStarSearch<H> {
    fn solve(&self, instance: &TspInstance) -> Result<Solution, TspError> {
        log::debug!(
            "A* with {} heuristic, early exit {}",
            self.heuristic.name(),
            self.early_exit
        );
        Ok(explore(
            instance,
            PriorityFrontier::new(),
            ExploreOptions {
                algorithm: self.name(),
                heuristic: &self.heuristic,
                limits: &self.limits,
                early_exit: self.early_exit,
            },
        ))
    }

    fn name(&self) -> &str {
        "A*"
    }
}
