//! Breadth-first and depth-first search over partial tours.
//!
//! Both are exhaustive: they close every permutation that starts at city 0 and
//! keep the cheapest, so both return the global optimum. They differ only in the
//! order incumbents are discovered and in memory. Breadth-first holds a whole
//! level of pending paths, depth-first roughly `n` pending siblings per level of
//! the active chain.

use super::engine::{explore, ExploreOptions};
use super::frontier::{FifoFrontier, LifoFrontier};
use super::heuristic::ZeroHeuristic;
use super::{SearchLimits, SearchStrategy};
use crate::error::TspError;
use crate::instance::TspInstance;
use crate::solution::Solution;

/// Exhaustive search with a FIFO frontier
#[derive(Debug, Clone, Default)]
pub struct BreadthFirstSearch {
    pub limits: SearchLimits,
}

impl BreadthFirstSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        BreadthFirstSearch { limits }
    }
}

impl SearchStrategy for BreadthFirstSearch {
    fn solve(&self, instance: &TspInstance) -> Result<Solution, TspError> {
        Ok(explore(
            instance,
            FifoFrontier::new(),
            ExploreOptions {
                algorithm: self.name(),
                heuristic: &ZeroHeuristic,
                limits: &self.limits,
                early_exit: false,
            },
        ))
    }

    fn name(&self) -> &str {
        "BFS"
    }
}

/// Exhaustive search with a LIFO frontier
#[derive(Debug, Clone, Default)]
pub struct DepthFirstSearch {
    pub limits: SearchLimits,
}

impl DepthFirstSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        DepthFirstSearch { limits }
    }
}

impl SearchStrategy for DepthFirstSearch {
    fn solve(&self, instance: &TspInstance) -> Result<Solution, TspError> {
        Ok(explore(
            instance,
            LifoFrontier::new(),
            ExploreOptions {
                algorithm: self.name(),
                heuristic: &ZeroHeuristic,
                limits: &self.limits,
                early_exit: false,
            },
        ))
    }

    fn name(&self) -> &str {
        "DFS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_instance() -> TspInstance {
        TspInstance::new(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_bfs() {
        let instance = create_test_instance();
        let solution = BreadthFirstSearch::new().solve(&instance).unwrap();

        assert_eq!(solution.cost, 80.0);
        assert!(solution.optimal);
        assert!(solution.is_valid_tour(&instance));
        assert_eq!(solution.tour[0], 0);
        // 1 + 3 + 6 + 6 states, each popped once
        assert_eq!(solution.stats.expanded, 16);
        assert_eq!(solution.stats.generated, 16);
        // the full last level is pending at once
        assert_eq!(solution.stats.peak_frontier, 6);
    }

    #[test]
    fn test_dfs() {
        let instance = create_test_instance();
        let solution = DepthFirstSearch::new().solve(&instance).unwrap();

        assert_eq!(solution.cost, 80.0);
        assert!(solution.optimal);
        assert!(solution.is_valid_tour(&instance));
        assert_eq!(solution.stats.expanded, 16);
        assert!(solution.stats.peak_frontier < 6);
    }

    #[test]
    fn test_single_city() {
        let instance = TspInstance::new(vec![vec![0.0]]).unwrap();
        for solution in [
            BreadthFirstSearch::new().solve(&instance).unwrap(),
            DepthFirstSearch::new().solve(&instance).unwrap(),
        ] {
            assert_eq!(solution.tour, vec![0, 0]);
            assert_eq!(solution.cost, 0.0);
        }
    }

    #[test]
    fn test_budget_still_returns_tour() {
        let instance = create_test_instance();
        let limits = SearchLimits {
            max_expansions: Some(2),
            ..Default::default()
        };

        let solution = BreadthFirstSearch::with_limits(limits).solve(&instance).unwrap();
        assert!(!solution.optimal);
        assert!(solution.is_valid_tour(&instance));
        assert_eq!(solution.stats.expanded, 2);
        assert!(solution.cost >= 80.0);

        let solution = DepthFirstSearch::with_limits(limits).solve(&instance).unwrap();
        assert!(!solution.optimal);
        assert!(solution.is_valid_tour(&instance));
    }
}
