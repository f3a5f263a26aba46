//! Solution representation for the TSP strategies.
//!
//! Every strategy returns a [`Solution`]: a closed tour of `n + 1` city indices
//! whose first and last entries coincide, its cost, and a few bookkeeping
//! fields describing how the search went.

use crate::error::TspError;
use crate::instance::TspInstance;
use serde::{Deserialize, Serialize};

/// Counters collected while a strategy runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States popped and expanded (permutations checked for brute force,
    /// climbing steps for hill climbing)
    pub expanded: usize,
    /// States created (neighbors evaluated for hill climbing)
    pub generated: usize,
    /// Largest frontier size observed
    pub peak_frontier: usize,
    /// Number of times the incumbent was replaced
    pub improvements: usize,
}

/// A complete tour produced by one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The closed tour: `tour[0] == tour[n]`
    pub tour: Vec<usize>,
    /// Total tour cost, closing edge included
    pub cost: f64,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Whether the strategy proved this tour optimal
    pub optimal: bool,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Search counters
    pub stats: SearchStats,
}

impl Solution {
    /// Build a solution from an open or closed tour. An open tour is closed
    /// by repeating its first city.
    ///
    /// Fails with [`TspError::IndexOutOfRange`] if the tour names a city the
    /// instance does not have.
    pub fn from_tour(instance: &TspInstance, mut tour: Vec<usize>, algorithm: &str) -> Result<Self, TspError> {
        if tour.len() == instance.num_cities() {
            if let Some(&first) = tour.first() {
                tour.push(first);
            }
        }
        let cost = instance.path_cost(&tour)?;

        Ok(Solution {
            tour,
            cost,
            algorithm: algorithm.to_string(),
            optimal: false,
            computation_time: 0.0,
            stats: SearchStats::default(),
        })
    }

    /// Check that the tour is closed and visits every city exactly once.
    pub fn is_valid_tour(&self, instance: &TspInstance) -> bool {
        let n = instance.num_cities();
        if self.tour.len() != n + 1 || self.tour.first() != self.tour.last() {
            return false;
        }

        let mut seen = vec![false; n];
        for &city in &self.tour[..n] {
            if city >= n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }

    /// The tour rotated so that it starts (and ends) at city 0.
    pub fn normalized_tour(&self) -> Vec<usize> {
        if self.tour.len() < 2 {
            return self.tour.clone();
        }
        let open = &self.tour[..self.tour.len() - 1];
        let pos = open.iter().position(|&c| c == 0).unwrap_or(0);
        let mut rotated: Vec<usize> = open[pos..].iter().chain(&open[..pos]).copied().collect();
        rotated.push(rotated[0]);
        rotated
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Cost: {:.2}", self.cost)?;
        writeln!(f, "  Proven optimal: {}", self.optimal)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        writeln!(
            f,
            "  Expanded: {}  Generated: {}  Peak frontier: {}",
            self.stats.expanded, self.stats.generated, self.stats.peak_frontier
        )?;
        writeln!(f, "  Route: {}", crate::report::format_route(&self.tour))
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
    fn test_from_open_tour_closes_it() {
        let instance = create_test_instance();
        let sol = Solution::from_tour(&instance, vec![0, 1, 3, 2], "test").unwrap();
        assert_eq!(sol.tour, vec![0, 1, 3, 2, 0]);
        assert_eq!(sol.cost, 80.0);
        assert!(sol.is_valid_tour(&instance));
        assert!(!sol.optimal);
    }

    #[test]
    fn test_from_tour_rejects_unknown_city() {
        let instance = create_test_instance();
        let err = Solution::from_tour(&instance, vec![0, 1, 7, 2], "test").unwrap_err();
        assert!(matches!(err, TspError::IndexOutOfRange { index: 7, num_cities: 4 }));
    }

    #[test]
    fn test_invalid_tours() {
        let instance = create_test_instance();
        let mut sol = Solution::from_tour(&instance, vec![0, 1, 3, 2, 0], "test").unwrap();
        assert!(sol.is_valid_tour(&instance));

        sol.tour = vec![0, 1, 1, 2, 0];
        assert!(!sol.is_valid_tour(&instance));
        sol.tour = vec![0, 1, 3, 2, 1];
        assert!(!sol.is_valid_tour(&instance));
        sol.tour = vec![0, 1, 3, 0];
        assert!(!sol.is_valid_tour(&instance));
    }

    #[test]
    fn test_normalized_tour() {
        let instance = create_test_instance();
        let sol = Solution::from_tour(&instance, vec![3, 2, 0, 1], "test").unwrap();
        assert_eq!(sol.normalized_tour(), vec![0, 1, 3, 2, 0]);
        assert_eq!(sol.cost, 80.0);
    }
}
