//! Lower bounds on the cost of completing a partial tour, used to order A*.

use super::node::CitySet;
use crate::instance::TspInstance;

/// Estimate of the remaining cost from `current` once the cities in `visited`
/// (which includes `current`) have been toured.
///
/// Implementations used with A* must be admissible: the estimate may never
/// exceed the true cheapest cost of visiting every unvisited city and returning
/// to the origin. A* optimality depends on it.
pub trait Heuristic {
    fn estimate(&self, instance: &TspInstance, current: usize, visited: &CitySet) -> f64;
    fn name(&self) -> &str;
}

/// Cheapest edge from the current city to any unvisited city, 0 once every
/// city is visited.
///
/// Admissible: a completion must leave `current` over at least one edge to an
/// unvisited city, and every edge is non-negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinOutgoingEdge;

impl Heuristic for MinOutgoingEdge {
    fn estimate(&self, instance: &TspInstance, current: usize, visited: &CitySet) -> f64 {
        estimate_remaining(instance, current, visited)
    }

    fn name(&self) -> &str {
        "MinOutgoingEdge"
    }
}

/// Always 0. A* with this estimator is uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _instance: &TspInstance, _current: usize, _visited: &CitySet) -> f64 {
        0.0
    }

    fn name(&self) -> &str {
        "Zero"
    }
}

/// The [`MinOutgoingEdge`] bound as a free function.
pub fn estimate_remaining(instance: &TspInstance, current: usize, visited: &CitySet) -> f64 {
    let min = visited
        .missing()
        .map(|city| instance.edge(current, city))
        .fold(f64::INFINITY, f64::min);
    if min.is_finite() {
        min
    } else {
        0.0
    }
}
