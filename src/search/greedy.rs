use super::node::CitySet;
use super::SearchStrategy;
use crate::error::TspError;
use crate::instance::TspInstance;
use crate::solution::{SearchStats, Solution};
use ordered_float::OrderedFloat;

/// Nearest Neighbor Heuristic
///
/// Builds a tour by repeatedly visiting the nearest unvisited city, ties going
/// to the lowest index, then closes it back to the start. One pass, `O(n^2)`,
/// no backtracking, no optimality guarantee.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighbor {
    pub start: usize,
}

impl NearestNeighbor {
    pub fn new() -> Self {
        NearestNeighbor { start: 0 }
    }

    pub fn from_start(start: usize) -> Self {
        NearestNeighbor { start }
    }
}

/// Extend `path` with nearest-neighbor steps until every city is on it.
/// `visited` must hold exactly the cities of `path`.
pub(crate) fn complete_greedily(instance: &TspInstance, path: &mut Vec<usize>, visited: &mut CitySet) -> usize {
    let mut steps = 0;
    while let Some(&current) = path.last() {
        let next = visited
            .missing()
            .min_by_key(|&c| OrderedFloat(instance.edge(current, c)));
        match next {
            Some(city) => {
                visited.insert(city);
                path.push(city);
                steps += 1;
            }
            None => break,
        }
    }
    steps
}

impl SearchStrategy for NearestNeighbor {
    fn solve(&self, instance: &TspInstance) -> Result<Solution, TspError> {
        let start = std::time::Instant::now();
        let n = instance.num_cities();
        if self.start >= n {
            return Err(TspError::IndexOutOfRange {
                index: self.start,
                num_cities: n,
            });
        }

        let mut tour = vec![self.start];
        let mut visited = CitySet::from_cities(n, [self.start]);
        let steps = complete_greedily(instance, &mut tour, &mut visited);

        let mut solution = Solution::from_tour(instance, tour, self.name())?;
        solution.computation_time = start.elapsed().as_secs_f64();
        solution.stats = SearchStats {
            expanded: steps,
            generated: n * n.saturating_sub(1) / 2,
            peak_frontier: 0,
            improvements: 1,
        };
        log::debug!("NearestNeighbor from {}: cost {:.2}", self.start, solution.cost);
        Ok(solution)
    }

    fn name(&self) -> &str {
        "NearestNeighbor"
    }
}
