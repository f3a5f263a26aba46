//! The expansion loop shared by breadth-first, depth-first and A* search.

use super::frontier::Frontier;
use super::greedy::complete_greedily;
use super::heuristic::Heuristic;
use super::node::{CitySet, PathNode};
use super::{Incumbent, SearchLimits, ORIGIN};
use crate::instance::TspInstance;
use crate::solution::{SearchStats, Solution};
use std::rc::Rc;
use std::time::Instant;

pub(crate) struct ExploreOptions<'a, H: Heuristic> {
    pub algorithm: &'a str,
    pub heuristic: &'a H,
    pub limits: &'a SearchLimits,
    /// Stop once the popped state's `f` reaches the incumbent cost. Only sound
    /// with an ordered frontier and an admissible heuristic.
    pub early_exit: bool,
}

/// Explore every partial path from the origin in the order `frontier` dictates.
///
/// A popped path that spans all cities is closed back to the origin and offered
/// to the incumbent. Any other path is expanded by one child per unvisited city,
/// in ascending city order. Distinct paths over the same visited set are kept
/// apart; nothing is pruned.
pub(crate) fn explore<F, H>(instance: &TspInstance, mut frontier: F, options: ExploreOptions<'_, H>) -> Solution
where
    F: Frontier<Rc<PathNode>>,
    H: Heuristic,
{
    let start = Instant::now();
    let n = instance.num_cities();
    let budget = options.limits.start();
    let mut stats = SearchStats::default();
    let mut incumbent = Incumbent::new();

    let root = {
        let visited = CitySet::from_cities(n, [ORIGIN]);
        PathNode::root(ORIGIN, n, options.heuristic.estimate(instance, ORIGIN, &visited))
    };
    let root_priority = root.f();
    frontier.push(Rc::clone(&root), root_priority);
    stats.generated = 1;
    stats.peak_frontier = 1;

    let mut interrupted: Option<Rc<PathNode>> = None;

    while let Some(node) = frontier.pop() {
        if options.early_exit && node.f() >= incumbent.cost() {
            log::debug!(
                "{}: f = {:.2} reached incumbent {:.2}, {} states left unexpanded",
                options.algorithm,
                node.f(),
                incumbent.cost(),
                frontier.len() + 1
            );
            break;
        }
        if budget.exhausted(stats.expanded) {
            log::debug!("{}: budget exhausted after {} expansions", options.algorithm, stats.expanded);
            interrupted = Some(node);
            break;
        }
        stats.expanded += 1;

        if node.visited.is_full() {
            let total = node.cost + instance.edge(node.city, ORIGIN);
            let improved = incumbent.offer(total, || {
                let mut route = node.path();
                route.push(ORIGIN);
                route
            });
            if improved {
                log::trace!("{}: new incumbent {:.2}", options.algorithm, total);
            }
            continue;
        }

        for next in node.visited.missing() {
            let mut visited = node.visited.clone();
            visited.insert(next);
            let estimate = options.heuristic.estimate(instance, next, &visited);
            let child = node.extend(next, instance.edge(node.city, next), visited, estimate);
            let priority = child.f();
            frontier.push(child, priority);
            stats.generated += 1;
        }
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
    }

    stats.improvements = incumbent.improvements();
    let proven = interrupted.is_none();

    let (tour, cost) = match incumbent.into_route() {
        Some(best) => best,
        None => {
            // Only reachable when the budget stopped the run before any tour
            // was closed: finish the interrupted path greedily.
            let partial = interrupted.unwrap_or(root);
            let mut route = partial.path();
            let mut visited = partial.visited.clone();
            complete_greedily(instance, &mut route, &mut visited);
            route.push(ORIGIN);
            let cost: f64 = route.windows(2).map(|w| instance.edge(w[0], w[1])).sum();
            (route, cost)
        }
    };

    log::debug!(
        "{}: cost {:.2}, expanded {}, generated {}, peak frontier {}",
        options.algorithm,
        cost,
        stats.expanded,
        stats.generated,
        stats.peak_frontier
    );

    Solution {
        tour,
        cost,
        algorithm: options.algorithm.to_string(),
        optimal: proven,
        computation_time: start.elapsed().as_secs_f64(),
        stats,
    }
}
