//! Human-readable rendering of routes and strategy results.

use crate::solution::Solution;

/// Render a route as arrow-joined city indices, e.g. `0 -> 2 -> 1 -> 3 -> 0`.
pub fn format_route(route: &[usize]) -> String {
    route
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// One-line summary table of several solutions, best first.
pub fn summary_table(solutions: &[Solution]) -> String {
    let mut sorted: Vec<&Solution> = solutions.iter().collect();
    sorted.sort_by(|a, b| a.cost.total_cmp(&b.cost));

    let mut table = String::new();
    table.push_str(&format!(
        "{:<16} {:>12} {:>8} {:>10} {:>10}  {}\n",
        "Algorithm", "Cost", "Optimal", "Expanded", "Time", "Route"
    ));
    table.push_str(&"-".repeat(80));
    table.push('\n');

    for sol in sorted {
        table.push_str(&format!(
            "{:<16} {:>12.2} {:>8} {:>10} {:>9.4}s  {}\n",
            sol.algorithm,
            sol.cost,
            if sol.optimal { "yes" } else { "no" },
            sol.stats.expanded,
            sol.computation_time,
            format_route(&sol.tour)
        ));
    }

    table
}
