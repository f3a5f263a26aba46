//! Benchmarking and comparison of the search strategies.
//!
//! Runs every strategy on a set of instances, compares each result against the
//! exhaustive optimum when one is known, aggregates statistics per algorithm
//! and exports everything to CSV.

use crate::error::TspError;
use crate::instance::TspInstance;
use crate::search::*;
use crate::solution::Solution;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Result of running a single algorithm on an instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Algorithm name
    pub algorithm: String,
    /// Instance name
    pub instance: String,
    /// Number of cities
    pub num_cities: usize,
    /// Solution cost
    pub cost: f64,
    /// Whether the strategy proved optimality
    pub optimal: bool,
    /// Computation time in seconds
    pub time: f64,
    /// States expanded
    pub expanded: usize,
    /// Peak frontier size
    pub peak_frontier: usize,
    /// Gap to the exhaustive optimum in percent (if known)
    pub gap_to_best: Option<f64>,
}

/// Aggregated statistics for an algorithm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmStatistics {
    pub algorithm: String,
    pub num_runs: usize,
    pub num_optimal: usize,
    pub avg_cost: f64,
    pub best_cost: f64,
    pub worst_cost: f64,
    pub std_cost: f64,
    pub avg_time: f64,
    pub total_time: f64,
    pub avg_gap: Option<f64>,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Seeded hill-climbing runs per instance
    pub num_runs: usize,
    /// Largest instance the exhaustive strategies are run on
    pub max_exhaustive_cities: usize,
    /// Budget applied to each exhaustive strategy
    pub limits: SearchLimits,
    /// Run the hill-climbing seeds in parallel
    pub parallel: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_runs: 5,
            max_exhaustive_cities: 9,
            limits: SearchLimits::default(),
            parallel: true,
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<AlgorithmResult>,
    best_known: HashMap<String, f64>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
            best_known: HashMap::new(),
        }
    }

    /// Set best known tour cost for an instance
    pub fn set_best_known(&mut self, instance_name: &str, cost: f64) {
        self.best_known.insert(instance_name.to_string(), cost);
    }

    /// Run the exhaustive strategies; the first proven optimum becomes the
    /// instance's best known cost.
    pub fn run_exhaustive(&mut self, instance: &TspInstance) -> Result<(), TspError> {
        if instance.num_cities() > self.config.max_exhaustive_cities {
            log::info!(
                "Skipping exhaustive strategies on {} ({} cities > {})",
                instance.name,
                instance.num_cities(),
                self.config.max_exhaustive_cities
            );
            return Ok(());
        }

        let limits = self.config.limits;
        let strategies: Vec<Box<dyn SearchStrategy + Send + Sync>> = vec![
            Box::new(BruteForce::with_limits(limits)),
            Box::new(BreadthFirstSearch::with_limits(limits)),
            Box::new(DepthFirstSearch::with_limits(limits)),
            Box::new(AStarSearch::new().with_limits(limits)),
        ];

        for strategy in strategies {
            let solution = strategy.solve(instance)?;
            if solution.optimal && !self.best_known.contains_key(&instance.name) {
                self.best_known.insert(instance.name.clone(), solution.cost);
            }
            self.record_result(instance, &solution);
        }
        Ok(())
    }

    /// Run the non-exhaustive baselines: nearest neighbor once, hill climbing
    /// once per seed.
    pub fn run_heuristics(&mut self, instance: &TspInstance) -> Result<(), TspError> {
        let greedy = NearestNeighbor::new().solve(instance)?;
        self.record_result(instance, &greedy);

        let seeds: Vec<u64> = (0..self.config.num_runs as u64).collect();
        let climb = |seed: u64| -> Result<Solution, TspError> {
            let mut solution = HillClimbing::with_seed(seed).solve(instance)?;
            solution.algorithm = format!("HillClimbing-run{}", seed);
            Ok(solution)
        };

        let runs: Result<Vec<Solution>, TspError> = if self.config.parallel {
            seeds.into_par_iter().map(climb).collect()
        } else {
            seeds.into_iter().map(climb).collect()
        };

        for solution in runs? {
            self.record_result(instance, &solution);
        }
        Ok(())
    }

    /// Run full benchmark on an instance
    pub fn run_instance(&mut self, instance: &TspInstance) -> Result<(), TspError> {
        log::info!("Running benchmark on instance: {}", instance.name);
        self.run_exhaustive(instance)?;
        self.run_heuristics(instance)?;
        self.refresh_gaps();
        Ok(())
    }

    /// Run benchmark on multiple instances
    pub fn run_on_instances(&mut self, instances: &[TspInstance]) -> Result<(), TspError> {
        for instance in instances {
            self.run_instance(instance)?;
        }
        Ok(())
    }

    /// Record a result
    pub fn record_result(&mut self, instance: &TspInstance, solution: &Solution) {
        let mut result = AlgorithmResult {
            algorithm: solution.algorithm.clone(),
            instance: instance.name.clone(),
            num_cities: instance.num_cities(),
            cost: solution.cost,
            optimal: solution.optimal,
            time: solution.computation_time,
            expanded: solution.stats.expanded,
            peak_frontier: solution.stats.peak_frontier,
            gap_to_best: None,
        };

        if let Some(&best) = self.best_known.get(&instance.name) {
            result.gap_to_best = Some(gap_percent(result.cost, best));
        }

        self.results.push(result);
    }

    /// Record solutions computed outside the harness. A proven optimum among
    /// them becomes the best known cost unless one is already set, and gaps are
    /// filled in for every recorded row of that instance.
    pub fn record_solutions(&mut self, instance: &TspInstance, solutions: &[Solution]) {
        if !self.best_known.contains_key(&instance.name) {
            if let Some(proven) = solutions.iter().find(|s| s.optimal) {
                self.best_known.insert(instance.name.clone(), proven.cost);
            }
        }
        for solution in solutions {
            self.record_result(instance, solution);
        }
        self.refresh_gaps();
    }

    /// Recompute gaps for results recorded before the optimum was known.
    fn refresh_gaps(&mut self) {
        for result in &mut self.results {
            if let Some(&best) = self.best_known.get(&result.instance) {
                result.gap_to_best = Some(gap_percent(result.cost, best));
            }
        }
    }

    /// Compute statistics for each algorithm. Hill-climbing runs are grouped
    /// under one name.
    pub fn compute_statistics(&self) -> Vec<AlgorithmStatistics> {
        let mut stats_map: HashMap<String, Vec<&AlgorithmResult>> = HashMap::new();

        for result in &self.results {
            let key = match result.algorithm.split_once("-run") {
                Some((base, _)) => base.to_string(),
                None => result.algorithm.clone(),
            };
            stats_map.entry(key).or_default().push(result);
        }

        let mut statistics = Vec::new();

        for (algo, results) in stats_map {
            let costs: Vec<f64> = results.iter().map(|r| r.cost).collect();
            let times: Vec<f64> = results.iter().map(|r| r.time).collect();
            let gaps: Vec<f64> = results.iter().filter_map(|r| r.gap_to_best).collect();

            let avg_cost = costs.iter().sum::<f64>() / costs.len() as f64;
            let best_cost = costs.iter().cloned().fold(f64::INFINITY, f64::min);
            let worst_cost = costs.iter().cloned().fold(0.0, f64::max);

            let variance = costs.iter().map(|c| (c - avg_cost).powi(2)).sum::<f64>() / costs.len() as f64;

            let avg_gap = if !gaps.is_empty() {
                Some(gaps.iter().sum::<f64>() / gaps.len() as f64)
            } else {
                None
            };

            statistics.push(AlgorithmStatistics {
                algorithm: algo,
                num_runs: results.len(),
                num_optimal: results.iter().filter(|r| r.optimal).count(),
                avg_cost,
                best_cost,
                worst_cost,
                std_cost: variance.sqrt(),
                avg_time: times.iter().sum::<f64>() / times.len() as f64,
                total_time: times.iter().sum::<f64>(),
                avg_gap,
            });
        }

        statistics.sort_by(|a, b| {
            a.avg_cost
                .total_cmp(&b.avg_cost)
                .then_with(|| a.algorithm.cmp(&b.algorithm))
        });

        statistics
    }

    /// Export results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), TspError> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Export statistics to CSV
    pub fn export_statistics_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), TspError> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for stat in self.compute_statistics() {
            writer.serialize(stat)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("      TSP Search Benchmark Report\n");
        report.push_str("========================================\n\n");

        report.push_str("Algorithm Performance Summary:\n");
        report.push_str("-".repeat(80).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<20} {:>10} {:>12} {:>12} {:>10} {:>10}\n",
            "Algorithm", "Optimal", "Avg Cost", "Best Cost", "Avg Gap%", "Avg Time"
        ));
        report.push_str("-".repeat(80).as_str());
        report.push('\n');

        for stat in self.compute_statistics() {
            let gap_str = stat
                .avg_gap
                .map(|g| format!("{:.2}%", g))
                .unwrap_or_else(|| "-".to_string());

            report.push_str(&format!(
                "{:<20} {:>10} {:>12.2} {:>12.2} {:>10} {:>10.4}\n",
                stat.algorithm,
                format!("{}/{}", stat.num_optimal, stat.num_runs),
                stat.avg_cost,
                stat.best_cost,
                gap_str,
                stat.avg_time
            ));
        }

        report.push_str("-".repeat(80).as_str());
        report.push('\n');

        report.push_str("\nBest Solutions per Instance:\n");

        let mut instance_best: HashMap<&str, &AlgorithmResult> = HashMap::new();
        for result in &self.results {
            let entry = instance_best.entry(result.instance.as_str()).or_insert(result);
            if result.cost < entry.cost {
                *entry = result;
            }
        }

        let mut bests: Vec<(&str, &AlgorithmResult)> = instance_best.into_iter().collect();
        bests.sort_by_key(|(name, _)| *name);
        for (name, best) in bests {
            report.push_str(&format!("  {}: {:.2} ({})\n", name, best.cost, best.algorithm));
        }

        report
    }

    /// Get all results
    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    /// Get best known values
    pub fn best_known(&self) -> &HashMap<String, f64> {
        &self.best_known
    }
}

fn gap_percent(cost: f64, best: f64) -> f64 {
    if best > 0.0 {
        (cost - best) / best * 100.0
    } else {
        0.0
    }
}

/// Load every `.tsp` / `.json` instance in a directory, smallest first.
/// Files that fail to load are skipped with a warning.
pub fn load_instances_from_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<TspInstance>, TspError> {
    let mut instances = Vec::new();

    for entry in std::fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        let supported = path
            .extension()
            .map(|e| e == "tsp" || e == "json")
            .unwrap_or(false);
        if !supported {
            continue;
        }
        match TspInstance::from_file(&path) {
            Ok(instance) => instances.push(instance),
            Err(e) => log::warn!("Skipping {:?}: {}", path, e),
        }
    }

    instances.sort_by(|a, b| a.num_cities().cmp(&b.num_cities()).then_with(|| a.name.cmp(&b.name)));

    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_instance() -> TspInstance {
        TspInstance::with_name(
            "four",
            vec![
                vec![0.0, 10.0, 15.0, 20.0],
                vec![10.0, 0.0, 35.0, 25.0],
                vec![15.0, 35.0, 0.0, 30.0],
                vec![20.0, 25.0, 30.0, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_benchmark_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.num_runs, 5);
        assert_eq!(config.max_exhaustive_cities, 9);
    }

    #[test]
    fn test_run_instance() {
        let instance = create_test_instance();
        let mut benchmark = Benchmark::new(BenchmarkConfig {
            num_runs: 3,
            ..Default::default()
        });
        benchmark.run_instance(&instance).unwrap();

        // 4 exhaustive + greedy + 3 climbs
        assert_eq!(benchmark.results().len(), 8);
        assert_eq!(benchmark.best_known().get("four"), Some(&80.0));
        for result in benchmark.results() {
            let gap = result.gap_to_best.unwrap();
            assert!(gap >= 0.0, "{} has negative gap", result.algorithm);
        }

        let stats = benchmark.compute_statistics();
        assert!(stats.iter().any(|s| s.algorithm == "HillClimbing" && s.num_runs == 3));
        let astar = stats.iter().find(|s| s.algorithm == "A*").unwrap();
        assert_eq!(astar.num_optimal, 1);
        assert_eq!(astar.best_cost, 80.0);

        let report = benchmark.generate_report();
        assert!(report.contains("four: 80.00"));
    }

    #[test]
    fn test_skips_exhaustive_on_large_instances() {
        let instance = create_test_instance();
        let mut benchmark = Benchmark::new(BenchmarkConfig {
            num_runs: 1,
            max_exhaustive_cities: 3,
            parallel: false,
            ..Default::default()
        });
        benchmark.run_instance(&instance).unwrap();

        assert_eq!(benchmark.results().len(), 2);
        assert!(benchmark.best_known().is_empty());
        assert!(benchmark.results().iter().all(|r| r.gap_to_best.is_none()));
    }

    #[test]
    fn test_record_solutions_uses_proven_optimum() {
        let instance = create_test_instance();
        let detour = Solution::from_tour(&instance, vec![0, 2, 1, 3], "Detour").unwrap();
        let exact = BruteForce::new().solve(&instance).unwrap();

        let mut benchmark = Benchmark::new(BenchmarkConfig::default());
        benchmark.record_solutions(&instance, &[detour, exact]);

        assert_eq!(benchmark.best_known().get("four"), Some(&80.0));
        let gaps: Vec<Option<f64>> = benchmark.results().iter().map(|r| r.gap_to_best).collect();
        assert_eq!(gaps, vec![Some(18.75), Some(0.0)]);
    }

    #[test]
    fn test_gap_percent() {
        assert_eq!(gap_percent(110.0, 100.0), 10.0);
        assert_eq!(gap_percent(0.0, 0.0), 0.0);
    }
}
