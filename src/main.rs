//! TSP Search - Command Line Interface
//!
//! Runs the state-space search strategies on a built-in demo matrix or on
//! instances loaded from disk.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tsp_state_search::benchmark::{load_instances_from_dir, Benchmark, BenchmarkConfig};
use tsp_state_search::instance::TspInstance;
use tsp_state_search::report::{format_route, summary_table};
use tsp_state_search::search::*;
use tsp_state_search::solution::Solution;

use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "tsp-search")]
#[command(version = "1.0")]
#[command(about = "State-space search solvers for the Traveling Salesman Problem")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every strategy on the built-in 4-city matrix
    Demo {
        /// Random seed for hill climbing
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Solve one instance with one strategy
    Solve {
        /// Path to a TSP-LIB (.tsp) or JSON (.json) instance
        #[arg(short, long)]
        instance: PathBuf,

        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "astar")]
        algorithm: Algorithm,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Hill-climbing restarts
        #[arg(long, default_value = "1")]
        restarts: usize,

        /// Start city for nearest neighbor
        #[arg(long, default_value = "0")]
        start: usize,

        /// Maximum states expanded by the exhaustive strategies
        #[arg(long)]
        max_expansions: Option<usize>,

        /// Time limit in seconds for the exhaustive strategies
        #[arg(short, long)]
        time_limit: Option<f64>,

        /// Stop A* once the incumbent is proven optimal
        #[arg(long)]
        early_exit: bool,

        /// Output solution to file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run every strategy on one instance and compare them
    Compare {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,

        /// Number of seeded hill-climbing runs
        #[arg(short, long, default_value = "10")]
        runs: usize,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run benchmarks on a directory of instances
    Benchmark {
        /// Directory containing instance files
        #[arg(short, long)]
        dir: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Number of hill-climbing runs per instance
        #[arg(short, long, default_value = "5")]
        runs: usize,

        /// Largest instance the exhaustive strategies run on
        #[arg(long, default_value = "9")]
        max_exhaustive: usize,

        /// Maximum instance size
        #[arg(long)]
        max_size: Option<usize>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Algorithm {
    /// Enumerate every permutation
    BruteForce,
    /// Breadth-first search
    Bfs,
    /// Depth-first search
    Dfs,
    /// A* with the minimum outgoing edge heuristic
    Astar,
    /// Nearest neighbor construction
    Greedy,
    /// Swap hill climbing from a random tour
    HillClimbing,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seed } => run_demo(seed),

        Commands::Solve {
            instance,
            algorithm,
            seed,
            restarts,
            start,
            max_expansions,
            time_limit,
            early_exit,
            output,
            verbose,
        } => {
            let time_limit = match parse_time_limit(time_limit) {
                Ok(limit) => limit,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let limits = SearchLimits {
                max_expansions,
                time_limit,
            };
            let strategy = build_strategy(algorithm, seed, restarts, start, limits, early_exit);
            solve_instance(&instance, strategy.as_ref(), output, verbose);
        }

        Commands::Compare { instance, runs, output } => {
            compare_strategies(&instance, runs, output);
        }

        Commands::Benchmark {
            dir,
            output,
            runs,
            max_exhaustive,
            max_size,
        } => {
            run_benchmark(&dir, &output, runs, max_exhaustive, max_size);
        }
    }
}

fn build_strategy(
    algorithm: Algorithm,
    seed: u64,
    restarts: usize,
    start: usize,
    limits: SearchLimits,
    early_exit: bool,
) -> Box<dyn SearchStrategy> {
    match algorithm {
        Algorithm::BruteForce => Box::new(BruteForce::with_limits(limits)),
        Algorithm::Bfs => Box::new(BreadthFirstSearch::with_limits(limits)),
        Algorithm::Dfs => Box::new(DepthFirstSearch::with_limits(limits)),
        Algorithm::Astar => {
            let astar = AStarSearch::new().with_limits(limits);
            if early_exit {
                Box::new(astar.with_early_exit())
            } else {
                Box::new(astar)
            }
        }
        Algorithm::Greedy => Box::new(NearestNeighbor::from_start(start)),
        Algorithm::HillClimbing => Box::new(HillClimbing::with_seed(seed).with_restarts(restarts)),
    }
}

/// Convert `--time-limit` seconds, rejecting negative or non-finite values.
fn parse_time_limit(secs: Option<f64>) -> Result<Option<Duration>, String> {
    secs.map(|s| {
        Duration::try_from_secs_f64(s)
            .map_err(|_| format!("invalid time limit {}: expected a non-negative number of seconds", s))
    })
    .transpose()
}

fn load_or_exit(path: &PathBuf) -> TspInstance {
    match TspInstance::from_file(path) {
        Ok(inst) => inst,
        Err(e) => {
            eprintln!("Error loading instance: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_demo(seed: u64) {
    let instance = match TspInstance::with_name(
        "demo-4",
        vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ],
    ) {
        Ok(instance) => instance,
        Err(e) => {
            eprintln!("Error building demo instance: {}", e);
            std::process::exit(1);
        }
    };

    let mut solutions = Vec::new();
    for strategy in standard_strategies(seed) {
        match strategy.solve(&instance) {
            Ok(solution) => {
                println!("Best route ({}):", strategy.name());
                println!("{}", format_route(&solution.tour));
                println!("Minimum distance ({}): {}\n", strategy.name(), solution.cost);
                solutions.push(solution);
            }
            Err(e) => eprintln!("{} failed: {}", strategy.name(), e),
        }
    }

    println!("{}", summary_table(&solutions));
}

fn solve_instance(path: &PathBuf, strategy: &dyn SearchStrategy, output: Option<PathBuf>, verbose: bool) {
    println!("Loading instance from {:?}...", path);
    let instance = load_or_exit(path);

    if verbose {
        println!("{}", instance.statistics());
    }

    println!("Solving with {}...", strategy.name());
    let solution = match strategy.solve(&instance) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n========== Results ==========");
    print!("{}", solution);

    if let Some(out_path) = output {
        let json = match serde_json::to_string_pretty(&solution) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error serializing solution: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(&out_path, json) {
            eprintln!("Error writing {:?}: {}", out_path, e);
            std::process::exit(1);
        }
        println!("\nSolution saved to {:?}", out_path);
    }
}

fn compare_strategies(path: &PathBuf, runs: usize, output: Option<PathBuf>) {
    let instance = load_or_exit(path);

    println!(
        "Comparing strategies on {} (n={})...\n",
        instance.name,
        instance.num_cities()
    );

    let mut solutions: Vec<Solution> = Vec::new();
    let exhaustive: Vec<Box<dyn SearchStrategy>> = vec![
        Box::new(BruteForce::new()),
        Box::new(BreadthFirstSearch::new()),
        Box::new(DepthFirstSearch::new()),
        Box::new(AStarSearch::new()),
        Box::new(AStarSearch::new().with_early_exit()),
        Box::new(NearestNeighbor::new()),
    ];

    for (i, strategy) in exhaustive.iter().enumerate() {
        match strategy.solve(&instance) {
            Ok(mut solution) => {
                if i == 4 {
                    solution.algorithm = "A*-early-exit".to_string();
                }
                solutions.push(solution);
            }
            Err(e) => eprintln!("{} failed: {}", strategy.name(), e),
        }
    }

    for seed in 0..runs as u64 {
        match HillClimbing::with_seed(seed).solve(&instance) {
            Ok(mut solution) => {
                solution.algorithm = format!("HillClimbing-run{}", seed);
                solutions.push(solution);
            }
            Err(e) => eprintln!("HillClimbing failed: {}", e),
        }
    }

    println!("{}", summary_table(&solutions));

    if let Some(out_path) = output {
        let mut benchmark = Benchmark::new(BenchmarkConfig::default());
        benchmark.record_solutions(&instance, &solutions);
        match benchmark.export_to_csv(&out_path) {
            Ok(()) => println!("\nResults exported to {:?}", out_path),
            Err(e) => eprintln!("Failed to export results: {}", e),
        }
    }
}

fn run_benchmark(dir: &PathBuf, output: &PathBuf, runs: usize, max_exhaustive: usize, max_size: Option<usize>) {
    println!("Loading instances from {:?}...", dir);

    let mut instances = match load_instances_from_dir(dir) {
        Ok(instances) => instances,
        Err(e) => {
            eprintln!("Error reading {:?}: {}", dir, e);
            std::process::exit(1);
        }
    };

    if let Some(max) = max_size {
        instances.retain(|i| i.num_cities() <= max);
    }

    println!("Found {} instances", instances.len());

    if instances.is_empty() {
        eprintln!("No instances found!");
        return;
    }

    if let Err(e) = std::fs::create_dir_all(output) {
        eprintln!("Failed to create output directory: {}", e);
        std::process::exit(1);
    }

    let config = BenchmarkConfig {
        num_runs: runs,
        max_exhaustive_cities: max_exhaustive,
        ..Default::default()
    };
    let mut benchmark = Benchmark::new(config);

    let progress = ProgressBar::new(instances.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}") {
        progress.set_style(style);
    }

    for instance in &instances {
        progress.set_message(format!("{} (n={})", instance.name, instance.num_cities()));
        if let Err(e) = benchmark.run_instance(instance) {
            progress.println(format!("Benchmark failed on {}: {}", instance.name, e));
        }
        progress.inc(1);
    }
    progress.finish_with_message("done");

    let results_path = output.join("results.csv");
    match benchmark.export_to_csv(&results_path) {
        Ok(()) => println!("\nResults exported to {:?}", results_path),
        Err(e) => eprintln!("Failed to export results: {}", e),
    }

    let stats_path = output.join("statistics.csv");
    match benchmark.export_statistics_csv(&stats_path) {
        Ok(()) => println!("Statistics exported to {:?}", stats_path),
        Err(e) => eprintln!("Failed to export statistics: {}", e),
    }

    let report = benchmark.generate_report();
    println!("\n{}", report);

    let report_path = output.join("report.txt");
    match std::fs::write(&report_path, &report) {
        Ok(()) => println!("Report saved to {:?}", report_path),
        Err(e) => eprintln!("Failed to save report: {}", e),
    }
}
