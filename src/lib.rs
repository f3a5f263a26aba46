//! TSP State-Space Search Library
//!
//! Six interchangeable strategies for the Traveling Salesman Problem, all
//! working against one read-only distance-matrix model.
//!
//! # Features
//!
//! - Exhaustive strategies that return the global optimum: brute-force
//!   permutation enumeration, breadth-first search, depth-first search and A*
//!   with an admissible minimum-outgoing-edge heuristic
//! - Nearest neighbor construction and swap hill climbing as fast baselines
//! - Optional expansion / time budgets for the exhaustive strategies
//! - TSP-LIB and JSON instance loading
//! - Benchmarking with CSV export
//!
//! # Example
//!
//! ```
//! use tsp_state_search::instance::TspInstance;
//! use tsp_state_search::search::{AStarSearch, SearchStrategy};
//! use tsp_state_search::report::format_route;
//!
//! let instance = TspInstance::new(vec![
//!     vec![0.0, 10.0, 15.0, 20.0],
//!     vec![10.0, 0.0, 35.0, 25.0],
//!     vec![15.0, 35.0, 0.0, 30.0],
//!     vec![20.0, 25.0, 30.0, 0.0],
//! ]).unwrap();
//!
//! let solution = AStarSearch::new().solve(&instance).unwrap();
//! assert_eq!(solution.cost, 80.0);
//! println!("{}", format_route(&solution.tour));
//! ```

pub mod benchmark;
pub mod error;
pub mod instance;
pub mod report;
pub mod search;
pub mod solution;

pub use error::TspError;
pub use instance::TspInstance;
pub use solution::Solution;
