use proptest::prelude::*;
use std::collections::HashMap;
use tsp_state_search::search::*;
use tsp_state_search::{Solution, TspInstance};

fn create_test_instance() -> TspInstance {
    TspInstance::new(vec![
        vec![0.0, 10.0, 15.0, 20.0],
        vec![10.0, 0.0, 35.0, 25.0],
        vec![15.0, 35.0, 0.0, 30.0],
        vec![20.0, 25.0, 30.0, 0.0],
    ])
    .unwrap()
}

fn exhaustive_strategies() -> Vec<Box<dyn SearchStrategy>> {
    vec![
        Box::new(BruteForce::new()),
        Box::new(BreadthFirstSearch::new()),
        Box::new(DepthFirstSearch::new()),
        Box::new(AStarSearch::new()),
        Box::new(AStarSearch::new().with_early_exit()),
    ]
}

fn is_reference_route(solution: &Solution) -> bool {
    let route = solution.normalized_tour();
    route == vec![0, 1, 3, 2, 0] || route == vec![0, 2, 3, 1, 0]
}

#[test]
fn test_four_city_scenario() {
    let instance = create_test_instance();

    for strategy in exhaustive_strategies() {
        let solution = strategy.solve(&instance).unwrap();
        assert_eq!(solution.cost, 80.0, "{}", strategy.name());
        assert!(solution.optimal, "{}", strategy.name());
        assert!(is_reference_route(&solution), "{}: {:?}", strategy.name(), solution.tour);
    }
}

#[test]
fn test_every_strategy_handles_one_city() {
    let instance = TspInstance::new(vec![vec![0.0]]).unwrap();

    for strategy in standard_strategies(7) {
        let solution = strategy.solve(&instance).unwrap();
        assert_eq!(solution.tour, vec![0, 0], "{}", strategy.name());
        assert_eq!(solution.cost, 0.0, "{}", strategy.name());
    }
}

#[test]
fn test_every_strategy_handles_two_cities() {
    let instance = TspInstance::new(vec![vec![0.0, 3.0], vec![4.0, 0.0]]).unwrap();

    for strategy in standard_strategies(7) {
        let solution = strategy.solve(&instance).unwrap();
        assert!(solution.is_valid_tour(&instance), "{}", strategy.name());
        assert_eq!(solution.cost, 7.0, "{}", strategy.name());
    }
}

#[test]
fn test_deterministic_strategies_repeat() {
    let instance = create_test_instance();

    for (a, b) in standard_strategies(3).iter().zip(standard_strategies(3).iter()) {
        let first = a.solve(&instance).unwrap();
        let second = b.solve(&instance).unwrap();
        assert_eq!(first.tour, second.tour, "{}", a.name());
        assert_eq!(first.cost, second.cost, "{}", a.name());
        assert_eq!(first.stats, second.stats, "{}", a.name());
    }
}

#[test]
fn test_strategy_names() {
    let names: Vec<String> = standard_strategies(0)
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["BruteForce", "BFS", "DFS", "A*", "NearestNeighbor", "HillClimbing"]
    );
}

#[test]
fn test_greedy_rejects_unknown_start() {
    let instance = create_test_instance();
    let err = NearestNeighbor::from_start(9).solve(&instance).unwrap_err();
    assert!(matches!(
        err,
        tsp_state_search::TspError::IndexOutOfRange { index: 9, num_cities: 4 }
    ));
}

fn matrix_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..=7).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0u32..50, n), n).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, row)| {
                    row.into_iter()
                        .enumerate()
                        .map(|(j, d)| if i == j { 0.0 } else { d as f64 })
                        .collect()
                })
                .collect()
        })
    })
}

/// Cheapest way from `current` through every city outside `mask` and back to
/// the origin, memoized over `(current, mask)`.
fn exact_completion(
    instance: &TspInstance,
    current: usize,
    mask: usize,
    memo: &mut HashMap<(usize, usize), f64>,
) -> f64 {
    let n = instance.num_cities();
    if mask == (1 << n) - 1 {
        return instance.edge(current, ORIGIN);
    }
    if let Some(&cost) = memo.get(&(current, mask)) {
        return cost;
    }
    let best = (0..n)
        .filter(|&next| mask & (1 << next) == 0)
        .map(|next| instance.edge(current, next) + exact_completion(instance, next, mask | (1 << next), memo))
        .fold(f64::INFINITY, f64::min);
    memo.insert((current, mask), best);
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_exhaustive_strategies_agree(matrix in matrix_strategy()) {
        let instance = TspInstance::new(matrix).unwrap();
        let optimum = BruteForce::new().solve(&instance).unwrap();

        for strategy in exhaustive_strategies() {
            let solution = strategy.solve(&instance).unwrap();
            prop_assert!(solution.is_valid_tour(&instance));
            prop_assert_eq!(solution.cost, optimum.cost);
            prop_assert_eq!(instance.route_cost(&solution.tour[..instance.num_cities()]).unwrap(), solution.cost);
        }
    }

    #[test]
    fn prop_approximations_never_beat_optimum(matrix in matrix_strategy(), seed in 0u64..1000) {
        let instance = TspInstance::new(matrix).unwrap();
        let optimum = BruteForce::new().solve(&instance).unwrap();

        let greedy = NearestNeighbor::new().solve(&instance).unwrap();
        prop_assert!(greedy.is_valid_tour(&instance));
        prop_assert!(greedy.cost >= optimum.cost);

        let climbed = HillClimbing::with_seed(seed).solve(&instance).unwrap();
        prop_assert!(climbed.is_valid_tour(&instance));
        prop_assert!(climbed.cost >= optimum.cost);
    }

    #[test]
    fn prop_budget_still_returns_a_tour(matrix in matrix_strategy(), budget in 1usize..5) {
        let instance = TspInstance::new(matrix).unwrap();
        let limits = SearchLimits { max_expansions: Some(budget), time_limit: None };

        let bounded: Vec<Box<dyn SearchStrategy>> = vec![
            Box::new(BruteForce::with_limits(limits)),
            Box::new(BreadthFirstSearch::with_limits(limits)),
            Box::new(DepthFirstSearch::with_limits(limits)),
            Box::new(AStarSearch::new().with_limits(limits)),
        ];
        for strategy in bounded {
            let solution = strategy.solve(&instance).unwrap();
            prop_assert!(solution.is_valid_tour(&instance));
        }
    }

    #[test]
    fn prop_heuristic_is_admissible(matrix in matrix_strategy()) {
        let instance = TspInstance::new(matrix).unwrap();
        let n = instance.num_cities();
        let mut memo = HashMap::new();

        // every visited set holding the origin; the current city is the origin
        // only before the first move
        for mask in (0usize..(1 << n)).filter(|m| m & 1 == 1) {
            let visited = CitySet::from_cities(n, (0..n).filter(|&c| mask & (1 << c) != 0));
            for current in (0..n).filter(|&c| mask & (1 << c) != 0) {
                if current == ORIGIN && mask != 1 {
                    continue;
                }
                let h = MinOutgoingEdge.estimate(&instance, current, &visited);
                let exact = exact_completion(&instance, current, mask, &mut memo);
                prop_assert!(h <= exact, "h = {} exceeds {} at city {} with mask {:b}", h, exact, current, mask);
            }
        }
    }
}
