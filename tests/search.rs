//! End-to-end runs: load cities, search, and chain restarts.

use u_tsp_evolve::ga::{GaConfig, GaRunner, Strategy};
use u_tsp_evolve::geometry::{tour_length, Cities};
use u_tsp_evolve::loader::{load_cities, parse_cities};
use u_tsp_evolve::permutation::is_permutation;
use u_tsp_evolve::TspError;

const GRID: &str = "\
1 0 0
2 10 0
3 20 0
4 30 0
5 30 10
6 20 10
7 10 10
8 0 10
";

fn grid() -> Cities {
    parse_cities(GRID).unwrap()
}

#[test]
fn square_seeded_with_optimum_never_regresses() {
    let cities = parse_cities("1 0 0\n2 0 1\n3 1 1\n4 1 0\n").unwrap();
    for strategy in [Strategy::Truncation, Strategy::BinaryTournament] {
        let config = GaConfig::default()
            .with_population_size(6)
            .with_max_generations(40)
            .with_strategy(strategy)
            .with_seed(11);
        let result = GaRunner::run_seeded(&cities, &config, &[1, 2, 3, 4]).unwrap();
        assert!(result.best_fitness <= 4.0 + 1e-12, "{strategy:?}: {}", result.best_fitness);
    }
}

#[test]
fn population_size_is_constant_across_generations() {
    // An odd size exercises the overshoot truncation every generation.
    let config = GaConfig::default()
        .with_population_size(7)
        .with_max_generations(30)
        .with_seed(3);
    let result = GaRunner::run(&grid(), &config).unwrap();
    assert_eq!(result.generations, 30);
    assert!(is_permutation(result.best_tour(), 8));
}

#[test]
fn chained_restarts_refine_best() {
    let cities = grid();
    let config = GaConfig::default()
        .with_population_size(20)
        .with_max_generations(25)
        .with_seed(5);

    let mut result = GaRunner::run(&cities, &config).unwrap();
    let mut previous = result.best_fitness;
    for restart in 1..5u64 {
        let config = config.clone().with_seed(5 + restart);
        let tour = result.best_tour().to_vec();
        result = GaRunner::run_seeded(&cities, &config, &tour).unwrap();
        assert!(result.best_fitness <= previous);
        previous = result.best_fitness;
    }

    let len = tour_length(result.best_tour(), &cities).unwrap();
    assert!((len - result.best_fitness).abs() < 1e-9);
    // The perimeter of the 30 x 10 grid is optimal.
    assert!(result.best_fitness >= 80.0 - 1e-9);
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("u-tsp-evolve-{}.txt", std::process::id()));
    std::fs::write(&path, GRID).unwrap();
    let cities = load_cities(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(cities, grid());
}

#[test]
fn degenerate_problem_is_refused() {
    let cities = parse_cities("1 0 0\n2 5 5\n").unwrap();
    let err = GaRunner::run(&cities, &GaConfig::fast()).unwrap_err();
    assert!(matches!(err, TspError::DegenerateInput { .. }));
}
