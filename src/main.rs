//! tsp-evolve: genetic-algorithm search for short closed tours.
//!
//! Reads a city file (`label x y` per line), runs the search one or more
//! times, seeding every restart with the best tour so far, and prints the
//! best score and tour.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_tsp_evolve::ga::{GaConfig, GaRunner, Strategy};
use u_tsp_evolve::loader::load_cities;

#[derive(Parser)]
#[command(name = "tsp-evolve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// City file: one `label x y` line per city
    cities: PathBuf,

    /// Selection strategy
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Tournament)]
    strategy: StrategyArg,

    /// Generations per run
    #[arg(short, long, default_value_t = 100)]
    generations: usize,

    /// Population size
    #[arg(short, long, default_value_t = 50)]
    population: usize,

    /// Number of chained runs, each seeded with the previous best tour
    #[arg(short, long, default_value_t = 1)]
    restarts: usize,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// How many cities of the best tour to print
    #[arg(long, default_value_t = 20)]
    preview: usize,

    /// Log every generation
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Keep the top half, breed the rest with segment substitution
    Truncation,
    /// Binary tournaments with three-point exchange crossover
    Tournament,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Truncation => Strategy::Truncation,
            StrategyArg::Tournament => Strategy::BinaryTournament,
        }
    }
}

/// Joins the first `n` cities of `tour`, with ` ...` when more remain.
fn first_n(n: usize, tour: &[usize]) -> String {
    let shown: Vec<String> = tour.iter().take(n).map(ToString::to_string).collect();
    let mut preview = shown.join(", ");
    if tour.len() > n {
        preview.push_str(" ...");
    }
    preview
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let cities = load_cities(&cli.cities)
        .with_context(|| format!("loading cities from {}", cli.cities.display()))?;
    info!(cities = cities.len(), file = %cli.cities.display(), "cities loaded");

    let mut config = GaConfig::default()
        .with_strategy(cli.strategy.into())
        .with_max_generations(cli.generations)
        .with_population_size(cli.population);

    let mut best_tour: Option<Vec<usize>> = None;
    let mut best_fitness = f64::INFINITY;
    for restart in 0..cli.restarts.max(1) {
        // Distinct but reproducible stream per restart.
        config.seed = cli.seed.map(|seed| seed.wrapping_add(restart as u64));
        let result = match &best_tour {
            Some(tour) => GaRunner::run_seeded(&cities, &config, tour)?,
            None => GaRunner::run(&cities, &config)?,
        };
        info!(restart, best = result.best_fitness, "run finished");
        best_fitness = result.best_fitness;
        best_tour = Some(result.best.into_tour());
    }

    let tour = best_tour.unwrap_or_default();
    println!(
        "After {} generations of {} tours, the best is:",
        cli.generations * cli.restarts.max(1),
        cli.population
    );
    println!("score = {best_fitness}");
    println!("{}", first_n(cli.preview, &tour));
    Ok(())
}
