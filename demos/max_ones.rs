//! Solves MaxOnes with VNS and prints the best solution found.
//!
//! ```text
//! RUST_LOG=debug cargo run --example max_ones
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use u_vns::problems::max_ones::{MaxOnesProblem, MaxOnesSolution};
use u_vns::solution::{LocalSearchType, Solution};
use u_vns::vns::{RandomMoveShaking, VnsConfig, VnsOptimizer};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn main() -> u_vns::Result<()> {
    enable_tracing();

    let problem = MaxOnesProblem::new(10)?;
    let mut initial = MaxOnesSolution::new();
    initial.random_init(&problem, &mut StdRng::seed_from_u64(42));
    tracing::info!("initial solution {}", initial.code());

    let config = VnsConfig::default()
        .with_k_range(1, 3)
        .with_max_local_optima(10)
        .with_seconds_max(10.0)
        .with_local_search_type(LocalSearchType::FirstImprovement);

    let mut optimizer = VnsOptimizer::new(&problem, initial, RandomMoveShaking::default(), config)?;
    let result = optimizer.optimize()?;

    println!("best solution: {}", result.best.code());
    println!("best fitness:  {}", result.best_quality.fitness);
    println!("iterations:    {}", result.iterations);
    println!("evaluations:   {}", result.evaluations);
    println!("elapsed:       {:.3?}", result.elapsed);
    Ok(())
}
