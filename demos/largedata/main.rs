use std::time::Instant;

use rand::Rng;
use tracing_subscriber::EnvFilter;

use kmassignment::{CoverStrategy, Hungarian, TieBreak, Weight, Weights};

const N: usize = 100;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = rand::thread_rng();
    let weights: Weights = (0..N)
        .map(|_| (0..N).map(|_| Weight::from(rng.gen_range(-50i32..50))).collect())
        .collect();

    for strategy in [CoverStrategy::Greedy, CoverStrategy::Konig] {
        let mut solver = match Hungarian::new(weights.clone()) {
            Ok(solver) => solver,
            Err(err) => {
                eprintln!("{err}");
                return;
            }
        };
        let now = Instant::now();
        let solution = solver
            .cover_strategy(strategy)
            .tie_break(TieBreak::ZeroCells)
            .solve();
        println!(
            "{strategy:?}: total {} after {} adjustments, {} pairs off zero, elapsed time: {:?}",
            solution.total,
            solution.iterations,
            solution.off_zero_pairs,
            now.elapsed()
        );
    }
}
