use math_audio_flower_pollination::{
    FpaConfigBuilder, ParallelConfig, SearchSpace, Updating, flower_pollination,
};
use ndarray::Array1;
use std::time::Instant;

fn main() {
    // Rastrigin function with artificial compute delay to simulate expensive evaluations
    let dimension = 10;
    let rastrigin = move |x: &Array1<f64>| -> f64 {
        let mut sum = 0.0;
        for _ in 0..1000 {
            for &xi in x.iter() {
                sum += xi.sin().cos().exp().ln_1p();
            }
        }

        let a = 10.0;
        let n = x.len() as f64;
        let result = a * n
            + x.iter()
                .map(|&xi| xi * xi - a * (2.0 * std::f64::consts::PI * xi).cos())
                .sum::<f64>();
        result + sum * 1e-10
    };

    let space = SearchSpace::new(1.5, dimension, 5.12, -5.12).expect("valid search space");

    // Deferred updating evaluates each iteration's candidates as one batch
    for (label, enabled) in [("Sequential", false), ("Parallel", true)] {
        println!("Testing {label} Evaluation:");
        let config = FpaConfigBuilder::new()
            .iterations(100)
            .popsize(40)
            .updating(Updating::Deferred)
            .parallel(ParallelConfig {
                enabled,
                num_threads: None, // Use all available cores
            })
            .seed(42)
            .build()
            .expect("valid configuration");

        let start = Instant::now();
        let report =
            flower_pollination(&rastrigin, space.clone(), config).expect("optimization failed");
        let duration = start.elapsed();

        println!("  Best f: {:.6e}", report.fun);
        println!("  Iterations: {}", report.nit);
        println!("  Function evaluations: {}", report.nfev);
        println!("  Time: {:.3} seconds\n", duration.as_secs_f64());
    }
}
