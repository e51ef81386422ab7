use math_audio_flower_pollination::{FlowerPollination, FpaConfigBuilder, SearchSpace};
use ndarray::Array1;

fn main() {
    env_logger::init();

    // Rosenbrock in 3 dimensions, minimum 0 at (1, 1, 1)
    let rosenbrock = |x: &Array1<f64>| -> f64 {
        x.windows(2)
            .into_iter()
            .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
            .sum()
    };

    let mut fpa = FlowerPollination::new(SearchSpace::default()).expect("valid search space");

    let config = FpaConfigBuilder::new()
        .iterations(200)
        .popsize(20)
        .switch_probability(0.8)
        .seed(42)
        .print_interval(50)
        .build()
        .expect("valid configuration");
    let report = fpa.run(&rosenbrock, config).expect("optimization failed");

    println!("{report}");
    println!("Evaluations: {}", report.nfev);

    // Widen the box and run again with more iterations
    fpa.space_mut().set_lower_bound(-5.0).set_upper_bound(5.0);
    let config = FpaConfigBuilder::new()
        .iterations(1000)
        .popsize(25)
        .seed(42)
        .build()
        .expect("valid configuration");
    let report = fpa.run(&rosenbrock, config).expect("optimization failed");

    println!("\nWider box, 1000 iterations:");
    println!("{report}");
}
