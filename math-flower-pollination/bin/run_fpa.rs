use clap::Parser;
use math_audio_flower_pollination::{
    CallbackAction, FpaConfigBuilder, Objective, ParallelConfig, SearchSpace, Updating,
    flower_pollination,
};
use ndarray::Array1;
use std::fmt::Write as FmtWrite;
use std::process;
use std::str::FromStr;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "run_fpa",
    about = "Minimize a benchmark function with the Flower Pollination Algorithm"
)]
struct Cli {
    /// Name of the benchmark function to optimize (use --list-functions to see available options)
    #[arg(long, default_value = "rosenbrock")]
    function: String,

    /// Dimensionality of the problem
    #[arg(long, default_value_t = 3)]
    dim: usize,

    /// Lower bound shared by every coordinate
    #[arg(long, default_value_t = -2.0, allow_hyphen_values = true)]
    lower: f64,

    /// Upper bound shared by every coordinate
    #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
    upper: f64,

    /// Lévy flight exponent
    #[arg(long, default_value_t = 1.5)]
    lambda: f64,

    /// Number of iterations
    #[arg(long, default_value_t = 200)]
    iterations: usize,

    /// Population size (>= 3)
    #[arg(long, default_value_t = 20)]
    population: usize,

    /// Probability of local pollination in [0, 1]
    #[arg(long, default_value_t = 0.8)]
    switch_probability: f64,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Build every candidate against the iteration snapshot and evaluate them together
    #[arg(long)]
    deferred: bool,

    /// Disable parallel evaluation of the population
    #[arg(long)]
    no_parallel: bool,

    /// Number of threads for parallel evaluation (0 = use all available cores)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Print intermediate progress every N iterations (0 disables)
    #[arg(long, default_value_t = 0)]
    progress_every: usize,

    /// Stop the optimization after this many seconds (optional)
    #[arg(long)]
    max_seconds: Option<f64>,

    /// List all available functions and exit
    #[arg(long)]
    list_functions: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();

    if args.list_functions {
        list_available_functions();
        return;
    }

    let objective = Objective::from_str(&args.function).unwrap_or_else(|err| {
        eprintln!("Error: {err}. Use --list-functions to inspect available names.");
        process::exit(2);
    });

    let space = SearchSpace::new(args.lambda, args.dim, args.upper, args.lower).unwrap_or_else(
        |err| {
            eprintln!("Error: {err}");
            process::exit(2);
        },
    );

    let parallel = ParallelConfig {
        enabled: !args.no_parallel,
        num_threads: if args.threads == 0 {
            None
        } else {
            Some(args.threads)
        },
    };

    let mut builder = FpaConfigBuilder::new()
        .iterations(args.iterations)
        .popsize(args.population)
        .switch_probability(args.switch_probability)
        .updating(if args.deferred {
            Updating::Deferred
        } else {
            Updating::Immediate
        })
        .parallel(parallel);

    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let overall_start = Instant::now();
    let progress_every = args.progress_every;
    let time_limit = args.max_seconds;

    if progress_every > 0 || time_limit.is_some() {
        builder = builder.callback(Box::new(move |intermediate| {
            if progress_every > 0
                && (intermediate.iter == 1 || intermediate.iter % progress_every == 0)
            {
                println!(
                    "iter {:>5} | f(x) = {:>12.6e} | accepted = {:>4} | improved = {:>3}",
                    intermediate.iter,
                    intermediate.fun,
                    intermediate.accepted,
                    intermediate.improved
                );
                println!("            x = [{}]", format_vector(&intermediate.x));
            }

            if let Some(limit) = time_limit
                && overall_start.elapsed().as_secs_f64() >= limit
            {
                println!(
                    "Stopping early after {:.2} seconds (time limit reached)",
                    limit
                );
                return CallbackAction::Stop;
            }

            CallbackAction::Continue
        }));
    }

    let config = builder.build().unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(2);
    });

    println!(
        "Running FPA on '{}' ({}D in [{}, {}])...",
        objective.name(),
        args.dim,
        args.lower,
        args.upper
    );

    let func = |x: &Array1<f64>| objective.evaluate(x);
    let report = match flower_pollination(&func, space, config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: optimization failed: {}", e);
            process::exit(2);
        }
    };

    let elapsed = overall_start.elapsed();
    println!("\nOptimization completed in {:.2?}", elapsed);
    println!("Status: {}", report.termination);
    println!("Iterations: {} | Evaluations: {}", report.nit, report.nfev);
    println!("{report}");
}

fn list_available_functions() {
    println!("Available test functions ({}):", Objective::BUILTIN_NAMES.len());
    for name in Objective::BUILTIN_NAMES {
        println!("- {name}");
    }
}

fn format_vector(x: &Array1<f64>) -> String {
    let mut buffer = String::new();
    for (idx, value) in x.iter().enumerate() {
        if idx > 0 {
            buffer.push_str(", ");
        }
        let _ = write!(&mut buffer, "{value:.6}");
    }
    buffer
}
