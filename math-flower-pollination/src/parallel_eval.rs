use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// Parallel evaluation configuration
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Enable parallel evaluation
    pub enabled: bool,
    /// Number of threads to use (None = use rayon default)
    pub num_threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_threads: None, // Use rayon's default (typically num_cpus)
        }
    }
}

/// Evaluate a population, one objective call per row.
///
/// Results are in row order whether or not evaluation ran in parallel.
pub fn evaluate_population<F>(
    population: &Array2<f64>,
    eval_fn: &F,
    config: &ParallelConfig,
) -> Array1<f64>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    let npop = population.nrows();

    if !config.enabled || npop < 4 {
        let mut fitness = Array1::zeros(npop);
        for i in 0..npop {
            let individual = population.row(i).to_owned();
            fitness[i] = eval_fn(&individual);
        }
        return fitness;
    }

    let results = (0..npop)
        .into_par_iter()
        .map(|i| {
            let individual = population.row(i).to_owned();
            eval_fn(&individual)
        })
        .collect::<Vec<f64>>();

    Array1::from_vec(results)
}

/// Evaluate a batch of candidates, results in input order.
pub fn evaluate_candidates<F>(
    candidates: &[Array1<f64>],
    eval_fn: &F,
    config: &ParallelConfig,
) -> Vec<f64>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    if !config.enabled || candidates.len() < 4 {
        return candidates.iter().map(eval_fn).collect();
    }

    candidates.par_iter().map(eval_fn).collect()
}

/// Configure rayon's global pool once; later calls are ignored.
pub(crate) fn configure_thread_pool(config: &ParallelConfig) {
    if let Some(n) = config.num_threads {
        // Ignore error if global pool already set
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_matches_sequential() {
        let eval_fn = |x: &Array1<f64>| -> f64 { x.iter().map(|&xi| xi * xi).sum() };

        let mut population = Array2::zeros((10, 3));
        for i in 0..10 {
            for j in 0..3 {
                population[[i, j]] = (i as f64) * 0.1 + (j as f64) * 0.01;
            }
        }

        let config = ParallelConfig {
            enabled: true,
            num_threads: Some(2),
        };
        let fitness = evaluate_population(&population, &eval_fn, &config);

        assert_eq!(fitness.len(), 10);
        for i in 0..10 {
            let expected = population.row(i).iter().map(|&x| x * x).sum::<f64>();
            assert!((fitness[i] - expected).abs() < 1e-10);
        }

        let config_seq = ParallelConfig {
            enabled: false,
            num_threads: None,
        };
        let fitness_seq = evaluate_population(&population, &eval_fn, &config_seq);

        for i in 0..10 {
            assert_eq!(fitness[i], fitness_seq[i]);
        }
    }

    #[test]
    fn test_candidates_keep_order() {
        let eval_fn = |x: &Array1<f64>| -> f64 { x.sum() };
        let candidates: Vec<Array1<f64>> =
            (0..20).map(|i| Array1::from_elem(2, i as f64)).collect();

        let out = evaluate_candidates(&candidates, &eval_fn, &ParallelConfig::default());

        for (i, f) in out.iter().enumerate() {
            assert_eq!(*f, 2.0 * i as f64);
        }
    }
}
