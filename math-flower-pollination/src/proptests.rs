use crate::distinct_indices::pollinator_pair;
use crate::objective::rastrigin;
use crate::{FlowerPollination, FpaConfigBuilder, LevyFlight, RngSource, SearchSpace, Updating};
use proptest::prelude::*;

proptest! {
    /// Both pollinators are valid indices, the first never the current member.
    #[test]
    fn prop_pollinator_pair_distinct(
        pool_size in 3_usize..64,
        current_frac in 0.0_f64..1.0,
        seed in any::<u64>()
    ) {
        let current = ((current_frac * pool_size as f64) as usize).min(pool_size - 1);
        let mut src = RngSource::seeded(seed);
        for _ in 0..20 {
            let (first, second) = pollinator_pair(current, pool_size, &mut src).unwrap();
            prop_assert!(first < pool_size && second < pool_size);
            prop_assert_ne!(first, current);
            prop_assert_ne!(second, first);
        }
    }

    /// Lévy steps are finite across the accepted exponent range.
    #[test]
    fn prop_levy_steps_finite(
        lambda in 0.3_f64..2.0,
        dims in 1_usize..12,
        seed in any::<u64>()
    ) {
        let levy = LevyFlight::new(lambda).unwrap();
        prop_assert!(levy.sigma().is_finite() && levy.sigma() > 0.0);
        let mut src = RngSource::seeded(seed);
        for _ in 0..10 {
            let step = levy.step(dims, &mut src).unwrap();
            prop_assert_eq!(step.len(), dims);
            prop_assert!(step.iter().all(|s| s.is_finite()));
        }
    }

    /// Every member and the incumbent stay inside the box.
    #[test]
    fn prop_population_within_bounds(
        lower in -10.0_f64..0.0,
        width in 0.1_f64..10.0,
        dims in 1_usize..5,
        switch_probability in 0.0_f64..=1.0,
        deferred in any::<bool>(),
        seed in any::<u64>()
    ) {
        let upper = lower + width;
        let space = SearchSpace::new(1.5, dims, upper, lower).unwrap();
        let fpa = FlowerPollination::new(space).unwrap();
        let updating = if deferred { Updating::Deferred } else { Updating::Immediate };
        let config = FpaConfigBuilder::new()
            .iterations(5)
            .popsize(6)
            .switch_probability(switch_probability)
            .updating(updating)
            .enable_parallel(false)
            .seed(seed)
            .build()
            .unwrap();

        let report = fpa.run(&rastrigin, config).unwrap();

        prop_assert!(report.population.iter().all(|&v| v >= lower && v <= upper));
        prop_assert!(report.x.iter().all(|&v| v >= lower && v <= upper));
        prop_assert_eq!(report.nfev, 6 * 6);
    }
}
