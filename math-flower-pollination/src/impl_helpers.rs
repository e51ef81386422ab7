use crate::error::Result;
use crate::levy_flight::LevyFlight;
use crate::parallel_eval::{ParallelConfig, evaluate_candidates};
use crate::pollinate_global::pollinate_global;
use crate::pollinate_local::pollinate_local;
use crate::random_source::RandomSource;
use crate::{FpaReport, Termination};
use ndarray::{Array1, Array2};

// ------------------------------ Internal helpers ------------------------------

/// Per-iteration counters reported to the callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct IterationStats {
    pub(crate) accepted: usize,
    pub(crate) improved: usize,
}

/// Population, member fitness and the incumbent of a run.
pub(crate) struct PopulationState {
    pub(crate) pop: Array2<f64>,
    pub(crate) fitness: Array1<f64>,
    pub(crate) best_x: Array1<f64>,
    pub(crate) best_f: f64,
}

impl PopulationState {
    pub(crate) fn new(pop: Array2<f64>, fitness: Array1<f64>, best_idx: usize) -> Self {
        let best_x = pop.row(best_idx).to_owned();
        let best_f = fitness[best_idx];
        Self {
            pop,
            fitness,
            best_x,
            best_f,
        }
    }

    /// Builds the clamped candidate for member `i` from the current state.
    ///
    /// The switch draw comes first: above `switch_probability` means global.
    /// Moves that overflow in a very wide box are clamped too; a `NaN`
    /// coordinate (`0 * inf`) lands on `lower`.
    pub(crate) fn propose<S: RandomSource + ?Sized>(
        &self,
        i: usize,
        switch_probability: f64,
        levy: &LevyFlight,
        lower: f64,
        upper: f64,
        source: &mut S,
    ) -> Result<Array1<f64>> {
        let mut candidate = if source.next_uniform() > switch_probability {
            pollinate_global(self.pop.row(i), &self.best_x, levy, source)?
        } else {
            pollinate_local(i, &self.pop, source)?
        };
        candidate.mapv_inplace(|v| v.max(lower).min(upper));
        Ok(candidate)
    }

    /// Greedy replacement of member `i`, then the incumbent update.
    pub(crate) fn select(
        &mut self,
        i: usize,
        candidate: Array1<f64>,
        f_new: f64,
        stats: &mut IterationStats,
    ) {
        if f_new < self.fitness[i] {
            self.pop.row_mut(i).assign(&candidate);
            self.fitness[i] = f_new;
            stats.accepted += 1;
        }
        if f_new < self.best_f {
            self.best_f = f_new;
            self.best_x = candidate;
            stats.improved += 1;
        }
    }

    /// One sweep where each replacement is visible to later members.
    pub(crate) fn iterate_immediate<F, S>(
        &mut self,
        func: &F,
        switch_probability: f64,
        levy: &LevyFlight,
        lower: f64,
        upper: f64,
        source: &mut S,
    ) -> Result<IterationStats>
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
        S: RandomSource + ?Sized,
    {
        let mut stats = IterationStats::default();
        for i in 0..self.pop.nrows() {
            let candidate = self.propose(i, switch_probability, levy, lower, upper, source)?;
            let f_new = func(&candidate);
            self.select(i, candidate, f_new, &mut stats);
        }
        Ok(stats)
    }

    /// One sweep against a snapshot: every candidate is drawn first, the batch
    /// is evaluated, then selection runs in index order.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn iterate_deferred<F, S>(
        &mut self,
        func: &F,
        switch_probability: f64,
        levy: &LevyFlight,
        lower: f64,
        upper: f64,
        parallel: &ParallelConfig,
        source: &mut S,
    ) -> Result<IterationStats>
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
        S: RandomSource + ?Sized,
    {
        let candidates = (0..self.pop.nrows())
            .map(|i| self.propose(i, switch_probability, levy, lower, upper, source))
            .collect::<Result<Vec<_>>>()?;
        let values = evaluate_candidates(&candidates, func, parallel);

        let mut stats = IterationStats::default();
        for (i, (candidate, f_new)) in candidates.into_iter().zip(values).enumerate() {
            self.select(i, candidate, f_new, &mut stats);
        }
        Ok(stats)
    }

    pub(crate) fn finish_report(
        self,
        nit: usize,
        nfev: usize,
        termination: Termination,
    ) -> FpaReport {
        FpaReport {
            x: self.best_x,
            fun: self.best_f,
            nit,
            nfev,
            termination,
            population: self.pop,
            population_fitness: self.fitness,
        }
    }
}
