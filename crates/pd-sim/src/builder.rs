//! Fluent builder for constructing a [`Sim`].

use pd_core::{Clock, Params, SimRng};
use pd_fertility::{FertilityModel, FertilityPolicy};

use crate::{Population, Sim, SimResult};

/// Fluent builder for [`Sim<F>`].
///
/// # Inputs
///
/// | Method            | Default                                          |
/// |-------------------|--------------------------------------------------|
/// | `new(params)`     | required                                         |
/// | `.seed(s)`        | `params.seed`, else a fresh entropy seed         |
/// | `.fertility(p)`   | [`FertilityModel`] built from `params`           |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(params)
///     .seed(42)
///     .build()?;
/// sim.run(100, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<F: FertilityPolicy = FertilityModel> {
    params:    Params,
    seed:      Option<u64>,
    fertility: F,
}

impl SimBuilder<FertilityModel> {
    /// Start from `params` with the fertility model they describe.
    pub fn new(params: Params) -> Self {
        let fertility = FertilityModel::from_params(&params);
        Self { params, seed: None, fertility }
    }
}

impl<F: FertilityPolicy> SimBuilder<F> {
    /// Override the master seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the fertility policy.
    pub fn fertility<G: FertilityPolicy>(self, fertility: G) -> SimBuilder<G> {
        SimBuilder { params: self.params, seed: self.seed, fertility }
    }

    /// Validate the parameters and set up the initial population and job
    /// pool.
    pub fn build(self) -> SimResult<Sim<F>> {
        self.params.validate()?;
        let clock = Clock::new(&self.params.start_date, &self.params.timestep)?;

        let seed = match self.seed.or(self.params.seed) {
            Some(seed) => seed,
            None => {
                let seed = SimRng::entropy_seed();
                tracing::info!(seed, "no seed configured; drew one from entropy");
                seed
            }
        };
        let mut rng = SimRng::new(seed);

        tracing::info!(
            seed,
            start = %clock.date(),
            timestep = %clock.timestep(),
            pop_size = self.params.pop_size,
            fertility = self.params.fertility_type.as_str(),
            "building simulation"
        );
        let (population, market) = Population::set_up(&self.params, &clock, &self.fertility, &mut rng)?;

        Ok(Sim::new(self.params, clock, population, market, self.fertility, rng))
    }
}
