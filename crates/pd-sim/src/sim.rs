//! The `Sim` struct and its step loop.

use pd_core::{Clock, Params, SimRng};
use pd_fertility::{FertilityModel, FertilityPolicy};
use pd_labour::LabourMarket;

use crate::{Population, Publisher, SimResult, StatsObserver};

/// The main simulation runner.
///
/// One [`step`](Sim::step) advances the model by one clock step:
///
/// | # | Phase                   | Effect                                         |
/// |---|-------------------------|------------------------------------------------|
/// | 1 | population update       | ageing, births, deaths, cohort sizes           |
/// | 2 | job pool                | resize toward demand, churn, refresh wages     |
/// | 3 | applications            | eligible men apply to random vacancies         |
/// | 4 | offers                  | each vacancy offers its best applicant         |
/// | 5 | offer resolution        | agents take their best offer if it pays more   |
/// | 6 | marriage market         | queued women matched with queued men           |
/// | 7 | productivity growth     | growth multiplier and additive term advance    |
/// | 8 | social security         | benefit level rises to the lowest wage         |
/// | 9 | statistics              | population then labour market published        |
/// | 10| clock                   | date moves forward                             |
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<F: FertilityPolicy = FertilityModel> {
    pub params: Params,

    /// Current date and step length.
    pub clock: Clock,

    pub population: Population,

    pub market: LabourMarket,

    /// The reproductive-behaviour policy applied to every woman.
    pub fertility: F,

    /// The single generator every draw of the run comes from.
    pub rng: SimRng,

    steps_taken: u64,
}

impl<F: FertilityPolicy> Sim<F> {
    pub(crate) fn new(
        params:     Params,
        clock:      Clock,
        population: Population,
        market:     LabourMarket,
        fertility:  F,
        rng:        SimRng,
    ) -> Self {
        Self { params, clock, population, market, fertility, rng, steps_taken: 0 }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run `steps` steps from the current date, then call
    /// [`StatsObserver::on_sim_end`].
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: StatsObserver>(&mut self, steps: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..steps {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.date());
        Ok(())
    }

    /// Advance the model by exactly one step.
    pub fn step<O: StatsObserver>(&mut self, observer: &mut O) {
        let Sim { params, clock, population, market, fertility, rng, .. } = self;
        let date = clock.date();
        let year_fraction = clock.year_fraction(params.year_length);

        population.update(params, clock, fertility, market, observer, rng);

        let demand = population.derive_demand();
        market.update_jobs(demand, &population.male_sizes, year_fraction, &mut population.agents, rng);

        let applications = population.do_applications(params, market, year_fraction, rng);
        let offers = market.send_offers(&mut population.agents);
        let hired = population.resolve_job_offers(market);
        let partnerships = population.resolve_marriage_market(params, date, rng);

        market.update_growth_coefs();
        population.update_social_security();

        observer.record_stats(Publisher::Population(population), date);
        observer.record_stats(Publisher::LabourMarket { market, agents: &population.agents }, date);

        tracing::debug!(%date, applications, offers, hired, partnerships, "matching done");
        tracing::info!(
            %date,
            population = population.len(),
            jobs = market.len(),
            births = population.births_this_step(),
            deaths = population.deaths_this_step(),
            "step complete"
        );

        clock.step_forward();
        self.steps_taken += 1;
    }

    /// Steps taken since the simulation was built.
    #[inline]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Panic unless the job pool and the agents agree on who works where.
    pub fn assert_consistent(&self) {
        self.market.assert_consistent(&self.population.agents);
    }
}
