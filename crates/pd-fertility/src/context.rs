//! Read-only population state passed to every fertility decision.

use chrono::NaiveDate;
use pd_agent::AgentStore;
use pd_core::{Params, RelativeCohortSizes};

/// A read-only snapshot of what a fertility decision may look at.
///
/// Built by the population for each decision during the step loop; every
/// borrow ends before the birth (if any) is applied.
#[derive(Copy, Clone)]
pub struct FertilityContext<'a> {
    pub params: &'a Params,

    /// Current simulation date.
    pub date: NaiveDate,

    /// Step length as a fraction of a year; scales annual hazards.
    pub year_fraction: f64,

    /// Every living agent.  Partners are looked up here.
    pub agents: &'a AgentStore,

    /// Income of anyone without a job.
    pub benefit_level: f64,

    /// Relative cohort sizes of female birth cohorts.
    pub female_sizes: &'a RelativeCohortSizes,

    /// Relative cohort sizes of male birth cohorts.
    pub male_sizes: &'a RelativeCohortSizes,
}

impl<'a> FertilityContext<'a> {
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        params:        &'a Params,
        date:          NaiveDate,
        year_fraction: f64,
        agents:        &'a AgentStore,
        benefit_level: f64,
        female_sizes:  &'a RelativeCohortSizes,
        male_sizes:    &'a RelativeCohortSizes,
    ) -> Self {
        Self { params, date, year_fraction, agents, benefit_level, female_sizes, male_sizes }
    }
}
