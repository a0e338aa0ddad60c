//! Read-only population statistics.

use pd_agent::agent::ADULT_AGE;
use pd_agent::Agent;

use crate::Population;

/// Ages covered by [`Population::married_by_age`].
pub const MARRIAGE_AGES: usize = 100;

/// Upper age (exclusive) of the youth unemployment band.
pub const YOUTH_AGE_LIMIT: i32 = 30;

/// One step's population snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct PopulationSummary {
    pub population:         usize,
    pub births:             usize,
    pub deaths:             usize,
    pub labour_force:       usize,
    pub employed:           usize,
    /// `None` with an empty labour force.
    pub unemployment:       Option<f64>,
    /// `None` with no men in the youth band.
    pub youth_unemployment: Option<f64>,
    pub partnered:          usize,
    pub benefit_level:      f64,
}

impl Population {
    /// Share of the labour force without a job.
    pub fn unemployment_rate(&self) -> Option<f64> {
        self.unemployment_within(|_| true)
    }

    /// Unemployment among workers aged 17 to 29.
    pub fn youth_unemployment_rate(&self) -> Option<f64> {
        self.unemployment_within(|a| a.age_years < YOUTH_AGE_LIMIT)
    }

    fn unemployment_within(&self, band: impl Fn(&Agent) -> bool) -> Option<f64> {
        let (workforce, employed) = self
            .agents
            .iter()
            .filter(|a| a.eligible_for_market(self.retirement_age) && band(a))
            .fold((0usize, 0usize), |(n, e), a| (n + 1, e + usize::from(a.employment.has_job())));
        (workforce > 0).then(|| 1.0 - employed as f64 / workforce as f64)
    }

    /// Number of adult women by number of children; index = parity.
    pub fn parity_distribution(&self) -> Vec<usize> {
        let mut counts: Vec<usize> = Vec::new();
        for woman in self.agents.iter().filter(|a| a.is_female() && a.age_years > ADULT_AGE) {
            let parity = woman.parity() as usize;
            if counts.len() <= parity {
                counts.resize(parity + 1, 0);
            }
            counts[parity] += 1;
        }
        counts
    }

    /// Share partnered at each age `0..100`; 0 for an age nobody has.
    pub fn married_by_age(&self) -> Vec<f64> {
        let mut total = vec![0usize; MARRIAGE_AGES];
        let mut partnered = vec![0usize; MARRIAGE_AGES];
        for agent in self.agents.iter() {
            let Ok(age) = usize::try_from(agent.age_years) else { continue };
            if age >= MARRIAGE_AGES {
                continue;
            }
            total[age] += 1;
            partnered[age] += usize::from(agent.has_partner());
        }
        total
            .iter()
            .zip(&partnered)
            .map(|(&n, &p)| if n == 0 { 0.0 } else { p as f64 / n as f64 })
            .collect()
    }

    pub fn summary(&self) -> PopulationSummary {
        let labour_force = self.labour_force_size();
        let employed = self
            .agents
            .iter()
            .filter(|a| a.eligible_for_market(self.retirement_age) && a.employment.has_job())
            .count();
        PopulationSummary {
            population: self.len(),
            births: self.births_this_step,
            deaths: self.deaths_this_step,
            labour_force,
            employed,
            unemployment: self.unemployment_rate(),
            youth_unemployment: self.youth_unemployment_rate(),
            partnered: self.agents.iter().filter(|a| a.has_partner()).count(),
            benefit_level: self.benefit_level,
        }
    }
}
