//! Read-only labour-market statistics.

use pd_agent::AgentStore;

use crate::LabourMarket;

/// One step's labour-market snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketSummary {
    pub jobs:            usize,
    pub vacancies:       usize,
    /// `None` for an empty job pool.
    pub vacancy_rate:    Option<f64>,
    /// `None` with nobody employed.
    pub mean_wage:       Option<f64>,
    pub growth_mult:     f64,
    pub additive_growth: f64,
}

impl LabourMarket {
    /// Share of jobs that are vacant.
    pub fn vacancy_rate(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.vacancies.len() as f64 / self.len() as f64)
    }

    /// Wages of every job occupant.
    pub fn wage_distribution(&self, agents: &AgentStore) -> Vec<f64> {
        self.jobs
            .values()
            .filter_map(|job| job.occupant)
            .filter_map(|id| agents.get(id))
            .map(|a| a.employment.wage)
            .collect()
    }

    /// `(age, wage)` of every job occupant.
    pub fn age_wage_distribution(&self, agents: &AgentStore) -> Vec<(i32, f64)> {
        self.jobs
            .values()
            .filter_map(|job| job.occupant)
            .filter_map(|id| agents.get(id))
            .map(|a| (a.age_years, a.employment.wage))
            .collect()
    }

    pub fn summary(&self, agents: &AgentStore) -> MarketSummary {
        let wages = self.wage_distribution(agents);
        let mean_wage = (!wages.is_empty()).then(|| wages.iter().sum::<f64>() / wages.len() as f64);
        MarketSummary {
            jobs: self.len(),
            vacancies: self.vacancies.len(),
            vacancy_rate: self.vacancy_rate(),
            mean_wage,
            growth_mult: self.growth_mult(),
            additive_growth: self.additive_growth(),
        }
    }
}
