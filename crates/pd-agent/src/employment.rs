//! Per-agent labour-market state.

use pd_core::{JobId, Params};

/// A conditional job offer: the job and the wage it would pay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Offer {
    pub job:  JobId,
    pub wage: f64,
}

/// Employment state of one agent.
///
/// `job` and the job's occupant always name each other; only the labour
/// market writes either side.  `wage` is meaningful only while employed.
#[derive(Clone, Debug, Default)]
pub struct Employment {
    pub job:    Option<JobId>,
    pub wage:   f64,
    /// Offers received this step.  Cleared by offer resolution.
    pub offers: Vec<Offer>,
}

impl Employment {
    #[inline]
    pub fn has_job(&self) -> bool {
        self.job.is_some()
    }

    /// Income: the paid wage when employed, else the benefit level.
    #[inline]
    pub fn current_wage(&self, benefit_level: f64) -> f64 {
        if self.has_job() { self.wage } else { benefit_level }
    }

    /// Highest-waged offer held, first occurrence on ties.
    pub fn best_offer(&self) -> Option<Offer> {
        self.offers.iter().copied().fold(None, |best, offer| match best {
            Some(b) if b.wage >= offer.wage => Some(b),
            _ => Some(offer),
        })
    }

    /// Mean number of applications to send this step.
    pub fn application_mean(&self, params: &Params, year_fraction: f64) -> f64 {
        let annual = if self.has_job() {
            params.job_apps_employed
        } else {
            params.job_apps_unemployed
        };
        annual * year_fraction
    }
}
