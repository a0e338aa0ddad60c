//! Applications, offers and offer resolution.

use pd_agent::{Agent, AgentStore, Offer};
use pd_core::{AgentId, AppCriteria, JobId, SimRng};

use crate::{Job, LabourMarket};

impl LabourMarket {
    /// Send `count` applications from `applicant` to distinct random
    /// vacancies.  With experience floors only suitable vacancies are
    /// considered.  Returns the number actually sent.
    pub fn submit_applications(&mut self, applicant: &Agent, count: usize, rng: &mut SimRng) -> usize {
        if count == 0 || self.vacancies.is_empty() {
            return 0;
        }
        let targets: Vec<JobId> = if self.config.experience_floor {
            let (exp_max, year_length) = (self.config.exp_max, self.config.year_length);
            let mut order: Vec<usize> = (0..self.vacancies.len()).collect();
            rng.shuffle(&mut order);
            order
                .into_iter()
                .map(|i| self.vacancies[i])
                .filter(|&id| self.jobs[id].suits(applicant.experience_days, exp_max, year_length))
                .take(count)
                .collect()
        } else {
            rng.sample_indices(self.vacancies.len(), count)
                .into_iter()
                .map(|i| self.vacancies[i])
                .collect()
        };
        for &id in &targets {
            self.jobs[id].applicants.push(applicant.id);
        }
        targets.len()
    }

    /// Offer phase.  Every vacancy sends at most one offer and forgets its
    /// applicants.  Returns the number of offers sent.
    pub fn send_offers(&mut self, agents: &mut AgentStore) -> usize {
        let view: &AgentStore = agents;
        let offers: Vec<(AgentId, Offer)> = self
            .vacancies
            .iter()
            .filter_map(|&id| {
                let (winner, wage) = self.pick_winner(&self.jobs[id], view)?;
                Some((winner, Offer { job: id, wage }))
            })
            .collect();

        for &id in &self.vacancies {
            self.jobs[id].applicants.clear();
        }
        for &(winner, offer) in &offers {
            if let Some(agent) = agents.get_mut(winner) {
                agent.employment.offers.push(offer);
            }
        }
        offers.len()
    }

    /// Best eligible applicant of `job` and the wage offered, or `None` when
    /// nobody qualifies or the best score is negative.  Ties go to the
    /// earliest applicant.
    pub fn pick_winner(&self, job: &Job, agents: &AgentStore) -> Option<(AgentId, f64)> {
        let mut best: Option<(AgentId, f64, f64)> = None;
        for agent in job.applicants.iter().filter_map(|&id| agents.get(id)) {
            if !job.accepts(agent.experience_days) {
                continue;
            }
            let wage = self.wage_for(job, agent);
            let score = match self.config.app_criteria {
                AppCriteria::Wage => wage,
                AppCriteria::Prod => self.productivity_for(job, agent),
                AppCriteria::Profit => self.productivity_for(job, agent) - wage,
            };
            if best.is_none_or(|(_, top, _)| score > top) {
                best = Some((agent.id, score, wage));
            }
        }
        best.filter(|&(_, score, _)| score >= 0.0).map(|(id, _, wage)| (id, wage))
    }

    /// Resolution for one agent: take the best offer if it beats the current
    /// job, then drop all offers.  Returns `true` if the agent started a job.
    pub fn resolve_offers(&mut self, agent: &mut Agent) -> bool {
        let best = agent.employment.best_offer();
        agent.employment.offers.clear();
        let Some(offer) = best else { return false };

        if let Some(current) = agent.employment.job {
            if agent.employment.wage >= offer.wage {
                return false;
            }
            self.vacate(current, agent);
        }
        self.fill(offer.job, agent, offer.wage);
        tracing::debug!(
            agent = agent.id.0,
            wage = offer.wage,
            skill = agent.skill,
            aspiration = agent.aspiration,
            "started job"
        );
        true
    }
}
