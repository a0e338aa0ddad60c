//! The job pool and everything that changes it.
//!
//! # Per-step maintenance (`update_jobs`)
//!
//! ```text
//! target  = ⌊demand / support_ratio⌋
//! adjust  = target − jobs
//! adjust ≤ −1                         → destroy |adjust| random jobs
//! adjust ≥ 1 and jobs < upper limit   → create adjust vacancies
//! churn   = round(year_fraction · churn · jobs)
//!           → destroy min(churn, jobs), then create churn
//! ```
//!
//! then the age-wage feedback is recomputed from the male relative cohort
//! sizes and every incumbent's wage is re-derived.
//!
//! # Wages
//!
//! ```text
//! prod(job, agent) = productivity(exp, skill, difficulty) · growth_mult + additive_growth
//! wage(job, agent) = prod · exp(feedback(age) · wage_feedback_mult)
//! ```

use pd_agent::{Agent, AgentStore};
use pd_core::cohort::working_age_index;
use pd_core::{
    AgentId, JobId, MIN_WORKING_AGE, ProductivityFn, RelativeCohortSizes, SimRng, WORKING_AGE_SPAN,
};
use slotmap::SlotMap;

use crate::{Job, MarketConfig};

pub struct LabourMarket {
    pub(crate) jobs:      SlotMap<JobId, Job>,
    /// Every unoccupied job, each exactly once.
    pub(crate) vacancies: Vec<JobId>,
    growth_mult:          f64,
    additive_growth:      f64,
    /// Wage feedback per working age, indexed by `age − 15`.
    feedback_coefs:       [f64; WORKING_AGE_SPAN],
    productivity:         ProductivityFn,
    pub(crate) config:    MarketConfig,
}

impl LabourMarket {
    /// A market of `num_jobs` vacancies.
    pub fn new(config: MarketConfig, productivity: ProductivityFn, num_jobs: usize, rng: &mut SimRng) -> Self {
        let mut market = Self {
            jobs: SlotMap::with_key(),
            vacancies: Vec::with_capacity(num_jobs),
            growth_mult: 1.0,
            additive_growth: 0.0,
            feedback_coefs: [0.0; WORKING_AGE_SPAN],
            productivity,
            config,
        };
        market.add_jobs(num_jobs, rng);
        market
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Number of jobs, occupied or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    #[inline]
    pub fn vacancies(&self) -> &[JobId] {
        &self.vacancies
    }

    #[inline]
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(id)
    }

    pub fn jobs(&self) -> impl Iterator<Item = (JobId, &Job)> + '_ {
        self.jobs.iter()
    }

    #[inline]
    pub fn growth_mult(&self) -> f64 {
        self.growth_mult
    }

    #[inline]
    pub fn additive_growth(&self) -> f64 {
        self.additive_growth
    }

    #[inline]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    #[inline]
    pub fn feedback_coefs(&self) -> &[f64; WORKING_AGE_SPAN] {
        &self.feedback_coefs
    }

    /// Wage feedback at `age`; `0` outside the working ages.
    #[inline]
    pub fn feedback(&self, age_years: i32) -> f64 {
        working_age_index(age_years).map_or(0.0, |i| self.feedback_coefs[i])
    }

    /// Jobs needed to serve `demand`.
    pub fn labour_demand(&self, demand: f64) -> usize {
        (demand / self.config.support_ratio).max(0.0) as usize
    }

    /// Growth-adjusted productivity of `agent` in `job`.
    pub fn productivity_for(&self, job: &Job, agent: &Agent) -> f64 {
        let raw = self.productivity.productivity(agent.experience_days as f64, agent.skill, job.difficulty);
        raw * self.growth_mult + self.additive_growth
    }

    /// Wage `job` would pay `agent` today.
    pub fn wage_for(&self, job: &Job, agent: &Agent) -> f64 {
        let mult = (self.feedback(agent.age_years) * self.config.wage_feedback_mult).exp();
        self.productivity_for(job, agent) * mult
    }

    // ── Pool maintenance ──────────────────────────────────────────────────

    /// Resize toward demand, churn, refresh feedbacks and incumbent wages.
    pub fn update_jobs(
        &mut self,
        demand:        f64,
        male_sizes:    &RelativeCohortSizes,
        year_fraction: f64,
        agents:        &mut AgentStore,
        rng:           &mut SimRng,
    ) {
        let target = self.labour_demand(demand);
        let current = self.len();
        if target < current {
            self.shed_jobs(current - target, agents, rng);
        } else if target > current {
            let grow = target.min(self.config.job_upper_limit).saturating_sub(current);
            if grow > 0 {
                self.add_jobs(grow, rng);
            }
        }

        let churn = (year_fraction * self.config.churn * self.len() as f64).round() as usize;
        if churn > 0 {
            self.shed_jobs(churn.min(self.len()), agents, rng);
            self.add_jobs(churn, rng);
        }

        self.update_feedbacks(male_sizes);
        self.update_wages(agents);

        tracing::debug!(
            demand,
            target,
            jobs = self.len(),
            vacancies = self.vacancies.len(),
            churn,
            "job pool updated"
        );
    }

    /// Recompute the per-age wage feedback from male cohort sizes.
    pub fn update_feedbacks(&mut self, male_sizes: &RelativeCohortSizes) {
        self.feedback_coefs = male_sizes.working_age_feedbacks(self.config.cohort_width);
    }

    /// Re-derive the wage of every occupied job's occupant.
    pub fn update_wages(&self, agents: &mut AgentStore) {
        for job in self.jobs.values() {
            let Some(occupant) = job.occupant else { continue };
            let Some(wage) = agents.get(occupant).map(|a| self.wage_for(job, a)) else {
                continue;
            };
            if let Some(agent) = agents.get_mut(occupant) {
                agent.employment.wage = wage;
            }
        }
    }

    /// Create `n` vacant jobs.
    pub fn add_jobs(&mut self, n: usize, rng: &mut SimRng) {
        let bound = self.productivity.difficulty_bound();
        for _ in 0..n {
            let difficulty = rng.uniform() * bound;
            let experience_floor = self.config.experience_floor.then(|| {
                rng.gen_range(-15.0..self.config.exp_max).max(0.0) * self.config.year_length
            });
            let id = self.jobs.insert(Job::new(difficulty, experience_floor));
            self.vacancies.push(id);
        }
    }

    /// Destroy `n` jobs chosen uniformly from the whole pool.  Occupants
    /// become unemployed.
    pub fn shed_jobs(&mut self, n: usize, agents: &mut AgentStore, rng: &mut SimRng) {
        let ids: Vec<JobId> = self.jobs.keys().collect();
        let doomed: Vec<JobId> = rng.sample_indices(ids.len(), n).into_iter().map(|i| ids[i]).collect();

        for id in doomed {
            let Some(job) = self.jobs.remove(id) else { continue };
            if let Some(occupant) = job.occupant {
                let agent = agents.get_mut(occupant).unwrap_or_else(|| panic!("{id:?} held by dead {occupant}"));
                assert_eq!(agent.employment.job, Some(id), "{occupant} does not hold {id:?}");
                agent.employment.job = None;
                agent.employment.wage = 0.0;
            }
        }
        self.vacancies.retain(|id| self.jobs.contains_key(*id));
    }

    /// Apply the per-step exogenous productivity growth.
    pub fn update_growth_coefs(&mut self) {
        self.growth_mult *= self.config.growth_rate.exp();
        self.additive_growth += self.config.linear_growth;
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Put `agent` into vacancy `id` at `wage`.
    ///
    /// # Panics
    ///
    /// If the job is occupied or unknown, if the agent already holds a job,
    /// or if the agent is below working age.
    pub fn fill(&mut self, id: JobId, agent: &mut Agent, wage: f64) {
        assert!(agent.age_years >= MIN_WORKING_AGE, "{} too young to work", agent.id);
        assert!(agent.employment.job.is_none(), "{} already employed", agent.id);
        let job = self.jobs.get_mut(id).unwrap_or_else(|| panic!("fill of unknown {id:?}"));
        assert!(job.occupant.is_none(), "{id:?} already occupied");

        job.occupant = Some(agent.id);
        agent.employment.job = Some(id);
        agent.employment.wage = wage;
        let pos = self.vacancies.iter().position(|&v| v == id);
        if let Some(pos) = pos {
            self.vacancies.swap_remove(pos);
        }
    }

    /// Take `agent` out of their job and reopen it.
    ///
    /// # Panics
    ///
    /// If the job does not name `agent` as its occupant.
    pub fn vacate(&mut self, id: JobId, agent: &mut Agent) {
        let job = self.jobs.get_mut(id).unwrap_or_else(|| panic!("vacate of unknown {id:?}"));
        assert_eq!(job.occupant, Some(agent.id), "{id:?} is not held by {}", agent.id);
        job.occupant = None;
        agent.employment.job = None;
        self.vacancies.push(id);
    }

    /// Panic unless vacancies and occupants agree with the agents' view.
    pub fn assert_consistent(&self, agents: &AgentStore) {
        let occupied = self.jobs.values().filter(|j| j.occupant.is_some()).count();
        assert_eq!(occupied + self.vacancies.len(), self.jobs.len(), "vacancy list out of step");
        for &id in &self.vacancies {
            assert!(self.jobs[id].occupant.is_none(), "occupied {id:?} listed as vacancy");
        }
        for (id, job) in &self.jobs {
            if let Some(occupant) = job.occupant {
                let held = agents.get(occupant).and_then(|a| a.employment.job);
                assert_eq!(held, Some(id), "{id:?} occupant {occupant} disagrees");
            }
        }
        for agent in agents.iter() {
            if let Some(id) = agent.employment.job {
                assert_eq!(self.jobs.get(id).and_then(Job::occupant), Some(agent.id));
            }
        }
    }

    /// Occupant of `id`, if the job exists and is filled.
    #[inline]
    pub fn occupant_of(&self, id: JobId) -> Option<AgentId> {
        self.jobs.get(id).and_then(Job::occupant)
    }
}
