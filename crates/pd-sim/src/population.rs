//! The population: agent storage plus everything that crosses agents.
//!
//! # One population update
//!
//! 1. Shuffle the living ids and step each agent.  Retirements vacate jobs,
//!    new marriage-market entrants join their queue, and a woman inside her
//!    fertile ages runs the fertility policy right after her own step.
//!    Newborns are inserted at once but not stepped until the next update.
//! 2. Mortality: every agent alive before the step draws survival, then the
//!    dead are removed together.
//! 3. Relative cohort sizes are recomputed for the current calendar year.
//!
//! Matching (jobs, partners) runs later in the step from the driver, through
//! [`do_applications`](Population::do_applications),
//! [`resolve_job_offers`](Population::resolve_job_offers) and
//! [`resolve_marriage_market`](Population::resolve_marriage_market).

use chrono::{Datelike, NaiveDate};
use pd_agent::{Agent, AgentFactory, AgentStore, Sex, StepEnv};
use pd_core::hazard::Gompertz;
use pd_core::{AgentId, Clock, Params, RelativeCohortSizes, SimRng};
use pd_fertility::{FertilityContext, FertilityPolicy, inherited_skill};
use pd_labour::LabourMarket;

use crate::{BirthCohorts, LifeEvent, StatsObserver};

/// Male candidates sampled per woman in the marriage market.
pub const PARTNER_CANDIDATES: usize = 5;

pub struct Population {
    pub(crate) agents:       AgentStore,
    pub(crate) factory:      AgentFactory,
    pub(crate) gompertz:     Gompertz,
    pub(crate) retirement_age: i32,

    /// Men waiting for a partner, in arrival order.
    pub(crate) male_queue:   Vec<AgentId>,
    /// Women waiting for a partner, served first come first served.
    pub(crate) female_queue: Vec<AgentId>,

    pub(crate) male_births:   BirthCohorts,
    pub(crate) female_births: BirthCohorts,
    pub(crate) male_sizes:    RelativeCohortSizes,
    pub(crate) female_sizes:  RelativeCohortSizes,

    /// Income of anyone without a job; never decreases.
    pub(crate) benefit_level: f64,

    pub(crate) births_this_step: usize,
    pub(crate) deaths_this_step: usize,
}

impl Population {
    /// An empty population for `params`, dated `start_date`.
    pub fn new(params: &Params, start_date: NaiveDate) -> Self {
        Self {
            agents:           AgentStore::new(),
            factory:          AgentFactory::new(params),
            gompertz:         params.gompertz(),
            retirement_age:   params.retirement_age,
            male_queue:       Vec::new(),
            female_queue:     Vec::new(),
            male_births:      BirthCohorts::new(),
            female_births:    BirthCohorts::new(),
            male_sizes:       RelativeCohortSizes::zeros(start_date.year()),
            female_sizes:     RelativeCohortSizes::zeros(start_date.year()),
            benefit_level:    params.social_security_level,
            births_this_step: 0,
            deaths_this_step: 0,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn benefit_level(&self) -> f64 {
        self.benefit_level
    }

    pub fn male_sizes(&self) -> &RelativeCohortSizes {
        &self.male_sizes
    }

    pub fn female_sizes(&self) -> &RelativeCohortSizes {
        &self.female_sizes
    }

    pub fn male_births(&self) -> &BirthCohorts {
        &self.male_births
    }

    pub fn female_births(&self) -> &BirthCohorts {
        &self.female_births
    }

    pub fn male_queue(&self) -> &[AgentId] {
        &self.male_queue
    }

    pub fn female_queue(&self) -> &[AgentId] {
        &self.female_queue
    }

    #[inline]
    pub fn births_this_step(&self) -> usize {
        self.births_this_step
    }

    #[inline]
    pub fn deaths_this_step(&self) -> usize {
        self.deaths_this_step
    }

    /// Aggregate consumer demand.
    pub fn derive_demand(&self) -> f64 {
        self.agents.iter().map(Agent::demand_contribution).sum()
    }

    /// Number of agents able to hold a job.
    pub fn labour_force_size(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.eligible_for_market(self.retirement_age))
            .count()
    }

    /// Read-only context for a fertility decision taken today.
    pub fn fertility_context<'a>(
        &'a self,
        params:        &'a Params,
        date:          NaiveDate,
        year_fraction: f64,
    ) -> FertilityContext<'a> {
        FertilityContext::new(
            params,
            date,
            year_fraction,
            &self.agents,
            self.benefit_level,
            &self.female_sizes,
            &self.male_sizes,
        )
    }

    // ── Demographic update ────────────────────────────────────────────────

    /// Step every agent, apply births and deaths, and refresh cohort sizes.
    pub fn update<F, O>(
        &mut self,
        params:    &Params,
        clock:     &Clock,
        fertility: &F,
        market:    &mut LabourMarket,
        observer:  &mut O,
        rng:       &mut SimRng,
    ) where
        F: FertilityPolicy,
        O: StatsObserver,
    {
        self.births_this_step = 0;
        self.deaths_this_step = 0;

        let date = clock.date();
        let step_days = clock.step_length_days();
        let env = StepEnv::new(params, date, step_days);

        let survivors_before = self.agents.ids();
        let mut order = survivors_before.clone();
        rng.shuffle(&mut order);

        for id in order {
            let parental_wage = self.parental_wage(id, date, params.imprinting_time);
            let Some(agent) = self.agents.get_mut(id) else { continue };
            let outcome = agent.step_activity(&env, parental_wage, rng);

            if let Some(job) = outcome.retired_from {
                market.vacate(job, agent);
                tracing::debug!(%date, agent = id.0, "retired");
            }
            if outcome.joined_marriage_market {
                match agent.sex {
                    Sex::Male => self.male_queue.push(id),
                    Sex::Female => self.female_queue.push(id),
                }
            }

            if agent.is_female() && agent.in_fertile_ages() {
                let ctx = self.fertility_context(params, date, env.year_fraction);
                if fertility.reproductive_behaviour(id, &ctx, rng) {
                    self.give_birth(id, params, date, step_days, observer, rng);
                }
            }
        }

        let dead: Vec<AgentId> = survivors_before
            .into_iter()
            .filter(|&id| {
                self.agents
                    .get(id)
                    .is_some_and(|a| a.draws_death(&self.gompertz, env.year_fraction, rng))
            })
            .collect();
        for id in dead {
            self.remove_agent(id, market, date);
        }

        self.male_sizes = self.male_births.relative_sizes(date.year());
        self.female_sizes = self.female_births.relative_sizes(date.year());
    }

    /// Income of the partner of `id`'s mother, looked up only when `id` is
    /// about to imprint.
    fn parental_wage(&self, id: AgentId, date: NaiveDate, imprinting_time: i32) -> Option<f64> {
        let agent = self.agents.get(id)?;
        if !agent.imprint_due(date, imprinting_time) {
            return None;
        }
        self.agents.partner_wage(agent.mother?, self.benefit_level)
    }

    /// Create and register `mother`'s child, born inside the coming step.
    pub fn give_birth<O: StatsObserver>(
        &mut self,
        mother:    AgentId,
        params:    &Params,
        date:      NaiveDate,
        step_days: i64,
        observer:  &mut O,
        rng:       &mut SimRng,
    ) {
        let (mother_skill, father_skill) = {
            let m = self
                .agents
                .get(mother)
                .unwrap_or_else(|| panic!("birth to unknown mother {mother}"));
            let father = m.partner.and_then(|p| self.agents.get(p));
            (m.skill, father.map(|f| f.skill))
        };

        let mut child = self.factory.make_newborn(params, date, step_days, rng);
        child.mother = Some(mother);
        if params.inheritance {
            if let Some(father_skill) = father_skill {
                child.skill = inherited_skill(mother_skill, father_skill, params.inheritance_corr, rng);
            }
        }

        let births = match child.sex {
            Sex::Male => &mut self.male_births,
            Sex::Female => &mut self.female_births,
        };
        births.add(child.dob.year(), 1.0);
        self.births_this_step += 1;

        let Some(m) = self.agents.get_mut(mother) else { return };
        if let Some(state) = m.fertility.as_mut() {
            state.record_birth(date);
        }
        m.children.push(child.id);

        observer.record_event(m, LifeEvent::Birth, date);
        if m.parity() == 1 {
            observer.record_event(m, LifeEvent::FirstBirth, date);
        }
        tracing::debug!(
            %date,
            mother = mother.0,
            child = child.id.0,
            sex = child.sex.as_str(),
            parity = m.parity(),
            "birth"
        );

        self.agents.insert(child);
    }

    /// Take a dead agent out of every structure that refers to it.
    pub fn remove_agent(&mut self, id: AgentId, market: &mut LabourMarket, date: NaiveDate) {
        let Some(mut agent) = self.agents.remove(id) else { return };

        if let Some(job) = agent.employment.job {
            market.vacate(job, &mut agent);
        }
        if let Some(partner) = agent.partner.and_then(|p| self.agents.get_mut(p)) {
            partner.partner = None;
        }
        let queue = match agent.sex {
            Sex::Male => &mut self.male_queue,
            Sex::Female => &mut self.female_queue,
        };
        queue.retain(|&q| q != id);

        self.deaths_this_step += 1;
        tracing::debug!(%date, agent = id.0, age = agent.age_years, sex = agent.sex.as_str(), "death");
    }

    // ── Labour market ─────────────────────────────────────────────────────

    /// Every eligible man sends a Poisson number of applications.  Returns
    /// the number sent.
    pub fn do_applications(
        &self,
        params:        &Params,
        market:        &mut LabourMarket,
        year_fraction: f64,
        rng:           &mut SimRng,
    ) -> usize {
        let mut sent = 0;
        for agent in self.agents.iter() {
            if !agent.eligible_for_market(self.retirement_age) {
                continue;
            }
            if agent.employment.has_job() && !params.on_the_job_search {
                continue;
            }
            let count = rng.poisson(agent.employment.application_mean(params, year_fraction));
            sent += market.submit_applications(agent, count, rng);
        }
        sent
    }

    /// Let every agent holding offers take the best one.  Returns the number
    /// of agents who started a job.
    pub fn resolve_job_offers(&mut self, market: &mut LabourMarket) -> usize {
        self.agents
            .iter_mut()
            .filter(|a| !a.employment.offers.is_empty())
            .map(|a| market.resolve_offers(a))
            .filter(|&started| started)
            .count()
    }

    /// Raise the benefit level to the lowest wage paid, if that is higher.
    pub fn update_social_security(&mut self) {
        let lowest = self
            .agents
            .iter()
            .filter(|a| a.employment.has_job())
            .map(|a| a.employment.wage)
            .reduce(f64::min);
        if let Some(lowest) = lowest {
            self.benefit_level = self.benefit_level.max(lowest);
        }
    }

    // ── Marriage market ───────────────────────────────────────────────────

    /// Match queued women, in queue order, with queued men.  Returns the
    /// number of partnerships formed.
    pub fn resolve_marriage_market(&mut self, params: &Params, date: NaiveDate, rng: &mut SimRng) -> usize {
        let waiting = std::mem::take(&mut self.female_queue);
        let mut unmatched = Vec::with_capacity(waiting.len());
        let mut formed = 0;

        for female in waiting {
            let Some(woman) = self.agents.get(female) else { continue };
            if woman.has_partner() {
                continue;
            }
            match self.pick_partner(woman, &self.male_queue, params.partner_age_diff, rng) {
                Some(index) => {
                    let male = self.male_queue.remove(index);
                    self.partner_agents(female, male, date);
                    formed += 1;
                }
                None => unmatched.push(female),
            }
        }

        self.female_queue = unmatched;
        formed
    }

    /// Index into `candidates` of the best of up to
    /// [`PARTNER_CANDIDATES`] sampled men for `woman`.  Ties go to the first
    /// sampled.  `None` if no candidate is alive.
    pub fn pick_partner(
        &self,
        woman:      &Agent,
        candidates: &[AgentId],
        age_diff:   f64,
        rng:        &mut SimRng,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for index in rng.sample_indices(candidates.len(), PARTNER_CANDIDATES) {
            let Some(man) = self.agents.get(candidates[index]) else { continue };
            let distance = partner_distance(man, woman, age_diff);
            if best.is_none_or(|(_, top)| distance < top) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Partner two agents with each other.
    ///
    /// # Panics
    ///
    /// If either is dead, already partnered, or not yet an adult.
    pub fn partner_agents(&mut self, a: AgentId, b: AgentId, date: NaiveDate) {
        let (first, second) = self
            .agents
            .get_pair_mut(a, b)
            .unwrap_or_else(|| panic!("partnering dead agents {a} and {b}"));
        assert!(first.partnerable(), "{a} cannot partner");
        assert!(second.partnerable(), "{b} cannot partner");

        for (me, other) in [(&mut *first, b), (&mut *second, a)] {
            me.partner = Some(other);
            me.age_at_marriage = Some(me.age_years);
            me.in_marriage_market = false;
        }
        tracing::debug!(
            %date,
            first = a.0,
            second = b.0,
            first_age = first.age_years,
            second_age = second.age_years,
            "partnered"
        );
    }
}

/// Dissimilarity of a couple: skill gap plus the squared deviation from the
/// preferred age gap, scaled by 50.
pub fn partner_distance(man: &Agent, woman: &Agent, age_diff: f64) -> f64 {
    let skill_gap = (man.skill - woman.skill).abs();
    let age_gap = ((man.age_years - woman.age_years) as f64 - age_diff).abs();
    skill_gap + age_gap * age_gap / 50.0
}
