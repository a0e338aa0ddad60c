//! Construction of the initial population and labour market.
//!
//! | Stage          | What happens                                             |
//! |----------------|----------------------------------------------------------|
//! | seeding        | `pop_size` agents from the factory                       |
//! | birth history  | each agent's birth year gets its survivorship inflator   |
//! | job pool       | vacancies for a share of the labour force, then burn-in  |
//! | partnerships   | adult women partnered by an age-dependent probability    |
//! | children       | agents aged 16 or less assigned a plausible mother       |

use chrono::Datelike;
use pd_agent::agent::ADULT_AGE;
use pd_agent::Sex;
use pd_core::{AgentId, Clock, Params, ProductivityFn, SimRng};
use pd_fertility::FertilityPolicy;
use pd_labour::{LabourMarket, MarketConfig};

use crate::{Population, SimError, SimResult};

/// Ages covered by the survivorship inflators.
const INFLATOR_AGES: usize = 100;

/// Mothers at or above this age are not given children at setup.
const MAX_SETUP_MOTHER_AGE: i32 = 55;

/// Mother sampling attempts per child.
const CHILD_ATTEMPTS: usize = 20;

/// Candidate mothers sampled per attempt.
const MOTHER_CANDIDATES: usize = 10;

impl Population {
    /// Seed, partner and parent the initial population, and build the job
    /// pool it starts with.
    pub fn set_up<F: FertilityPolicy>(
        params:    &Params,
        clock:     &Clock,
        fertility: &F,
        rng:       &mut SimRng,
    ) -> SimResult<(Self, LabourMarket)> {
        if params.pop_size == 0 {
            return Err(SimError::EmptyPopulation);
        }
        let start = clock.date();
        let mut pop = Population::new(params, start);

        for _ in 0..params.pop_size {
            let agent = pop.factory.make_initial_agent(params, start, rng);
            pop.agents.insert(agent);
        }
        pop.reconstruct_birth_history();

        let market = pop.initial_market(params, clock, rng);
        pop.set_up_partnerships(params, clock, rng);
        pop.assign_children(params, clock, fertility, rng);

        tracing::info!(
            population = pop.len(),
            jobs = market.len(),
            vacancies = market.vacancies().len(),
            partnered = pop.agents.iter().filter(|a| a.has_partner()).count(),
            "initial population ready"
        );
        market.assert_consistent(&pop.agents);
        Ok((pop, market))
    }

    /// Count every seeded agent into its birth year, inflated by the
    /// mortality its cohort has already suffered, then derive this year's
    /// relative cohort sizes.
    fn reconstruct_birth_history(&mut self) {
        let inflators = self.gompertz.survival_inflators(INFLATOR_AGES);
        for agent in self.agents.iter() {
            let age = (agent.age_years.max(0) as usize).min(INFLATOR_AGES - 1);
            let births = match agent.sex {
                Sex::Male => &mut self.male_births,
                Sex::Female => &mut self.female_births,
            };
            births.add(agent.dob.year(), inflators[age]);
        }
        let year = self.male_sizes.year();
        self.male_sizes = self.male_births.relative_sizes(year);
        self.female_sizes = self.female_births.relative_sizes(year);
    }

    /// Size the job pool to the labour force and run the burn-in rounds, in
    /// which only the unemployed apply.
    fn initial_market(&mut self, params: &Params, clock: &Clock, rng: &mut SimRng) -> LabourMarket {
        let num_jobs = (self.labour_force_size() as f64 * params.setup_job_lab_ratio).floor() as usize;
        let mut market = LabourMarket::new(
            MarketConfig::from_params(params),
            ProductivityFn::from_params(params),
            num_jobs,
            rng,
        );
        market.update_feedbacks(&self.male_sizes);

        let mean = params.job_apps_unemployed * clock.year_fraction(params.year_length);
        for round in 0..params.job_burnin_rounds {
            let mut ids = self.agents.ids();
            rng.shuffle(&mut ids);
            for id in ids {
                let Some(agent) = self.agents.get(id) else { continue };
                if agent.employment.has_job() || !agent.eligible_for_market(self.retirement_age) {
                    continue;
                }
                let count = rng.poisson(mean);
                market.submit_applications(agent, count, rng);
            }
            market.send_offers(&mut self.agents);
            let hired = self.resolve_job_offers(&mut market);
            tracing::debug!(round, hired, vacancies = market.vacancies().len(), "job burn-in round");
        }
        market
    }

    /// Partner each adult woman with probability
    /// `1 − exp(−exp(a + b(age − mid)))` to the best of a few sampled
    /// single men.
    fn set_up_partnerships(&mut self, params: &Params, clock: &Clock, rng: &mut SimRng) {
        let date = clock.date();
        let women: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|a| a.is_female() && a.partnerable())
            .map(|a| a.id)
            .collect();
        let mut men: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|a| !a.is_female() && a.partnerable())
            .map(|a| a.id)
            .collect();

        for female in women {
            if men.is_empty() {
                break;
            }
            let Some(woman) = self.agents.get(female) else { continue };
            let x = params.setup_marriage_age_a
                + params.setup_marriage_age_b * (woman.age_years as f64 - params.setup_marriage_age_mid);
            let p = 1.0 - (-x.exp()).exp();
            if rng.uniform() >= p {
                continue;
            }
            if let Some(index) = self.pick_partner(woman, &men, params.partner_age_diff, rng) {
                let male = men.remove(index);
                self.partner_agents(female, male, date);
            }
        }
    }

    /// Give each child of the seeded population a mother among partnered
    /// women who could have started a family.
    fn assign_children<F: FertilityPolicy>(
        &mut self,
        params:    &Params,
        clock:     &Clock,
        fertility: &F,
        rng:       &mut SimRng,
    ) {
        let children: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|a| a.age_years <= ADULT_AGE)
            .map(|a| a.id)
            .collect();

        let candidates: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|a| a.is_female() && a.has_partner() && a.age_years < MAX_SETUP_MOTHER_AGE)
            .map(|a| a.id)
            .collect();
        let ctx = self.fertility_context(params, clock.date(), clock.year_fraction(params.year_length));
        let mothers: Vec<AgentId> = candidates
            .into_iter()
            .filter(|&id| fertility.family_formation_ok(id, &ctx, rng))
            .collect();
        if mothers.is_empty() {
            return;
        }

        let mut assigned = 0;
        for child in children {
            let Some(child_age) = self.agents.get(child).map(|c| c.age_years) else { continue };
            for _ in 0..CHILD_ATTEMPTS {
                let sampled: Vec<AgentId> = rng
                    .sample_indices(mothers.len(), MOTHER_CANDIDATES)
                    .into_iter()
                    .map(|i| mothers[i])
                    .collect();
                let weights: Vec<f64> = sampled
                    .iter()
                    .map(|&m| {
                        self.agents
                            .get(m)
                            .map_or(0.0, |mother| mother_weight(mother.age_years - child_age, mother.parity()))
                    })
                    .collect();
                let Some(pick) = weighted_index(&weights, rng) else { continue };

                let mother = sampled[pick];
                let Some((m, c)) = self.agents.get_pair_mut(mother, child) else { continue };
                if let Some(state) = m.fertility.as_mut() {
                    state.record_birth(c.dob);
                }
                m.children.push(child);
                c.mother = Some(mother);
                assigned += 1;
                break;
            }
        }
        tracing::debug!(assigned, mothers = mothers.len(), "children assigned to mothers");
    }
}

/// Setup weight of a prospective mother who would have given birth at
/// `age_at_birth` and already has `parity` children.
pub fn mother_weight(age_at_birth: i32, parity: u32) -> f64 {
    if !(17..=45).contains(&age_at_birth) || parity > 5 {
        return 0.0;
    }
    let weight = if age_at_birth > 22 && age_at_birth < 32 { 1.0 } else { 0.2 };
    if parity > 1 { weight / parity as f64 } else { weight }
}

/// Index drawn with probability proportional to `weights`.  `None` when the
/// weights sum to zero or less.
pub fn weighted_index(weights: &[f64], rng: &mut SimRng) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if total.is_nan() || total <= 0.0 {
        return None;
    }
    let mut draw = rng.uniform() * total;
    for (i, &w) in weights.iter().enumerate() {
        if draw < w {
            return Some(i);
        }
        draw -= w;
    }
    weights.iter().rposition(|&w| w > 0.0)
}
