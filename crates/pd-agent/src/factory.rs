//! Agent creation: members of the initial population and newborns.
//!
//! # Initial population
//!
//! | Attribute   | Draw                                                        |
//! |-------------|-------------------------------------------------------------|
//! | age         | year from the startup age distribution, plus U{0..=365} days (≥ 1 day) |
//! | experience  | `U(0.5, 1) · max(0, age − 16 years)`                        |
//! | skill       | `clamp(N(0.5, 0.2), 0.01, 1)`                               |
//! | aspiration  | `U(default_aspiration, initial_aspiration_max)`             |
//! | sex         | male with probability `prop_male_at_birth`                  |
//!
//! The startup age distribution over years `0..80` has weight
//! `1 − 0.0005a − 0.0002a² + mult·exp(−0.002(a − peak)²)`, floored at zero
//! (the quadratic goes negative near 70).
//!
//! # Newborns
//!
//! Born `1 + ⌊U · step_days⌋` days into the coming step, with no experience,
//! aspiration `default_aspiration` and a fresh skill draw.

use chrono::{Duration, NaiveDate};
use pd_core::{AgentId, Params, SimRng, age_in_years};

use crate::{Agent, Employment, FertilityState, Sex};

/// Ages (in whole years) covered by the startup age distribution.
pub const STARTUP_AGES: usize = 80;

const DAYS_PER_YEAR: i64 = 365;

pub struct AgentFactory {
    next_id: AgentId,
    /// Normalised cumulative startup age distribution.
    cum_age_dist: Vec<f64>,
}

impl AgentFactory {
    pub fn new(params: &Params) -> Self {
        Self {
            next_id: AgentId(0),
            cum_age_dist: startup_age_cum_dist(params.starting_hump_peak, params.starting_hump_mult),
        }
    }

    /// The id the next agent will get.
    #[inline]
    pub fn peek_id(&self) -> AgentId {
        self.next_id
    }

    fn take_id(&mut self) -> AgentId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// Create one member of the initial population, aged relative to
    /// `start_date`.
    pub fn make_initial_agent(&mut self, params: &Params, start_date: NaiveDate, rng: &mut SimRng) -> Agent {
        let age_days = self.draw_age_days(rng);
        let working_days = (age_days - 16 * DAYS_PER_YEAR).max(0);
        let experience_days = (working_days as f64 * rng.gen_range(0.5..1.0)) as i64;
        let skill = draw_skill(rng);
        let aspiration = params.default_aspiration
            + rng.uniform() * (params.initial_aspiration_max - params.default_aspiration);
        let dob = start_date - Duration::days(age_days);

        let mut agent = self.make_agent(params, dob, start_date, age_days, rng);
        agent.experience_days = experience_days;
        agent.skill = skill;
        agent.aspiration = aspiration;
        // Agents already past the imprinting age keep their drawn aspiration.
        agent.imprinted = agent.age_years > params.imprinting_time;
        agent
    }

    /// Create a newborn whose birth falls inside the step starting `today`.
    pub fn make_newborn(&mut self, params: &Params, today: NaiveDate, step_days: i64, rng: &mut SimRng) -> Agent {
        let age_days = 1 + (rng.uniform() * step_days as f64) as i64;
        let dob = today + Duration::days(age_days);
        let skill = draw_skill(rng);

        let mut agent = self.make_agent(params, dob, today, age_days, rng);
        agent.skill = skill;
        agent.aspiration = params.default_aspiration;
        agent
    }

    fn make_agent(
        &mut self,
        params: &Params,
        dob: NaiveDate,
        today: NaiveDate,
        age_days: i64,
        rng: &mut SimRng,
    ) -> Agent {
        let id = self.take_id();
        let sex = if rng.uniform() < params.prop_male_at_birth { Sex::Male } else { Sex::Female };
        let fertility = match sex {
            Sex::Female => Some(FertilityState::new(params.fertility_type, params, rng)),
            Sex::Male => None,
        };
        Agent {
            id,
            sex,
            dob,
            age_days,
            age_years: age_in_years(dob, today),
            experience_days: 0,
            skill: 0.5,
            aspiration: params.default_aspiration,
            imprinted: false,
            partner: None,
            mother: None,
            age_at_marriage: None,
            in_marriage_market: false,
            employment: Employment::default(),
            fertility,
            children: Vec::new(),
        }
    }

    /// Age in days drawn from the startup age distribution.
    fn draw_age_days(&self, rng: &mut SimRng) -> i64 {
        let draw = rng.uniform();
        let year = self
            .cum_age_dist
            .iter()
            .position(|&c| draw < c)
            .unwrap_or(STARTUP_AGES - 1) as i64;
        let day: i64 = rng.gen_range(0..=DAYS_PER_YEAR);
        (year * DAYS_PER_YEAR + day).max(1)
    }
}

/// Skill of a new agent, `clamp(N(0.5, 0.2), 0.01, 1)`.
pub fn draw_skill(rng: &mut SimRng) -> f64 {
    rng.normal(0.5, 0.2).clamp(0.01, 1.0)
}

/// Unnormalised startup weight of age `a` years.
pub fn startup_age_weight(age: f64, peak: f64, mult: f64) -> f64 {
    let base = 1.0 - 0.0005 * age - 0.0002 * age * age;
    let hump = mult * (-0.002 * (age - peak).powi(2)).exp();
    base + hump
}

fn startup_age_cum_dist(peak: f64, mult: f64) -> Vec<f64> {
    let mut total = 0.0;
    let mut cum: Vec<f64> = (0..STARTUP_AGES)
        .map(|a| {
            total += startup_age_weight(a as f64, peak, mult).max(0.0);
            total
        })
        .collect();
    if total > 0.0 {
        cum.iter_mut().for_each(|c| *c /= total);
    }
    cum
}
