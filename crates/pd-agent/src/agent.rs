//! The agent record and its per-step state machine.
//!
//! # Demographic states
//!
//! ```text
//! pre-adult ──(age > 16, hazard)──▶ seeking partner ──(matched)──▶ partnered
//!     └──────────────── any state ──(mortality)──▶ removed
//! ```
//!
//! # Sex-specific behaviour
//!
//! `Sex` is a plain tag.  Everything that differs between the sexes is looked
//! up in a static [`SexBehaviour`] table rather than dispatched through
//! separate types.
//!
//! # Step contract
//!
//! [`Agent::step_activity`] only touches the agent itself.  Effects on other
//! structures (vacating a retired worker's job, joining a marriage queue) are
//! returned in a [`StepOutcome`] and applied by the population.

use chrono::NaiveDate;
use pd_core::hazard::{Gompertz, PartneringHazard};
use pd_core::{AgentId, JobId, Params, SimRng, age_in_years};

use crate::{Employment, FertilityState};

/// Minimum age in years (exclusive) for partnering and paid work.
pub const ADULT_AGE: i32 = 16;

// ── Sex ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

/// Behaviour that differs by sex.
#[derive(Debug)]
pub struct SexBehaviour {
    /// Takes part in the labour market.
    pub labour_market: bool,
    /// Exclusive age bounds within which reproductive behaviour runs.
    pub fertile_ages: Option<(i32, i32)>,
    /// Emits per-step wage events when `log_wages` is set.
    pub logs_wages: bool,
}

static MALE_BEHAVIOUR: SexBehaviour = SexBehaviour {
    labour_market: true,
    fertile_ages:  None,
    logs_wages:    true,
};

static FEMALE_BEHAVIOUR: SexBehaviour = SexBehaviour {
    labour_market: false,
    fertile_ages:  Some((15, 49)),
    logs_wages:    false,
};

impl Sex {
    #[inline]
    pub fn behaviour(self) -> &'static SexBehaviour {
        match self {
            Sex::Male => &MALE_BEHAVIOUR,
            Sex::Female => &FEMALE_BEHAVIOUR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

// ── Step environment ──────────────────────────────────────────────────────────

/// Read-only inputs to one agent's step.
#[derive(Copy, Clone, Debug)]
pub struct StepEnv<'a> {
    pub params:        &'a Params,
    pub date:          NaiveDate,
    pub step_days:     i64,
    pub year_fraction: f64,
    pub partnering:    PartneringHazard,
}

impl<'a> StepEnv<'a> {
    pub fn new(params: &'a Params, date: NaiveDate, step_days: i64) -> Self {
        Self {
            params,
            date,
            step_days,
            year_fraction: step_days as f64 / params.year_length,
            partnering: params.partnering(),
        }
    }
}

/// Effects of a step on structures outside the agent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    /// The agent reached retirement age; this job must be vacated.
    pub retired_from: Option<JobId>,
    /// The agent entered the marriage market this step.
    pub joined_marriage_market: bool,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Agent {
    pub id:  AgentId,
    pub sex: Sex,
    pub dob: NaiveDate,
    /// Age in days, advanced by the step length.
    pub age_days: i64,
    /// Whole years from `dob` to the current date.  May be negative for a
    /// newborn whose birth falls inside the current step.
    pub age_years: i32,
    pub experience_days: i64,
    pub skill: f64,
    pub aspiration: f64,
    /// Aspiration has been fixed and will not change again.
    pub imprinted: bool,

    pub partner: Option<AgentId>,
    /// Set once at birth (or setup) and never changed.
    pub mother: Option<AgentId>,
    pub age_at_marriage: Option<i32>,
    pub in_marriage_market: bool,

    pub employment: Employment,
    /// `Some` for females only.
    pub fertility: Option<FertilityState>,
    /// Append-only.  Female agents only.
    pub children: Vec<AgentId>,
}

impl Agent {
    #[inline]
    pub fn behaviour(&self) -> &'static SexBehaviour {
        self.sex.behaviour()
    }

    #[inline]
    pub fn is_female(&self) -> bool {
        self.sex == Sex::Female
    }

    #[inline]
    pub fn has_partner(&self) -> bool {
        self.partner.is_some()
    }

    /// Old enough to partner and currently unpartnered.
    #[inline]
    pub fn partnerable(&self) -> bool {
        self.age_years > ADULT_AGE && !self.has_partner()
    }

    /// Able to hold a job this step.
    pub fn eligible_for_market(&self, retirement_age: i32) -> bool {
        self.behaviour().labour_market
            && self.age_years > ADULT_AGE
            && self.age_years < retirement_age
    }

    /// Within the exclusive reproductive age bounds for this sex.
    pub fn in_fertile_ages(&self) -> bool {
        self.behaviour()
            .fertile_ages
            .is_some_and(|(lo, hi)| self.age_years > lo && self.age_years < hi)
    }

    /// Contribution to aggregate consumer demand, by age.
    pub fn demand_contribution(&self) -> f64 {
        match self.age_years {
            a if a < 16 => 0.5,
            a if a < 25 => 0.8,
            a if a > 65 => 0.8,
            _ => 1.0,
        }
    }

    #[inline]
    pub fn parity(&self) -> u32 {
        self.fertility.as_ref().map_or(0, FertilityState::parity)
    }

    /// `true` if this step will fix the agent's aspiration.  The population
    /// uses it to look up the parental wage only when needed.
    pub fn imprint_due(&self, today: NaiveDate, imprinting_time: i32) -> bool {
        !self.imprinted && age_in_years(self.dob, today) >= imprinting_time
    }

    /// Advance the agent by one step.
    ///
    /// `parental_wage` is the current income of the mother's partner, if the
    /// agent has a living mother with a living partner.
    pub fn step_activity(
        &mut self,
        env: &StepEnv<'_>,
        parental_wage: Option<f64>,
        rng: &mut SimRng,
    ) -> StepOutcome {
        let params = env.params;
        let mut outcome = StepOutcome::default();

        self.age_days += env.step_days;
        self.age_years = age_in_years(self.dob, env.date);

        if self.age_years >= params.imprinting_time && !self.imprinted {
            self.aspiration = parental_wage.unwrap_or(params.social_security_level);
            self.imprinted = true;
            tracing::debug!(
                date = %env.date,
                agent = self.id.0,
                aspiration = self.aspiration,
                inherited = parental_wage.is_some(),
                "aspiration imprinted"
            );
        }

        if self.employment.has_job() {
            self.experience_days += env.step_days;
        }

        if self.age_years >= params.retirement_age {
            outcome.retired_from = self.employment.job;
        }

        if self.partnerable() && !self.in_marriage_market {
            let p = env.year_fraction * env.partnering.rate(self.age_years as f64);
            if rng.uniform() < p {
                self.in_marriage_market = true;
                outcome.joined_marriage_market = true;
            }
        }

        if params.log_wages && self.behaviour().logs_wages && self.employment.has_job() {
            tracing::debug!(
                date = %env.date,
                agent = self.id.0,
                age = self.age_years,
                wage = self.employment.wage,
                skill = self.skill,
                experience = self.experience_days,
                "wage"
            );
        }

        outcome
    }

    /// Draw this step's survival.  `true` means the agent dies.
    pub fn draws_death(&self, gompertz: &Gompertz, year_fraction: f64, rng: &mut SimRng) -> bool {
        let hazard = gompertz.rate(self.age_years as f64);
        hazard > 0.0 && rng.uniform() < hazard * year_fraction
    }
}
