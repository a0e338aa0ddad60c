//! The configured fertility variants.
//!
//! Every female carries the variant she was created with in her
//! `FertilityState::kind`; [`FertilityModel`] holds the shared curves and
//! dispatches on it.
//!
//! # Notation
//!
//! | Symbol | Meaning                                                          |
//! |--------|------------------------------------------------------------------|
//! | `h(x)` | Hadwiger baseline at the mother's age                            |
//! | `yf`   | step length as a fraction of a year                              |
//! | `fb`   | Gaussian-weighted relative cohort size                           |
//! | `w`    | partner's income (wage, or benefit when unemployed)              |
//! | `thr`  | `f·own_aspiration + (1 − f)·partner_aspiration`                  |
//! | `off`  | `aspiration_offset` (agent-specific for `hetero`)                |
//! | `t`    | whole years since the last birth                                 |
//! | `p`    | parity                                                           |
//!
//! # Variants
//!
//! | Variant            | Birth when                                                    |
//! |--------------------|---------------------------------------------------------------|
//! | `simple`           | `U < h(x)·yf·exp(fb·feedback_mult)`, own female cohort        |
//! | `married`          | as `simple`, partner required                                 |
//! | `partner`          | as `married`, `fb` from the partner's male cohort             |
//! | `soft_easterlin`   | employed partner; `U < h(x)·yf·(1 + ln((w + off)/thr)·feedback_mult)` |
//! | `easterlin`        | partner; first: `w > thr(1 − off)`; later: `t ≥ 1`, `U < sub(t)·yf/p` and the first-birth gate; then `U < fecundity(x)` |
//! | `parity_easterlin` | first as `easterlin`; later: `t ≥ 1`, `U < sub(t)·yf·(1 + r·parity_feedback_mult)/p`; then fecundity |
//! | `prob_easterlin`   | first: `U < asymptote·logistic(prob_mult·ln(w/(thr(1 − off))))`; later as `parity_easterlin` |
//! | `hetero`           | first: `w > thr(1 − off_i)`; later: `t ≥ 1`, `w(1 − parity_offset·p) > thr(1 − off_i)`, `p < desired`; then fecundity |
//!
//! with `r = w(1 − parity_offset·p)/thr · (1 − off)`.

use chrono::Datelike;
use pd_agent::{Agent, FertilityState};
use pd_core::hazard::{Fecundity, Hadwiger, SubsequentFertility, logistic};
use pd_core::{AgentId, FertilityType, Params, RelativeCohortSizes, SimRng, age_in_years};

use crate::{FertilityContext, FertilityPolicy};

/// The shared fertility curves, built once from the parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FertilityModel {
    pub base:      Hadwiger,
    pub further:   SubsequentFertility,
    pub fecundity: Fecundity,
}

impl FertilityModel {
    pub fn from_params(params: &Params) -> Self {
        Self {
            base: Hadwiger {
                a: params.base_fertility_a,
                b: params.base_fertility_b,
                c: params.base_fertility_c,
            },
            further: SubsequentFertility {
                a:  params.further_fertility_a,
                b:  params.further_fertility_b,
                mu: params.further_fertility_mu,
            },
            fecundity: Fecundity {
                a:  params.fecundity_a,
                b:  params.fecundity_b,
                c:  params.fecundity_c,
                mu: params.fecundity_mu,
            },
        }
    }

    /// `h(x)·yf·exp(fb·feedback_mult)` with `fb` centred on `birth_year`.
    fn cohort_hazard(
        &self,
        mother:     &Agent,
        sizes:      &RelativeCohortSizes,
        birth_year: i32,
        ctx:        &FertilityContext<'_>,
    ) -> f64 {
        let fb = sizes.feedback(birth_year, ctx.params.cohort_width);
        self.baseline(mother, ctx) * (fb * ctx.params.feedback_mult).exp()
    }

    /// Hadwiger rate scaled to the step.
    #[inline]
    fn baseline(&self, mother: &Agent, ctx: &FertilityContext<'_>) -> f64 {
        self.base.rate(mother.age_years as f64) * ctx.year_fraction
    }

    fn soft_easterlin(&self, h: &Household<'_>, ctx: &FertilityContext<'_>, rng: &mut SimRng) -> bool {
        let Some(partner) = h.partner.filter(|p| p.employment.has_job()) else {
            return false;
        };
        let w = partner.employment.current_wage(ctx.benefit_level);
        let fb = ((w + ctx.params.aspiration_offset) / h.threshold(ctx)).ln();
        let prob = self.baseline(h.mother, ctx) * (1.0 + fb * ctx.params.feedback_mult);
        rng.uniform() < prob
    }

    fn easterlin_family(&self, h: &Household<'_>, ctx: &FertilityContext<'_>, rng: &mut SimRng) -> bool {
        if h.partner.is_none() {
            return false;
        }
        let wants_birth = if h.state.parity() == 0 {
            self.first_birth_gate(h, ctx, rng)
        } else {
            self.subsequent_birth(h, ctx, rng)
        };
        wants_birth && rng.uniform() < self.fecundity.rate(h.mother.age_years as f64)
    }

    /// The first-birth income condition for the Easterlin family.
    fn first_birth_gate(&self, h: &Household<'_>, ctx: &FertilityContext<'_>, rng: &mut SimRng) -> bool {
        let Some(w) = h.partner_income(ctx) else {
            return false;
        };
        let threshold = h.threshold(ctx);
        tracing::trace!(mother = h.mother.id.0, wage = w, threshold, "checking family formation");
        match h.state.kind {
            FertilityType::ProbEasterlin => {
                let ratio = w / (threshold * (1.0 - ctx.params.aspiration_offset));
                if ratio.is_nan() || ratio <= 0.0 {
                    return false;
                }
                let criterion = ctx.params.prob_asymptote * logistic(ctx.params.prob_mult * ratio.ln());
                rng.uniform() < criterion
            }
            FertilityType::Hetero => w > threshold * (1.0 - h.own_offset()),
            _ => w > threshold * (1.0 - ctx.params.aspiration_offset),
        }
    }

    fn subsequent_birth(&self, h: &Household<'_>, ctx: &FertilityContext<'_>, rng: &mut SimRng) -> bool {
        let Some(last) = h.state.date_of_last_birth else {
            return false;
        };
        let t = age_in_years(last, ctx.date);
        if t < 1 {
            return false;
        }
        let Some(w) = h.partner_income(ctx) else {
            return false;
        };
        let parity = h.state.parity() as f64;
        let params = ctx.params;
        match h.state.kind {
            FertilityType::Hetero => {
                let desired = h.state.desired_family_size.unwrap_or(0);
                w * (1.0 - params.parity_offset * parity) > h.threshold(ctx) * (1.0 - h.own_offset())
                    && h.state.parity() < desired
            }
            FertilityType::ParityEasterlin | FertilityType::ProbEasterlin => {
                let ratio = w * (1.0 - params.parity_offset * parity) / h.threshold(ctx)
                    * (1.0 - params.aspiration_offset);
                let prob = self.further.rate(t as f64)
                    * ctx.year_fraction
                    * (1.0 + ratio * params.parity_feedback_mult)
                    / parity;
                rng.uniform() < prob
            }
            _ => {
                let prob = self.further.rate(t as f64) * ctx.year_fraction / parity;
                rng.uniform() < prob && self.first_birth_gate(h, ctx, rng)
            }
        }
    }
}

impl FertilityPolicy for FertilityModel {
    fn reproductive_behaviour(&self, mother: AgentId, ctx: &FertilityContext<'_>, rng: &mut SimRng) -> bool {
        let Some(h) = Household::lookup(mother, ctx) else {
            return false;
        };
        match h.state.kind {
            FertilityType::Simple => {
                let prob = self.cohort_hazard(h.mother, ctx.female_sizes, h.mother.dob.year(), ctx);
                rng.uniform() < prob
            }
            FertilityType::Married => {
                h.partner.is_some()
                    && rng.uniform() < self.cohort_hazard(h.mother, ctx.female_sizes, h.mother.dob.year(), ctx)
            }
            FertilityType::Partner => match h.partner {
                Some(p) => rng.uniform() < self.cohort_hazard(h.mother, ctx.male_sizes, p.dob.year(), ctx),
                None => false,
            },
            FertilityType::SoftEasterlin => self.soft_easterlin(&h, ctx, rng),
            FertilityType::Easterlin
            | FertilityType::ParityEasterlin
            | FertilityType::ProbEasterlin
            | FertilityType::Hetero => self.easterlin_family(&h, ctx, rng),
        }
    }

    fn family_formation_ok(&self, mother: AgentId, ctx: &FertilityContext<'_>, rng: &mut SimRng) -> bool {
        let Some(h) = Household::lookup(mother, ctx) else {
            return false;
        };
        match h.state.kind {
            FertilityType::Simple
            | FertilityType::Married
            | FertilityType::Partner
            | FertilityType::SoftEasterlin => true,
            FertilityType::Easterlin
            | FertilityType::ParityEasterlin
            | FertilityType::ProbEasterlin
            | FertilityType::Hetero => self.first_birth_gate(&h, ctx, rng),
        }
    }
}

// ── Household view ────────────────────────────────────────────────────────────

/// A mother, her reproductive state and her living partner.
struct Household<'a> {
    mother:  &'a Agent,
    state:   &'a FertilityState,
    partner: Option<&'a Agent>,
}

impl<'a> Household<'a> {
    fn lookup(mother: AgentId, ctx: &FertilityContext<'a>) -> Option<Self> {
        let agent = ctx.agents.get(mother)?;
        let state = agent.fertility.as_ref()?;
        let partner = agent.partner.and_then(|p| ctx.agents.get(p));
        Some(Self { mother: agent, state, partner })
    }

    /// Aspiration threshold the household income is compared against.
    /// Without a partner the mother's own aspiration stands alone.
    fn threshold(&self, ctx: &FertilityContext<'_>) -> f64 {
        let weight = ctx.params.female_weight_in_threshold;
        let partner_asp = self.partner.map_or(self.mother.aspiration, |p| p.aspiration);
        weight * self.mother.aspiration + (1.0 - weight) * partner_asp
    }

    fn partner_income(&self, ctx: &FertilityContext<'_>) -> Option<f64> {
        self.partner.map(|p| p.employment.current_wage(ctx.benefit_level))
    }

    fn own_offset(&self) -> f64 {
        self.state.aspiration_offset.unwrap_or(0.0)
    }
}
