//! Simulation parameters.
//!
//! `Params` is a flat mapping of named parameters.  `Params::default()` is a
//! complete, working parameter set; a JSON document only needs to name the
//! keys it changes:
//!
//! ```json
//! { "pop_size": 2000, "timestep": "month", "fertility_type": "hetero" }
//! ```
//!
//! The three variant selectors (`prod_type`, `fertility_type`,
//! `app_criteria`) are typed enums.  Unknown selector values fail at load
//! time; nothing silently falls back to a default variant.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::{ConfigError, ConfigResult, StepSetting};

// ── Selectors ─────────────────────────────────────────────────────────────────

/// Generate a string-keyed selector enum with `FromStr`, `as_str` and serde
/// deserialisation through `FromStr`.
macro_rules! selector {
    (
        $(#[$attr:meta])*
        $name:ident, key = $key:literal {
            $( $(#[$vattr:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $( $(#[$vattr])* $variant ),+
        }

        impl $name {
            /// All variants, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The configuration keyword for this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $text => Ok($name::$variant), )+
                    other => Err(ConfigError::UnknownSelector {
                        key:      $key,
                        value:    other.to_owned(),
                        expected: concat!($($text, " "),+),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ConfigError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

selector! {
    /// Shape of the market-wide productivity curve.
    ProdType, key = "prod_type" {
        /// Experience only.
        Experience => "experience",
        /// Skill times the experience curve.
        ExperSkill => "exper-skill",
        /// Skill, experience and job difficulty, multiplicative.
        Difficulty => "difficulty",
        /// Saturating logistic in (skill − difficulty).
        Logistic => "logistic",
    }
}

selector! {
    /// Which reproductive-behaviour policy female agents follow.
    FertilityType, key = "fertility_type" {
        Simple => "simple",
        Married => "married",
        Partner => "partner",
        Easterlin => "easterlin",
        SoftEasterlin => "soft_easterlin",
        ParityEasterlin => "parity_easterlin",
        ProbEasterlin => "prob_easterlin",
        Hetero => "hetero",
    }
}

selector! {
    /// How a vacancy ranks its applicants.
    AppCriteria, key = "app_criteria" {
        /// Highest computed wage.
        Wage => "wage",
        /// Highest raw productivity.
        Prod => "prod",
        /// Highest productivity minus wage.
        Profit => "profit",
    }
}

// ── Params ────────────────────────────────────────────────────────────────────

/// Every tunable parameter of a run.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    // ── Run ───────────────────────────────────────────────────────────────
    /// Size of the seeded initial population.
    pub pop_size: usize,
    /// ISO `YYYY-mm-dd` start date.
    pub start_date: String,
    /// `"year"`, `"month"`, or an integer number of days.
    pub timestep: StepSetting,
    /// Days per year used to scale annual hazards to one step.
    pub year_length: f64,
    /// Master RNG seed.  `None` leaves the choice to the caller.
    pub seed: Option<u64>,
    /// Emit a debug event with each employed male's wage every step.
    pub log_wages: bool,

    // ── Mortality ─────────────────────────────────────────────────────────
    pub gompertz_a: f64,
    pub gompertz_b: f64,
    /// Hazard floor above the onset age.
    pub gompertz_l: f64,
    /// Onset age; the hazard is zero below it.
    pub gompertz_start: f64,

    // ── Partnering ────────────────────────────────────────────────────────
    pub partnering_a: f64,
    pub partnering_alpha: f64,
    pub partnering_mu: f64,
    pub partnering_lambda: f64,
    /// Preferred male-minus-female age gap.
    pub partner_age_diff: f64,

    // ── Fertility ─────────────────────────────────────────────────────────
    pub fertility_type: FertilityType,
    pub base_fertility_a: f64,
    pub base_fertility_b: f64,
    pub base_fertility_c: f64,
    pub further_fertility_a: f64,
    pub further_fertility_b: f64,
    pub further_fertility_mu: f64,
    pub fecundity_a: f64,
    pub fecundity_b: f64,
    pub fecundity_c: f64,
    pub fecundity_mu: f64,
    /// Strength of cohort-size feedback on the baseline hazard.
    pub feedback_mult: f64,
    /// Strength of income feedback on higher-order births.
    pub parity_feedback_mult: f64,
    /// Fraction of the aspiration threshold a household may fall short by.
    pub aspiration_offset: f64,
    /// Upper bound of the per-agent offset drawn by the `hetero` policy.
    pub aspiration_offset_max: f64,
    /// Weight of the woman's own aspiration in the household threshold.
    pub female_weight_in_threshold: f64,
    /// Per-child reduction of effective household income.
    pub parity_offset: f64,
    pub prob_mult: f64,
    pub prob_asymptote: f64,
    /// Share of women desiring at most two children (`hetero`).
    pub desire2: f64,
    /// Blend both parents' skill into a newborn's skill.
    pub inheritance: bool,
    pub inheritance_corr: f64,
    pub prop_male_at_birth: f64,

    // ── Wages ─────────────────────────────────────────────────────────────
    pub prod_type: ProdType,
    pub wage_alpha: f64,
    pub wage_beta: f64,
    pub wage_gamma: f64,
    pub wage_delta: f64,
    pub wage_nu: f64,
    /// Strength of cohort-crowding feedback on wages.
    pub wage_feedback_mult: f64,
    /// Log growth of the productivity multiplier per step.
    pub growth_rate: f64,
    /// Additive productivity growth per step.
    pub linear_growth: f64,
    pub app_criteria: AppCriteria,

    // ── Market sizing ─────────────────────────────────────────────────────
    /// Population demand per job.
    pub support_ratio: f64,
    /// Annual fraction of jobs destroyed and recreated.
    pub churn: f64,
    pub job_upper_limit: usize,
    pub job_burnin_rounds: usize,
    /// Initial jobs per member of the labour force.
    pub setup_job_lab_ratio: f64,
    /// Mean annual applications sent by an employed agent.
    pub job_apps_employed: f64,
    /// Mean annual applications sent by an unemployed agent.
    pub job_apps_unemployed: f64,
    /// Let employed agents keep applying for better-paid jobs.
    pub on_the_job_search: bool,
    /// Give jobs a minimum-experience requirement.
    pub experience_floor: bool,
    /// Top of the experience range in years.
    pub exp_max: f64,

    // ── Social ────────────────────────────────────────────────────────────
    pub imprinting_time: i32,
    pub retirement_age: i32,
    /// Initial wage floor and fallback aspiration.
    pub social_security_level: f64,
    pub default_aspiration: f64,
    pub initial_aspiration_max: f64,
    /// Width of the Gaussian kernel over birth years.
    pub cohort_width: f64,

    // ── Initial population ────────────────────────────────────────────────
    pub starting_hump_peak: f64,
    pub starting_hump_mult: f64,
    pub setup_marriage_age_a: f64,
    pub setup_marriage_age_b: f64,
    pub setup_marriage_age_mid: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            pop_size:    5_000,
            start_date:  "1950-01-01".to_owned(),
            timestep:    StepSetting::default(),
            year_length: 365.0,
            seed:        None,
            log_wages:   false,

            gompertz_a:     0.0004,
            gompertz_b:     0.095,
            gompertz_l:     0.0005,
            gompertz_start: 30.0,

            partnering_a:      0.35,
            partnering_alpha:  0.25,
            partnering_mu:     20.0,
            partnering_lambda: 0.3,
            partner_age_diff:  2.0,

            fertility_type:             FertilityType::Easterlin,
            base_fertility_a:           2.0,
            base_fertility_b:           3.5,
            base_fertility_c:           28.0,
            further_fertility_a:        0.6,
            further_fertility_b:        0.2,
            further_fertility_mu:       2.5,
            fecundity_a:                1.0,
            fecundity_b:                0.0,
            fecundity_c:                0.002,
            fecundity_mu:               25.0,
            feedback_mult:              1.0,
            parity_feedback_mult:       0.5,
            aspiration_offset:          0.1,
            aspiration_offset_max:      0.3,
            female_weight_in_threshold: 0.5,
            parity_offset:              0.1,
            prob_mult:                  2.0,
            prob_asymptote:             0.3,
            desire2:                    0.6,
            inheritance:                false,
            inheritance_corr:           0.5,
            prop_male_at_birth:         0.512,

            prod_type:          ProdType::ExperSkill,
            wage_alpha:         2.0,
            wage_beta:          0.5,
            wage_gamma:         0.08,
            wage_delta:         0.0015,
            wage_nu:            1.0,
            wage_feedback_mult: 0.5,
            growth_rate:        0.01,
            linear_growth:      0.0,
            app_criteria:       AppCriteria::Wage,

            support_ratio:       1.6,
            churn:               0.05,
            job_upper_limit:     100_000,
            job_burnin_rounds:   5,
            setup_job_lab_ratio: 0.95,
            job_apps_employed:   2.0,
            job_apps_unemployed: 10.0,
            on_the_job_search:   true,
            experience_floor:    false,
            exp_max:             40.0,

            imprinting_time:        15,
            retirement_age:         65,
            social_security_level:  0.5,
            default_aspiration:     0.5,
            initial_aspiration_max: 2.0,
            cohort_width:           10.0,

            starting_hump_peak:     25.0,
            starting_hump_mult:     0.2,
            setup_marriage_age_a:   0.0,
            setup_marriage_age_b:   0.25,
            setup_marriage_age_mid: 25.0,
        }
    }
}

impl Params {
    /// Parse a JSON document over the defaults and validate the result.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Like [`from_json_str`](Self::from_json_str), reading from `path`.
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values that would make a run meaningless (division by zero,
    /// probabilities outside [0, 1]).
    pub fn validate(&self) -> ConfigResult<()> {
        fn positive(key: &'static str, v: f64) -> ConfigResult<()> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { key, reason: format!("{v} must be positive") })
            }
        }
        fn unit(key: &'static str, v: f64) -> ConfigResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { key, reason: format!("{v} must lie in [0, 1]") })
            }
        }

        positive("year_length", self.year_length)?;
        positive("support_ratio", self.support_ratio)?;
        positive("cohort_width", self.cohort_width)?;
        positive("base_fertility_c", self.base_fertility_c)?;
        unit("churn", self.churn)?;
        unit("prop_male_at_birth", self.prop_male_at_birth)?;
        unit("female_weight_in_threshold", self.female_weight_in_threshold)?;
        unit("inheritance_corr", self.inheritance_corr)?;
        if self.gompertz_l < 0.0 || self.gompertz_a < 0.0 {
            return Err(ConfigError::InvalidValue {
                key:    "gompertz_l",
                reason: "mortality hazard terms must be non-negative".to_owned(),
            });
        }
        if self.experience_floor && self.exp_max <= -15.0 {
            return Err(ConfigError::InvalidValue {
                key:    "exp_max",
                reason: format!("{} leaves no room above the -15 year lower draw", self.exp_max),
            });
        }
        if self.initial_aspiration_max < self.default_aspiration {
            return Err(ConfigError::InvalidValue {
                key:    "initial_aspiration_max",
                reason: "must not be below default_aspiration".to_owned(),
            });
        }
        Ok(())
    }

    /// Annual Gompertz mortality curve built from these parameters.
    pub fn gompertz(&self) -> crate::hazard::Gompertz {
        crate::hazard::Gompertz {
            a:     self.gompertz_a,
            b:     self.gompertz_b,
            floor: self.gompertz_l,
            onset: self.gompertz_start,
        }
    }

    /// Annual partnering hazard built from these parameters.
    pub fn partnering(&self) -> crate::hazard::PartneringHazard {
        crate::hazard::PartneringHazard {
            a:      self.partnering_a,
            alpha:  self.partnering_alpha,
            mu:     self.partnering_mu,
            lambda: self.partnering_lambda,
        }
    }
}
