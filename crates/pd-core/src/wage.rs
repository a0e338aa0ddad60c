//! The market-wide productivity curve.
//!
//! A [`ProductivityFn`] is built once from `Params` and handed to the labour
//! market at construction.  It never changes during a run.
//!
//! With `ey = ⌊experience_days / year_length⌋` and `E = exp(γ·ey − δ·ey²)`:
//!
//! | `prod_type`   | Productivity                                          |
//! |---------------|-------------------------------------------------------|
//! | `experience`  | `E`                                                   |
//! | `exper-skill` | `skill · E`                                           |
//! | `difficulty`  | `d^β · exp(α·skill − d + skill) · E`                  |
//! | `logistic`    | `max(E · d^β / (1 + exp(−α(skill − d)))^ν, 0.02)`     |

use crate::{Params, ProdType};

/// Lower bound of the logistic productivity curve.
pub const LOGISTIC_FLOOR: f64 = 0.02;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProductivityFn {
    pub kind:        ProdType,
    pub alpha:       f64,
    pub beta:        f64,
    pub gamma:       f64,
    pub delta:       f64,
    pub nu:          f64,
    pub year_length: f64,
}

impl ProductivityFn {
    pub fn from_params(params: &Params) -> Self {
        Self {
            kind:        params.prod_type,
            alpha:       params.wage_alpha,
            beta:        params.wage_beta,
            gamma:       params.wage_gamma,
            delta:       params.wage_delta,
            nu:          params.wage_nu,
            year_length: params.year_length,
        }
    }

    /// Raw productivity of a worker in a job of the given difficulty.
    pub fn productivity(&self, experience_days: f64, skill: f64, difficulty: f64) -> f64 {
        let ey = (experience_days / self.year_length).floor();
        let exper = (self.gamma * ey - self.delta * ey * ey).exp();
        match self.kind {
            ProdType::Experience => exper,
            ProdType::ExperSkill => skill * exper,
            ProdType::Difficulty => {
                difficulty.powf(self.beta) * (self.alpha * skill - difficulty + skill).exp() * exper
            }
            ProdType::Logistic => {
                let saturation = (1.0 + (-self.alpha * (skill - difficulty)).exp()).powf(self.nu);
                (exper * difficulty.powf(self.beta) / saturation).max(LOGISTIC_FLOOR)
            }
        }
    }

    /// Upper bound on job difficulty, `α·β / (1 + β)`.
    pub fn difficulty_bound(&self) -> f64 {
        self.alpha * self.beta / (1.0 + self.beta)
    }
}
