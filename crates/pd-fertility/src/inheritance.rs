//! Skill inheritance.
//!
//! A child's skill is drawn on the probit scale around the parents' mean:
//!
//! ```text
//! skill = Φ( N( k · Φ⁻¹(m), 1 − k² ) ),   m = (mother + father) / 2
//! ```
//!
//! where `k` is `inheritance_corr`.  The result always lies in `[0, 1]`.

use pd_core::SimRng;
use pd_core::hazard::{normal_cdf, probit};

/// Keeps `Φ⁻¹` finite for parents at the edges of the skill range.
const PROBIT_EPS: f64 = 1e-9;

pub fn inherited_skill(mother: f64, father: f64, corr: f64, rng: &mut SimRng) -> f64 {
    let mean = ((mother + father) / 2.0).clamp(PROBIT_EPS, 1.0 - PROBIT_EPS);
    normal_cdf(rng.normal(corr * probit(mean), 1.0 - corr * corr))
}
