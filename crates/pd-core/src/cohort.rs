//! Relative birth-cohort sizes over the working ages.
//!
//! For the current year `Y`, entry `i` describes the cohort born in
//! `Y − (15 + i)`, i.e. the cohort currently aged `15 + i`:
//!
//! ```text
//! relative[i] = 1 − count(Y − 15 − i) / mean(counts over ages 15..=69)
//! ```
//!
//! Large cohorts therefore have *negative* relative size and small cohorts
//! positive.  A smoothed value around any birth year is obtained with
//! [`RelativeCohortSizes::feedback`], a Gaussian-weighted average over the
//! working-age cohorts with variance `(cohort_width / 2)²`.

use crate::hazard::gaussian_kernel;
use crate::{MIN_WORKING_AGE, WORKING_AGE_SPAN};

#[derive(Clone, Debug, PartialEq)]
pub struct RelativeCohortSizes {
    year:  i32,
    sizes: [f64; WORKING_AGE_SPAN],
}

impl RelativeCohortSizes {
    /// All cohorts of average size.
    pub fn zeros(year: i32) -> Self {
        Self { year, sizes: [0.0; WORKING_AGE_SPAN] }
    }

    /// Build from a birth-year → count lookup.  With a zero mean every
    /// cohort gets relative size 0.
    pub fn from_counts(year: i32, count_for: impl Fn(i32) -> f64) -> Self {
        let mut counts = [0.0; WORKING_AGE_SPAN];
        for (i, c) in counts.iter_mut().enumerate() {
            *c = count_for(birth_year_at(year, i));
        }
        let mean = counts.iter().sum::<f64>() / WORKING_AGE_SPAN as f64;
        let mut sizes = [0.0; WORKING_AGE_SPAN];
        if mean > 0.0 {
            for (s, c) in sizes.iter_mut().zip(counts) {
                *s = 1.0 - c / mean;
            }
        }
        Self { year, sizes }
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.sizes
    }

    /// Relative size of the cohort now aged `age`, if it is of working age.
    pub fn at_age(&self, age: i32) -> Option<f64> {
        working_age_index(age).map(|i| self.sizes[i])
    }

    /// Gaussian-weighted relative size around `centre_birth_year`.
    pub fn feedback(&self, centre_birth_year: i32, cohort_width: f64) -> f64 {
        let var = (cohort_width / 2.0).powi(2);
        let (weighted, total) = self.sizes.iter().enumerate().fold((0.0, 0.0), |(num, den), (i, &rel)| {
            let w = gaussian_kernel((birth_year_at(self.year, i) - centre_birth_year) as f64, var);
            (num + rel * w, den + w)
        });
        if total > 0.0 { weighted / total } else { 0.0 }
    }

    /// [`feedback`](Self::feedback) centred on each working-age cohort's own
    /// birth year, indexed by `age − 15`.
    pub fn working_age_feedbacks(&self, cohort_width: f64) -> [f64; WORKING_AGE_SPAN] {
        let mut out = [0.0; WORKING_AGE_SPAN];
        for (i, f) in out.iter_mut().enumerate() {
            *f = self.feedback(birth_year_at(self.year, i), cohort_width);
        }
        out
    }
}

/// Index into a per-working-age table, `None` outside ages 15..=69.
#[inline]
pub fn working_age_index(age: i32) -> Option<usize> {
    usize::try_from(age - MIN_WORKING_AGE).ok().filter(|&i| i < WORKING_AGE_SPAN)
}

#[inline]
fn birth_year_at(year: i32, index: usize) -> i32 {
    year - MIN_WORKING_AGE - index as i32
}
