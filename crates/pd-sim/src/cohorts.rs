//! Births counted by calendar year.

use std::collections::BTreeMap;

use pd_core::RelativeCohortSizes;

/// Per-birth-year counts for one sex.
///
/// Counts are `f64` because the historical part is reconstructed at setup
/// from survivors inflated by inverse survivorship.  Years never seen count
/// as zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BirthCohorts {
    counts: BTreeMap<i32, f64>,
}

impl BirthCohorts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, year: i32, amount: f64) {
        *self.counts.entry(year).or_insert(0.0) += amount;
    }

    #[inline]
    pub fn get(&self, year: i32) -> f64 {
        self.counts.get(&year).copied().unwrap_or(0.0)
    }

    /// Relative sizes of the cohorts of working age in `year`.
    pub fn relative_sizes(&self, year: i32) -> RelativeCohortSizes {
        RelativeCohortSizes::from_counts(year, |y| self.get(y))
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.counts.iter().map(|(&y, &c)| (y, c))
    }
}
