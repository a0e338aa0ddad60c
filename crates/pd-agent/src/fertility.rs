//! Reproductive state carried by female agents.
//!
//! The decision rules that read this state live in `pd-fertility`; births
//! are applied by the population.  Parity only ever grows, and only through
//! [`FertilityState::record_birth`].

use chrono::NaiveDate;
use pd_core::{FertilityType, Params, SimRng};

#[derive(Clone, Debug, PartialEq)]
pub struct FertilityState {
    /// Which policy this agent follows.  Fixed at creation.
    pub kind: FertilityType,
    parity: u32,
    pub date_of_last_birth: Option<NaiveDate>,
    /// Completed family size this agent aims for (`hetero` only).
    pub desired_family_size: Option<u32>,
    /// Agent-specific aspiration offset (`hetero` only).
    pub aspiration_offset: Option<f64>,
}

impl FertilityState {
    /// Fresh state for a newly created female.  The `hetero` policy draws
    /// its per-agent goals here, once.
    pub fn new(kind: FertilityType, params: &Params, rng: &mut SimRng) -> Self {
        let (desired_family_size, aspiration_offset) = match kind {
            FertilityType::Hetero => (
                Some(desired_family_size(params.desire2, rng.uniform())),
                Some(rng.uniform() * params.aspiration_offset_max),
            ),
            _ => (None, None),
        };
        Self {
            kind,
            parity: 0,
            date_of_last_birth: None,
            desired_family_size,
            aspiration_offset,
        }
    }

    #[inline]
    pub fn parity(&self) -> u32 {
        self.parity
    }

    /// Count a birth on `date`.  The most recent birth date is kept, so
    /// assigning older children during setup never moves it backwards.
    pub fn record_birth(&mut self, date: NaiveDate) {
        self.parity += 1;
        self.date_of_last_birth = Some(match self.date_of_last_birth {
            Some(prev) => prev.max(date),
            None => date,
        });
    }
}

/// Map a uniform draw to a desired completed family size.
///
/// `desire2` is the share of women wanting at most two children; the mass
/// between it and 0.95 is split evenly between three and four.
pub fn desired_family_size(desire2: f64, draw: f64) -> u32 {
    let desire3 = desire2 + (0.95 - desire2) / 2.0;
    match draw {
        d if d < 0.02 => 0,
        d if d < 0.1 => 1,
        d if d < desire2 => 2,
        d if d < desire3 => 3,
        d if d < 0.95 => 4,
        d if d < 0.98 => 5,
        _ => 6,
    }
}
