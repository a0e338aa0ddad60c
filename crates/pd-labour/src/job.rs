//! A single job slot.

use pd_core::AgentId;

#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    /// Technological difficulty, `U(0, difficulty_bound)`.
    pub difficulty: f64,
    /// Minimum experience in days an applicant must have, when the market
    /// runs with experience floors.
    pub experience_floor: Option<f64>,
    pub(crate) applicants: Vec<AgentId>,
    pub(crate) occupant:   Option<AgentId>,
}

impl Job {
    pub fn new(difficulty: f64, experience_floor: Option<f64>) -> Self {
        Self { difficulty, experience_floor, applicants: Vec::new(), occupant: None }
    }

    #[inline]
    pub fn occupant(&self) -> Option<AgentId> {
        self.occupant
    }

    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.occupant.is_none()
    }

    /// Applications received since the last offer phase.
    #[inline]
    pub fn applicants(&self) -> &[AgentId] {
        &self.applicants
    }

    /// The applicant meets the experience floor.
    #[inline]
    pub fn accepts(&self, experience_days: i64) -> bool {
        self.experience_floor.is_none_or(|floor| experience_days as f64 >= floor)
    }

    /// Worth applying to: meets the floor, and is not hugely over-qualified
    /// unless this is a top-end job.
    pub fn suits(&self, experience_days: i64, exp_max: f64, year_length: f64) -> bool {
        match self.experience_floor {
            None => true,
            Some(floor) => {
                let exp = experience_days as f64;
                floor <= exp && (exp - floor < 4.0 * year_length || floor > (exp_max - 4.0) * year_length)
            }
        }
    }
}
