use pd_core::{AgentId, SimRng};

use crate::{FertilityContext, FertilityPolicy};

/// A policy under which nobody gives birth.
///
/// Useful for closed-population runs and for tests that track a fixed
/// cohort.
pub struct Infertile;

impl FertilityPolicy for Infertile {
    fn reproductive_behaviour(&self, _: AgentId, _: &FertilityContext<'_>, _: &mut SimRng) -> bool {
        false
    }
}
