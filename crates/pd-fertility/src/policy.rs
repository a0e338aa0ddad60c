//! The `FertilityPolicy` trait — the extension point for birth decisions.

use pd_core::{AgentId, SimRng};

use crate::FertilityContext;

/// Pluggable reproductive behaviour.
///
/// Called by the population for every female agent inside her fertile ages,
/// once per step, after her own `step_activity`.  Returning `true` asks the
/// population to apply a birth; the policy itself never mutates anything.
///
/// # Required methods
///
/// Only [`reproductive_behaviour`][Self::reproductive_behaviour] is required.
/// [`family_formation_ok`][Self::family_formation_ok] defaults to "always",
/// which is right for policies without a first-birth income condition.
pub trait FertilityPolicy {
    /// Does `mother` give birth this step?
    ///
    /// A `mother` no longer in `ctx.agents` never does.
    fn reproductive_behaviour(
        &self,
        mother: AgentId,
        ctx:    &FertilityContext<'_>,
        rng:    &mut SimRng,
    ) -> bool;

    /// Would `mother`'s household pass the first-birth condition today?
    ///
    /// Used during population setup to decide who may already be a mother.
    fn family_formation_ok(
        &self,
        _mother: AgentId,
        _ctx:    &FertilityContext<'_>,
        _rng:    &mut SimRng,
    ) -> bool {
        true
    }
}
