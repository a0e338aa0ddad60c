//! `pd-agent` — agent state and storage for the `popdyn` simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `Agent`, `Sex`, `SexBehaviour`, `StepEnv`, `StepOutcome`  |
//! | [`employment`]  | `Employment`, `Offer`                                     |
//! | [`fertility`]   | `FertilityState` (parity, birth spacing, family goals)    |
//! | [`store`]       | `AgentStore` (id-indexed, membership = alive)             |
//! | [`factory`]     | `AgentFactory` (initial population and newborns)          |
//!
//! Agents refer to each other by `AgentId` only.  Nothing here owns another
//! agent; cross-agent bookkeeping (partnerships, mothers, jobs) is done by
//! the population and the labour market, which hold the store.

pub mod agent;
pub mod employment;
pub mod factory;
pub mod fertility;
pub mod store;

#[cfg(test)]
mod tests;

pub use agent::{Agent, Sex, SexBehaviour, StepEnv, StepOutcome};
pub use employment::{Employment, Offer};
pub use factory::AgentFactory;
pub use fertility::FertilityState;
pub use store::AgentStore;
