//! `pd-fertility` — who gives birth, and when.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`context`]     | `FertilityContext<'a>` — read-only step snapshot for decisions  |
//! | [`policy`]      | `FertilityPolicy` trait                                         |
//! | [`model`]       | `FertilityModel` — the eight configured variants                |
//! | [`infertile`]   | `Infertile` — policy that never produces a birth                |
//! | [`inheritance`] | correlated-normal skill inheritance for newborns                |
//!
//! # Design notes
//!
//! Deciding and applying a birth are separate:
//!
//! 1. **Decide**: the population builds a [`FertilityContext`] over the
//!    agent store and asks the policy whether the mother gives birth.  The
//!    policy only reads.
//!
//! 2. **Apply**: if the answer is yes, the population creates the newborn,
//!    updates the mother's `FertilityState`, the birth-year counters and
//!    notifies the statistics observer.
//!
//! The per-agent reproductive state (`FertilityState`) lives in `pd-agent`
//! because it is part of the agent record.

pub mod context;
pub mod infertile;
pub mod inheritance;
pub mod model;
pub mod policy;

#[cfg(test)]
mod tests;

pub use context::FertilityContext;
pub use infertile::Infertile;
pub use inheritance::inherited_skill;
pub use model::FertilityModel;
pub use policy::FertilityPolicy;
