//! `pd-core` — foundational types for the `popdyn` population simulator.
//!
//! This crate is a dependency of every other `pd-*` crate.  It intentionally
//! has no `pd-*` dependencies.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `JobId`                                    |
//! | [`time`]        | `Clock`, `Timestep`, `StepSetting`, `age_in_years`    |
//! | [`params`]      | `Params`, `ProdType`, `FertilityType`, `AppCriteria`  |
//! | [`hazard`]      | Gompertz, partnering, Hadwiger and related curves     |
//! | [`cohort`]      | `RelativeCohortSizes` and its Gaussian smoothing      |
//! | [`wage`]        | `ProductivityFn` (the market-wide productivity curve) |
//! | [`rng`]         | `SimRng` (the single run-wide generator)              |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |

pub mod cohort;
pub mod error;
pub mod hazard;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;
pub mod wage;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cohort::RelativeCohortSizes;
pub use error::{ConfigError, ConfigResult};
pub use ids::{AgentId, JobId};
pub use params::{AppCriteria, FertilityType, Params, ProdType};
pub use rng::SimRng;
pub use time::{Clock, StepSetting, Timestep, age_in_years};
pub use wage::ProductivityFn;

/// First working age covered by the per-age feedback tables.
pub const MIN_WORKING_AGE: i32 = 15;

/// One past the last working age covered by the per-age feedback tables.
pub const MAX_WORKING_AGE: i32 = 70;

/// Number of entries in a per-working-age table (ages 15..=69).
pub const WORKING_AGE_SPAN: usize = (MAX_WORKING_AGE - MIN_WORKING_AGE) as usize;
