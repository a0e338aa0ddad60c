//! `pd-sim` — the population simulation driver.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`population`]  | `Population`: demographic update and matching           |
//! | [`setup`]       | Seeding the initial population and job pool             |
//! | [`cohorts`]     | `BirthCohorts` (births per calendar year)               |
//! | [`metrics`]     | `PopulationSummary` and per-step statistics             |
//! | [`observer`]    | `StatsObserver`, `Publisher`, `LifeEvent`               |
//! | [`sim`]         | `Sim<F>` and its step loop                              |
//! | [`builder`]     | `SimBuilder<F>`                                         |
//! | [`error`]       | `SimError`, `SimResult`                                 |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use pd_core::Params;
//! use pd_sim::{NoopObserver, SimBuilder};
//!
//! let params = Params::from_json_str(r#"{ "pop_size": 1000 }"#)?;
//! let mut sim = SimBuilder::new(params).seed(7).build()?;
//! sim.run(50, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod cohorts;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod population;
pub mod setup;
pub mod sim;


pub use builder::SimBuilder;
pub use cohorts::BirthCohorts;
pub use error::{SimError, SimResult};
pub use metrics::PopulationSummary;
pub use observer::{LifeEvent, NoopObserver, Publisher, StatsObserver};
pub use population::Population;
pub use sim::Sim;
