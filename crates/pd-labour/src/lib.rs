//! `pd-labour` — the labour market.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`config`]   | `MarketConfig` — the market's slice of `Params`                  |
//! | [`job`]      | `Job` — difficulty, experience floor, applicants, occupant       |
//! | [`market`]   | `LabourMarket` — job pool, vacancies, wages, growth, fill/vacate |
//! | [`matching`] | applications, offers and offer resolution                        |
//! | [`metrics`]  | `MarketSummary` and wage distributions for statistics            |
//!
//! # Matching protocol
//!
//! Each step runs three phases over the vacancy list, driven by the
//! population:
//!
//! 1. **Application**: every seeker sends `Poisson(mean · year_fraction)`
//!    applications to distinct random vacancies.
//! 2. **Offer**: every vacancy scores its applicants by the configured
//!    criterion and sends one conditional offer to the best, unless the best
//!    value is negative.  Applicant lists are always cleared.
//! 3. **Resolution**: every agent holding offers takes the highest wage;
//!    an employed agent switches only for a strictly higher wage.
//!
//! # Ownership
//!
//! A job's occupant and the agent's `Employment::job` always name each
//! other.  Only this crate writes either side, through
//! [`LabourMarket::fill`], [`LabourMarket::vacate`] and job destruction.

pub mod config;
pub mod job;
pub mod market;
pub mod matching;
pub mod metrics;

#[cfg(test)]
mod tests;

pub use config::MarketConfig;
pub use job::Job;
pub use market::LabourMarket;
pub use metrics::MarketSummary;
