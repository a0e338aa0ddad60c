//! Statistics hooks for data collection.

use chrono::NaiveDate;
use pd_agent::{Agent, AgentStore};
use pd_labour::LabourMarket;

use crate::Population;

/// Discrete events reported as they happen.  Deaths are not reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LifeEvent {
    Birth,
    FirstBirth,
}

impl LifeEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            LifeEvent::Birth => "birth",
            LifeEvent::FirstBirth => "first_birth",
        }
    }
}

/// The object a periodic snapshot is taken of.
#[derive(Copy, Clone)]
pub enum Publisher<'a> {
    Population(&'a Population),
    /// Wages live on the agents, so the market is published with them.
    LabourMarket {
        market: &'a LabourMarket,
        agents: &'a AgentStore,
    },
}

/// Callbacks invoked by [`Sim`][crate::Sim] while it runs.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Call timing
///
/// - `record_event` fires inside the population update, the moment the
///   event happens.  `agent` is the mother for births.
/// - `record_stats` fires twice per step, population first, after all of
///   that step's mutation and before the clock advances.
/// - `on_sim_end` fires once after the last step of a `run`.
pub trait StatsObserver {
    fn record_event(&mut self, _agent: &Agent, _event: LifeEvent, _date: NaiveDate) {}

    fn record_stats(&mut self, _publisher: Publisher<'_>, _date: NaiveDate) {}

    fn on_sim_end(&mut self, _date: NaiveDate) {}
}

/// A [`StatsObserver`] that does nothing.
pub struct NoopObserver;

impl StatsObserver for NoopObserver {}
