//! `StatisticsCollector<W>` — bridges `StatsObserver` to an `OutputWriter`.

use chrono::NaiveDate;
use pd_agent::Agent;
use pd_sim::{LifeEvent, PopulationSummary, Publisher, StatsObserver};

use crate::row::{EventRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`StatsObserver`] that writes one summary row per step and every life
/// event to any [`OutputWriter`].
///
/// The population is published before the labour market each step; its
/// summary is held until the market arrives and the row is complete.
/// Events are buffered and written in a batch with the row.
///
/// Errors from the writer are stored internally because `StatsObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct StatisticsCollector<W: OutputWriter> {
    writer:     W,
    pending:    Option<PopulationSummary>,
    events:     Vec<EventRow>,
    steps:      usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> StatisticsCollector<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: None, events: Vec::new(), steps: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Steps written so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "statistics write failed");
                self.last_error = Some(e);
            }
        }
    }

    fn flush_events(&mut self) {
        if self.events.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.events);
        self.events.clear();
        self.store_err(result);
    }
}

impl<W: OutputWriter> StatsObserver for StatisticsCollector<W> {
    fn record_event(&mut self, agent: &Agent, event: LifeEvent, date: NaiveDate) {
        self.events.push(EventRow {
            date,
            agent_id: agent.id.0,
            event: event.as_str(),
            age: agent.age_years,
            parity: agent.parity(),
        });
    }

    fn record_stats(&mut self, publisher: Publisher<'_>, date: NaiveDate) {
        match publisher {
            Publisher::Population(population) => {
                self.pending = Some(population.summary());
            }
            Publisher::LabourMarket { market, agents } => {
                let Some(pop) = self.pending.take() else {
                    tracing::warn!(%date, "labour market published without a population summary");
                    return;
                };
                let jobs = market.summary(agents);
                let row = StepSummaryRow {
                    date,
                    population: pop.population,
                    births: pop.births,
                    deaths: pop.deaths,
                    labour_force: pop.labour_force,
                    unemployment: pop.unemployment,
                    youth_unemployment: pop.youth_unemployment,
                    partnered: pop.partnered,
                    benefit_level: pop.benefit_level,
                    jobs: jobs.jobs,
                    vacancy_rate: jobs.vacancy_rate,
                    mean_wage: jobs.mean_wage,
                };
                self.flush_events();
                let result = self.writer.write_step_summary(&row);
                self.store_err(result);
                self.steps += 1;
            }
        }
    }

    fn on_sim_end(&mut self, _date: NaiveDate) {
        self.flush_events();
        let result = self.writer.finish();
        self.store_err(result);
    }
}
