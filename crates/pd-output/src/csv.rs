//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `step_summaries.csv`
//! - `events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, StepSummaryRow};

pub const SUMMARY_HEADER: [&str; 12] = [
    "date",
    "population",
    "births",
    "deaths",
    "labour_force",
    "unemployment",
    "youth_unemployment",
    "partnered",
    "benefit_level",
    "jobs",
    "vacancy_rate",
    "mean_wage",
];

pub const EVENT_HEADER: [&str; 5] = ["date", "agent_id", "event", "age", "parity"];

/// Writes statistics to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        Ok(Self { summaries, events, finished: false })
    }
}

/// Undefined rates become empty cells.
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.date.to_string(),
                row.agent_id.to_string(),
                row.event.to_owned(),
                row.age.to_string(),
                row.parity.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.date.to_string(),
            row.population.to_string(),
            row.births.to_string(),
            row.deaths.to_string(),
            row.labour_force.to_string(),
            cell(row.unemployment),
            cell(row.youth_unemployment),
            row.partnered.to_string(),
            row.benefit_level.to_string(),
            row.jobs.to_string(),
            cell(row.vacancy_rate),
            cell(row.mean_wage),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
