//! Plain data row types written by output backends.

use chrono::NaiveDate;

/// Population and labour-market statistics for one step.
///
/// Rates that are undefined for the step (no workforce, no jobs, nobody
/// employed) are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSummaryRow {
    pub date:               NaiveDate,
    pub population:         usize,
    pub births:             usize,
    pub deaths:             usize,
    pub labour_force:       usize,
    pub unemployment:       Option<f64>,
    pub youth_unemployment: Option<f64>,
    pub partnered:          usize,
    pub benefit_level:      f64,
    pub jobs:               usize,
    pub vacancy_rate:       Option<f64>,
    pub mean_wage:          Option<f64>,
}

/// One life event of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub date:     NaiveDate,
    pub agent_id: u32,
    pub event:    &'static str,
    pub age:      i32,
    /// Parity after the event.
    pub parity:   u32,
}
