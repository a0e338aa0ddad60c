//! `pd-output` — statistics sinks for the popdyn simulator.
//!
//! | File                 | One row per                                      |
//! |----------------------|--------------------------------------------------|
//! | `step_summaries.csv` | simulation step (population and labour market)   |
//! | `events.csv`         | birth or first birth                             |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`StatisticsCollector`], which implements `pd_sim::StatsObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pd_output::{CsvWriter, StatisticsCollector};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut stats = StatisticsCollector::new(writer);
//! sim.run(100, &mut stats)?;
//! if let Some(e) = stats.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatisticsCollector;
pub use row::{EventRow, StepSummaryRow};
pub use writer::OutputWriter;
