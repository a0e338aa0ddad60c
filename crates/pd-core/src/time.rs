//! Calendar clock.
//!
//! # Design
//!
//! Simulated time is a calendar date (`chrono::NaiveDate`) advanced by a
//! whole number of days each step.  The length of the *upcoming* step is
//! computed from the current date and the configured granularity:
//!
//! | Granularity   | Step length                                         |
//! |---------------|-----------------------------------------------------|
//! | `Year`        | 365, or 366 when the current year is a leap year    |
//! | `Month`       | calendar length of the current month                |
//! | `Days(n)`     | `n`                                                 |
//!
//! Monthly steps are measured from the current date, not snapped to the first
//! of the month.  A run starting on the 29th–31st therefore drifts out of
//! calendar alignment (31 Jan + 31 days = 3 Mar).  This is accepted behaviour;
//! construction logs a warning when it applies.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── StepSetting ──────────────────────────────────────────────────────────────

/// The raw `timestep` parameter: a keyword or an integer number of days.
///
/// Validated into a [`Timestep`] by [`Clock::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepSetting {
    Days(i64),
    Keyword(String),
}

impl Default for StepSetting {
    fn default() -> Self {
        StepSetting::Keyword("year".to_owned())
    }
}

impl StepSetting {
    /// Resolve to a [`Timestep`], rejecting unknown keywords and non-positive
    /// day counts.
    pub fn resolve(&self) -> ConfigResult<Timestep> {
        match self {
            StepSetting::Keyword(k) => match k.trim() {
                "year" => Ok(Timestep::Year),
                "month" => Ok(Timestep::Month),
                other => other
                    .parse::<u32>()
                    .ok()
                    .filter(|&n| n > 0)
                    .map(Timestep::Days)
                    .ok_or_else(|| ConfigError::Timestep(k.clone())),
            },
            StepSetting::Days(n) => u32::try_from(*n)
                .ok()
                .filter(|&n| n > 0)
                .map(Timestep::Days)
                .ok_or_else(|| ConfigError::Timestep(n.to_string())),
        }
    }
}

// ── Timestep ──────────────────────────────────────────────────────────────────

/// Validated step granularity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Timestep {
    Year,
    Month,
    Days(u32),
}

impl Timestep {
    /// Length in days of a step starting on `date`.
    pub fn length_from(self, date: NaiveDate) -> i64 {
        match self {
            Timestep::Year => {
                if is_leap_year(date.year()) {
                    366
                } else {
                    365
                }
            }
            Timestep::Month => days_in_month(date.year(), date.month()),
            Timestep::Days(n) => n as i64,
        }
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestep::Year => f.write_str("year"),
            Timestep::Month => f.write_str("month"),
            Timestep::Days(n) => write!(f, "{n} days"),
        }
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Tracks the current simulated date and the length of the upcoming step.
#[derive(Clone, Debug)]
pub struct Clock {
    start_date:  NaiveDate,
    date:        NaiveDate,
    timestep:    Timestep,
    step_length: i64,
}

impl Clock {
    /// Build a clock from the `start_date` and `timestep` parameters.
    pub fn new(start_date: &str, timestep: &StepSetting) -> ConfigResult<Self> {
        let start_date = parse_date(start_date)?;
        let timestep = timestep.resolve()?;

        if timestep == Timestep::Month && start_date.day() > 28 {
            tracing::warn!(
                %start_date,
                "starting near the end of a month makes monthly timesteps drift out of calendar alignment"
            );
        }
        if let Timestep::Days(n) = timestep {
            tracing::info!(days = n, "timestep given in days");
        }

        Ok(Self {
            start_date,
            date: start_date,
            timestep,
            step_length: timestep.length_from(start_date),
        })
    }

    /// Current simulated date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[inline]
    pub fn timestep(&self) -> Timestep {
        self.timestep
    }

    /// Length in days of the step that starts at the current date.
    #[inline]
    pub fn step_length_days(&self) -> i64 {
        self.step_length
    }

    /// The upcoming step as a fraction of a `year_length`-day year.  Used to
    /// scale annual hazards down to one step.
    #[inline]
    pub fn year_fraction(&self, year_length: f64) -> f64 {
        self.step_length as f64 / year_length
    }

    /// Advance the date by one step, then recompute the next step's length.
    pub fn step_forward(&mut self) {
        self.date += Duration::days(self.step_length);
        self.step_length = self.timestep.length_from(self.date);
    }

    /// Days elapsed since the start date.
    pub fn days_since_start(&self) -> i64 {
        (self.date - self.start_date).num_days()
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (next step {} days)", self.date, self.step_length)
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// Parse an ISO `YYYY-mm-dd` date.
pub fn parse_date(s: &str) -> ConfigResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ConfigError::StartDate(s.to_owned()))
}

/// Whole years between `dob` and `today`, birthday-aware.
///
/// Negative when `dob` lies in the future (a newborn whose birth falls inside
/// the current step).
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday = (today.month(), today.day()) < (dob.month(), dob.day());
    today.year() - dob.year() - before_birthday as i32
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Calendar length of `month` in `year`.
pub fn days_in_month(year: i32, month: u32) -> i64 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}
