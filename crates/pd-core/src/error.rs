//! Configuration error type.
//!
//! Every configuration problem surfaces when a component is constructed,
//! never mid-run.  Invariant violations are not represented here: they are
//! programming errors and abort via `assert!`.

use thiserror::Error;

/// Errors raised while loading parameters or constructing a component from
/// them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid start date {0:?}: please use YYYY-mm-dd format")]
    StartDate(String),

    #[error("invalid timestep {0:?}: must be \"year\", \"month\", or a positive number of days")]
    Timestep(String),

    #[error("unrecognised {key} {value:?}: expected one of {expected}")]
    UnknownSelector {
        key:      &'static str,
        value:    String,
        expected: &'static str,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        key:    &'static str,
        reason: String,
    },

    #[error("parameter parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for configuration-time operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
