use pd_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot set up a simulation with an empty initial population")]
    EmptyPopulation,
}

pub type SimResult<T> = Result<T, SimError>;
