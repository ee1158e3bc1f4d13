use mtvqubo::core::io::samples::SampleLoadError;
use mtvqubo::core::solution::InvalidBit;
use mtvqubo::engine::error::EngineError;
use mtvqubo::workflows::problem::ProblemLoadError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Problem(#[from] ProblemLoadError),

    #[error(transparent)]
    Samples(#[from] SampleLoadError),

    #[error("Invalid bitstring: {0}")]
    Bits(#[from] InvalidBit),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
