use crate::core::linkers::CatalogueError;
use crate::core::program::DimensionMismatch;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum FormulationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Edge ({from}, {to}) is missing required attribute '{attribute}'")]
    MissingAttribute {
        from: usize,
        to: usize,
        attribute: &'static str,
    },
}

impl From<CatalogueError> for FormulationError {
    fn from(e: CatalogueError) -> Self {
        FormulationError::Configuration(e.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum DecodingError {
    #[error("Solution vector has length {actual}, expected {expected} (sites × linker types)")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Candidate {index} has invalid probability {value}; probabilities must be non-negative")]
    InvalidProbability { index: usize, value: f64 },
}

impl From<DimensionMismatch> for DecodingError {
    fn from(e: DimensionMismatch) -> Self {
        DecodingError::LengthMismatch {
            expected: e.expected,
            actual: e.actual,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Formulation failed: {source}")]
    Formulation {
        #[from]
        source: FormulationError,
    },

    #[error("Decoding failed: {source}")]
    Decoding {
        #[from]
        source: DecodingError,
    },
}
