use super::expression::QuadraticExpr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("Expected a binary vector of length {expected}, got {actual}")]
pub struct DimensionMismatch {
    pub expected: usize,
    pub actual: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryVariable {
    pub name: String,
    pub index: usize,
}

/// A binary quadratic program: named 0/1 variables and a quadratic objective to minimize.
///
/// Instances are assembled by the formulator and handed unchanged to an external solver.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticProgram {
    name: String,
    variables: Vec<BinaryVariable>,
    objective: QuadraticExpr,
}

impl QuadraticProgram {
    /// Creates a program from a variable list and objective.
    ///
    /// Variable `k` of `variables` must carry index `k`; the objective must only
    /// reference indices below `variables.len()`.
    pub fn new(
        name: impl Into<String>,
        variables: Vec<BinaryVariable>,
        objective: QuadraticExpr,
    ) -> Self {
        debug_assert!(variables.iter().enumerate().all(|(k, v)| v.index == k));
        debug_assert!(objective.max_index().is_none_or(|m| m < variables.len()));
        Self {
            name: name.into(),
            variables,
            objective,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[BinaryVariable] {
        &self.variables
    }

    pub fn variable(&self, index: usize) -> Option<&BinaryVariable> {
        self.variables.get(index)
    }

    pub fn objective(&self) -> &QuadraticExpr {
        &self.objective
    }

    /// Evaluates the objective at a binary assignment of all variables.
    pub fn evaluate(&self, bits: &[u8]) -> Result<f64, DimensionMismatch> {
        if bits.len() != self.variables.len() {
            return Err(DimensionMismatch {
                expected: self.variables.len(),
                actual: bits.len(),
            });
        }
        Ok(self.objective.evaluate(bits))
    }
}
