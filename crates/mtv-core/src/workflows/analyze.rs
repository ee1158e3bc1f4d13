use super::problem::ProblemDefinition;
use crate::core::solution::{Candidate, format_bitstring};
use crate::engine::error::{DecodingError, EngineError};
use crate::engine::formulation::MtvProblem;
use crate::engine::interpret::Assignment;
use crate::engine::term::PenaltyTerms;
use crate::presentation::palette;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSolution {
    pub assignment: Assignment,
    pub penalties: PenaltyTerms,
    pub node_colors: Vec<&'static str>,
    pub legend: Vec<(String, &'static str)>,
    pub edge_scale: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedReport {
    pub label: String,
    pub bitstring: String,
    pub probability: f64,
    pub objective: f64,
}

/// Decodes a single solution vector and scores it against every penalty term.
#[instrument(skip_all, name = "decode_workflow")]
pub fn decode(definition: &ProblemDefinition, bits: &[u8]) -> Result<DecodedSolution, EngineError> {
    let problem = MtvProblem::new(&definition.graph, &definition.config)?;
    let assignment = problem.interpret(bits)?;
    let penalties = problem.penalty_terms(bits)?;

    info!(
        objective = penalties.total(),
        "Decoded solution {}.",
        assignment
    );

    Ok(DecodedSolution {
        node_colors: palette::node_colors(&assignment),
        legend: palette::legend(&assignment),
        edge_scale: palette::edge_weight_scale(&definition.graph),
        assignment,
        penalties,
    })
}

/// Ranks a solver ensemble by probability, keeping at most `top` entries when given.
#[instrument(skip_all, name = "rank_workflow")]
pub fn rank(
    definition: &ProblemDefinition,
    ensemble: &[Candidate],
    top: Option<usize>,
) -> Result<Vec<RankedReport>, EngineError> {
    let problem = MtvProblem::new(&definition.graph, &definition.config)?;
    let mut ranked = problem.rank(ensemble)?;
    if let Some(n) = top {
        ranked.truncate(n);
    }

    let program = problem.to_quadratic_program();
    let bars = palette::histogram(&ranked);
    let mut reports = Vec::with_capacity(ranked.len());
    for (entry, (label, probability)) in ranked.iter().zip(bars) {
        reports.push(RankedReport {
            label,
            bitstring: format_bitstring(&entry.bits),
            probability,
            objective: program.evaluate(&entry.bits).map_err(DecodingError::from)?,
        });
    }

    info!(
        candidates = ensemble.len(),
        reported = reports.len(),
        "Ranked solver ensemble."
    );
    Ok(reports)
}
