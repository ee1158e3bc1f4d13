use super::problem::ProblemDefinition;
use crate::core::program::QuadraticProgram;
use crate::engine::error::EngineError;
use crate::engine::formulation::MtvProblem;
use tracing::{info, instrument};

#[instrument(skip_all, name = "formulation_workflow")]
pub fn run(definition: &ProblemDefinition) -> Result<QuadraticProgram, EngineError> {
    info!(
        sites = definition.graph.site_count(),
        edges = definition.graph.edge_count(),
        linker_types = definition.config.linker_types.len(),
        "Formulating linker-assignment QUBO."
    );

    let problem = MtvProblem::new(&definition.graph, &definition.config)?;
    let program = problem.to_quadratic_program();

    info!(
        variables = program.num_variables(),
        "Quadratic program assembled."
    );
    Ok(program)
}
