use super::config::{FormulationConfig, FormulationConfigBuilder, PenaltyWeights};
use super::error::{DecodingError, FormulationError};
use super::interpret::{self, Assignment};
use super::ranking::{self, RankedConfiguration};
use super::term::PenaltyTerms;
use crate::core::expression::{LinearExpr, QuadraticExpr};
use crate::core::graph::SiteGraph;
use crate::core::linkers::{LinkerCatalogue, VariableLayout};
use crate::core::program::{BinaryVariable, QuadraticProgram};
use crate::core::solution::Candidate;
use itertools::iproduct;
use std::collections::HashMap;
use tracing::{debug, instrument};

pub const PROGRAM_NAME: &str = "MTV Porous Material Cost Function";

const WEIGHT_ATTRIBUTE: &str = "weight";

/// Linker-assignment problem for a multivariate (MTV) framework, ready to be cast as a QUBO.
///
/// All inputs are validated when the problem is constructed, so every term builder below
/// is infallible. The problem borrows its graph and never mutates it.
#[derive(Debug, Clone)]
pub struct MtvProblem<'a> {
    graph: &'a SiteGraph,
    catalogue: LinkerCatalogue,
    layout: VariableLayout,
    required_counts: Vec<f64>,
    lengths: Vec<f64>,
    edges: Vec<(usize, usize, f64)>,
    weights: PenaltyWeights,
}

impl<'a> MtvProblem<'a> {
    /// Validates the configuration against the graph and prepares the variable layout.
    ///
    /// # Errors
    ///
    /// * [`FormulationError::Configuration`] if the linker catalogue is empty or has
    ///   duplicates, if `required_counts` or `lengths` do not have exactly one entry per
    ///   linker type, if a length is not a positive finite number, or if the graph has
    ///   no edges.
    /// * [`FormulationError::MissingAttribute`] if any edge carries no weight.
    pub fn new(graph: &'a SiteGraph, config: &FormulationConfig) -> Result<Self, FormulationError> {
        let catalogue = LinkerCatalogue::new(config.linker_types.iter().cloned())?;

        check_keys_match(&catalogue, config.required_counts.keys(), "required_counts")?;
        check_keys_match(&catalogue, config.lengths.keys(), "lengths")?;

        let required_counts: Vec<f64> = catalogue
            .iter()
            .map(|t| config.required_counts[t] as f64)
            .collect();

        let lengths = catalogue
            .iter()
            .map(|t| {
                let length = config.lengths[t];
                if length.is_finite() && length > 0.0 {
                    Ok(length)
                } else {
                    Err(FormulationError::Configuration(format!(
                        "Length of linker type '{}' must be a positive number, got {}",
                        t, length
                    )))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if graph.edge_count() == 0 {
            return Err(FormulationError::Configuration(
                "Graph has no edges; the balance term needs at least one edge".to_string(),
            ));
        }

        let edges = graph
            .edges()
            .map(|e| {
                e.weight
                    .map(|w| (e.source, e.target, w))
                    .ok_or(FormulationError::MissingAttribute {
                        from: e.source,
                        to: e.target,
                        attribute: WEIGHT_ATTRIBUTE,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let layout = VariableLayout::new(graph.site_count(), catalogue.len());

        Ok(Self {
            graph,
            catalogue,
            layout,
            required_counts,
            lengths,
            edges,
            weights: config.weights,
        })
    }

    pub fn graph(&self) -> &SiteGraph {
        self.graph
    }

    pub fn catalogue(&self) -> &LinkerCatalogue {
        &self.catalogue
    }

    pub fn layout(&self) -> VariableLayout {
        self.layout
    }

    pub fn weights(&self) -> PenaltyWeights {
        self.weights
    }

    /// `w_c · Σ_t (Σ_i q[i,t] − required[t])²`
    pub fn composition_term(&self) -> QuadraticExpr {
        let mut term = QuadraticExpr::zero();
        for (t, &required) in self.required_counts.iter().enumerate() {
            let mut count = LinearExpr::from_const(-required);
            for i in 0..self.layout.site_count() {
                count.add_term(self.layout.index(i, t), 1.0);
            }
            term.add_squared(&count, self.weights.composition);
        }
        term
    }

    /// `Σ_(i,j) weight(i,j) · (edgeValue(i,j) − mean)²`, before scaling by the balance weight.
    ///
    /// The edge value sums `length[t1]·q[i,t1] + length[t2]·q[j,t2]` over every ordered
    /// pair `(t1, t2)` of linker types, so each site contribution is counted once per type.
    pub fn balance_term(&self) -> QuadraticExpr {
        let type_count = self.layout.type_count();

        let edge_values: Vec<LinearExpr> = self
            .edges
            .iter()
            .map(|&(i, j, _)| {
                let mut value = LinearExpr::zero();
                for (t1, t2) in iproduct!(0..type_count, 0..type_count) {
                    value.add_term(self.layout.index(i, t1), self.lengths[t1]);
                    value.add_term(self.layout.index(j, t2), self.lengths[t2]);
                }
                value
            })
            .collect();

        let mean = edge_values
            .iter()
            .cloned()
            .fold(LinearExpr::zero(), |acc, v| acc + v)
            .scale(1.0 / edge_values.len() as f64);

        let mut term = QuadraticExpr::zero();
        for (value, &(_, _, weight)) in edge_values.into_iter().zip(&self.edges) {
            term.add_squared(&(value - mean.clone()), weight);
        }
        term
    }

    /// `w_o · Σ_i (Σ_t q[i,t] − 1)²`
    pub fn occupancy_term(&self) -> QuadraticExpr {
        let mut term = QuadraticExpr::zero();
        for i in 0..self.layout.site_count() {
            let mut occupied = LinearExpr::from_const(-1.0);
            for idx in self.layout.site_range(i) {
                occupied.add_term(idx, 1.0);
            }
            term.add_squared(&occupied, self.weights.occupancy);
        }
        term
    }

    fn variables(&self) -> Vec<BinaryVariable> {
        let mut variables = Vec::with_capacity(self.layout.len());
        for site in 0..self.layout.site_count() {
            for (t, label) in self.catalogue.iter().enumerate() {
                variables.push(BinaryVariable {
                    name: VariableLayout::variable_name(site, label),
                    index: self.layout.index(site, t),
                });
            }
        }
        variables
    }

    /// Assembles `composition + balance_weight · balance + occupancy` as a minimization program.
    #[instrument(skip_all, name = "formulate")]
    pub fn to_quadratic_program(&self) -> QuadraticProgram {
        let variables = self.variables();
        debug!(
            sites = self.layout.site_count(),
            linker_types = self.layout.type_count(),
            variables = variables.len(),
            "Created binary decision variables."
        );

        let mut objective = QuadraticExpr::zero();
        objective.add_scaled(&self.composition_term(), 1.0);
        objective.add_scaled(&self.balance_term(), self.weights.balance);
        objective.add_scaled(&self.occupancy_term(), 1.0);

        debug!(
            linear_terms = objective.linear.len(),
            quadratic_terms = objective.quadratic.len(),
            edges = self.edges.len(),
            "Assembled objective."
        );

        QuadraticProgram::new(PROGRAM_NAME, variables, objective)
    }

    /// Evaluates each penalty term at a binary solution vector.
    ///
    /// The balance entry already includes the balance weight, so `total()` equals the
    /// program objective at `bits`.
    pub fn penalty_terms(&self, bits: &[u8]) -> Result<PenaltyTerms, DecodingError> {
        self.check_length(bits)?;
        Ok(PenaltyTerms {
            composition: self.composition_term().evaluate(bits),
            balance: self.weights.balance * self.balance_term().evaluate(bits),
            occupancy: self.occupancy_term().evaluate(bits),
        })
    }

    pub fn interpret(&self, bits: &[u8]) -> Result<Assignment, DecodingError> {
        interpret::interpret(bits, self.layout.site_count(), &self.catalogue)
    }

    pub fn rank(&self, ensemble: &[Candidate]) -> Result<Vec<RankedConfiguration>, DecodingError> {
        ranking::rank(ensemble, self.layout.site_count(), &self.catalogue)
    }

    fn check_length(&self, bits: &[u8]) -> Result<(), DecodingError> {
        if bits.len() != self.layout.len() {
            return Err(DecodingError::LengthMismatch {
                expected: self.layout.len(),
                actual: bits.len(),
            });
        }
        Ok(())
    }
}

fn check_keys_match<'k>(
    catalogue: &LinkerCatalogue,
    keys: impl Iterator<Item = &'k String>,
    field: &str,
) -> Result<(), FormulationError> {
    let mut seen = 0;
    for key in keys {
        if !catalogue.contains(key) {
            return Err(FormulationError::Configuration(format!(
                "`{}` has an entry for '{}', which is not a known linker type",
                field, key
            )));
        }
        seen += 1;
    }
    if seen != catalogue.len() {
        let expected: Vec<&str> = catalogue.iter().collect();
        return Err(FormulationError::Configuration(format!(
            "`{}` must have an entry for every linker type {:?}",
            field, expected
        )));
    }
    Ok(())
}

/// Builds the QUBO for a linker-assignment problem with the default composition and
/// occupancy weights.
///
/// # Errors
///
/// See [`MtvProblem::new`].
pub fn formulate(
    graph: &SiteGraph,
    required_counts: &HashMap<String, u64>,
    linker_types: &[String],
    lengths: &HashMap<String, f64>,
    balance_weight: f64,
) -> Result<QuadraticProgram, FormulationError> {
    let config = FormulationConfigBuilder::new()
        .linker_types(linker_types.iter().cloned())
        .required_counts(required_counts.clone())
        .lengths(lengths.clone())
        .balance_weight(balance_weight)
        .build()
        .map_err(|e| FormulationError::Configuration(e.to_string()))?;
    Ok(MtvProblem::new(graph, &config)?.to_quadratic_program())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn config(types: &[&str], counts: &[u64], lengths: &[f64], balance: f64) -> FormulationConfig {
        FormulationConfigBuilder::new()
            .linker_types(types.iter().copied())
            .required_counts(
                types
                    .iter()
                    .zip(counts)
                    .map(|(t, &c)| (t.to_string(), c))
                    .collect(),
            )
            .lengths(
                types
                    .iter()
                    .zip(lengths)
                    .map(|(t, &l)| (t.to_string(), l))
                    .collect(),
            )
            .balance_weight(balance)
            .build()
            .unwrap()
    }

    fn two_site_graph() -> SiteGraph {
        let mut graph = SiteGraph::new(2);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph
    }

    fn three_site_path() -> SiteGraph {
        let mut graph = SiteGraph::new(3);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 2.0).unwrap();
        graph
    }

    #[test]
    fn program_has_one_variable_per_site_and_type() {
        let graph = three_site_path();
        let cfg = config(&["A", "B", "C", "D"], &[1, 1, 1, 0], &[1.0, 2.0, 3.0, 4.0], 1.0);
        let program = MtvProblem::new(&graph, &cfg).unwrap().to_quadratic_program();
        assert_eq!(program.num_variables(), 12);
        assert_eq!(program.name(), PROGRAM_NAME);
    }

    #[test]
    fn variables_are_named_in_layout_order() {
        let graph = two_site_graph();
        let cfg = config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0);
        let program = MtvProblem::new(&graph, &cfg).unwrap().to_quadratic_program();
        let names: Vec<_> = program.variables().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["q_0_A", "q_0_B", "q_1_A", "q_1_B"]);
        for (k, v) in program.variables().iter().enumerate() {
            assert_eq!(v.index, k);
        }
    }

    #[test]
    fn target_configuration_has_zero_composition_and_occupancy() {
        let graph = two_site_graph();
        let cfg = config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0);
        let problem = MtvProblem::new(&graph, &cfg).unwrap();
        let bits = [1, 0, 0, 1];

        let terms = problem.penalty_terms(&bits).unwrap();
        assert!(f64_approx_equal(terms.composition, 0.0));
        assert!(f64_approx_equal(terms.occupancy, 0.0));
        assert!(f64_approx_equal(terms.balance, 0.0));
        assert_eq!(problem.interpret(&bits).unwrap().labels(), vec!["A", "B"]);
    }

    #[test]
    fn empty_configuration_is_penalized_by_composition_and_occupancy() {
        let graph = two_site_graph();
        let cfg = config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0);
        let problem = MtvProblem::new(&graph, &cfg).unwrap();

        let terms = problem.penalty_terms(&[0, 0, 0, 0]).unwrap();
        assert!(f64_approx_equal(terms.composition, 400.0));
        assert!(f64_approx_equal(terms.occupancy, 600.0));
        assert!(f64_approx_equal(terms.total(), 1000.0));
    }

    #[test]
    fn doubly_occupied_site_is_penalized_even_when_counts_match() {
        let graph = two_site_graph();
        let cfg = config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0);
        let problem = MtvProblem::new(&graph, &cfg).unwrap();

        let terms = problem.penalty_terms(&[1, 1, 0, 0]).unwrap();
        assert!(f64_approx_equal(terms.composition, 0.0));
        assert!(f64_approx_equal(terms.occupancy, 600.0));
    }

    #[test]
    fn balance_term_counts_each_site_once_per_linker_type() {
        let graph = three_site_path();
        let cfg = config(&["A", "B"], &[2, 1], &[1.0, 2.0], 1.0);
        let problem = MtvProblem::new(&graph, &cfg).unwrap();

        // Sites A, A, B: edge values 2·1 + 2·1 = 4 and 2·1 + 2·2 = 6, mean 5.
        let terms = problem.penalty_terms(&[1, 0, 1, 0, 0, 1]).unwrap();
        assert!(f64_approx_equal(terms.balance, 1.0 * 1.0 + 2.0 * 1.0));
        assert!(f64_approx_equal(terms.composition, 0.0));
        assert!(f64_approx_equal(terms.occupancy, 0.0));
    }

    #[test]
    fn repeated_edge_does_not_change_the_balance_term() {
        let mut graph = SiteGraph::new(3);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 1.0).unwrap();
        let cfg = config(&["A", "B"], &[2, 1], &[1.0, 2.0], 1.0);
        let bits = [1, 0, 1, 0, 0, 1];
        let before = MtvProblem::new(&graph, &cfg).unwrap().penalty_terms(&bits).unwrap();

        graph.add_edge(1, 0, 1.0).unwrap();
        let after = MtvProblem::new(&graph, &cfg).unwrap().penalty_terms(&bits).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert!(f64_approx_equal(before.balance, 2.0));
        assert!(f64_approx_equal(after.balance, before.balance));
    }

    #[test]
    fn composition_and_occupancy_vanish_exactly_when_their_constraints_hold() {
        let graph = two_site_graph();
        let required = [1u32, 1];
        let cfg = config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0);
        let problem = MtvProblem::new(&graph, &cfg).unwrap();
        let layout = problem.layout();

        for mask in 0u32..16 {
            let bits: Vec<u8> = (0..4).map(|k| ((mask >> k) & 1) as u8).collect();
            let terms = problem.penalty_terms(&bits).unwrap();

            let counts_match = (0..2).all(|t| {
                let count: u32 = (0..2).map(|i| u32::from(bits[layout.index(i, t)])).sum();
                count == required[t]
            });
            let one_per_site = (0..2).all(|i| {
                layout.site_range(i).map(|k| u32::from(bits[k])).sum::<u32>() == 1
            });

            assert_eq!(f64_approx_equal(terms.composition, 0.0), counts_match, "bits {:?}", bits);
            assert_eq!(f64_approx_equal(terms.occupancy, 0.0), one_per_site, "bits {:?}", bits);
        }
    }

    #[test]
    fn balance_weight_scales_only_the_balance_term() {
        let graph = three_site_path();
        let bits = [1, 0, 1, 0, 0, 1];

        let half = config(&["A", "B"], &[2, 1], &[1.0, 2.0], 0.5);
        let terms = MtvProblem::new(&graph, &half).unwrap().penalty_terms(&bits).unwrap();
        assert!(f64_approx_equal(terms.balance, 1.5));

        let off = config(&["A", "B"], &[2, 1], &[1.0, 2.0], 0.0);
        let terms = MtvProblem::new(&graph, &off).unwrap().penalty_terms(&bits).unwrap();
        assert!(f64_approx_equal(terms.balance, 0.0));
    }

    #[test]
    fn program_objective_equals_sum_of_penalty_terms_for_every_vector() {
        let graph = three_site_path();
        let cfg = config(&["A", "B"], &[2, 1], &[1.0, 2.0], 0.7);
        let problem = MtvProblem::new(&graph, &cfg).unwrap();
        let program = problem.to_quadratic_program();

        for mask in 0u32..(1 << 6) {
            let bits: Vec<u8> = (0..6).map(|k| ((mask >> k) & 1) as u8).collect();
            let objective = program.evaluate(&bits).unwrap();
            let terms = problem.penalty_terms(&bits).unwrap();
            assert!(f64_approx_equal(objective, terms.total()));
        }
    }

    #[test]
    fn target_configuration_minimizes_the_objective() {
        let graph = two_site_graph();
        let cfg = config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0);
        let program = MtvProblem::new(&graph, &cfg).unwrap().to_quadratic_program();
        let optimum = program.evaluate(&[1, 0, 0, 1]).unwrap();
        for mask in 0u32..16 {
            let bits: Vec<u8> = (0..4).map(|k| ((mask >> k) & 1) as u8).collect();
            assert!(program.evaluate(&bits).unwrap() >= optimum - TOLERANCE);
        }
    }

    #[test]
    fn formulation_does_not_mutate_the_graph() {
        let graph = three_site_path();
        let before = graph.clone();
        let cfg = config(&["A", "B"], &[2, 1], &[1.0, 2.0], 1.0);
        let _ = MtvProblem::new(&graph, &cfg).unwrap().to_quadratic_program();
        assert_eq!(graph, before);
    }

    #[test]
    fn graph_without_edges_is_a_configuration_error() {
        let graph = SiteGraph::new(3);
        let cfg = config(&["A", "B"], &[2, 1], &[1.0, 2.0], 1.0);
        let result = MtvProblem::new(&graph, &cfg);
        assert!(matches!(result, Err(FormulationError::Configuration(_))));
    }

    #[test]
    fn edge_without_weight_is_a_missing_attribute_error() {
        let mut graph = SiteGraph::new(3);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_unweighted_edge(1, 2).unwrap();
        let cfg = config(&["A", "B"], &[2, 1], &[1.0, 2.0], 1.0);
        let result = MtvProblem::new(&graph, &cfg);
        assert_eq!(
            result.err(),
            Some(FormulationError::MissingAttribute {
                from: 1,
                to: 2,
                attribute: "weight"
            })
        );
    }

    #[test]
    fn required_count_for_unknown_type_is_a_configuration_error() {
        let graph = two_site_graph();
        let mut cfg = config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0);
        cfg.required_counts.insert("Z".to_string(), 0);
        let result = MtvProblem::new(&graph, &cfg);
        assert!(matches!(result, Err(FormulationError::Configuration(msg)) if msg.contains("'Z'")));
    }

    #[test]
    fn missing_length_is_a_configuration_error() {
        let graph = two_site_graph();
        let mut cfg = config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0);
        cfg.lengths.remove("B");
        let result = MtvProblem::new(&graph, &cfg);
        assert!(matches!(result, Err(FormulationError::Configuration(msg)) if msg.contains("lengths")));
    }

    #[test]
    fn non_positive_length_is_a_configuration_error() {
        let graph = two_site_graph();
        let cfg = config(&["A", "B"], &[1, 1], &[1.0, 0.0], 1.0);
        let result = MtvProblem::new(&graph, &cfg);
        assert!(matches!(result, Err(FormulationError::Configuration(_))));
    }

    #[test]
    fn empty_linker_catalogue_is_a_configuration_error() {
        let graph = two_site_graph();
        let cfg = config(&[], &[], &[], 1.0);
        let result = MtvProblem::new(&graph, &cfg);
        assert!(matches!(result, Err(FormulationError::Configuration(_))));
    }

    #[test]
    fn reserved_empty_site_label_is_a_configuration_error() {
        let graph = two_site_graph();
        let cfg = config(&["A", "-"], &[1, 1], &[1.0, 2.0], 1.0);
        let result = MtvProblem::new(&graph, &cfg);
        assert!(matches!(result, Err(FormulationError::Configuration(msg)) if msg.contains("'-'")));
    }

    #[test]
    fn penalty_terms_reject_wrong_length() {
        let graph = two_site_graph();
        let cfg = config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0);
        let problem = MtvProblem::new(&graph, &cfg).unwrap();
        assert_eq!(
            problem.penalty_terms(&[1, 0, 0]),
            Err(DecodingError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn formulate_matches_problem_built_with_default_weights() {
        let graph = two_site_graph();
        let types = vec!["A".to_string(), "B".to_string()];
        let counts = HashMap::from([("A".to_string(), 1), ("B".to_string(), 1)]);
        let lengths = HashMap::from([("A".to_string(), 1.0), ("B".to_string(), 2.0)]);

        let program = formulate(&graph, &counts, &types, &lengths, 1.0).unwrap();
        let expected = MtvProblem::new(&graph, &config(&["A", "B"], &[1, 1], &[1.0, 2.0], 1.0))
            .unwrap()
            .to_quadratic_program();
        assert_eq!(program, expected);
    }

    #[test]
    fn formulate_fails_on_empty_graph_before_creating_variables() {
        let graph = SiteGraph::new(2);
        let types = vec!["A".to_string()];
        let counts = HashMap::from([("A".to_string(), 1)]);
        let lengths = HashMap::from([("A".to_string(), 1.0)]);
        let result = formulate(&graph, &counts, &types, &lengths, 1.0);
        assert!(matches!(result, Err(FormulationError::Configuration(_))));
    }
}
