use crate::core::graph::{GraphError, SiteGraph};
use crate::engine::config::{FormulationConfig, PenaltyWeights};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProblemLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid graph in problem file: {0}")]
    Graph(#[from] GraphError),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LinkerSection {
    pub types: Vec<String>,
    pub required_counts: HashMap<String, u64>,
    pub lengths: HashMap<String, f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EdgeEntry {
    pub source: usize,
    pub target: usize,
    pub weight: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GraphSection {
    pub sites: usize,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PenaltySection {
    pub composition: Option<f64>,
    pub occupancy: Option<f64>,
    pub balance: Option<f64>,
}

/// On-disk description of a linker-assignment problem.
///
/// ```toml
/// [linkers]
/// types = ["A", "B"]
/// required-counts = { A = 1, B = 1 }
/// lengths = { A = 1.0, B = 2.0 }
///
/// [graph]
/// sites = 2
/// edges = [{ source = 0, target = 1, weight = 1.0 }]
///
/// [penalties]
/// balance = 0.5
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProblemFile {
    pub linkers: LinkerSection,
    pub graph: GraphSection,
    #[serde(default)]
    pub penalties: PenaltySection,
}

/// A graph plus the formulation settings that apply to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemDefinition {
    pub graph: SiteGraph,
    pub config: FormulationConfig,
}

impl ProblemFile {
    pub fn load(path: &Path) -> Result<Self, ProblemLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProblemLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ProblemLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Builds the graph and formulation config, filling unset penalty weights with defaults.
    pub fn into_definition(self) -> Result<ProblemDefinition, ProblemLoadError> {
        let mut graph = SiteGraph::new(self.graph.sites);
        for edge in self.graph.edges {
            match edge.weight {
                Some(w) => graph.add_edge(edge.source, edge.target, w)?,
                None => graph.add_unweighted_edge(edge.source, edge.target)?,
            }
        }

        let defaults = PenaltyWeights::default();
        let config = FormulationConfig {
            linker_types: self.linkers.types,
            required_counts: self.linkers.required_counts,
            lengths: self.linkers.lengths,
            weights: PenaltyWeights {
                composition: self.penalties.composition.unwrap_or(defaults.composition),
                occupancy: self.penalties.occupancy.unwrap_or(defaults.occupancy),
                balance: self.penalties.balance.unwrap_or(defaults.balance),
            },
        };

        Ok(ProblemDefinition { graph, config })
    }
}
