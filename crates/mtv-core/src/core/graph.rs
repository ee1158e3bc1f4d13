use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GraphError {
    #[error("Edge ({from}, {to}) references a site outside 0..{site_count}")]
    SiteOutOfRange {
        from: usize,
        to: usize,
        site_count: usize,
    },
}

/// A connection between two linker sites.
///
/// The `weight` is optional so that graphs assembled from external data can be
/// represented faithfully even when the weight attribute is absent; the
/// formulator rejects such edges when it builds the balance term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: Option<f64>,
}

/// An undirected, weighted graph whose nodes are the linker sites of a framework.
///
/// Sites form the dense range `0..site_count` and are fixed at construction.
/// A pair of sites holds at most one edge regardless of direction. Edges are kept in
/// first-insertion order, which is the order the formulator iterates them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteGraph {
    site_count: usize,
    edges: Vec<Edge>,
    lookup: HashMap<(usize, usize), usize>,
}

impl SiteGraph {
    /// Creates a graph with `site_count` sites and no edges.
    pub fn new(site_count: usize) -> Self {
        Self {
            site_count,
            edges: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Adds a weighted edge between two existing sites.
    ///
    /// Adding an edge that already exists, in either direction, replaces its weight.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SiteOutOfRange`] if either endpoint is not a site of this graph.
    pub fn add_edge(&mut self, source: usize, target: usize, weight: f64) -> Result<(), GraphError> {
        self.push_edge(source, target, Some(weight))
    }

    /// Adds an edge that carries no weight attribute.
    ///
    /// An existing edge between the same sites keeps its weight.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SiteOutOfRange`] if either endpoint is not a site of this graph.
    pub fn add_unweighted_edge(&mut self, source: usize, target: usize) -> Result<(), GraphError> {
        self.push_edge(source, target, None)
    }

    fn push_edge(
        &mut self,
        source: usize,
        target: usize,
        weight: Option<f64>,
    ) -> Result<(), GraphError> {
        if source >= self.site_count || target >= self.site_count {
            return Err(GraphError::SiteOutOfRange {
                from: source,
                to: target,
                site_count: self.site_count,
            });
        }
        let key = (source.min(target), source.max(target));
        if let Some(&slot) = self.lookup.get(&key) {
            if weight.is_some() {
                self.edges[slot].weight = weight;
            }
            return Ok(());
        }
        self.lookup.insert(key, self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            weight,
        });
        Ok(())
    }

    pub fn site_count(&self) -> usize {
        self.site_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Returns the distinct edge weights in ascending order.
    ///
    /// Edges without a weight are skipped. Used to key edge legends when rendering.
    pub fn unique_weights(&self) -> Vec<f64> {
        let mut weights: Vec<f64> = self.edges.iter().filter_map(|e| e.weight).collect();
        weights.sort_by(f64::total_cmp);
        weights.dedup();
        weights
    }
}
