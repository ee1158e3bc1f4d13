use crate::core::graph::SiteGraph;
use crate::engine::interpret::Assignment;
use crate::engine::ranking::RankedConfiguration;
use phf::phf_map;

pub const DEFAULT_COLOR: &str = "gray";

/// Diverging colour map that edge weights are placed on.
pub const EDGE_COLORMAP: &str = "coolwarm";

static LINKER_COLORS: phf::Map<&'static str, &'static str> = phf_map! {
    "A" => "r",
    "B" => "g",
    "C" => "b",
    "D" => "c",
    "-" => "gray",
};

pub fn color_of(label: &str) -> Option<&'static str> {
    LINKER_COLORS.get(label).copied()
}

/// Node colours for a graph drawing: the colour of the first linker assigned to each site,
/// or [`DEFAULT_COLOR`] for empty sites and labels without a colour.
pub fn node_colors(assignment: &Assignment) -> Vec<&'static str> {
    assignment
        .sites()
        .iter()
        .map(|types| {
            types
                .first()
                .and_then(|t| color_of(t))
                .unwrap_or(DEFAULT_COLOR)
        })
        .collect()
}

/// Legend entries for the labels appearing in `assignment` that have a colour, sorted.
///
/// Empty sites contribute the [`EMPTY_SITE`](crate::engine::interpret::EMPTY_SITE) entry.
pub fn legend(assignment: &Assignment) -> Vec<(String, &'static str)> {
    let mut entries: Vec<(String, &'static str)> = assignment
        .labels()
        .iter()
        .flat_map(|label| label.split(','))
        .filter_map(|l| color_of(l).map(|c| (l.to_string(), c)))
        .collect();
    entries.sort();
    entries.dedup();
    entries
}

/// Places each distinct edge weight on [`EDGE_COLORMAP`], as `(weight, position)` pairs.
///
/// Weights are spread evenly over `[0, 1]` by rank, lightest first. A single weight sits
/// at `0.0`.
pub fn edge_weight_scale(graph: &SiteGraph) -> Vec<(f64, f64)> {
    let weights = graph.unique_weights();
    let span = weights.len().saturating_sub(1).max(1) as f64;
    weights
        .into_iter()
        .enumerate()
        .map(|(rank, weight)| (weight, rank as f64 / span))
        .collect()
}

/// Bars of a probability histogram, in ranked order.
pub fn histogram(ranked: &[RankedConfiguration]) -> Vec<(String, f64)> {
    ranked
        .iter()
        .map(|r| (r.assignment.to_string(), r.probability))
        .collect()
}
